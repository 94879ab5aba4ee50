//! Reduced-motion handling for the hero background.

use super::{BackgroundEffect, BackgroundError};

pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
/// Local storage key that forces reduced motion when set to `"true"`.
pub const REDUCED_MOTION_KEY: &str = "reduced-motion";

/// Intensity knobs of the NET effect that depend on the motion preference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSettings {
	pub mouse_controls: bool,
	pub touch_controls: bool,
	pub points: f64,
	pub max_distance: f64,
	pub spacing: f64,
	pub speed: f64,
}

impl MotionSettings {
	pub const FULL: MotionSettings = MotionSettings {
		mouse_controls: true,
		touch_controls: true,
		points: 12.0,
		max_distance: 22.0,
		spacing: 14.0,
		speed: 1.0,
	};

	pub const REDUCED: MotionSettings = MotionSettings {
		mouse_controls: false,
		touch_controls: false,
		points: 4.0,
		max_distance: 10.0,
		spacing: 20.0,
		speed: 0.3,
	};

	pub fn for_reduced(reduced: bool) -> Self {
		if reduced { Self::REDUCED } else { Self::FULL }
	}
}

/// Whether the stored flag forces reduced motion.
pub fn stored_flag_forces_reduced(value: Option<&str>) -> bool {
	value == Some("true")
}

/// Settings to apply after the OS preference flips, or `None` when the stored
/// override keeps the effect reduced.
pub fn settings_after_change(system_reduced: bool, stored_override: bool) -> Option<MotionSettings> {
	match (system_reduced, stored_override) {
		(true, _) => Some(MotionSettings::REDUCED),
		(false, false) => Some(MotionSettings::FULL),
		(false, true) => None,
	}
}

/// Pushes the new settings into a running effect. Returns whether anything was applied.
pub fn apply_preference_change<E: BackgroundEffect>(
	effect: &E,
	system_reduced: bool,
	stored_override: bool,
) -> Result<bool, BackgroundError> {
	match settings_after_change(system_reduced, stored_override) {
		Some(settings) => {
			effect.set_options(&settings)?;
			Ok(true)
		}
		None => Ok(false),
	}
}

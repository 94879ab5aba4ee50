//! Bindings to the Vanta.js NET effect loaded by the page's script tags.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Element, MediaQueryListEvent, Window};

use super::motion::{
	MotionSettings, REDUCED_MOTION_KEY, REDUCED_MOTION_QUERY, apply_preference_change,
	stored_flag_forces_reduced,
};
use super::{BackgroundEffect, BackgroundError};

pub const CONTAINER_ID: &str = "hero-vanta";

/// Delays before the second and third load attempts.
const RETRY_DELAYS_MS: [i32; 2] = [100, 200];

const NET_COLOR: u32 = 0x3b82f6;
const NET_BACKGROUND: u32 = 0x111827;

pub type SharedNet = Rc<RefCell<Option<VantaNet>>>;
pub type PreferenceListener = Closure<dyn FnMut(MediaQueryListEvent)>;

/// Delay before retry number `attempt + 1`, or `None` once retries are spent.
pub fn retry_delay(attempt: usize) -> Option<i32> {
	RETRY_DELAYS_MS.get(attempt).copied()
}

fn set(target: &Object, key: &str, value: JsValue) -> Result<(), BackgroundError> {
	Reflect::set(target, &JsValue::from_str(key), &value)?;
	Ok(())
}

fn motion_options(settings: &MotionSettings) -> Result<Object, BackgroundError> {
	let options = Object::new();
	set(&options, "mouseControls", settings.mouse_controls.into())?;
	set(&options, "touchControls", settings.touch_controls.into())?;
	set(&options, "points", settings.points.into())?;
	set(&options, "maxDistance", settings.max_distance.into())?;
	set(&options, "spacing", settings.spacing.into())?;
	set(&options, "speed", settings.speed.into())?;
	Ok(options)
}

fn library(window: &Window) -> Option<JsValue> {
	let vanta = Reflect::get(window, &JsValue::from_str("VANTA")).ok()?;
	(!vanta.is_undefined() && !vanta.is_null()).then_some(vanta)
}

fn method(target: &JsValue, name: &str) -> Result<Function, BackgroundError> {
	Reflect::get(target, &JsValue::from_str(name))?
		.dyn_into()
		.map_err(|_| BackgroundError::Script(format!("{} is not a function", name)))
}

/// A running NET effect instance.
pub struct VantaNet {
	effect: JsValue,
}

impl VantaNet {
	pub fn create(
		window: &Window,
		el: &Element,
		settings: &MotionSettings,
	) -> Result<Self, BackgroundError> {
		let vanta = library(window).ok_or(BackgroundError::LibraryMissing)?;
		let net = method(&vanta, "NET").map_err(|_| BackgroundError::LibraryMissing)?;

		let options = motion_options(settings)?;
		set(&options, "el", el.clone().into())?;
		set(&options, "gyroControls", false.into())?;
		set(&options, "minHeight", JsValue::from_f64(200.0))?;
		set(&options, "minWidth", JsValue::from_f64(200.0))?;
		set(&options, "scale", JsValue::from_f64(1.0))?;
		set(&options, "scaleMobile", JsValue::from_f64(1.0))?;
		set(&options, "color", NET_COLOR.into())?;
		set(&options, "backgroundColor", NET_BACKGROUND.into())?;

		let effect = net.call1(&vanta, &options)?;
		Ok(Self { effect })
	}
}

impl BackgroundEffect for VantaNet {
	fn set_options(&self, settings: &MotionSettings) -> Result<(), BackgroundError> {
		let options = motion_options(settings)?;
		method(&self.effect, "setOptions")?.call1(&self.effect, &options)?;
		Ok(())
	}
}

fn system_prefers_reduced(window: &Window) -> bool {
	window
		.match_media(REDUCED_MOTION_QUERY)
		.ok()
		.flatten()
		.is_some_and(|query| query.matches())
}

/// Reads the local storage override. Missing storage counts as unset.
pub fn stored_override(window: &Window) -> bool {
	let value = window
		.local_storage()
		.ok()
		.flatten()
		.and_then(|storage| storage.get_item(REDUCED_MOTION_KEY).ok().flatten());
	stored_flag_forces_reduced(value.as_deref())
}

pub fn prefers_reduced_motion(window: &Window) -> bool {
	system_prefers_reduced(window) || stored_override(window)
}

fn start(window: &Window) -> Result<VantaNet, BackgroundError> {
	let el = window
		.document()
		.and_then(|doc| doc.get_element_by_id(CONTAINER_ID))
		.ok_or(BackgroundError::ContainerMissing(CONTAINER_ID))?;
	let reduced = prefers_reduced_motion(window);
	info!("background: starting NET effect (reduced motion: {})", reduced);
	VantaNet::create(window, &el, &MotionSettings::for_reduced(reduced))
}

/// Starts the effect if the library is present, otherwise schedules the next
/// attempt. Gives up with an error once the retry delays are exhausted.
pub fn init_when_loaded(slot: SharedNet, attempt: usize) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if library(&window).is_some() {
		match start(&window) {
			Ok(net) => *slot.borrow_mut() = Some(net),
			Err(e @ BackgroundError::ContainerMissing(_)) => warn!("background: {}", e),
			Err(e) => error!("background: {}", e),
		}
		return;
	}

	let Some(delay) = retry_delay(attempt) else {
		error!("background: failed to load VANTA library");
		return;
	};
	if attempt > 0 {
		warn!("background: VANTA not loaded yet, trying again in {}ms", delay);
	}
	let retry = Closure::once_into_js(move || init_when_loaded(slot, attempt + 1));
	if let Err(e) =
		window.set_timeout_with_callback_and_timeout_and_arguments_0(retry.unchecked_ref(), delay)
	{
		error!("background: could not schedule retry: {:?}", e);
	}
}

/// Follows live changes of the OS motion preference. The returned closure
/// must be kept alive for as long as the listener should fire.
pub fn watch_preference(window: &Window, slot: SharedNet) -> Option<PreferenceListener> {
	let query = window.match_media(REDUCED_MOTION_QUERY).ok().flatten()?;
	let listener = Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |ev: MediaQueryListEvent| {
		let net = slot.borrow();
		let Some(net) = net.as_ref() else {
			return;
		};
		let stored = web_sys::window().is_some_and(|w| stored_override(&w));
		if let Err(e) = apply_preference_change(net, ev.matches(), stored) {
			warn!("background: could not update motion settings: {}", e);
		}
	});
	if let Err(e) =
		query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
	{
		warn!("background: cannot watch motion preference: {:?}", e);
		return None;
	}
	Some(listener)
}

//! Ambient hero background: the Vanta.js NET effect, tuned down for users who
//! prefer reduced motion.

mod motion;
pub mod vanta;

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use thiserror::Error;
use wasm_bindgen::JsValue;

pub use motion::MotionSettings;

/// Why the background effect could not be started or updated.
#[derive(Debug, Error)]
pub enum BackgroundError {
	/// `window.VANTA.NET` is not available.
	#[error("VANTA library is not loaded")]
	LibraryMissing,
	/// The host element is absent from the page.
	#[error("element #{0} not found")]
	ContainerMissing(&'static str),
	/// A call into the library threw.
	#[error("script error: {0}")]
	Script(String),
}

impl From<JsValue> for BackgroundError {
	fn from(value: JsValue) -> Self {
		BackgroundError::Script(format!("{:?}", value))
	}
}

/// A running background effect whose motion settings can be changed live.
pub trait BackgroundEffect {
	/// Pushes new motion parameters to the running effect.
	fn set_options(&self, settings: &MotionSettings) -> Result<(), BackgroundError>;
}

/// Hero section hosting the background effect behind its children.
#[component]
pub fn NetBackground(children: Children) -> impl IntoView {
	let net: vanta::SharedNet = Rc::new(RefCell::new(None));
	let listener: Rc<RefCell<Option<vanta::PreferenceListener>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(window) = web_sys::window() else {
			return;
		};
		vanta::init_when_loaded(net.clone(), 0);
		*listener.borrow_mut() = vanta::watch_preference(&window, net.clone());
	});

	view! {
		<section id={vanta::CONTAINER_ID} class="hero">
			{children()}
		</section>
	}
}

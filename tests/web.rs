//! Browser-only checks. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Object, Reflect};
use tapio_network::components::background::vanta::{
	VantaNet, init_when_loaded, prefers_reduced_motion, stored_override,
};
use tapio_network::components::background::{BackgroundEffect, MotionSettings};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn storage_flag_forces_reduced_motion() {
	let window = web_sys::window().unwrap();
	let storage = window.local_storage().unwrap().unwrap();

	storage.set_item("reduced-motion", "true").unwrap();
	assert!(stored_override(&window));
	assert!(prefers_reduced_motion(&window));

	storage.set_item("reduced-motion", "false").unwrap();
	assert!(!stored_override(&window));

	storage.remove_item("reduced-motion").unwrap();
	assert!(!stored_override(&window));
}

#[wasm_bindgen_test]
fn missing_library_leaves_background_empty() {
	let slot = Rc::new(RefCell::new(None));
	init_when_loaded(slot.clone(), 0);
	assert!(slot.borrow().is_none());
}

#[wasm_bindgen_test]
fn motion_change_is_pushed_to_running_effect() {
	let window = web_sys::window().unwrap();
	let el = window.document().unwrap().create_element("div").unwrap();

	let net = Function::new_no_args(
		"return { setOptions(o) { window.lastNetPoints = o.points; window.lastNetSpeed = o.speed; } };",
	);
	let vanta = Object::new();
	Reflect::set(&vanta, &JsValue::from_str("NET"), &net).unwrap();
	Reflect::set(&window, &JsValue::from_str("VANTA"), &vanta).unwrap();

	let effect = VantaNet::create(&window, &el, &MotionSettings::FULL).unwrap();
	effect.set_options(&MotionSettings::REDUCED).unwrap();

	let read = |key: &str| Reflect::get(&window, &JsValue::from_str(key)).unwrap().as_f64();
	assert_eq!(read("lastNetPoints"), Some(MotionSettings::REDUCED.points));
	assert_eq!(read("lastNetSpeed"), Some(MotionSettings::REDUCED.speed));

	for key in ["VANTA", "lastNetPoints", "lastNetSpeed"] {
		Reflect::delete_property(&window, &JsValue::from_str(key)).unwrap();
	}
}

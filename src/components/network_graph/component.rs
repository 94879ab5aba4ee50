use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, EventTarget, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent,
};

use super::animation::{AnimationState, AnimationToggle, IntervalScheduler};
use super::info_panel::NodeInfoPanel;
use super::interaction::KeyCommand;
use super::layout::Placement;
use super::render;
use super::simulation::LayoutSettings;
use super::state::{NetworkState, PanelView};
use super::types::NetworkData;

const FALLBACK_SIZE: (f64, f64) = (800.0, 600.0);

struct Scene {
	state: NetworkState,
	ctx: CanvasRenderingContext2d,
}

impl Scene {
	fn redraw(&self) {
		render::render(&self.state, &self.ctx);
	}
}

type SharedScene = Rc<RefCell<Option<Scene>>>;
type ListenerSlot = RefCell<Option<Closure<dyn FnMut()>>>;

/// Registers `callback` for `event` on `target`, first detaching whatever the
/// slot held so a dropped closure is never left registered.
fn rebind(target: &EventTarget, event: &str, slot: &ListenerSlot, callback: Closure<dyn FnMut()>) {
	if let Some(old) = slot.borrow_mut().take() {
		let _ = target.remove_event_listener_with_callback(event, old.as_ref().unchecked_ref());
	}
	if let Err(e) = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
		warn!("network: cannot listen for {}: {:?}", event, e);
	}
	*slot.borrow_mut() = Some(callback);
}

/// Hover-derived state pushed out to the panel and the aria attribute.
#[derive(Clone, Copy)]
struct Overlay {
	panel: WriteSignal<Option<PanelView>>,
	active_node: WriteSignal<Option<String>>,
}

impl Overlay {
	fn publish(self, state: &NetworkState) {
		self.panel.set(state.panel_view());
		self.active_node.set(state.hovered_id().map(str::to_owned));
	}
}

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or(FALLBACK_SIZE)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas.get_context("2d").ok()??.dyn_into().ok()
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The interactive network diagram: canvas, details panel and the animation
/// button.
#[component]
pub fn NetworkGraphCanvas(
	#[prop(into)] data: Signal<NetworkData>,
	#[prop(optional)] placement: Placement,
	#[prop(optional)] layout: LayoutSettings,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let scene: SharedScene = Rc::new(RefCell::new(None));
	let toggle: Rc<RefCell<Option<AnimationToggle<IntervalScheduler>>>> =
		Rc::new(RefCell::new(None));
	let resize_cb: Rc<ListenerSlot> = Rc::new(RefCell::new(None));

	let (panel, set_panel) = signal(None::<PanelView>);
	let (active_node, set_active_node) = signal(None::<String>);
	let (animation, set_animation) = signal(AnimationState::Stopped);

	let overlay = Overlay {
		panel: set_panel,
		active_node: set_active_node,
	};

	let (scene_init, toggle_init, resize_cb_init) =
		(scene.clone(), toggle.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			warn!("network: no window, skipping graph");
			return;
		};

		if let Some(running) = toggle_init.borrow_mut().as_mut() {
			running.stop();
		}
		set_animation.set(AnimationState::Stopped);

		let (w, h) = container_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let Some(ctx) = context_2d(&canvas) else {
			error!("network: 2d canvas context unavailable");
			return;
		};
		let state = match NetworkState::new(&data.get(), placement, layout, w, h) {
			Ok(state) => state,
			Err(e) => {
				error!("network: graph construction failed: {}", e);
				return;
			}
		};
		info!(
			"network: {} nodes, {} edges",
			state.graph.node_count(),
			state.graph.edge_count()
		);
		let built = Scene { state, ctx };
		built.redraw();
		overlay.publish(&built.state);
		*scene_init.borrow_mut() = Some(built);

		let (scene_resize, canvas_resize) = (scene_init.clone(), canvas.clone());
		let on_resize = Closure::new(move || {
			let (nw, nh) = container_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *scene_resize.borrow_mut() {
				s.state.resize(nw, nh);
				s.redraw();
				overlay.publish(&s.state);
			}
		});
		rebind(&window, "resize", &resize_cb_init, on_resize);

		let scene_tick = scene_init.clone();
		let tick = Closure::<dyn FnMut()>::new(move || {
			if let Some(ref mut s) = *scene_tick.borrow_mut() {
				if s.state.tick() {
					s.redraw();
					if s.state.hover.hovered().is_some() {
						overlay.publish(&s.state);
					}
				}
			}
		});
		*toggle_init.borrow_mut() = Some(AnimationToggle::new(IntervalScheduler::new(tick)));
	});

	let (scene_click, toggle_click) = (scene.clone(), toggle.clone());
	let on_toggle = move |_: MouseEvent| {
		let mut slot = toggle_click.borrow_mut();
		let Some(toggle) = slot.as_mut() else {
			warn!("network: animation unavailable");
			return;
		};
		let next = toggle.toggle();
		if let Some(ref mut s) = *scene_click.borrow_mut() {
			match next {
				AnimationState::Running => s.state.start_layout(),
				AnimationState::Stopped => s.state.stop_layout(),
			}
		}
		set_animation.set(next);
	};

	let scene_md = scene.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *scene_md.borrow_mut() {
			if s.state.node_at_position(x, y).is_none() {
				s.state.begin_pan(x, y);
			}
		}
	};

	let scene_mm = scene.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *scene_mm.borrow_mut() {
			if s.state.pan_to(x, y) {
				s.redraw();
				overlay.publish(&s.state);
				return;
			}
			let hovered = s.state.node_at_position(x, y);
			if s.state.set_hover(hovered) {
				s.redraw();
				overlay.publish(&s.state);
			}
		}
	};

	let scene_mu = scene.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut s) = *scene_mu.borrow_mut() {
			s.state.end_pan();
		}
	};

	let scene_ml = scene.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *scene_ml.borrow_mut() {
			s.state.end_pan();
			if s.state.set_hover(None) {
				s.redraw();
				overlay.publish(&s.state);
			}
		}
	};

	let scene_wh = scene.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *scene_wh.borrow_mut() {
			s.state.zoom_at(x, y, ev.delta_y() < 0.0);
			s.redraw();
			overlay.publish(&s.state);
		}
	};

	let scene_kd = scene.clone();
	let on_keydown = move |ev: KeyboardEvent| {
		let Some(command) = KeyCommand::from_key(&ev.key(), ev.shift_key()) else {
			return;
		};
		if let Some(ref mut s) = *scene_kd.borrow_mut() {
			if s.state.handle_key(command) {
				ev.prevent_default();
				s.redraw();
				overlay.publish(&s.state);
			}
		}
	};

	view! {
		<div class="network-section">
			<div
				id="network-graph"
				class="network-container"
				tabindex="0"
				role="application"
				aria-label="Network of Tapio agents, Finnish organizations and immigrant needs"
				aria-activedescendant=move || active_node.get()
				on:keydown=on_keydown
			>
				<canvas
					node_ref=canvas_ref
					class="network-canvas"
					on:mousedown=on_mousedown
					on:mousemove=on_mousemove
					on:mouseup=on_mouseup
					on:mouseleave=on_mouseleave
					on:wheel=on_wheel
					style="display: block; cursor: grab;"
				/>
				<NodeInfoPanel panel=panel />
			</div>
			<button id="animate-button" class="animate-button" on:click=on_toggle>
				{move || animation.get().button_label()}
			</button>
		</div>
	}
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
	use std::cell::Cell;

	use wasm_bindgen_test::*;
	use web_sys::Event;

	use super::*;

	wasm_bindgen_test_configure!(run_in_browser);

	fn counter(hits: &Rc<Cell<u32>>) -> Closure<dyn FnMut()> {
		let hits = hits.clone();
		Closure::new(move || hits.set(hits.get() + 1))
	}

	#[wasm_bindgen_test]
	fn rebinding_detaches_the_previous_listener() {
		let target: EventTarget = web_sys::window()
			.unwrap()
			.document()
			.unwrap()
			.create_element("div")
			.unwrap()
			.into();
		let slot: ListenerSlot = RefCell::new(None);
		let (first, second) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));

		rebind(&target, "resize", &slot, counter(&first));
		rebind(&target, "resize", &slot, counter(&second));
		target.dispatch_event(&Event::new("resize").unwrap()).unwrap();

		assert_eq!(first.get(), 0);
		assert_eq!(second.get(), 1);
	}
}

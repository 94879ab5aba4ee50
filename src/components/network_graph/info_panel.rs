use leptos::prelude::*;

use super::interaction::{PANEL_FALLBACK_HEIGHT, PANEL_WIDTH, place_panel};
use super::state::PanelView;

/// Floating details card for the hovered node.
#[component]
pub fn NodeInfoPanel(#[prop(into)] panel: Signal<Option<PanelView>>) -> impl IntoView {
	let panel_ref = NodeRef::<leptos::html::Div>::new();

	let position = move || {
		let view = panel.get()?;
		let height = panel_ref
			.get_untracked()
			.map(|el| el.offset_height() as f64)
			.filter(|h| *h > 0.0)
			.unwrap_or(PANEL_FALLBACK_HEIGHT);
		Some(place_panel(view.anchor, (PANEL_WIDTH, height), view.bounds))
	};

	view! {
		<div
			id="node-info-panel"
			node_ref=panel_ref
			class="node-info-panel"
			class:visible=move || panel.get().is_some()
			style:left=move || position().map(|(left, _)| format!("{}px", left)).unwrap_or_default()
			style:top=move || position().map(|(_, top)| format!("{}px", top)).unwrap_or_default()
			role="status"
			aria-live="polite"
		>
			{move || {
				panel
					.get()
					.map(|view| {
						let connections = view.info.connections_text();
						view! {
							<h4 class="font-semibold text-lg mb-1">{view.info.title}</h4>
							<p class={format!("text-sm {} mb-2", view.info.accent)}>
								{view.info.subtitle}
							</p>
							<p class="text-xs">{view.info.description}</p>
							{connections
								.map(|text| view! { <p class="text-xs mt-2 font-medium">{text}</p> })}
						}
					})
			}}
		</div>
	}
}

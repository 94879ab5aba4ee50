use leptos::prelude::*;

use crate::components::background::NetBackground;
use crate::components::network_graph::{NetworkGraphCanvas, build_network};

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	let network = Signal::derive(build_network);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<NetBackground>
				<div class="hero-content">
					<h1>"Tapio"</h1>
					<p class="subtitle">
						"AI agents guiding immigrants through Finnish public services"
					</p>
				</div>
			</NetBackground>

			<main class="network-page">
				<h2>"The agent network"</h2>
				<p class="hint">
					"Hover a node to see its connections. Focus the diagram and press Tab to start from the immigrants hub, Escape to clear."
				</p>
				<NetworkGraphCanvas data=network />
			</main>
		</ErrorBoundary>
	}
}

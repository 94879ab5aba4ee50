//! Canvas rendering of the Tapio agent network with hover highlighting,
//! an info panel and an on-demand force layout.

mod animation;
mod component;
pub mod dataset;
pub mod graph;
mod info_panel;
pub mod interaction;
pub mod layout;
pub mod reducer;
mod render;
mod simulation;
mod state;
pub mod types;

pub use component::NetworkGraphCanvas;
pub use dataset::build_network;
pub use layout::Placement;
pub use simulation::LayoutSettings;
pub use types::NetworkData;

//! Page components: the agent network diagram and the hero background.

pub mod background;
pub mod network_graph;

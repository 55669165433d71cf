//! Graph core: data model, adjacency index, neighbor classification and
//! highlight state. Nothing in here touches the DOM.

pub mod classify;
pub mod color;
pub mod highlight;
pub mod index;
pub mod model;
pub mod search;
pub mod session;
pub mod types;

pub use classify::{NeighborClasses, SharingGroup, SharingSummary, Sharings};
pub use highlight::{ColorMode, HighlightState};
pub use index::{AdjacencyIndex, GraphIndex};
pub use model::{Edge, Graph, GroupNotice, Node};
pub use search::SearchOutcome;
pub use session::{ClickEvent, NodeSelection, ViewerSession};
pub use types::{GraphData, NodeId};

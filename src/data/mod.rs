//! Loading the published data files.

pub mod accessory;
pub mod archive;
pub mod fetch;

pub use accessory::{AccessoryData, GroupEntry, Measure};
pub use archive::{load_graph_archive, parse_graph};

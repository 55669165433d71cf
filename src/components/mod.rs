mod badge;
mod controls;
pub mod graph_view;
mod info_panel;
mod legend;
mod search_box;

pub use controls::Controls;
pub use info_panel::InfoPanel;
pub use legend::Legend;
pub use search_box::SearchBox;

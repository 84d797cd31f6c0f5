//! Reusable widget components.

pub mod detail;
pub mod status;
pub mod table;

pub use detail::DetailPanel;
pub use status::StatusIndicator;
pub use table::ResourceTable;

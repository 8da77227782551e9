//! GUI module - User interface components

mod app;
mod notice;
mod table_view;
mod toolbar;

pub use app::CsvEditorApp;
pub use notice::Notices;
pub use table_view::{TableAction, TableView};
pub use toolbar::{Toolbar, ToolbarAction, ToolbarState};

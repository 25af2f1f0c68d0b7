mod format;
mod history;
mod panel;

pub(crate) use history::{HistoryTableOptions, history_json, print_history_table};
pub(crate) use panel::{PanelOptions, panel_json, print_banner, print_panel};

use comfy_table::{Cell, Color, Table};

use crate::viewer::Panel;

use super::format::{create_styled_table, header_cell, label_cell, styled_cell, to_pretty_json};

#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelOptions {
    pub(crate) use_color: bool,
}

const LABELS: [&str; 4] = ["Persona", "Mission", "Phase 1", "Actions"];

fn panel_table(panel: &Panel<'_>, opts: PanelOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    let title = match panel.timestamp {
        Some(ts) => format!("Captured {ts}"),
        None => String::new(),
    };
    table.set_header(vec![header_cell("Field", c), header_cell(&title, c)]);

    let values = [panel.persona, panel.mission, panel.phase, panel.actions];
    for (label, value) in LABELS.into_iter().zip(values) {
        table.add_row(vec![label_cell(label, c), Cell::new(value)]);
    }
    table
}

/// Print the four display fields as a two-column table
pub(crate) fn print_panel(panel: &Panel<'_>, opts: PanelOptions) {
    println!("{}", panel_table(panel, opts));
}

/// JSON object with the four fields, the capture time, and an optional error
pub(crate) fn panel_json(panel: &Panel<'_>, error: Option<&str>) -> String {
    let mut obj = serde_json::json!({
        "timestamp": panel.timestamp,
        "persona": panel.persona,
        "mission": panel.mission,
        "phase": panel.phase,
        "actions": panel.actions,
    });
    if let Some(message) = error {
        obj["error"] = serde_json::json!(message);
    }
    to_pretty_json(&obj)
}

/// Print the transient failure banner to stderr
pub(crate) fn print_banner(message: &str, use_color: bool) {
    let mut table = create_styled_table();
    let color = use_color.then_some(Color::Red);
    table.add_row(vec![styled_cell(message, color, true)]);
    eprintln!("{table}");
}

use comfy_table::{Cell, CellAlignment, Table};

use crate::history::HistoryBuffer;

use super::format::{create_styled_table, header_cell, mission_preview, to_pretty_json};

#[derive(Debug, Clone, Copy)]
pub(crate) struct HistoryTableOptions {
    pub(crate) use_color: bool,
}

fn history_table(history: &HistoryBuffer, opts: HistoryTableOptions) -> Table {
    let c = opts.use_color;
    let mut table = create_styled_table();
    table.set_header(vec![
        header_cell("#", c),
        header_cell("Time", c),
        header_cell("Mission", c),
    ]);
    // Numbered from 1 as shown; entry N is display index N-1
    for (i, result) in history.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(&result.timestamp),
            Cell::new(mission_preview(&result.mission)),
        ]);
    }
    table
}

/// Print the newest-first history list
pub(crate) fn print_history_table(history: &HistoryBuffer, opts: HistoryTableOptions) {
    if history.is_empty() {
        println!("No history yet.");
        return;
    }
    println!("{}", history_table(history, opts));
}

/// Full history as a JSON array, newest first
pub(crate) fn history_json(history: &HistoryBuffer) -> String {
    let entries: Vec<_> = history
        .iter()
        .map(|r| serde_json::to_value(r).unwrap_or(serde_json::Value::Null))
        .collect();
    to_pretty_json(&serde_json::Value::Array(entries))
}

//! CLI subcommand definitions

use std::path::PathBuf;

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Fetch once from the endpoint and show the extracted fields (default)
    Fetch,
    /// Extract fields from a saved blob instead of calling the endpoint
    Extract {
        /// File holding the raw output; reads stdin when omitted or "-"
        file: Option<PathBuf>,
    },
    /// Line-driven session: fetch repeatedly and browse the last 10 results
    Interactive,
}

/// One line of input in an interactive session
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SessionAction {
    Fetch,
    /// Display index, already converted from the 1-based number shown
    Select(usize),
    History,
    Help,
    Quit,
    Nothing,
    Unknown(String),
}

impl SessionAction {
    pub(crate) fn parse(line: &str) -> Self {
        let input = line.trim();
        match input.to_ascii_lowercase().as_str() {
            "" => SessionAction::Nothing,
            "f" | "fetch" => SessionAction::Fetch,
            "h" | "history" => SessionAction::History,
            "?" | "help" => SessionAction::Help,
            "q" | "quit" | "exit" => SessionAction::Quit,
            other => match other.parse::<usize>() {
                Ok(n) if n >= 1 => SessionAction::Select(n - 1),
                _ => SessionAction::Unknown(input.to_string()),
            },
        }
    }
}

pub(crate) const SESSION_HELP: &str = "\
  f, fetch     fetch new output from the endpoint
  N            show history entry N (1 = newest)
  h, history   list history
  ?, help      show this help
  q, quit      leave";

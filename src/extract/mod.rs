//! Field extraction from the endpoint's raw text blob
//!
//! Four independent searches, each falling back to a fixed sentinel. Nothing
//! here fails: a missing section is an ordinary outcome.

mod markers;

use regex::Regex;
use serde::Serialize;

/// Sentinel for persona, mission and phase
pub(crate) const NOT_FOUND: &str = "Not found";

/// Sentinel for the actions block
pub(crate) const NO_ACTIONS: &str = "No actions found for Phase 1.";

/// The four labelled fields of one blob, without capture time
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExtractedFields {
    pub(crate) persona: String,
    pub(crate) mission: String,
    pub(crate) phase: String,
    pub(crate) actions: String,
}

/// One extraction, stamped with its display-formatted capture time
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ExtractionResult {
    pub(crate) timestamp: String,
    pub(crate) persona: String,
    pub(crate) mission: String,
    pub(crate) phase: String,
    pub(crate) actions: String,
}

impl ExtractionResult {
    pub(crate) fn new(timestamp: impl Into<String>, fields: ExtractedFields) -> Self {
        Self {
            timestamp: timestamp.into(),
            persona: fields.persona,
            mission: fields.mission,
            phase: fields.phase,
            actions: fields.actions,
        }
    }
}

/// Extract all four fields from `raw`.
pub(crate) fn extract_fields(raw: &str) -> ExtractedFields {
    ExtractedFields {
        persona: capture_group(&markers::PERSONA, raw, "persona", NOT_FOUND),
        mission: capture_group(&markers::MISSION, raw, "mission", NOT_FOUND),
        phase: capture_group(&markers::PHASE, raw, "phase", NOT_FOUND),
        actions: capture_whole(&markers::ACTIONS, raw, "actions", NO_ACTIONS),
    }
}

/// Extract `raw` and stamp it with `timestamp`.
pub(crate) fn extract(raw: &str, timestamp: impl Into<String>) -> ExtractionResult {
    ExtractionResult::new(timestamp, extract_fields(raw))
}

fn capture_group(re: &Regex, raw: &str, field: &str, sentinel: &str) -> String {
    let captured = re
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str());
    settle(captured, field, sentinel)
}

fn capture_whole(re: &Regex, raw: &str, field: &str, sentinel: &str) -> String {
    settle(re.find(raw).map(|m| m.as_str()), field, sentinel)
}

// An empty capture counts as a miss; a whitespace-only one trims to "".
fn settle(captured: Option<&str>, field: &str, sentinel: &str) -> String {
    match captured {
        Some(text) if !text.is_empty() => text.trim_matches(is_blank).to_string(),
        _ => {
            log::debug!("no {field} section in endpoint output");
            sentinel.to_string()
        }
    }
}

// Unicode whitespace plus the byte order mark
fn is_blank(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

//! Template markers and the patterns built from them
//!
//! The endpoint returns loosely templated markdown. Each field is located by
//! its own marker so a missing section never disturbs the others.

use std::sync::LazyLock;

use regex::Regex;

/// Heading line that opens the persona section
pub(crate) const PERSONA_HEADING: &str =
    "# n8n Automation Architect & Algorithmic Trading Strategist";

/// Label preceding the quoted persona description
pub(crate) const PERSONA_LABEL: &str = "The app description is: \"";

pub(crate) const MISSION_LABEL: &str = "Your Mission: ";

pub(crate) const PHASE_LABEL: &str = "Phase 1: ";

/// Opening of an action tag; the closing tag must follow somewhere after it
pub(crate) const ACTION_OPEN: &str = "<ACTION";

pub(crate) const ACTION_CLOSE: &str = "</ACTION>";

/// Heading, rest of its line, then anything up to the quoted description.
pub(super) static PERSONA: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r#"(?s){}.*?\n.*?{}(.*?)""#,
        regex::escape(PERSONA_HEADING),
        regex::escape(PERSONA_LABEL)
    ))
});

pub(super) static MISSION: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{}(.*?)\n", regex::escape(MISSION_LABEL))));

pub(super) static PHASE: LazyLock<Regex> =
    LazyLock::new(|| compile(&format!(r"{}(.*?)\n", regex::escape(PHASE_LABEL))));

/// First complete action tag through end of input.
pub(super) static ACTIONS: LazyLock<Regex> = LazyLock::new(|| {
    compile(&format!(
        r"(?s){}.*?{}.*",
        regex::escape(ACTION_OPEN),
        regex::escape(ACTION_CLOSE)
    ))
});

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern is assembled from escaped constants")
}

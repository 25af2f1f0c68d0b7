//! Fetch/select control flow and the state shown to the user
//!
//! A fetch runs in two halves: `begin_fetch` shows the "Fetching..." fields and
//! marks the viewer busy, `finish_fetch` applies the endpoint reply and clears
//! it. A fetch begun while busy is refused. Endpoint failures stop here: they
//! become placeholder fields and a banner, never an `Err` to the caller.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::endpoint::Endpoint;
use crate::error::EndpointError;
use crate::extract::{ExtractionResult, extract};
use crate::history::HistoryBuffer;
use crate::utils::Timezone;

/// Field text while a request is outstanding
pub(crate) const FETCHING: &str = "Fetching...";

/// Field text after an endpoint failure
pub(crate) const FETCH_FAILED: &str = "Error fetching data.";

/// How long the failure banner stays up
pub(crate) const BANNER_TTL: Duration = Duration::from_secs(5);

/// What the four display fields currently hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DisplayState {
    /// Nothing fetched yet
    Idle,
    /// Request outstanding
    Fetching,
    Showing(ExtractionResult),
    Failed,
}

/// Borrowed view of the four fields, whatever state produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Panel<'a> {
    pub(crate) timestamp: Option<&'a str>,
    pub(crate) persona: &'a str,
    pub(crate) mission: &'a str,
    pub(crate) phase: &'a str,
    pub(crate) actions: &'a str,
}

impl<'a> Panel<'a> {
    /// All four fields set to the same placeholder text
    pub(crate) fn placeholder(text: &'a str) -> Self {
        Panel {
            timestamp: None,
            persona: text,
            mission: text,
            phase: text,
            actions: text,
        }
    }

    pub(crate) fn of(result: &'a ExtractionResult) -> Self {
        Panel {
            timestamp: Some(&result.timestamp),
            persona: &result.persona,
            mission: &result.mission,
            phase: &result.phase,
            actions: &result.actions,
        }
    }
}

impl DisplayState {
    pub(crate) fn panel(&self) -> Option<Panel<'_>> {
        match self {
            DisplayState::Idle => None,
            DisplayState::Fetching => Some(Panel::placeholder(FETCHING)),
            DisplayState::Showing(result) => Some(Panel::of(result)),
            DisplayState::Failed => Some(Panel::placeholder(FETCH_FAILED)),
        }
    }
}

/// Transient error message that clears itself after [`BANNER_TTL`]
#[derive(Debug, Clone, Copy)]
pub(crate) struct Banner {
    message: &'static str,
    raised_at: Instant,
}

impl Banner {
    pub(crate) fn raise(message: &'static str, now: Instant) -> Self {
        Self {
            message,
            raised_at: now,
        }
    }

    pub(crate) fn is_visible_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) < BANNER_TTL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchOutcome {
    Extracted,
    Failed,
    /// Another fetch was still in flight
    Busy,
}

pub(crate) struct Viewer<E> {
    endpoint: E,
    timezone: Timezone,
    history: HistoryBuffer,
    display: DisplayState,
    banner: Option<Banner>,
    busy: bool,
}

impl<E: Endpoint> Viewer<E> {
    pub(crate) fn new(endpoint: E, timezone: Timezone) -> Self {
        Self {
            endpoint,
            timezone,
            history: HistoryBuffer::new(),
            display: DisplayState::Idle,
            banner: None,
            busy: false,
        }
    }

    /// Query the endpoint once and show the result.
    ///
    /// `now` drives the banner clock; `captured_at` stamps the result.
    pub(crate) fn fetch(&mut self, now: Instant, captured_at: DateTime<Utc>) -> FetchOutcome {
        if !self.begin_fetch() {
            return FetchOutcome::Busy;
        }
        let reply = self.endpoint.predict();
        self.finish_fetch(reply, now, captured_at)
    }

    /// Mark a request as outstanding; `false` if one already is.
    pub(crate) fn begin_fetch(&mut self) -> bool {
        if self.busy {
            log::debug!("fetch refused: request already in flight");
            return false;
        }
        self.busy = true;
        self.banner = None;
        self.display = DisplayState::Fetching;
        true
    }

    pub(crate) fn finish_fetch(
        &mut self,
        reply: Result<String, EndpointError>,
        now: Instant,
        captured_at: DateTime<Utc>,
    ) -> FetchOutcome {
        self.busy = false;
        match reply {
            Ok(raw) => {
                let result = extract(&raw, self.timezone.format_time(captured_at));
                self.history.push(result.clone());
                self.display = DisplayState::Showing(result);
                FetchOutcome::Extracted
            }
            Err(e) => {
                log::debug!("fetch failed: {e}");
                self.display = DisplayState::Failed;
                self.banner = Some(Banner::raise(EndpointError::USER_MESSAGE, now));
                FetchOutcome::Failed
            }
        }
    }

    /// Redisplay a history entry; `false` leaves the display untouched.
    pub(crate) fn select(&mut self, display_index: usize) -> bool {
        match self.history.at(display_index) {
            Some(result) => {
                self.display = DisplayState::Showing(result.clone());
                true
            }
            None => false,
        }
    }

    pub(crate) fn display(&self) -> &DisplayState {
        &self.display
    }

    pub(crate) fn history(&self) -> &HistoryBuffer {
        &self.history
    }

    /// Banner text if one was raised less than [`BANNER_TTL`] before `now`
    pub(crate) fn banner(&self, now: Instant) -> Option<&'static str> {
        self.banner
            .filter(|b| b.is_visible_at(now))
            .map(|b| b.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use crate::extract::{NO_ACTIONS, NOT_FOUND};

    struct ScriptedEndpoint {
        replies: RefCell<VecDeque<Result<String, EndpointError>>>,
        calls: RefCell<usize>,
    }

    impl ScriptedEndpoint {
        fn new(replies: Vec<Result<String, EndpointError>>) -> Self {
            Self {
                replies: RefCell::new(replies.into()),
                calls: RefCell::new(0),
            }
        }
    }

    impl Endpoint for &ScriptedEndpoint {
        fn predict(&self) -> Result<String, EndpointError> {
            *self.calls.borrow_mut() += 1;
            self.replies
                .borrow_mut()
                .pop_front()
                .unwrap_or(Err(EndpointError::MissingOutput))
        }
    }

    fn utc() -> Timezone {
        Timezone::parse(Some("UTC")).unwrap()
    }

    fn at(hms: &str) -> DateTime<Utc> {
        format!("2026-10-16T{hms}Z").parse().unwrap()
    }

    fn mission_blob(mission: &str) -> String {
        format!("Your Mission: {mission}\n")
    }

    #[test]
    fn starts_idle_with_empty_history() {
        let endpoint = ScriptedEndpoint::new(vec![]);
        let viewer = Viewer::new(&endpoint, utc());
        assert_eq!(viewer.display(), &DisplayState::Idle);
        assert!(viewer.display().panel().is_none());
        assert!(viewer.history().is_empty());
        assert!(viewer.banner(Instant::now()).is_none());
    }

    #[test]
    fn successful_fetch_shows_and_records_result() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(mission_blob("Grow capital"))]);
        let mut viewer = Viewer::new(&endpoint, utc());

        let outcome = viewer.fetch(Instant::now(), at("12:34:56"));
        assert_eq!(outcome, FetchOutcome::Extracted);

        let panel = viewer.display().panel().unwrap();
        assert_eq!(panel.mission, "Grow capital");
        assert_eq!(panel.persona, NOT_FOUND);
        assert_eq!(panel.actions, NO_ACTIONS);
        assert_eq!(panel.timestamp, Some("12:34:56"));
        assert_eq!(viewer.history().len(), 1);
        assert_eq!(viewer.history().at(0).unwrap().mission, "Grow capital");
    }

    #[test]
    fn failed_fetch_shows_placeholders_and_banner() {
        let endpoint = ScriptedEndpoint::new(vec![Err(EndpointError::Status(500))]);
        let mut viewer = Viewer::new(&endpoint, utc());
        let now = Instant::now();

        assert_eq!(viewer.fetch(now, at("08:00:00")), FetchOutcome::Failed);
        assert_eq!(viewer.display(), &DisplayState::Failed);
        assert_eq!(
            viewer.display().panel(),
            Some(Panel::placeholder(FETCH_FAILED))
        );
        assert_eq!(viewer.banner(now), Some(EndpointError::USER_MESSAGE));
        assert!(viewer.history().is_empty());
    }

    #[test]
    fn banner_clears_after_five_seconds() {
        let endpoint = ScriptedEndpoint::new(vec![Err(EndpointError::Timeout)]);
        let mut viewer = Viewer::new(&endpoint, utc());
        let now = Instant::now();
        viewer.fetch(now, at("08:00:00"));

        assert!(viewer.banner(now + Duration::from_millis(4_999)).is_some());
        assert!(viewer.banner(now + BANNER_TTL).is_none());
        assert!(viewer.banner(now + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn new_fetch_hides_previous_banner() {
        let endpoint = ScriptedEndpoint::new(vec![
            Err(EndpointError::Timeout),
            Ok(mission_blob("Recover")),
        ]);
        let mut viewer = Viewer::new(&endpoint, utc());
        let now = Instant::now();
        viewer.fetch(now, at("08:00:00"));
        viewer.fetch(now, at("08:00:01"));
        assert!(viewer.banner(now).is_none());
        assert_eq!(viewer.display().panel().unwrap().mission, "Recover");
    }

    #[test]
    fn failure_keeps_existing_history() {
        let endpoint = ScriptedEndpoint::new(vec![
            Ok(mission_blob("First")),
            Err(EndpointError::Transport("connection refused".into())),
        ]);
        let mut viewer = Viewer::new(&endpoint, utc());
        viewer.fetch(Instant::now(), at("09:00:00"));
        viewer.fetch(Instant::now(), at("09:00:05"));

        assert_eq!(viewer.history().len(), 1);
        assert!(viewer.select(0));
        assert_eq!(viewer.display().panel().unwrap().mission, "First");
    }

    #[test]
    fn select_redisplays_without_querying() {
        let endpoint = ScriptedEndpoint::new(vec![
            Ok(mission_blob("Older")),
            Ok(mission_blob("Newer")),
        ]);
        let mut viewer = Viewer::new(&endpoint, utc());
        viewer.fetch(Instant::now(), at("10:00:00"));
        viewer.fetch(Instant::now(), at("10:00:10"));
        assert_eq!(*endpoint.calls.borrow(), 2);

        assert!(viewer.select(1));
        let panel = viewer.display().panel().unwrap();
        assert_eq!(panel.mission, "Older");
        assert_eq!(panel.timestamp, Some("10:00:00"));
        assert_eq!(*endpoint.calls.borrow(), 2);
    }

    #[test]
    fn select_out_of_range_leaves_display() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(mission_blob("Only"))]);
        let mut viewer = Viewer::new(&endpoint, utc());
        viewer.fetch(Instant::now(), at("10:00:00"));

        assert!(!viewer.select(1));
        assert!(!viewer.select(10));
        assert_eq!(viewer.display().panel().unwrap().mission, "Only");
    }

    #[test]
    fn history_is_bounded_across_fetches() {
        let replies = (1..=12).map(|n| Ok(mission_blob(&format!("m{n}")))).collect();
        let endpoint = ScriptedEndpoint::new(replies);
        let mut viewer = Viewer::new(&endpoint, utc());
        for n in 0..12 {
            viewer.fetch(Instant::now(), at(&format!("10:00:{n:02}")));
        }
        assert_eq!(viewer.history().len(), 10);
        assert_eq!(viewer.history().at(0).unwrap().mission, "m12");
        assert_eq!(viewer.history().at(9).unwrap().mission, "m3");
    }

    #[test]
    fn begin_fetch_shows_placeholder_and_refuses_overlap() {
        let endpoint = ScriptedEndpoint::new(vec![]);
        let mut viewer = Viewer::new(&endpoint, utc());

        assert!(viewer.begin_fetch());
        assert_eq!(viewer.display(), &DisplayState::Fetching);
        assert_eq!(
            viewer.display().panel(),
            Some(Panel::placeholder(FETCHING))
        );

        assert!(!viewer.begin_fetch());
        assert_eq!(viewer.fetch(Instant::now(), at("11:00:00")), FetchOutcome::Busy);
        assert_eq!(*endpoint.calls.borrow(), 0);
        assert_eq!(viewer.display(), &DisplayState::Fetching);
    }

    #[test]
    fn finish_fetch_clears_busy_on_failure_too() {
        let endpoint = ScriptedEndpoint::new(vec![Ok(mission_blob("After"))]);
        let mut viewer = Viewer::new(&endpoint, utc());
        let now = Instant::now();

        assert!(viewer.begin_fetch());
        let outcome = viewer.finish_fetch(Err(EndpointError::Timeout), now, at("11:00:00"));
        assert_eq!(outcome, FetchOutcome::Failed);
        assert_eq!(viewer.display(), &DisplayState::Failed);

        assert_eq!(viewer.fetch(now, at("11:00:05")), FetchOutcome::Extracted);
        assert_eq!(viewer.display().panel().unwrap().mission, "After");
    }

    #[test]
    fn select_keeps_live_banner() {
        let endpoint = ScriptedEndpoint::new(vec![
            Ok(mission_blob("Kept")),
            Err(EndpointError::Status(502)),
        ]);
        let mut viewer = Viewer::new(&endpoint, utc());
        let now = Instant::now();
        viewer.fetch(now, at("12:00:00"));
        viewer.fetch(now, at("12:00:01"));

        assert!(viewer.select(0));
        assert_eq!(viewer.display().panel().unwrap().mission, "Kept");
        assert_eq!(
            viewer.banner(now + Duration::from_secs(1)),
            Some(EndpointError::USER_MESSAGE)
        );
        assert!(viewer.banner(now + BANNER_TTL).is_none());
    }
}

//! View state for the form workflow.
//!
//! [`UiState`] owns everything the page would otherwise keep in shared
//! globals: which of the two views is showing, the rendered results, the
//! loading flag that blocks duplicate submissions, and the transient
//! notices.

use chrono::{DateTime, Duration, Utc};

use crate::error::{RescisaoError, RescisaoResult};
use crate::render::DisplayLine;

/// The two mutually exclusive views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// The input form.
    #[default]
    Editing,
    /// The rendered breakdown.
    Results,
}

/// Kind of a user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Something went wrong or needs fixing.
    Error,
    /// An attempt succeeded.
    Success,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Error or success.
    pub kind: NoticeKind,
    /// The message text.
    pub text: String,
    /// When the notice dismisses itself.
    pub expires_at: DateTime<Utc>,
}

impl Notice {
    /// Returns true while the notice should still be shown at `now`.
    pub fn is_visible(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Explicit UI state passed by reference to the pipeline.
#[derive(Debug, Clone)]
pub struct UiState {
    view: View,
    loading: bool,
    results: Vec<DisplayLine>,
    notices: Vec<Notice>,
    notice_lifetime: Duration,
}

impl UiState {
    /// Creates the initial state: editing view, nothing loading, no notices.
    pub fn new(notice_lifetime: Duration) -> Self {
        Self {
            view: View::Editing,
            loading: false,
            results: Vec::new(),
            notices: Vec::new(),
            notice_lifetime,
        }
    }

    /// The view currently showing.
    pub fn view(&self) -> View {
        self.view
    }

    /// Returns true while a request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether the submit action is available.
    pub fn is_submit_enabled(&self) -> bool {
        !self.loading && self.view == View::Editing
    }

    /// Enters the blocking loading state.
    ///
    /// Fails with `SubmissionInProgress` when a request is already
    /// outstanding.
    pub fn begin_loading(&mut self) -> RescisaoResult<()> {
        if self.loading {
            return Err(RescisaoError::SubmissionInProgress);
        }
        self.loading = true;
        Ok(())
    }

    /// Leaves the loading state.
    pub fn end_loading(&mut self) {
        self.loading = false;
    }

    /// Shows `lines` in the results view.
    pub fn show_results(&mut self, lines: Vec<DisplayLine>) {
        self.results = lines;
        self.view = View::Results;
    }

    /// Returns to the form, discarding the previous results.
    pub fn back_to_form(&mut self) {
        self.results.clear();
        self.view = View::Editing;
    }

    /// The lines currently rendered in the results view.
    pub fn results(&self) -> &[DisplayLine] {
        &self.results
    }

    /// Adds a notice that dismisses itself after the configured lifetime.
    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>, now: DateTime<Utc>) {
        self.notices.push(Notice {
            kind,
            text: text.into(),
            expires_at: now + self.notice_lifetime,
        });
    }

    /// Removes every notice.
    pub fn clear_notices(&mut self) {
        self.notices.clear();
    }

    /// Drops notices that have expired by `now`.
    pub fn prune_notices(&mut self, now: DateTime<Utc>) {
        self.notices.retain(|notice| notice.is_visible(now));
    }

    /// Notices still visible at `now`.
    pub fn active_notices(&self, now: DateTime<Utc>) -> Vec<&Notice> {
        self.notices.iter().filter(|n| n.is_visible(now)).collect()
    }

    /// All notices, including expired ones not yet pruned.
    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Duration::seconds(crate::config::DEFAULT_NOTICE_SECONDS as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LineCategory;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 4, 10, 0, 0).unwrap()
    }

    fn line() -> DisplayLine {
        DisplayLine {
            label: "Grand total".to_string(),
            value: "R$\u{a0}1,00".to_string(),
            category: LineCategory::Total,
        }
    }

    #[test]
    fn test_initial_state_is_editing() {
        let ui = UiState::default();
        assert_eq!(ui.view(), View::Editing);
        assert!(!ui.is_loading());
        assert!(ui.is_submit_enabled());
        assert!(ui.results().is_empty());
    }

    #[test]
    fn test_loading_guard_rejects_second_begin() {
        let mut ui = UiState::default();
        ui.begin_loading().unwrap();

        assert!(!ui.is_submit_enabled());
        assert_eq!(ui.begin_loading(), Err(RescisaoError::SubmissionInProgress));

        ui.end_loading();
        assert!(ui.is_submit_enabled());
        assert!(ui.begin_loading().is_ok());
    }

    #[test]
    fn test_show_results_and_back_to_form() {
        let mut ui = UiState::default();
        ui.show_results(vec![line()]);

        assert_eq!(ui.view(), View::Results);
        assert_eq!(ui.results(), &[line()]);
        assert!(!ui.is_submit_enabled());

        ui.back_to_form();
        assert_eq!(ui.view(), View::Editing);
        assert!(ui.results().is_empty());
    }

    #[test]
    fn test_notices_expire_after_lifetime() {
        let mut ui = UiState::new(Duration::seconds(5));
        ui.notify(NoticeKind::Error, "salary must be greater than zero", now());
        ui.notify(NoticeKind::Success, "later", now() + Duration::seconds(3));

        assert_eq!(ui.active_notices(now() + Duration::seconds(4)).len(), 2);

        let remaining = ui.active_notices(now() + Duration::seconds(5));
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text, "later");

        ui.prune_notices(now() + Duration::seconds(8));
        assert!(ui.notices().is_empty());
    }

    #[test]
    fn test_clear_notices() {
        let mut ui = UiState::default();
        ui.notify(NoticeKind::Error, "x", now());
        ui.clear_notices();
        assert!(ui.notices().is_empty());
    }
}

//! The submission pipeline.
//!
//! One call to [`RequestPipeline::submit`] walks a submission through
//! collecting, validating, the cache check, the network request, storing and
//! rendering, leaving its effects on the [`UiState`] it is given.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use rescisao_client::clock::SystemClock;
//! use rescisao_client::config::ClientConfig;
//! use rescisao_client::form::{ExtraCompensationList, FormInput};
//! use rescisao_client::pipeline::RequestPipeline;
//! use rescisao_client::ui::UiState;
//!
//! # async fn run() -> rescisao_client::error::RescisaoResult<()> {
//! let config = ClientConfig::default();
//! let mut pipeline = RequestPipeline::from_config(&config, Arc::new(SystemClock))?;
//! let mut ui = UiState::new(config.notice_lifetime());
//!
//! let form = FormInput {
//!     salary: "3000".to_string(),
//!     admission_date: "2023-01-10".to_string(),
//!     termination_date: "2024-01-10".to_string(),
//!     termination_reason: "demissao-sem-justa-causa".to_string(),
//!     notice_type: "indenizado".to_string(),
//!     disability_checkbox: None,
//! };
//! let outcome = pipeline.submit(&mut ui, &form, &ExtraCompensationList::new()).await;
//! println!("{:?}", outcome);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::cache::ResultCache;
use crate::clock::Clock;
use crate::config::ClientConfig;
use crate::error::{RescisaoError, RescisaoResult};
use crate::form::{ExtraCompensationList, FormInput};
use crate::models::{FormSnapshot, ResultRecord};
use crate::render::{render, DisplayLine};
use crate::service::{CalculationService, HttpCalculationService};
use crate::store::{FileStore, KeyValueStore};
use crate::ui::{NoticeKind, UiState};
use crate::validation::ensure_valid;

/// Notice shown when results come from the cache.
pub const CACHE_HIT_NOTICE: &str = "Results loaded from cache";

/// Notice shown when a network calculation succeeds.
pub const SUCCESS_NOTICE: &str = "Calculation completed successfully!";

/// Where a submission currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineStage {
    /// No submission in progress.
    #[default]
    Idle,
    /// Merging the form fields into a snapshot.
    Collecting,
    /// Running the validation rules.
    Validating,
    /// Looking the snapshot up in the cache.
    CacheCheck,
    /// Waiting on the calculation service.
    Requesting,
    /// Writing the fresh result to the cache.
    Storing,
    /// Turning the result into display lines.
    Rendering,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Collecting => "collecting",
            Self::Validating => "validating",
            Self::CacheCheck => "cache_check",
            Self::Requesting => "requesting",
            Self::Storing => "storing",
            Self::Rendering => "rendering",
        };
        f.write_str(name)
    }
}

/// Where a rendered result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultSource {
    /// A fresh cache entry.
    Cache,
    /// The calculation service.
    Network,
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Results were rendered and the view switched to results.
    Rendered {
        /// Cache or network.
        source: ResultSource,
        /// The rendered lines, also held by the UI state.
        lines: Vec<DisplayLine>,
    },
    /// The form did not pass validation; nothing was sent.
    Invalid {
        /// Every violation, in rule order.
        errors: Vec<String>,
    },
    /// The calculation request failed.
    Failed {
        /// The failure as surfaced to the user.
        error: RescisaoError,
    },
    /// Another submission was still outstanding.
    Rejected,
}

impl SubmissionOutcome {
    /// Returns true when results were rendered.
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// Drives submissions from raw form state to rendered results.
pub struct RequestPipeline<S, K> {
    service: S,
    cache: ResultCache<K>,
    clock: Arc<dyn Clock>,
    stage: PipelineStage,
}

impl RequestPipeline<HttpCalculationService, FileStore> {
    /// Builds the production pipeline: HTTP service and file-backed cache,
    /// both as configured.
    pub fn from_config(config: &ClientConfig, clock: Arc<dyn Clock>) -> RescisaoResult<Self> {
        let service = HttpCalculationService::from_config(config)?;
        let store = FileStore::open(&config.cache.store_path)?;
        let cache = ResultCache::new(
            store,
            Arc::clone(&clock),
            config.cache_ttl(),
            config.cache.key_prefix.clone(),
        );
        Ok(Self::new(service, cache, clock))
    }
}

impl<S: CalculationService, K: KeyValueStore> RequestPipeline<S, K> {
    /// Creates a pipeline from its parts.
    pub fn new(service: S, cache: ResultCache<K>, clock: Arc<dyn Clock>) -> Self {
        Self {
            service,
            cache,
            clock,
            stage: PipelineStage::Idle,
        }
    }

    /// The current stage; `Idle` between submissions.
    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// The result cache.
    pub fn cache(&self) -> &ResultCache<K> {
        &self.cache
    }

    /// The calculation service.
    pub fn service(&self) -> &S {
        &self.service
    }

    /// Runs one submission of `form` plus `extras`.
    ///
    /// Every outcome is also reflected on `ui`: error notices for invalid
    /// input and failed requests, the results view and a success notice for
    /// rendered results. Refuses to start while another submission is
    /// outstanding.
    pub async fn submit(
        &mut self,
        ui: &mut UiState,
        form: &FormInput,
        extras: &ExtraCompensationList,
    ) -> SubmissionOutcome {
        if self.stage != PipelineStage::Idle || ui.is_loading() {
            warn!(stage = %self.stage, "Submission rejected, another one is in progress");
            return SubmissionOutcome::Rejected;
        }

        let correlation_id = Uuid::new_v4();
        info!(correlation_id = %correlation_id, "Processing submission");
        ui.clear_notices();

        let outcome = self.run(correlation_id, ui, form, extras).await;
        self.enter(correlation_id, PipelineStage::Idle);

        match &outcome {
            SubmissionOutcome::Rendered { source, .. } => {
                info!(correlation_id = %correlation_id, source = ?source, "Submission rendered");
            }
            SubmissionOutcome::Invalid { errors } => {
                info!(
                    correlation_id = %correlation_id,
                    error_count = errors.len(),
                    "Submission failed validation"
                );
            }
            SubmissionOutcome::Failed { error } => {
                warn!(correlation_id = %correlation_id, error = %error, "Submission failed");
            }
            SubmissionOutcome::Rejected => {}
        }
        outcome
    }

    async fn run(
        &mut self,
        correlation_id: Uuid,
        ui: &mut UiState,
        form: &FormInput,
        extras: &ExtraCompensationList,
    ) -> SubmissionOutcome {
        self.enter(correlation_id, PipelineStage::Collecting);
        let snapshot = match form.collect(extras) {
            Ok(snapshot) => snapshot,
            Err(err) => return self.invalid(ui, vec![err.user_message()]),
        };

        self.enter(correlation_id, PipelineStage::Validating);
        if let Err(err) = ensure_valid(&snapshot, self.clock.today()) {
            let errors = match err {
                RescisaoError::Validation { errors } => errors,
                other => vec![other.user_message()],
            };
            return self.invalid(ui, errors);
        }

        self.enter(correlation_id, PipelineStage::CacheCheck);
        let fingerprint = match self.cache.build_fingerprint(&snapshot) {
            Ok(fingerprint) => Some(fingerprint),
            Err(err) => {
                warn!(correlation_id = %correlation_id, error = %err, "Cannot fingerprint snapshot, skipping cache");
                None
            }
        };
        if let Some(result) = fingerprint
            .as_deref()
            .and_then(|fp| self.cache.lookup(fp, &snapshot))
        {
            debug!(correlation_id = %correlation_id, "Cache hit");
            self.enter(correlation_id, PipelineStage::Rendering);
            let lines = render(&result);
            ui.show_results(lines.clone());
            ui.notify(NoticeKind::Success, CACHE_HIT_NOTICE, self.clock.now());
            return SubmissionOutcome::Rendered {
                source: ResultSource::Cache,
                lines,
            };
        }

        self.enter(correlation_id, PipelineStage::Requesting);
        let result = match self.request(ui, &snapshot).await {
            Ok(result) => result,
            Err(error) => {
                ui.notify(NoticeKind::Error, error.user_message(), self.clock.now());
                ui.back_to_form();
                return SubmissionOutcome::Failed { error };
            }
        };

        if let Some(fp) = fingerprint.as_deref() {
            self.enter(correlation_id, PipelineStage::Storing);
            if let Err(err) = self.cache.store_result(fp, &snapshot, &result) {
                warn!(correlation_id = %correlation_id, error = %err, "Failed to cache result");
            }
        }

        self.enter(correlation_id, PipelineStage::Rendering);
        let lines = render(&result);
        ui.show_results(lines.clone());
        ui.notify(NoticeKind::Success, SUCCESS_NOTICE, self.clock.now());
        SubmissionOutcome::Rendered {
            source: ResultSource::Network,
            lines,
        }
    }

    async fn request(
        &self,
        ui: &mut UiState,
        snapshot: &FormSnapshot,
    ) -> RescisaoResult<ResultRecord> {
        ui.begin_loading()?;
        let result = self.service.calculate(snapshot).await;
        ui.end_loading();
        result
    }

    fn invalid(&self, ui: &mut UiState, errors: Vec<String>) -> SubmissionOutcome {
        let now = self.clock.now();
        for error in &errors {
            ui.notify(NoticeKind::Error, error.clone(), now);
        }
        SubmissionOutcome::Invalid { errors }
    }

    fn enter(&mut self, correlation_id: Uuid, stage: PipelineStage) {
        debug!(correlation_id = %correlation_id, from = %self.stage, to = %stage, "Stage transition");
        self.stage = stage;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::form::ExtraCompensationField;
    use crate::render::LineCategory;
    use crate::store::MemoryStore;
    use crate::ui::View;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Answers every call with the configured result and counts calls.
    struct StubService {
        calls: AtomicUsize,
        answer: Mutex<RescisaoResult<ResultRecord>>,
    }

    impl StubService {
        fn answering(answer: RescisaoResult<ResultRecord>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                answer: Mutex::new(answer),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn set_answer(&self, answer: RescisaoResult<ResultRecord>) {
            *self.answer.lock().unwrap() = answer;
        }
    }

    #[async_trait]
    impl CalculationService for StubService {
        async fn calculate(&self, _snapshot: &FormSnapshot) -> RescisaoResult<ResultRecord> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answer.lock().unwrap().clone()
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    fn record() -> ResultRecord {
        ResultRecord {
            balance_of_salary: Decimal::new(1000, 0),
            proportional_vacation: Decimal::new(266667, 2),
            overdue_vacation: None,
            thirteenth_salary: Decimal::new(2500, 0),
            notice_pay: Decimal::new(3000, 0),
            fgts_fine: Decimal::ZERO,
            disability_indemnity: None,
            average_extra_compensation: Decimal::ZERO,
            total_deductions: None,
            grand_total: Decimal::new(916667, 2),
            details: None,
        }
    }

    fn form() -> FormInput {
        FormInput {
            salary: "3000".to_string(),
            admission_date: "2023-01-10".to_string(),
            termination_date: "2024-01-10".to_string(),
            termination_reason: "demissao-sem-justa-causa".to_string(),
            notice_type: "indenizado".to_string(),
            disability_checkbox: None,
        }
    }

    fn pipeline(
        answer: RescisaoResult<ResultRecord>,
    ) -> (RequestPipeline<StubService, MemoryStore>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(start()));
        let cache = ResultCache::new(
            MemoryStore::new(),
            clock.clone(),
            Duration::hours(1),
            "calculadora_rescisao_cache",
        );
        let pipeline = RequestPipeline::new(StubService::answering(answer), cache, clock.clone());
        (pipeline, clock)
    }

    fn notice_texts(ui: &UiState) -> Vec<String> {
        ui.notices().iter().map(|n| n.text.clone()).collect()
    }

    #[tokio::test]
    async fn test_network_success_renders_and_caches() {
        let (mut pipeline, _clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();

        let outcome = pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;

        match outcome {
            SubmissionOutcome::Rendered { source, lines } => {
                assert_eq!(source, ResultSource::Network);
                assert_eq!(lines.last().unwrap().category, LineCategory::Total);
            }
            other => panic!("Expected Rendered, got {:?}", other),
        }
        assert_eq!(pipeline.service().calls(), 1);
        assert_eq!(pipeline.cache().store().len(), 1);
        assert_eq!(ui.view(), View::Results);
        assert!(!ui.is_loading());
        assert_eq!(notice_texts(&ui), vec![SUCCESS_NOTICE]);
        assert_eq!(pipeline.stage(), PipelineStage::Idle);
    }

    #[tokio::test]
    async fn test_identical_resubmission_is_served_from_cache() {
        let (mut pipeline, clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();

        pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;
        ui.back_to_form();
        clock.advance(Duration::minutes(30));
        let outcome = pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;

        assert!(matches!(
            outcome,
            SubmissionOutcome::Rendered { source: ResultSource::Cache, .. }
        ));
        assert_eq!(pipeline.service().calls(), 1);
        assert_eq!(notice_texts(&ui), vec![CACHE_HIT_NOTICE]);
    }

    #[tokio::test]
    async fn test_expired_entry_goes_back_to_network() {
        let (mut pipeline, clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();

        pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;
        clock.advance(Duration::hours(1) + Duration::seconds(1));
        let outcome = pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;

        assert!(matches!(
            outcome,
            SubmissionOutcome::Rendered { source: ResultSource::Network, .. }
        ));
        assert_eq!(pipeline.service().calls(), 2);
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let (mut pipeline, _clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();
        let mut input = form();
        input.admission_date = "2024-06-01".to_string();
        input.termination_date = "2024-01-01".to_string();

        let outcome = pipeline.submit(&mut ui, &input, &ExtraCompensationList::new()).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Invalid {
                errors: vec![crate::validation::ADMISSION_AFTER_TERMINATION.to_string()]
            }
        );
        assert_eq!(pipeline.service().calls(), 0);
        assert!(pipeline.cache().store().is_empty());
        assert_eq!(ui.view(), View::Editing);
        assert_eq!(ui.notices()[0].kind, NoticeKind::Error);
    }

    #[tokio::test]
    async fn test_future_termination_uses_clock_today() {
        let (mut pipeline, _clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();
        let mut input = form();
        input.termination_date = "2024-07-02".to_string();

        let outcome = pipeline.submit(&mut ui, &input, &ExtraCompensationList::new()).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Invalid {
                errors: vec![crate::validation::TERMINATION_IN_FUTURE.to_string()]
            }
        );
    }

    #[tokio::test]
    async fn test_duplicate_months_are_rejected() {
        let (mut pipeline, _clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();
        let mut extras = ExtraCompensationList::new();
        extras.push(ExtraCompensationField::new("5", "10", "500"));
        extras.push(ExtraCompensationField::new("5", "2", "80"));

        let outcome = pipeline.submit(&mut ui, &form(), &extras).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Invalid {
                errors: vec![crate::validation::DUPLICATE_EXTRA_MONTH.to_string()]
            }
        );
        assert_eq!(pipeline.service().calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_date_is_surfaced_as_invalid() {
        let (mut pipeline, _clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();
        let mut input = form();
        input.admission_date = String::new();

        let outcome = pipeline.submit(&mut ui, &input, &ExtraCompensationList::new()).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Invalid {
                errors: vec!["admission date must be a date in YYYY-MM-DD format".to_string()]
            }
        );
        assert_eq!(pipeline.service().calls(), 0);
    }

    #[tokio::test]
    async fn test_server_failure_is_shown_verbatim_and_not_cached() {
        let message = "Data de demissão inválida";
        let (mut pipeline, _clock) = pipeline(Err(RescisaoError::ServerReported {
            message: message.to_string(),
        }));
        let mut ui = UiState::default();

        let outcome = pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;

        assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
        assert!(pipeline.cache().store().is_empty());
        assert_eq!(notice_texts(&ui), vec![message]);
        assert_eq!(ui.view(), View::Editing);
        assert!(!ui.is_loading());
    }

    #[tokio::test]
    async fn test_failure_leaves_existing_entry_untouched() {
        let (mut pipeline, _clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();
        pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;
        let before = pipeline.cache().store().keys();

        pipeline
            .service()
            .set_answer(Err(RescisaoError::communication(Some(500))));
        let mut other = form();
        other.salary = "4000".to_string();
        let outcome = pipeline.submit(&mut ui, &other, &ExtraCompensationList::new()).await;

        assert!(matches!(outcome, SubmissionOutcome::Failed { .. }));
        assert_eq!(pipeline.cache().store().keys(), before);
        assert_eq!(
            notice_texts(&ui),
            vec![crate::error::GENERIC_COMMUNICATION_MESSAGE]
        );
    }

    #[tokio::test]
    async fn test_submission_while_loading_is_rejected() {
        let (mut pipeline, _clock) = pipeline(Ok(record()));
        let mut ui = UiState::default();
        ui.begin_loading().unwrap();

        let outcome = pipeline.submit(&mut ui, &form(), &ExtraCompensationList::new()).await;

        assert_eq!(outcome, SubmissionOutcome::Rejected);
        assert_eq!(pipeline.service().calls(), 0);
        assert!(ui.is_loading());
    }

    #[test]
    fn test_stage_display_names() {
        assert_eq!(PipelineStage::CacheCheck.to_string(), "cache_check");
        assert_eq!(PipelineStage::default(), PipelineStage::Idle);
    }
}

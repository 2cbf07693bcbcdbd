//! Submission session: the core side of the tracking form.
//!
//! Holds the single "current result" slot and enforces one request in flight.
//! Upstream and parse failures collapse into one localized failure message;
//! the specific error is only logged.

use std::sync::{Mutex, MutexGuard};

use tracing::{info, warn};

use crate::error::{TrackError, TrackResult};
use crate::i18n::{message, Language, Message};
use crate::predict::PredictionClient;
use crate::types::{GeoPoint, OrderForm, TrackingData};
use crate::validate::{validate, FieldErrors};

/// What the presentation layer should show.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Nothing tracked yet (or reset).
    Idle,
    /// A request is in flight; resubmission is disabled.
    Loading,
    /// The last request failed. `message` is the generic, localized banner.
    Failed { message: String },
    /// The current result.
    Ready(Box<TrackingData>),
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The slot now holds this record.
    Tracked(Box<TrackingData>),
    /// The request failed; the session is in [`SessionState::Failed`].
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq)]
enum Phase {
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug)]
struct Inner {
    phase: Phase,
    current: Option<TrackingData>,
}

pub struct TrackingSession {
    client: PredictionClient,
    lang: Language,
    inner: Mutex<Inner>,
}

/// Puts the session back to idle if a submission future is dropped mid-flight.
struct InFlight<'a> {
    session: &'a TrackingSession,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            let mut inner = self.session.lock();
            if inner.phase == Phase::Loading {
                inner.phase = Phase::Idle;
            }
        }
    }
}

impl TrackingSession {
    pub fn new(client: PredictionClient, lang: Language) -> Self {
        Self {
            client,
            lang,
            inner: Mutex::new(Inner {
                phase: Phase::Idle,
                current: None,
            }),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn state(&self) -> SessionState {
        let inner = self.lock();
        match (&inner.phase, &inner.current) {
            (Phase::Loading, _) => SessionState::Loading,
            (Phase::Failed(message), _) => SessionState::Failed {
                message: message.clone(),
            },
            (Phase::Idle, Some(data)) => SessionState::Ready(Box::new(data.clone())),
            (Phase::Idle, None) => SessionState::Idle,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock().phase == Phase::Loading
    }

    pub fn current(&self) -> Option<TrackingData> {
        self.lock().current.clone()
    }

    /// Validate and, if valid, run one prediction.
    ///
    /// Returns `Err(TrackError::Busy)` while another submission is in flight.
    /// Upstream and parse failures become [`SubmitOutcome::Failed`]; any other
    /// error (a config problem, say) is returned as is and leaves the session idle.
    pub async fn submit(
        &self,
        form: &OrderForm,
        hint: Option<GeoPoint>,
    ) -> TrackResult<SubmitOutcome> {
        if self.is_loading() {
            return Err(TrackError::Busy);
        }

        let input = match validate(form, self.lang) {
            Ok(input) => input,
            Err(errors) => {
                info!(fields = errors.len(), "submission blocked by validation");
                return Ok(SubmitOutcome::Invalid(errors));
            }
        };

        let mut guard = {
            let mut inner = self.lock();
            if inner.phase == Phase::Loading {
                return Err(TrackError::Busy);
            }
            inner.phase = Phase::Loading;
            InFlight {
                session: self,
                armed: true,
            }
        };

        info!(
            order_id = input.user_order_id(),
            mode = input.transport_mode().as_str(),
            "submitting tracking request"
        );
        let result = self.client.predict(&input, hint, self.lang).await;
        guard.armed = false;

        let mut inner = self.lock();
        match result {
            Ok(data) => {
                inner.phase = Phase::Idle;
                inner.current = Some(data.clone());
                Ok(SubmitOutcome::Tracked(Box::new(data)))
            }
            Err(e) if !e.is_tracking_failure() => {
                inner.phase = Phase::Idle;
                Err(e)
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "tracking failed");
                let banner = message(Message::TrackingFailed, self.lang).to_string();
                inner.phase = Phase::Failed(banner.clone());
                Ok(SubmitOutcome::Failed { message: banner })
            }
        }
    }

    /// "Try again": clear the failure so the form can be resubmitted.
    pub fn dismiss_error(&self) {
        let mut inner = self.lock();
        if matches!(inner.phase, Phase::Failed(_)) {
            inner.phase = Phase::Idle;
        }
    }

    /// Drop the current result.
    pub fn reset(&self) {
        self.lock().current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PredictorConfig;
    use crate::providers::fake::FakeModel;
    use crate::schema::tests::sample_value;
    use std::sync::Arc;
    use std::time::Duration;

    fn form() -> OrderForm {
        OrderForm {
            transport_mode: "rail".to_string(),
            phone_number: "9876543210".to_string(),
            user_order_id: "IP123456789IN".to_string(),
            origin_state: "Delhi".to_string(),
            origin_city: "New Delhi".to_string(),
            origin_pincode: "110001".to_string(),
            dest_state: "Telangana".to_string(),
            dest_city: "Hyderabad".to_string(),
            dest_pincode: "500001".to_string(),
            tracking_id: None,
        }
    }

    fn session(model: Arc<FakeModel>, lang: Language) -> TrackingSession {
        TrackingSession::new(PredictionClient::new(model, PredictorConfig::default()), lang)
    }

    #[tokio::test]
    async fn invalid_form_never_calls_the_model() {
        let model = Arc::new(FakeModel::new().with_response(sample_value().to_string()));
        let s = session(model.clone(), Language::En);

        let mut bad = form();
        bad.origin_pincode = "012345".to_string();
        let outcome = s.submit(&bad, None).await.unwrap();

        assert!(matches!(outcome, SubmitOutcome::Invalid(_)));
        assert_eq!(model.calls(), 0);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn success_fills_the_slot() {
        let model = Arc::new(FakeModel::new().with_response(sample_value().to_string()));
        let s = session(model, Language::En);

        let outcome = s.submit(&form(), None).await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Tracked(_)));
        assert!(matches!(s.state(), SessionState::Ready(_)));

        s.reset();
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn failures_become_one_generic_banner() {
        let upstream = Arc::new(FakeModel::new().failing("HTTP 500"));
        let unparsable = Arc::new(FakeModel::new().with_response("no json here"));

        let mut banners = Vec::new();
        for model in [upstream, unparsable] {
            let s = session(model, Language::Hi);
            match s.submit(&form(), None).await.unwrap() {
                SubmitOutcome::Failed { message } => banners.push(message),
                other => panic!("expected failure, got {other:?}"),
            }
            assert!(matches!(s.state(), SessionState::Failed { .. }));
            s.dismiss_error();
            assert_eq!(s.state(), SessionState::Idle);
        }
        assert_eq!(banners[0], banners[1]);
        assert_eq!(banners[0], message(Message::TrackingFailed, Language::Hi));
    }

    struct MisconfiguredModel;

    #[async_trait::async_trait]
    impl crate::providers::GenerativeModel for MisconfiguredModel {
        async fn generate(
            &self,
            _request: &crate::providers::GenerateRequest,
        ) -> TrackResult<crate::providers::GenerateResponse> {
            Err(TrackError::config("schema failed to compile"))
        }

        fn provider_name(&self) -> &'static str {
            "misconfigured"
        }
    }

    #[tokio::test]
    async fn non_tracking_errors_are_returned_not_bannered() {
        let s = TrackingSession::new(
            PredictionClient::new(Arc::new(MisconfiguredModel), PredictorConfig::default()),
            Language::En,
        );
        let err = s.submit(&form(), None).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(s.state(), SessionState::Idle);
    }

    #[tokio::test]
    async fn dismissing_a_failure_shows_the_previous_result() {
        let good = Arc::new(FakeModel::new().with_response(sample_value().to_string()));
        let s = session(good, Language::En);
        s.submit(&form(), None).await.unwrap();
        let first = s.current().unwrap();

        s.lock().phase = Phase::Failed("x".to_string());
        assert!(matches!(s.state(), SessionState::Failed { .. }));
        s.dismiss_error();
        assert_eq!(s.state(), SessionState::Ready(Box::new(first)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_submission_is_rejected_while_loading() {
        let model = Arc::new(
            FakeModel::new()
                .with_response(sample_value().to_string())
                .with_delay(Duration::from_millis(200)),
        );
        let s = Arc::new(session(model.clone(), Language::En));

        let first = {
            let s = s.clone();
            tokio::spawn(async move { s.submit(&form(), None).await })
        };

        while !s.is_loading() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let second = s.submit(&form(), None).await;
        assert!(matches!(second, Err(TrackError::Busy)));

        let first = first.await.unwrap().unwrap();
        assert!(matches!(first, SubmitOutcome::Tracked(_)));
        assert_eq!(model.calls(), 1);

        // Resubmission is allowed again once the first request settled.
        s.submit(&form(), None).await.unwrap();
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn dropped_submission_releases_the_lock() {
        let model = Arc::new(
            FakeModel::new()
                .with_response(sample_value().to_string())
                .with_delay(Duration::from_secs(30)),
        );
        let s = session(model, Language::En);

        let form = form();
        let fut = s.submit(&form, None);
        let timed_out = tokio::time::timeout(Duration::from_millis(50), fut).await;
        assert!(timed_out.is_err());
        assert!(!s.is_loading());
    }
}

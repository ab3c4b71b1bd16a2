// src/controller.rs
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::Instrument;
use uuid::Uuid;

use crate::analysis::{AnalysisRequest, AnalysisResponse, DateRange, PickedFile};
use crate::render::{render_dashboard, RenderOptions, RenderState, RenderTargets};
use crate::state::{failure_alert, AppState, Origin, Phase};
use crate::transport::{AnalysisTransport, LoadingGuard, LoadingIndicator, TransportError};

/// A finished request on its way back to the UI thread. The loading guard rides
/// along so the spinner is only released once the outcome has been handled.
struct Completion {
    request_id: Uuid,
    origin: Origin,
    outcome: Result<AnalysisResponse, TransportError>,
    loading: LoadingGuard,
}

/// Owns the request cycle: dispatches requests onto the runtime, then applies
/// their outcomes to the app state and render targets.
pub struct Controller {
    transport: Arc<dyn AnalysisTransport>,
    runtime: Handle,
    completions_tx: UnboundedSender<Completion>,
    completions_rx: UnboundedReceiver<Completion>,
    loading: LoadingIndicator,
    render_state: RenderState,
    options: RenderOptions,
    pub state: AppState,
}

impl Controller {
    pub fn new(transport: Arc<dyn AnalysisTransport>, runtime: Handle, options: RenderOptions) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            runtime,
            completions_tx,
            completions_rx,
            loading: LoadingIndicator::new(),
            render_state: RenderState::new(),
            options,
            state: AppState::new(),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The spinner follows the phase, not the raw guard count.
    pub fn is_loading(&self) -> bool {
        self.phase() == Phase::Loading
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Expects a file that already passed extension validation.
    pub fn upload(&mut self, file: PickedFile) {
        let origin = Origin::Upload { file_name: file.name.clone() };
        self.state.status = origin.pending_status();
        self.state.dashboard_visible = true;
        self.dispatch(AnalysisRequest::upload(file), origin);
    }

    pub fn apply_filters(&mut self, range: DateRange) {
        if !self.options.variant.has_filters() {
            tracing::warn!("filters requested but the base dashboard has none");
            return;
        }
        self.state.status = Origin::Filters.pending_status();
        self.dispatch(AnalysisRequest::filters(&range), Origin::Filters);
    }

    fn dispatch(&mut self, request: AnalysisRequest, origin: Origin) {
        let request_id = Uuid::new_v4();
        let loading = self.loading.begin();
        self.set_phase(Phase::Loading);

        tracing::info!(
            %request_id,
            in_flight = self.loading.in_flight(),
            file = request.file_name().unwrap_or("-"),
            start_date = request.start_date.as_deref().unwrap_or("-"),
            end_date = request.end_date.as_deref().unwrap_or("-"),
            "dispatching analysis request"
        );

        let transport = Arc::clone(&self.transport);
        let completions = self.completions_tx.clone();
        let span = tracing::info_span!("analyze", %request_id);

        self.runtime.spawn(
            async move {
                let outcome = transport.analyze(request).await;
                let completion = Completion { request_id, origin, outcome, loading };
                if completions.send(completion).is_err() {
                    tracing::warn!("dashboard closed before the analysis completed");
                }
            }
            .instrument(span),
        );
    }

    /// Applies every outcome that has arrived since the last call. Returns how
    /// many were handled.
    pub fn poll(&mut self, targets: &mut dyn RenderTargets) -> usize {
        let mut handled = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            self.complete(completion, targets);
            handled += 1;
        }

        // A task that died before reporting back has already released its guard.
        if self.state.phase == Phase::Loading && !self.loading.is_visible() {
            tracing::warn!("analysis request ended without reporting an outcome");
            self.set_phase(Phase::Idle);
        }
        handled
    }

    fn complete(&mut self, completion: Completion, targets: &mut dyn RenderTargets) {
        let Completion { request_id, origin, outcome, loading } = completion;

        let result = match outcome {
            Ok(response) => {
                render_dashboard(&mut self.render_state, targets, &response, &self.options)
                    .map_err(|e| e.to_string())
            }
            Err(e) => Err(e.to_string()),
        };

        match result {
            Ok(()) => {
                tracing::info!(%request_id, "analysis rendered");
                self.set_phase(Phase::ShowingResult);
                self.state.status = origin.success_status();
            }
            Err(message) => {
                tracing::error!(%request_id, error = %message, "analysis request failed");
                self.set_phase(Phase::ShowingError);
                self.state.status = origin.failure_status();
                self.state.raise_alert(failure_alert(&message));
            }
        }

        drop(loading);
        if self.loading.is_visible() {
            self.set_phase(Phase::Loading);
        } else {
            self.set_phase(Phase::Idle);
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.state.phase != phase {
            tracing::debug!(from = ?self.state.phase, to = ?phase, "phase change");
            self.state.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::render::{Canvas, Kpi};
    use crate::test_utils::{sample_response, wait_for_completion, RecordingTargets, ScriptedTransport};
    use std::time::{Duration, Instant};
    use tokio::runtime::Runtime;
    use tokio::sync::Notify;

    fn controller(transport: Arc<ScriptedTransport>, runtime: &Runtime, variant: Variant) -> Controller {
        Controller::new(
            transport,
            runtime.handle().clone(),
            RenderOptions {
                currency_symbol: "₹".to_string(),
                variant,
            },
        )
    }

    fn csv(name: &str) -> PickedFile {
        PickedFile::new(name, b"customer_id,amount,timestamp\n".to_vec())
    }

    #[test]
    fn test_spinner_spans_the_request() {
        let runtime = Runtime::new().unwrap();
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(ScriptedTransport::ok(sample_response()).gated(Arc::clone(&gate)));
        let mut controller = controller(Arc::clone(&transport), &runtime, Variant::Base);
        let mut targets = RecordingTargets::default();

        controller.upload(csv("jan.csv"));
        assert!(controller.is_loading());
        assert_eq!(controller.phase(), Phase::Loading);
        assert!(controller.state.dashboard_visible);
        assert_eq!(controller.state.status, "Processing file: jan.csv...");
        assert_eq!(controller.poll(&mut targets), 0);

        gate.notify_one();
        wait_for_completion(&mut controller, &mut targets);

        assert!(!controller.is_loading());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.state.status, "Showing analysis for: jan.csv");
        assert!(controller.state.alert.is_none());
        assert_eq!(targets.kpi(Kpi::TotalRevenue), Some("₹1520.75"));
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_server_failure_alerts_and_hides_spinner() {
        let runtime = Runtime::new().unwrap();
        let transport = Arc::new(ScriptedTransport::server_error(400, "bad file"));
        let mut controller = controller(transport, &runtime, Variant::Base);
        let mut targets = RecordingTargets::default();

        controller.upload(csv("broken.csv"));
        wait_for_completion(&mut controller, &mut targets);

        assert!(!controller.is_loading());
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.state.status, "Failed to process: broken.csv");
        assert!(controller.state.alert.as_deref().unwrap().contains("bad file"));
        assert!(targets.rows.is_empty());
    }

    #[test]
    fn test_decode_failure_alerts() {
        let runtime = Runtime::new().unwrap();
        let transport = Arc::new(ScriptedTransport::decode_error());
        let mut controller = controller(transport, &runtime, Variant::Base);
        let mut targets = RecordingTargets::default();

        controller.upload(csv("jan.csv"));
        wait_for_completion(&mut controller, &mut targets);

        assert!(!controller.is_loading());
        assert!(controller.state.alert.as_deref().unwrap().contains("invalid response body"));
    }

    #[test]
    fn test_filters_keep_dashboard_hidden() {
        let runtime = Runtime::new().unwrap();
        let transport = Arc::new(ScriptedTransport::ok(sample_response()));
        let mut controller = controller(Arc::clone(&transport), &runtime, Variant::Filtered);
        let mut targets = RecordingTargets::default();

        controller.apply_filters(DateRange::new("2024-01-01", "2024-01-31"));
        assert!(!controller.state.dashboard_visible);
        assert_eq!(controller.state.status, "Applying filters...");
        wait_for_completion(&mut controller, &mut targets);

        assert_eq!(controller.state.status, "Showing filtered analysis");
        let requests = transport.requests();
        assert!(requests[0].file.is_none());
        assert_eq!(requests[0].start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(requests[0].end_date.as_deref(), Some("2024-01-31"));
    }

    #[test]
    fn test_filter_failure_alerts_too() {
        let runtime = Runtime::new().unwrap();
        let transport = Arc::new(ScriptedTransport::server_error(400, "No file uploaded yet"));
        let mut controller = controller(transport, &runtime, Variant::Filtered);
        let mut targets = RecordingTargets::default();

        controller.apply_filters(DateRange::new("2024-01-01", ""));
        wait_for_completion(&mut controller, &mut targets);

        assert_eq!(controller.state.status, "Failed to apply filters");
        assert!(controller.state.alert.as_deref().unwrap().contains("No file uploaded yet"));
    }

    #[test]
    fn test_base_variant_ignores_filters() {
        let runtime = Runtime::new().unwrap();
        let transport = Arc::new(ScriptedTransport::ok(sample_response()));
        let mut controller = controller(Arc::clone(&transport), &runtime, Variant::Base);

        controller.apply_filters(DateRange::new("2024-01-01", "2024-01-31"));

        assert!(!controller.is_loading());
        assert_eq!(transport.calls(), 0);
    }

    #[test]
    fn test_consecutive_uploads_reuse_canvases() {
        let runtime = Runtime::new().unwrap();
        let transport = Arc::new(ScriptedTransport::ok(sample_response()));
        let mut controller = controller(transport, &runtime, Variant::Base);
        let mut targets = RecordingTargets::default();

        controller.upload(csv("jan.csv"));
        wait_for_completion(&mut controller, &mut targets);
        controller.upload(csv("feb.csv"));
        wait_for_completion(&mut controller, &mut targets);

        assert!(controller.state.alert.is_none());
        assert_eq!(targets.live_charts(), 2);
        assert!(targets.chart_spec(Canvas::Trends).is_some());
        assert_eq!(controller.state.status, "Showing analysis for: feb.csv");
    }

    #[test]
    fn test_overlapping_requests_keep_spinner_until_last() {
        let runtime = Runtime::new().unwrap();
        let gate = Arc::new(Notify::new());
        let transport = Arc::new(ScriptedTransport::ok(sample_response()).gated(Arc::clone(&gate)));
        let mut controller = controller(transport, &runtime, Variant::Base);
        let mut targets = RecordingTargets::default();

        controller.upload(csv("jan.csv"));
        controller.upload(csv("feb.csv"));

        gate.notify_one();
        wait_for_completion(&mut controller, &mut targets);
        assert!(controller.is_loading());
        assert_eq!(controller.phase(), Phase::Loading);

        gate.notify_one();
        wait_for_completion(&mut controller, &mut targets);
        assert!(!controller.is_loading());
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_lost_completion_returns_to_idle() {
        let runtime = Runtime::new().unwrap();
        let transport = Arc::new(ScriptedTransport::panicking());
        let mut controller = controller(transport, &runtime, Variant::Base);
        let mut targets = RecordingTargets::default();

        controller.upload(csv("jan.csv"));
        assert!(controller.is_loading());

        let deadline = Instant::now() + Duration::from_secs(5);
        while controller.is_loading() {
            assert!(Instant::now() < deadline, "spinner never cleared");
            assert_eq!(controller.poll(&mut targets), 0);
            std::thread::sleep(Duration::from_millis(5));
        }

        assert_eq!(controller.phase(), Phase::Idle);
        assert!(targets.rows.is_empty());
    }
}

// src/test_utils.rs
//! Doubles shared by the unit tests: a render target that records what was
//! done to it and a transport that replies from a script.
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::analysis::{
    AnalysisRequest, AnalysisResponse, CleaningSummary, CustomerSummary, DateRange, Series,
};
use crate::controller::Controller;
use crate::render::{
    Canvas, ChartInstance, ChartSpec, Kpi, RenderError, RenderTargets, SummaryField, TableRow,
};
use crate::transport::{AnalysisTransport, TransportError};

pub fn sample_response() -> AnalysisResponse {
    AnalysisResponse {
        total_revenue: 1520.75,
        total_transactions: 12,
        avg_transaction_value: 126.73,
        top_customers: vec![
            CustomerSummary { customer: "CUST-7".to_string(), total_spent: 400.0, visits: 3 },
            CustomerSummary { customer: "CUST-2".to_string(), total_spent: 250.25, visits: 2 },
        ],
        peak_hours: Series {
            labels: (0..24).map(|h| format!("{}:00", h)).collect(),
            data: (0..24).map(|h| if h == 18 { 5.0 } else { 0.0 }).collect(),
        },
        trends: Series {
            labels: vec!["2024-01-01".to_string(), "2024-01-02".to_string()],
            data: vec![900.5, 620.25],
        },
        cleaning_summary: Some(CleaningSummary {
            initial_records: 15,
            final_records: 12,
            records_removed: 3,
        }),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TargetEvent {
    SetKpi(Kpi),
    ClearTable,
    AppendRow,
    CreateChart(Canvas),
    DestroyChart(Canvas),
    ShowSummary,
    HideSummary,
    SetFilterRange(DateRange),
}

type EventLog = Rc<RefCell<Vec<TargetEvent>>>;

#[derive(Default)]
pub struct RecordingTargets {
    pub events: EventLog,
    pub kpis: HashMap<Kpi, String>,
    pub rows: Vec<TableRow>,
    pub summary: Option<[SummaryField; 3]>,
    pub filter: DateRange,
    live: Rc<RefCell<HashSet<Canvas>>>,
    specs: HashMap<Canvas, ChartSpec>,
}

impl RecordingTargets {
    pub fn kpi(&self, kpi: Kpi) -> Option<&str> {
        self.kpis.get(&kpi).map(String::as_str)
    }

    pub fn live_charts(&self) -> usize {
        self.live.borrow().len()
    }

    /// Spec of the most recently created chart on `canvas`.
    pub fn chart_spec(&self, canvas: Canvas) -> Option<&ChartSpec> {
        self.specs.get(&canvas)
    }

    fn record(&self, event: TargetEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl RenderTargets for RecordingTargets {
    fn set_kpi(&mut self, kpi: Kpi, text: String) {
        self.record(TargetEvent::SetKpi(kpi));
        self.kpis.insert(kpi, text);
    }

    fn clear_table(&mut self) {
        self.record(TargetEvent::ClearTable);
        self.rows.clear();
    }

    fn append_row(&mut self, row: TableRow) {
        self.record(TargetEvent::AppendRow);
        self.rows.push(row);
    }

    fn create_chart(&mut self, canvas: Canvas, spec: ChartSpec) -> Result<Box<dyn ChartInstance>, RenderError> {
        if !self.live.borrow_mut().insert(canvas) {
            return Err(RenderError::CanvasInUse(canvas));
        }
        self.record(TargetEvent::CreateChart(canvas));
        self.specs.insert(canvas, spec);

        Ok(Box::new(RecordingChart {
            canvas,
            live: Rc::clone(&self.live),
            events: Rc::clone(&self.events),
        }))
    }

    fn show_summary(&mut self, fields: [SummaryField; 3]) {
        self.record(TargetEvent::ShowSummary);
        self.summary = Some(fields);
    }

    fn hide_summary(&mut self) {
        self.record(TargetEvent::HideSummary);
        self.summary = None;
    }

    fn filter_range(&self) -> DateRange {
        self.filter.clone()
    }

    fn set_filter_range(&mut self, range: DateRange) {
        self.record(TargetEvent::SetFilterRange(range.clone()));
        self.filter = range;
    }
}

struct RecordingChart {
    canvas: Canvas,
    live: Rc<RefCell<HashSet<Canvas>>>,
    events: EventLog,
}

impl ChartInstance for RecordingChart {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn destroy(self: Box<Self>) {
        self.live.borrow_mut().remove(&self.canvas);
        self.events.borrow_mut().push(TargetEvent::DestroyChart(self.canvas));
    }
}

type Reply = Box<dyn Fn() -> Result<AnalysisResponse, TransportError> + Send + Sync>;

pub struct ScriptedTransport {
    reply: Reply,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<AnalysisRequest>>,
}

impl ScriptedTransport {
    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            gate: None,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(response: AnalysisResponse) -> Self {
        Self::with_reply(Box::new(move || Ok(response.clone())))
    }

    pub fn server_error(status: u16, message: &str) -> Self {
        let message = message.to_string();
        Self::with_reply(Box::new(move || Err(TransportError::Server {
            status,
            message: message.clone(),
        })))
    }

    pub fn decode_error() -> Self {
        Self::with_reply(Box::new(|| {
            Err(serde_json::from_str::<AnalysisResponse>("{").unwrap_err().into())
        }))
    }

    /// Panics inside the spawned task, so no completion is ever sent.
    pub fn panicking() -> Self {
        Self::with_reply(Box::new(|| -> Result<AnalysisResponse, TransportError> {
            panic!("transport task crashed")
        }))
    }

    /// Holds every reply until the gate is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<AnalysisRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AnalysisTransport for ScriptedTransport {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        (self.reply)()
    }
}

/// Polls until one outcome has been applied. Panics after five seconds.
pub fn wait_for_completion(controller: &mut Controller, targets: &mut dyn RenderTargets) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while controller.poll(targets) == 0 {
        assert!(Instant::now() < deadline, "analysis request never completed");
        std::thread::sleep(Duration::from_millis(5));
    }
}

// In-memory source, view and chart surface for controller tests
use crate::application::record_source::{FetchError, RecordSource};
use crate::application::view::{ChartId, ChartSurface, DashboardView};
use crate::domain::chart::ChartConfig;
use crate::domain::equipment::SelectOption;
use crate::domain::metrics::MetricsDisplay;
use crate::domain::record::Record;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn records(payload: Value) -> Vec<Record> {
    serde_json::from_value(payload).unwrap()
}

/// Replays scripted responses in call order.
#[derive(Default)]
pub struct FakeSource {
    responses: Mutex<VecDeque<(Duration, Result<Vec<Record>, FetchError>)>>,
    calls: AtomicUsize,
}

impl FakeSource {
    pub fn with(responses: Vec<Result<Vec<Record>, FetchError>>) -> Self {
        let source = Self::default();
        for response in responses {
            source.push(Duration::ZERO, response);
        }
        source
    }

    pub fn push(&self, delay: Duration, response: Result<Vec<Record>, FetchError>) {
        self.responses.lock().unwrap().push_back((delay, response));
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordSource for FakeSource {
    async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.responses.lock().unwrap().pop_front();
        let (delay, response) =
            next.unwrap_or((Duration::ZERO, Err(FetchError::Transport("no scripted response".into()))));
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        response
    }
}

#[derive(Debug, Default)]
pub struct ViewState {
    pub options: Option<Vec<SelectOption>>,
    pub metrics: Option<MetricsDisplay>,
    pub metric_updates: usize,
}

#[derive(Clone, Default)]
pub struct FakeView(pub Arc<Mutex<ViewState>>);

impl FakeView {
    pub fn options(&self) -> Option<Vec<SelectOption>> {
        self.0.lock().unwrap().options.clone()
    }

    pub fn metrics(&self) -> Option<MetricsDisplay> {
        self.0.lock().unwrap().metrics.clone()
    }

    pub fn metric_updates(&self) -> usize {
        self.0.lock().unwrap().metric_updates
    }
}

impl DashboardView for FakeView {
    fn set_equipment_options(&mut self, options: Vec<SelectOption>) {
        self.0.lock().unwrap().options = Some(options);
    }

    fn set_metrics(&mut self, metrics: &MetricsDisplay) {
        let mut state = self.0.lock().unwrap();
        state.metrics = Some(metrics.clone());
        state.metric_updates += 1;
    }
}

#[derive(Debug, Default)]
pub struct SurfaceState {
    pub next_id: u64,
    pub live: Vec<ChartId>,
    pub created: Vec<ChartConfig>,
    pub destroyed: Vec<ChartId>,
}

#[derive(Clone, Default)]
pub struct FakeSurface(pub Arc<Mutex<SurfaceState>>);

impl FakeSurface {
    pub fn live(&self) -> usize {
        self.0.lock().unwrap().live.len()
    }

    pub fn created(&self) -> Vec<ChartConfig> {
        self.0.lock().unwrap().created.clone()
    }

    pub fn destroyed(&self) -> usize {
        self.0.lock().unwrap().destroyed.len()
    }
}

impl ChartSurface for FakeSurface {
    fn create_chart(&mut self, config: &ChartConfig) -> ChartId {
        let mut state = self.0.lock().unwrap();
        state.next_id += 1;
        let id = ChartId(state.next_id);
        state.live.push(id);
        state.created.push(config.clone());
        id
    }

    fn destroy_chart(&mut self, id: ChartId) {
        let mut state = self.0.lock().unwrap();
        state.live.retain(|live| *live != id);
        state.destroyed.push(id);
    }
}

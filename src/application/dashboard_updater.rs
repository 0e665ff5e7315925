// Dashboard updater - Use case for refreshing metrics and the energy chart
use crate::application::record_source::RecordSource;
use crate::application::view::{ChartId, ChartSurface, SharedView};
use crate::domain::chart::ChartConfig;
use crate::domain::metrics::{MetricsDisplay, Totals};
use crate::domain::record::Record;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// No equipment selected; nothing was touched.
    Skipped,
    /// The fetch failed; the previous state is still displayed.
    Failed,
    /// A newer update was requested while this one was in flight.
    Stale,
    /// No records for the equipment; metrics were zeroed.
    Empty,
    Rendered,
}

/// The chart currently drawn, if any, together with its surface.
struct ChartSlot {
    surface: Box<dyn ChartSurface>,
    current: Option<ChartId>,
}

impl ChartSlot {
    fn replace(&mut self, config: &ChartConfig) -> ChartId {
        if let Some(previous) = self.current.take() {
            self.surface.destroy_chart(previous);
        }
        let id = self.surface.create_chart(config);
        self.current = Some(id);
        id
    }
}

impl Drop for ChartSlot {
    fn drop(&mut self) {
        if let Some(id) = self.current.take() {
            self.surface.destroy_chart(id);
        }
    }
}

pub struct DashboardUpdater {
    source: Arc<dyn RecordSource>,
    view: SharedView,
    chart: Mutex<ChartSlot>,
    latest_request: AtomicU64,
}

impl DashboardUpdater {
    pub fn new(
        source: Arc<dyn RecordSource>,
        view: SharedView,
        surface: Box<dyn ChartSurface>,
    ) -> Self {
        Self {
            source,
            view,
            chart: Mutex::new(ChartSlot {
                surface,
                current: None,
            }),
            latest_request: AtomicU64::new(0),
        }
    }

    pub async fn update_dashboard(&self, equipment: &str) -> UpdateOutcome {
        if equipment.is_empty() {
            return UpdateOutcome::Skipped;
        }

        let request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;

        let records = match self.source.fetch_records().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("Failed to update dashboard for {}: {}", equipment, e);
                return UpdateOutcome::Failed;
            }
        };

        let mut view = self.view.lock().await;

        // Only the most recent request may write to the display.
        if self.latest_request.load(Ordering::SeqCst) != request {
            tracing::debug!("Discarding stale response #{} for {}", request, equipment);
            return UpdateOutcome::Stale;
        }

        let filtered: Vec<&Record> = records.iter().filter(|r| r.is_for(equipment)).collect();
        if filtered.is_empty() {
            tracing::info!("No records for {}", equipment);
            view.set_metrics(&MetricsDisplay::zero());
            return UpdateOutcome::Empty;
        }

        let totals = Totals::from_records(filtered.iter().copied());
        view.set_metrics(&MetricsDisplay::from(totals));

        let config = ChartConfig::energy_over_time(&filtered);
        let chart_id = self.chart.lock().await.replace(&config);
        tracing::debug!(
            "Rendered chart {:?} for {} with {} points",
            chart_id,
            equipment,
            filtered.len()
        );

        UpdateOutcome::Rendered
    }
}

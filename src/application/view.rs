// Display seams driven by the dashboard controller
use crate::domain::chart::ChartConfig;
use crate::domain::equipment::SelectOption;
use crate::domain::metrics::MetricsDisplay;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Identifies a chart instance created by a [`ChartSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChartId(pub u64);

/// Selection control plus the three metric displays.
pub trait DashboardView: Send {
    /// Replace the selection control's options.
    fn set_equipment_options(&mut self, options: Vec<SelectOption>);

    fn set_metrics(&mut self, metrics: &MetricsDisplay);
}

/// A surface charts are drawn onto.
pub trait ChartSurface: Send {
    fn create_chart(&mut self, config: &ChartConfig) -> ChartId;

    fn destroy_chart(&mut self, id: ChartId);
}

pub type SharedView = Arc<Mutex<Box<dyn DashboardView>>>;

pub fn shared_view(view: impl DashboardView + 'static) -> SharedView {
    let view: Box<dyn DashboardView> = Box::new(view);
    Arc::new(Mutex::new(view))
}

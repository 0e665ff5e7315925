// Dashboard controller - Wires selection events to the loader and updater
use crate::application::dashboard_updater::DashboardUpdater;
use crate::application::equipment_loader::EquipmentLoader;
use crate::application::record_source::RecordSource;
use crate::application::view::{shared_view, ChartSurface, DashboardView, SharedView};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_stream::{Stream, StreamExt};

/// A change of the equipment selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub value: String,
}

impl SelectionChange {
    pub fn new(value: impl Into<String>) -> Self {
        Self { value: value.into() }
    }
}

pub struct DashboardController {
    loader: EquipmentLoader,
    updater: Arc<DashboardUpdater>,
}

impl DashboardController {
    pub fn new(
        source: Arc<dyn RecordSource>,
        view: impl DashboardView + 'static,
        surface: impl ChartSurface + 'static,
    ) -> Self {
        let view: SharedView = shared_view(view);
        Self {
            loader: EquipmentLoader::new(source.clone(), view.clone()),
            updater: Arc::new(DashboardUpdater::new(source, view, Box::new(surface))),
        }
    }

    /// Load the equipment list once, then refresh the dashboard for every
    /// selection until the event stream ends.
    ///
    /// Each selection runs on its own task, so a slow fetch never holds up
    /// the next selection.
    pub async fn run<S>(self, mut events: S)
    where
        S: Stream<Item = SelectionChange> + Unpin,
    {
        self.loader.load_equipment().await;

        let mut updates = JoinSet::new();
        while let Some(event) = events.next().await {
            tracing::debug!("Selection changed to {:?}", event.value);
            let updater = self.updater.clone();
            updates.spawn(async move { updater.update_dashboard(&event.value).await });
        }

        while let Some(result) = updates.join_next().await {
            if let Err(e) = result {
                tracing::error!("Dashboard update task failed: {}", e);
            }
        }
    }
}

// Equipment loader - Use case for populating the selection control
use crate::application::record_source::{FetchError, RecordSource};
use crate::application::view::SharedView;
use crate::domain::equipment::{
    equipment_options, SelectOption, LOAD_ERROR_PLACEHOLDER, NO_DATA_PLACEHOLDER,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct EquipmentLoader {
    source: Arc<dyn RecordSource>,
    view: SharedView,
}

impl EquipmentLoader {
    pub fn new(source: Arc<dyn RecordSource>, view: SharedView) -> Self {
        Self { source, view }
    }

    /// Fill the selection control from a fresh fetch. Failures only degrade
    /// the control to a placeholder.
    pub async fn load_equipment(&self) {
        let options = match self.source.fetch_records().await {
            Ok(records) => {
                let options = equipment_options(&records);
                tracing::info!("Loaded {} equipment from {} records", options.len() - 1, records.len());
                options
            }
            Err(FetchError::Shape) => {
                tracing::error!("Failed to load equipment: expected an array of records");
                vec![SelectOption::unavailable(NO_DATA_PLACEHOLDER)]
            }
            Err(e) => {
                tracing::error!("Failed to load equipment: {}", e);
                vec![SelectOption::placeholder(LOAD_ERROR_PLACEHOLDER)]
            }
        };

        self.view.lock().await.set_equipment_options(options);
    }
}

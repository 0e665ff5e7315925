// Application state for HTTP handlers
use crate::infrastructure::csv_store::CsvStore;
use std::path::PathBuf;

#[derive(Clone)]
pub struct AppState {
    pub csv_store: CsvStore,
    pub static_dir: PathBuf,
}

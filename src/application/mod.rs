// Application layer - Loader, updater and event wiring
pub mod controller;
pub mod dashboard_updater;
pub mod equipment_loader;
pub mod record_source;
pub mod view;

#[cfg(test)]
pub mod testing;

// Domain layer - Records, metrics and chart models
pub mod chart;
pub mod equipment;
pub mod metrics;
pub mod record;

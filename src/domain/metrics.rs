// Aggregated metrics domain model
use super::record::{to_fixed2, Record};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Totals {
    pub energy: f64,
    pub carbon: f64,
    pub cost: f64,
}

impl Totals {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a Record>) -> Self {
        records.into_iter().fold(Self::default(), |totals, record| Self {
            energy: totals.energy + record.energy(),
            carbon: totals.carbon + record.carbon(),
            cost: totals.cost + record.cost(),
        })
    }
}

/// Text shown in the three metric displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsDisplay {
    pub energy: String,
    pub carbon: String,
    pub cost: String,
}

impl MetricsDisplay {
    pub fn zero() -> Self {
        Self::from(Totals::default())
    }
}

impl From<Totals> for MetricsDisplay {
    fn from(totals: Totals) -> Self {
        Self {
            energy: format!("{} kWh", to_fixed2(totals.energy)),
            carbon: format!("{} kg CO₂", to_fixed2(totals.carbon)),
            cost: format!("RM {}", to_fixed2(totals.cost)),
        }
    }
}

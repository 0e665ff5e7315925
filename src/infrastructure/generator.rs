// Sample sensor data generator
use anyhow::{Context, Result};
use chrono::{NaiveDateTime, TimeDelta};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Serialize;
use std::path::Path;

pub const EQUIPMENT_IDS: [&str; 3] = ["PUMP-01", "COMP-01", "GEN-01"];

/// Cost per kWh in RM.
const TARIFF: f64 = 0.5;

#[derive(Debug, Clone, Serialize)]
pub struct SampleRow {
    pub timestamp: String,
    pub equipment_id: &'static str,
    pub energy: f64,
    pub carbon: f64,
    pub cost: f64,
}

/// One reading per minute from `start`, each for a random piece of equipment.
pub fn generate_rows(count: usize, start: NaiveDateTime, rng: &mut impl Rng) -> Vec<SampleRow> {
    (0..count)
        .map(|minute| {
            let timestamp = start + TimeDelta::minutes(minute as i64);
            let equipment_id = EQUIPMENT_IDS.choose(rng).copied().unwrap_or(EQUIPMENT_IDS[0]);
            let energy = round2(rng.random_range(50.0..300.0));
            let carbon = round2(energy * rng.random_range(0.2..0.4));
            SampleRow {
                timestamp: timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                equipment_id,
                energy,
                carbon,
                cost: round2(energy * TARIFF),
            }
        })
        .collect()
}

pub fn write_csv(path: &Path, rows: &[SampleRow]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

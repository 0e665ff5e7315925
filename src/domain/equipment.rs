// Equipment selection domain model
use super::record::Record;
use std::collections::HashSet;

pub const SELECT_PLACEHOLDER: &str = "Select Equipment";
pub const NO_DATA_PLACEHOLDER: &str = "No data available";
pub const LOAD_ERROR_PLACEHOLDER: &str = "Error loading data";

/// One entry of the equipment selection control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn placeholder(label: &str) -> Self {
        Self {
            value: String::new(),
            label: label.to_string(),
            disabled: false,
        }
    }

    pub fn unavailable(label: &str) -> Self {
        Self {
            disabled: true,
            ..Self::placeholder(label)
        }
    }

    pub fn equipment(id: String) -> Self {
        Self {
            label: id.clone(),
            value: id,
            disabled: false,
        }
    }
}

/// Distinct equipment identifiers in order of first appearance.
///
/// `42` and `"42"` are different ids and both get listed.
pub fn distinct_equipment(records: &[Record]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter_map(|record| {
            let label = record.equipment_label()?;
            seen.insert((record.equipment.is_string(), label.clone()))
                .then_some(label)
        })
        .collect()
}

/// Leading placeholder followed by one option per distinct equipment.
pub fn equipment_options(records: &[Record]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::placeholder(SELECT_PLACEHOLDER))
        .chain(distinct_equipment(records).into_iter().map(SelectOption::equipment))
        .collect()
}

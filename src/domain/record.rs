// Energy usage record domain model
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::Value;

/// One data point as served by `/api/data`.
///
/// Readings are kept as raw JSON values: the endpoint may send numbers,
/// numeric strings, `null` or nothing at all, and the coercion to `f64`
/// happens through [`parse_or_zero`].
#[derive(Debug, Clone, Deserialize)]
pub struct Record {
    /// Kept as sent: only string ids take part in selection matching.
    #[serde(default)]
    pub equipment: Value,
    #[serde(default)]
    pub timestamp: Value,
    #[serde(default)]
    pub energy: Value,
    #[serde(default)]
    pub carbon: Value,
    #[serde(default)]
    pub cost: Value,
}

impl Record {
    /// Strict match: a numeric id never equals a selected string.
    pub fn is_for(&self, equipment: &str) -> bool {
        self.equipment.as_str() == Some(equipment)
    }

    /// Text of the id as shown in the selection control.
    pub fn equipment_label(&self) -> Option<String> {
        match &self.equipment {
            Value::String(id) => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }

    pub fn energy(&self) -> f64 {
        parse_or_zero(&self.energy)
    }

    pub fn carbon(&self) -> f64 {
        parse_or_zero(&self.carbon)
    }

    pub fn cost(&self) -> f64 {
        parse_or_zero(&self.cost)
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        parse_instant(&self.timestamp)
    }
}

/// Coerce a reading to a number, falling back to zero.
///
/// Strings are read up to the end of their leading decimal literal, so
/// `"3 kWh"` yields `3.0`. Anything without a finite numeric reading is zero.
pub fn parse_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_leading_float(text),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn parse_leading_float(text: &str) -> Option<f64> {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let is_digit = |index: usize| bytes.get(index).is_some_and(u8::is_ascii_digit);

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let integer_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut digits = end - integer_start;

    if bytes.get(end) == Some(&b'.') {
        let mut fraction_end = end + 1;
        while is_digit(fraction_end) {
            fraction_end += 1;
        }
        digits += fraction_end - end - 1;
        if digits > 0 {
            end = fraction_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent_end = end + 1;
        if matches!(bytes.get(exponent_end), Some(b'+' | b'-')) {
            exponent_end += 1;
        }
        let exponent_digits_start = exponent_end;
        while is_digit(exponent_end) {
            exponent_end += 1;
        }
        if exponent_end > exponent_digits_start {
            end = exponent_end;
        }
    }

    text[..end].parse().ok()
}

/// Format with two decimals the way a browser's `toFixed(2)` does.
///
/// Exact ties round away from zero, so `10.125` gives `"10.13"` where
/// `format!("{:.2}")` would round to even. A tie at two decimals is a value
/// whose magnitude times eight is an odd integer.
pub fn to_fixed2(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    let eighths = magnitude * 8.0;
    let digits = if eighths.fract() == 0.0 && eighths % 2.0 == 1.0 {
        let cents = (magnitude * 100.0).ceil() as u128;
        format!("{}.{:02}", cents / 100, cents % 100)
    } else {
        format!("{:.2}", magnitude)
    };

    if value < 0.0 { format!("-{digits}") } else { digits }
}

/// Convert a record timestamp into an absolute instant.
///
/// Numbers are epoch milliseconds. Strings without an offset are local time,
/// except a bare date which is UTC midnight.
pub fn parse_instant(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(number) => {
            let millis = number.as_i64().or_else(|| number.as_f64().map(|ms| ms as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        Value::String(text) => parse_instant_str(text.trim()),
        _ => None,
    }
}

fn parse_instant_str(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|local| local.with_timezone(&Utc));
        }
    }

    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero(&json!(2.5)), 2.5);
        assert_eq!(parse_or_zero(&json!(3)), 3.0);
        assert_eq!(parse_or_zero(&json!("2.5")), 2.5);
        assert_eq!(parse_or_zero(&json!("  -1.25e2 ")), -125.0);
        assert_eq!(parse_or_zero(&json!("3 kWh")), 3.0);
        assert_eq!(parse_or_zero(&json!(".5")), 0.5);
        assert_eq!(parse_or_zero(&json!("7.")), 7.0);
        assert_eq!(parse_or_zero(&json!("1e")), 1.0);
    }

    #[test]
    fn test_parse_or_zero_fallbacks() {
        assert_eq!(parse_or_zero(&Value::Null), 0.0);
        assert_eq!(parse_or_zero(&json!("")), 0.0);
        assert_eq!(parse_or_zero(&json!("abc")), 0.0);
        assert_eq!(parse_or_zero(&json!("-")), 0.0);
        assert_eq!(parse_or_zero(&json!(".")), 0.0);
        assert_eq!(parse_or_zero(&json!(true)), 0.0);
        assert_eq!(parse_or_zero(&json!([1])), 0.0);
        assert_eq!(parse_or_zero(&json!("1e999")), 0.0);
    }

    #[test]
    fn test_parse_instant() {
        let epoch = parse_instant(&json!(1000)).unwrap();
        assert_eq!(epoch.timestamp_millis(), 1000);

        let rfc = parse_instant(&json!("2024-03-01T10:15:00Z")).unwrap();
        assert_eq!(rfc.timestamp(), 1_709_288_100);

        let date = parse_instant(&json!("2024-03-01")).unwrap();
        assert_eq!(date.timestamp(), 1_709_251_200);

        let naive = NaiveDateTime::parse_from_str("2024-03-01 10:15:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let expected = Local.from_local_datetime(&naive).earliest().unwrap().with_timezone(&Utc);
        assert_eq!(parse_instant(&json!("2024-03-01 10:15:00")), Some(expected));

        assert_eq!(parse_instant(&json!("yesterday")), None);
        assert_eq!(parse_instant(&Value::Null), None);
    }

    #[test]
    fn test_record_deserialization() {
        let record: Record = serde_json::from_value(json!({
            "equipment": "PUMP-01",
            "timestamp": "2024-03-01T10:15:00Z",
            "energy": "12.5",
        }))
        .unwrap();

        assert!(record.is_for("PUMP-01"));
        assert!(!record.is_for("pump-01"));
        assert_eq!(record.energy(), 12.5);
        assert_eq!(record.carbon(), 0.0);
        assert_eq!(record.cost(), 0.0);
        assert!(record.instant().is_some());

        assert_eq!(record.equipment_label().as_deref(), Some("PUMP-01"));

        let anonymous: Record = serde_json::from_value(json!({"energy": 1})).unwrap();
        assert_eq!(anonymous.equipment_label(), None);
        assert!(!anonymous.is_for(""));
    }

    #[test]
    fn test_numeric_equipment_is_listed_but_never_matches() {
        let numeric: Record = serde_json::from_value(json!({"equipment": 42})).unwrap();

        assert_eq!(numeric.equipment_label().as_deref(), Some("42"));
        assert!(!numeric.is_for("42"));
    }

    #[test]
    fn test_to_fixed2_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed2(10.125), "10.13");
        assert_eq!(to_fixed2(1.375), "1.38");
        assert_eq!(to_fixed2(-0.125), "-0.13");
        assert_eq!(to_fixed2(0.625), "0.63");
    }

    #[test]
    fn test_to_fixed2_non_ties() {
        assert_eq!(to_fixed2(0.0), "0.00");
        assert_eq!(to_fixed2(-0.0), "0.00");
        assert_eq!(to_fixed2(2.5), "2.50");
        assert_eq!(to_fixed2(1.005), "1.00");
        assert_eq!(to_fixed2(0.1 + 0.2), "0.30");
        assert_eq!(to_fixed2(-0.001), "-0.00");
        assert_eq!(to_fixed2(1234.5678), "1234.57");
        assert_eq!(to_fixed2(f64::NAN), "NaN");
    }
}

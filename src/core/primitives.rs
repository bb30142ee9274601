use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};

use crate::core::DataValue;
use crate::error::{ChartError, ChartResult};

const NAIVE_DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> ChartResult<f64> {
    value.to_f64().ok_or_else(|| {
        ChartError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

/// Parses one raw source cell into a typed value.
///
/// Order: empty, number, date/time, text.
#[must_use]
pub fn parse_cell(raw: &str) -> DataValue {
    let cell = raw.trim();
    if cell.is_empty() {
        return DataValue::Missing;
    }
    if let Ok(number) = cell.parse::<f64>() {
        if number.is_finite() {
            return DataValue::Number(number);
        }
    }
    if let Some(seconds) = parse_time_cell(cell) {
        return DataValue::Time(seconds);
    }
    DataValue::Text(cell.to_owned())
}

fn parse_time_cell(cell: &str) -> Option<f64> {
    if let Ok(time) = DateTime::parse_from_rfc3339(cell) {
        return Some(datetime_to_unix_seconds(time.with_timezone(&Utc)));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(cell, format) {
            return Some(datetime_to_unix_seconds(naive.and_utc()));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(cell, format) {
            let midnight = date.and_hms_opt(0, 0, 0)?;
            return Some(datetime_to_unix_seconds(midnight.and_utc()));
        }
    }
    None
}

/// Snaps `value` onto the grid `origin + k * step` using decimal arithmetic so
/// that steps like `0.1` land on exact decimal values.
pub fn snap_to_step(value: f64, origin: f64, step: f64) -> ChartResult<f64> {
    let to_decimal = |v: f64, name: &str| {
        Decimal::from_f64(v).ok_or_else(|| {
            ChartError::InvalidData(format!("{name} cannot be represented as decimal"))
        })
    };
    let value_dec = to_decimal(value, "value")?;
    let origin_dec = to_decimal(origin, "step origin")?;
    let step_dec = to_decimal(step, "step")?;
    if step_dec.is_zero() {
        return Ok(value);
    }
    let snapped = value_dec
        .checked_sub(origin_dec)
        .and_then(|offset| offset.checked_div(step_dec))
        .map(|steps| steps.round())
        .and_then(|steps| steps.checked_mul(step_dec))
        .and_then(|offset| offset.checked_add(origin_dec))
        .ok_or_else(|| {
            ChartError::InvalidData(format!(
                "snapping {value} to step {step} from {origin} overflows decimal range"
            ))
        })?;
    decimal_to_f64(snapped, "snapped value")
}

//! Row encoding: merging one tick's samples into a fixed-schema CSV line.
//!
//! The column order is part of the log schema and never changes within one
//! file. Missing readings render as empty text (never `0`, `null`, or a
//! `NaN` literal) so downstream parsers can distinguish "absent" from a
//! real zero.

use chrono::{DateTime, Local};

use crate::sources::{Field, Sample, Value};

/// The 22 log columns, in order. `ts_iso` and `t_sec` come from the
/// sampling loop; the rest map 1:1 onto [`Field::ALL`].
pub const COLUMNS: [&str; 22] = [
    "ts_iso",
    "t_sec",
    "level_pct",
    "temp_C",
    "voltage_mV",
    "status",
    "plugged",
    "current_now_uA",
    "current_avg_uA",
    "charge_counter_uAh",
    "energy_counter",
    "power_W",
    "wifi_rssi_dbm",
    "mobile_dbm",
    "mobile_rx_bytes",
    "mobile_tx_bytes",
    "wifi_rx_bytes",
    "wifi_tx_bytes",
    "cpu_freq_ghz",
    "foreground_app_count",
    "screen_brightness",
    "mem_usage_pct",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub fn header_line() -> String {
    COLUMNS.join(",")
}

/// Renders one tick's samples as a CSV data line.
///
/// Pure: the same inputs always produce the same text.
pub fn encode_row(ts: DateTime<Local>, t_sec: f64, samples: &[Sample]) -> String {
    let mut columns = Vec::with_capacity(COLUMNS.len());
    columns.push(ts.format(TIMESTAMP_FORMAT).to_string());
    columns.push(format!("{t_sec:.1}"));

    for field in Field::ALL {
        let value = samples.iter().find_map(|sample| sample.get(field));
        columns.push(value.map(|v| render(field, v)).unwrap_or_default());
    }

    columns.join(",")
}

fn render(field: Field, value: &Value) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Text(v) => v.clone(),
        // A non-finite reading would log a "NaN"/"inf" literal and break
        // numeric parsing downstream; absent is the honest encoding.
        Value::Float(v) if !v.is_finite() => String::new(),
        Value::Float(v) => match field {
            Field::LevelPct | Field::TempC => format!("{v:.2}"),
            Field::MemUsagePct => format!("{v:.1}"),
            Field::CpuFreqGhz => format!("{v:.3}"),
            // Shortest representation, but always with a decimal point
            // (2 W logs as "2.0").
            Field::PowerW => format!("{v:?}"),
            _ => format!("{v}"),
        },
    }
}

//! Battery and charger telemetry from `/sys/class/power_supply/`.
//!
//! The kernel exposes one directory per supply. The first directory whose
//! `type` is `Battery` provides the charge readings; any `Mains`/`USB`
//! supply with `online == 1` marks the device as plugged in.
//!
//! Units, as exposed by the kernel:
//! - `voltage_now` µV (logged as mV)
//! - `current_now` / `current_avg` µA
//! - `charge_now` µAh, `energy_now` µWh
//! - `temp` tenths of °C

use std::path::{Path, PathBuf};

use super::{Field, Probe, Sample, Value};

const POWER_SUPPLY_ROOT: &str = "/sys/class/power_supply";

/// Some drivers report current in mA where µA is expected. Readings below
/// 10 mA in magnitude are treated as mA and scaled up.
pub(crate) fn normalize_current_ua(raw: i64) -> i64 {
    if raw != 0 && raw.abs() < 10_000 {
        raw * 1000
    } else {
        raw
    }
}

pub struct BatteryProbe {
    root: PathBuf,
}

impl BatteryProbe {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from(POWER_SUPPLY_ROOT))
    }

    /// Reads from an alternate supply tree (fixture directories in tests).
    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn battery_dir(&self) -> Option<PathBuf> {
        let mut candidates: Vec<PathBuf> = supply_dirs(&self.root)
            .into_iter()
            .filter(|dir| read_trimmed(&dir.join("type")).as_deref() == Some("Battery"))
            .collect();
        candidates.sort();
        candidates.into_iter().next()
    }

    fn plugged(&self) -> Option<i64> {
        let mut saw_supply = false;
        for dir in supply_dirs(&self.root) {
            match read_trimmed(&dir.join("type")).as_deref() {
                Some("Mains") | Some("USB") => {
                    saw_supply = true;
                    if read_i64(&dir.join("online")) == Some(1) {
                        return Some(1);
                    }
                }
                _ => {}
            }
        }
        if saw_supply {
            Some(0)
        } else {
            None
        }
    }

    fn read_battery(&self, sample: &mut Sample) {
        let Some(dir) = self.battery_dir() else {
            return;
        };

        sample.set_opt(Field::LevelPct, level_pct(&dir).map(Value::Float));

        sample.set_opt(
            Field::TempC,
            read_i64(&dir.join("temp")).map(|tenths| Value::Float(tenths as f64 / 10.0)),
        );

        let voltage_mv = read_i64(&dir.join("voltage_now")).map(|uv| uv / 1000);
        sample.set_opt(Field::VoltageMv, voltage_mv.map(Value::Int));

        sample.set_opt(
            Field::Status,
            read_trimmed(&dir.join("status")).map(Value::Text),
        );

        let current_now = read_i64(&dir.join("current_now")).map(normalize_current_ua);
        sample.set_opt(Field::CurrentNowUa, current_now.map(Value::Int));
        sample.set_opt(
            Field::CurrentAvgUa,
            read_i64(&dir.join("current_avg"))
                .map(normalize_current_ua)
                .map(Value::Int),
        );

        sample.set_opt(
            Field::ChargeCounterUah,
            read_i64(&dir.join("charge_now")).map(Value::Int),
        );
        sample.set_opt(
            Field::EnergyCounter,
            read_i64(&dir.join("energy_now")).map(Value::Int),
        );

        if let (Some(mv), Some(ua)) = (voltage_mv, current_now) {
            let volts = mv as f64 / 1000.0;
            let amps = ua.abs() as f64 / 1e6;
            sample.set(Field::PowerW, Value::Float(volts * amps));
        }
    }
}

impl Default for BatteryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for BatteryProbe {
    fn name(&self) -> &'static str {
        "power"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        self.read_battery(&mut sample);
        sample.set_opt(Field::Plugged, self.plugged().map(Value::Int));
        sample
    }
}

/// Battery percent from the charge (or energy) now/full pair, falling back
/// to the kernel's own `capacity` percent. A non-positive denominator means
/// the reading is unusable and the field stays absent.
fn level_pct(dir: &Path) -> Option<f64> {
    for (now, full) in [
        ("charge_now", "charge_full"),
        ("energy_now", "energy_full"),
    ] {
        if let (Some(now), Some(full)) = (read_i64(&dir.join(now)), read_i64(&dir.join(full))) {
            if full <= 0 {
                return None;
            }
            return Some(now as f64 * 100.0 / full as f64);
        }
    }
    read_i64(&dir.join("capacity")).map(|pct| pct as f64)
}

fn supply_dirs(root: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(root) else {
        return Vec::new();
    };
    entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect()
}

fn read_trimmed(path: &Path) -> Option<String> {
    std::fs::read_to_string(path)
        .ok()
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}

fn read_i64(path: &Path) -> Option<i64> {
    read_trimmed(path)?.parse().ok()
}

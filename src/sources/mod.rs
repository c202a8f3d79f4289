//! Telemetry probes and the sample model they produce.
//!
//! Every reading comes from a [`Probe`]. Probes are independent: each one
//! returns a [`Sample`] (a set of field/value pairs) and swallows its own
//! failures, so a broken sensor yields empty fields instead of aborting the
//! tick.

pub mod apps;
pub mod brightness;
pub mod cpu;
pub mod memory;
pub mod network;
pub mod power;

use crate::settings::SamplerSettings;

pub use apps::ActiveAppsProbe;
pub use brightness::BrightnessProbe;
pub use cpu::CpuFreqProbe;
pub use memory::MemoryProbe;
pub use network::{CellSignalProbe, TrafficProbe, WifiSignalProbe};
pub use power::BatteryProbe;

/// Identifies one sampled column of the log schema.
///
/// `ts_iso` and `t_sec` are not fields: they are produced by the sampling
/// loop itself, not by a probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    LevelPct,
    TempC,
    VoltageMv,
    Status,
    Plugged,
    CurrentNowUa,
    CurrentAvgUa,
    ChargeCounterUah,
    EnergyCounter,
    PowerW,
    WifiRssiDbm,
    MobileDbm,
    MobileRxBytes,
    MobileTxBytes,
    WifiRxBytes,
    WifiTxBytes,
    CpuFreqGhz,
    ForegroundAppCount,
    ScreenBrightness,
    MemUsagePct,
}

impl Field {
    /// All sampled fields in log-schema order.
    pub const ALL: [Field; 20] = [
        Field::LevelPct,
        Field::TempC,
        Field::VoltageMv,
        Field::Status,
        Field::Plugged,
        Field::CurrentNowUa,
        Field::CurrentAvgUa,
        Field::ChargeCounterUah,
        Field::EnergyCounter,
        Field::PowerW,
        Field::WifiRssiDbm,
        Field::MobileDbm,
        Field::MobileRxBytes,
        Field::MobileTxBytes,
        Field::WifiRxBytes,
        Field::WifiTxBytes,
        Field::CpuFreqGhz,
        Field::ForegroundAppCount,
        Field::ScreenBrightness,
        Field::MemUsagePct,
    ];
}

/// A single field value as read from a probe, before encoding.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

/// One probe's output for one tick.
///
/// Fields a probe could not read are simply absent; the encoder renders
/// absent fields as empty text.
#[derive(Debug, Clone, Default)]
pub struct Sample {
    fields: Vec<(Field, Value)>,
}

impl Sample {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, value: Value) {
        self.fields.push((field, value));
    }

    /// Records the value only when the read produced one.
    pub fn set_opt(&mut self, field: Field, value: Option<Value>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    pub fn get(&self, field: Field) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Field, Value)> {
        self.fields.iter()
    }
}

/// A best-effort telemetry reader.
///
/// `collect` must never panic past its boundary: internal failures are
/// swallowed and reported as an empty (or partially filled) [`Sample`].
pub trait Probe: Send {
    fn name(&self) -> &'static str;

    fn collect(&mut self) -> Sample;
}

/// The fixed set of probes invoked on every tick.
pub struct SourceSet {
    probes: Vec<Box<dyn Probe>>,
}

impl SourceSet {
    pub fn new(probes: Vec<Box<dyn Probe>>) -> Self {
        Self { probes }
    }

    /// The standard probe set, reading the host's sysfs/procfs sources.
    pub fn standard(settings: &SamplerSettings) -> Self {
        Self::new(vec![
            Box::new(BatteryProbe::new()),
            Box::new(WifiSignalProbe::new()),
            Box::new(CellSignalProbe::new(settings.cell_signal_source.clone())),
            Box::new(TrafficProbe::new()),
            Box::new(CpuFreqProbe::new()),
            Box::new(ActiveAppsProbe::new()),
            Box::new(BrightnessProbe::new()),
            Box::new(MemoryProbe::new()),
        ])
    }

    /// Invokes every probe independently and returns whatever they produced.
    ///
    /// Probe order does not matter to the encoder; each field belongs to
    /// exactly one probe.
    pub fn collect_all(&mut self) -> Vec<Sample> {
        self.probes.iter_mut().map(|probe| probe.collect()).collect()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

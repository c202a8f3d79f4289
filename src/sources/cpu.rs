//! CPU frequency from `/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq`.
//!
//! Core 0 is the reference core; the kernel reports kHz and the log carries
//! GHz. On machines without cpufreq (VMs, some containers) the field is
//! simply absent.

use std::path::PathBuf;

use super::{Field, Probe, Sample, Value};

const SCALING_CUR_FREQ: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_cur_freq";

pub struct CpuFreqProbe {
    path: PathBuf,
}

impl CpuFreqProbe {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(SCALING_CUR_FREQ))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for CpuFreqProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for CpuFreqProbe {
    fn name(&self) -> &'static str {
        "cpu_freq"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        let ghz = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| content.trim().parse::<u64>().ok())
            .map(|khz| khz as f64 / 1e6);
        sample.set_opt(Field::CpuFreqGhz, ghz.map(Value::Float));
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_khz_to_ghz() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scaling_cur_freq");
        std::fs::write(&path, "1800000\n").unwrap();

        let mut probe = CpuFreqProbe::with_path(path);
        let sample = probe.collect();
        assert_eq!(sample.get(Field::CpuFreqGhz), Some(&Value::Float(1.8)));
    }

    #[test]
    fn unreadable_source_yields_empty_sample() {
        let mut probe = CpuFreqProbe::with_path(PathBuf::from("/nonexistent/scaling_cur_freq"));
        assert!(probe.collect().is_empty());
    }

    #[test]
    fn garbage_content_yields_empty_sample() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("scaling_cur_freq");
        std::fs::write(&path, "not-a-number\n").unwrap();

        let mut probe = CpuFreqProbe::with_path(path);
        assert!(probe.collect().is_empty());
    }
}

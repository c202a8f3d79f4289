//! Screen brightness from `/sys/class/backlight/`.
//!
//! The raw scale is device-specific; the log carries the value as-is, the
//! way the display stack reports it.

use std::path::PathBuf;

use super::{Field, Probe, Sample, Value};

const BACKLIGHT_ROOT: &str = "/sys/class/backlight";

pub struct BrightnessProbe {
    root: PathBuf,
}

impl BrightnessProbe {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from(BACKLIGHT_ROOT))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self { root }
    }

    fn read_brightness(&self) -> Option<i64> {
        let mut devices: Vec<PathBuf> = std::fs::read_dir(&self.root)
            .ok()?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .collect();
        devices.sort();

        for device in devices {
            if let Some(value) = std::fs::read_to_string(device.join("brightness"))
                .ok()
                .and_then(|content| content.trim().parse::<i64>().ok())
            {
                return Some(value);
            }
        }
        None
    }
}

impl Default for BrightnessProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for BrightnessProbe {
    fn name(&self) -> &'static str {
        "brightness"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        sample.set_opt(
            Field::ScreenBrightness,
            self.read_brightness().map(Value::Int),
        );
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_backlight_device() {
        let tmp = tempfile::tempdir().unwrap();
        let device = tmp.path().join("intel_backlight");
        std::fs::create_dir_all(&device).unwrap();
        std::fs::write(device.join("brightness"), "412\n").unwrap();

        let mut probe = BrightnessProbe::with_root(tmp.path().to_path_buf());
        let sample = probe.collect();
        assert_eq!(sample.get(Field::ScreenBrightness), Some(&Value::Int(412)));
    }

    #[test]
    fn no_backlight_yields_empty_sample() {
        let mut probe = BrightnessProbe::with_root(PathBuf::from("/nonexistent/backlight"));
        assert!(probe.collect().is_empty());
    }
}

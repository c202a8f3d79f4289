use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SamplerSettings {
    /// Seconds between ticks; must be at least 1.
    pub interval_secs: u64,
    /// Where session log files are created.
    pub output_dir: PathBuf,
    /// Platform-provided file exposing cellular signal strength in dBm.
    /// Unset means the caller has no authorized signal source.
    pub cell_signal_source: Option<PathBuf>,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            output_dir: PathBuf::from("."),
            cell_signal_source: None,
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
    data: RwLock<SamplerSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_default()
        } else {
            SamplerSettings::default()
        };

        Ok(Self {
            path,
            data: RwLock::new(data),
        })
    }

    pub fn sampler(&self) -> SamplerSettings {
        self.data.read().unwrap().clone()
    }

    pub fn update_sampler(&self, settings: SamplerSettings) -> Result<()> {
        {
            let mut guard = self.data.write().unwrap();
            *guard = settings;
            self.persist(&guard)?;
        }
        Ok(())
    }

    fn persist(&self, data: &SamplerSettings) -> Result<()> {
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("Failed to write settings to {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_file_is_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(tmp.path().join("settings.json")).unwrap();
        let settings = store.sampler();
        assert_eq!(settings.interval_secs, 5);
        assert!(settings.cell_signal_source.is_none());
    }

    #[test]
    fn round_trips_through_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store
            .update_sampler(SamplerSettings {
                interval_secs: 30,
                output_dir: PathBuf::from("/var/log/batlog"),
                cell_signal_source: None,
            })
            .unwrap();

        let reloaded = SettingsStore::new(path).unwrap();
        assert_eq!(reloaded.sampler().interval_secs, 30);
        assert_eq!(
            reloaded.sampler().output_dir,
            PathBuf::from("/var/log/batlog")
        );
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.sampler().interval_secs, 5);
    }
}

//! Count of distinct applications active during the tick window.
//!
//! There is no desktop equivalent of a usage-statistics service, so
//! "active" means a process that consumed CPU since the previous refresh.
//! `cpu_usage` is a delta measurement: the first tick after start
//! establishes the baseline and reports whatever the scan already shows.

use std::collections::HashSet;

use sysinfo::{ProcessesToUpdate, System};

use super::{Field, Probe, Sample, Value};

pub struct ActiveAppsProbe {
    system: System,
}

impl ActiveAppsProbe {
    pub fn new() -> Self {
        let mut system = System::new();
        // Baseline refresh so the first tick's CPU deltas are meaningful.
        system.refresh_processes(ProcessesToUpdate::All);
        Self { system }
    }
}

impl Default for ActiveAppsProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for ActiveAppsProbe {
    fn name(&self) -> &'static str {
        "active_apps"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        self.system.refresh_processes(ProcessesToUpdate::All);

        let distinct: HashSet<_> = self
            .system
            .processes()
            .values()
            .filter(|process| process.cpu_usage() > 0.0)
            .map(|process| process.name().to_os_string())
            .collect();

        sample.set(Field::ForegroundAppCount, Value::Int(distinct.len() as i64));
        sample
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_a_nonnegative_count() {
        let mut probe = ActiveAppsProbe::new();
        let sample = probe.collect();
        match sample.get(Field::ForegroundAppCount) {
            Some(Value::Int(count)) => assert!(*count >= 0),
            other => panic!("expected an integer count, got {other:?}"),
        }
    }
}

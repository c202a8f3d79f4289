//! Memory pressure as a percentage of total memory in use.

use sysinfo::System;

use super::{Field, Probe, Sample, Value};

pub struct MemoryProbe {
    system: System,
}

impl MemoryProbe {
    pub fn new() -> Self {
        Self {
            system: System::new(),
        }
    }
}

impl Default for MemoryProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for MemoryProbe {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        self.system.refresh_memory();
        let pct = usage_pct(self.system.total_memory(), self.system.available_memory());
        sample.set_opt(Field::MemUsagePct, pct.map(Value::Float));
        sample
    }
}

/// `(total − available) / total × 100`, absent when the total is unknown.
pub(crate) fn usage_pct(total: u64, available: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let used = total.saturating_sub(available);
    Some(used as f64 * 100.0 / total as f64)
}

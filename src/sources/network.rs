//! Network signal strength and traffic counters.
//!
//! WiFi signal comes from `/proc/net/wireless`, traffic counters from
//! `/proc/net/dev`. Cellular signal has no standard kernel location; the
//! caller may point [`CellSignalProbe`] at a platform-provided file, and
//! without one the field simply stays empty.

use std::path::{Path, PathBuf};

use super::{Field, Probe, Sample, Value};

const WIRELESS_PATH: &str = "/proc/net/wireless";
const NET_DEV_PATH: &str = "/proc/net/dev";

/// Interface name prefixes counted as mobile (cellular modem) traffic.
const MOBILE_PREFIXES: [&str; 2] = ["wwan", "ppp"];

pub struct WifiSignalProbe {
    path: PathBuf,
}

impl WifiSignalProbe {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(WIRELESS_PATH))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for WifiSignalProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for WifiSignalProbe {
    fn name(&self) -> &'static str {
        "wifi_signal"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        let rssi = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| parse_wireless_rssi(&content));
        sample.set_opt(Field::WifiRssiDbm, rssi.map(Value::Int));
        sample
    }
}

/// Extracts the signal level (dBm) of the first interface listed in
/// `/proc/net/wireless`. The file has two header lines; level is the fourth
/// column and carries a trailing dot.
pub(crate) fn parse_wireless_rssi(content: &str) -> Option<i64> {
    let line = content.lines().nth(2)?;
    let level = line.split_whitespace().nth(3)?;
    let level: f64 = level.trim_end_matches('.').parse().ok()?;
    Some(level as i64)
}

pub struct CellSignalProbe {
    source: Option<PathBuf>,
}

impl CellSignalProbe {
    /// `source` is the platform-provided dBm file; `None` means the caller
    /// has no authorized signal source and the field stays empty.
    pub fn new(source: Option<PathBuf>) -> Self {
        Self { source }
    }
}

impl Probe for CellSignalProbe {
    fn name(&self) -> &'static str {
        "cell_signal"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        let Some(source) = &self.source else {
            return sample;
        };
        let dbm = std::fs::read_to_string(source)
            .ok()
            .and_then(|content| content.trim().parse::<i64>().ok());
        sample.set_opt(Field::MobileDbm, dbm.map(Value::Int));
        sample
    }
}

/// Cumulative per-interface byte counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct TrafficTotals {
    pub mobile_rx: u64,
    pub mobile_tx: u64,
    pub total_rx: u64,
    pub total_tx: u64,
}

pub struct TrafficProbe {
    path: PathBuf,
}

impl TrafficProbe {
    pub fn new() -> Self {
        Self::with_path(PathBuf::from(NET_DEV_PATH))
    }

    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Default for TrafficProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl Probe for TrafficProbe {
    fn name(&self) -> &'static str {
        "traffic"
    }

    fn collect(&mut self) -> Sample {
        let mut sample = Sample::new();
        let Some(totals) = std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| parse_net_dev(&content))
        else {
            return sample;
        };

        sample.set(Field::MobileRxBytes, Value::Int(totals.mobile_rx as i64));
        sample.set(Field::MobileTxBytes, Value::Int(totals.mobile_tx as i64));
        sample.set_opt(
            Field::WifiRxBytes,
            derive_wifi_bytes(Some(totals.total_rx), Some(totals.mobile_rx))
                .map(|bytes| Value::Int(bytes as i64)),
        );
        sample.set_opt(
            Field::WifiTxBytes,
            derive_wifi_bytes(Some(totals.total_tx), Some(totals.mobile_tx))
                .map(|bytes| Value::Int(bytes as i64)),
        );
        sample
    }
}

/// WiFi traffic is total-minus-mobile. Unavailable when either operand is
/// unavailable, so a missing counter never masquerades as real traffic.
pub(crate) fn derive_wifi_bytes(total: Option<u64>, mobile: Option<u64>) -> Option<u64> {
    total?.checked_sub(mobile?)
}

/// Sums `/proc/net/dev` byte counters: mobile interfaces by prefix, totals
/// over everything except loopback. Returns `None` when no interface line
/// parses.
pub(crate) fn parse_net_dev(content: &str) -> Option<TrafficTotals> {
    let mut totals = TrafficTotals::default();
    let mut parsed_any = false;

    for line in content.lines().skip(2) {
        let Some((iface, counters)) = line.split_once(':') else {
            continue;
        };
        let iface = iface.trim();
        let fields: Vec<&str> = counters.split_whitespace().collect();
        // rx_bytes is the first counter column, tx_bytes the ninth.
        let (Some(rx), Some(tx)) = (
            fields.first().and_then(|s| s.parse::<u64>().ok()),
            fields.get(8).and_then(|s| s.parse::<u64>().ok()),
        ) else {
            continue;
        };

        parsed_any = true;
        if iface == "lo" {
            continue;
        }
        totals.total_rx += rx;
        totals.total_tx += tx;
        if MOBILE_PREFIXES.iter().any(|prefix| iface.starts_with(prefix)) {
            totals.mobile_rx += rx;
            totals.mobile_tx += tx;
        }
    }

    parsed_any.then_some(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIRELESS_SAMPLE: &str = "\
Inter-| sta-|   Quality        |   Discarded packets               | Missed | WE
 face | tus | link level noise |  fake hungup   crypt   retry   misc | beacon | 22
 wlp2s0: 0000   60.  -50.  -256        0      0      0      0      0        0
";

    const NET_DEV_SAMPLE: &str = "\
Inter-|   Receive                                                |  Transmit
 face |bytes    packets errs drop fifo frame compressed multicast|bytes    packets errs drop fifo colls carrier compressed
    lo:  500000    1000    0    0    0     0          0         0   500000    1000    0    0    0     0       0          0
wlp2s0: 9000000    8000    0    0    0     0          0         0  2000000    4000    0    0    0     0       0          0
 wwan0: 1000000    2000    0    0    0     0          0         0   300000    1500    0    0    0     0       0          0
";

    #[test]
    fn parses_wireless_level() {
        assert_eq!(parse_wireless_rssi(WIRELESS_SAMPLE), Some(-50));
    }

    #[test]
    fn wireless_without_interfaces_is_none() {
        let headers_only: String = WIRELESS_SAMPLE.lines().take(2).collect::<Vec<_>>().join("\n");
        assert_eq!(parse_wireless_rssi(&headers_only), None);
    }

    #[test]
    fn sums_mobile_and_total_counters() {
        let totals = parse_net_dev(NET_DEV_SAMPLE).unwrap();
        assert_eq!(totals.mobile_rx, 1_000_000);
        assert_eq!(totals.mobile_tx, 300_000);
        // loopback excluded
        assert_eq!(totals.total_rx, 10_000_000);
        assert_eq!(totals.total_tx, 2_300_000);
    }

    #[test]
    fn wifi_bytes_are_total_minus_mobile() {
        assert_eq!(derive_wifi_bytes(Some(10_000_000), Some(1_000_000)), Some(9_000_000));
        assert_eq!(derive_wifi_bytes(None, Some(1)), None);
        assert_eq!(derive_wifi_bytes(Some(1), None), None);
    }

    #[test]
    fn traffic_probe_reads_fixture_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("net_dev");
        std::fs::write(&path, NET_DEV_SAMPLE).unwrap();

        let mut probe = TrafficProbe::with_path(path);
        let sample = probe.collect();
        assert_eq!(
            sample.get(Field::MobileRxBytes),
            Some(&Value::Int(1_000_000))
        );
        assert_eq!(sample.get(Field::WifiRxBytes), Some(&Value::Int(9_000_000)));
        assert_eq!(sample.get(Field::WifiTxBytes), Some(&Value::Int(2_000_000)));
    }

    #[test]
    fn cell_probe_without_source_is_empty() {
        let mut probe = CellSignalProbe::new(None);
        assert!(probe.collect().is_empty());
    }

    #[test]
    fn cell_probe_reads_dbm_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("signal_dbm");
        std::fs::write(&path, "-97\n").unwrap();

        let mut probe = CellSignalProbe::new(Some(path));
        let sample = probe.collect();
        assert_eq!(sample.get(Field::MobileDbm), Some(&Value::Int(-97)));
    }
}

//! batlog: a background battery and system telemetry logger.
//!
//! One sampling session at a time: start it, and every interval the probes
//! are read, merged into a fixed-schema row, and appended (flushed) to a
//! timestamp-named CSV file. Stop cancels the loop, closes the file, and
//! releases the wake lock. The control surface is [`SessionController`];
//! everything else is plumbing behind it.

mod logfile;
mod sampling;
mod session;
mod settings;
mod sources;
mod status;
mod utils;
mod wake;

pub use logfile::{encode_row, header_line, CsvSink, COLUMNS};
pub use session::{SessionController, SessionState, SessionStatus, SourceFactory};
pub use settings::{SamplerSettings, SettingsStore};
pub use sources::{Field, Probe, Sample, SourceSet, Value};
pub use status::{status_line, StatusSnapshot};
pub use wake::{NoopWakeLock, WakeLock, MAX_WAKE_HOLD};

use anyhow::Result;
use chrono::Local;
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::logfile::{encode_row, CsvSink};
use crate::sources::SourceSet;
use crate::status::{status_line, StatusSnapshot};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

// Import the logging macros (exported at crate root)
use crate::{log_error, log_info, log_warn};

/// Drives one session: collect, encode, append, at a fixed cadence until
/// cancelled. Runs as its own task so start/stop callers never wait on an
/// in-flight reading.
///
/// The loop owns the sink, which keeps writes single-writer by
/// construction, and closes it on the way out so cancellation never leaves
/// an unflushed file behind.
pub(crate) async fn sampling_loop(
    mut sources: SourceSet,
    mut sink: CsvSink,
    anchor: Instant,
    interval: Duration,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Err(err) = perform_tick(&mut sources, &mut sink, anchor) {
                    // A single bad tick must never end the session.
                    log_warn!("tick skipped: {err:?}");
                }
            }
            _ = cancel.cancelled() => {
                log_info!("sampling loop shutting down");
                break;
            }
        }
    }

    if let Err(err) = sink.close() {
        log_error!("failed to close log sink: {err:?}");
    }
}

fn perform_tick(sources: &mut SourceSet, sink: &mut CsvSink, anchor: Instant) -> Result<()> {
    let t_sec = anchor.elapsed().as_secs_f64();
    let samples = sources.collect_all();
    let row = encode_row(Local::now(), t_sec, &samples);
    sink.append(&row)?;

    log_info!(
        "{}",
        status_line(&StatusSnapshot {
            running: true,
            elapsed_seconds: t_sec,
            destination: Some(sink.file_name().to_string()),
        })
    );

    Ok(())
}

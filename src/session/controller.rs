use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{error, info};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::logfile::CsvSink;
use crate::sampling::sampling_loop;
use crate::settings::SamplerSettings;
use crate::sources::SourceSet;
use crate::status::StatusSnapshot;
use crate::wake::{NoopWakeLock, WakeLock, MAX_WAKE_HOLD};

use super::{SessionState, SessionStatus};

/// Builds a fresh probe set for each session.
pub type SourceFactory = Box<dyn Fn() -> SourceSet + Send + Sync>;

struct ActiveWorker {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Owns the sampling session lifecycle: at most one session at a time,
/// idempotent start, cooperative stop, and a wake lock / sink pair that is
/// released exactly once on every exit path.
pub struct SessionController {
    state: Arc<Mutex<SessionState>>,
    // Also serializes start against stop: both hold this lock end to end.
    worker: Mutex<Option<ActiveWorker>>,
    wake: Arc<dyn WakeLock>,
    output_dir: PathBuf,
    sources: SourceFactory,
}

impl SessionController {
    pub fn new(settings: SamplerSettings) -> Self {
        let output_dir = settings.output_dir.clone();
        Self::with_parts(
            output_dir,
            Box::new(move || SourceSet::standard(&settings)),
            Arc::new(NoopWakeLock::new()),
        )
    }

    /// Full-control constructor for platform integrations and tests.
    pub fn with_parts(
        output_dir: PathBuf,
        sources: SourceFactory,
        wake: Arc<dyn WakeLock>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new())),
            worker: Mutex::new(None),
            wake,
            output_dir,
            sources,
        }
    }

    /// Starts a sampling session. Returns `Ok(false)` without side effects
    /// when a session is already active. On any startup failure every
    /// partially acquired resource is released before the error surfaces.
    pub async fn start(&self, interval_secs: u64) -> Result<bool> {
        if interval_secs == 0 {
            bail!("interval must be at least 1 second");
        }

        let mut worker = self.worker.lock().await;
        if worker.is_some() {
            info!("sampling already active; ignoring start request");
            return Ok(false);
        }

        self.state.lock().await.status = SessionStatus::Starting;

        if let Err(err) = self.wake.acquire(MAX_WAKE_HOLD) {
            self.state.lock().await.reset();
            return Err(err).context("failed to acquire wake lock");
        }

        let sink = match CsvSink::create(&self.output_dir) {
            Ok(sink) => sink,
            Err(err) => {
                self.wake.release();
                self.state.lock().await.reset();
                return Err(err).context("failed to open log sink");
            }
        };

        let session_id = Uuid::new_v4().to_string();
        let log_name = sink.file_name().to_string();
        let anchor = Instant::now();
        self.state.lock().await.begin_session(
            session_id.clone(),
            interval_secs,
            Utc::now(),
            log_name.clone(),
            anchor,
        );

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(sampling_loop(
            (self.sources)(),
            sink,
            anchor,
            Duration::from_secs(interval_secs),
            cancel.clone(),
        ));
        *worker = Some(ActiveWorker { handle, cancel });

        info!("session {session_id} started: every {interval_secs}s into {log_name}");
        Ok(true)
    }

    /// Stops the active session: cancels future ticks, waits for any
    /// in-flight tick to finish (the loop closes the sink on its way out),
    /// then releases the wake lock. Calling stop while idle is a no-op.
    pub async fn stop(&self) -> Result<()> {
        let mut worker = self.worker.lock().await;
        let Some(active) = worker.take() else {
            return Ok(());
        };

        self.state.lock().await.status = SessionStatus::Stopping;
        active.cancel.cancel();
        if let Err(err) = active.handle.await {
            // Best-effort shutdown: the wake lock is released regardless.
            error!("sampling task failed to join: {err}");
        }

        if self.wake.is_held() {
            self.wake.release();
        }
        self.state.lock().await.reset();
        info!("session stopped");
        Ok(())
    }

    pub async fn status(&self) -> StatusSnapshot {
        let state = self.state.lock().await;
        StatusSnapshot {
            running: state.is_active(),
            elapsed_seconds: state.elapsed_secs(),
            destination: state.log_name.clone(),
        }
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        // Teardown path: no awaiting here, but cancellation is signalled
        // and the wake lock never outlives the controller.
        if let Ok(mut worker) = self.worker.try_lock() {
            if let Some(active) = worker.take() {
                active.cancel.cancel();
            }
        }
        if self.wake.is_held() {
            self.wake.release();
        }
    }
}

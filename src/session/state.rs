use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SessionStatus {
    Idle,
    Starting,
    Running,
    Stopping,
}

impl Default for SessionStatus {
    fn default() -> Self {
        SessionStatus::Idle
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub status: SessionStatus,
    pub session_id: Option<String>,
    pub interval_secs: u64,
    pub started_at: Option<DateTime<Utc>>,
    pub log_name: Option<String>,
    /// Monotonic anchor set at session start; elapsed time always derives
    /// from this, never from wall-clock time (which can jump).
    #[serde(skip)]
    pub anchor: Option<Instant>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Running
    }

    pub fn elapsed_secs(&self) -> f64 {
        match (self.status, self.anchor) {
            (SessionStatus::Running | SessionStatus::Stopping, Some(anchor)) => {
                anchor.elapsed().as_secs_f64()
            }
            _ => 0.0,
        }
    }

    pub fn begin_session(
        &mut self,
        session_id: String,
        interval_secs: u64,
        started_at: DateTime<Utc>,
        log_name: String,
        anchor: Instant,
    ) {
        *self = Self {
            status: SessionStatus::Running,
            session_id: Some(session_id),
            interval_secs,
            started_at: Some(started_at),
            log_name: Some(log_name),
            anchor: Some(anchor),
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_with_no_elapsed_time() {
        let state = SessionState::new();
        assert_eq!(state.status, SessionStatus::Idle);
        assert!(!state.is_active());
        assert_eq!(state.elapsed_secs(), 0.0);
    }

    #[test]
    fn begin_session_transitions_to_running() {
        let mut state = SessionState::new();
        state.begin_session(
            "abc".into(),
            5,
            Utc::now(),
            "battery_log_20240305_143007.csv".into(),
            Instant::now(),
        );
        assert!(state.is_active());
        assert_eq!(state.interval_secs, 5);
        assert_eq!(
            state.log_name.as_deref(),
            Some("battery_log_20240305_143007.csv")
        );
    }

    #[test]
    fn reset_returns_to_idle_and_clears_session() {
        let mut state = SessionState::new();
        state.begin_session("abc".into(), 1, Utc::now(), "log.csv".into(), Instant::now());
        state.reset();
        assert_eq!(state.status, SessionStatus::Idle);
        assert!(state.session_id.is_none());
        assert!(state.log_name.is_none());
        assert!(state.anchor.is_none());
    }

    #[test]
    fn elapsed_is_zero_unless_running() {
        let mut state = SessionState::new();
        state.anchor = Some(Instant::now());
        assert_eq!(state.elapsed_secs(), 0.0);
        state.status = SessionStatus::Running;
        assert!(state.elapsed_secs() >= 0.0);
    }
}

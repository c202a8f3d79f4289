//! The display string shown by whatever surface is watching the sampler.

use serde::{Deserialize, Serialize};

/// What a caller sees when it asks how the sampler is doing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub running: bool,
    pub elapsed_seconds: f64,
    pub destination: Option<String>,
}

/// Pure formatting: session state in, short display string out.
pub fn status_line(snapshot: &StatusSnapshot) -> String {
    match (snapshot.running, &snapshot.destination) {
        (true, Some(name)) => format!(
            "Recording: {:.0}s elapsed | File: {name}",
            snapshot.elapsed_seconds
        ),
        _ => "Idle".to_string(),
    }
}

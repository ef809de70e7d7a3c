//! Monitor response types.

use jiff::Zoned;
use serde::{Deserialize, Serialize};

use crate::service::GameInfo;

/// Format of the health timestamp, local time.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Name of the server implementation reported to clients.
const SERVER_NAME: &str = "Rust";

/// Health status response.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"OK"` while the server is answering.
    pub status: String,
    /// Local time this status was generated.
    pub timestamp: String,
    /// Game name.
    pub game: String,
    /// Game version.
    pub version: String,
    /// Server implementation.
    pub server: String,
}

impl HealthStatus {
    /// Creates a status for `game` stamped with the current local time.
    pub fn now(game: &GameInfo) -> Self {
        Self {
            status: "OK".to_owned(),
            timestamp: Zoned::now().strftime(TIMESTAMP_FORMAT).to_string(),
            game: game.name.clone(),
            version: game.version.clone(),
            server: SERVER_NAME.to_owned(),
        }
    }
}

//! Game descriptors reported by the JSON endpoints.

use serde::{Deserialize, Serialize};

use crate::service::ServiceConfig;

/// Game identity reported by the health endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Display name of the game.
    pub name: String,
    /// Game version.
    pub version: String,
}

impl GameInfo {
    /// Reads the game identity from configuration.
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            name: config.game_name.clone(),
            version: config.game_version.clone(),
        }
    }
}

/// Static descriptor served by `/api/stats`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    /// Short game title.
    pub game: String,
    /// Playable characters.
    pub characters: Vec<String>,
    /// Obstacle types found in the level.
    pub obstacles: Vec<String>,
    /// Round duration in seconds.
    pub duration: u32,
    /// Technology the game client is built with.
    pub developed: String,
}

impl Default for GameStats {
    fn default() -> Self {
        Self {
            game: "First Off".to_owned(),
            characters: vec!["Tireek".to_owned(), "Tryston".to_owned()],
            obstacles: vec![
                "vinyl".to_owned(),
                "gangster".to_owned(),
                "homeless".to_owned(),
            ],
            duration: 180,
            developed: "JavaScript Canvas".to_owned(),
        }
    }
}

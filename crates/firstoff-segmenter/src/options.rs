//! Segmentation run options.

use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default values for configuration options.
mod defaults {
    /// Default source background.
    pub const INPUT: &str = "assets/level_1_pieces/level1_background_street.png";

    /// Default output directory for segments and metadata.
    pub const OUTPUT: &str = "assets/backgrounds/level_1_segments";

    /// Default segment width, matching the game viewport width.
    pub const SEGMENT_WIDTH: u32 = 1200;

    /// Default game height every segment is scaled to.
    pub const GAME_HEIGHT: u32 = 720;
}

/// Options for a single segmentation run.
///
/// # Environment Variables
///
/// With the `config` feature every option can also be set via:
/// - `SEGMENT_INPUT` - Source background image
/// - `SEGMENT_OUTPUT` - Output directory (created if absent)
/// - `SEGMENT_WIDTH` - Width of each segment in pixels (default: 1200)
/// - `GAME_HEIGHT` - Height the background is scaled to (default: 720)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct SegmentOptions {
    /// Path to the background image to segment.
    #[cfg_attr(
        feature = "config",
        arg(short, long, env = "SEGMENT_INPUT", default_value = defaults::INPUT)
    )]
    pub input: PathBuf,

    /// Directory the segments and `metadata.json` are written to.
    #[cfg_attr(
        feature = "config",
        arg(short, long, env = "SEGMENT_OUTPUT", default_value = defaults::OUTPUT)
    )]
    pub output: PathBuf,

    /// Width of each segment in pixels. The last segment may be narrower.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "SEGMENT_WIDTH", default_value_t = defaults::SEGMENT_WIDTH)
    )]
    pub segment_width: u32,

    /// Height in pixels the background is scaled to before slicing.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GAME_HEIGHT", default_value_t = defaults::GAME_HEIGHT)
    )]
    pub game_height: u32,
}

impl SegmentOptions {
    /// Creates options for the given input and output with default dimensions.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            segment_width: defaults::SEGMENT_WIDTH,
            game_height: defaults::GAME_HEIGHT,
        }
    }

    /// Sets the segment width.
    pub fn with_segment_width(mut self, segment_width: u32) -> Self {
        self.segment_width = segment_width;
        self
    }

    /// Sets the game height.
    pub fn with_game_height(mut self, game_height: u32) -> Self {
        self.game_height = game_height;
        self
    }

    /// Validates the numeric options.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidInput`] when the segment width or the game
    /// height is zero.
    ///
    /// [`ErrorKind::InvalidInput`]: crate::ErrorKind::InvalidInput
    pub fn validate(&self) -> Result<()> {
        if self.segment_width == 0 {
            return Err(Error::invalid_input("segment width must be at least 1 pixel"));
        }

        if self.game_height == 0 {
            return Err(Error::invalid_input("game height must be at least 1 pixel"));
        }

        Ok(())
    }
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self::new(defaults::INPUT, defaults::OUTPUT)
    }
}

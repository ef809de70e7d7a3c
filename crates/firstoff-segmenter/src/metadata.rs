//! The `metadata.json` descriptor written next to the segments.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, ErrorKind, Result, TRACING_TARGET_OUTPUT};

/// File name of the metadata descriptor inside the output directory.
pub const METADATA_FILE_NAME: &str = "metadata.json";

const SEGMENT_FILE_PREFIX: &str = "segment_";
const SEGMENT_FILE_SUFFIX: &str = ".png";

/// Returns the file name of the segment at `index`, zero-padded to three digits.
#[must_use]
pub fn segment_file_name(index: u32) -> String {
    format!("{SEGMENT_FILE_PREFIX}{index:03}{SEGMENT_FILE_SUFFIX}")
}

/// Returns whether `name` looks like a file produced by [`segment_file_name`].
pub(crate) fn is_segment_file_name(name: &str) -> bool {
    name.strip_prefix(SEGMENT_FILE_PREFIX)
        .and_then(|rest| rest.strip_suffix(SEGMENT_FILE_SUFFIX))
        .is_some_and(|digits| digits.len() >= 3 && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Placement record for a single segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentInfo {
    /// Zero-based position, left to right.
    pub index: u32,
    /// File name inside the output directory.
    pub filename: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Left edge within the scaled background.
    pub x_offset: u32,
    /// Same as `x_offset`; kept for renderers that read this field.
    pub x_position: u32,
}

/// Geometry of a segmented background, as stored in `metadata.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentMetadata {
    /// Source `[width, height]`.
    pub original_dimensions: [u32; 2],
    /// `[width, height]` after scaling to the game height.
    pub scaled_dimensions: [u32; 2],
    /// Configured segment width.
    pub segment_width: u32,
    /// Configured game height.
    pub game_height: u32,
    /// `game_height / original_height`.
    pub scale_factor: f64,
    /// Number of segments written.
    pub num_segments: u32,
    /// Segments in left-to-right order.
    pub segments: Vec<SegmentInfo>,
}

impl SegmentMetadata {
    /// Returns the path of the descriptor inside `dir`.
    #[must_use]
    pub fn path_in(dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(METADATA_FILE_NAME)
    }

    /// Returns the sum of all segment widths.
    #[must_use]
    pub fn total_width(&self) -> u32 {
        self.segments.iter().map(|segment| segment.width).sum()
    }

    /// Writes the descriptor as pretty-printed JSON into `dir`.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = Self::path_in(dir);

        let file = File::create(&path).map_err(|err| Error::output_write_failure(&path, err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|err| Error::output_write_failure(&path, err))?;
        writer
            .flush()
            .map_err(|err| Error::output_write_failure(&path, err))?;

        tracing::debug!(
            target: TRACING_TARGET_OUTPUT,
            path = %path.display(),
            num_segments = self.num_segments,
            "metadata written"
        );

        Ok(path)
    }

    /// Reads the descriptor from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let path = Self::path_in(dir);

        let content = fs::read_to_string(&path).map_err(|err| {
            Error::new(
                ErrorKind::SourceUnreadable,
                format!("cannot read metadata {}", path.display()),
            )
            .with_path(&path)
            .with_source(err)
        })?;

        serde_json::from_str(&content).map_err(|err| {
            Error::new(
                ErrorKind::SourceUnreadable,
                format!("malformed metadata {}", path.display()),
            )
            .with_path(&path)
            .with_source(err)
        })
    }

    /// Returns whether `dir` holds the output of a completed run.
    ///
    /// The descriptor is written after every segment, so a readable
    /// `metadata.json` marks the run as done.
    #[must_use]
    pub fn is_complete(dir: impl AsRef<Path>) -> bool {
        Self::load(dir).is_ok()
    }
}

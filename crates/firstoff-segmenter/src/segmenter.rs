//! Background segmentation runs.

use std::fs;
use std::path::Path;
use std::time::Instant;

use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageFormat};
use rayon::prelude::*;

use crate::metadata::is_segment_file_name;
use crate::{
    Error, METADATA_FILE_NAME, Result, SegmentBounds, SegmentMetadata, SegmentOptions,
    SegmentPlan, TRACING_TARGET_OUTPUT, TRACING_TARGET_SEGMENTER,
};

/// Resampling filter used to scale the background to the game height.
const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Slices a background image into fixed-width segments.
///
/// A run decodes the source, scales it to the game height, writes every
/// segment as a PNG and finally writes `metadata.json`. Previous segmenter
/// output in the directory is removed first.
#[derive(Debug, Clone)]
pub struct Segmenter {
    options: SegmentOptions,
}

impl Segmenter {
    /// Creates a segmenter after validating `options`.
    pub fn new(options: SegmentOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Returns the options this segmenter runs with.
    pub fn options(&self) -> &SegmentOptions {
        &self.options
    }

    /// Runs the segmentation and returns the metadata that was written.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::SourceUnreadable`] if the input is missing, not an image
    ///   or has no pixels.
    /// - [`ErrorKind::OutputWriteFailure`] if the output directory, a segment or
    ///   the metadata cannot be written. Segments written before the failure
    ///   are left in place without a metadata file.
    ///
    /// [`ErrorKind::SourceUnreadable`]: crate::ErrorKind::SourceUnreadable
    /// [`ErrorKind::OutputWriteFailure`]: crate::ErrorKind::OutputWriteFailure
    pub fn run(&self) -> Result<SegmentMetadata> {
        let started_at = Instant::now();
        let SegmentOptions {
            input,
            output,
            segment_width,
            game_height,
        } = &self.options;

        let source = image::open(input).map_err(|err| Error::source_unreadable(input, err))?;
        let (original_width, original_height) = source.dimensions();
        let plan = SegmentPlan::new(original_width, original_height, *segment_width, *game_height)
            .map_err(|err| err.with_path(input))?;
        let (scaled_width, scaled_height) = plan.scaled_dimensions();

        tracing::info!(
            target: TRACING_TARGET_SEGMENTER,
            input = %input.display(),
            original_width,
            original_height,
            scaled_width,
            scaled_height,
            scale_factor = format_args!("{:.3}", plan.scale_factor()),
            num_segments = plan.num_segments(),
            "segmenting background"
        );

        prepare_output_dir(output)?;

        let scaled = if plan.scaled_dimensions() == plan.original_dimensions() {
            source
        } else {
            source.resize_exact(scaled_width, scaled_height, RESIZE_FILTER)
        };

        let bounds: Vec<SegmentBounds> = plan.segments().collect();
        bounds
            .par_iter()
            .try_for_each(|bounds| write_segment(&scaled, bounds, output))?;

        let metadata = plan.metadata();
        let metadata_path = metadata.save(output)?;

        tracing::info!(
            target: TRACING_TARGET_SEGMENTER,
            output = %output.display(),
            metadata = %metadata_path.display(),
            num_segments = metadata.num_segments,
            total_width = metadata.total_width(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            "segmentation complete"
        );

        Ok(metadata)
    }
}

/// Segments `input` into `output` with the given dimensions.
///
/// Shorthand for building [`SegmentOptions`] and running a [`Segmenter`].
pub fn segment_background(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    segment_width: u32,
    game_height: u32,
) -> Result<SegmentMetadata> {
    let options = SegmentOptions::new(input.as_ref(), output.as_ref())
        .with_segment_width(segment_width)
        .with_game_height(game_height);

    Segmenter::new(options)?.run()
}

/// Creates `dir` and removes output of any previous run.
///
/// Only `metadata.json` and `segment_NNN.png` files are removed.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).map_err(|err| Error::output_write_failure(dir, err))?;

    let entries = fs::read_dir(dir).map_err(|err| Error::output_write_failure(dir, err))?;
    let mut removed = 0usize;

    for entry in entries {
        let entry = entry.map_err(|err| Error::output_write_failure(dir, err))?;
        let path = entry.path();

        let is_stale = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name == METADATA_FILE_NAME || is_segment_file_name(name));
        if !is_stale || !path.is_file() {
            continue;
        }

        fs::remove_file(&path).map_err(|err| Error::output_write_failure(&path, err))?;
        removed += 1;
    }

    if removed > 0 {
        tracing::debug!(
            target: TRACING_TARGET_OUTPUT,
            dir = %dir.display(),
            removed,
            "removed previous segmenter output"
        );
    }

    Ok(())
}

/// Crops one segment out of the scaled background and writes it as PNG.
fn write_segment(scaled: &DynamicImage, bounds: &SegmentBounds, dir: &Path) -> Result<()> {
    let path = dir.join(bounds.file_name());
    let segment = scaled.crop_imm(bounds.left, 0, bounds.width, bounds.height);

    segment
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|err| Error::output_write_failure(&path, err))?;

    tracing::debug!(
        target: TRACING_TARGET_OUTPUT,
        index = bounds.index,
        file = %path.display(),
        width = bounds.width,
        height = bounds.height,
        "segment written"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    use super::*;
    use crate::{ErrorKind, segment_file_name};

    /// Writes a horizontal gradient so every column is distinguishable.
    fn write_background(dir: &Path, width: u32, height: u32) -> anyhow::Result<PathBuf> {
        let path = dir.join("background.png");
        let image = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
        });
        image.save(&path)?;
        Ok(path)
    }

    fn segment_files(dir: &Path) -> anyhow::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if is_segment_file_name(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    #[test]
    fn writes_segments_and_metadata() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let input = write_background(temp.path(), 250, 125)?;
        let output = temp.path().join("nested").join("segments");

        let metadata = segment_background(&input, &output, 50, 60)?;

        assert_eq!(metadata.original_dimensions, [250, 125]);
        assert_eq!(metadata.scaled_dimensions, [120, 60]);
        assert_eq!(metadata.scale_factor, 0.48);
        assert_eq!(metadata.num_segments, 3);
        assert_eq!(metadata.total_width(), 120);

        assert_eq!(
            segment_files(&output)?,
            vec!["segment_000.png", "segment_001.png", "segment_002.png"]
        );

        for segment in &metadata.segments {
            let tile = image::open(output.join(&segment.filename))?;
            assert_eq!(tile.dimensions(), (segment.width, 60));
        }
        assert_eq!(metadata.segments[2].width, 20);

        assert_eq!(SegmentMetadata::load(&output)?, metadata);
        Ok(())
    }

    #[test]
    fn segment_pixels_come_from_their_offset() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        // Already at game height, so no resampling alters the pixels.
        let input = write_background(temp.path(), 100, 40)?;
        let output = temp.path().join("out");

        segment_background(&input, &output, 30, 40)?;

        let tile = image::open(output.join(segment_file_name(2)))?.to_rgba8();
        assert_eq!(tile.get_pixel(0, 0)[0], 60);
        assert_eq!(tile.dimensions(), (30, 40));

        let tail = image::open(output.join(segment_file_name(3)))?.to_rgba8();
        assert_eq!(tail.dimensions(), (10, 40));
        assert_eq!(tail.get_pixel(9, 0)[0], 99);
        Ok(())
    }

    #[test]
    fn rerun_removes_stale_segments() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let input = write_background(temp.path(), 200, 50)?;
        let output = temp.path().join("out");
        let unrelated = output.join("notes.txt");

        segment_background(&input, &output, 20, 50)?;
        assert_eq!(segment_files(&output)?.len(), 10);
        fs::write(&unrelated, "keep me")?;

        let metadata = segment_background(&input, &output, 80, 50)?;
        assert_eq!(metadata.num_segments, 3);
        assert_eq!(
            segment_files(&output)?,
            vec!["segment_000.png", "segment_001.png", "segment_002.png"]
        );
        assert!(unrelated.exists());
        Ok(())
    }

    #[test]
    fn missing_source_is_unreadable() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let output = temp.path().join("out");

        let error = segment_background(temp.path().join("missing.png"), &output, 1200, 720)
            .unwrap_err();

        assert_eq!(error.kind(), ErrorKind::SourceUnreadable);
        assert!(!SegmentMetadata::is_complete(&output));
        Ok(())
    }

    #[test]
    fn undecodable_source_is_unreadable() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let input = temp.path().join("background.png");
        fs::write(&input, b"definitely not a png")?;

        let error = segment_background(&input, temp.path().join("out"), 1200, 720).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::SourceUnreadable);
        Ok(())
    }

    #[test]
    fn output_under_a_file_fails_to_write() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let input = write_background(temp.path(), 40, 20)?;
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "")?;

        let error = segment_background(&input, blocker.join("out"), 10, 20).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::OutputWriteFailure);
        Ok(())
    }

    #[test]
    fn failed_segment_write_leaves_no_metadata() -> anyhow::Result<()> {
        let temp = TempDir::new()?;
        let input = write_background(temp.path(), 120, 40)?;
        let output = temp.path().join("out");

        segment_background(&input, &output, 40, 40)?;
        assert!(SegmentMetadata::is_complete(&output));

        // A directory in place of a tile cannot be overwritten by the writer.
        let blocked = output.join(segment_file_name(1));
        fs::remove_file(&blocked)?;
        fs::create_dir(&blocked)?;

        let error = segment_background(&input, &output, 40, 40).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::OutputWriteFailure);
        assert!(!SegmentMetadata::is_complete(&output));
        assert!(!output.join(METADATA_FILE_NAME).exists());
        Ok(())
    }

    #[test]
    fn invalid_options_are_rejected_before_decoding() {
        let options = SegmentOptions::new("missing.png", "out").with_segment_width(0);
        let error = Segmenter::new(options).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }
}

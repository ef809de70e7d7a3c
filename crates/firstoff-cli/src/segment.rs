//! The `segment` command.

use anyhow::{Context, bail};
use firstoff_segmenter::{SegmentOptions, Segmenter};

use crate::TRACING_TARGET_SEGMENT;

/// Segments the configured background on a blocking thread.
///
/// # Errors
///
/// Fails if the input image does not exist, the options are invalid or the
/// segmenter cannot read the image or write its output.
pub async fn run(options: SegmentOptions) -> anyhow::Result<()> {
    if !options.input.is_file() {
        bail!(
            "background image {} not found, pass --input with the path to the source image",
            options.input.display()
        );
    }

    let segmenter = Segmenter::new(options).context("invalid segment options")?;

    let metadata = tokio::task::spawn_blocking(move || segmenter.run())
        .await
        .context("segmenter task failed")?
        .context("failed to segment background")?;

    tracing::info!(
        target: TRACING_TARGET_SEGMENT,
        total_segments = metadata.num_segments,
        total_width = metadata.total_width(),
        segment_width = metadata.segment_width,
        game_height = metadata.game_height,
        "segmentation complete"
    );

    Ok(())
}

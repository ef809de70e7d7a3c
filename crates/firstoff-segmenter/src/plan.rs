//! Segment geometry.
//!
//! A [`SegmentPlan`] is computed from the source dimensions before any pixel
//! is touched. It fixes the scaled size and the bounds of every segment, so
//! the tile writer and the metadata descriptor always agree.

use crate::metadata::{SegmentInfo, SegmentMetadata, segment_file_name};
use crate::{Error, ErrorKind, Result};

/// Scaled dimensions and segment layout for one source image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentPlan {
    original_width: u32,
    original_height: u32,
    scaled_width: u32,
    scaled_height: u32,
    segment_width: u32,
    scale_factor: f64,
}

/// Horizontal bounds of a single segment within the scaled image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentBounds {
    /// Zero-based position, left to right.
    pub index: u32,
    /// Left edge within the scaled image.
    pub left: u32,
    /// Segment width in pixels, never zero.
    pub width: u32,
    /// Segment height in pixels, always the scaled height.
    pub height: u32,
}

impl SegmentBounds {
    /// Returns the exclusive right edge within the scaled image.
    #[must_use]
    pub const fn right(&self) -> u32 {
        self.left + self.width
    }

    /// Returns the file name this segment is written to.
    #[must_use]
    pub fn file_name(&self) -> String {
        segment_file_name(self.index)
    }
}

impl From<SegmentBounds> for SegmentInfo {
    fn from(bounds: SegmentBounds) -> Self {
        Self {
            index: bounds.index,
            filename: bounds.file_name(),
            width: bounds.width,
            height: bounds.height,
            x_offset: bounds.left,
            x_position: bounds.left,
        }
    }
}

impl SegmentPlan {
    /// Computes the plan for an image of `original_width` x `original_height`.
    ///
    /// The image is scaled so its height equals `game_height`; the scaled
    /// width is rounded to the nearest pixel and never drops below one.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::SourceUnreadable`] if the source has no pixels.
    /// - [`ErrorKind::InvalidInput`] if the segment width or game height is zero.
    pub fn new(
        original_width: u32,
        original_height: u32,
        segment_width: u32,
        game_height: u32,
    ) -> Result<Self> {
        if original_width == 0 || original_height == 0 {
            return Err(Error::new(
                ErrorKind::SourceUnreadable,
                format!("source image has no pixels ({original_width}x{original_height})"),
            ));
        }

        if segment_width == 0 || game_height == 0 {
            return Err(Error::invalid_input(format!(
                "segment width and game height must be positive ({segment_width}x{game_height})"
            )));
        }

        let scale_factor = f64::from(game_height) / f64::from(original_height);
        let scaled_width = (f64::from(original_width) * scale_factor).round();
        // Saturating float-to-int cast; a sliver still yields one column.
        let scaled_width = (scaled_width as u32).max(1);

        Ok(Self {
            original_width,
            original_height,
            scaled_width,
            scaled_height: game_height,
            segment_width,
            scale_factor,
        })
    }

    /// Returns the source dimensions.
    #[must_use]
    pub const fn original_dimensions(&self) -> (u32, u32) {
        (self.original_width, self.original_height)
    }

    /// Returns the dimensions after scaling to the game height.
    #[must_use]
    pub const fn scaled_dimensions(&self) -> (u32, u32) {
        (self.scaled_width, self.scaled_height)
    }

    /// Returns the configured segment width.
    #[must_use]
    pub const fn segment_width(&self) -> u32 {
        self.segment_width
    }

    /// Returns `game_height / original_height`.
    #[must_use]
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Returns `ceil(scaled_width / segment_width)`, always at least one.
    #[must_use]
    pub const fn num_segments(&self) -> u32 {
        self.scaled_width.div_ceil(self.segment_width)
    }

    /// Returns the bounds of the segment at `index`, if it exists.
    #[must_use]
    pub fn segment(&self, index: u32) -> Option<SegmentBounds> {
        if index >= self.num_segments() {
            return None;
        }

        let left = index * self.segment_width;
        let right = left.saturating_add(self.segment_width).min(self.scaled_width);

        Some(SegmentBounds {
            index,
            left,
            width: right - left,
            height: self.scaled_height,
        })
    }

    /// Returns the bounds of every segment, left to right.
    pub fn segments(&self) -> impl Iterator<Item = SegmentBounds> + '_ {
        (0..self.num_segments()).filter_map(|index| self.segment(index))
    }

    /// Builds the metadata descriptor for this plan.
    #[must_use]
    pub fn metadata(&self) -> SegmentMetadata {
        SegmentMetadata {
            original_dimensions: [self.original_width, self.original_height],
            scaled_dimensions: [self.scaled_width, self.scaled_height],
            segment_width: self.segment_width,
            game_height: self.scaled_height,
            scale_factor: self.scale_factor,
            num_segments: self.num_segments(),
            segments: self.segments().map(SegmentInfo::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_background_splits_with_narrow_tail() -> anyhow::Result<()> {
        let plan = SegmentPlan::new(3000, 1500, 1200, 720)?;

        assert_eq!(plan.scale_factor(), 0.48);
        assert_eq!(plan.scaled_dimensions(), (1440, 720));
        assert_eq!(plan.num_segments(), 2);

        let widths: Vec<u32> = plan.segments().map(|s| s.width).collect();
        assert_eq!(widths, vec![1200, 240]);
        Ok(())
    }

    #[test]
    fn background_at_game_size_is_one_segment() -> anyhow::Result<()> {
        let plan = SegmentPlan::new(1200, 720, 1200, 720)?;

        assert_eq!(plan.scale_factor(), 1.0);
        assert_eq!(plan.scaled_dimensions(), (1200, 720));
        assert_eq!(plan.num_segments(), 1);
        assert_eq!(plan.segment(0).map(|s| s.width), Some(1200));
        assert_eq!(plan.segment(1), None);
        Ok(())
    }

    #[test]
    fn exact_multiple_has_no_empty_tail() -> anyhow::Result<()> {
        let plan = SegmentPlan::new(2400, 720, 1200, 720)?;

        assert_eq!(plan.num_segments(), 2);
        assert!(plan.segments().all(|s| s.width == 1200));
        Ok(())
    }

    #[test]
    fn scaled_width_is_rounded() -> anyhow::Result<()> {
        // 1001 * 0.5 = 500.5 rounds up, 999 * 0.5 = 499.5 rounds up.
        assert_eq!(SegmentPlan::new(1001, 1440, 100, 720)?.scaled_dimensions().0, 501);
        assert_eq!(SegmentPlan::new(999, 1440, 100, 720)?.scaled_dimensions().0, 500);
        // 1000 * 720 / 1080 = 666.67
        assert_eq!(SegmentPlan::new(1000, 1080, 100, 720)?.scaled_dimensions().0, 667);
        Ok(())
    }

    #[test]
    fn sliver_keeps_one_column() -> anyhow::Result<()> {
        let plan = SegmentPlan::new(1, 10_000, 1200, 720)?;

        assert_eq!(plan.scaled_dimensions(), (1, 720));
        assert_eq!(plan.num_segments(), 1);
        Ok(())
    }

    #[test]
    fn segments_are_contiguous_and_cover_the_width() -> anyhow::Result<()> {
        for (width, height, segment_width) in [
            (3000, 1500, 1200),
            (5123, 917, 640),
            (720, 720, 1200),
            (8000, 720, 1),
            (7777, 333, 999),
        ] {
            let plan = SegmentPlan::new(width, height, segment_width, 720)?;
            let (scaled_width, scaled_height) = plan.scaled_dimensions();
            let segments: Vec<_> = plan.segments().collect();

            assert_eq!(segments.len() as u32, plan.num_segments());
            assert_eq!(scaled_height, 720);
            assert_eq!(segments.iter().map(|s| s.width).sum::<u32>(), scaled_width);

            for pair in segments.windows(2) {
                assert_eq!(pair[0].right(), pair[1].left);
                assert_eq!(pair[0].width, segment_width);
            }

            for segment in &segments {
                assert_eq!(segment.left, segment.index * segment_width);
                assert!(segment.width > 0 && segment.width <= segment_width);
                assert_eq!(segment.height, 720);
            }
        }
        Ok(())
    }

    #[test]
    fn metadata_mirrors_plan() -> anyhow::Result<()> {
        let metadata = SegmentPlan::new(3000, 1500, 1200, 720)?.metadata();

        assert_eq!(metadata.original_dimensions, [3000, 1500]);
        assert_eq!(metadata.scaled_dimensions, [1440, 720]);
        assert_eq!(metadata.game_height, 720);
        assert_eq!(metadata.num_segments, 2);

        let tail = &metadata.segments[1];
        assert_eq!(tail.filename, "segment_001.png");
        assert_eq!(tail.width, 240);
        assert_eq!(tail.x_offset, 1200);
        assert_eq!(tail.x_position, tail.x_offset);
        Ok(())
    }

    #[test]
    fn reject_empty_dimensions() {
        let error = SegmentPlan::new(0, 720, 1200, 720).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::SourceUnreadable);
        let error = SegmentPlan::new(1500, 0, 1200, 720).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::SourceUnreadable);

        let error = SegmentPlan::new(100, 100, 0, 720).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
        let error = SegmentPlan::new(100, 100, 1200, 0).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }
}

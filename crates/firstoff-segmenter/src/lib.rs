#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for segmentation runs.
pub const TRACING_TARGET_SEGMENTER: &str = "firstoff_segmenter::segmenter";

/// Tracing target for output directory and metadata I/O.
pub const TRACING_TARGET_OUTPUT: &str = "firstoff_segmenter::output";

mod error;
mod metadata;
mod options;
mod plan;
mod segmenter;

pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::metadata::{METADATA_FILE_NAME, SegmentInfo, SegmentMetadata, segment_file_name};
pub use crate::options::SegmentOptions;
pub use crate::plan::{SegmentBounds, SegmentPlan};
pub use crate::segmenter::{Segmenter, segment_background};

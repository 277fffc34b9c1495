//! Test support utilities for blur-qa.
//!
//! Provides mocks, synthetic image builders, and utilities for testing
//! the blur-qa analysis pipeline.
//!
//! # Example
//!
//! ```
//! use blur_qa_test_support::{MockImageLoader, SyntheticImageBuilder};
//!
//! let loader = MockImageLoader::new()
//!     .with_image("sharp.png", SyntheticImageBuilder::checkerboard(128, 128))
//!     .with_image("blurry.png", SyntheticImageBuilder::uniform_gray(128, 128, 5));
//! ```

mod builders;
mod mocks;

pub use builders::SyntheticImageBuilder;
pub use mocks::{MockImageLoader, MockImageSource, MockProgressSink, MockResultOutput};

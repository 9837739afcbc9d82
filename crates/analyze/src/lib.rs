//! Size breakdown of APK archives.
//!
//! Every entry of an archive's central directory is assigned to one
//! [`Bucket`] by its name, and its compressed size is added to that bucket.
//! Together with the archive's size on disk, an estimated download size and a
//! content hash, this forms a [`SizeRecord`] that can be compared across
//! builds.
//!
//! Records are plain data; rendering them is left to the caller.

mod analyze;
mod batch;
mod bucket;
pub mod error;
#[cfg(test)]
mod fixtures;
mod record;

pub use crate::analyze::{AnalyzeOptions, analyze};
pub use crate::batch::{analyze_all, discover};
pub use crate::bucket::{Bucket, classify};
pub use crate::record::{BucketSizes, SizeRecord};
pub use apkcompare_compress::{Compression, Scratch};

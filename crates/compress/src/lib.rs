//! Compression used for estimating over-the-wire transfer sizes.
//!
//! This crate wraps the compression library behind a small [`Compression`]
//! enum, providing:
//!
//! - **In-memory** compression ([`Compression::compress`])
//! - **Streaming** compression from any reader ([`Compression::compress_stream`])
//! - **Measurement** of the compressed size of a stream via a scoped scratch
//!   file ([`Compression::measure`])
//!
//! All compression uses the highest available level for each format; the
//! measured size models what one more layer of transport compression would
//! produce, not how fast it would be produced.

pub mod error;
mod measure;
mod ops;
mod util;

pub use crate::measure::Scratch;

/// A supported compression format.
///
/// Defaults to [`None`](Self::None) (uncompressed).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Compression {
    /// Uncompressed
    #[default]
    None,
    /// Gzip compression (.gz)
    Gzip,
}

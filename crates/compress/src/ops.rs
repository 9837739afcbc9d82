//! Compression Operations

use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use flate2::Compression as GzCompression;
use flate2::write::GzEncoder;
use std::io::{Read, Write};
use tracing::instrument;

const GZIP_LEVEL: GzCompression = GzCompression::best();

impl Compression {
    /// Compress a byte slice in memory.
    ///
    /// # Examples
    ///
    /// ```
    /// use apkcompare_compress::Compression;
    ///
    /// let data = [b'a'; 1024];
    /// let compressed = Compression::Gzip.compress(&data).unwrap();
    /// assert!(compressed.len() < data.len());
    /// ```
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::new();
        self.compress_stream(input, &mut output)?;
        Ok(output)
    }

    /// Compress from a reader to a writer, returning the number of bytes read.
    ///
    /// The encoder is finished before returning, so everything written to
    /// `writer` forms a complete stream. The writer itself is not flushed.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use apkcompare_compress::Compression;
    ///
    /// let input = Cursor::new(b"Hello, world!");
    /// let mut output = Vec::new();
    /// let bytes = Compression::Gzip.compress_stream(input, &mut output).unwrap();
    /// assert_eq!(bytes, 13);
    /// ```
    #[instrument(skip(reader, writer), fields(format = %self, input_size))]
    pub fn compress_stream<R: Read, W: Write>(&self, mut reader: R, mut writer: W) -> Result<u64> {
        let bytes = match self {
            Compression::None => std::io::copy(&mut reader, &mut writer).or_raise(|| ErrorKind::Io)?,
            Compression::Gzip => {
                let mut encoder = GzEncoder::new(writer, GZIP_LEVEL);
                let bytes = std::io::copy(&mut reader, &mut encoder).or_raise(|| ErrorKind::Io)?;
                encoder.finish().or_raise(|| ErrorKind::Io)?;
                bytes
            },
        };
        tracing::Span::current().record("input_size", bytes);
        Ok(bytes)
    }
}

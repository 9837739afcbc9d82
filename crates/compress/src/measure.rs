//! Compressed size measurement through a scoped scratch file.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;
use tracing::instrument;

/// Where the scratch file used by [`Compression::measure`] is created.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Scratch {
    /// The platform's temporary directory.
    #[default]
    System,
    /// A caller-chosen directory, which must already exist and be writable.
    Directory(PathBuf),
}
impl Scratch {
    fn create(&self) -> Result<NamedTempFile> {
        match self {
            Scratch::System => NamedTempFile::new(),
            Scratch::Directory(dir) => NamedTempFile::new_in(dir),
        }
        .or_raise(|| ErrorKind::Scratch)
    }
}
impl From<Option<PathBuf>> for Scratch {
    fn from(value: Option<PathBuf>) -> Self {
        value.map(Scratch::Directory).unwrap_or_default()
    }
}

impl Compression {
    /// Compress everything `reader` yields into a scratch file and return the
    /// size of the compressed output in bytes.
    ///
    /// The scratch file only lives for the duration of this call; it is
    /// removed when its guard drops, whether measurement succeeded or not.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    /// use apkcompare_compress::{Compression, Scratch};
    ///
    /// let data = vec![0u8; 4096];
    /// let size = Compression::None.measure(Cursor::new(&data), &Scratch::System).unwrap();
    /// assert_eq!(size, 4096);
    /// ```
    #[instrument(skip(reader), fields(format = %self, output_size))]
    pub fn measure<R: Read>(&self, reader: R, scratch: &Scratch) -> Result<u64> {
        let mut tmp = scratch.create()?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            self.compress_stream(reader, &mut writer)?;
            writer.flush().or_raise(|| ErrorKind::Io)?;
        }
        let size = tmp.as_file().metadata().or_raise(|| ErrorKind::Io)?.len();
        tracing::Span::current().record("output_size", size);
        tracing::trace!(scratch = %tmp.path().display(), "Measured compressed output");
        Ok(size)
    }
}

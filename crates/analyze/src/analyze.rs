use crate::error::{ErrorKind, Result};
use crate::{Bucket, BucketSizes, SizeRecord, classify};
use apkcompare_compress::{Compression, Scratch};
use exn::ResultExt;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use tracing::instrument;
use zip::ZipArchive;
use zip::result::ZipResult;

/// Explicit configuration for an analysis pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Archive extension (without the dot) used to pick files out of a directory.
    pub extension: String,
    /// Transport compression applied on top of the archive to estimate its
    /// download size. [`Compression::None`] makes the download size equal the
    /// raw size.
    pub download: Compression,
    /// Where the recompressed copy is written while it is being measured.
    pub scratch: Scratch,
}
impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            extension: "apk".to_string(),
            download: Compression::Gzip,
            scratch: Scratch::System,
        }
    }
}
impl AnalyzeOptions {
    /// Whether the file name of `path` ends with the configured extension.
    /// Case-sensitive, like the rest of the name matching.
    pub fn matches(&self, path: impl AsRef<Path>) -> bool {
        let suffix = format!(".{}", self.extension);
        path.as_ref()
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&suffix))
    }
}

/// Analyze a single archive.
///
/// Opening the archive and reading its central directory either succeeds
/// entirely or fails with [`ErrorKind::InvalidArchive`]; no partially filled
/// record is ever returned. Estimating the download size and hashing the file
/// degrade instead of failing: the former falls back to the raw size, the
/// latter to an empty hash.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn analyze(path: impl AsRef<Path>, options: &AnalyzeOptions) -> Result<SizeRecord> {
    let path = path.as_ref();
    let invalid = || ErrorKind::InvalidArchive(path.to_path_buf());
    let file = File::open(path).or_raise(invalid)?;
    let total = file.metadata().or_raise(invalid)?.len();
    let mut archive = ZipArchive::new(BufReader::new(file)).or_raise(invalid)?;
    let buckets = measure_entries(&mut archive).or_raise(invalid)?;
    drop(archive);

    let download = download_size(path, total, options);
    let hash = content_hash(path).unwrap_or_else(|err| {
        tracing::warn!(error = ?err, "Could not hash archive contents");
        String::new()
    });

    let record = SizeRecord {
        name: display_name(path),
        hash,
        buckets,
        total,
        download,
    };
    tracing::info!(
        name = %record.name,
        dex = record.buckets[Bucket::Dex],
        arsc = record.buckets[Bucket::ResourcesArsc],
        res = record.buckets[Bucket::Res],
        assets = record.buckets[Bucket::Assets],
        lib = record.buckets[Bucket::Lib],
        meta_inf = record.buckets[Bucket::MetaInf],
        others = record.buckets[Bucket::Others],
        total = record.total,
        download = record.download,
        "Archive analyzed"
    );
    Ok(record)
}

/// Sum the compressed size of every central-directory entry into its bucket.
/// Raw entry access, so nothing gets decompressed.
fn measure_entries<R: Read + Seek>(archive: &mut ZipArchive<R>) -> ZipResult<BucketSizes> {
    let mut buckets = BucketSizes::default();
    for index in 0..archive.len() {
        let entry = archive.by_index_raw(index)?;
        let bucket = classify(entry.name());
        tracing::trace!(entry = entry.name(), %bucket, compressed = entry.compressed_size(), "Classified entry");
        buckets.add(bucket, entry.compressed_size());
    }
    Ok(buckets)
}

fn download_size(path: &Path, total: u64, options: &AnalyzeOptions) -> u64 {
    match estimate_download(path, options) {
        Ok(size) => size,
        Err(err) => {
            tracing::debug!(error = ?err, fallback = total, "Using raw size as download size");
            total
        },
    }
}

// Gzip over the container bytes as stored; entries are not unpacked first.
fn estimate_download(path: &Path, options: &AnalyzeOptions) -> Result<u64> {
    let file = File::open(path).or_raise(|| ErrorKind::MeasurementDegraded)?;
    options
        .download
        .measure(BufReader::new(file), &options.scratch)
        .or_raise(|| ErrorKind::MeasurementDegraded)
}

fn content_hash(path: &Path) -> Result<String> {
    let file = File::open(path).or_raise(|| ErrorKind::Io)?;
    let mut hasher = blake3::Hasher::new();
    hasher.update_reader(file).or_raise(|| ErrorKind::Io)?;
    Ok(hasher.finalize().to_string())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{write_archive, write_garbage};
    use rstest::rstest;

    #[test]
    fn test_single_resources_arsc() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "app.apk", &[("resources.arsc", &[1u8; 321])]);
        let record = analyze(&path, &AnalyzeOptions::default()).unwrap();
        assert_eq!(record.buckets[Bucket::ResourcesArsc], 321);
        for bucket in Bucket::ALL.into_iter().filter(|b| *b != Bucket::ResourcesArsc) {
            assert_eq!(record.buckets[bucket], 0, "bucket {bucket} should be empty");
        }
    }

    #[test]
    fn test_dex_files_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "app.apk", &[("classes.dex", &[0u8; 1000]), ("classes2.dex", &[0u8; 234])]);
        let record = analyze(&path, &AnalyzeOptions::default()).unwrap();
        assert_eq!(record.buckets[Bucket::Dex], 1234);
    }

    #[test]
    fn test_typical_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(
            dir.path(),
            "app.apk",
            &[
                ("AndroidManifest.xml", &[0u8; 11]),
                ("classes.dex", &[0u8; 13]),
                ("resources.arsc", &[0u8; 17]),
                ("res/layout/main.xml", &[0u8; 19]),
                ("res/drawable/icon.png", &[0u8; 23]),
                ("assets/data.bin", &[0u8; 29]),
                ("lib/arm64-v8a/libfoo.so", &[0u8; 31]),
                ("META-INF/CERT.SF", &[0u8; 37]),
                ("weird/classes.txt", &[0u8; 41]),
            ],
        );
        let record = analyze(&path, &AnalyzeOptions::default()).unwrap();
        assert_eq!(record.name, "app.apk");
        assert_eq!(record.buckets[Bucket::Dex], 13 + 41);
        assert_eq!(record.buckets[Bucket::ResourcesArsc], 17);
        assert_eq!(record.buckets[Bucket::Res], 19 + 23);
        assert_eq!(record.buckets[Bucket::Assets], 29);
        assert_eq!(record.buckets[Bucket::Lib], 31);
        assert_eq!(record.buckets[Bucket::MetaInf], 37);
        assert_eq!(record.buckets[Bucket::Others], 11);
        // Every entry lands in exactly one bucket; container overhead in none.
        assert_eq!(record.buckets.sum(), 11 + 13 + 17 + 19 + 23 + 29 + 31 + 37 + 41);
        assert!(record.buckets.sum() < record.total);
        assert_eq!(record.total, std::fs::metadata(&path).unwrap().len());
    }

    #[test]
    fn test_compressed_sizes_are_counted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deflated.apk");
        {
            use std::io::Write;
            let mut writer = zip::ZipWriter::new(File::create(&path).unwrap());
            let options =
                zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
            writer.start_file("assets/zeros.bin", options).unwrap();
            writer.write_all(&[0u8; 100_000]).unwrap();
            writer.finish().unwrap();
        }
        let record = analyze(&path, &AnalyzeOptions::default()).unwrap();
        assert!(record.buckets[Bucket::Assets] > 0);
        assert!(record.buckets[Bucket::Assets] < 100_000);
    }

    #[test]
    fn test_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "empty.apk", &[]);
        let record = analyze(&path, &AnalyzeOptions::default()).unwrap();
        assert_eq!(record.buckets, BucketSizes::default());
        assert!(record.total > 0);
    }

    #[test]
    fn test_hash_is_deterministic_and_name_independent() {
        let dir = tempfile::tempdir().unwrap();
        let first = write_archive(dir.path(), "first.apk", &[("classes.dex", b"dex\n035")]);
        let second = dir.path().join("second.apk");
        std::fs::copy(&first, &second).unwrap();
        let options = AnalyzeOptions::default();

        let a = analyze(&first, &options).unwrap();
        let b = analyze(&first, &options).unwrap();
        let c = analyze(&second, &options).unwrap();
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.hash, c.hash);
        assert_ne!(a.name, c.name);
        assert_eq!(a.hash.len(), 64);
        assert_eq!(a.hash, blake3::hash(&std::fs::read(&first).unwrap()).to_string());
    }

    #[test]
    fn test_download_size_is_gzip_of_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "app.apk", &[("assets/zeros.bin", &[0u8; 64 * 1024])]);
        let record = analyze(&path, &AnalyzeOptions::default()).unwrap();
        // Gzip over a mostly-zero stored archive is far smaller than the archive.
        assert!(record.download > 0);
        assert!(record.download < record.total / 10);
    }

    #[test]
    fn test_download_size_falls_back_to_total() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "app.apk", &[("assets/zeros.bin", &[0u8; 4096])]);
        let options = AnalyzeOptions {
            scratch: Scratch::Directory(dir.path().join("no-such-directory")),
            ..AnalyzeOptions::default()
        };
        let record = analyze(&path, &options).unwrap();
        assert_eq!(record.download, record.total);
        assert!(!record.hash.is_empty());
    }

    #[test]
    fn test_download_without_compression() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_archive(dir.path(), "app.apk", &[("lib/x86/libfoo.so", &[9u8; 500])]);
        let options = AnalyzeOptions { download: Compression::None, ..AnalyzeOptions::default() };
        let record = analyze(&path, &options).unwrap();
        assert_eq!(record.download, record.total);
    }

    #[test]
    fn test_scratch_file_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();
        let path = write_archive(dir.path(), "app.apk", &[("classes.dex", &[1u8; 10])]);
        let options = AnalyzeOptions {
            scratch: Scratch::Directory(scratch.clone()),
            ..AnalyzeOptions::default()
        };
        analyze(&path, &options).unwrap();
        assert_eq!(std::fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[test]
    fn test_invalid_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_garbage(dir.path(), "broken.apk");
        let err = analyze(&path, &AnalyzeOptions::default()).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidArchive(path));
    }

    #[test]
    fn test_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.apk");
        let err = analyze(&path, &AnalyzeOptions::default()).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidArchive(path));
    }

    #[rstest]
    #[case("apk", "app.apk", true)]
    #[case("apk", "app_v1.0.0_release.apk", true)]
    #[case("apk", "app.APK", false)]
    #[case("apk", "app.apk.idsig", false)]
    #[case("apk", "apk", false)]
    #[case("aab", "bundle.aab", true)]
    fn test_options_matches(#[case] extension: &str, #[case] name: &str, #[case] expected: bool) {
        let options = AnalyzeOptions { extension: extension.to_string(), ..AnalyzeOptions::default() };
        assert_eq!(options.matches(Path::new("/some/dir").join(name)), expected);
    }
}

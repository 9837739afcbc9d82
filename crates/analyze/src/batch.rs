use crate::error::{ErrorKind, Result};
use crate::{AnalyzeOptions, SizeRecord, analyze};
use exn::ResultExt;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use tracing::instrument;

fn stat(input: &Path) -> Result<Metadata> {
    fs::metadata(input).or_raise(|| ErrorKind::BatchInput(input.to_path_buf()))
}

/// A lone file is only analyzed if it carries the archive extension.
fn single(input: &Path, options: &AnalyzeOptions) -> Option<PathBuf> {
    if options.matches(input) {
        return Some(input.to_path_buf());
    }
    tracing::warn!(
        path = %input.display(),
        extension = %options.extension,
        "Input file does not have the archive extension; nothing to analyze"
    );
    None
}

/// Immediate children of `dir` with the archive extension, in lexical order.
fn list(dir: &Path, options: &AnalyzeOptions) -> Result<Vec<PathBuf>> {
    let unreadable = || ErrorKind::BatchInput(dir.to_path_buf());
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).or_raise(unreadable)? {
        let path = entry.or_raise(unreadable)?.path();
        if options.matches(&path) && !path.is_dir() {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// What an input path expands to.
enum Plan {
    /// A lone file; its failure is the batch's failure.
    Single(Option<PathBuf>),
    /// The archives of a directory; failures are skipped.
    Directory(Vec<PathBuf>),
}
impl Plan {
    fn new(input: &Path, options: &AnalyzeOptions) -> Result<Self> {
        if stat(input)?.is_dir() {
            Ok(Plan::Directory(list(input, options)?))
        } else {
            Ok(Plan::Single(single(input, options)))
        }
    }

    fn into_paths(self) -> Vec<PathBuf> {
        match self {
            Plan::Single(path) => path.into_iter().collect(),
            Plan::Directory(paths) => paths,
        }
    }
}

/// The archives [`analyze_all`] would analyze for `input`, in the order it
/// would analyze them.
pub fn discover(input: impl AsRef<Path>, options: &AnalyzeOptions) -> Result<Vec<PathBuf>> {
    Ok(Plan::new(input.as_ref(), options)?.into_paths())
}

/// Analyze a single archive, or every archive directly inside a directory.
///
/// - For a file, a failed analysis is returned as the error.
/// - For a directory, archives that fail analysis are logged and left out of
///   the result; the rest keep their lexical order.
///
/// Only a missing or unlistable `input` fails the whole batch
/// ([`ErrorKind::BatchInput`]).
#[instrument(skip_all, fields(input = %input.as_ref().display()))]
pub fn analyze_all(input: impl AsRef<Path>, options: &AnalyzeOptions) -> Result<Vec<SizeRecord>> {
    let paths = match Plan::new(input.as_ref(), options)? {
        Plan::Single(path) => return path.map(|path| analyze(path, options)).into_iter().collect(),
        Plan::Directory(paths) => paths,
    };
    tracing::debug!(count = paths.len(), "Discovered archives");
    let mut records = Vec::with_capacity(paths.len());
    for path in paths {
        match analyze(&path, options) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(path = %path.display(), error = ?err, "Skipping archive"),
        }
    }
    Ok(records)
}

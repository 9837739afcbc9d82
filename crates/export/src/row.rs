//! Tabular projection of a [`SizeRecord`].

use crate::Units;
use apkcompare_analyze::{Bucket, SizeRecord};
use regex::Regex;
use std::sync::LazyLock;

// `58client_v8.3.1_58585858_20180404_13.54_release.apk` => `v8.3.1`
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_([v.0-9]+)_").unwrap());

/// The version-like token between underscores in an archive name, or the
/// whole name when there is none.
///
/// ```
/// use apkcompare_export::version_label;
///
/// assert_eq!(version_label("app_v1.0.0_release.apk"), "v1.0.0");
/// assert_eq!(version_label("nightly.apk"), "nightly.apk");
/// ```
#[must_use]
pub fn version_label(name: &str) -> &str {
    VERSION_REGEX
        .captures(name)
        .and_then(|captures| captures.get(1))
        .map_or(name, |version| version.as_str())
}

#[derive(Clone, Copy, Debug)]
enum Column {
    Download,
    Raw,
    Component(Bucket),
}
impl Column {
    fn header(&self) -> &'static str {
        match self {
            Column::Download => "download",
            Column::Raw => "raw",
            Column::Component(bucket) => bucket.label(),
        }
    }

    fn value(&self, record: &SizeRecord) -> u64 {
        match self {
            Column::Download => record.download,
            Column::Raw => record.total,
            Column::Component(bucket) => record.buckets[*bucket],
        }
    }
}

const SIZE_COLUMN_COUNT: usize = 9;
const SIZE_COLUMNS: [Column; SIZE_COLUMN_COUNT] = [
    Column::Download,
    Column::Raw,
    Column::Component(Bucket::Dex),
    Column::Component(Bucket::ResourcesArsc),
    Column::Component(Bucket::Assets),
    Column::Component(Bucket::Res),
    Column::Component(Bucket::Lib),
    Column::Component(Bucket::MetaInf),
    Column::Component(Bucket::Others),
];

/// Column headers, in the order [`Row`] lays out its cells.
pub fn headers() -> impl Iterator<Item = &'static str> {
    ["Version", "Hash"].into_iter().chain(SIZE_COLUMNS.into_iter().map(|column| column.header()))
}

/// One line of a tabular report.
#[derive(Clone, Debug, PartialEq)]
pub struct Row<'a> {
    pub version: &'a str,
    pub hash: &'a str,
    /// Download, raw, then each component, converted to the requested units.
    pub sizes: [f64; SIZE_COLUMN_COUNT],
}
impl<'a> Row<'a> {
    pub fn new(record: &'a SizeRecord, units: Units) -> Self {
        Self {
            version: version_label(&record.name),
            hash: &record.hash,
            sizes: SIZE_COLUMNS.map(|column| units.convert(column.value(record))),
        }
    }
}

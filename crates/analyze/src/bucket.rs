//! Component buckets and the ordered name rules that assign entries to them.

use regex::Regex;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::LazyLock;

/// A semantic group of APK entries, in report order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    /// `classes.dex`, `classes2.dex`, ...
    Dex,
    /// The compiled resource table.
    ResourcesArsc,
    /// `res/*`
    Res,
    /// `assets/*`
    Assets,
    /// Native libraries, `lib/*`
    Lib,
    /// Signatures and manifests, `META-INF/*`
    MetaInf,
    /// Anything else, usually files bundled by third-party SDKs.
    Others,
}
impl Bucket {
    pub const COUNT: usize = 7;
    pub const ALL: [Bucket; Self::COUNT] = [
        Bucket::Dex,
        Bucket::ResourcesArsc,
        Bucket::Res,
        Bucket::Assets,
        Bucket::Lib,
        Bucket::MetaInf,
        Bucket::Others,
    ];

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// Stable machine-readable name, used as the serialized field name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::Dex => "dex",
            Bucket::ResourcesArsc => "resourcesArsc",
            Bucket::Res => "res",
            Bucket::Assets => "assets",
            Bucket::Lib => "lib",
            Bucket::MetaInf => "metaInf",
            Bucket::Others => "others",
        }
    }

    /// Short column header for tabular reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Bucket::Dex => "dex",
            Bucket::ResourcesArsc => "arsc",
            Bucket::Res => "res",
            Bucket::Assets => "assets",
            Bucket::Lib => "lib",
            Bucket::MetaInf => "META-INF",
            Bucket::Others => "others",
        }
    }
}
impl Display for Bucket {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
enum Matcher {
    Exact(&'static str),
    Contains(&'static str),
    Pattern(&'static LazyLock<Regex>),
}
impl Matcher {
    fn matches(&self, name: &str) -> bool {
        match self {
            Matcher::Exact(needle) => name == *needle,
            Matcher::Contains(needle) => name.contains(needle),
            Matcher::Pattern(regex) => regex.is_match(name),
        }
    }
}

#[derive(Debug)]
struct Rule {
    matcher: Matcher,
    bucket: Bucket,
}

// `classes.dex`, `classes2.dex`, `classes15.dex`, ...
static DEX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"classes\d*\.").unwrap());

// Evaluated top to bottom, first match wins. Matching is purely on the entry
// name: `weird/classes.txt` is counted as dex, `lib/res/x` as res.
static RULES: &[Rule] = &[
    Rule { matcher: Matcher::Exact("resources.arsc"), bucket: Bucket::ResourcesArsc },
    Rule { matcher: Matcher::Pattern(&DEX_REGEX), bucket: Bucket::Dex },
    Rule { matcher: Matcher::Contains("res/"), bucket: Bucket::Res },
    Rule { matcher: Matcher::Contains("assets/"), bucket: Bucket::Assets },
    Rule { matcher: Matcher::Contains("lib/"), bucket: Bucket::Lib },
    Rule { matcher: Matcher::Contains("META-INF/"), bucket: Bucket::MetaInf },
];

/// Assign an archive entry to exactly one [`Bucket`] by its name.
///
/// ```
/// use apkcompare_analyze::{Bucket, classify};
///
/// assert_eq!(classify("classes2.dex"), Bucket::Dex);
/// assert_eq!(classify("AndroidManifest.xml"), Bucket::Others);
/// ```
#[must_use]
pub fn classify(name: &str) -> Bucket {
    RULES.iter().find(|rule| rule.matcher.matches(name)).map_or(Bucket::Others, |rule| rule.bucket)
}

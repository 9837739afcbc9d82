use crate::Config;
use crate::error::{ErrorKind, Result};
use apkcompare_analyze::{AnalyzeOptions, Compression, Scratch};
use apkcompare_export::{Format, Units};
use directories::BaseDirs;
use std::path::{Component, Path, PathBuf};

/// A [`Config`] with every path made concrete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolved {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Format,
    pub units: Units,
    pub verbose: bool,
    pub options: AnalyzeOptions,
}

impl Config {
    /// Expand `~`, anchor a relative output next to the input, and append the
    /// format's extension to the output when it has none.
    ///
    /// ```
    /// # use apkcompare_config::Config;
    /// let config = Config { path: "/builds".into(), ..Config::default() };
    /// let resolved = config.resolve().unwrap();
    /// assert_eq!(resolved.output, std::path::Path::new("/builds/output.xlsx"));
    /// ```
    pub fn resolve(&self) -> Result<Resolved> {
        let home = BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        self.resolve_with_home(home.as_deref())
    }

    pub(crate) fn resolve_with_home(&self, home: Option<&Path>) -> Result<Resolved> {
        let input = expand_home(&self.path, home)?;
        let mut output = expand_home(&self.output, home)?;
        if output.is_relative() {
            output = report_dir(&input).join(output);
        }
        if output.extension().is_none() {
            output.set_extension(self.format.extension());
        }
        let scratch = self.scratch.as_deref().map(|dir| expand_home(dir, home)).transpose()?;

        Ok(Resolved {
            input,
            output,
            format: self.format,
            units: Units::from_readable(self.readable),
            verbose: self.verbose,
            options: AnalyzeOptions {
                extension: self.extension.clone(),
                download: Compression::Gzip,
                scratch: Scratch::from(scratch),
            },
        })
    }
}

/// Reports for a directory land inside it; for a single archive, beside it.
fn report_dir(input: &Path) -> &Path {
    if input.is_file() {
        input.parent().unwrap_or(input)
    } else {
        input
    }
}

fn expand_home(path: &Path, home: Option<&Path>) -> Result<PathBuf> {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => {
            let Some(home) = home else {
                exn::bail!(ErrorKind::HomeDir);
            };
            Ok(home.join(components.as_path()))
        },
        _ => Ok(path.to_path_buf()),
    }
}

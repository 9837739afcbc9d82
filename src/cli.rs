use apkcompare_config::{ConfigFile, Overrides};
use apkcompare_export::Format;
use clap::Parser;
use std::path::PathBuf;

/// Compare the size breakdown of APK builds.
///
/// Every option can also be set in `apkcompare.toml` or through `APKCOMPARE_*`
/// environment variables; flags given here win.
#[derive(Debug, Parser)]
#[command(name = "apkcompare", version, about)]
pub struct Cli {
    /// An APK, or a directory of APKs (not searched recursively)
    #[arg(short, long, value_name = "PATH")]
    pub path: Option<PathBuf>,
    /// Report file; relative paths are placed next to the input
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<Format>,
    /// Sizes in megabytes instead of bytes (xlsx only)
    #[arg(long, value_name = "BOOL", num_args = 0..=1, default_missing_value = "true")]
    pub readable: Option<bool>,
    /// Debug logging
    #[arg(short, long, visible_alias = "log")]
    pub verbose: bool,
    /// Archive extension to look for, without the dot
    #[arg(long, value_name = "EXT")]
    pub extension: Option<String>,
    /// Directory for the temporary file used to estimate download sizes
    #[arg(long, value_name = "DIR")]
    pub scratch: Option<PathBuf>,
    /// Configuration file to use instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
    /// Ignore configuration files
    #[arg(long, conflicts_with = "config")]
    pub no_config: bool,
}

impl Cli {
    pub fn config_file(&self) -> ConfigFile {
        match (&self.config, self.no_config) {
            (Some(path), _) => ConfigFile::Explicit(path.clone()),
            (None, true) => ConfigFile::Skip,
            (None, false) => ConfigFile::Discover,
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            path: self.path.clone(),
            output: self.output.clone(),
            format: self.format,
            readable: self.readable,
            // A flag can only switch debug logging on.
            verbose: self.verbose.then_some(true),
            extension: self.extension.clone(),
            scratch: self.scratch.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("apkcompare").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_flags_override_nothing() {
        let cli = parse(&[]);
        assert_eq!(cli.overrides(), Overrides::default());
        assert_eq!(cli.config_file(), ConfigFile::Discover);
    }

    #[test]
    fn test_overrides() {
        let cli = parse(&["-p", "~/builds", "-o", "sizes", "--format", "json", "--extension", "aab", "-v"]);
        assert_eq!(
            cli.overrides(),
            Overrides {
                path: Some(PathBuf::from("~/builds")),
                output: Some(PathBuf::from("sizes")),
                format: Some(Format::Json),
                verbose: Some(true),
                extension: Some("aab".to_string()),
                ..Overrides::default()
            }
        );
    }

    #[rstest]
    #[case(&["--readable"], Some(true))]
    #[case(&["--readable", "true"], Some(true))]
    #[case(&["--readable", "false"], Some(false))]
    #[case(&[], None)]
    fn test_readable(#[case] args: &[&str], #[case] expected: Option<bool>) {
        assert_eq!(parse(args).overrides().readable, expected);
    }

    #[rstest]
    #[case(&["--log"])]
    #[case(&["--verbose"])]
    #[case(&["-v"])]
    fn test_verbose_aliases(#[case] args: &[&str]) {
        assert_eq!(parse(args).overrides().verbose, Some(true));
    }

    #[rstest]
    #[case(&["-c", "custom.toml"], ConfigFile::Explicit(PathBuf::from("custom.toml")))]
    #[case(&["--no-config"], ConfigFile::Skip)]
    fn test_config_file(#[case] args: &[&str], #[case] expected: ConfigFile) {
        assert_eq!(parse(args).config_file(), expected);
    }

    #[test]
    fn test_invalid_format() {
        let args = ["apkcompare", "--format", "csv"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}

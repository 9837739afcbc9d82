mod cli;
mod error;

use crate::cli::Cli;
use crate::error::{ErrorKind, Result};
use apkcompare_analyze::analyze_all;
use apkcompare_config::Config;
use apkcompare_export::export;
use clap::Parser;
use exn::ResultExt;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::load(&cli.config_file(), &cli.overrides());
    init_logging(config.as_ref().map_or(cli.verbose, |config| config.verbose));

    match config.or_raise(|| ErrorKind::Config).and_then(run) {
        Ok(count) => {
            tracing::info!(archives = count, "Analyzing completed");
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

/// `RUST_LOG` takes precedence over the verbosity setting.
fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::INFO };
    let filter = EnvFilter::builder().with_default_directive(level.into()).from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn run(config: Config) -> Result<usize> {
    let resolved = config.resolve().or_raise(|| ErrorKind::Config)?;
    tracing::debug!(
        input = %resolved.input.display(),
        output = %resolved.output.display(),
        format = %resolved.format,
        units = ?resolved.units,
        "Configuration resolved"
    );

    let records = analyze_all(&resolved.input, &resolved.options).or_raise(|| ErrorKind::Analyze)?;
    if records.is_empty() {
        exn::bail!(ErrorKind::NothingAnalyzed(resolved.input));
    }
    export(&records, resolved.format, resolved.units, &resolved.output).or_raise(|| ErrorKind::Export)?;
    tracing::info!(output = %resolved.output.display(), "Report written");
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use apkcompare_export::Format;
    use std::io::Write;
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &std::path::Path) {
        let mut zip = ZipWriter::new(std::fs::File::create(path).unwrap());
        zip.start_file("classes.dex", SimpleFileOptions::default()).unwrap();
        zip.write_all(&[7u8; 512]).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn test_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(&dir.path().join("app_v1.0.0_release.apk"));
        write_archive(&dir.path().join("app_v1.1.0_release.apk"));
        let config = Config { path: dir.path().to_path_buf(), format: Format::Json, ..Config::default() };

        assert_eq!(run(config).unwrap(), 2);
        let report: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.path().join("output.json")).unwrap()).unwrap();
        assert_eq!(report[0]["name"], "app_v1.0.0_release.apk");
        assert_eq!(report[1]["name"], "app_v1.1.0_release.apk");
    }

    #[test]
    fn test_run_without_archives_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"not an apk").unwrap();
        let config = Config { path: dir.path().to_path_buf(), ..Config::default() };

        let err = run(config).unwrap_err();
        assert_eq!(*err, ErrorKind::NothingAnalyzed(dir.path().to_path_buf()));
        assert!(!dir.path().join("output.xlsx").exists());
    }

    #[test]
    fn test_run_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { path: dir.path().join("missing"), ..Config::default() };
        assert_eq!(*run(config).unwrap_err(), ErrorKind::Analyze);
    }
}

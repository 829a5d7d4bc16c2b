//! # transtat
//!
//! A CLI tool for surveying translation completeness across distribution
//! packages.
//!
//! ## Overview
//!
//! transtat is built on top of transtatlib and walks a package list: for
//! each name it reuses or downloads the package's source tree (via
//! `apt source`), runs `deepin-translation-utils stats` over it, and prints
//! the statistics lines for the surveyed languages, grouped per package.
//! A package that fails to download or measure gets an error line in its
//! block; the rest of the list is still processed.
//!
//! ## Features
//!
//! - **Directory-as-cache**: Already-downloaded sources are never re-fetched
//! - **Tool version probing**: New enough `deepin-translation-utils` is
//!   asked to restrict languages itself; older versions run unrestricted
//! - **Multiple output formats**: Text blocks (default), JSON
//!
//! ## Usage
//!
//! ```bash
//! # Survey the packages listed in packages.txt
//! transtat packages.txt
//!
//! # Cache sources elsewhere and survey different languages
//! transtat packages.txt --source-dir /var/cache/pkg-sources -l zh_CN,zh_TW
//!
//! # Machine-readable output
//! transtat packages.txt --json
//! ```

use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use transtatlib::{
    load_package_list, probe_capability, run_survey_with_capability, AptSource, LanguageSet,
    SurveyOptions, TranslationUtils, DEFAULT_LANGUAGES, DEFAULT_SOURCE_DIR,
    MIN_LANG_FILTER_VERSION,
};

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("transtat")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Survey translation completeness across distribution packages")
        .arg(
            Arg::new("package-file")
                .help("File listing one package name per line (# starts a comment)")
                .required(true),
        )
        .arg(
            Arg::new("source-dir")
                .short('s')
                .long("source-dir")
                .default_value(DEFAULT_SOURCE_DIR)
                .help("Directory where downloaded source trees are cached"),
        )
        .arg(
            Arg::new("languages")
                .short('l')
                .long("languages")
                .default_value(DEFAULT_LANGUAGES)
                .help("Comma-separated language codes to keep in the output"),
        )
        .arg(
            Arg::new("fetch-command")
                .long("fetch-command")
                .default_value("apt")
                .help("Program used to download sources (invoked as '<program> source <package>')"),
        )
        .arg(
            Arg::new("stats-command")
                .long("stats-command")
                .default_value("deepin-translation-utils")
                .help("Program used to compute translation statistics"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Emit the report as JSON instead of text blocks"),
        )
}

fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let package_file = matches
        .get_one::<String>("package-file")
        .context("package file is required")?;
    let source_dir = matches
        .get_one::<String>("source-dir")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_SOURCE_DIR);
    let languages_arg = matches
        .get_one::<String>("languages")
        .map(|s| s.as_str())
        .unwrap_or(DEFAULT_LANGUAGES);
    let fetch_command = matches
        .get_one::<String>("fetch-command")
        .map(|s| s.as_str())
        .unwrap_or("apt");
    let stats_command = matches
        .get_one::<String>("stats-command")
        .map(|s| s.as_str())
        .unwrap_or("deepin-translation-utils");

    let languages = LanguageSet::parse(languages_arg)?;

    let packages = load_package_list(package_file)?;
    if packages.is_empty() {
        anyhow::bail!("package list '{package_file}' contains no package names");
    }

    let options = SurveyOptions::new()
        .source_dir(source_dir)
        .languages(languages);
    let fetcher = AptSource::with_program(fetch_command);
    let tool = TranslationUtils::with_program(stats_command);

    let capability = probe_capability(&tool);
    if !capability.lang_filter {
        let (major, minor, patch) = MIN_LANG_FILTER_VERSION;
        eprintln!(
            "Warning: statistics tool cannot restrict languages \
             (needs {major}.{minor}.{patch} or newer); filtering locally only"
        );
    }

    let report = run_survey_with_capability(&packages, &options, &fetcher, &tool, capability)?;

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

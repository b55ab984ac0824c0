use crate::core::confirmation::{Confirmation, confirm};
use crate::core::matcher::{Matcher, cross_names};
use crate::core::report::{ReportLine, build_report, not_found_lines};
use crate::domain::models::{DeletionOutcome, RemoveConfig, RemoveMode, RunOutcome};
use crate::infra::file_system::{remove_matched_files, scan_tree};
use crate::infra::logger::setup_logger;
use crate::infra::output::ConsoleWriter;
use clap::{CommandFactory, Parser};
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "remove-files", version)]
#[command(about = "Delete files under a directory by exact name or by suffix", long_about = None)]
pub struct Cli {
    /// Directory to scan
    #[arg(short, long, default_value = ".")]
    pub directory: PathBuf,

    /// Exact file names to delete, without confirmation
    #[arg(short = 'f', long = "file", num_args = 1.., value_name = "NAME")]
    pub files: Vec<String>,

    /// File name suffixes to list for confirmation, e.g. .log .tmp
    #[arg(short = 's', long = "suffix", num_args = 1.., value_name = "SUFFIX")]
    pub suffixes: Vec<String>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// `None` when neither names nor suffixes were given. Blank values
    /// count as not given.
    pub fn mode(&self) -> Option<RemoveMode> {
        let files = non_blank(&self.files);
        let suffixes = non_blank(&self.suffixes);

        match (files.is_empty(), suffixes.is_empty()) {
            (false, false) => Some(RemoveMode::Names(cross_names(&files, &suffixes))),
            (false, true) => Some(RemoveMode::Names(files)),
            (true, false) => Some(RemoveMode::Suffixes(suffixes)),
            (true, true) => None,
        }
    }
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .filter(|value| !value.trim().is_empty())
        .cloned()
        .collect()
}

pub fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    setup_logger(cli.verbose)?;

    let Some(mode) = cli.mode() else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = RemoveConfig {
        root_path: cli.directory.clone(),
        mode,
        self_path: current_exe_path(),
    };
    debug!(
        "Command parameters: directory={}, mode={:?}, self_path={:?}",
        config.root_path.display(),
        config.mode,
        config.self_path
    );

    let stdin = io::stdin();
    let mut writer = ConsoleWriter::stdout();
    let outcome = execute(&config, &mut stdin.lock(), &mut writer)?;
    Ok(outcome.exit_code())
}

fn current_exe_path() -> Option<PathBuf> {
    std::env::current_exe()
        .and_then(fs::canonicalize)
        .ok()
}

pub fn execute<R: BufRead, W: Write>(
    config: &RemoveConfig,
    input: &mut R,
    writer: &mut ConsoleWriter<W>,
) -> anyhow::Result<RunOutcome> {
    let self_path = config.self_path.as_deref();

    match &config.mode {
        RemoveMode::Names(names) => {
            info!("Starting name delete");
            remove_by_name(&config.root_path, names, self_path, writer)?;
            Ok(RunOutcome::Completed)
        }
        RemoveMode::Suffixes(suffixes) => {
            info!("Starting suffix scan");
            remove_by_suffix(&config.root_path, suffixes, self_path, input, writer)
        }
    }
}

fn remove_by_name<W: Write>(
    root: &Path,
    names: &[String],
    self_path: Option<&Path>,
    writer: &mut ConsoleWriter<W>,
) -> anyhow::Result<DeletionOutcome> {
    let matcher = Matcher::new(names, &[], self_path);
    let index = scan_tree(root, &matcher)?;
    let outcome = remove_matched_files(&index);

    let lines = build_report(
        &matcher.requested_keys(),
        matcher.protected_names(),
        &outcome,
    );
    writer.write_lines(&lines)?;
    Ok(outcome)
}

fn remove_by_suffix<R: BufRead, W: Write>(
    root: &Path,
    suffixes: &[String],
    self_path: Option<&Path>,
    input: &mut R,
    writer: &mut ConsoleWriter<W>,
) -> anyhow::Result<RunOutcome> {
    let matcher = Matcher::new(&[], suffixes, self_path);
    info!("Scanning for suffixes {:?}", matcher.suffixes());
    let index = scan_tree(root, &matcher)?;

    let missing = not_found_lines(matcher.requested_keys(), |key| {
        index.get(key).is_some_and(|files| !files.is_empty())
    });
    writer.write_lines(&missing)?;

    if index.is_empty() {
        info!("No files found with the specified suffixes");
        return Ok(RunOutcome::Completed);
    }
    let candidates = index.candidates();
    if !missing.is_empty() {
        writer.write_line(&ReportLine::Separator)?;
    }

    let confirmation = confirm(&candidates, input, writer.inner_mut())?;
    writer.message("")?;

    match confirmation {
        Confirmation::Rejected(e) => {
            writer.message(&format!(
                "Invalid selection ({}): expected comma-separated numbers such as 1,3,4. Nothing was deleted.",
                e
            ))?;
            Ok(RunOutcome::Rejected)
        }
        Confirmation::Confirmed(names) if names.is_empty() => {
            writer.message("No valid file numbers selected. Nothing was deleted.")?;
            Ok(RunOutcome::Completed)
        }
        Confirmation::Confirmed(names) => {
            remove_by_name(root, &names, self_path, writer)?;
            Ok(RunOutcome::Completed)
        }
    }
}

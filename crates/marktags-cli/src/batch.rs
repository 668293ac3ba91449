//! The batch loop: scan the vault, transform each document, and write,
//! back up, or diff as requested. One bad file is reported and skipped;
//! it never aborts the rest of the run.

use anyhow::{Result, ensure};
use diffy::create_patch;
use marktags_config::Settings;
use marktags_engine::{Mode, Order, io, transform};
use relative_path::RelativePath;
use std::path::PathBuf;

/// Validated per-run options, built from [`Settings`] after the mode and
/// order strings have been parsed into engine types.
#[derive(Debug, Clone)]
pub struct Options {
    pub path: PathBuf,
    pub tags: Vec<String>,
    pub mode: Mode,
    pub recursive: bool,
    pub dry_run: bool,
    pub backup: bool,
    pub order: Order,
    pub include_glob: String,
    pub backup_dir: PathBuf,
}

impl Options {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        ensure!(
            !settings.tags.is_empty(),
            "at least one tag is required (use --tag)"
        );
        Ok(Self {
            path: settings.path.clone(),
            tags: settings.tags.clone(),
            mode: settings.mode.parse::<Mode>()?,
            recursive: settings.recursive,
            dry_run: settings.dry_run,
            backup: settings.backup,
            order: settings.order.parse::<Order>()?,
            include_glob: settings.include_glob.clone(),
            backup_dir: settings.backup_dir.clone(),
        })
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    pub processed: usize,
    pub changed: usize,
    pub failed: usize,
    pub backups: usize,
}

enum FileOutcome {
    Unchanged,
    Changed { backed_up: bool },
}

/// Process every matching document under the vault root.
///
/// Setup problems (missing vault, bad glob) are errors; per-file problems
/// are reported with the file's path and counted in `failed`.
pub fn run(opts: &Options) -> Result<Summary> {
    let files = io::scan_vault(&opts.path, opts.recursive, &opts.include_glob)?;

    let mut summary = Summary::default();
    for relative_path in &files {
        summary.processed += 1;
        match process_file(relative_path, opts) {
            Ok(FileOutcome::Unchanged) => {}
            Ok(FileOutcome::Changed { backed_up }) => {
                summary.changed += 1;
                if backed_up {
                    summary.backups += 1;
                }
            }
            Err(err) => {
                summary.failed += 1;
                eprintln!("Skipped {relative_path}: {err:#}");
            }
        }
    }

    if summary.changed > 0 {
        println!(
            "Processed {} file(s). Changed {}.",
            summary.processed, summary.changed
        );
    } else {
        println!("Processed {} file(s). No changes.", summary.processed);
    }
    if summary.backups > 0 {
        println!("Backups saved under: {}", opts.backup_dir.display());
    }

    Ok(summary)
}

fn process_file(relative_path: &RelativePath, opts: &Options) -> Result<FileOutcome> {
    let original = io::read_file(relative_path, &opts.path)?;
    let updated = transform(&original, &opts.tags, opts.mode, opts.order)?;

    if updated == original {
        return Ok(FileOutcome::Unchanged);
    }

    if opts.dry_run {
        println!("[dry-run] would modify: {relative_path}");
        print!("{}", create_patch(&original, &updated));
        return Ok(FileOutcome::Changed { backed_up: false });
    }

    let mut backed_up = false;
    if opts.backup {
        io::backup_file(relative_path, &opts.path, &opts.backup_dir)?;
        backed_up = true;
    }
    io::write_file(relative_path, &opts.path, &updated)?;
    println!("Modified: {relative_path}");
    Ok(FileOutcome::Changed { backed_up })
}

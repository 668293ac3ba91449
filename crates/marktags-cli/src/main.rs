use anyhow::{Result, bail};
use clap::Parser;
use marktags_config::Settings;
use std::path::PathBuf;

mod batch;

/// Add or remove frontmatter tags across a markdown vault.
#[derive(Debug, Parser)]
#[command(name = "marktags", version)]
struct Cli {
    /// Vault root to process
    #[arg(long)]
    path: Option<PathBuf>,

    /// Tag to add or remove (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,

    /// Operation to apply: add or remove
    #[arg(long)]
    mode: Option<String>,

    /// Descend into subdirectories (true/false)
    #[arg(long)]
    recursive: Option<bool>,

    /// Print unified diffs instead of writing (true/false)
    #[arg(long)]
    dry_run: Option<bool>,

    /// Copy originals to the backup dir before writing (true/false)
    #[arg(long)]
    backup: Option<bool>,

    /// Key and list ordering on write: preserve or alpha
    #[arg(long)]
    order: Option<String>,

    /// Filename glob for documents to process
    #[arg(long)]
    include_glob: Option<String>,

    /// Root directory for mirrored backup copies
    #[arg(long)]
    backup_dir: Option<PathBuf>,

    /// Settings file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

fn apply_overrides(settings: &mut Settings, args: &Cli) {
    if let Some(path) = &args.path {
        settings.path = path.clone();
    }
    if !args.tags.is_empty() {
        settings.tags = args.tags.clone();
    }
    if let Some(mode) = &args.mode {
        settings.mode = mode.clone();
    }
    if let Some(recursive) = args.recursive {
        settings.recursive = recursive;
    }
    if let Some(dry_run) = args.dry_run {
        settings.dry_run = dry_run;
    }
    if let Some(backup) = args.backup {
        settings.backup = backup;
    }
    if let Some(order) = &args.order {
        settings.order = order.clone();
    }
    if let Some(include_glob) = &args.include_glob {
        settings.include_glob = include_glob.clone();
    }
    if let Some(backup_dir) = &args.backup_dir {
        settings.backup_dir = backup_dir.clone();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let loaded = match &args.config {
        Some(path) => {
            let Some(settings) = Settings::load_from_path(path)? else {
                bail!("config file not found: {}", path.display());
            };
            Some(settings)
        }
        None => Settings::load()?,
    };
    let mut settings = loaded.unwrap_or_default();
    apply_overrides(&mut settings, &args);

    // Invalid mode/order/tags fail here, before any file is touched.
    let options = batch::Options::from_settings(&settings)?;
    batch::run(&options)?;
    Ok(())
}

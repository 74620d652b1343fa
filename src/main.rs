use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use nextver::cache::VersionCache;
use nextver::config::load_config;
use nextver::domain::{CommitMessage, SemanticVersion};
use nextver::engine::VersionCalculator;
use nextver::git::{GitRepository, Repository};
use nextver::ui;

#[derive(clap::Parser)]
#[command(
    name = "nextver",
    about = "Compute the next semantic version from commit history"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = ".", help = "Path to the git repository")]
    path: PathBuf,

    #[arg(long, help = "Versioning preset name")]
    preset: Option<String>,

    #[arg(
        long,
        help = "Pre-release channel label; an empty label selects the release channel"
    )]
    pre_release: Option<String>,

    #[arg(long, help = "Version tag prefix")]
    tag_prefix: Option<String>,

    #[arg(long, help = "Skip the computed-version cache")]
    no_cache: bool,

    #[arg(short, long, action = clap::ArgAction::Count, help = "Increase log verbosity")]
    verbose: u8,

    #[arg(short, long, help = "Print only the computed version")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => Ok(()),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref()).context("Cannot load configuration")?;
    if let Some(preset) = &args.preset {
        config.versioning.preset = Some(preset.clone());
    }
    if let Some(prefix) = &args.tag_prefix {
        config.tag_prefix = prefix.clone();
    }
    if let Some(channel) = &args.pre_release {
        config.versioning.pre_release = Some(channel.clone());
    }

    let repo = GitRepository::open(&args.path).context("Cannot open git repository")?;
    let head = repo.head_id().context("Cannot resolve HEAD")?;
    let channel = config.versioning.pre_release.clone().unwrap_or_default();

    let cache = VersionCache::new(&repo.git_dir(), &config.cache);
    let use_cache = config.cache.enabled && !args.no_cache;
    if use_cache {
        if let Some(version) = cache.lookup(&head, &channel) {
            debug!(%version, "cache hit");
            if args.quiet {
                println!("{}", version);
            } else {
                ui::display_cached(&version);
            }
            return Ok(());
        }
    }

    let start_tag = repo
        .latest_version_tag(&config.tag_prefix)
        .context("Cannot enumerate version tags")?;
    // The calculator treats any non-pre-release start as released; the 0.0.0
    // seed of an untagged repository counts as released too.
    let start_version = start_tag
        .as_ref()
        .map(|tag| tag.version.clone())
        .unwrap_or_else(|| SemanticVersion::new(0, 0, 0));
    let messages = repo
        .messages_since(start_tag.as_ref().map(|t| t.name.as_str()))
        .context("Cannot read commit history")?;
    debug!(start = %start_version, commits = messages.len(), "replaying history");

    let preset = config
        .bind_preset()
        .context("Invalid versioning configuration")?;

    let mut calculator = VersionCalculator::new(&preset, start_version);
    if config.versioning.pre_release.is_some() {
        let identifiers = channel.split('.').filter(|s| !s.is_empty()).map(str::to_owned);
        calculator = calculator.post_version_pre_release(identifiers);
    }
    let calculation = calculator.calculate(CommitMessage::sequence(messages))?;
    debug!(
        version = %calculation.version,
        downstream_flowed = calculation.is_version_downstream_flowed,
        major = calculation.contains_major_increment,
        minor = calculation.contains_minor_increment,
        patch = calculation.contains_patch_increment,
        "calculation finished"
    );

    if use_cache {
        if let Err(e) = cache.store(&head, &channel, &calculation.version) {
            warn!("Cannot store computed version: {}", e);
        }
    }

    if args.quiet {
        println!("{}", calculation.version);
    } else {
        ui::display_calculation(start_tag.as_ref(), &calculation);
    }
    Ok(())
}

fn init_tracing(verbosity: u8) {
    let default_directive = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

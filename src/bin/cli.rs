use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use discogs_tag as lib;
use lib::api::discogs::DiscogsProvider;
use lib::api::{get_release, ReleaseRef};
use lib::config::Config;
use lib::files::list_files;
use lib::options::{Options, SkipMask};
use lib::tags::LoftyTags;
use std::path::{Path, PathBuf};
use tracing::subscriber as tracing_subscriber_global;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_log::LogTracer;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "discogs-tag", version)]
struct Cli {
    /// Path to config TOML
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RunArgs {
    /// Show what would change without writing anything
    #[arg(long)]
    dry: bool,

    /// Log count mismatches and per-file errors instead of aborting
    #[arg(long)]
    ignore: bool,

    /// Fields to leave untouched (artist, composer, title, position, date,
    /// subtracks, album, genre, albumartist)
    #[arg(long, value_delimiter = ',')]
    skip: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Tag the audio files of a directory from a Discogs release
    Tag {
        /// Release id, Discogs URL, or file:<path> to a release JSON
        release: String,
        /// Directory holding the audio files
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Copy tags from the files of one directory to the files of another
    Copy {
        source: PathBuf,
        #[arg(default_value = ".")]
        dest: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Rename and reorganize files from their tags using a template such as
    /// "%z - (%y) %b/%d-%n %t"
    Rename {
        /// Path template; defaults to rename_format from the config
        format: Option<String>,
        #[arg(default_value = ".")]
        dir: PathBuf,
        #[command(flatten)]
        run: RunArgs,
    },
    /// Validate config file and exit
    ConfigValidate,
}

fn init_logging(cfg: &Config) -> Result<Option<WorkerGuard>> {
    let _ = LogTracer::init();

    // Honor RUST_LOG if set, otherwise default to info.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let (file_layer, guard) = match &cfg.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "discogs-tag.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            (Some(fmt::layer().with_writer(non_blocking).with_ansi(false)), Some(guard))
        }
        None => (None, None),
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer);
    tracing_subscriber_global::set_global_default(subscriber).context("installing tracing subscriber")?;
    Ok(guard)
}

fn options(cfg: &Config, run: &RunArgs) -> Result<Options> {
    let skip = SkipMask::parse(&cfg.skip)?.merged(SkipMask::parse(&run.skip)?);
    Ok(Options { skip, dry: run.dry, ignore: run.ignore })
}

fn audio_files(cfg: &Config, dir: &Path) -> Vec<PathBuf> {
    let files = list_files(dir, &cfg.file_extensions);
    tracing::debug!("found {} audio files under {}", files.len(), dir.display());
    files
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Commands::ConfigValidate = cli.command {
        match Config::load(cli.config.as_deref()) {
            Ok(_) => println!("OK"),
            Err(e) => {
                eprintln!("Config validation failed: {}", e);
                std::process::exit(2);
            }
        }
        return Ok(());
    }

    let cfg = Config::load(cli.config.as_deref()).context("loading config")?;
    let _guard = init_logging(&cfg)?;

    match cli.command {
        Commands::Tag { release, dir, run } => {
            let options = options(&cfg, &run)?;
            let reference = ReleaseRef::parse(&release)?;
            let provider = DiscogsProvider::from_config(&cfg)?;
            let release = get_release(&provider, &reference)
                .await
                .with_context(|| format!("getting release {}", release))?;
            let files = audio_files(&cfg, &dir);
            lib::workflow::apply_metadata(&release, &files, &options, LoftyTags::open)
                .with_context(|| format!("tagging {}", dir.display()))?;
        }
        Commands::Copy { source, dest, run } => {
            let options = options(&cfg, &run)?;
            let source_files = audio_files(&cfg, &source);
            let dest_files = audio_files(&cfg, &dest);
            lib::workflow::copy_metadata(&source, &source_files, &dest_files, &options, LoftyTags::open)
                .with_context(|| format!("copying tags from {} to {}", source.display(), dest.display()))?;
        }
        Commands::Rename { format, dir, run } => {
            let options = options(&cfg, &run)?;
            let template = format.unwrap_or_else(|| cfg.rename_format.clone());
            let root = dir.canonicalize().with_context(|| format!("resolving {}", dir.display()))?;
            let files = audio_files(&cfg, &root);
            lib::workflow::rename_files(&root, &files, &template, &options, LoftyTags::open)
                .with_context(|| format!("renaming files in {}", root.display()))?;
        }
        Commands::ConfigValidate => unreachable!("handled before config load"),
    }

    Ok(())
}

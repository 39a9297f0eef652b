use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use apkimport::output::OutputFormat;
use apkimport::ImportOptions;

#[derive(Parser)]
#[command(
    name = "apk-import",
    about = "Import an APK into the version-keyed package repository",
    version,
    author
)]
struct Cli {
    /// Path to the APK (a base package or one split)
    apk: PathBuf,

    /// Where the package came from, recorded in common-props.toml
    source: String,

    /// Distribution channel for this version, recorded in props.toml
    channel: String,

    /// Config file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,

    /// Repository root holding one directory per package
    #[arg(long, env = "APK_IMPORT_REPO")]
    repo_root: Option<PathBuf>,

    /// aapt2 executable
    #[arg(long, env = "AAPT2")]
    aapt2: Option<PathBuf>,

    /// apksigner executable
    #[arg(long, env = "APKSIGNER")]
    apksigner: Option<PathBuf>,

    /// Output format (console, json)
    #[arg(long, short = 'f', default_value = "console")]
    format: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cmd_import(cli) {
        Ok(()) => process::exit(0),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn cmd_import(cli: Cli) -> Result<(), apkimport::error::ImportError> {
    let format = OutputFormat::from_str_lenient(&cli.format).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", cli.format);
        OutputFormat::Console
    });

    let options = ImportOptions {
        config_path: cli.config,
        repo_root: cli.repo_root,
        aapt2: cli.aapt2,
        apksigner: cli.apksigner,
        format,
    };

    let report = apkimport::import_apk(&cli.apk, &cli.source, &cli.channel, &options)?;
    let rendered = apkimport::render_report(&report, options.format)?;
    print!("{}", rendered);

    Ok(())
}

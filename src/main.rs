use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use gearup::core::config::{self, CliOverrides, LOG_FILE};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "gearup", version, about = "Interactive developer environment setup")]
struct Args {
    /// Print step commands instead of running them
    #[arg(long)]
    dry_run: bool,

    /// Show hidden directories in completion and the browser
    #[arg(long)]
    show_hidden: bool,

    /// Log file (default: ~/.gearup/gearup.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Config file (default: ~/.gearup/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn init_logging(path: Option<PathBuf>) {
    let Some(path) = path.or_else(|| config::config_dir().map(|d| d.join(LOG_FILE))) else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    init_logging(args.log_file.clone());
    log::info!("gearup {} starting up", env!("CARGO_PKG_VERSION"));

    let file_config = config::load_config(args.config.as_deref()).map_err(|e| {
        log::error!("{}", e);
        std::io::Error::other(e.to_string())
    })?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            dry_run: args.dry_run,
            show_hidden: args.show_hidden,
        },
    );
    log::info!(
        "Resolved config: dry_run={} catalog={} skills={} ({} step commands)",
        resolved.dry_run,
        resolved.catalog_dir.display(),
        resolved.install_dir.display(),
        resolved.steps.len()
    );

    gearup::tui::run(resolved)
}

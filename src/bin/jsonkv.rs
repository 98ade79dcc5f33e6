use std::io;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::{error, info};

use jsonkv::{Result, Shell, Store};

#[derive(Parser)]
#[command(name = "jsonkv", version, about = "An interactive editor for flat key-value JSON files")]
struct Cli {
    /// JSON file to load before the first menu
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{}", e);
        exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    info!("jsonkv {}", env!("CARGO_PKG_VERSION"));

    let stdin = io::stdin();
    let mut shell = Shell::new(Store::new(), stdin.lock(), io::stdout());
    if let Some(file) = cli.file {
        shell.open(&file)?;
    }
    shell.run()
}

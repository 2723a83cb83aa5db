use clap::Parser;

use std::path::PathBuf;
use stockroom::{AppResult, ServerConfig, Tracker, GLOBAL_CONFIG};

#[derive(Parser)]
#[command(version)]
pub struct CommandLine {
    /// path to config file
    #[arg(short, long)]
    pub conf: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
    /// log level (v: info, vv: debug, vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser)]
pub enum Command {
    PrintConfig,
}

fn main() -> AppResult<()> {
    //setup tracing
    let _log_guard = stockroom::setup_tracing();

    //setup config
    let commandline: CommandLine = CommandLine::parse();
    let config_path = commandline
        .conf
        .as_ref()
        .map_or_else(|| PathBuf::from("conf.toml"), PathBuf::from);
    let server_config = ServerConfig::set_up_config(config_path)?;

    if let Some(Command::PrintConfig) = commandline.command {
        println!("{:#?}", server_config);
        return Ok(());
    }

    GLOBAL_CONFIG
        .set(server_config)
        .expect("set server config failed");

    let mut tracker = Tracker::new();
    tracker.start()?;

    Ok(())
}

mod cli;
mod config;
mod main_lib;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use config::Config;
use main_lib::{exit_status, init_tracing, run};

fn main() -> ExitCode {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    let cli = Cli::parse();

    match run(cli, &config) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_status(&err))
        }
    }
}

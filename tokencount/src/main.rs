use std::io;

use args::{Args, Command};
use clap::Parser;

mod args;
mod count;
mod logger;
mod models;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init(&args);

    let config = args.config()?;
    let mut stdout = io::stdout().lock();

    let result = match &args.command {
        Command::Count(count_args) => count::run(count_args, &config, &mut stdout),
        Command::Models => models::run(&mut stdout),
    };

    if let Err(e) = result {
        log::error!("{e:#}");
        std::process::exit(1);
    }

    Ok(())
}

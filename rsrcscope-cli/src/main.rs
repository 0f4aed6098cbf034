mod app;
mod commands;
mod output;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Show rsrcscope info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("rsrcscope", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Info { path } => commands::info::run(path, &cli.global),
        Command::List { path, r#type } => commands::list::run(path, r#type.as_deref(), &cli.global),
        Command::Extract {
            path,
            r#type,
            id,
            name,
            output,
        } => commands::extract::run(
            path,
            r#type,
            commands::extract::Selector::new(id.as_deref(), name.as_deref())?,
            output.as_deref(),
        ),
    }
}

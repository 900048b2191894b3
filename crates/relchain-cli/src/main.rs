//! relchain CLI: the `relchain` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    support::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { relation, json } => commands::check::run(relation, json),

        Commands::Names {
            relation,
            qualify,
            json,
        } => commands::names::run(relation, qualify, json),

        Commands::Save {
            relation,
            session,
            key_prefix,
            binds,
            json,
        } => commands::save::run(commands::save::Args {
            relation,
            session,
            key_prefix,
            binds,
            json,
        }),

        Commands::Restore {
            relation,
            session,
            key_prefix,
            json,
        } => commands::restore::run(relation, session, key_prefix, json),
    }
}

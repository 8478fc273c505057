//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "idsrv-admin",
    about = "Manage identity-server clients and scopes",
    version
)]
pub struct CliArgs {
    #[arg(
        long,
        env = "IDSRV_ADMIN_DB",
        value_name = "FILE",
        help = "SQLite database file; an in-memory database is used when omitted",
        global = true
    )]
    pub db: Option<PathBuf>,

    #[arg(
        long,
        env = "IDSRV_ADMIN_LOG_LEVEL",
        value_name = "LEVEL",
        help = "Log level (trace, debug, info, warn, error)",
        global = true
    )]
    pub log_level: Option<String>,

    #[arg(
        long,
        env = "IDSRV_ADMIN_LOG_DIR",
        value_name = "DIR",
        help = "Write rotating log files here instead of stderr",
        global = true
    )]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub action: Action,
}

#[derive(Subcommand, Debug)]
pub enum Action {
    /// Run one admin command.
    Invoke {
        #[arg(value_name = "COMMAND")]
        command: String,

        #[arg(
            short = 'p',
            long = "param",
            value_name = "NAME=VALUE",
            help = "Command parameter; the value is read as JSON when it parses"
        )]
        params: Vec<String>,

        #[arg(
            long,
            value_name = "FILE",
            help = "JSON object of parameters; -p values override it"
        )]
        params_file: Option<PathBuf>,

        #[arg(
            long,
            value_name = "FILE",
            help = "JSON document piped into add-client or add-scope"
        )]
        input: Option<PathBuf>,
    },
    /// Run every pipeline of a JSON script.
    Script {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// List commands and their parameters.
    Commands,
}

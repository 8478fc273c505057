//! `idsrv-admin` entry point.
//!
//! # Responsibility
//! - Parse arguments and configure logging.
//! - Dispatch to the core command executor and print results as JSON.

mod cli;

use anyhow::{bail, Context};
use clap::Parser;
use cli::{Action, CliArgs};
use idsrv_admin_core::db::{open_db, open_db_in_memory};
use idsrv_admin_core::{
    default_log_level, execute, init_logging, init_stderr_logging, run_script, AdminService,
    CommandKind, Output, ParamSet, Script,
};
use log::info;
use rusqlite::Connection;
use std::fs;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = CliArgs::parse();

    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    match &cli.log_dir {
        Some(dir) if dir.is_absolute() => init_logging(level, dir)?,
        Some(dir) => init_logging(level, std::env::current_dir()?.join(dir))?,
        None => init_stderr_logging(level)?,
    }

    match cli.action {
        Action::Commands => print_commands(),
        Action::Invoke {
            command,
            params,
            params_file,
            input,
        } => {
            let kind: CommandKind = command.parse()?;
            let params = collect_params(params_file.as_deref(), &params)?;
            let input = input
                .as_deref()
                .map(|path| read_input(kind, path))
                .transpose()?;

            let mut conn = open_connection(cli.db.as_deref())?;
            let mut service = AdminService::new(&mut conn);
            let output = execute(&mut service, kind, &params, input)?;
            print_output(&output)?;
        }
        Action::Script { path } => {
            let script = Script::from_path(&path)?;
            let mut conn = open_connection(cli.db.as_deref())?;
            let mut service = AdminService::new(&mut conn);
            let outputs = run_script(&mut service, &script)?;
            info!(
                "event=cli_script module=cli status=ok path={} outputs={}",
                path.display(),
                outputs.len()
            );
            for output in &outputs {
                print_output(output)?;
            }
        }
    }
    Ok(())
}

fn open_connection(db: Option<&Path>) -> anyhow::Result<Connection> {
    let conn = match db {
        Some(path) => open_db(path).with_context(|| format!("opening {}", path.display()))?,
        None => open_db_in_memory()?,
    };
    Ok(conn)
}

fn collect_params(file: Option<&Path>, assignments: &[String]) -> anyhow::Result<ParamSet> {
    let mut params = match file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str::<ParamSet>(&text)
                .with_context(|| format!("{} must hold a JSON object", path.display()))?
        }
        None => ParamSet::new(),
    };
    for raw in assignments {
        params.insert_assignment(raw)?;
    }
    Ok(params)
}

fn read_input(kind: CommandKind, path: &Path) -> anyhow::Result<Output> {
    let text =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(kind.decode_input(value)?)
}

fn print_output(output: &Output) -> anyhow::Result<()> {
    if matches!(output, Output::None) {
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}

fn print_commands() {
    for kind in CommandKind::ALL {
        println!("{:<20} {}", kind.name(), kind.summary());
        for spec in kind.schema().params {
            let marker = if spec.required { " (required)" } else { "" };
            println!("    -{:<34} {}{}", spec.name, spec.kind.describe(), marker);
        }
    }
}

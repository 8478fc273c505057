//! Admin scripts: ordered pipelines of commands.
//!
//! A script is a JSON document:
//!
//! ```json
//! { "pipelines": [
//!     [ { "command": "new-scope", "params": { "Name": "api" } },
//!       { "command": "add-scope" } ]
//! ] }
//! ```
//!
//! Each step's output is piped as the next step's input.

use crate::command::{execute, CommandError, CommandKind, Output};
use crate::params::ParamSet;
use crate::service::admin_service::AdminService;
use log::info;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    pub pipelines: Vec<Pipeline>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Pipeline {
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Step {
    pub command: String,
    #[serde(default)]
    pub params: ParamSet,
}

#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Step {
        pipeline: usize,
        step: usize,
        command: String,
        source: CommandError,
    },
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "cannot read script: {err}"),
            Self::Parse(err) => write!(f, "invalid script: {err}"),
            Self::Step {
                pipeline,
                step,
                command,
                source,
            } => write!(
                f,
                "pipeline {pipeline} step {step} (`{command}`) failed: {source}"
            ),
        }
    }
}

impl Error for ScriptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Step { source, .. } => Some(source),
        }
    }
}

impl Script {
    pub fn from_json_str(text: &str) -> Result<Self, ScriptError> {
        serde_json::from_str(text).map_err(ScriptError::Parse)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(ScriptError::Io)?;
        Self::from_json_str(&text)
    }
}

/// Runs every pipeline in order and returns the final output of each.
///
/// Stops at the first failing step; earlier pipelines stay applied.
pub fn run_script(
    service: &mut AdminService<'_>,
    script: &Script,
) -> Result<Vec<Output>, ScriptError> {
    let mut results = Vec::with_capacity(script.pipelines.len());

    for (pipeline_index, pipeline) in script.pipelines.iter().enumerate() {
        let mut piped: Option<Output> = None;
        for (step_index, step) in pipeline.steps.iter().enumerate() {
            let fail = |source: CommandError| ScriptError::Step {
                pipeline: pipeline_index,
                step: step_index,
                command: step.command.clone(),
                source,
            };
            let kind = step.command.parse::<CommandKind>().map_err(fail)?;
            piped = Some(execute(service, kind, &step.params, piped.take()).map_err(fail)?);
        }
        results.push(piped.unwrap_or(Output::None));
    }

    info!(
        "event=script_run module=script status=ok pipelines={}",
        results.len()
    );
    Ok(results)
}

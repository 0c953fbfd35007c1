//! Command-line surface: one subcommand per resource operation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;

use crate::config::{Config, ResourceConfig};
use crate::resource::{Key, Params, Resource, ResourceOptions, ResourceState};
use crate::transport::{HttpTransport, Method, TimeoutConfig};

#[derive(Parser, Debug)]
#[command(name = "crudsync", version, about = "Fetch and modify remote collections")]
pub struct Cli {
    /// Config file (default: ~/.config/crudsync/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch the collection
    List {
        resource: String,
        /// Query parameter, repeatable
        #[arg(long = "param", short = 'p', value_name = "KEY=VALUE", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
    /// Fetch one item
    Get { resource: String, id: String },
    /// Create an item, or update it when --id is given
    Save {
        resource: String,
        /// Item body as JSON
        json: String,
        #[arg(long)]
        id: Option<String>,
        /// Override the HTTP verb (create, update, patch)
        #[arg(long)]
        method: Option<Method>,
    },
    /// Delete one item
    Delete { resource: String, id: String },
}

impl Command {
    pub fn resource(&self) -> &str {
        match self {
            Command::List { resource, .. }
            | Command::Get { resource, .. }
            | Command::Save { resource, .. }
            | Command::Delete { resource, .. } => resource,
        }
    }
}

fn parse_param(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

impl Cli {
    /// Load the config named by `--config`, or the default one.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Look up the resource a command targets.
pub fn find_resource<'a>(config: &'a Config, name: &str) -> anyhow::Result<&'a ResourceConfig> {
    match config.resource(name) {
        Some(resource) => Ok(resource),
        None => bail!(
            "Resource '{}' not found in config\nAvailable resources: {}",
            name,
            config.resource_names().join(", ")
        ),
    }
}

/// Run one command over HTTP and return the resulting state.
pub async fn execute(command: &Command, config: &Config) -> anyhow::Result<ResourceState> {
    let resource_config = find_resource(config, command.resource())?;
    let transport = HttpTransport::new(TimeoutConfig::from(&config.transport))?;
    let options = ResourceOptions::new(resource_config.clone());
    let resource = Resource::new(&options, Arc::new(transport));
    let operations = resource_config.operations;

    let state = match command {
        Command::List { params, .. } => {
            let params = (!params.is_empty()).then(|| {
                params
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect::<Params>()
            });
            resource.fetch_list(params).await
        }
        Command::Get { id, .. } => resource.fetch_one(id.parse::<Key>()?).await,
        Command::Save { json, id, method, .. } => {
            if !operations.has_save() {
                bail!("Resource '{}' does not support save ({})", resource_config.name, operations);
            }
            let data: Value = serde_json::from_str(json).context("Save body is not valid JSON")?;
            let id = id.as_deref().map(str::parse::<Key>).transpose()?;
            resource.save(data, id, *method).await
        }
        Command::Delete { id, .. } => {
            if !operations.has_delete() {
                bail!("Resource '{}' does not support delete ({})", resource_config.name, operations);
            }
            resource.delete(id.parse::<Key>()?).await
        }
    };
    Ok(state)
}

/// CLI argument definitions via clap derive.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::Overrides;
use crate::inventory::HostField;

/// xcinventory — render an xcdata.ini inventory from running EC2 instances.
#[derive(Debug, Parser)]
#[command(
    name = "xcinventory",
    about = "Render an xcdata.ini inventory from running EC2 instances across regions",
    version
)]
pub struct Cli {
    /// Path to a YAML config file. When omitted, /etc/xcinventory/config.yaml and
    /// ~/.xcinventory.yaml are layered if present.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format. Auto-detects: table when TTY, json when piped.
    #[arg(long, global = true, value_name = "FORMAT", default_value = "auto")]
    pub output: OutputFormat,

    /// Shorthand for --output json.
    #[arg(long, global = true, conflicts_with = "output")]
    pub json: bool,

    /// Omit table headers (useful for awk/cut processing).
    #[arg(long, global = true)]
    pub no_header: bool,

    /// Print stage timing to stderr for debugging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Defaults to `generate`.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Command-line overrides for config file settings.
#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
    /// Region to query (repeatable). Overrides `regions` from config.
    #[arg(long = "region", global = true, value_name = "REGION")]
    pub regions: Vec<String>,

    /// Inventory file to write. Overrides `iniFilePath`.
    #[arg(long, global = true, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Workgroup name for every group line. Overrides `workgroup`.
    #[arg(long, global = true, value_name = "NAME")]
    pub workgroup: Option<String>,

    /// Instance field used as host address. Overrides `awsHostField`.
    #[arg(long, global = true, value_name = "FIELD")]
    pub host_field: Option<HostField>,

    /// Log level: debug, info, warning, error. Overrides `logLevel`.
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Named profile passed to the provider client.
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,
}

impl SettingsArgs {
    #[must_use]
    pub fn overrides(&self) -> Overrides {
        Overrides {
            regions: self.regions.clone(),
            ini_file_path: self.output_file.clone(),
            workgroup: self.workgroup.clone(),
            aws_host_field: self.host_field,
            log_level: self.log_level.clone(),
            profile: self.profile.clone(),
        }
    }
}

/// Output format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Auto-detect: table when stdout is a TTY, json when piped.
    #[default]
    Auto,
    /// JSON array or object (pretty-printed).
    Json,
    /// Compact single-line JSON.
    Compact,
    /// Newline-delimited JSON (one object per line).
    Ndjson,
    /// Aligned table with headers (human-readable).
    Table,
    /// Raw xcdata.ini text.
    Ini,
}

/// All subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Collect instances and write the inventory file.
    Generate(GenerateArgs),
    /// Collect instances and print the rendered inventory sections.
    Preview,
    /// Collect instances and list them with their tags.
    Instances,
    /// List the regions that would be queried.
    Regions,
}

/// Arguments for `xcinventory generate`.
#[derive(Debug, Clone, Default, Parser)]
pub struct GenerateArgs {
    /// Print the inventory text to stdout instead of writing the file.
    #[arg(long)]
    pub dry_run: bool,
}

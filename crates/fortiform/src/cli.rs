//! Clap derive structures for the `fortiform` CLI.
//!
//! Defines the command tree, global flags, and shared types. Also compiled
//! by `build.rs` for man pages, so it depends on nothing but clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// fortiform -- drive FortiOS configuration objects the way the Terraform
/// provider does
#[derive(Debug, Parser)]
#[command(
    name = "fortiform",
    version,
    about = "Manage FortiGate configuration objects from the command line",
    long_about = "Create, read, update, delete and import FortiOS CMDB objects\n\
        through the same schema-driven engine as the fortios Terraform provider.\n\n\
        Objects are addressed by their Terraform type name, with or without\n\
        the fortios_ prefix (e.g. firewall_address, fortios_system_global).",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile to use
    #[arg(long, short = 'p', env = "FORTIFORM_PROFILE", global = true)]
    pub profile: Option<String>,

    /// FortiGate address (overrides profile)
    #[arg(long, short = 'H', global = true)]
    pub hostname: Option<String>,

    /// REST API token (overrides every other credential source)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Default vdom for objects without `vdomparam`
    #[arg(long, global = true)]
    pub vdom: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "FORTIFORM_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List supported resource types
    #[command(alias = "res")]
    Resources,

    /// List supported data source types
    #[command(alias = "ds")]
    DataSources,

    /// Print the schema of one type, or of the whole provider
    Schema(SchemaArgs),

    /// Create an object from a JSON configuration file
    Create(CreateArgs),

    /// Refresh an object and print its state
    #[command(alias = "get")]
    Read(ObjectArgs),

    /// Apply a JSON configuration to an existing object
    Update(UpdateArgs),

    /// Delete an object
    #[command(alias = "rm")]
    Delete(ObjectArgs),

    /// Import an existing object by its id
    Import(ImportArgs),

    /// Read a data source
    Data(DataArgs),

    /// Show FortiGate system status
    Status,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  RESOURCES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Resource or data source type; omit for the full provider schema
    #[arg(value_name = "TYPE")]
    pub type_name: Option<String>,

    /// Look TYPE up among data sources instead of resources
    #[arg(long, short = 'd')]
    pub data_source: bool,
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Resource type, e.g. firewall_address
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// JSON file with the resource configuration
    #[arg(long, short = 'F', value_name = "FILE")]
    pub from_file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ObjectArgs {
    /// Resource type, e.g. firewall_address
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Object id (the mkey, or the object name for singletons)
    pub id: String,
}

#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Resource type, e.g. firewall_address
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Object id (the mkey, or the object name for singletons)
    pub id: String,

    /// JSON file with the desired configuration
    #[arg(long, short = 'F', value_name = "FILE")]
    pub from_file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Resource type, e.g. firewall_address
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Object id (the mkey, or the object name for singletons)
    pub id: String,

    /// Include nested tables (same as FORTIOS_IMPORT_TABLE=true)
    #[arg(long)]
    pub tables: bool,
}

#[derive(Debug, Args)]
pub struct DataArgs {
    /// Data source type, e.g. firewall_address or firewall_addresslist
    #[arg(value_name = "TYPE")]
    pub type_name: String,

    /// Primary key of the object (single-object data sources)
    pub key: Option<String>,

    /// FortiOS filter expression (list data sources), e.g. `name=@web`
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// vdom to read from (overrides the provider default)
    #[arg(long)]
    pub vdomparam: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the current configuration
    Show,

    /// Set a profile value
    Set {
        /// Key, e.g. hostname, vdom, insecure, timeout
        key: String,
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name
        name: String,
    },

    /// Store the API token for a profile in the system keyring
    SetToken {
        /// Profile name (defaults to the active profile)
        #[arg(long)]
        profile: Option<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

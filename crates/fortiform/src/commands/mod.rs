//! Command dispatch: bridges CLI args -> provider operations -> output.

pub mod catalog;
pub mod config_cmd;
pub mod data;
pub mod resource;
pub mod status;
pub mod util;

use fortios_core::Provider;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a FortiGate-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    provider: &Provider,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Create(args) => resource::create(provider, args, global).await,
        Command::Read(args) => resource::read(provider, args, global).await,
        Command::Update(args) => resource::update(provider, args, global).await,
        Command::Delete(args) => resource::delete(provider, args, global).await,
        Command::Import(args) => resource::import(provider, args, global).await,
        Command::Data(args) => data::handle(provider, args, global).await,
        Command::Status => status::handle(provider, global).await,
        // Offline commands are handled before a provider is built
        Command::Resources
        | Command::DataSources
        | Command::Schema(_)
        | Command::Config(_)
        | Command::Completions(_) => Err(CliError::Validation {
            field: "command".into(),
            reason: "does not need a FortiGate connection".into(),
        }),
    }
}

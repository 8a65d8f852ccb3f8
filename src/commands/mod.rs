/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod generate;
pub mod instances;
pub mod preview;
pub mod regions;

use crate::cli::OutputCtx;
use crate::cli::args::{Command, GenerateArgs};
use crate::config::Config;
use crate::inventory::InventoryError;
use crate::provider::Ec2Api;

/// Dispatch a parsed `Command` to its handler. No subcommand means `generate`.
///
/// # Errors
///
/// Returns `InventoryError` on any command failure.
pub fn dispatch(
    command: Option<&Command>,
    config: &Config,
    api: &dyn Ec2Api,
    ctx: &OutputCtx,
) -> Result<(), InventoryError> {
    match command {
        None => generate::run(&GenerateArgs::default(), config, api, ctx),
        Some(Command::Generate(args)) => generate::run(args, config, api, ctx),
        Some(Command::Preview) => preview::run(config, api, ctx),
        Some(Command::Instances) => instances::run(config, api, ctx),
        Some(Command::Regions) => regions::run(config, api, ctx),
    }
}

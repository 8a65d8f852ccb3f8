/// `preview` command: print the rendered inventory without writing it.
use crate::cli::OutputCtx;
use crate::cli::output::write_model;
use crate::config::Config;
use crate::inventory::InventoryError;
use crate::provider::Ec2Api;

use super::generate::render;

/// Run `xcinventory preview`.
///
/// # Errors
///
/// Returns `InventoryError` if region discovery fails or every region fails.
pub fn run(config: &Config, api: &dyn Ec2Api, ctx: &OutputCtx) -> Result<(), InventoryError> {
    let rendered = render(config, api, ctx)?;
    write_model(&rendered.model, ctx);
    Ok(())
}

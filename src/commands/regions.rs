/// `regions` command: show which regions a run would query.
use crate::cli::OutputCtx;
use crate::cli::output::write_regions;
use crate::config::Config;
use crate::inventory::{InventoryError, resolve_regions};
use crate::provider::Ec2Api;
use crate::types::RegionOutput;

/// Run `xcinventory regions`.
///
/// # Errors
///
/// Returns `InventoryError` if discovery is needed and fails.
pub fn run(config: &Config, api: &dyn Ec2Api, ctx: &OutputCtx) -> Result<(), InventoryError> {
    let _t_resolve = ctx.timer("resolve_regions");
    let regions = resolve_regions(api, &config.regions)?;
    drop(_t_resolve);

    let source = if config.regions.is_empty() {
        "discovered"
    } else {
        "configured"
    };
    let output: Vec<RegionOutput> = regions
        .into_iter()
        .map(|name| RegionOutput {
            name,
            source: source.to_owned(),
        })
        .collect();

    write_regions(&output, ctx);
    Ok(())
}

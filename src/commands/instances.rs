/// `instances` command: list collected instances per region.
use crate::cli::OutputCtx;
use crate::cli::output::write_instances;
use crate::config::Config;
use crate::inventory::{InventoryError, collect};
use crate::provider::Ec2Api;
use crate::types::InstanceOutput;

/// Run `xcinventory instances`.
///
/// # Errors
///
/// Returns `InventoryError` if region discovery fails or every region fails.
pub fn run(config: &Config, api: &dyn Ec2Api, ctx: &OutputCtx) -> Result<(), InventoryError> {
    let _t_collect = ctx.timer("collect");
    let collection = collect(api, &config.regions, config.aws_host_field)?;
    drop(_t_collect);

    if collection.is_empty() {
        log::warn!("run: no running instances found");
    }

    let output: Vec<InstanceOutput> = collection
        .regions
        .iter()
        .flat_map(|(region, records)| records.iter().map(|r| InstanceOutput::new(region, r)))
        .collect();

    write_instances(&output, ctx);
    Ok(())
}

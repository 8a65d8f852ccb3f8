/// `generate` command: collect, render and write the inventory file.
use crate::cli::OutputCtx;
use crate::cli::args::GenerateArgs;
use crate::cli::output::write_generate;
use crate::config::Config;
use crate::inventory::{Collection, InventoryError, RenderModel, collect, write_inventory};
use crate::provider::Ec2Api;
use crate::types::GenerateOutput;

/// A render model together with the collection it was built from.
pub struct Rendered {
    pub collection: Collection,
    pub model: RenderModel,
}

/// Collect every configured region and build the render model.
///
/// # Errors
///
/// Returns `InventoryError` if region discovery fails or every region fails.
pub fn render(config: &Config, api: &dyn Ec2Api, ctx: &OutputCtx) -> Result<Rendered, InventoryError> {
    let _t_collect = ctx.timer("collect");
    let collection = collect(api, &config.regions, config.aws_host_field)?;
    drop(_t_collect);

    if log::log_enabled!(log::Level::Debug) {
        let records: Vec<_> = collection.records().collect();
        log::debug!(
            "render: records={}",
            serde_json::to_string(&records).unwrap_or_default()
        );
    }

    let _t_build = ctx.timer("build_model");
    let model = RenderModel::build(collection.records(), &config.classify_options());
    drop(_t_build);

    Ok(Rendered { collection, model })
}

/// Run `xcinventory generate`.
///
/// # Errors
///
/// Returns `InventoryError` on collection failure or when the file cannot be written.
pub fn run(
    args: &GenerateArgs,
    config: &Config,
    api: &dyn Ec2Api,
    ctx: &OutputCtx,
) -> Result<(), InventoryError> {
    let Rendered { collection, model } = render(config, api, ctx)?;
    let text = model.to_ini();
    log::debug!("run: inventory='{text}'");

    if args.dry_run {
        print!("{text}");
        return Ok(());
    }

    let path = config.ini_path();
    let _t_write = ctx.timer("write");
    write_inventory(&path, &text)?;
    drop(_t_write);

    if model.hosts.is_empty() {
        log::warn!("run: no hosts rendered, inventory has headers only");
    }
    log::info!(
        "run: wrote {} host(s) from {} instance(s) to '{}'",
        model.hosts.len(),
        collection.len(),
        path.display()
    );

    let summary = GenerateOutput {
        path: Some(path.display().to_string()),
        datacenters: model.datacenters.len(),
        groups: model.groups.len(),
        hosts: model.hosts.len(),
        failed_regions: collection.failed.iter().map(|(r, _)| r.clone()).collect(),
    };
    write_generate(&summary, ctx);
    Ok(())
}

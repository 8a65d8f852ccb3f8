/// Output formatting: JSON, table and INI modes. TTY detection.
use std::io::{IsTerminal, Write};

use comfy_table::{Cell, Table, presets::UTF8_BORDERS_ONLY};
use serde::Serialize;

use super::OutputFormat;
use crate::inventory::{RenderModel, Tag};
use crate::types::{GenerateOutput, InstanceOutput, RegionOutput, SectionEntryOutput};

/// Resolve the effective output format, handling `--json` flag and TTY auto-detection.
#[must_use]
pub fn resolve_format(fmt: OutputFormat, json_flag: bool) -> OutputFormat {
    if json_flag {
        return OutputFormat::Json;
    }
    if fmt == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        fmt
    }
}

/// Output context passed to all formatters.
pub struct OutputCtx {
    pub format: OutputFormat,
    pub no_header: bool,
    /// When true, print stage timing spans to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI args.
    #[must_use]
    pub fn new(fmt: OutputFormat, json_flag: bool, no_header: bool, debug: bool) -> Self {
        Self {
            format: resolve_format(fmt, json_flag),
            no_header,
            debug,
        }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }

    fn table(&self, headers: &[&str]) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_BORDERS_ONLY);
        if !self.no_header {
            table.set_header(headers.to_vec());
        }
        table
    }
}

fn tags_cell(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| format!("{}={}", t.key, t.value))
        .collect::<Vec<_>>()
        .join(", ")
}

// --- Instances ---

/// Write collected instances to stdout.
pub fn write_instances(instances: &[InstanceOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(instances),
        OutputFormat::Compact => print_compact_json(instances),
        OutputFormat::Ndjson => print_ndjson(instances),
        OutputFormat::Table | OutputFormat::Auto | OutputFormat::Ini => {
            let mut table = ctx.table(&["REGION", "ZONE", "ADDRESS", "TAGS"]);
            for inst in instances {
                table.add_row([
                    Cell::new(&inst.region),
                    Cell::new(&inst.zone),
                    Cell::new(&inst.address),
                    Cell::new(tags_cell(&inst.tags)),
                ]);
            }
            println!("{table}");
        }
    }
}

// --- Regions ---

/// Write the region list to stdout.
pub fn write_regions(regions: &[RegionOutput], ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(regions),
        OutputFormat::Compact => print_compact_json(regions),
        OutputFormat::Ndjson => print_ndjson(regions),
        OutputFormat::Ini => {
            for r in regions {
                println!("{}", r.name);
            }
        }
        OutputFormat::Table | OutputFormat::Auto => {
            let mut table = ctx.table(&["REGION", "SOURCE"]);
            for r in regions {
                table.add_row([r.name.as_str(), r.source.as_str()]);
            }
            println!("{table}");
        }
    }
}

// --- Render model ---

/// Write the rendered inventory sections to stdout.
pub fn write_model(model: &RenderModel, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(model),
        OutputFormat::Compact => print_compact_json(model),
        OutputFormat::Ndjson => print_ndjson(&section_entries(model)),
        OutputFormat::Ini => print!("{}", model.to_ini()),
        OutputFormat::Table | OutputFormat::Auto => {
            let mut table = ctx.table(&["SECTION", "ENTRY"]);
            for entry in section_entries(model) {
                table.add_row([entry.section, entry.entry]);
            }
            println!("{table}");
        }
    }
}

fn section_entries(model: &RenderModel) -> Vec<SectionEntryOutput> {
    model
        .sections()
        .into_iter()
        .flat_map(|(name, entries)| {
            entries.iter().map(move |entry| SectionEntryOutput {
                section: name.to_owned(),
                entry: entry.clone(),
            })
        })
        .collect()
}

// --- Generate ---

/// Write a `generate` summary to stdout.
pub fn write_generate(summary: &GenerateOutput, ctx: &OutputCtx) {
    match ctx.format {
        OutputFormat::Json => print_json(summary),
        OutputFormat::Compact | OutputFormat::Ndjson => print_compact_json(summary),
        _ => {
            let target = summary.path.as_deref().unwrap_or("<dry-run>");
            println!(
                "{target}: {} datacenter(s), {} group(s), {} host(s)",
                summary.datacenters, summary.groups, summary.hosts
            );
            if !summary.failed_regions.is_empty() {
                println!("  skipped regions: {}", summary.failed_regions.join(", "));
            }
        }
    }
}

// --- Error output ---

/// Write a structured error to stderr.
pub fn write_error(err: &crate::types::ErrorOutput, format: OutputFormat, json_flag: bool) {
    let fmt = resolve_format(format, json_flag);
    let stderr = std::io::stderr();
    let mut out = stderr.lock();
    match fmt {
        OutputFormat::Json | OutputFormat::Compact | OutputFormat::Ndjson => {
            let s = serde_json::to_string_pretty(err).unwrap_or_default();
            let _ = writeln!(out, "{s}");
        }
        _ => {
            let _ = writeln!(out, "Error: {}", err.error.message);
        }
    }
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}

// --- Generic JSON helpers ---

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_compact_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("JSON serialization error: {e}"),
    }
}

fn print_ndjson<T: Serialize>(values: &[T]) {
    for v in values {
        match serde_json::to_string(v) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("JSON serialization error: {e}"),
        }
    }
}

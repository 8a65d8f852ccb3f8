/// Render model: the four ordered sections of an `xcdata.ini` inventory.
use std::path::Path;

use serde::Serialize;

use super::classify::{ClassifyOptions, classify, host_line};
use super::errors::InventoryError;
use super::ordered::OrderedSet;
use super::record::InstanceRecord;

/// Deduplicated, insertion-ordered section contents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RenderModel {
    pub datacenters: OrderedSet<String>,
    pub workgroups: OrderedSet<String>,
    pub groups: OrderedSet<String>,
    pub hosts: OrderedSet<String>,
}

impl RenderModel {
    /// Classify every record and accumulate the section lines.
    ///
    /// Every record contributes its zone to `datacenters` and each of its parent-group
    /// tags to `groups`. Records without a main-group tag contribute nothing else and
    /// are logged as warnings.
    #[must_use]
    pub fn build<'a>(
        records: impl IntoIterator<Item = &'a InstanceRecord>,
        opts: &ClassifyOptions,
    ) -> Self {
        let mut model = Self::default();
        model.workgroups.insert(opts.workgroup.clone());

        for record in records {
            model.datacenters.insert(record.zone.clone());

            let classification = classify(record, opts);
            for parent in &classification.parents_seen {
                model.groups.insert(parent.clone());
            }

            let (Some(main), Some(group_line)) = (
                classification.main.as_deref(),
                classification.group_line(&opts.workgroup),
            ) else {
                log::warn!(
                    "build: no '{}' tag for host {} in {}, skipping",
                    opts.main_tag,
                    record.address,
                    record.zone
                );
                continue;
            };

            model.groups.insert(group_line);
            model.hosts.insert(host_line(record, main));
        }

        log::debug!("build: datacenters={:?}", model.datacenters.as_slice());
        log::debug!("build: workgroups={:?}", model.workgroups.as_slice());
        log::debug!("build: groups={:?}", model.groups.as_slice());
        log::debug!("build: hosts={:?}", model.hosts.as_slice());
        model
    }

    /// Sections in file order, paired with their header names.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, &OrderedSet<String>); 4] {
        [
            ("datacenters", &self.datacenters),
            ("workgroups", &self.workgroups),
            ("groups", &self.groups),
            ("hosts", &self.hosts),
        ]
    }

    /// Serialize to `xcdata.ini` text.
    ///
    /// Each section is `[name]` followed by one entry per line; sections are
    /// separated by one blank line and the text ends with a newline.
    #[must_use]
    pub fn to_ini(&self) -> String {
        let mut out = String::new();
        for (i, (name, entries)) in self.sections().into_iter().enumerate() {
            if i > 0 {
                out.push_str("\n\n");
            }
            out.push('[');
            out.push_str(name);
            out.push(']');
            for entry in entries {
                out.push('\n');
                out.push_str(entry);
            }
        }
        out.push('\n');
        out
    }
}

/// Overwrite `path` with `text`.
///
/// # Errors
///
/// Returns `InventoryError::Write` if the file cannot be created or written.
pub fn write_inventory(path: &Path, text: &str) -> Result<(), InventoryError> {
    std::fs::write(path, text).map_err(|source| InventoryError::Write {
        path: path.to_path_buf(),
        source,
    })
}

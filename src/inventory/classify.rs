/// Tag classification: turning an instance's tags into group names.
use super::record::InstanceRecord;

/// Which tag keys select the main and parent groups, and the run's workgroup.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    pub main_tag: String,
    pub parent_tag: String,
    pub workgroup: String,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            main_tag: "Name".to_owned(),
            parent_tag: "role".to_owned(),
            workgroup: "devops".to_owned(),
        }
    }
}

/// Group names derived from one record's tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// From the main-group tag; the last matching tag wins.
    pub main: Option<String>,
    /// From the parent-group tag; the last matching tag wins.
    pub parent: Option<String>,
    /// Every parent-group candidate in tag order, each declared as a group.
    pub parents_seen: Vec<String>,
    /// Every other tag, in provider order.
    pub extra: Vec<String>,
}

/// Build the group name for a tag: `tag_<key>_<value>`.
///
/// Case is preserved. `-` becomes `_` in key and value, then every whitespace run
/// in the result collapses to a single `_`.
#[must_use]
pub fn group_name(key: &str, value: &str) -> String {
    let raw = format!("tag_{}_{}", key.replace('-', "_"), value.replace('-', "_"));
    let mut out = String::with_capacity(raw.len());
    let mut in_space = false;
    for c in raw.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('_');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Sort a record's tags into main, parent and extra groups.
#[must_use]
pub fn classify(record: &InstanceRecord, opts: &ClassifyOptions) -> Classification {
    let mut result = Classification::default();
    for tag in &record.tags {
        let name = group_name(&tag.key, &tag.value);
        if tag.key == opts.main_tag {
            result.main = Some(name);
        } else if tag.key == opts.parent_tag {
            result.parents_seen.push(name.clone());
            result.parent = Some(name);
        } else {
            result.extra.push(name);
        }
    }
    result
}

impl Classification {
    /// The `[groups]` line for this record, or `None` without a main group.
    ///
    /// Shape: `<main> wg=<workgroup>[ parent=<parent>][ tags=<a,b,...>]`.
    #[must_use]
    pub fn group_line(&self, workgroup: &str) -> Option<String> {
        let main = self.main.as_ref()?;
        let mut line = format!("{main} wg={workgroup}");
        if let Some(parent) = &self.parent {
            line.push_str(" parent=");
            line.push_str(parent);
        }
        if !self.extra.is_empty() {
            line.push_str(" tags=");
            line.push_str(&self.extra.join(","));
        }
        Some(line)
    }
}

/// The `[hosts]` line for a record whose main group is `main`.
#[must_use]
pub fn host_line(record: &InstanceRecord, main: &str) -> String {
    format!("{} group={main} dc={}", record.address, record.zone)
}

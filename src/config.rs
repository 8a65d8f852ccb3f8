/// Configuration: built-in defaults, layered YAML files, command-line overrides.
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::inventory::{ClassifyOptions, HostField};

/// Name used for default config locations (`/etc/<name>/config.yaml`, `~/.<name>.yaml`).
pub const APP_NAME: &str = "xcinventory";

/// Errors loading an explicitly requested config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file '{}' does not exist", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Effective settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// `stdout` for the terminal, otherwise a file path.
    pub log_file: String,
    pub log_level: String,
    /// Regions to query; empty means every region the provider reports.
    pub regions: Vec<String>,
    pub ini_file_path: String,
    pub tag_for_main_group: String,
    pub tag_for_parent_group: String,
    pub workgroup: String,
    pub aws_host_field: HostField,
    /// Provider client executable.
    pub aws_command: String,
    pub profile: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: "stdout".to_owned(),
            log_level: "info".to_owned(),
            regions: Vec::new(),
            ini_file_path: "~/xcdata.ini".to_owned(),
            tag_for_main_group: "Name".to_owned(),
            tag_for_parent_group: "role".to_owned(),
            workgroup: "devops".to_owned(),
            aws_host_field: HostField::PublicDnsName,
            aws_command: "aws".to_owned(),
            profile: None,
        }
    }
}

/// One YAML file's contents. Absent keys leave the current value untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    pub log_file: Option<String>,
    pub log_level: Option<String>,
    pub regions: Option<Vec<String>>,
    pub ini_file_path: Option<String>,
    pub tag_for_main_group: Option<String>,
    pub tag_for_parent_group: Option<String>,
    pub workgroup: Option<String>,
    pub aws_host_field: Option<HostField>,
    pub aws_command: Option<String>,
    pub profile: Option<String>,
}

/// Values given on the command line; they win over every file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub regions: Vec<String>,
    pub ini_file_path: Option<PathBuf>,
    pub workgroup: Option<String>,
    pub aws_host_field: Option<HostField>,
    pub log_level: Option<String>,
    pub profile: Option<String>,
}

/// Result of [`Config::load`]: the config plus what happened while loading it.
///
/// Warnings are kept rather than logged because the logger is configured from
/// the loaded config.
#[derive(Debug, Clone, Default)]
pub struct Loaded {
    pub config: Config,
    pub sources: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl Config {
    /// Load configuration.
    ///
    /// With `explicit`, only that file is read and any failure is fatal. Without it,
    /// every existing file in `defaults` is layered in order; unreadable or invalid
    /// ones are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only for a problem with the `explicit` file.
    pub fn load(explicit: Option<&Path>, defaults: &[PathBuf]) -> Result<Loaded, ConfigError> {
        let mut loaded = Loaded::default();

        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ConfigError::NotFound {
                    path: path.to_path_buf(),
                });
            }
            loaded.config.apply(read_file(path)?);
            loaded.sources.push(path.to_path_buf());
            return Ok(loaded);
        }

        for path in defaults.iter().filter(|p| p.is_file()) {
            match read_file(path) {
                Ok(file) => {
                    loaded.config.apply(file);
                    loaded.sources.push(path.clone());
                }
                Err(err) => loaded.warnings.push(format!("skipping config file: {err}")),
            }
        }
        Ok(loaded)
    }

    /// Layer one file over the current values.
    pub fn apply(&mut self, file: ConfigFile) {
        let ConfigFile {
            log_file,
            log_level,
            regions,
            ini_file_path,
            tag_for_main_group,
            tag_for_parent_group,
            workgroup,
            aws_host_field,
            aws_command,
            profile,
        } = file;
        set(&mut self.log_file, log_file);
        set(&mut self.log_level, log_level);
        set(&mut self.regions, regions);
        set(&mut self.ini_file_path, ini_file_path);
        set(&mut self.tag_for_main_group, tag_for_main_group);
        set(&mut self.tag_for_parent_group, tag_for_parent_group);
        set(&mut self.workgroup, workgroup);
        set(&mut self.aws_host_field, aws_host_field);
        set(&mut self.aws_command, aws_command);
        if profile.is_some() {
            self.profile = profile;
        }
    }

    /// Apply command-line values on top of the file configuration.
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if !overrides.regions.is_empty() {
            self.regions.clone_from(&overrides.regions);
        }
        if let Some(path) = &overrides.ini_file_path {
            self.ini_file_path = path.to_string_lossy().into_owned();
        }
        set(&mut self.workgroup, overrides.workgroup.clone());
        set(&mut self.aws_host_field, overrides.aws_host_field);
        set(&mut self.log_level, overrides.log_level.clone());
        if overrides.profile.is_some() {
            self.profile.clone_from(&overrides.profile);
        }
    }

    /// Tag keys and workgroup for the classifier.
    #[must_use]
    pub fn classify_options(&self) -> ClassifyOptions {
        ClassifyOptions {
            main_tag: self.tag_for_main_group.clone(),
            parent_tag: self.tag_for_parent_group.clone(),
            workgroup: self.workgroup.clone(),
        }
    }

    /// Inventory destination with `~` expanded.
    #[must_use]
    pub fn ini_path(&self) -> PathBuf {
        expand_tilde(&self.ini_file_path)
    }
}

/// `/etc/xcinventory/config.yaml` then `~/.xcinventory.yaml`.
#[must_use]
pub fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(format!("/etc/{APP_NAME}/config.yaml"))];
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(format!(".{APP_NAME}.yaml")));
    }
    paths
}

/// Expand a leading `~` or `~/` to the home directory.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let rest = if path == "~" {
        Some("")
    } else {
        path.strip_prefix("~/")
    };
    match (rest, dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn read_file(path: &Path) -> Result<ConfigFile, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if text.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_files() {
        let loaded = Config::load(None, &[PathBuf::from("/nonexistent/xcinventory.yaml")]).unwrap();
        assert_eq!(loaded.config, Config::default());
        assert!(loaded.sources.is_empty());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "c.yaml", "workgroup: ops\nregions: [us-east-1]\n");
        let loaded = Config::load(Some(&path), &[]).unwrap();
        assert_eq!(loaded.config.workgroup, "ops");
        assert_eq!(loaded.config.regions, vec!["us-east-1"]);
        assert_eq!(loaded.config.tag_for_main_group, "Name");
        assert_eq!(loaded.config.aws_host_field, HostField::PublicDnsName);
    }

    #[test]
    fn test_default_files_layer_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let system = write(
            &dir,
            "system.yaml",
            "workgroup: ops\nawsHostField: PrivateIpAddress\n",
        );
        let user = write(&dir, "user.yaml", "workgroup: dev\n");
        let loaded = Config::load(None, &[system.clone(), user.clone()]).unwrap();
        assert_eq!(loaded.config.workgroup, "dev");
        assert_eq!(loaded.config.aws_host_field, HostField::PrivateIpAddress);
        assert_eq!(loaded.sources, vec![system, user]);
    }

    #[test]
    fn test_invalid_default_file_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(&dir, "bad.yaml", "workgroup: [unclosed\n");
        let good = write(&dir, "good.yaml", "tagForParentGroup: tier\n");
        let loaded = Config::load(None, &[bad, good]).unwrap();
        assert_eq!(loaded.config.tag_for_parent_group, "tier");
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_explicit_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let bad = write(&dir, "bad.yaml", "awsHostField: Hostname\n");
        assert!(matches!(
            Config::load(Some(&bad), &[]),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_fatal() {
        let path = PathBuf::from("/nonexistent/xcinventory/config.yaml");
        assert!(matches!(
            Config::load(Some(&path), &[]),
            Err(ConfigError::NotFound { .. })
        ));
    }

    #[test]
    fn test_empty_file_is_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "empty.yaml", "\n");
        let loaded = Config::load(Some(&path), &[]).unwrap();
        assert_eq!(loaded.config, Config::default());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides {
            regions: vec!["eu-west-1".to_owned()],
            ini_file_path: Some(PathBuf::from("/tmp/out.ini")),
            workgroup: Some("sre".to_owned()),
            aws_host_field: Some(HostField::PrivateDnsName),
            log_level: Some("debug".to_owned()),
            profile: Some("prod".to_owned()),
        });
        assert_eq!(config.regions, vec!["eu-west-1"]);
        assert_eq!(config.ini_path(), PathBuf::from("/tmp/out.ini"));
        assert_eq!(config.workgroup, "sre");
        assert_eq!(config.aws_host_field, HostField::PrivateDnsName);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.profile.as_deref(), Some("prod"));
    }

    #[test]
    fn test_empty_overrides_keep_config() {
        let mut config = Config::default();
        config.apply_overrides(&Overrides::default());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_expand_tilde() {
        assert_eq!(expand_tilde("/etc/x.ini"), PathBuf::from("/etc/x.ini"));
        assert_eq!(expand_tilde("rel/x.ini"), PathBuf::from("rel/x.ini"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/xcdata.ini"), home.join("xcdata.ini"));
            assert_eq!(expand_tilde("~"), home);
        }
    }

    #[test]
    fn test_classify_options_from_config() {
        let opts = Config::default().classify_options();
        assert_eq!(opts.main_tag, "Name");
        assert_eq!(opts.parent_tag, "role");
        assert_eq!(opts.workgroup, "devops");
    }
}

/// Provider access through the `aws` command-line client.
use std::process::Command;

use serde::de::DeserializeOwned;

use super::describe::DescribeInstances;
use super::errors::ProviderError;

/// The two provider calls the collector needs.
///
/// Implemented by [`AwsCli`] for real runs and by canned fakes in tests.
pub trait Ec2Api {
    /// Names of every region available to the account.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the call fails or its output is not a JSON string array.
    fn describe_regions(&self) -> Result<Vec<String>, ProviderError>;

    /// Full `describe-instances` document for one region.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` if the call fails or its output cannot be parsed.
    fn describe_instances(&self, region: &str) -> Result<DescribeInstances, ProviderError>;
}

/// Runs the `aws` executable with an explicit argument vector (no shell).
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: String,
    profile: Option<String>,
}

impl AwsCli {
    #[must_use]
    pub fn new(program: impl Into<String>, profile: Option<String>) -> Self {
        Self {
            program: program.into(),
            profile,
        }
    }

    fn base_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(profile) = &self.profile {
            args.push("--profile".to_owned());
            args.push(profile.clone());
        }
        args
    }

    /// Run the client with `args` and parse stdout as JSON.
    fn run_json<T: DeserializeOwned>(&self, args: &[String]) -> Result<T, ProviderError> {
        let command = describe_command(&self.program, args);
        log::debug!("run_json: '{command}'");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| ProviderError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ProviderError::non_zero_exit(
                &command,
                &output.status,
                &output.stderr,
            ));
        }

        let stdout = String::from_utf8(output.stdout)
            .map_err(|_| ProviderError::InvalidUtf8 {
                command: command.clone(),
            })?;
        parse_json(&command, stdout.trim_end())
    }
}

impl Ec2Api for AwsCli {
    fn describe_regions(&self) -> Result<Vec<String>, ProviderError> {
        let mut args = self.base_args();
        args.extend(
            [
                "ec2",
                "describe-regions",
                "--query",
                "Regions[].RegionName",
                "--output",
                "json",
            ]
            .map(str::to_owned),
        );
        self.run_json(&args)
    }

    fn describe_instances(&self, region: &str) -> Result<DescribeInstances, ProviderError> {
        let mut args = self.base_args();
        args.extend(
            ["ec2", "--region", region, "describe-instances", "--output", "json"]
                .map(str::to_owned),
        );
        self.run_json(&args)
    }
}

/// Parse a client's stdout, attaching the command line to any error.
///
/// # Errors
///
/// Returns `ProviderError::MalformedOutput` if `text` is not a valid `T` document.
pub fn parse_json<T: DeserializeOwned>(command: &str, text: &str) -> Result<T, ProviderError> {
    serde_json::from_str(text).map_err(|source| ProviderError::MalformedOutput {
        command: command.to_owned(),
        source,
    })
}

fn describe_command(program: &str, args: &[String]) -> String {
    let mut parts = Vec::with_capacity(args.len() + 1);
    parts.push(program);
    parts.extend(args.iter().map(String::as_str));
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_prepended() {
        let cli = AwsCli::new("aws", Some("ops".to_owned()));
        assert_eq!(cli.base_args(), vec!["--profile", "ops"]);
        let bare = AwsCli::new("aws", None);
        assert!(bare.base_args().is_empty());
    }

    #[test]
    fn test_parse_region_list() {
        let regions: Vec<String> =
            parse_json("aws ec2 describe-regions", "[\"us-east-1\", \"eu-west-1\"]\n".trim_end())
                .unwrap();
        assert_eq!(regions, vec!["us-east-1", "eu-west-1"]);
    }

    #[test]
    fn test_parse_garbage_is_malformed() {
        let result: Result<Vec<String>, _> = parse_json("aws ec2 describe-regions", "not json");
        assert!(matches!(result, Err(ProviderError::MalformedOutput { .. })));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let cli = AwsCli::new("xcinventory-no-such-client-binary", None);
        let result = cli.describe_regions();
        assert!(matches!(result, Err(ProviderError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_non_zero_exit() {
        let cli = AwsCli::new("false", None);
        let result = cli.describe_regions();
        assert!(matches!(result, Err(ProviderError::NonZeroExit { .. })));
    }

    #[test]
    fn test_describe_command_joins_args() {
        let args = vec!["ec2".to_owned(), "--region".to_owned(), "us-east-1".to_owned()];
        assert_eq!(describe_command("aws", &args), "aws ec2 --region us-east-1");
    }
}

/// Provider boundary: invoking the cloud client and modelling its JSON output.
pub mod aws;
pub mod describe;
pub mod errors;
#[cfg(test)]
pub mod fake;

pub use aws::{AwsCli, Ec2Api};
pub use describe::Instance;
pub use errors::ProviderError;

/// Serde model of `ec2 describe-instances` JSON output.
///
/// Only the fields the inventory needs are modelled; everything else in the
/// response is ignored.
use serde::Deserialize;

/// Top-level `describe-instances` document.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DescribeInstances {
    #[serde(default)]
    pub reservations: Vec<Reservation>,
}

/// A reservation groups instances launched together.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Reservation {
    #[serde(default)]
    pub instances: Vec<Instance>,
}

/// One EC2 instance.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Instance {
    #[serde(default)]
    pub instance_id: Option<String>,
    pub state: InstanceState,
    pub placement: Placement,
    /// Absent on instances that were never tagged.
    #[serde(default)]
    pub tags: Vec<RawTag>,
    #[serde(default)]
    pub public_dns_name: Option<String>,
    #[serde(default)]
    pub public_ip_address: Option<String>,
    #[serde(default)]
    pub private_dns_name: Option<String>,
    #[serde(default)]
    pub private_ip_address: Option<String>,
}

impl Instance {
    /// Whether the lifecycle state is exactly `running`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state.name == "running"
    }
}

/// `State` object; `Name` is `pending`, `running`, `stopped`, ...
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InstanceState {
    pub name: String,
}

/// `Placement` object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Placement {
    pub availability_zone: String,
}

/// `{"Key": ..., "Value": ...}` pair as returned by the client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RawTag {
    pub key: String,
    #[serde(default)]
    pub value: String,
}

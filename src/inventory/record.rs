/// Instance records projected from provider output.
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::provider::Instance;

/// A `{key, value}` tag attached to an instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The minimal projection of a running instance that the renderer needs.
///
/// Two records are the same record when zone, tags (in order) and address all match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceRecord {
    /// Availability zone, e.g. `us-east-1a`. Rendered as the host's `dc=`.
    pub zone: String,
    /// Tags in provider order.
    pub tags: Vec<Tag>,
    /// Value of the configured [`HostField`].
    pub address: String,
}

/// Which instance field supplies the host address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum HostField {
    #[default]
    #[value(name = "PublicDnsName", alias = "public-dns-name")]
    PublicDnsName,
    #[value(name = "PublicIpAddress", alias = "public-ip-address")]
    PublicIpAddress,
    #[value(name = "PrivateDnsName", alias = "private-dns-name")]
    PrivateDnsName,
    #[value(name = "PrivateIpAddress", alias = "private-ip-address")]
    PrivateIpAddress,
}

impl HostField {
    /// Field name as it appears in the provider's JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PublicDnsName => "PublicDnsName",
            Self::PublicIpAddress => "PublicIpAddress",
            Self::PrivateDnsName => "PrivateDnsName",
            Self::PrivateIpAddress => "PrivateIpAddress",
        }
    }

    /// Pick this field from an instance. Empty strings count as absent.
    #[must_use]
    pub fn pick(self, instance: &Instance) -> Option<&str> {
        let value = match self {
            Self::PublicDnsName => instance.public_dns_name.as_deref(),
            Self::PublicIpAddress => instance.public_ip_address.as_deref(),
            Self::PrivateDnsName => instance.private_dns_name.as_deref(),
            Self::PrivateIpAddress => instance.private_ip_address.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }
}

impl fmt::Display for HostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl InstanceRecord {
    /// Project a provider instance, or `None` if the chosen address is missing.
    #[must_use]
    pub fn from_instance(instance: &Instance, field: HostField) -> Option<Self> {
        let address = field.pick(instance)?;
        Some(Self {
            zone: instance.placement.availability_zone.clone(),
            tags: instance
                .tags
                .iter()
                .map(|t| Tag::new(t.key.clone(), t.value.clone()))
                .collect(),
            address: address.to_owned(),
        })
    }
}

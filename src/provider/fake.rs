/// Canned `Ec2Api` for unit tests.
use std::collections::HashMap;

use super::aws::{Ec2Api, parse_json};
use super::describe::DescribeInstances;
use super::errors::ProviderError;

/// Serves fixed JSON bodies per region. Unknown regions answer with unparseable output.
#[derive(Debug, Default)]
pub struct FakeEc2 {
    pub regions: Vec<String>,
    pub bodies: HashMap<String, String>,
}

impl FakeEc2 {
    pub fn with_region(mut self, region: &str, body: &str) -> Self {
        self.regions.push(region.to_owned());
        self.bodies.insert(region.to_owned(), body.to_owned());
        self
    }
}

impl Ec2Api for FakeEc2 {
    fn describe_regions(&self) -> Result<Vec<String>, ProviderError> {
        Ok(self.regions.clone())
    }

    fn describe_instances(&self, region: &str) -> Result<DescribeInstances, ProviderError> {
        let body = self.bodies.get(region).map_or("", String::as_str);
        parse_json(&format!("fake describe-instances {region}"), body)
    }
}

/// Build a `describe-instances` body with one running instance per `(zone, tags, ip)`.
pub fn body(instances: &[(&str, &[(&str, &str)], &str)]) -> String {
    let instances: Vec<serde_json::Value> = instances
        .iter()
        .map(|(zone, tags, ip)| {
            let tags: Vec<serde_json::Value> = tags
                .iter()
                .map(|(k, v)| serde_json::json!({"Key": k, "Value": v}))
                .collect();
            serde_json::json!({
                "State": {"Name": "running"},
                "Placement": {"AvailabilityZone": zone},
                "Tags": tags,
                "PublicIpAddress": ip,
            })
        })
        .collect();
    serde_json::json!({"Reservations": [{"Instances": instances}]}).to_string()
}

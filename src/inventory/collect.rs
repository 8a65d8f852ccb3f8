/// Collector: query each region and project running instances into records.
use crate::provider::{Ec2Api, ProviderError};

use super::errors::InventoryError;
use super::record::{HostField, InstanceRecord};

/// Result of collecting one region.
#[derive(Debug)]
pub struct RegionOutcome {
    pub region: String,
    pub result: Result<Vec<InstanceRecord>, ProviderError>,
}

/// Aggregated records from every region that succeeded.
#[derive(Debug, Default)]
pub struct Collection {
    /// Successful regions in query order, each with its records in provider order.
    pub regions: Vec<(String, Vec<InstanceRecord>)>,
    /// Regions whose collection failed, with the reason.
    pub failed: Vec<(String, String)>,
}

impl Collection {
    /// All records, flattened across regions.
    #[must_use = "iterators are lazy"]
    pub fn records(&self) -> impl Iterator<Item = &InstanceRecord> {
        self.regions.iter().flat_map(|(_, records)| records.iter())
    }

    /// Total number of records across regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.iter().map(|(_, records)| records.len()).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fetch the running instances of one region.
///
/// Instances not in state `running` are dropped. Instances without a value for
/// `field` are dropped with a warning. Identical records are kept once.
///
/// # Errors
///
/// Returns `ProviderError` if the client call fails or its output cannot be parsed.
pub fn fetch_instances<A: Ec2Api + ?Sized>(
    api: &A,
    region: &str,
    field: HostField,
) -> Result<Vec<InstanceRecord>, ProviderError> {
    let doc = api.describe_instances(region)?;

    let mut records: Vec<InstanceRecord> = Vec::new();
    for instance in doc.reservations.iter().flat_map(|r| r.instances.iter()) {
        if !instance.is_running() {
            continue;
        }
        let Some(record) = InstanceRecord::from_instance(instance, field) else {
            log::warn!(
                "fetch_instances: instance {} in {region} has no {field}, skipping",
                instance.instance_id.as_deref().unwrap_or("<unknown>")
            );
            continue;
        };
        if !records.contains(&record) {
            records.push(record);
        }
    }
    Ok(records)
}

/// Regions to query: the configured list, or every region the provider reports.
///
/// # Errors
///
/// Returns `InventoryError::Provider` if discovery fails. An empty discovery
/// result is not an error; the run then renders an inventory with empty sections.
pub fn resolve_regions<A: Ec2Api + ?Sized>(
    api: &A,
    configured: &[String],
) -> Result<Vec<String>, InventoryError> {
    if !configured.is_empty() {
        return Ok(configured.to_vec());
    }
    let regions = api.describe_regions()?;
    if regions.is_empty() {
        log::warn!("resolve_regions: provider reported no regions");
    }
    log::debug!("resolve_regions: discovered {regions:?}");
    Ok(regions)
}

/// Collect every region in sequence, one outcome per region.
pub fn collect_regions<A: Ec2Api + ?Sized>(
    api: &A,
    regions: &[String],
    field: HostField,
) -> Vec<RegionOutcome> {
    regions
        .iter()
        .map(|region| RegionOutcome {
            region: region.clone(),
            result: fetch_instances(api, region, field),
        })
        .collect()
}

/// Drop failed regions (logging them) and concatenate the rest.
///
/// # Errors
///
/// Returns `InventoryError::AllRegionsFailed` when at least one region was attempted
/// and none succeeded.
pub fn aggregate(outcomes: Vec<RegionOutcome>) -> Result<Collection, InventoryError> {
    let attempted = outcomes.len();
    let mut collection = Collection::default();

    for outcome in outcomes {
        match outcome.result {
            Ok(records) => {
                log::info!(
                    "aggregate: region {} has {} running instance(s)",
                    outcome.region,
                    records.len()
                );
                collection.regions.push((outcome.region, records));
            }
            Err(err) => {
                log::error!("aggregate: skipping region {}: {err}", outcome.region);
                collection.failed.push((outcome.region, err.to_string()));
            }
        }
    }

    if attempted > 0 && collection.regions.is_empty() {
        return Err(InventoryError::AllRegionsFailed { count: attempted });
    }
    Ok(collection)
}

/// Resolve regions, collect each one, and aggregate the successes.
///
/// # Errors
///
/// See [`resolve_regions`] and [`aggregate`].
pub fn collect<A: Ec2Api + ?Sized>(
    api: &A,
    configured: &[String],
    field: HostField,
) -> Result<Collection, InventoryError> {
    let regions = resolve_regions(api, configured)?;
    aggregate(collect_regions(api, &regions, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::record::Tag;
    use crate::provider::fake::{FakeEc2, body};

    #[test]
    fn test_filters_non_running() {
        let json = r#"{"Reservations": [{"Instances": [
            {"State": {"Name": "stopped"}, "Placement": {"AvailabilityZone": "us-east-1a"},
             "PublicIpAddress": "1.1.1.1"},
            {"State": {"Name": "running"}, "Placement": {"AvailabilityZone": "us-east-1b"},
             "PublicIpAddress": "2.2.2.2", "Tags": [{"Key": "Name", "Value": "db"}]}
        ]}]}"#;
        let api = FakeEc2::default().with_region("us-east-1", json);
        let records = fetch_instances(&api, "us-east-1", HostField::PublicIpAddress).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].zone, "us-east-1b");
        assert_eq!(records[0].address, "2.2.2.2");
        assert_eq!(records[0].tags, vec![Tag::new("Name", "db")]);
    }

    #[test]
    fn test_dedups_identical_records_within_region() {
        let tags: &[(&str, &str)] = &[("Name", "web")];
        let json = body(&[
            ("us-east-1a", tags, "1.1.1.1"),
            ("us-east-1a", tags, "1.1.1.1"),
            ("us-east-1a", tags, "1.1.1.2"),
        ]);
        let api = FakeEc2::default().with_region("us-east-1", &json);
        let records = fetch_instances(&api, "us-east-1", HostField::PublicIpAddress).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_absent_address_key_skipped() {
        let json = r#"{"Reservations": [{"Instances": [
            {"State": {"Name": "running"}, "Placement": {"AvailabilityZone": "us-east-1a"},
             "Tags": [{"Key": "Name", "Value": "private-only"}],
             "PrivateIpAddress": "10.0.0.7"},
            {"State": {"Name": "running"}, "Placement": {"AvailabilityZone": "us-east-1a"},
             "Tags": [{"Key": "Name", "Value": "public"}],
             "PublicIpAddress": "3.3.3.3"}
        ]}]}"#;
        let api = FakeEc2::default().with_region("us-east-1", json);
        let records = fetch_instances(&api, "us-east-1", HostField::PublicIpAddress).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].address, "3.3.3.3");
    }

    #[test]
    fn test_missing_address_skipped() {
        let json = r#"{"Reservations": [{"Instances": [
            {"State": {"Name": "running"}, "Placement": {"AvailabilityZone": "us-east-1a"},
             "PublicDnsName": ""}
        ]}]}"#;
        let api = FakeEc2::default().with_region("us-east-1", json);
        let records = fetch_instances(&api, "us-east-1", HostField::PublicDnsName).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_configured_regions_skip_discovery() {
        let api = FakeEc2::default().with_region("eu-west-1", "{}");
        let regions = resolve_regions(&api, &["ap-south-1".to_owned()]).unwrap();
        assert_eq!(regions, vec!["ap-south-1"]);
    }

    #[test]
    fn test_discovery_used_when_unconfigured() {
        let api = FakeEc2::default()
            .with_region("eu-west-1", "{}")
            .with_region("us-east-1", "{}");
        let regions = resolve_regions(&api, &[]).unwrap();
        assert_eq!(regions, vec!["eu-west-1", "us-east-1"]);
    }

    #[test]
    fn test_empty_discovery_is_empty_collection() {
        let api = FakeEc2::default();
        assert!(resolve_regions(&api, &[]).unwrap().is_empty());
        let collection = collect(&api, &[], HostField::PublicIpAddress).unwrap();
        assert!(collection.is_empty());
        assert!(collection.failed.is_empty());
    }

    #[test]
    fn test_failed_region_skipped() {
        let tags: &[(&str, &str)] = &[("Name", "web")];
        let api = FakeEc2::default()
            .with_region("us-east-1", &body(&[("us-east-1a", tags, "1.1.1.1")]))
            .with_region("eu-west-1", "<html>throttled</html>");
        let collection = collect(&api, &[], HostField::PublicIpAddress).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.regions[0].0, "us-east-1");
        assert_eq!(collection.failed.len(), 1);
        assert_eq!(collection.failed[0].0, "eu-west-1");
    }

    #[test]
    fn test_all_regions_failed() {
        let api = FakeEc2::default().with_region("us-east-1", "oops");
        let result = collect(&api, &[], HostField::PublicIpAddress);
        assert!(matches!(
            result,
            Err(InventoryError::AllRegionsFailed { count: 1 })
        ));
    }

    #[test]
    fn test_zero_instances_is_ok() {
        let api = FakeEc2::default().with_region("us-east-1", r#"{"Reservations": []}"#);
        let collection = collect(&api, &[], HostField::PublicIpAddress).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.regions.len(), 1);
        assert!(collection.failed.is_empty());
    }
}

//! Traffic and service summaries written only against the canonical traits.
//!
//! Nothing here names a schema version, so every function works the same on
//! v1alpha1 and v1beta1 objects.

use crate::generic::{Service, TrafficTarget, TrafficTargetSlice};

/// Summary of a service, as printed by `describe service`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: String,
    pub url: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub latest_ready_revision: Option<String>,
    pub traffic: Vec<String>,
}

/// `tag: revision percent%`, naming the configuration when the target follows it.
pub fn describe_target(target: &dyn TrafficTarget) -> String {
    let destination = target
        .get_revision_name()
        .or(target.get_configuration_name())
        .unwrap_or("latest");
    let percent = target.get_percent().unwrap_or(0);
    match target.get_tag() {
        Some(tag) => format!("{tag}: {destination} {percent}%"),
        None => format!("{destination} {percent}%"),
    }
}

pub fn traffic_summary(traffic: &mut dyn TrafficTargetSlice) -> Vec<String> {
    traffic.iter().map(|target| describe_target(&*target)).collect()
}

pub fn total_percent(traffic: &mut dyn TrafficTargetSlice) -> i64 {
    traffic.iter().filter_map(|target| target.get_percent()).sum()
}

/// Targets with a non-zero share. The collection itself is left untouched.
pub fn serving_targets(traffic: &dyn TrafficTargetSlice) -> Box<dyn TrafficTargetSlice> {
    traffic.filter(&mut |target: &mut dyn TrafficTarget| target.get_percent().unwrap_or(0) > 0)
}

/// Send `percent` to `revision` under `tag`, replacing any target with the same tag and revision.
pub fn pin_revision(traffic: &mut dyn TrafficTargetSlice, tag: &str, revision: &str, percent: i64) {
    traffic.upsert(
        Some(tag.to_string()),
        Some(revision.to_string()),
        None,
        Some(false),
        Some(percent),
        None,
    );
}

/// Every target published under `tag`.
pub fn tagged(traffic: &mut dyn TrafficTargetSlice, tag: &str) -> Vec<String> {
    traffic
        .matches_tag(Some(tag))
        .iter()
        .map(|target| describe_target(&**target))
        .collect()
}

pub fn describe_service(service: &mut dyn Service) -> ServiceSummary {
    let name = service.get_name().to_string();

    let image = {
        let mut spec = service.get_spec();
        let mut template = spec.get_template();
        let revision = template.get_spec();
        revision.get_containers().first().map(|c| c.image.clone())
    };

    let (url, address, latest_ready_revision) = {
        let status = service.get_status();
        (
            status.get_url().map(str::to_string),
            status.get_address().and_then(|address| address.url.clone()),
            status.get_latest_ready_revision_name().map(str::to_string),
        )
    };

    let traffic = traffic_summary(&mut *service.get_spec().get_traffic());

    ServiceSummary {
        name,
        url,
        address,
        image,
        latest_ready_revision,
        traffic,
    }
}

//! The v1alpha1 serving API
//!
//! Differs from v1beta1 in a few places:
//! - templates may sit under a deprecated field or in a `run_latest`, `pinned`
//!   or `release` block;
//! - a revision may carry a single deprecated container;
//! - route status calls its URL `domain` and uses the v1alpha1 duck address.

use super::duck::v1alpha1::Addressable;
use super::k8s::Container;
use super::meta::{Condition, ObjectMeta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Service {
    #[serde(flatten)]
    pub object_meta: ObjectMeta,
    #[serde(default)]
    pub spec: ServiceSpec,
    #[serde(default)]
    pub status: ServiceStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpec {
    #[serde(default, rename = "runLatest")]
    pub deprecated_run_latest: Option<RunLatestType>,
    #[serde(default, rename = "pinned")]
    pub deprecated_pinned: Option<PinnedType>,
    #[serde(default, rename = "release")]
    pub deprecated_release: Option<ReleaseType>,
    #[serde(flatten)]
    pub configuration_spec: ConfigurationSpec,
    #[serde(flatten)]
    pub route_spec: RouteSpec,
}

/// Serve the latest ready revision of an inline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunLatestType {
    #[serde(default)]
    pub configuration: ConfigurationSpec,
}

/// Serve one named revision of an inline configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinnedType {
    #[serde(default)]
    pub revision_name: String,
    #[serde(default)]
    pub configuration: ConfigurationSpec,
}

/// Roll traffic from the current revision to a candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseType {
    #[serde(default)]
    pub revisions: Vec<String>,
    #[serde(default)]
    pub rollout_percent: i64,
    #[serde(default)]
    pub configuration: ConfigurationSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    #[serde(flatten)]
    pub configuration_status_fields: ConfigurationStatusFields,
    #[serde(flatten)]
    pub route_status_fields: RouteStatusFields,
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub observed_generation: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(flatten)]
    pub object_meta: ObjectMeta,
    #[serde(default)]
    pub spec: ConfigurationSpec,
    #[serde(default)]
    pub status: ConfigurationStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationSpec {
    /// Takes precedence over `template` when present.
    #[serde(default, rename = "revisionTemplate")]
    pub deprecated_revision_template: Option<RevisionTemplateSpec>,
    #[serde(default)]
    pub template: RevisionTemplateSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigurationStatus {
    #[serde(flatten)]
    pub configuration_status_fields: ConfigurationStatusFields,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationStatusFields {
    #[serde(default)]
    pub latest_ready_revision_name: Option<String>,
    #[serde(default)]
    pub latest_created_revision_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    #[serde(flatten)]
    pub object_meta: ObjectMeta,
    #[serde(default)]
    pub spec: RouteSpec,
    #[serde(default)]
    pub status: RouteStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    #[serde(default)]
    pub traffic: Vec<TrafficTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteStatus {
    #[serde(flatten)]
    pub route_status_fields: RouteStatusFields,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStatusFields {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub domain_internal: Option<String>,
    #[serde(default)]
    pub address: Option<Addressable>,
    #[serde(default)]
    pub traffic: Vec<TrafficTarget>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficTarget {
    #[serde(default, rename = "name")]
    pub deprecated_name: Option<String>,
    #[serde(default)]
    pub revision_name: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub configuration_name: Option<String>,
    #[serde(default)]
    pub latest_revision: Option<bool>,
    #[serde(default)]
    pub percent: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Revision {
    #[serde(flatten)]
    pub object_meta: ObjectMeta,
    #[serde(default)]
    pub spec: RevisionSpec,
    #[serde(default)]
    pub status: RevisionStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevisionTemplateSpec {
    #[serde(flatten)]
    pub object_meta: ObjectMeta,
    #[serde(default)]
    pub spec: RevisionSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionSpec {
    #[serde(default, rename = "container")]
    pub deprecated_container: Option<Container>,
    #[serde(default)]
    pub containers: Vec<Container>,
    #[serde(default)]
    pub container_concurrency: Option<i64>,
    #[serde(default)]
    pub timeout_seconds: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevisionStatus {
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub image_digest: Option<String>,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

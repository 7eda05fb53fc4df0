//! The v1beta1 serving API

use super::duck::v1beta1::Addressable;
use super::k8s::Container;
use super::meta::{Condition, ObjectMeta};
use serde::{Deserialize, Serialize};

/// Manages a configuration and the route in front of it.
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
pub struct ServiceSpec {
    #[serde(flatten)]
    pub configuration_spec: ConfigurationSpec,
    #[serde(flatten)]
    pub route_spec: RouteSpec,
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

/// Stamps out a new revision for every template change.
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
pub struct ConfigurationSpec {
    /// Template for the revisions this configuration creates.
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

/// Splits traffic across revisions.
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
pub struct RouteStatusFields {
    /// External URL of the route.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub address: Option<Addressable>,
    #[serde(default)]
    pub traffic: Vec<TrafficTarget>,
}

/// Share of traffic sent to one revision.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrafficTarget {
    /// Name for a dedicated URL of this target.
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub revision_name: Option<String>,
    #[serde(default)]
    pub configuration_name: Option<String>,
    /// Follow the latest ready revision of the configuration.
    #[serde(default)]
    pub latest_revision: Option<bool>,
    #[serde(default)]
    pub percent: Option<i64>,
    #[serde(default)]
    pub url: Option<String>,
}

/// An immutable snapshot of code and configuration.
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
    #[serde(default)]
    pub containers: Vec<Container>,
    /// Maximum in-flight requests per instance; zero means unlimited.
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

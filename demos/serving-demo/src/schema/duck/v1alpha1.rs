//! v1alpha1 duck types: the v1beta1 address plus a bare hostname

use super::v1beta1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Addressable {
    #[serde(flatten)]
    pub addressable: v1beta1::Addressable,
    #[serde(default)]
    pub hostname: Option<String>,
}

impl From<v1beta1::Addressable> for Addressable {
    fn from(addressable: v1beta1::Addressable) -> Self {
        let hostname = addressable.url.as_deref().map(host_of);
        Self { addressable, hostname }
    }
}

/// Host part of a URL such as `http://web.default.svc.cluster.local/`.
fn host_of(url: &str) -> String {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    rest.split(['/', ':']).next().unwrap_or(rest).to_string()
}

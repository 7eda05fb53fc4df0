//! v1beta1 duck types

use serde::{Deserialize, Serialize};

/// Where a resource can be reached from inside the cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Addressable {
    #[serde(default)]
    pub url: Option<String>,
}

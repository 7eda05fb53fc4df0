//! Schema types of the serving API.
//!
//! `v1alpha1` and `v1beta1` are the two versions. `meta`, `duck` and `k8s`
//! hold the types both versions share.

pub mod duck;
pub mod k8s;
pub mod meta;
pub mod v1alpha1;
pub mod v1beta1;

//! Addressable shapes, one module per duck-type version.
//!
//! Each serving version embeds the duck version it was released with.

pub mod v1alpha1;
pub mod v1beta1;

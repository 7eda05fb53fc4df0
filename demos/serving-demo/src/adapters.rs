//! Generated adapters, one module per schema version.

#[allow(unused_imports, clippy::all)]
pub mod v1beta1 {
    include!(concat!(env!("OUT_DIR"), "/v1beta1.rs"));
}

#[allow(unused_imports, clippy::all)]
pub mod v1alpha1 {
    include!(concat!(env!("OUT_DIR"), "/v1alpha1.rs"));
}

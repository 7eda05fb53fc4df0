//! serving-demo - Version-bridging adapters for a two-version serving API
//!
//! The build script runs apibridge over [`schema::v1beta1`] and
//! [`schema::v1alpha1`]:
//! - [`generic`] holds the canonical traits, taken from v1beta1
//! - [`adapters::v1beta1`] and [`adapters::v1alpha1`] wrap each version's
//!   structs and implement those traits
//! - [`describe`] is a consumer that only knows the traits
//!
//! ```
//! use serving_demo::adapters::v1alpha1::V1alpha1Route;
//! use serving_demo::describe::pin_revision;
//! use serving_demo::generic::Route;
//! use serving_demo::schema::v1alpha1;
//!
//! let mut route = v1alpha1::Route::default();
//! let mut adapter = V1alpha1Route(&mut route);
//! pin_revision(&mut *adapter.get_spec().get_traffic(), "canary", "web-00002", 10);
//!
//! assert_eq!(route.spec.traffic[0].revision_name.as_deref(), Some("web-00002"));
//! ```

pub mod adapters;
pub mod describe;
pub mod generic;
pub mod schema;

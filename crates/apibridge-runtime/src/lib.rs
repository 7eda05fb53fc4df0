//! apibridge-runtime - Support types for generated adapters
//!
//! Generated code refers to this crate by absolute paths:
//! - [`Slot`] holds a collection adapter's storage, borrowed from the parent
//!   instance or owned (the result of a `filter`)
//! - [`ErasedElts`], [`erase`] and [`unwrap_elts`] move a collection's elements
//!   across a trait boundary whose element type differs per schema version
//! - [`ErasedValue`] and [`unwrap_value`] do the same for single struct values

mod erased;
mod error;
mod slot;

pub use erased::{ErasedElts, ErasedValue, erase, try_unwrap_elts, try_unwrap_value, unwrap_elts, unwrap_value};
pub use error::{RuntimeError, RuntimeResult};
pub use slot::Slot;

//! Type-erased element storage
//!
//! Collection traits are shared by every schema version, so a setter taking a
//! `Box<dyn FooSlice>` cannot name the element type. The argument gives up its
//! `Vec` as an [`ErasedElts`] and the receiving adapter downcasts it back to
//! its own storage type.
//!
//! Struct values go the same way as an [`ErasedValue`]: a setter or `upsert`
//! argument for an abstracted struct field is built with [`erase`] from the
//! caller's concrete value.

use crate::error::{RuntimeError, RuntimeResult};
use std::any::Any;

/// A collection's elements with the element type erased.
pub type ErasedElts = Box<dyn Any>;

/// A struct value with its concrete type erased.
pub type ErasedValue = Box<dyn Any>;

/// Erase a collection's storage or a struct value.
pub fn erase<T: Any>(value: T) -> Box<dyn Any> {
    Box::new(value)
}

/// Recover storage of type `T`.
///
/// # Panics
///
/// Panics when the elements came from a different schema version. Assigning a
/// foreign collection is a programming error, like indexing out of range.
pub fn unwrap_elts<T: Any>(elts: ErasedElts) -> T {
    match try_unwrap_elts(elts) {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

/// Recover storage of type `T`, reporting a mismatch as an error.
pub fn try_unwrap_elts<T: Any>(elts: ErasedElts) -> RuntimeResult<T> {
    elts.downcast::<T>()
        .map(|value| *value)
        .map_err(|_| RuntimeError::EltsMismatch {
            expected: std::any::type_name::<T>(),
        })
}

/// Recover a struct value of type `T`.
///
/// # Panics
///
/// Panics when the value belongs to a different schema version.
pub fn unwrap_value<T: Any>(value: ErasedValue) -> T {
    match try_unwrap_value(value) {
        Ok(value) => value,
        Err(e) => panic!("{e}"),
    }
}

pub fn try_unwrap_value<T: Any>(value: ErasedValue) -> RuntimeResult<T> {
    value
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| RuntimeError::ValueMismatch {
            expected: std::any::type_name::<T>(),
        })
}

//! Borrowed-or-owned storage for collection adapters

use std::ops::{Deref, DerefMut};

/// Storage behind a collection adapter.
///
/// A getter hands out `Borrowed`, so writes through the adapter land in the
/// parent instance. `filter` results are `Owned`.
#[derive(Debug)]
pub enum Slot<'a, T> {
    Borrowed(&'a mut T),
    Owned(T),
}

impl<T> Slot<'_, T> {
    /// Whether the storage belongs to another instance.
    pub fn is_borrowed(&self) -> bool {
        matches!(self, Slot::Borrowed(_))
    }

    /// Take the storage, cloning it when borrowed.
    pub fn into_owned(self) -> T
    where
        T: Clone,
    {
        match self {
            Slot::Borrowed(value) => value.clone(),
            Slot::Owned(value) => value,
        }
    }
}

impl<T> Deref for Slot<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Slot::Borrowed(value) => value,
            Slot::Owned(value) => value,
        }
    }
}

impl<T> DerefMut for Slot<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            Slot::Borrowed(value) => value,
            Slot::Owned(value) => value,
        }
    }
}

impl<'a, T> From<&'a mut T> for Slot<'a, T> {
    fn from(value: &'a mut T) -> Self {
        Slot::Borrowed(value)
    }
}

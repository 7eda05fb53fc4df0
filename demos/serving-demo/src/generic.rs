//! Canonical traits, generated from the v1beta1 schema.

#![allow(unused_imports, clippy::all)]

include!(concat!(env!("OUT_DIR"), "/generic.rs"));

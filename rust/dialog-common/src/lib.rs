#![warn(missing_docs)]

//! This crate constitutes a library of light weight helpers that are shared
//! across the resolver crates: cross-target `Send`/`Sync` bounds and the
//! cancellation primitive that every store and loader call is raced against.

mod sync;
pub use sync::*;

mod cancel;
pub use cancel::*;

//! Utility module

mod sync;

pub use sync::lock;

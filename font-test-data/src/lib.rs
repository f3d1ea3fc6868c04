//! test data shared between the codec crates.

pub mod avar;
pub mod bebuffer;
pub mod fvar;

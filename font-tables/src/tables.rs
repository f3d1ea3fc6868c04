//! Tables with a typed, editable representation

pub mod avar;
pub mod fvar;

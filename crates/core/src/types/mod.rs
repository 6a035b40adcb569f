//! Core types for Larder.
//!
//! This module provides type-safe wrappers for the few domain concepts the
//! interaction layer handles.

pub mod id;
pub mod quantity;
pub mod status;

pub use id::*;
pub use quantity::{Quantity, QuantityError, QuantityInput};
pub use status::*;

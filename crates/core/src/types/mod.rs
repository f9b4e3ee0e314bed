//! Core types for Authentic Wear.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod email;
pub mod id;
pub mod identity;
pub mod money;
pub mod status;

pub use cart::{CartLine, CartProduct};
pub use email::{Email, EmailError};
pub use id::*;
pub use identity::Identity;
pub use money::{Money, MoneyError};
pub use status::*;

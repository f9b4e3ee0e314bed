//! Authentic Wear Core - Shared types library.
//!
//! This crate provides the value types used by the storefront state stores:
//! cart lines, money amounts, emails, identities and status enums.
//!
//! # Architecture
//!
//! The core crate contains only types - no storage access, no notifications,
//! no async runtime. This keeps it lightweight and lets UI code depend on it
//! without pulling in the stores.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, money and emails, plus the cart and
//!   identity records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

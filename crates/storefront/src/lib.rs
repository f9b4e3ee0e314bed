//! Authentic Wear Storefront - client-side state.
//!
//! The storefront keeps two pieces of state on the client: the shopping cart
//! and the signed-in identity. Both are held in memory, mirrored to durable
//! key-value storage after every change, and restored from it at startup.
//!
//! # Architecture
//!
//! - [`cart::CartStore`] - cart lines, derived totals, order summary
//! - [`session::SessionStore`] - identity and auth status, pluggable
//!   credential verification
//! - [`storage`] - durable storage trait with memory and file backends
//! - [`notify`] - fire-and-forget user notifications
//! - [`state::AppState`] - owns both stores; built once at startup
//!
//! The two stores are independent and never call each other.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod notify;
pub mod services;
pub mod session;
pub mod state;
pub mod storage;
pub mod telemetry;

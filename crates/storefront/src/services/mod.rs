//! Business logic services.
//!
//! Services sit behind the stores and talk to collaborators the stores do not
//! own (credential checks today).

pub mod auth;

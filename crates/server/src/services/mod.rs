//! Business logic services.
//!
//! - `auth` - Registration, credential verification, and the access gate
//! - `cart` - Cart aggregation and pricing

pub mod auth;
pub mod cart;

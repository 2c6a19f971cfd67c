//! Session resolution and the auth facade for the portal client.
//!
//! This crate decides "who is logged in and with what privilege":
//! - [`Identity`]: tagged union over the three mutually-exclusive auth schemes
//! - [`resolver`]: the startup priority chain that picks at most one identity
//!   from stored credentials, purging tokens that fail validation
//! - [`AuthFacade`]: the stable scheme-agnostic surface the rest of the
//!   application reads

mod error;
mod facade;
mod identity;
pub mod resolver;

#[cfg(test)]
mod tests;

pub use error::{AuthError, AuthResult};
pub use facade::{AuthFacade, AuthSnapshot, ClientLoginOutcome};
pub use identity::Identity;

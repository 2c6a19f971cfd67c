//! REST client for the referral portal backend.
//!
//! This crate provides:
//! - Typed request/response DTOs for the backend contract
//! - [`Credential`]: single dispatch over the three wire auth schemes
//! - [`PortalClient`]: reqwest-based client
//! - [`PortalBackend`]: trait seam so session and reveal logic can be tested
//!   against an in-memory fake backend

mod backend;
mod client;
mod credential;
mod error;
mod types;

pub use backend::PortalBackend;
pub use reqwest::StatusCode;
pub use client::PortalClient;
pub use credential::{Credential, PORTAL_TOKEN_HEADER};
pub use error::{ApiError, ApiResult};
pub use types::{
    ClientLoginResponse, CredentialRow, LinkClient, LinkValidation, PortalAuthStatus,
    RevealResponse, StaffProfile, StaffRegisterRequest, StaffTokenResponse, CREDENTIAL_NOT_SET,
    CREDENTIAL_SUSPENDED,
};

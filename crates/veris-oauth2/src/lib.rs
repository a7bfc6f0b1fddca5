//! # veris-oauth2
//!
//! Stateless OAuth2 token handling for the Veris identity platform.
//!
//! A stateless token has no server-side record: every observable attribute is
//! a projection over a self-contained signed claim set, and the token's id is
//! its own encoding. Signing, encryption and signature verification happen in
//! the JWT layer before anything in this crate is constructed; these types
//! assume an already-validated [`ClaimSet`] and never re-verify.
//!
//! Both kinds satisfy the [`veris_tokens::IdentityToken`] contract, so
//! protocol-response builders and revocation checks stay agnostic of the
//! backing strategy.

pub mod claims;
pub mod constants;
pub mod stateless;

pub use claims::ClaimSet;
pub use stateless::{StatelessRefreshToken, StatelessToken};

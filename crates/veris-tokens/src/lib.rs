//! # veris-tokens
//!
//! Token abstraction core for the Veris identity platform.
//!
//! This crate provides:
//! - A registry of typed token attribute slots ([`Field`])
//! - A kind-checked attribute store ([`AttributeStore`])
//! - The server-side, persisted token representation ([`Token`])
//! - The contract both stateful and stateless tokens satisfy ([`IdentityToken`])
//! - A clock abstraction for deterministic expiry checks ([`Clock`])
//!
//! ## Two Backing Strategies
//!
//! Veris tokens come in two flavours behind one contract:
//!
//! | Kind | Backed By | Mutability | Lives In |
//! |------|-----------|------------|----------|
//! | **Stateful** | typed attribute store, persisted server-side | mutable except read-only fields | this crate |
//! | **Stateless** | self-contained signed claim set | immutable | `veris-oauth2` |
//!
//! Callers that do not care which strategy is in play (revocation checks,
//! protocol-response builders) depend on [`IdentityToken`] only.

pub mod attribute;
pub mod clock;
pub mod contract;
pub mod error;
pub mod field;
pub mod token;

pub use attribute::{AttributeStore, AttributeValue};
pub use clock::{Clock, FixedClock, SystemClock};
pub use contract::IdentityToken;
pub use error::TokenError;
pub use field::{Field, ValueKind};
pub use token::{Token, TokenType};

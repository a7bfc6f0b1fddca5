//! Protocol-facing string literals.
//!
//! These are consumed verbatim by the OAuth2 response serializer; changing
//! them is a wire-format break.

/// Response-map key and token name for refresh tokens.
pub const REFRESH_TOKEN: &str = "refresh_token";

/// Response-map key for the token-type marker.
pub const TOKEN_TYPE: &str = "token_type";

/// The bearer token-type marker.
pub const BEARER: &str = "Bearer";

/// Response-map key for the remaining lifetime in seconds.
pub const EXPIRES_IN: &str = "expires_in";

/// Claim name: the subject the token was issued for.
pub const SUBJECT: &str = "sub";

/// Claim name: authentication context class reference.
pub const ACR: &str = "acr";

/// Claim name: the redirect URI bound to the grant.
pub const REDIRECT_URI: &str = "redirect_uri";

/// Claim name: the authentication modules that satisfied the grant.
pub const AUTH_MODULES: &str = "auth_modules";

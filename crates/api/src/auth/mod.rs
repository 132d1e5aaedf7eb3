//! Authorization primitives.
//!
//! Identity and credentials are managed by an external service; this crate
//! only validates the bearer tokens it issues.
//!
//! - [`jwt`] -- HS256 access-token validation (and generation, for tooling and tests).

pub mod jwt;

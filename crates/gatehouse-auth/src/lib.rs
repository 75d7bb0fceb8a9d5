//! # gatehouse-auth
//!
//! Authentication for Gatehouse.
//!
//! ## Modules
//!
//! - `password`: Argon2id credential hashing and verification
//! - `policy`: path exemption rules deciding which requests need authentication
//! - `basic`: HTTP Basic header parsing, credential decoding, and the authenticator
//! - `scheme`: the `Authenticator` capability and the configured-scheme factory
//! - `account`: registration, login checks, and password resets

pub mod account;
pub mod basic;
pub mod password;
pub mod policy;
pub mod scheme;

pub use account::AccountService;
pub use basic::{BasicAuthenticator, Credentials};
pub use password::CredentialHasher;
pub use policy::PathAuthorizationPolicy;
pub use scheme::{Authenticator, build_authenticator};

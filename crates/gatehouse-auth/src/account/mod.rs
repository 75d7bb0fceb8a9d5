//! Account management built on the user directory.

pub mod service;

pub use service::AccountService;

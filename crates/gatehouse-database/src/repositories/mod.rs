//! Repository implementations for Gatehouse entities.

pub mod user;

pub use user::UserRepository;

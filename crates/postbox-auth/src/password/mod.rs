//! Argon2id password and secret hashing.

pub mod hasher;

pub use hasher::PasswordHasher;

//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password policy, hashing and verification (Argon2id)

pub mod password;

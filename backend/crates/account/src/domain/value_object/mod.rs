//! Value Object Module

pub mod public_id;
pub mod role;

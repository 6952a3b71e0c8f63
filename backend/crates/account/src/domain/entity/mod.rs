//! Entity Module

pub mod social;
pub mod stack;
pub mod user;

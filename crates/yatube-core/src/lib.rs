//! # Yatube Core
//!
//! The domain layer of Yatube.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! entities, repository ports, feed pagination and post form validation.

pub mod domain;
pub mod error;
pub mod feed;
pub mod forms;
pub mod pagination;
pub mod ports;

pub use error::DomainError;

//! # Yatube Shared
//!
//! Wire types shared between the web server and its clients.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;

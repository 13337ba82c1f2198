//! CLI command implementations.

pub mod check;
pub mod decode;
pub mod init;
pub mod platform;
pub mod resolve;

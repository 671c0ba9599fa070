//! CLI command implementations.

pub mod decode;
pub mod doctor;
pub mod encode;
pub mod init;
pub mod show;
pub mod solve;

//! Command implementations

pub mod diff;
pub mod fingerprint;
pub mod golden;
pub mod init;

//! Sentinel configuration assembly
//!
//! Validates monitor declarations, renders each into its five-line
//! `sentinel.conf` stanza and assembles the stanzas into one deterministic
//! file body. Everything in this module is pure; IO lives in the reconciler.

pub mod assemble;
pub mod monitor;
pub mod render;

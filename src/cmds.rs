//! Implementations of the mmrl subcommands.
//!
//! Every command returns `Ok(true)` on success and `Ok(false)` if it ran fine but the outcome is a
//! negative answer (e.g. a lookup without result), which is mapped to a non-zero exit code.

pub(crate) mod common;
pub(crate) mod info;
pub(crate) mod list;
pub(crate) mod lookup;
pub(crate) mod repos;
pub(crate) mod resolve;

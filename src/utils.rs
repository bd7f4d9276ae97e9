//! This module provides various utility functions needed throughout mmrl.
//!
//! These include presence checks for optional feed values, version formatting, glob based file
//! lookups and URL classification.

pub(crate) mod common;
pub(crate) mod file_fs;
pub(crate) mod url;

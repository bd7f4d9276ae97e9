//! This module defines the data model of online repositories: module records, their per-platform
//! requirements and the feed documents they arrive in.

pub(crate) mod manager;
pub(crate) mod online;
pub(crate) mod repo;
pub(crate) mod track;

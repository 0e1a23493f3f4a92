//! Core library for the volunteer operations portal.
//!
//! Two engines carry the real invariants of the portal: the recruitment
//! pipeline (`workflows::recruitment`) owns the stage board and the rule for
//! moving a candidate between stages, and the evaluation visibility engine
//! (`workflows::evaluations`) computes what a given viewer may see and which
//! confidential fields must be removed before a record leaves the core. Both
//! consult the shared role and permission model in [`access`].

pub mod access;
pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;

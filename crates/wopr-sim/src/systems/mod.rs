//! Per-tick steps run by the session when the clock advances.
//!
//! Steps are plain functions over the session's registries. They do not own
//! state; the session applies whatever they report.

pub mod impacts;
pub mod termination;

//! Core trait abstractions for the newsdesk pipeline.
//!
//! These traits define the collaborator boundaries: the generative-text
//! service, the optional web-research service, and article storage.

pub mod generator;
pub mod researcher;
pub mod store;

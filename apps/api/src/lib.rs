//! AI Project Sync Space API Library
//!
//! A project manager agent breaks a project description into tasks,
//! delegates them to role-labeled employee agents, and combines their work
//! into a final deliverable. This library provides the agents, the
//! text-generation backends, configuration, and the HTTP surface.

pub mod agents;
pub mod api;
pub mod config;
pub mod inference;

//! Shared helpers for integration tests

#![allow(dead_code)]

pub use syncspace_api::agents::testing::ScriptedGenerator;

pub fn default_roles() -> Vec<String> {
    vec![
        "Researcher".to_string(),
        "Writer".to_string(),
        "Editor".to_string(),
    ]
}

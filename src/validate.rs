// src/validate.rs
//! Per-namespace credential validation
//!
//! The record layer registers one validator per namespace at startup; the
//! core only parses the JSON and performs the dispatch. What "valid" means
//! is entirely up to the namespace.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Error, Result};

/// Capability a namespace supplies: decide whether parsed credential JSON
/// is acceptable.
pub trait NamespaceValidator: Send + Sync {
    fn validate(&self, credentials: &Value) -> bool;
}

impl<F> NamespaceValidator for F
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    fn validate(&self, credentials: &Value) -> bool {
        self(credentials)
    }
}

/// Maps namespace tags to their validators. Built once at startup, then
/// read-only.
#[derive(Default)]
pub struct ValidatorRegistry {
    by_namespace: BTreeMap<String, Box<dyn NamespaceValidator>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the validator for a namespace.
    pub fn register(
        &mut self,
        namespace: impl Into<String>,
        validator: impl NamespaceValidator + 'static,
    ) {
        self.by_namespace
            .insert(namespace.into(), Box::new(validator));
    }

    /// Dispatch to the namespace's validator. An unregistered namespace is a
    /// configuration error, never a silent acceptance.
    pub fn validate(&self, namespace: &str, credentials: &Value) -> Result<bool> {
        match self.by_namespace.get(namespace) {
            Some(validator) => Ok(validator.validate(credentials)),
            None => Err(Error::UnknownNamespace(namespace.to_string())),
        }
    }
}

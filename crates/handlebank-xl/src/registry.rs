//! Worksheet-function registration metadata
//!
//! The host application registers add-in functions through a narrow calling
//! convention: code name, comma-delimited parameter type codes, display
//! name, parameter names, function type and category. This module holds
//! those records; actually pushing them into a host is the binding's job.

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// How the host should expose a registered function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FunctionKind {
    /// Registered but not shown in the function wizard
    Hidden,
    /// Ordinary worksheet function
    Worksheet,
    /// Command macro
    Command,
}

impl FunctionKind {
    /// The numeric type code used by the registration convention
    pub fn code(&self) -> u8 {
        match self {
            FunctionKind::Hidden => 0,
            FunctionKind::Worksheet => 1,
            FunctionKind::Command => 2,
        }
    }
}

/// Registration record for one exported function
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FunctionDef {
    /// Exported code name (what the binary exports)
    pub code_name: String,
    /// Parameter type codes, e.g. "CCE#" (one code per argument plus return)
    pub param_codes: String,
    /// Name shown to the user
    pub display_name: String,
    /// Comma-delimited parameter names
    pub param_names: String,
    pub kind: FunctionKind,
    /// Function-wizard category
    pub category: String,
}

impl FunctionDef {
    /// A worksheet function whose display name matches its code name
    pub fn worksheet(
        code_name: impl Into<String>,
        param_codes: impl Into<String>,
        param_names: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let code_name = code_name.into();
        Self {
            display_name: code_name.clone(),
            code_name,
            param_codes: param_codes.into(),
            param_names: param_names.into(),
            kind: FunctionKind::Worksheet,
            category: category.into(),
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.kind = FunctionKind::Hidden;
        self
    }

    pub fn command(mut self) -> Self {
        self.kind = FunctionKind::Command;
        self
    }
}

/// The set of functions an add-in exposes, keyed by code name
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    defs: BTreeMap<String, FunctionDef>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition; duplicate code names are rejected
    pub fn register(&mut self, def: FunctionDef) -> Result<()> {
        if self.defs.contains_key(&def.code_name) {
            return Err(Error::DuplicateFunction(def.code_name));
        }
        self.defs.insert(def.code_name.clone(), def);
        Ok(())
    }

    pub fn get(&self, code_name: &str) -> Option<&FunctionDef> {
        self.defs.get(code_name)
    }

    /// All definitions, sorted by code name
    pub fn iter(&self) -> impl Iterator<Item = &FunctionDef> {
        self.defs.values()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

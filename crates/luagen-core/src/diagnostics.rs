//! Non-fatal findings collected during a generation run.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// No candidate header declares the aggregate; it is skipped.
    UnresolvedType { aggregate: String },
    /// A registered method has no matching declaration; it is left out of the stub.
    UnmatchedMethod { aggregate: String, target: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnresolvedType { aggregate } => {
                write!(f, "Couldn't find header for type {aggregate}")
            }
            Diagnostic::UnmatchedMethod { aggregate, target } => {
                write!(f, "Function not found: {target} (bound on {aggregate})")
            }
        }
    }
}

/// Ordered diagnostics of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.items.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

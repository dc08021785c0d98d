//! Symbol model shared by the scanners, the correlator and the emitter.

use serde::Serialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub name: String,
    /// Normalized script-visible type.
    #[serde(rename = "type")]
    pub type_name: String,
    pub comment: String,
}

/// Typed, documented signature recovered from a declaration line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignatureEntry {
    /// `Aggregate::member`
    pub qualified_name: String,
    pub return_type: String,
    pub brief_comment: String,
    pub return_comment: String,
    pub parameters: Vec<ParameterSpec>,
}

impl SignatureEntry {
    pub fn parameter_mut(&mut self, name: &str) -> Option<&mut ParameterSpec> {
        self.parameters.iter_mut().find(|p| p.name == name)
    }
}

/// Signatures keyed by qualified name.
///
/// Insertion replaces any previous entry with the same key, so the last
/// declaration in file order wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignatureTable {
    entries: HashMap<String, SignatureEntry>,
}

impl SignatureTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `entry`, returning the entry it replaced.
    pub fn insert_or_replace(&mut self, entry: SignatureEntry) -> Option<SignatureEntry> {
        self.entries.insert(entry.qualified_name.clone(), entry)
    }

    /// Merges `other` into `self`; entries of `other` win on conflicting keys.
    pub fn extend(&mut self, other: SignatureTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, qualified_name: &str) -> Option<&SignatureEntry> {
        self.entries.get(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Maps a script-visible name to the native symbol it wraps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BindingEntry {
    pub script_name: String,
    pub qualified_target: String,
}

impl BindingEntry {
    pub fn new(script_name: impl Into<String>, qualified_target: impl Into<String>) -> Self {
        Self {
            script_name: script_name.into(),
            qualified_target: qualified_target.into(),
        }
    }
}

/// Property and method registrations of one aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateBindings {
    pub properties: Vec<BindingEntry>,
    pub methods: Vec<BindingEntry>,
}

impl AggregateBindings {
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty() && self.methods.is_empty()
    }

    /// Appends the bindings of an inherited capability.
    pub fn append(&mut self, mut other: AggregateBindings) {
        self.properties.append(&mut other.properties);
        self.methods.append(&mut other.methods);
    }
}

/// An aggregate exposed through a usertype registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExposedAggregate {
    pub name: String,
    /// Registered through the node-capability idiom.
    pub inherits_node: bool,
}

/// A property resolved against its getter declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySymbol {
    pub script_name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub comment: String,
    pub default_value: String,
}

/// A function or method resolved against its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionSymbol {
    pub script_name: String,
    pub signature: SignatureEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateSymbolTable {
    pub name: String,
    pub header: PathBuf,
    /// Whether any property was registered, resolved or not.
    pub has_property_bindings: bool,
    pub properties: Vec<PropertySymbol>,
    pub methods: Vec<FunctionSymbol>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleSymbolTable {
    pub name: String,
    pub functions: Vec<FunctionSymbol>,
}

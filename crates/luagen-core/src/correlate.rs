//! Joins bindings with declarations into typed symbol tables.
//!
//! Matching is an exact lookup of the binding's qualified target. A binding
//! without a declaration is never emitted with a guessed type.

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::model::{
    AggregateBindings, AggregateSymbolTable, BindingEntry, FunctionSymbol, ModuleSymbolTable,
    PropertySymbol, SignatureTable,
};
use crate::types::default_value_for;
use std::path::PathBuf;

/// Resolves module functions. Unmatched bindings (overloads, lambdas bound
/// through helpers) are dropped without a diagnostic.
pub fn correlate_module(
    name: &str,
    bindings: &[BindingEntry],
    declarations: &SignatureTable,
) -> ModuleSymbolTable {
    let functions = bindings
        .iter()
        .filter_map(|binding| {
            let signature = declarations.get(&binding.qualified_target)?;
            Some(FunctionSymbol {
                script_name: binding.script_name.clone(),
                signature: signature.clone(),
            })
        })
        .collect();

    ModuleSymbolTable {
        name: name.to_string(),
        functions,
    }
}

/// Resolves an aggregate's properties and methods. Unmatched properties are
/// dropped silently; unmatched methods are reported.
pub fn correlate_aggregate(
    name: &str,
    header: PathBuf,
    bindings: &AggregateBindings,
    declarations: &SignatureTable,
    diagnostics: &mut Diagnostics,
) -> AggregateSymbolTable {
    let properties = bindings
        .properties
        .iter()
        .filter_map(|binding| {
            let Some(getter) = declarations.get(&binding.qualified_target) else {
                tracing::trace!(aggregate = name, target = %binding.qualified_target, "Dropping unmatched property");
                return None;
            };
            Some(PropertySymbol {
                script_name: binding.script_name.clone(),
                type_name: getter.return_type.clone(),
                comment: getter.return_comment.clone(),
                default_value: default_value_for(&getter.return_type).to_string(),
            })
        })
        .collect();

    let mut methods = Vec::with_capacity(bindings.methods.len());
    for binding in &bindings.methods {
        match declarations.get(&binding.qualified_target) {
            Some(signature) => methods.push(FunctionSymbol {
                script_name: binding.script_name.clone(),
                signature: signature.clone(),
            }),
            None => diagnostics.report(Diagnostic::UnmatchedMethod {
                aggregate: name.to_string(),
                target: binding.qualified_target.clone(),
            }),
        }
    }

    AggregateSymbolTable {
        name: name.to_string(),
        header,
        has_property_bindings: !bindings.properties.is_empty(),
        properties,
        methods,
    }
}

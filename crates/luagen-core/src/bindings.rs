//! Registration (binding) extraction from the sol2 call-site source.
//!
//! Three independent queries run over the same token stream: module-level
//! functions, per-aggregate properties and per-aggregate methods. The generic
//! node aggregate registers through a fixed variable and a template placeholder
//! (`&T::GetX`); its property targets are always rewritten to the node
//! aggregate while method targets are rewritten to the aggregate that was asked for.

use crate::lexer::{address_target, lex_registrations, Lexeme, RegToken};
use crate::model::{AggregateBindings, BindingEntry, ExposedAggregate};
use crate::settings::BindingIdioms;

pub struct BindingScanner<'a> {
    idioms: &'a BindingIdioms,
    tokens: Vec<Lexeme<RegToken<'a>>>,
}

impl<'a> BindingScanner<'a> {
    pub fn new(text: &'a str, idioms: &'a BindingIdioms) -> Self {
        Self {
            idioms,
            tokens: lex_registrations(text, idioms),
        }
    }

    /// Free functions registered on the script module, in file order.
    pub fn module_functions(&self) -> Vec<BindingEntry> {
        let mut result = Vec::new();

        for lexeme in &self.tokens {
            let RegToken::ModuleFunction { script_name, rest } = &lexeme.token else {
                continue;
            };

            match self.module_target(rest) {
                Some(target) => result.push(BindingEntry::new(*script_name, target)),
                None => tracing::debug!(
                    line = lexeme.line,
                    script_name = %script_name,
                    "Module function has no resolvable target"
                ),
            }
        }

        result
    }

    fn module_target(&self, rest: &str) -> Option<String> {
        if let Some((_, after)) = rest.split_once(self.idioms.factory_call.as_str()) {
            let ident: String = after
                .trim_start()
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .collect();
            return (!ident.is_empty()).then(|| format!("{}::{}", self.idioms.host_class, ident));
        }
        address_target(rest).map(str::to_string)
    }

    /// The local variable a usertype for `aggregate` is registered through.
    /// Only `auto` lines that perform a usertype registration qualify.
    pub fn registration_variable(&self, aggregate: &str) -> Option<&'a str> {
        if aggregate == self.idioms.node_aggregate {
            return Some(self.idioms.node_variable.as_str());
        }

        let exact = format!("<{aggregate}>");
        let qualified = format!("::{aggregate}>");
        self.tokens.iter().find_map(|lexeme| match lexeme.token {
            RegToken::UsertypeVariable {
                variable,
                text,
                registers: true,
            } if text.contains(&exact) || text.contains(&qualified) =>
            {
                Some(variable)
            }
            _ => None,
        })
    }

    /// Property and method registrations for `aggregate`. Empty when no
    /// registration variable exists.
    pub fn aggregate_bindings(&self, aggregate: &str) -> AggregateBindings {
        let mut bindings = AggregateBindings::default();
        let Some(variable) = self.registration_variable(aggregate) else {
            tracing::debug!(aggregate, "No usertype registration variable");
            return bindings;
        };
        let node_special_case = aggregate == self.idioms.node_aggregate;
        let placeholder = format!("{}::", self.idioms.node_placeholder);

        for lexeme in &self.tokens {
            let RegToken::IndexedAssignment {
                variable: assigned,
                script_name,
                rest,
            } = &lexeme.token
            else {
                continue;
            };
            if *assigned != variable {
                continue;
            }
            let Some(target) = address_target(rest) else {
                continue;
            };

            let is_property = rest.contains(self.idioms.property_wrapper.as_str());
            let target = match target.strip_prefix(placeholder.as_str()) {
                Some(member) if node_special_case && is_property => {
                    format!("{}::{}", self.idioms.node_aggregate, member)
                }
                Some(member) if node_special_case => format!("{aggregate}::{member}"),
                _ => target.to_string(),
            };

            let entry = BindingEntry::new(*script_name, target);
            if is_property {
                bindings.properties.push(entry);
            } else {
                bindings.methods.push(entry);
            }
        }

        bindings
    }

    /// Aggregates exposed through usertype registrations, in file order.
    pub fn exposed_aggregates(&self) -> Vec<ExposedAggregate> {
        let mut result: Vec<ExposedAggregate> = Vec::new();

        for lexeme in &self.tokens {
            let RegToken::UsertypeRegistration {
                type_argument,
                inherits_node,
            } = lexeme.token
            else {
                continue;
            };

            let name = type_argument.rsplit("::").next().unwrap_or(type_argument).trim();
            if name.is_empty() || result.iter().any(|a| a.name == name) {
                continue;
            }
            result.push(ExposedAggregate {
                name: name.to_string(),
                inherits_node,
            });
        }

        result
    }
}

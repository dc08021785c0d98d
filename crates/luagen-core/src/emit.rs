//! LuaLS annotation stub rendering.

use crate::model::{AggregateSymbolTable, FunctionSymbol, ModuleSymbolTable};
use crate::settings::StubSettings;
use crate::types::NIL;

/// Fixed banner at the top of every generated file.
pub const GENERATED_BANNER: [&str; 3] = [
    "-- ---------------------------------------------------------------------- --",
    "-- THIS FILE WAS AUTO-GENERATED BY luagen - DO NOT HAND MODIFY!           --",
    "-- ---------------------------------------------------------------------- --",
];

/// Module functions are called as `abyss.foo()`, aggregate methods as `obj:foo()`.
const MODULE_SEPARATOR: char = '.';
const METHOD_SEPARATOR: char = ':';

/// Renders one function block: doc line, parameter and return annotations,
/// then the empty definition.
pub fn render_function(owner: &str, separator: char, symbol: &FunctionSymbol) -> Vec<String> {
    let signature = &symbol.signature;
    let mut lines = Vec::with_capacity(signature.parameters.len() + 3);

    lines.push(format!("---{}", signature.brief_comment));
    for param in &signature.parameters {
        lines.push(format!(
            "---@param {} {} @ {}",
            param.name, param.type_name, param.comment
        ));
    }
    if !signature.return_type.is_empty() && signature.return_type != NIL {
        lines.push(format!(
            "---@return {} @ {}",
            signature.return_type, signature.return_comment
        ));
    }

    let params: Vec<&str> = signature.parameters.iter().map(|p| p.name.as_str()).collect();
    lines.push(format!(
        "function {owner}{separator}{}({}) end",
        symbol.script_name,
        params.join(", ")
    ));
    lines
}

fn meta_header(stub: &StubSettings, class_name: &str) -> Vec<String> {
    vec![
        "---@meta".to_string(),
        format!("---version: {}", stub.version),
        String::new(),
        format!("---@class {class_name}"),
    ]
}

pub fn render_module(module: &ModuleSymbolTable, stub: &StubSettings) -> Vec<String> {
    let mut lines = meta_header(stub, &module.name);
    lines.push(format!("{} = {{}}", module.name));

    for function in &module.functions {
        lines.push(String::new());
        lines.extend(render_function(&module.name, MODULE_SEPARATOR, function));
    }
    lines
}

pub fn render_aggregate(table: &AggregateSymbolTable, stub: &StubSettings) -> Vec<String> {
    let mut lines = meta_header(stub, &table.name);

    if !table.has_property_bindings {
        lines.push(format!("{} = {{}}", table.name));
    } else {
        lines.push(format!("{} = {{", table.name));
        for property in &table.properties {
            lines.push(format!("---{}", property.comment));
            lines.push(format!("---@type {}", property.type_name));
            lines.push(format!("{} = {},", property.script_name, property.default_value));
            lines.push(String::new());
        }
        lines.push("}".to_string());
    }

    for method in &table.methods {
        lines.push(String::new());
        lines.extend(render_function(&table.name, METHOD_SEPARATOR, method));
    }
    lines
}

/// Final file text: banner, rendered lines, one trailing newline.
pub fn render_file(lines: &[String]) -> String {
    let mut text = String::new();
    for banner in GENERATED_BANNER {
        text.push_str(banner);
        text.push('\n');
    }
    text.push_str(&lines.join("\n"));
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ParameterSpec, PropertySymbol, SignatureEntry};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn function(script_name: &str, return_type: &str, params: &[(&str, &str)]) -> FunctionSymbol {
        FunctionSymbol {
            script_name: script_name.to_string(),
            signature: SignatureEntry {
                qualified_name: format!("X::{script_name}"),
                return_type: return_type.to_string(),
                brief_comment: "Brief.".to_string(),
                return_comment: "Result.".to_string(),
                parameters: params
                    .iter()
                    .map(|(name, type_name)| ParameterSpec {
                        name: name.to_string(),
                        type_name: type_name.to_string(),
                        comment: format!("The {name}."),
                    })
                    .collect(),
            },
        }
    }

    #[test]
    fn test_banner_lines_are_aligned() {
        for line in GENERATED_BANNER {
            assert_eq!(line.len(), 76);
        }
    }

    #[test]
    fn test_render_function_omits_nil_return() {
        let lines = render_function("abyss", '.', &function("log", "nil", &[("level", "string"), ("msg", "string")]));
        assert_eq!(
            lines,
            vec![
                "---Brief.",
                "---@param level string @ The level.",
                "---@param msg string @ The msg.",
                "function abyss.log(level, msg) end",
            ]
        );
    }

    #[test]
    fn test_render_module() {
        let module = ModuleSymbolTable {
            name: "abyss".to_string(),
            functions: vec![function("getTicks", "number", &[])],
        };

        assert_eq!(
            render_module(&module, &StubSettings::default()),
            vec![
                "---@meta",
                "---version: 0.1",
                "",
                "---@class abyss",
                "abyss = {}",
                "",
                "---Brief.",
                "---@return number @ Result.",
                "function abyss.getTicks() end",
            ]
        );
    }

    #[test]
    fn test_render_aggregate_with_properties() {
        let table = AggregateSymbolTable {
            name: "Sprite".to_string(),
            header: PathBuf::from("/src/sprite.h"),
            has_property_bindings: true,
            properties: vec![PropertySymbol {
                script_name: "visible".to_string(),
                type_name: "boolean".to_string(),
                comment: "Visibility.".to_string(),
                default_value: "false".to_string(),
            }],
            methods: vec![function("play", "nil", &[("name", "string")])],
        };

        assert_eq!(
            render_aggregate(&table, &StubSettings::default()),
            vec![
                "---@meta",
                "---version: 0.1",
                "",
                "---@class Sprite",
                "Sprite = {",
                "---Visibility.",
                "---@type boolean",
                "visible = false,",
                "",
                "}",
                "",
                "---Brief.",
                "---@param name string @ The name.",
                "function Sprite:play(name) end",
            ]
        );
    }

    #[test]
    fn test_render_aggregate_without_properties() {
        let table = AggregateSymbolTable {
            name: "Timer".to_string(),
            header: PathBuf::from("/src/timer.h"),
            has_property_bindings: false,
            properties: vec![],
            methods: vec![],
        };

        assert_eq!(
            render_aggregate(&table, &StubSettings::default())[4],
            "Timer = {}"
        );
    }

    #[test]
    fn test_render_file() {
        let text = render_file(&["---@meta".to_string(), "x = {}".to_string()]);
        let expected = format!(
            "{}\n{}\n{}\n---@meta\nx = {{}}\n",
            GENERATED_BANNER[0], GENERATED_BANNER[1], GENERATED_BANNER[2]
        );
        assert_eq!(text, expected);
    }
}

//! Signature extraction from declaration (header) files.
//!
//! Recognizes the narrow declaration idioms used by the engine headers:
//! one member per line, terminated by `;`, `const;` or `= 0;`. Everything else
//! in the file is ignored.

use crate::docs::DocRun;
use crate::error::{LuagenError, LuagenResult};
use crate::lexer::{lex_declarations, DeclToken};
use crate::model::{ParameterSpec, SignatureEntry, SignatureTable};
use crate::types::normalize_type;
use std::path::{Path, PathBuf};

/// Scanning context for one declaration file.
///
/// A file declares at most one top-level aggregate; every member found after
/// it is qualified with its name.
#[derive(Debug)]
struct ScanContext {
    path: PathBuf,
    file_name: String,
    aggregate: Option<String>,
}

impl ScanContext {
    fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            aggregate: None,
        }
    }

    fn open_aggregate(&mut self, name: &str, line: usize) -> LuagenResult<()> {
        if let Some(first) = &self.aggregate {
            return Err(LuagenError::MultipleAggregates {
                path: self.path.clone(),
                line,
                first: first.clone(),
                second: name.to_string(),
            });
        }
        self.aggregate = Some(name.to_string());
        Ok(())
    }

    fn qualify(&self, member: &str) -> String {
        format!("{}::{}", self.aggregate.as_deref().unwrap_or(""), member)
    }

    fn default_comment(&self, line: usize) -> String {
        format!("No description set in {}:{}.", self.file_name, line)
    }
}

/// Extracts every recognizable member signature of `text`, keyed by
/// `Aggregate::member`. Later declarations replace earlier ones with the same key.
pub fn scan_declarations(path: &Path, text: &str) -> LuagenResult<SignatureTable> {
    let mut context = ScanContext::new(path);
    let mut table = SignatureTable::new();
    let mut doc_run = DocRun::default();

    for lexeme in lex_declarations(text) {
        match lexeme.token {
            DeclToken::DocTag(tag) => {
                doc_run.push(tag);
                continue;
            }
            DeclToken::AggregateOpen(name) => context.open_aggregate(name, lexeme.line)?,
            DeclToken::Declaration(line) => {
                if let Some(mut entry) = parse_declaration(line, &context, lexeme.line) {
                    doc_run.apply(&mut entry);
                    if let Some(previous) = table.insert_or_replace(entry) {
                        tracing::trace!(
                            member = %previous.qualified_name,
                            line = lexeme.line,
                            "Replacing earlier declaration"
                        );
                    }
                }
            }
            DeclToken::OtherComment | DeclToken::Other => {}
        }
        doc_run.clear();
    }

    tracing::debug!(
        path = %path.display(),
        aggregate = context.aggregate.as_deref().unwrap_or(""),
        signatures = table.len(),
        "Scanned declarations"
    );
    Ok(table)
}

fn parse_declaration(line: &str, context: &ScanContext, line_number: usize) -> Option<SignatureEntry> {
    let open = line.find('(')?;
    let head = line[..open].trim_end();
    let token = head.rsplit(char::is_whitespace).next()?;
    let member = token.trim_start_matches(['*', '&']);
    if member.is_empty() {
        return None;
    }
    let return_spelling = &head[..head.len() - member.len()];

    let params_start = open + 1;
    let params_end = matching_paren(&line[params_start..])
        .map(|offset| params_start + offset)
        .unwrap_or(line.len());

    let default_comment = context.default_comment(line_number);
    let parameters = split_top_level(&line[params_start..params_end])
        .into_iter()
        .enumerate()
        .map(|(idx, param)| parse_parameter(param, idx, &default_comment))
        .collect::<Vec<_>>();

    Some(SignatureEntry {
        qualified_name: context.qualify(member),
        return_type: normalize_type(return_spelling),
        brief_comment: default_comment.clone(),
        return_comment: default_comment,
        parameters,
    })
}

fn parse_parameter(param: &str, index: usize, default_comment: &str) -> ParameterSpec {
    let (type_spelling, name) = match named_parameter(param) {
        Some((type_spelling, name)) => (type_spelling, name.to_string()),
        None => (param, format!("arg{}", index + 1)),
    };

    ParameterSpec {
        name,
        type_name: normalize_type(type_spelling),
        comment: default_comment.to_string(),
    }
}

/// Words that can end a type spelling but never name a parameter.
const TYPE_KEYWORDS: &[&str] = &[
    "int", "short", "long", "char", "float", "double", "bool", "signed", "unsigned", "void", "auto",
];

/// Words that cannot form a type on their own.
const TYPE_PREFIXES: &[&str] = &["const", "volatile", "struct", "class", "enum"];

/// Splits `type name` into its parts, or `None` when the parameter is unnamed
/// (`Sprite *`, `const Sprite&`, `unsigned int`).
fn named_parameter(param: &str) -> Option<(&str, &str)> {
    let split = param.rfind(char::is_whitespace)?;
    let (type_spelling, token) = (param[..split].trim_end(), param[split..].trim());
    if token.ends_with(['*', '&']) {
        return None;
    }

    let name = token.trim_start_matches(['*', '&']);
    let is_identifier = name.starts_with(|c: char| c.is_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_alphanumeric() || c == '_');
    let has_type = type_spelling
        .split_whitespace()
        .any(|word| !TYPE_PREFIXES.contains(&word));

    (is_identifier && has_type && !TYPE_KEYWORDS.contains(&name)).then_some((type_spelling, name))
}

/// Splits a parameter list on commas outside any bracket pair, dropping default
/// arguments. An empty or `void` list has no parameters.
fn split_top_level(list: &str) -> Vec<&str> {
    let list = list.trim();
    if list.is_empty() || list == "void" {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut depth = 0i32;
    let mut start = 0;
    for (idx, ch) in list.char_indices() {
        match ch {
            '(' | '<' | '{' | '[' => depth += 1,
            ')' | '>' | '}' | ']' => depth -= 1,
            ',' if depth == 0 => {
                parts.push(&list[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);

    parts
        .into_iter()
        .map(|part| strip_default_argument(part).trim())
        .collect()
}

fn strip_default_argument(param: &str) -> &str {
    let mut depth = 0i32;
    for (idx, ch) in param.char_indices() {
        match ch {
            '(' | '<' | '{' | '[' => depth += 1,
            ')' | '>' | '}' | ']' => depth -= 1,
            '=' if depth == 0 => return &param[..idx],
            _ => {}
        }
    }
    param
}

/// Byte offset of the `)` closing an already-opened `(`.
fn matching_paren(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(idx),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

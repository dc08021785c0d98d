//! Line lexer for declaration and registration sources.
//!
//! Both scanners work on a stream of typed tokens instead of raw lines. A line
//! that fits none of the recognized shapes becomes [`DeclToken::Other`] or is
//! dropped from the registration stream; neither is an error.

use crate::settings::BindingIdioms;
use once_cell::sync::Lazy;
use regex::Regex;

static DOC_TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^///\s*[\\@](\w+)(?:\s+(.*))?$").unwrap());
static AGGREGATE_OPEN_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:class|struct)\s+([A-Za-z_]\w*)").unwrap());
static ADDRESS_OF_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&\s*([A-Za-z_][\w:]*)").unwrap());
static AUTO_VARIABLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^auto\s+([A-Za-z_]\w*)").unwrap());
static INDEXED_ASSIGNMENT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([A-Za-z_]\w*)\["([^"]*)"\](.*)$"#).unwrap());

const NODISCARD: &str = "[[nodiscard]]";

/// A token together with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme<T> {
    pub line: usize,
    pub token: T,
}

/// Structured doc comment tag (`/// \brief ...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocTag<'a> {
    Brief(&'a str),
    Return(&'a str),
    Param { name: &'a str, text: &'a str },
    /// Any other tag; part of a doc run but carries nothing we use.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclToken<'a> {
    DocTag(DocTag<'a>),
    /// `class Name ... {` or `struct Name ... {`
    AggregateOpen(&'a str),
    /// A line shaped like a member declaration, trimmed and without `[[nodiscard]]`.
    Declaration(&'a str),
    /// Plain `//` line, untagged `///` line, or block comment text. Never a
    /// declaration, and it breaks a doc run.
    OtherComment,
    Other,
}

/// Tokenizes declaration (header) text.
pub fn lex_declarations(text: &str) -> Vec<Lexeme<DeclToken<'_>>> {
    text.lines()
        .enumerate()
        .map(|(idx, raw)| Lexeme {
            line: idx + 1,
            token: classify_declaration_line(raw),
        })
        .collect()
}

fn classify_declaration_line(raw: &str) -> DeclToken<'_> {
    let mut line = raw.trim();

    if let Some(caps) = DOC_TAG_PATTERN.captures(line) {
        return DeclToken::DocTag(doc_tag(caps));
    }

    if is_comment(line) {
        return DeclToken::OtherComment;
    }

    if let Some(rest) = line.strip_prefix(NODISCARD) {
        line = rest.trim_start();
    }

    if line.ends_with('{') {
        if let Some(name) = AGGREGATE_OPEN_PATTERN.captures(line).and_then(|c| c.get(1)) {
            return DeclToken::AggregateOpen(name.as_str());
        }
    }

    if is_declaration_shape(line) {
        return DeclToken::Declaration(line);
    }

    DeclToken::Other
}

fn doc_tag(caps: regex::Captures<'_>) -> DocTag<'_> {
    let body = caps.get(2).map_or("", |m| m.as_str().trim());
    match caps.get(1).map_or("", |m| m.as_str()) {
        "brief" => DocTag::Brief(body),
        "return" | "returns" => DocTag::Return(body),
        "param" => {
            let (name, text) = body
                .split_once(char::is_whitespace)
                .unwrap_or((body, ""));
            DocTag::Param {
                name,
                text: text.trim(),
            }
        }
        _ => DocTag::Other,
    }
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

/// Contains a parameter list opener and ends a statement, a const-qualified
/// statement, or a pure-virtual declaration.
fn is_declaration_shape(line: &str) -> bool {
    line.contains('(') && (line.contains(");") || line.contains(") const;") || line.contains(" = 0;"))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegToken<'a> {
    /// `module.set_function("name", ...)`; `rest` is everything after the name literal.
    ModuleFunction { script_name: &'a str, rest: &'a str },
    /// `auto var = ...`; `text` is the whole trimmed line. `registers` is set
    /// when the line contains a usertype registration call.
    UsertypeVariable {
        variable: &'a str,
        text: &'a str,
        registers: bool,
    },
    /// `module.new_usertype<Type>` or the node-capability factory call.
    UsertypeRegistration { type_argument: &'a str, inherits_node: bool },
    /// `var["name"] ...`; `rest` is everything after the closing `]`.
    IndexedAssignment {
        variable: &'a str,
        script_name: &'a str,
        rest: &'a str,
    },
}

/// Tokenizes registration call-site text. One line may produce several tokens
/// (`auto spriteType = module.new_usertype<Sprite>(...)` is both a variable and
/// a registration).
pub fn lex_registrations<'a>(text: &'a str, idioms: &BindingIdioms) -> Vec<Lexeme<RegToken<'a>>> {
    let set_function = format!("{}.set_function(\"", idioms.module_variable);
    let generic_argument = format!("<{}>", idioms.node_placeholder);
    let mut tokens = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        let mut push = |token| tokens.push(Lexeme { line: idx + 1, token });

        if let Some(start) = line.find(&set_function) {
            let after = &line[start + set_function.len()..];
            if let Some((script_name, rest)) = after.split_once('"') {
                push(RegToken::ModuleFunction {
                    script_name: script_name.trim(),
                    rest,
                });
            }
        }

        let inherits_node = line.contains(&idioms.node_usertype_call);
        let registers = inherits_node || line.contains(&idioms.usertype_call);

        if let Some(variable) = AUTO_VARIABLE_PATTERN.captures(line).and_then(|c| c.get(1)) {
            push(RegToken::UsertypeVariable {
                variable: variable.as_str(),
                text: line,
                registers,
            });
        }

        if registers && !line.contains(&generic_argument) {
            if let Some(type_argument) = first_type_argument(line) {
                push(RegToken::UsertypeRegistration {
                    type_argument,
                    inherits_node,
                });
            }
        }

        if let Some(caps) = INDEXED_ASSIGNMENT_PATTERN.captures(line) {
            if let (Some(variable), Some(name), Some(rest)) = (caps.get(1), caps.get(2), caps.get(3)) {
                push(RegToken::IndexedAssignment {
                    variable: variable.as_str(),
                    script_name: name.as_str().trim(),
                    rest: rest.as_str(),
                });
            }
        }
    }

    tokens
}

/// Text between the first `<` and the first `>` of a line.
fn first_type_argument(line: &str) -> Option<&str> {
    let open = line.find('<')?;
    let close = open + line[open..].find('>')?;
    Some(line[open + 1..close].trim())
}

/// The qualified identifier following the first address-of operator.
pub fn address_target(text: &str) -> Option<&str> {
    ADDRESS_OF_PATTERN
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_tokens() {
        let text = "class Sprite : public Node {\n  /// \\brief Plays.\n  [[nodiscard]] bool IsPlaying() const;\n  // plain\n";
        let tokens: Vec<_> = lex_declarations(text).into_iter().map(|l| l.token).collect();

        assert_eq!(
            tokens,
            vec![
                DeclToken::AggregateOpen("Sprite"),
                DeclToken::DocTag(DocTag::Brief("Plays.")),
                DeclToken::Declaration("bool IsPlaying() const;"),
                DeclToken::OtherComment,
            ]
        );
    }

    #[test]
    fn test_doc_tag_variants() {
        let tokens: Vec<_> = lex_declarations(
            "/// \\param x The x coordinate.\n/// @returns Count.\n/// \\note Ignored.\n/// plain text",
        )
        .into_iter()
        .map(|l| l.token)
        .collect();

        assert_eq!(
            tokens,
            vec![
                DeclToken::DocTag(DocTag::Param {
                    name: "x",
                    text: "The x coordinate."
                }),
                DeclToken::DocTag(DocTag::Return("Count.")),
                DeclToken::DocTag(DocTag::Other),
                DeclToken::OtherComment,
            ]
        );
    }

    #[test]
    fn test_commented_out_declarations_are_comments() {
        let text = "// void Play();\n  // int Old(int a);\n/* bool Hidden() const; */\n * void Doc();\n///void Stale();";
        let tokens: Vec<_> = lex_declarations(text).into_iter().map(|l| l.token).collect();
        assert_eq!(tokens, vec![DeclToken::OtherComment; 5]);
    }

    #[test]
    fn test_non_registration_auto_line() {
        let idioms = BindingIdioms::default();
        let tokens = lex_registrations("auto result = std::make_unique<Sprite>();", &idioms);
        assert_eq!(
            tokens[0].token,
            RegToken::UsertypeVariable {
                variable: "result",
                text: "auto result = std::make_unique<Sprite>();",
                registers: false,
            }
        );
        assert_eq!(tokens.len(), 1);
    }

    #[test]
    fn test_forward_declaration_is_not_an_aggregate() {
        let tokens = lex_declarations("class Sprite;");
        assert_eq!(tokens[0].token, DeclToken::Other);
    }

    #[test]
    fn test_registration_tokens() {
        let idioms = BindingIdioms::default();
        let text = r#"
            module.set_function("log", &ScriptHost::LuaLog, this);
            auto spriteType = module.new_usertype<Sprite>("Sprite", sol::no_constructor);
            spriteType["play"] = &Sprite::Play;
            auto nodeType = module.new_usertype<T>(name, sol::no_constructor);
        "#;

        let tokens: Vec<_> = lex_registrations(text, &idioms)
            .into_iter()
            .map(|l| (l.line, l.token))
            .collect();

        assert_eq!(
            tokens,
            vec![
                (
                    2,
                    RegToken::ModuleFunction {
                        script_name: "log",
                        rest: ", &ScriptHost::LuaLog, this);"
                    }
                ),
                (
                    3,
                    RegToken::UsertypeVariable {
                        variable: "spriteType",
                        text: r#"auto spriteType = module.new_usertype<Sprite>("Sprite", sol::no_constructor);"#,
                        registers: true,
                    }
                ),
                (
                    3,
                    RegToken::UsertypeRegistration {
                        type_argument: "Sprite",
                        inherits_node: false
                    }
                ),
                (
                    4,
                    RegToken::IndexedAssignment {
                        variable: "spriteType",
                        script_name: "play",
                        rest: " = &Sprite::Play;"
                    }
                ),
                (
                    5,
                    RegToken::UsertypeVariable {
                        variable: "nodeType",
                        text: "auto nodeType = module.new_usertype<T>(name, sol::no_constructor);",
                        registers: true,
                    }
                ),
            ]
        );
    }

    #[test]
    fn test_address_target() {
        assert_eq!(address_target(", &ScriptHost::LuaLog, this);"), Some("ScriptHost::LuaLog"));
        assert_eq!(address_target("sol::property(&T::GetX, &T::SetX);"), Some("T::GetX"));
        assert_eq!(address_target("[this]() { return 1; }"), None);
    }
}

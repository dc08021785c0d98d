//! Native type spelling normalization.
//!
//! Maps a C++ type spelling as it appears in a declaration (`const std::vector<uint32_t>&`,
//! `sol::protected_function`, `LibAbyss::Palette *`) to the small vocabulary the Lua
//! annotations understand: `number`, `string`, `boolean`, `function`, `nil`, an
//! aggregate name, or `T[]`.

/// Script-visible type name for a missing value / `void`.
pub const NIL: &str = "nil";

/// Sequence wrapper; each occurrence in the raw spelling adds one `[]` suffix.
const SEQUENCE_WRAPPER: &str = "std::vector<";

/// Single-element wrappers whose name and angle brackets are removed.
const WRAPPERS: &[&str] = &[
    "std::vector<",
    "std::unique_ptr<",
    "std::shared_ptr<",
    "std::optional<",
    "std::tuple<",
];

/// Qualifiers and specifiers that never change the script-visible type.
const QUALIFIERS: &[&str] = &[
    "const",
    "volatile",
    "virtual",
    "static",
    "inline",
    "explicit",
    "constexpr",
    "[[nodiscard]]",
];

/// Words that combine into integral spellings such as `unsigned long long`.
const INTEGRAL_WORDS: &[&str] = &["unsigned", "signed", "int", "short", "long"];

/// Normalizes a raw native type spelling.
///
/// Idempotent: `normalize_type(&normalize_type(x)) == normalize_type(x)`.
pub fn normalize_type(raw: &str) -> String {
    if is_callable(raw) {
        return "function".to_string();
    }

    let sequence_depth = raw.matches(SEQUENCE_WRAPPER).count();

    let mut text = raw.to_string();
    for wrapper in WRAPPERS {
        text = strip_wrapper(&text, wrapper);
    }

    let text = text.replace(['*', '&'], " ");
    let words: Vec<&str> = text
        .split_whitespace()
        .filter(|word| !QUALIFIERS.contains(word))
        .collect();
    let base = words.join(" ");

    let mut result = lookup_primitive(&base)
        .map(str::to_string)
        .unwrap_or_else(|| {
            let last = base.rsplit("::").next().unwrap_or(&base);
            lookup_primitive(last).unwrap_or(last).to_string()
        });

    for _ in 0..sequence_depth {
        result.push_str("[]");
    }
    result
}

/// Whether a raw spelling denotes any callable or function-object form.
pub fn is_callable(raw: &str) -> bool {
    raw.contains("std::function<") || raw.contains("sol::")
}

/// Default value placed in a property table for a normalized type.
pub fn default_value_for(type_name: &str) -> &'static str {
    match type_name {
        "number" => "0",
        "boolean" => "false",
        "string" => "''",
        _ => NIL,
    }
}

fn lookup_primitive(spelling: &str) -> Option<&'static str> {
    let mapped = match spelling {
        "std::string" | "std::string_view" | "std::u16string" => "string",
        "bool" => "boolean",
        "void" => NIL,
        "float" | "double" | "size_t" | "ssize_t" | "std::size_t" => "number",
        "int8_t" | "int16_t" | "int32_t" | "int64_t" => "number",
        "uint8_t" | "uint16_t" | "uint32_t" | "uint64_t" => "number",
        "std::int8_t" | "std::int16_t" | "std::int32_t" | "std::int64_t" => "number",
        "std::uint8_t" | "std::uint16_t" | "std::uint32_t" | "std::uint64_t" => "number",
        _ if !spelling.is_empty()
            && spelling
                .split(' ')
                .all(|word| INTEGRAL_WORDS.contains(&word)) =>
        {
            "number"
        }
        _ => return None,
    };
    Some(mapped)
}

/// Removes every `wrapper<...>` occurrence, keeping the inner text and whatever
/// surrounds the wrapper.
fn strip_wrapper(text: &str, wrapper: &str) -> String {
    let mut result = text.to_string();
    while let Some(start) = result.find(wrapper) {
        let inner_start = start + wrapper.len();
        let close = matching_angle(&result[inner_start..]).map(|offset| inner_start + offset);

        let mut next = String::with_capacity(result.len());
        next.push_str(&result[..start]);
        match close {
            Some(close) => {
                next.push_str(&result[inner_start..close]);
                next.push_str(&result[close + 1..]);
            }
            None => next.push_str(&result[inner_start..]),
        }
        result = next;
    }
    result
}

/// Byte offset of the `>` closing an already-opened `<`.
fn matching_angle(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (idx, ch) in text.char_indices() {
        match ch {
            '<' => depth += 1,
            '>' if depth == 0 => return Some(idx),
            '>' => depth -= 1,
            _ => {}
        }
    }
    None
}

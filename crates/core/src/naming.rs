//! Identifier rules shared by the code generators
//!
//! - Enum key transliteration (`snake_case`, `snake_case_upper`)
//! - Python keyword escaping
//! - CamelCase names for synthesized GraphQL types

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Python keywords that cannot be used as attribute names
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

static WORD_SEPARATOR_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_\-]+").unwrap());
static TYPE_PUNCTUATION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ !\[\]]+").unwrap());

/// Style applied to enum symbols when they become Python member names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumKeyStyle {
    /// `FirstValue` becomes `first_value`
    SnakeCase,
    /// `FirstValue` becomes `FIRST_VALUE`
    SnakeCaseUpper,
}

impl EnumKeyStyle {
    /// All styles, in the order they are listed to users
    pub const ALL: [EnumKeyStyle; 2] = [EnumKeyStyle::SnakeCase, EnumKeyStyle::SnakeCaseUpper];

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(|style| style.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for EnumKeyStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnumKeyStyle::SnakeCase => write!(f, "snake_case"),
            EnumKeyStyle::SnakeCaseUpper => write!(f, "snake_case_upper"),
        }
    }
}

impl std::str::FromStr for EnumKeyStyle {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "snake_case" => Ok(EnumKeyStyle::SnakeCase),
            "snake_case_upper" => Ok(EnumKeyStyle::SnakeCaseUpper),
            _ => Err(ConversionError::UnsupportedStyle {
                style: s.to_string(),
                supported: EnumKeyStyle::supported(),
            }),
        }
    }
}

/// Convert an enum symbol into a member name using the given style
///
/// An underscore is inserted where an uppercase run starts inside the symbol,
/// then the result is case-folded. Without a style the symbol is returned
/// unchanged.
pub fn convert_enum_key(key: &str, style: Option<EnumKeyStyle>) -> String {
    let Some(style) = style else {
        return key.to_string();
    };

    let mut snaked = String::with_capacity(key.len() + 4);
    let mut previous: Option<char> = None;
    for ch in key.chars() {
        if ch.is_uppercase() && previous.is_some_and(|p| p.is_lowercase() || p.is_numeric()) {
            snaked.push('_');
        }
        snaked.push(ch);
        previous = Some(ch);
    }

    match style {
        EnumKeyStyle::SnakeCase => snaked.to_lowercase(),
        EnumKeyStyle::SnakeCaseUpper => snaked.to_uppercase(),
    }
}

/// True if the name is a reserved Python keyword
pub fn is_python_keyword(name: &str) -> bool {
    PYTHON_KEYWORDS.contains(&name)
}

/// Suffix Python keywords with `_` so they can be used as identifiers
pub fn python_identifier(name: &str) -> String {
    if is_python_keyword(name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

/// CamelCase name for a rendered GraphQL type token
///
/// Word separators are removed and every word is capitalized. List
/// brackets become a `List` prefix. Tokens without a trailing `!` are
/// nullable and get an `Optional` prefix.
///
/// `String!` gives `String`, `[String!]` gives `OptionalListString`.
pub fn camel_type(type_token: &str) -> String {
    let spaced = WORD_SEPARATOR_REGEX.replace_all(type_token, " ");
    let spaced = spaced.replace('[', "List ");

    let mut titled = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for ch in spaced.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                titled.extend(ch.to_uppercase());
            } else {
                titled.push(ch);
            }
            at_word_start = false;
        } else {
            titled.push(ch);
            at_word_start = !ch.is_numeric();
        }
    }

    let camelled = TYPE_PUNCTUATION_REGEX.replace_all(&titled, "").into_owned();
    if type_token.ends_with('!') {
        camelled
    } else {
        format!("Optional{}", camelled)
    }
}

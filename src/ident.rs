//! Identifier validity and reserved-keyword checks for generated code.
//!
//! The keyword table is an injected value rather than a hard-coded constant
//! so the generator can be retargeted to a different output language without
//! touching the validation logic.

use std::collections::HashSet;

/// Reserved words of the default target language (C++), including the
/// alternative operator tokens.
const CPP_KEYWORDS: &[&str] = &[
    "alignas",
    "alignof",
    "and",
    "and_eq",
    "asm",
    "auto",
    "bitand",
    "bitor",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "char8_t",
    "char16_t",
    "char32_t",
    "class",
    "compl",
    "concept",
    "const",
    "const_cast",
    "consteval",
    "constexpr",
    "constinit",
    "continue",
    "co_await",
    "co_return",
    "co_yield",
    "decltype",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "noexcept",
    "not",
    "not_eq",
    "nullptr",
    "operator",
    "or",
    "or_eq",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "requires",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_assert",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "thread_local",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
    "xor",
    "xor_eq",
];

/// Returns `true` iff `name` is a legal identifier: non-empty, first
/// character a letter or underscore, remainder alphanumeric or underscore.
///
/// No length cap is imposed here; downstream language limits are the
/// consumer's concern.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Case-insensitive set of reserved words for the target language.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    // Stored lower-cased; lookups lower-case the probe.
    words: HashSet<String>,
}

impl KeywordTable {
    /// Build a table from an arbitrary word list (e.g. from a config file).
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| word.as_ref().to_ascii_lowercase())
                .collect(),
        }
    }

    /// The built-in C++ reserved-word table.
    pub fn cpp() -> Self {
        Self::new(CPP_KEYWORDS.iter().copied())
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        self.words.contains(&name.to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::cpp()
    }
}

//! Go reserved words and their escaping.

/// Go keywords that cannot be used as identifiers or package names.
pub const GO_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Check if a name is a Go keyword.
pub fn is_keyword(name: &str) -> bool {
    GO_KEYWORDS.contains(&name)
}

/// Escape a keyword by appending an underscore; other names pass through.
pub fn escape_keyword(name: &str) -> String {
    if is_keyword(name) {
        format!("{}_", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_keyword() {
        assert_eq!(escape_keyword("type"), "type_");
        assert_eq!(escape_keyword("user"), "user");
        assert!(is_keyword("package"));
        assert!(!is_keyword("Package"));
    }
}

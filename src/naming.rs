//! Label-to-identifier transforms shared by the template builder and the
//! code generators.
//!
//! Template labels are free-form human text ("Master Data", "Begründung der
//! Maßnahme"); everything downstream wants stable, identifier-safe names.
//! All transforms here are pure functions of their input so that repeated
//! compilations derive identical identifiers.

/// Convert a human-readable label to a camelCase identifier.
///
/// Words are alphanumeric runs; everything else is a separator. The first
/// word is lowercased entirely, subsequent words are capitalized.
///
/// # Example
///
/// ```
/// use frameforge::naming::identifier_from_label;
/// assert_eq!(identifier_from_label("Master Data"), "masterData");
/// assert_eq!(identifier_from_label("Revenue"), "revenue");
/// ```
pub fn identifier_from_label(label: &str) -> String {
    let words: Vec<String> = label
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect();
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                out.extend(first.to_uppercase());
                out.push_str(&chars.as_str().to_lowercase());
            }
        }
    }
    if out
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(false)
    {
        out.insert(0, '_');
    }
    out
}

/// Convert a camelCase identifier to a PascalCase type name.
pub fn type_name_from_identifier(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Convert a camelCase identifier to a snake_case Rust field name.
pub fn snake_case_from_identifier(identifier: &str) -> String {
    let mut out = String::new();
    for c in identifier.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Replace German-specific characters with their ASCII expansions before an
/// identifier is derived ("Maßnahme" → "Massnahme", "Begründung" →
/// "Begruendung").
pub fn transliterate_german(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'ä' => out.push_str("ae"),
            'ö' => out.push_str("oe"),
            'ü' => out.push_str("ue"),
            'Ä' => out.push_str("Ae"),
            'Ö' => out.push_str("Oe"),
            'Ü' => out.push_str("Ue"),
            'ß' => out.push_str("ss"),
            _ => out.push(c),
        }
    }
    out
}

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "crate", "else", "enum", "extern", "false", "fn", "for",
    "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return",
    "self", "Self", "static", "struct", "super", "trait", "true", "type", "unsafe", "use", "where",
    "while", "async", "await", "dyn",
];

/// Escape a generated field name that collides with a Rust keyword.
pub fn sanitize_rust_identifier(name: &str) -> String {
    if RUST_KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_from_label() {
        assert_eq!(identifier_from_label("Revenue"), "revenue");
        assert_eq!(identifier_from_label("Master Data"), "masterData");
        assert_eq!(identifier_from_label("General"), "general");
        assert_eq!(identifier_from_label("  spaced   out  "), "spacedOut");
        assert_eq!(identifier_from_label("EUR/USD rate"), "eurUsdRate");
        assert_eq!(identifier_from_label(""), "");
    }

    #[test]
    fn test_identifier_leading_digit() {
        assert_eq!(identifier_from_label("2023 Revenue"), "_2023Revenue");
    }

    #[test]
    fn test_type_name_from_identifier() {
        assert_eq!(type_name_from_identifier("masterData"), "MasterData");
        assert_eq!(type_name_from_identifier("revenue"), "Revenue");
        assert_eq!(type_name_from_identifier(""), "");
    }

    #[test]
    fn test_snake_case_from_identifier() {
        assert_eq!(snake_case_from_identifier("masterData"), "master_data");
        assert_eq!(snake_case_from_identifier("revenue"), "revenue");
        assert_eq!(
            snake_case_from_identifier("reportObligation"),
            "report_obligation"
        );
    }

    #[test]
    fn test_transliterate_german() {
        assert_eq!(transliterate_german("Maßnahme"), "Massnahme");
        assert_eq!(transliterate_german("Begründung"), "Begruendung");
        assert_eq!(transliterate_german("Ökologie"), "Oekologie");
        assert_eq!(transliterate_german("plain"), "plain");
    }

    #[test]
    fn test_sanitize_rust_identifier() {
        assert_eq!(sanitize_rust_identifier("type"), "r#type");
        assert_eq!(sanitize_rust_identifier("revenue"), "revenue");
    }
}

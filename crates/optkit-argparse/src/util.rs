//! String helpers shared by the registry, parser and formatter.

/// Remove up to two leading hyphens (`--name` / `-n` -> `name` / `n`).
pub fn strip_leading_hyphens(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix("--") {
        rest
    } else if let Some(rest) = s.strip_prefix('-') {
        rest
    } else {
        s
    }
}

/// Remove one layer of enclosing double quotes (`"one two"` -> `one two`).
///
/// The quotes are kept when the inner text contains another double quote.
pub fn strip_enclosing_quotes(s: &str) -> &str {
    if s.len() > 1 && s.starts_with('"') && s.ends_with('"') {
        let inner = &s[1..s.len() - 1];
        if !inner.contains('"') {
            return inner;
        }
    }
    s
}

/// Split a camel-case identifier into space separated words.
///
/// `outputDir` -> `output Dir`, `parseHTTPResponse` -> `parse HTTP Response`.
pub fn un_camel_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_ascii_uppercase() {
            let prev_upper = chars[i - 1].is_ascii_uppercase();
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if !prev_upper || next_lower {
                out.push(' ');
            }
        }
        out.push(c);
    }
    out
}

/// Collapse runs of whitespace and hyphens into a single underscore.
pub fn underscore_separators(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c == '-' || c.is_whitespace() {
            if !in_run {
                out.push('_');
                in_run = true;
            }
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Whether `s` is a non-empty run of ASCII word characters (`\w+`).
pub fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Whether `token` parses as a floating point literal, sign included.
///
/// Spelled-out values such as `inf` or `nan` are not numbers here.
pub fn is_number(token: &str) -> bool {
    token.bytes().any(|b| b.is_ascii_digit()) && token.parse::<f64>().is_ok()
}

/// Remove trailing whitespace.
pub fn rtrim(s: &str) -> &str {
    s.trim_end()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_at_most_two_hyphens() {
        assert_eq!(strip_leading_hyphens("--file"), "file");
        assert_eq!(strip_leading_hyphens("-f"), "f");
        assert_eq!(strip_leading_hyphens("---x"), "-x");
        assert_eq!(strip_leading_hyphens("plain"), "plain");
        assert_eq!(strip_leading_hyphens(""), "");
    }

    #[test]
    fn strips_only_balanced_quotes() {
        assert_eq!(strip_enclosing_quotes("\"one two\""), "one two");
        assert_eq!(strip_enclosing_quotes("\"a\"b\""), "\"a\"b\"");
        assert_eq!(strip_enclosing_quotes("\""), "\"");
        assert_eq!(strip_enclosing_quotes("\"open"), "\"open");
    }

    #[test]
    fn splits_camel_case_words() {
        assert_eq!(un_camel_case("outputDir"), "output Dir");
        assert_eq!(un_camel_case("parseHTTPResponse"), "parse HTTP Response");
        assert_eq!(un_camel_case("file"), "file");
        assert_eq!(un_camel_case("URL"), "URL");
    }

    #[test]
    fn collapses_separators() {
        assert_eq!(underscore_separators("dry-run  mode"), "dry_run_mode");
        assert_eq!(underscore_separators("a - b"), "a_b");
    }

    #[test]
    fn number_detection() {
        assert!(is_number("-1"));
        assert!(is_number("-1.5e3"));
        assert!(is_number("42"));
        assert!(!is_number("-f"));
        assert!(!is_number("-"));
        assert!(!is_number("-inf"));
        assert!(!is_number("-nan"));
    }
}

//! Casing helpers used when deriving file names and identifiers from the
//! app's display name.
//!
//! | Input            | snake            | kebab            | Pascal         |
//! |------------------|------------------|------------------|----------------|
//! | "My Awesome App" | "my_awesome_app" | "my-awesome-app" | "MyAwesomeApp" |
//! | "HTTPClient"     | "http_client"    | "http-client"    | "HttpClient"   |

/// Convert a string to snake_case.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Convert a string to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// Convert a string to PascalCase.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Lowercase ASCII alphanumeric identifier, suitable as the last segment of a
/// bundle or package id. `None` when nothing usable remains.
pub fn to_identifier(s: &str) -> Option<String> {
    let ident: String = split_words(s)
        .concat()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect();

    match ident.chars().next() {
        None => None,
        // Package segments cannot start with a digit.
        Some(first) if first.is_ascii_digit() => Some(format!("app{ident}")),
        Some(_) => Some(ident),
    }
}

/// Split a string into lowercase words.
///
/// Boundaries: `_`, `-`, whitespace, a lower-to-upper transition (`myApp`),
/// and the end of an acronym (`HTTPServer` -> `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(&next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}

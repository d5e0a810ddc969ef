//! Placeholder substitution for template files.

use std::collections::HashMap;

use mobiforge_core::domain::{
    AppConfig,
    naming::{to_kebab_case, to_pascal_case, to_snake_case},
};

/// Variables available to template files.
///
/// ## Built-in Variables
///
/// | Variable          | Example          |
/// |-------------------|------------------|
/// | `APP_NAME`        | "Field Notes"    |
/// | `APP_NAME_SNAKE`  | "field_notes"    |
/// | `APP_NAME_KEBAB`  | "field-notes"    |
/// | `APP_NAME_PASCAL` | "FieldNotes"     |
/// | `TEMPLATE_ID`     | "tabbed"         |
/// | `PLATFORM`        | "ios"            |
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<String, String>,
}

impl RenderContext {
    pub fn new(app_name: &str) -> Self {
        let mut variables = HashMap::new();
        variables.insert("APP_NAME".to_string(), app_name.to_string());
        variables.insert("APP_NAME_SNAKE".to_string(), to_snake_case(app_name));
        variables.insert("APP_NAME_KEBAB".to_string(), to_kebab_case(app_name));
        variables.insert("APP_NAME_PASCAL".to_string(), to_pascal_case(app_name));
        Self { variables }
    }

    /// Context for one generation request.
    pub fn for_config(config: &AppConfig) -> Self {
        Self::new(config.name())
            .with_variable("TEMPLATE_ID", config.template_id().as_str())
            .with_variable("PLATFORM", config.platform().as_str())
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{VARIABLE}}` with its value.
    ///
    /// One left-to-right pass: inserted values are never scanned again, so a
    /// value that itself looks like a placeholder is written out verbatim.
    /// Unknown placeholders are left untouched.
    pub fn render(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after_open = &rest[open + 2..];

            let value = after_open
                .find("}}")
                .and_then(|close| Some((close, self.get(&after_open[..close])?)));
            match value {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &after_open[close + 2..];
                }
                None => {
                    out.push_str("{{");
                    rest = after_open;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_casing_variants() {
        let ctx = RenderContext::new("My Awesome App");
        assert_eq!(ctx.get("APP_NAME_SNAKE"), Some("my_awesome_app"));
        assert_eq!(ctx.get("APP_NAME_KEBAB"), Some("my-awesome-app"));
        assert_eq!(ctx.get("APP_NAME_PASCAL"), Some("MyAwesomeApp"));
    }

    #[test]
    fn renders_known_and_keeps_unknown() {
        let config = AppConfig::builder()
            .name("Shop")
            .template("tabbed")
            .platform("Android")
            .build()
            .unwrap();
        let ctx = RenderContext::for_config(&config);

        assert_eq!(
            ctx.render("{{APP_NAME}} on {{PLATFORM}} via {{TEMPLATE_ID}} {{YEAR}}"),
            "Shop on android via tabbed {{YEAR}}"
        );
    }

    #[test]
    fn inserted_values_are_not_rendered_again() {
        let config = AppConfig::builder()
            .name("{{PLATFORM}}")
            .template("blank")
            .platform("ios")
            .build()
            .unwrap();

        let outputs: std::collections::HashSet<String> = (0..64)
            .map(|_| RenderContext::for_config(&config).render("{{APP_NAME}} / {{PLATFORM}}"))
            .collect();
        assert_eq!(outputs.len(), 1);
        assert!(outputs.contains("{{PLATFORM}} / ios"));
    }

    #[test]
    fn unclosed_and_nested_braces_stay_literal() {
        let ctx = RenderContext::new("Shop");
        assert_eq!(ctx.render("{{APP_NAME"), "{{APP_NAME");
        assert_eq!(ctx.render("{{ {{APP_NAME}} }}"), "{{ Shop }}");
        assert_eq!(ctx.render("{{}}{{APP_NAME}}"), "{{}}Shop");
    }
}

//! Templates compiled into the binary.
//!
//! | id            | navigation | screens               |
//! |---------------|------------|-----------------------|
//! | `blank`       | none       | -                     |
//! | `tabbed`      | tabs       | home, search, profile |
//! | `list-detail` | stack      | list, detail          |
//!
//! Each stamps the app name and template id and adds a `README.md`.

use mobiforge_core::domain::{
    AppConfig, Artifact, MobileApp, Navigation, Screen, Template, TemplateId, TemplateMetadata,
};

use super::render::RenderContext;

const README: &str = "# {{APP_NAME}}\n\n\
Generated by mobiforge from the `{{TEMPLATE_ID}}` template for {{PLATFORM}}.\n";

/// All built-in templates, sorted by id.
pub fn builtin_templates() -> Vec<Template> {
    vec![blank(), list_detail(), tabbed()]
}

pub fn blank() -> Template {
    Template::from_fn(TemplateId::new("blank"), |config| {
        Ok(base_app(config, Navigation::None))
    })
    .with_metadata(
        TemplateMetadata::new("Blank")
            .description("An empty app with no screens")
            .tags(vec!["minimal".into()]),
    )
}

pub fn tabbed() -> Template {
    Template::from_fn(TemplateId::new("tabbed"), |config| {
        Ok(with_screens(
            base_app(config, Navigation::Tabs),
            &[("home", "Home"), ("search", "Search"), ("profile", "Profile")],
        ))
    })
    .with_metadata(
        TemplateMetadata::new("Tabbed")
            .description("Tab bar with home, search and profile screens")
            .tags(vec!["tabs".into(), "starter".into()]),
    )
}

pub fn list_detail() -> Template {
    Template::from_fn(TemplateId::new("list-detail"), |config| {
        Ok(with_screens(
            base_app(config, Navigation::Stack),
            &[("list", "Items"), ("detail", "Details")],
        ))
    })
    .with_metadata(
        TemplateMetadata::new("List / Detail")
            .description("Stack navigation from a list into a detail screen")
            .tags(vec!["stack".into(), "master-detail".into()]),
    )
}

fn base_app(config: &AppConfig, navigation: Navigation) -> MobileApp {
    let readme = RenderContext::for_config(config).render(README);
    MobileApp::new(config.name())
        .with_template(config.template_id().clone())
        .with_navigation(navigation)
        .with_artifact(Artifact::new("README.md", readme))
}

fn with_screens(app: MobileApp, screens: &[(&str, &str)]) -> MobileApp {
    screens
        .iter()
        .fold(app, |app, (name, title)| app.with_screen(Screen::new(*name, *title)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(template: &str) -> AppConfig {
        AppConfig::builder()
            .name("Field Notes")
            .template(template)
            .platform("ios")
            .build()
            .unwrap()
    }

    #[test]
    fn ids_are_unique_and_sorted() {
        let ids: Vec<String> = builtin_templates()
            .iter()
            .map(|t| t.id().to_string())
            .collect();
        assert_eq!(ids, ["blank", "list-detail", "tabbed"]);
    }

    #[test]
    fn blank_has_no_screens() {
        let app = blank().generate(&config("blank")).unwrap();
        assert_eq!(app.name(), "Field Notes");
        assert_eq!(app.template().map(TemplateId::as_str), Some("blank"));
        assert!(app.layout().screens.is_empty());
        assert_eq!(app.layout().navigation, Navigation::None);
    }

    #[test]
    fn tabbed_has_three_tabs() {
        let app = tabbed().generate(&config("tabbed")).unwrap();
        let names: Vec<&str> = app.layout().screens.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["home", "search", "profile"]);
        assert_eq!(app.layout().navigation, Navigation::Tabs);
    }

    #[test]
    fn readme_is_rendered() {
        let app = list_detail().generate(&config("list-detail")).unwrap();
        let readme = &app.artifact("README.md").unwrap().content;
        assert!(readme.starts_with("# Field Notes"));
        assert!(readme.contains("`list-detail` template for ios"));
    }
}

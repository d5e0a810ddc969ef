//! Implementation of the `mobiforge list` command.

use mobiforge_adapters::{discover_templates, standard_adapters};
use mobiforge_core::application::{CatalogService, PlatformInfo, TemplateInfo};

use crate::{
    cli::{ListArgs, ListFormat, ListTarget},
    config::Settings,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(args: ListArgs, settings: Settings, output: OutputManager) -> CliResult<()> {
    let templates_dir = args.templates_dir.or(settings.templates.local_path);
    let catalog = CatalogService::new(discover_templates(templates_dir.as_deref())?, standard_adapters());

    match args.what {
        ListTarget::Templates => print_templates(&catalog.list_templates(), args.format, &output),
        ListTarget::Platforms => print_platforms(&catalog.list_platforms(), args.format, &output),
    }
}

fn print_templates(templates: &[TemplateInfo], format: ListFormat, out: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            out.header("Available Templates:")?;
            for t in templates {
                let tags = if t.tags.is_empty() {
                    String::new()
                } else {
                    out.dim(&format!(" [{}]", t.tags.join(", ")))
                };
                out.print(&format!("  {:<14} {:<16} {}{tags}", t.id, t.name, t.description))?;
            }
        }
        ListFormat::List => {
            for t in templates {
                out.data(&t.id)?;
            }
        }
        ListFormat::Json => out.data(&to_json(templates)?)?,
        ListFormat::Csv => {
            out.data("id,name,description,tags")?;
            for t in templates {
                out.data(&format!(
                    "{},{},{},{}",
                    csv_field(&t.id),
                    csv_field(&t.name),
                    csv_field(&t.description),
                    csv_field(&t.tags.join(";"))
                ))?;
            }
        }
    }
    Ok(())
}

fn print_platforms(platforms: &[PlatformInfo], format: ListFormat, out: &OutputManager) -> CliResult<()> {
    match format {
        ListFormat::Table => {
            out.header("Available Platforms:")?;
            for p in platforms {
                out.print(&format!("  {:<10} {}", p.platform, p.description))?;
            }
        }
        ListFormat::List => {
            for p in platforms {
                out.data(&p.platform)?;
            }
        }
        ListFormat::Json => out.data(&to_json(platforms)?)?,
        ListFormat::Csv => {
            out.data("platform,description")?;
            for p in platforms {
                out.data(&format!("{},{}", csv_field(&p.platform), csv_field(&p.description)))?;
            }
        }
    }
    Ok(())
}

fn to_json<T: serde::Serialize>(items: &[T]) -> CliResult<String> {
    serde_json::to_string_pretty(items).map_err(|e| CliError::InvalidInput {
        message: format!("cannot encode listing: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Quote a CSV field when it contains a separator, quote or newline.
fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_field_quotes_when_needed() {
        assert_eq!(csv_field("blank"), "blank");
        assert_eq!(csv_field("iOS 16.0+ (Info.plist, CocoaPods)"), "\"iOS 16.0+ (Info.plist, CocoaPods)\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn json_listing_is_an_array() {
        let json = to_json(&[PlatformInfo {
            platform: "web".into(),
            description: "PWA".into(),
        }])
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["platform"], "web");
    }
}

//! Implementation of the `mobiforge generate` command.
//!
//! Responsibility: merge settings, request file and flags into an
//! `AppConfig`, run the pipeline, and display the result. No business logic
//! lives here; nothing is written to disk.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use tracing::{debug, info, instrument};

use mobiforge_adapters::{discover_templates, standard_adapters, standard_pipeline};
use mobiforge_core::{
    application::GenerationPipeline,
    domain::{AppConfig, DesignConfig, GenerationRecord, ServiceConfig},
};

use crate::{
    cli::{GenerateArgs, GenerateFormat, OutputFormat, global::GlobalArgs},
    config::Settings,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Request file contents. Every field is optional so flags can fill gaps.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RequestFile {
    name: Option<String>,
    template: Option<String>,
    platform: Option<String>,
    design: BTreeMap<String, String>,
    services: BTreeMap<String, BTreeMap<String, String>>,
}

/// Execute the `mobiforge generate` command.
///
/// Dispatch sequence:
/// 1. Build the registries (built-ins + manifest templates)
/// 2. Merge settings < request file < flags into an `AppConfig`
/// 3. Prompt for missing template/platform when `--interactive`
/// 4. Run the pipeline behind a spinner
/// 5. Print a summary or the JSON record
#[instrument(skip_all)]
pub fn execute(
    args: GenerateArgs,
    _global: GlobalArgs,
    settings: Settings,
    output: OutputManager,
) -> CliResult<()> {
    let templates_dir = args
        .templates_dir
        .clone()
        .or_else(|| settings.templates.local_path.clone());
    let pipeline = standard_pipeline(
        discover_templates(templates_dir.as_deref())?,
        standard_adapters(),
    );

    let request = match &args.request {
        Some(path) => read_request(path)?,
        None => RequestFile::default(),
    };

    let (template, platform) = if args.interactive {
        prompt_missing(&args, &request, &pipeline)?
    } else {
        (args.template.clone(), args.platform.clone())
    };

    let config = build_config(&args, template, platform, request, &settings)?;
    debug!(
        template = %config.template_id(),
        platform = %config.platform(),
        design = config.design().len(),
        services = config.services().len(),
        "request resolved"
    );

    let spinner = output.spinner(&format!(
        "Generating {} for {}...",
        config.name(),
        config.platform()
    ));
    let result = pipeline.generate_record(config);
    spinner.finish_and_clear();
    let record = result?;

    info!(run_id = %record.run_id, artifacts = record.artifact_count(), "generation finished");

    if args.format == GenerateFormat::Json || output.format() == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&record).map_err(|e| CliError::InvalidInput {
            message: format!("cannot encode the generation record: {e}"),
            source: Some(Box::new(e)),
        })?;
        output.data(&json)?;
    } else {
        print_summary(&record, &output)?;
    }

    Ok(())
}

// ── Request assembly ──────────────────────────────────────────────────────────

fn read_request(path: &Path) -> CliResult<RequestFile> {
    let content =
        fs::read_to_string(path).with_cli_context(|| format!("cannot read '{}'", path.display()))?;
    toml::from_str(&content).with_cli_context(|| format!("invalid request file '{}'", path.display()))
}

/// Later layers win: settings, then the request file, then flags.
fn build_config(
    args: &GenerateArgs,
    template: Option<String>,
    platform: Option<String>,
    request: RequestFile,
    settings: &Settings,
) -> CliResult<AppConfig> {
    let mut design: DesignConfig = settings.design.clone().into_iter().collect();
    for (key, value) in request.design.into_iter().chain(args.design.iter().cloned()) {
        design.set(key, value);
    }

    let mut services = service_config(&settings.services).merge(service_config(&request.services));
    for service in &args.services {
        services = match &service.setting {
            Some((key, value)) => services.with(&service.provider, key, value),
            None => services.enable(&service.provider),
        };
    }

    let mut builder = AppConfig::builder().design(design).services(services);
    if let Some(name) = args
        .name
        .clone()
        .or(request.name)
        .or_else(|| settings.defaults.name.clone())
    {
        builder = builder.name(name);
    }
    if let Some(template) = template
        .or(request.template)
        .or_else(|| settings.defaults.template.clone())
    {
        builder = builder.template(template);
    }
    if let Some(platform) = platform
        .or(request.platform)
        .or_else(|| settings.defaults.platform.clone())
    {
        builder = builder.platform(platform);
    }

    Ok(builder.build()?)
}

fn service_config(providers: &BTreeMap<String, BTreeMap<String, String>>) -> ServiceConfig {
    providers
        .iter()
        .fold(ServiceConfig::new(), |config, (provider, settings)| {
            settings.iter().fold(config.enable(provider), |config, (key, value)| {
                config.with(provider, key, value)
            })
        })
}

// ── Interactive pickers ───────────────────────────────────────────────────────

#[cfg(feature = "interactive")]
fn prompt_missing(
    args: &GenerateArgs,
    request: &RequestFile,
    pipeline: &GenerationPipeline,
) -> CliResult<(Option<String>, Option<String>)> {
    use dialoguer::{FuzzySelect, theme::ColorfulTheme};
    use mobiforge_core::application::CatalogService;

    let catalog = CatalogService::new(pipeline.templates().clone(), pipeline.adapters().clone());
    let theme = ColorfulTheme::default();

    let pick = |prompt: &str, items: Vec<(String, String)>| -> CliResult<String> {
        let labels: Vec<String> = items
            .iter()
            .map(|(id, detail)| format!("{id:<14} {detail}"))
            .collect();
        let selection = FuzzySelect::with_theme(&theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
            .map_err(|e| CliError::InvalidInput {
                message: format!("prompt failed: {e}"),
                source: None,
            })?
            .ok_or(CliError::Cancelled)?;
        Ok(items[selection].0.clone())
    };

    let template = match args.template.clone().or_else(|| request.template.clone()) {
        Some(template) => template,
        None => pick(
            "Template",
            catalog
                .list_templates()
                .into_iter()
                .map(|t| (t.id, t.name))
                .collect(),
        )?,
    };
    let platform = match args.platform.clone().or_else(|| request.platform.clone()) {
        Some(platform) => platform,
        None => pick(
            "Platform",
            catalog
                .list_platforms()
                .into_iter()
                .map(|p| (p.platform, p.description))
                .collect(),
        )?,
    };

    Ok((Some(template), Some(platform)))
}

#[cfg(not(feature = "interactive"))]
fn prompt_missing(
    _args: &GenerateArgs,
    _request: &RequestFile,
    _pipeline: &GenerationPipeline,
) -> CliResult<(Option<String>, Option<String>)> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Summary ───────────────────────────────────────────────────────────────────

fn print_summary(record: &GenerationRecord, out: &OutputManager) -> CliResult<()> {
    let app = &record.app;
    let template = app.template().map(|t| t.to_string()).unwrap_or_default();
    let platform = app.platform().map(|p| p.to_string()).unwrap_or_default();

    out.success(&format!("Generated '{}' ({template} \u{2192} {platform})", app.name()))?;
    out.print(&out.dim(&format!(
        "  run {}  at {}",
        record.run_id,
        record.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    )))?;
    out.print("")?;

    out.print(&format!("  Navigation:  {}", app.layout().navigation))?;
    let screens: Vec<&str> = app.layout().screens.iter().map(|s| s.name.as_str()).collect();
    out.print(&format!("  Screens:     {}", list_or_none(&screens)))?;
    let tokens: Vec<String> = app
        .design_tokens()
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    out.print(&format!("  Design:      {}", list_or_none(&tokens)))?;
    let services: Vec<&str> = app.services().iter().map(|s| s.provider.as_str()).collect();
    out.print(&format!("  Services:    {}", list_or_none(&services)))?;

    out.print("")?;
    out.header(&format!("Artifacts ({}):", app.artifacts().len()))?;
    for artifact in app.artifacts() {
        out.print(&format!(
            "  {:<52} {}",
            artifact.path.as_str(),
            out.dim(&format!("{} B", artifact.size()))
        ))?;
    }

    Ok(())
}

fn list_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

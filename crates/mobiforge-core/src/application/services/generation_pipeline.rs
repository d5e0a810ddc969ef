//! Generation pipeline - the main application orchestrator.
//!
//! One run is a straight line:
//! 1. Resolve the template for `config.template_id`
//! 2. Generate the initial app
//! 3. Apply design settings
//! 4. Integrate services
//! 5. Resolve the platform adapter and adapt
//!
//! The first failing step ends the run; no partial app is returned and
//! nothing is retried. Each step sees exactly the value the previous step
//! returned.

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{DesignCustomizer, ServiceIntegrator},
        registry::{AdapterRegistry, TemplateRegistry},
    },
    domain::{AppConfig, DomainValidator as validator, GenerationRecord, MobileApp, PipelineStage},
    error::ForgeResult,
};

/// Turns an `AppConfig` into a `MobileApp`.
///
/// Holds no per-run state: `generate` takes `&self` and may be called from
/// many threads at once.
pub struct GenerationPipeline {
    templates: TemplateRegistry,
    adapters: AdapterRegistry,
    customizer: Box<dyn DesignCustomizer>,
    integrator: Box<dyn ServiceIntegrator>,
}

impl GenerationPipeline {
    /// Create a pipeline over the given registries and strategies.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use mobiforge_core::application::{AdapterRegistry, GenerationPipeline, TemplateRegistry};
    ///
    /// let pipeline = GenerationPipeline::new(
    ///     TemplateRegistry::new(),
    ///     AdapterRegistry::new(),
    ///     customizer, // Box<dyn DesignCustomizer>
    ///     integrator, // Box<dyn ServiceIntegrator>
    /// );
    /// ```
    pub fn new(
        templates: TemplateRegistry,
        adapters: AdapterRegistry,
        customizer: Box<dyn DesignCustomizer>,
        integrator: Box<dyn ServiceIntegrator>,
    ) -> Self {
        Self {
            templates,
            adapters,
            customizer,
            integrator,
        }
    }

    pub fn builder() -> GenerationPipelineBuilder {
        GenerationPipelineBuilder::default()
    }

    pub fn templates(&self) -> &TemplateRegistry {
        &self.templates
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Run every stage for `config` and return the finished app.
    #[instrument(
        skip_all,
        fields(
            app = %config.name(),
            template = %config.template_id(),
            platform = %config.platform()
        )
    )]
    pub fn generate(&self, config: AppConfig) -> ForgeResult<MobileApp> {
        validator::validate_config(&config)?;

        let template = self.templates.resolve(config.template_id())?;
        debug!(stage = %PipelineStage::ResolveTemplate, "Template resolved");

        let app = template.generate(&config).map_err(|failure| {
            ApplicationError::GenerationFailed {
                template: config.template_id().clone(),
                reason: failure.reason,
            }
        })?;
        debug!(
            stage = %PipelineStage::Generate,
            screens = app.layout().screens.len(),
            "App generated"
        );

        let app = self
            .customizer
            .apply(app, config.design())
            .map_err(|failure| ApplicationError::CustomizationFailed {
                reason: failure.reason,
            })?;
        debug!(
            stage = %PipelineStage::Customize,
            tokens = app.design_tokens().len(),
            "Design applied"
        );

        let app = self
            .integrator
            .apply(app, config.services())
            .map_err(|failure| ApplicationError::IntegrationFailed {
                reason: failure.reason,
            })?;
        debug!(
            stage = %PipelineStage::Integrate,
            services = app.services().len(),
            "Services integrated"
        );

        let adapter = self.adapters.resolve(config.platform())?;
        debug!(stage = %PipelineStage::ResolveAdapter, "Adapter resolved");

        let app = adapter
            .adapt(app)
            .map_err(|failure| ApplicationError::AdaptationFailed {
                platform: config.platform().clone(),
                reason: failure.reason,
            })?;
        debug!(
            stage = %PipelineStage::Adapt,
            artifacts = app.artifacts().len(),
            "App adapted"
        );

        // The adapted app is the final one; a broken one counts against adapt.
        if let Err(e) = validator::validate_app(&app) {
            warn!(error = %e, "Generated app is structurally invalid");
            return Err(ApplicationError::AdaptationFailed {
                platform: config.platform().clone(),
                reason: e.to_string(),
            }
            .into());
        }

        info!(
            artifacts = app.artifacts().len(),
            services = app.services().len(),
            "Generation completed"
        );
        Ok(app)
    }

    /// Same as [`generate`](Self::generate), with provenance attached.
    pub fn generate_record(&self, config: AppConfig) -> ForgeResult<GenerationRecord> {
        let app = self.generate(config.clone())?;
        Ok(GenerationRecord::new(config, app))
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct GenerationPipelineBuilder {
    templates: Option<TemplateRegistry>,
    adapters: Option<AdapterRegistry>,
    customizer: Option<Box<dyn DesignCustomizer>>,
    integrator: Option<Box<dyn ServiceIntegrator>>,
}

impl GenerationPipelineBuilder {
    pub fn templates(mut self, templates: TemplateRegistry) -> Self {
        self.templates = Some(templates);
        self
    }

    pub fn adapters(mut self, adapters: AdapterRegistry) -> Self {
        self.adapters = Some(adapters);
        self
    }

    pub fn customizer(mut self, customizer: impl DesignCustomizer + 'static) -> Self {
        self.customizer = Some(Box::new(customizer));
        self
    }

    pub fn integrator(mut self, integrator: impl ServiceIntegrator + 'static) -> Self {
        self.integrator = Some(Box::new(integrator));
        self
    }

    pub fn build(self) -> Result<GenerationPipeline, ApplicationError> {
        Ok(GenerationPipeline {
            templates: self.templates.ok_or(ApplicationError::AdapterNotConfigured {
                name: "template registry",
            })?,
            adapters: self.adapters.ok_or(ApplicationError::AdapterNotConfigured {
                name: "adapter registry",
            })?,
            customizer: self.customizer.ok_or(ApplicationError::AdapterNotConfigured {
                name: "design customizer",
            })?,
            integrator: self.integrator.ok_or(ApplicationError::AdapterNotConfigured {
                name: "service integrator",
            })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use mockall::{Sequence, predicate::always};

    use super::*;
    use crate::{
        application::ports::{MockDesignCustomizer, MockPlatformAdapter, MockServiceIntegrator},
        domain::{
            PlatformId, Screen, StageFailure, Template, TemplateId,
            entities::template::MockTemplateGenerator,
        },
        error::ForgeError,
    };

    fn passthrough_customizer() -> MockDesignCustomizer {
        let mut customizer = MockDesignCustomizer::new();
        customizer.expect_apply().returning(|app, _| Ok(app));
        customizer
    }

    fn passthrough_integrator() -> MockServiceIntegrator {
        let mut integrator = MockServiceIntegrator::new();
        integrator.expect_apply().returning(|app, _| Ok(app));
        integrator
    }

    fn identity_adapter(platform: &str) -> MockPlatformAdapter {
        let mut adapter = MockPlatformAdapter::new();
        adapter
            .expect_platform()
            .return_const(PlatformId::new(platform));
        adapter.expect_adapt().returning(Ok);
        adapter
    }

    fn registries() -> (TemplateRegistry, AdapterRegistry) {
        let templates = TemplateRegistry::new();
        templates.register(Template::from_fn(TemplateId::new("blank"), |_| {
            Ok(MobileApp::default())
        }));
        let adapters = AdapterRegistry::new();
        adapters.register(identity_adapter("ios"));
        (templates, adapters)
    }

    fn pipeline(
        customizer: MockDesignCustomizer,
        integrator: MockServiceIntegrator,
    ) -> GenerationPipeline {
        let (templates, adapters) = registries();
        GenerationPipeline::new(
            templates,
            adapters,
            Box::new(customizer),
            Box::new(integrator),
        )
    }

    #[test]
    fn stages_run_in_order() {
        let mut seq = Sequence::new();

        let mut generator = MockTemplateGenerator::new();
        generator
            .expect_generate()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(MobileApp::default().with_marker("generate")));

        let mut customizer = MockDesignCustomizer::new();
        customizer
            .expect_apply()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|app, _| app.markers() == ["generate"])
            .returning(|app, _| Ok(app.with_marker("customize")));

        let mut integrator = MockServiceIntegrator::new();
        integrator
            .expect_apply()
            .times(1)
            .in_sequence(&mut seq)
            .withf(|app, _| app.markers() == ["generate", "customize"])
            .returning(|app, _| Ok(app.with_marker("integrate")));

        let mut adapter = MockPlatformAdapter::new();
        adapter.expect_platform().return_const(PlatformId::new("web"));
        adapter
            .expect_adapt()
            .times(1)
            .in_sequence(&mut seq)
            .with(always())
            .returning(|app| Ok(app.with_marker("adapt")));

        let templates = TemplateRegistry::new();
        templates.register(Template::new(TemplateId::new("ordered"), generator));
        let adapters = AdapterRegistry::new();
        adapters.register(adapter);

        let pipeline = GenerationPipeline::new(
            templates,
            adapters,
            Box::new(customizer),
            Box::new(integrator),
        );
        let app = pipeline
            .generate(AppConfig::new("ordered", "web").unwrap())
            .unwrap();

        assert_eq!(app.markers(), ["generate", "customize", "integrate", "adapt"]);
    }

    #[test]
    fn unknown_template_stops_before_generation() {
        let mut customizer = MockDesignCustomizer::new();
        customizer.expect_apply().never();
        let mut integrator = MockServiceIntegrator::new();
        integrator.expect_apply().never();

        let err = pipeline(customizer, integrator)
            .generate(AppConfig::new("missing", "ios").unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            ForgeError::Application(ApplicationError::UnknownTemplate {
                id: TemplateId::new("missing")
            })
        );
    }

    #[test]
    fn generation_failure_carries_template_id() {
        let (templates, adapters) = registries();
        templates.register(Template::from_fn(TemplateId::new("broken"), |_| {
            Err(StageFailure::new("asset pack missing"))
        }));
        let mut customizer = MockDesignCustomizer::new();
        customizer.expect_apply().never();

        let pipeline = GenerationPipeline::new(
            templates,
            adapters,
            Box::new(customizer),
            Box::new(passthrough_integrator()),
        );
        let err = pipeline
            .generate(AppConfig::new("broken", "ios").unwrap())
            .unwrap_err();

        assert_eq!(
            err.as_application(),
            Some(&ApplicationError::GenerationFailed {
                template: TemplateId::new("broken"),
                reason: "asset pack missing".into(),
            })
        );
    }

    #[test]
    fn customization_failure_skips_integration() {
        let mut customizer = MockDesignCustomizer::new();
        customizer
            .expect_apply()
            .returning(|_, _| Err(StageFailure::new("bad color")));
        let mut integrator = MockServiceIntegrator::new();
        integrator.expect_apply().never();

        let err = pipeline(customizer, integrator)
            .generate(AppConfig::new("blank", "ios").unwrap())
            .unwrap_err();

        assert_eq!(
            err.as_application().and_then(ApplicationError::stage),
            Some(PipelineStage::Customize)
        );
    }

    #[test]
    fn integration_failure_never_resolves_adapter() {
        let mut integrator = MockServiceIntegrator::new();
        integrator
            .expect_apply()
            .returning(|_, _| Err(StageFailure::new("quota exceeded")));

        let mut adapter = MockPlatformAdapter::new();
        adapter.expect_platform().return_const(PlatformId::new("ios"));
        adapter.expect_adapt().never();

        let templates = TemplateRegistry::new();
        templates.register(Template::from_fn(TemplateId::new("blank"), |_| {
            Ok(MobileApp::default())
        }));
        let adapters = AdapterRegistry::new();
        adapters.register(adapter);

        let pipeline = GenerationPipeline::new(
            templates,
            adapters.clone(),
            Box::new(passthrough_customizer()),
            Box::new(integrator),
        );
        let err = pipeline
            .generate(AppConfig::new("blank", "ios").unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            ForgeError::Application(ApplicationError::IntegrationFailed {
                reason: "quota exceeded".into()
            })
        );
        assert_eq!(adapters.lookup_count(), 0);
    }

    #[test]
    fn unsupported_platform_after_integration() {
        let err = pipeline(passthrough_customizer(), passthrough_integrator())
            .generate(AppConfig::new("blank", "unknown-os").unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            ForgeError::Application(ApplicationError::UnsupportedPlatform {
                platform: PlatformId::new("unknown-os")
            })
        );
    }

    #[test]
    fn adaptation_failure_names_platform() {
        let (templates, adapters) = registries();
        let mut adapter = MockPlatformAdapter::new();
        adapter
            .expect_platform()
            .return_const(PlatformId::new("android"));
        adapter
            .expect_adapt()
            .returning(|_| Err(StageFailure::new("no package id")));
        adapters.register(adapter);

        let pipeline = GenerationPipeline::new(
            templates,
            adapters,
            Box::new(passthrough_customizer()),
            Box::new(passthrough_integrator()),
        );
        let err = pipeline
            .generate(AppConfig::new("blank", "Android").unwrap())
            .unwrap_err();

        assert_eq!(
            err.as_application(),
            Some(&ApplicationError::AdaptationFailed {
                platform: PlatformId::new("android"),
                reason: "no package id".into(),
            })
        );
    }

    #[test]
    fn structurally_invalid_output_fails_at_adapt() {
        let (templates, adapters) = registries();
        templates.register(Template::from_fn(TemplateId::new("twice"), |_| {
            Ok(MobileApp::default()
                .with_screen(Screen::new("home", "Home"))
                .with_screen(Screen::new("home", "Home")))
        }));
        let pipeline = GenerationPipeline::new(
            templates,
            adapters,
            Box::new(passthrough_customizer()),
            Box::new(passthrough_integrator()),
        );

        let err = pipeline
            .generate(AppConfig::new("twice", "ios").unwrap())
            .unwrap_err();
        assert_eq!(
            err.as_application(),
            Some(&ApplicationError::AdaptationFailed {
                platform: PlatformId::new("ios"),
                reason: "Duplicate screen: home".into(),
            })
        );
        assert_eq!(
            err.as_application().and_then(ApplicationError::stage),
            Some(PipelineStage::Adapt)
        );
    }

    #[test]
    fn generate_record_keeps_request() {
        let record = pipeline(passthrough_customizer(), passthrough_integrator())
            .generate_record(AppConfig::new("blank", "ios").unwrap())
            .unwrap();

        assert_eq!(record.request.template_id().as_str(), "blank");
        assert_eq!(record.app, MobileApp::default());
    }

    #[test]
    fn builder_reports_missing_parts() {
        let (templates, _) = registries();
        let err = GenerationPipeline::builder()
            .templates(templates)
            .customizer(passthrough_customizer())
            .integrator(passthrough_integrator())
            .build()
            .err()
            .unwrap();

        assert_eq!(
            err,
            ApplicationError::AdapterNotConfigured {
                name: "adapter registry"
            }
        );
    }

    #[test]
    fn builder_with_all_parts() {
        let (templates, adapters) = registries();
        let pipeline = GenerationPipeline::builder()
            .templates(templates)
            .adapters(adapters)
            .customizer(passthrough_customizer())
            .integrator(passthrough_integrator())
            .build()
            .unwrap();

        assert!(pipeline.generate(AppConfig::new("blank", "IOS").unwrap()).is_ok());
    }
}

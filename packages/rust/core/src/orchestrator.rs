//! End-to-end publish pass: registry → resolver → {console, remote} sinks.

use tracing::{info, instrument};

use docpush_publisher::{
    ConsoleSink, PublishReport, RemotePublisher, RemoteTarget, resolve_all,
};
use docpush_registry::{HandlerGroup, HandlerRegistry, PackageScope};
use docpush_shared::{DocPushError, DocRecord, Result, SchemePrefix};

// ---------------------------------------------------------------------------
// PublishConfig and builder
// ---------------------------------------------------------------------------

/// Frozen configuration for one orchestrator. Built incrementally through
/// [`OrchestratorBuilder`], validated when remote credentials are set, and
/// owned by exactly one [`Orchestrator`].
#[derive(Debug, Clone)]
pub struct PublishConfig {
    console_print: bool,
    catalog: Option<String>,
    remote: Option<RemoteTarget>,
    scheme_prefix: SchemePrefix,
}

/// Incremental configuration for an [`Orchestrator`].
#[derive(Debug, Clone)]
pub struct OrchestratorBuilder {
    console_print: bool,
    catalog: Option<String>,
    remote: Option<RemoteTarget>,
    scheme_prefix: SchemePrefix,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self {
            console_print: false,
            catalog: None,
            remote: None,
            scheme_prefix: SchemePrefix::new(),
        }
    }
}

impl OrchestratorBuilder {
    /// Activate the console sink for every pass.
    pub fn console_print(mut self) -> Self {
        self.console_print = true;
        self
    }

    /// Set the catalog prefix the resolver prepends to every record's folder.
    pub fn catalog(mut self, path: impl Into<String>) -> Self {
        self.catalog = Some(path.into());
        self
    }

    /// Reference an existing scheme-prefix cell instead of this builder's own.
    ///
    /// Orchestrators sharing a cell observe each other's overrides. Call this
    /// before [`http_scheme_prefix`](Self::http_scheme_prefix), which writes
    /// into whichever cell the builder currently references.
    pub fn scheme_prefix(mut self, cell: SchemePrefix) -> Self {
        self.scheme_prefix = cell;
        self
    }

    /// Override the scheme prepended to bare remote domains.
    ///
    /// This writes through to the referenced cell: the last writer wins across
    /// every orchestrator sharing it, including instances built earlier.
    pub fn http_scheme_prefix(self, prefix: impl Into<String>) -> Self {
        self.scheme_prefix.set(prefix);
        self
    }

    /// Activate remote publishing. All three arguments must be non-empty;
    /// the upsert endpoint is classified here, once.
    pub fn remote_update(
        mut self,
        domain: impl Into<String>,
        api_key: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        self.remote = Some(RemoteTarget::new(domain, api_key, api_token)?);
        Ok(self)
    }

    /// Freeze the configuration and build the orchestrator.
    pub fn build(self) -> Result<Orchestrator> {
        let config = PublishConfig {
            console_print: self.console_print,
            catalog: self.catalog,
            remote: self.remote,
            scheme_prefix: self.scheme_prefix,
        };

        let remote = config
            .remote
            .clone()
            .map(|target| RemotePublisher::new(target, config.scheme_prefix.clone()))
            .transpose()?;

        Ok(Orchestrator { config, remote })
    }
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Summary of one publish/print pass.
#[derive(Debug)]
pub struct PassReport {
    /// Records obtained from the registry.
    pub records: usize,
    /// Whether the console sink ran.
    pub printed: bool,
    /// Remote publish summary, when remote updating is enabled.
    pub remote: Option<PublishReport>,
}

/// Drives publish passes: pulls records from a handler registry, resolves
/// them against the catalog prefix, and hands them to the enabled sinks.
///
/// Sinks are independent — both may run in one pass and neither affects the
/// other's outcome. Registry and transport failures propagate to the caller
/// uncaught; a non-200 store response only shows up in the report.
pub struct Orchestrator {
    config: PublishConfig,
    remote: Option<RemotePublisher>,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::default()
    }

    /// Publish every handler group within a package scope.
    #[instrument(skip_all, fields(scope = %scope))]
    pub async fn publish_package(
        &self,
        registry: &dyn HandlerRegistry,
        scope: &PackageScope,
    ) -> Result<PassReport> {
        let records = registry.extract_package(scope)?;
        self.run_pass(records).await
    }

    /// Publish a single handler group.
    #[instrument(skip_all, fields(group = %group))]
    pub async fn publish_group(
        &self,
        registry: &dyn HandlerRegistry,
        group: &HandlerGroup,
    ) -> Result<PassReport> {
        let records = registry.extract_group(group)?;
        self.run_pass(records).await
    }

    /// Publish one operation within a handler group.
    #[instrument(skip_all, fields(group = %group, operation = %operation))]
    pub async fn publish_operation(
        &self,
        registry: &dyn HandlerRegistry,
        group: &HandlerGroup,
        operation: &str,
    ) -> Result<PassReport> {
        let record = registry.extract_operation(group, operation)?;
        self.run_pass(vec![record]).await
    }

    async fn run_pass(&self, records: Vec<DocRecord>) -> Result<PassReport> {
        let pages = resolve_all(self.config.catalog.as_deref(), &records);

        info!(
            records = pages.len(),
            console = self.config.console_print,
            remote = self.remote.is_some(),
            "starting publish pass"
        );

        if self.config.console_print {
            ConsoleSink::stdout()
                .render(&pages)
                .map_err(|e| DocPushError::io("stdout", e))?;
        }

        let remote = match &self.remote {
            Some(publisher) => Some(publisher.publish(&pages).await?),
            None => None,
        };

        Ok(PassReport {
            records: pages.len(),
            printed: self.config.console_print,
            remote,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docpush_registry::{GroupDocs, MemoryRegistry, OperationDoc};

    fn sample_registry() -> MemoryRegistry {
        let mut registry = MemoryRegistry::new();
        registry.register(
            GroupDocs::new("myapp::handlers::orders", "orders")
                .operation(OperationDoc::new("create", "Create order", "# Create order\n"))
                .operation(OperationDoc::new("cancel", "Cancel order", "# Cancel order\n")),
        );
        registry
    }

    #[test]
    fn remote_update_validates_credentials() {
        assert!(matches!(
            Orchestrator::builder()
                .remote_update("", "key", "token")
                .unwrap_err(),
            DocPushError::Config { .. }
        ));
        assert!(
            Orchestrator::builder()
                .remote_update("docs.example.com", "", "token")
                .is_err()
        );
        assert!(
            Orchestrator::builder()
                .remote_update("docs.example.com", "key", "")
                .is_err()
        );
    }

    #[tokio::test]
    async fn pass_with_no_sinks_still_extracts() {
        let orchestrator = Orchestrator::builder().build().unwrap();
        let report = orchestrator
            .publish_group(&sample_registry(), &HandlerGroup::new("orders"))
            .await
            .unwrap();

        assert_eq!(report.records, 2);
        assert!(!report.printed);
        assert!(report.remote.is_none());
    }

    #[tokio::test]
    async fn remote_pass_applies_the_catalog_prefix() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::body_string_contains(
                "cat_name=api%2Fv2%2Forders",
            ))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("ok"))
            .expect(2)
            .mount(&server)
            .await;

        let orchestrator = Orchestrator::builder()
            .catalog("api/v2")
            .remote_update(server.uri(), "key", "token")
            .unwrap()
            .build()
            .unwrap();

        let report = orchestrator
            .publish_group(&sample_registry(), &HandlerGroup::new("orders"))
            .await
            .unwrap();

        assert_eq!(report.records, 2);
        let remote = report.remote.expect("remote report");
        assert_eq!(remote.published, 2);
        assert!(remote.rejected.is_empty());
    }

    #[tokio::test]
    async fn console_and_remote_run_in_the_same_pass() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let orchestrator = Orchestrator::builder()
            .console_print()
            .remote_update(server.uri(), "key", "token")
            .unwrap()
            .build()
            .unwrap();

        let report = orchestrator
            .publish_operation(
                &sample_registry(),
                &HandlerGroup::new("orders"),
                "create",
            )
            .await
            .unwrap();

        assert_eq!(report.records, 1);
        assert!(report.printed);
        assert_eq!(report.remote.expect("remote report").published, 1);
    }

    #[tokio::test]
    async fn extraction_failure_propagates_before_any_sink_runs() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let orchestrator = Orchestrator::builder()
            .remote_update(server.uri(), "key", "token")
            .unwrap()
            .build()
            .unwrap();

        let err = orchestrator
            .publish_group(&sample_registry(), &HandlerGroup::new("payments"))
            .await
            .unwrap_err();

        assert!(matches!(err, DocPushError::Extraction { .. }));
    }

    #[tokio::test]
    async fn shared_cell_override_reaches_an_earlier_instance() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        // Bare host:port, so the scheme-prefix cell decides the URL base.
        let host = server.uri().trim_start_matches("http://").to_string();
        let cell = SchemePrefix::new();

        let first = Orchestrator::builder()
            .scheme_prefix(cell.clone())
            .http_scheme_prefix("nonsense://")
            .remote_update(host, "key", "token")
            .unwrap()
            .build()
            .unwrap();

        // A later builder sharing the cell overrides the prefix; the earlier
        // instance picks it up because URLs are assembled at publish time.
        let _second = Orchestrator::builder()
            .scheme_prefix(cell.clone())
            .http_scheme_prefix("http://")
            .build()
            .unwrap();

        let report = first
            .publish_operation(
                &sample_registry(),
                &HandlerGroup::new("orders"),
                "create",
            )
            .await
            .unwrap();

        assert_eq!(report.remote.expect("remote report").published, 1);
    }
}

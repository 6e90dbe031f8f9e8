//! Remote upsert publishing.
//!
//! One form-encoded POST per resolved page, sequentially, in input order. The
//! store upserts by folder + title on its side, so re-publishing overwrites.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument, warn};

use docpush_shared::{DocPushError, Result, ResolvedPage, SchemePrefix};

use crate::endpoint::{self, EndpointSuffix};

/// Request timeout for upsert calls. The wire protocol imposes none, so a
/// finite default keeps a dead store from hanging a pass forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User-Agent string for upsert requests.
const USER_AGENT: &str = concat!("docpush/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// RemoteTarget
// ---------------------------------------------------------------------------

/// Validated remote-store coordinates: domain, credentials, and the upsert
/// route classified for the domain.
#[derive(Debug, Clone)]
pub struct RemoteTarget {
    domain: String,
    api_key: String,
    api_token: String,
    suffix: EndpointSuffix,
}

impl RemoteTarget {
    /// Validate credentials and classify the upsert endpoint.
    ///
    /// All three arguments must be non-empty; anything missing is a config
    /// error raised here, before any pass runs.
    pub fn new(
        domain: impl Into<String>,
        api_key: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Result<Self> {
        let domain = domain.into();
        let api_key = api_key.into();
        let api_token = api_token.into();

        if domain.is_empty() {
            return Err(DocPushError::config("remote domain must not be empty"));
        }
        if api_key.is_empty() {
            return Err(DocPushError::config("api key must not be empty"));
        }
        if api_token.is_empty() {
            return Err(DocPushError::config("api token must not be empty"));
        }

        let suffix = EndpointSuffix::classify(&domain);
        debug!(%domain, ?suffix, "classified remote endpoint");

        Ok(Self {
            domain,
            api_key,
            api_token,
            suffix,
        })
    }

    /// The route chosen for this domain.
    pub fn suffix(&self) -> EndpointSuffix {
        self.suffix
    }

    /// Assemble the upsert URL with the given scheme prefix.
    pub fn upsert_url(&self, scheme_prefix: &str) -> String {
        endpoint::upsert_url(&self.domain, self.suffix, scheme_prefix)
    }
}

// ---------------------------------------------------------------------------
// PublishReport
// ---------------------------------------------------------------------------

/// A page the remote store answered with a non-200 status for.
#[derive(Debug, Clone)]
pub struct RejectedPage {
    /// Resolved folder of the rejected page.
    pub folder: String,
    /// Title of the rejected page.
    pub title: String,
    /// HTTP status the store answered with.
    pub status: u16,
}

/// Summary of a completed publish pass.
#[derive(Debug)]
pub struct PublishReport {
    /// Pages the store accepted (HTTP 200).
    pub published: usize,
    /// Pages the store rejected; the pass continued past each of these.
    pub rejected: Vec<RejectedPage>,
    /// Total duration of the pass.
    pub duration: Duration,
}

// ---------------------------------------------------------------------------
// RemotePublisher
// ---------------------------------------------------------------------------

/// Sequential, best-effort upsert publisher.
///
/// A non-200 response is logged and the pass continues to the next page — no
/// rollback, no retry. A transport-level failure propagates and aborts the
/// remaining pages. Partial outcomes across a batch are expected and reported.
pub struct RemotePublisher {
    client: Client,
    target: RemoteTarget,
    scheme_prefix: SchemePrefix,
}

impl RemotePublisher {
    /// Create a publisher for a validated target.
    ///
    /// The scheme-prefix cell is read at publish time, so overrides written
    /// after construction still apply.
    pub fn new(target: RemoteTarget, scheme_prefix: SchemePrefix) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DocPushError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            target,
            scheme_prefix,
        })
    }

    /// Publish a batch of resolved pages, one POST per page, in input order.
    #[instrument(skip_all, fields(pages = pages.len()))]
    pub async fn publish(&self, pages: &[ResolvedPage]) -> Result<PublishReport> {
        let start = Instant::now();
        let url = self.target.upsert_url(&self.scheme_prefix.get());

        let mut published = 0;
        let mut rejected = Vec::new();

        for page in pages {
            match self.upsert(&url, page).await? {
                None => published += 1,
                Some(rejection) => rejected.push(rejection),
            }
        }

        let report = PublishReport {
            published,
            rejected,
            duration: start.elapsed(),
        };

        info!(
            published = report.published,
            rejected = report.rejected.len(),
            duration_ms = report.duration.as_millis(),
            "publish pass complete"
        );

        Ok(report)
    }

    /// Upsert one page. `Ok(None)` on 200, `Ok(Some(..))` on any other status,
    /// `Err` only for transport-level failures.
    async fn upsert(&self, url: &str, page: &ResolvedPage) -> Result<Option<RejectedPage>> {
        debug!(folder = %page.folder, title = %page.title, "upserting page");

        let response = self
            .client
            .post(url)
            .form(&[
                ("api_key", self.target.api_key.as_str()),
                ("api_token", self.target.api_token.as_str()),
                ("cat_name", page.folder.as_str()),
                ("page_content", page.content.as_str()),
                ("page_title", page.title.as_str()),
            ])
            .send()
            .await
            .map_err(|e| DocPushError::Transport(format!("{url}: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DocPushError::Transport(format!("{url}: failed to read body: {e}")))?;

        if status == StatusCode::OK {
            info!(title = %page.title, response = %body, "page updated");
            Ok(None)
        } else {
            warn!(
                title = %page.title,
                status = status.as_u16(),
                response = %body,
                "remote store rejected page"
            );
            Ok(Some(RejectedPage {
                folder: page.folder.clone(),
                title: page.title.clone(),
                status: status.as_u16(),
            }))
        }
    }
}

//! Upsert endpoint selection and URL assembly.
//!
//! The remote store exposes its upsert API on one of two routes: first-party
//! deployments serve it directly, self-hosted deployments route through an
//! index dispatcher. The route is a closed two-case classification of the
//! configured domain, decided once when credentials are set.

/// First-party hostnames served by the direct API route. Matched exactly,
/// case-sensitively.
const OFFICIAL_DOMAINS: [&str; 2] = ["www.showdoc.cc", "www.showdoc.com.cn"];

/// Upsert path on first-party deployments.
const DIRECT_API_SUFFIX: &str = "/server/api/item/updateByApi";

/// Upsert path on self-hosted deployments routed through the index dispatcher.
const INDEX_DISPATCH_SUFFIX: &str = "/server/index.php?s=/api/item/updateByApi";

/// Which upsert route a configured domain is served by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSuffix {
    /// `/server/api/item/updateByApi` — first-party hostnames.
    DirectApi,
    /// `/server/index.php?s=/api/item/updateByApi` — everything else.
    IndexDispatch,
}

impl EndpointSuffix {
    /// Classify a domain by exact hostname match against the first-party list.
    pub fn classify(domain: &str) -> Self {
        if OFFICIAL_DOMAINS.contains(&domain) {
            Self::DirectApi
        } else {
            Self::IndexDispatch
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::DirectApi => DIRECT_API_SUFFIX,
            Self::IndexDispatch => INDEX_DISPATCH_SUFFIX,
        }
    }
}

/// Build the upsert URL for a configured domain.
///
/// A domain containing the substring `"http"` anywhere is used verbatim as the
/// base; anything else gets `scheme_prefix` prepended. The substring check is
/// deliberately loose — existing configurations depend on it, so it is pinned
/// by tests rather than tightened into a real scheme check.
pub fn upsert_url(domain: &str, suffix: EndpointSuffix, scheme_prefix: &str) -> String {
    if domain.contains("http") {
        format!("{domain}{}", suffix.as_str())
    } else {
        format!("{scheme_prefix}{domain}{}", suffix.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn official_hostnames_use_the_direct_api_route() {
        assert_eq!(
            EndpointSuffix::classify("www.showdoc.cc"),
            EndpointSuffix::DirectApi
        );
        assert_eq!(
            EndpointSuffix::classify("www.showdoc.com.cn"),
            EndpointSuffix::DirectApi
        );
    }

    #[test]
    fn everything_else_routes_through_the_index_dispatcher() {
        assert_eq!(
            EndpointSuffix::classify("docs.internal.example.com"),
            EndpointSuffix::IndexDispatch
        );
        // Exact match only: no case folding, no subdomain logic
        assert_eq!(
            EndpointSuffix::classify("WWW.SHOWDOC.CC"),
            EndpointSuffix::IndexDispatch
        );
        assert_eq!(
            EndpointSuffix::classify("showdoc.cc"),
            EndpointSuffix::IndexDispatch
        );
    }

    #[test]
    fn bare_host_gets_the_scheme_prefix() {
        let url = upsert_url(
            "www.showdoc.cc",
            EndpointSuffix::classify("www.showdoc.cc"),
            "http://",
        );
        assert_eq!(url, "http://www.showdoc.cc/server/api/item/updateByApi");
    }

    #[test]
    fn domain_with_scheme_is_used_verbatim() {
        let domain = "https://my.internal.host";
        let url = upsert_url(domain, EndpointSuffix::classify(domain), "http://");
        assert_eq!(
            url,
            "https://my.internal.host/server/index.php?s=/api/item/updateByApi"
        );
    }

    #[test]
    fn http_substring_check_is_loose_by_design() {
        // "http" appears mid-hostname, so prefixing is bypassed even though the
        // domain carries no scheme. Compatibility behavior, kept as-is.
        let domain = "myhttpserver.com";
        let url = upsert_url(domain, EndpointSuffix::classify(domain), "http://");
        assert_eq!(
            url,
            "myhttpserver.com/server/index.php?s=/api/item/updateByApi"
        );
    }

    #[test]
    fn overridden_prefix_is_prepended_to_bare_hosts() {
        let url = upsert_url(
            "docs.example.com",
            EndpointSuffix::IndexDispatch,
            "https://",
        );
        assert_eq!(
            url,
            "https://docs.example.com/server/index.php?s=/api/item/updateByApi"
        );
    }
}

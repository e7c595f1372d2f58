//! Resolution of relative endpoints against a fixed base URL.
//!
//! Both GET and POST go through [`BaseUrl::resolve`]. For a base without a
//! trailing `/` and an endpoint starting with `/`, the result is exactly
//! `base + endpoint`. Trailing slashes on the base are stripped at
//! construction and a missing leading slash on the endpoint is supplied, so
//! the two halves always meet at a single `/`.

use std::fmt;

use url::Url;

use crate::error::ApiError;
use crate::query::QueryParams;

/// Validated absolute base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Validate `base` as an absolute `http`/`https` URL.
    pub fn parse(base: &str) -> Result<Self, ApiError> {
        let trimmed = base.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ApiError::InvalidUrl("base URL is empty".to_string()));
        }
        let url = Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{base}: {e}")))?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ApiError::InvalidUrl(format!(
                    "{base}: unsupported scheme {other}"
                )))
            }
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ApiError::InvalidUrl(format!(
                "{base}: base URL must not carry a query or fragment"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Join `endpoint` onto the base and append `query` when it is non-empty.
    pub fn resolve(&self, endpoint: &str, query: Option<&QueryParams>) -> Result<Url, ApiError> {
        if endpoint.is_empty() {
            return Err(ApiError::InvalidUrl("endpoint is empty".to_string()));
        }
        let joined = if endpoint.starts_with('/') {
            format!("{}{endpoint}", self.0)
        } else {
            format!("{}/{endpoint}", self.0)
        };
        let mut url = Url::parse(&joined).map_err(|e| ApiError::InvalidUrl(format!("{joined}: {e}")))?;

        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.iter() {
                pairs.append_pair(key, &value.render());
            }
        }
        Ok(url)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BaseUrl {
        BaseUrl::parse("https://api.example.com").unwrap()
    }

    #[test]
    fn resolve_concatenates_base_and_endpoint() {
        for endpoint in ["/posts", "/posts/1", "/a/b/c"] {
            let url = base().resolve(endpoint, None).unwrap();
            assert_eq!(url.as_str(), format!("https://api.example.com{endpoint}"));
        }
    }

    #[test]
    fn base_with_path_prefix_is_kept() {
        let base = BaseUrl::parse("http://localhost:3000/api/v1/").unwrap();
        assert_eq!(base.as_str(), "http://localhost:3000/api/v1");
        let url = base.resolve("/posts", None).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/v1/posts");
    }

    #[test]
    fn missing_leading_slash_is_supplied() {
        let url = base().resolve("posts", None).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/posts");
    }

    #[test]
    fn query_is_appended_in_insertion_order() {
        let query = QueryParams::new().with("skip", 0u64).with("limit", 10u64);
        let url = base().resolve("/posts", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/posts?skip=0&limit=10");
    }

    #[test]
    fn empty_query_adds_no_question_mark() {
        let url = base().resolve("/posts", Some(&QueryParams::new())).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/posts");
    }

    #[test]
    fn whole_float_query_values_render_as_integers() {
        let query = QueryParams::from_json_str(r#"{"page":2.0}"#).unwrap();
        let url = base().resolve("/posts", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/posts?page=2");
    }

    #[test]
    fn query_values_are_encoded() {
        let query = QueryParams::new().with("q", "a b&c");
        let url = base().resolve("/search", Some(&query)).unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/search?q=a+b%26c");
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        assert!(matches!(base().resolve("", None), Err(ApiError::InvalidUrl(_))));
    }

    #[test]
    fn invalid_base_urls_are_rejected() {
        for bad in ["", "/", "api.example.com", "ftp://example.com", "https://x.com/?a=1"] {
            assert!(
                matches!(BaseUrl::parse(bad), Err(ApiError::InvalidUrl(_))),
                "{bad} should be rejected"
            );
        }
    }
}

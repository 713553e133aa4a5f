use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::search::dto::{Repository, UpstreamPage};

pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Thin client over the upstream repository search API.
#[derive(Clone)]
pub struct SearchProxy {
    client: reqwest::Client,
    endpoint: String,
}

impl SearchProxy {
    pub fn new(config: &SearchConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Single attempt against the upstream; a non-2xx answer is handed back
    /// untouched inside [`SearchError::Upstream`].
    pub async fn search(&self, query: &str) -> Result<Vec<Repository>, SearchError> {
        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("q", query)])
            .header(ACCEPT, GITHUB_ACCEPT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_owned);
            let body = resp.bytes().await?;
            warn!(%status, "search upstream rejected request");
            return Err(SearchError::Upstream {
                status: status.as_u16(),
                content_type,
                body,
            });
        }

        let page: UpstreamPage = resp.json().await?;
        debug!(count = page.items.len(), "search upstream answered");
        Ok(page.items.into_iter().map(Repository::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn proxy_for(server: &MockServer) -> SearchProxy {
        SearchProxy::new(&SearchConfig {
            endpoint: format!("{}/search/repositories", server.uri()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn projects_upstream_items_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "foo"))
            .and(header("accept", GITHUB_ACCEPT))
            .and(header("user-agent", USER_AGENT))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 2,
                "items": [
                    {"name": "a", "description": "d", "stargazers_count": 5, "html_url": "u", "id": 1},
                    {"name": "b", "description": null, "stargazers_count": 0, "html_url": "v"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let repos = proxy_for(&server).search("foo").await.unwrap();
        assert_eq!(
            repos,
            vec![
                Repository {
                    name: "a".into(),
                    description: Some("d".into()),
                    stars: 5,
                    url: "u".into(),
                },
                Repository {
                    name: "b".into(),
                    description: None,
                    stars: 0,
                    url: "v".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn empty_items_yield_empty_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .mount(&server)
            .await;

        let repos = proxy_for(&server).search("nothing").await.unwrap();
        assert!(repos.is_empty());
    }

    #[tokio::test]
    async fn query_is_sent_as_a_single_encoded_parameter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "rust lang&stars=1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        proxy_for(&server).search("rust lang&stars=1").await.unwrap();
    }

    #[tokio::test]
    async fn non_success_is_returned_verbatim_without_retry() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403)
                    .set_body_raw(r#"{"message":"API rate limit exceeded"}"#, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = proxy_for(&server).search("foo").await.unwrap_err();
        match err {
            SearchError::Upstream {
                status,
                content_type,
                body,
            } => {
                assert_eq!(status, 403);
                assert_eq!(content_type.as_deref(), Some("application/json"));
                assert_eq!(&body[..], br#"{"message":"API rate limit exceeded"}"#);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_utf8_error_body_is_kept_byte_for_byte() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_bytes(vec![0xff, 0xfe, b'x']))
            .mount(&server)
            .await;

        let err = proxy_for(&server).search("foo").await.unwrap_err();
        match err {
            SearchError::Upstream { status, body, .. } => {
                assert_eq!(status, 500);
                assert_eq!(&body[..], &[0xff, 0xfe, b'x']);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_success_payload_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = proxy_for(&server).search("foo").await.unwrap_err();
        assert!(matches!(err, SearchError::Transport(_)));
    }
}

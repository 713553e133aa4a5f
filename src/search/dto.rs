use serde::{Deserialize, Serialize};

pub const DEFAULT_QUERY: &str = "cloudflare workers";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default = "default_query")]
    pub q: String,
}

fn default_query() -> String {
    DEFAULT_QUERY.to_string()
}

/// One repository as returned to our clients.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Repository {
    pub name: String,
    pub description: Option<String>,
    pub stars: i64,
    pub url: String,
}

/// Subset of the upstream search payload we read.
#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamPage {
    pub items: Vec<UpstreamItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpstreamItem {
    pub name: String,
    pub description: Option<String>,
    pub stargazers_count: i64,
    pub html_url: String,
}

impl From<UpstreamItem> for Repository {
    fn from(item: UpstreamItem) -> Self {
        Self {
            name: item.name,
            description: item.description,
            stars: item.stargazers_count,
            url: item.html_url,
        }
    }
}

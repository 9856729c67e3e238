//! Yandex Tracker client
//!
//! Thin HTTP wrapper over the tracker REST API. Owns the auth headers and
//! the base URL; every operation is a single request with no retry policy,
//! so callers decide whether to surface a failure.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TrackerError};

/// Queue identifiers, one per record category.
pub mod queues {
    pub const EMPLOYEES: &str = "EMP";
    pub const COMPANIES: &str = "COMP";
    pub const CITIES: &str = "CITY";
    pub const WAREHOUSES: &str = "WH";
    pub const SHIFTS: &str = "SHIFT";
    pub const REQUESTS: &str = "REQ";
}

/// Issue as returned by the tracker. Fields the bot does not use are
/// dropped on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom_fields: Map<String, Value>,
}

/// Payload for issue creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIssue {
    pub queue: String,
    pub summary: String,
    pub description: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub custom_fields: Map<String, Value>,
}

/// Partial issue update; absent fields stay untouched on the tracker side.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub custom_fields: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    fields: &'a [&'a str],
}

#[derive(Debug, Serialize)]
struct CommentRequest<'a> {
    text: &'a str,
}

const SEARCH_FIELDS: &[&str] = &[
    "key",
    "summary",
    "description",
    "status",
    "assignee",
    "created",
    "updated",
];

/// Issue operations the domain managers need. Implemented by the HTTP
/// client in production and by an in-memory fake in tests.
#[async_trait]
pub trait IssueApi: Send + Sync {
    async fn create_issue(&self, issue: NewIssue) -> Result<Issue>;
    async fn get_issue(&self, key: &str) -> Result<Issue>;
    async fn update_issue(&self, key: &str, patch: IssueUpdate) -> Result<Issue>;
    async fn search_issues(&self, query: &str) -> Result<Vec<Issue>>;
    async fn add_comment(&self, key: &str, text: &str) -> Result<()>;
}

/// HTTP client for the tracker API.
#[derive(Clone)]
pub struct TrackerClient {
    http: Client,
    base_url: String,
    token: String,
    org_id: String,
}

impl TrackerClient {
    pub fn new(config: &Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.tracker_base_url.trim_end_matches('/').to_string(),
            token: config.tracker_token.clone(),
            org_id: config.tracker_org_id.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header("Authorization", format!("OAuth {}", self.token))
            .header("X-Org-ID", &self.org_id)
    }

    /// Map a non-success response to `NotFound` or `Upstream`.
    async fn check(response: reqwest::Response, what: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::NOT_FOUND {
            return Err(TrackerError::NotFound(what.to_string()));
        }
        Err(TrackerError::Upstream { status, body })
    }
}

#[async_trait]
impl IssueApi for TrackerClient {
    async fn create_issue(&self, issue: NewIssue) -> Result<Issue> {
        debug!("tracker: create issue in queue {}", issue.queue);

        let response = self
            .request(Method::POST, "/issues")
            .json(&issue)
            .send()
            .await?;
        Ok(Self::check(response, "new issue").await?.json().await?)
    }

    async fn get_issue(&self, key: &str) -> Result<Issue> {
        debug!("tracker: get issue {}", key);

        let response = self
            .request(Method::GET, &format!("/issues/{}", key))
            .send()
            .await?;
        Ok(Self::check(response, key).await?.json().await?)
    }

    async fn update_issue(&self, key: &str, patch: IssueUpdate) -> Result<Issue> {
        debug!("tracker: update issue {}", key);

        let response = self
            .request(Method::PATCH, &format!("/issues/{}", key))
            .json(&patch)
            .send()
            .await?;
        Ok(Self::check(response, key).await?.json().await?)
    }

    async fn search_issues(&self, query: &str) -> Result<Vec<Issue>> {
        debug!("tracker: search {}", query);

        let request = SearchRequest {
            query,
            fields: SEARCH_FIELDS,
        };
        let response = self
            .request(Method::POST, "/issues/_search")
            .json(&request)
            .send()
            .await?;
        Ok(Self::check(response, "search").await?.json().await?)
    }

    async fn add_comment(&self, key: &str, text: &str) -> Result<()> {
        debug!("tracker: comment on {}", key);

        let response = self
            .request(Method::POST, &format!("/issues/{}/comments", key))
            .json(&CommentRequest { text })
            .send()
            .await?;
        Self::check(response, key).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory tracker shared by manager and router tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{Issue, IssueApi, IssueUpdate, NewIssue};
    use crate::error::{Result, TrackerError};
    use serde_json::{Map, Value};

    #[derive(Default)]
    pub struct FakeTracker {
        issues: Mutex<HashMap<String, Issue>>,
        counter: Mutex<u32>,
    }

    impl FakeTracker {
        pub fn new() -> Self {
            Self::default()
        }

        /// Insert an issue with a fixed key and the given custom fields.
        pub fn seed(&self, key: &str, custom_fields: Map<String, Value>) {
            let issue = Issue {
                key: key.to_string(),
                custom_fields,
                ..Issue::default()
            };
            self.issues.lock().unwrap().insert(key.to_string(), issue);
        }

        pub fn issue(&self, key: &str) -> Option<Issue> {
            self.issues.lock().unwrap().get(key).cloned()
        }
    }

    #[async_trait]
    impl IssueApi for FakeTracker {
        async fn create_issue(&self, issue: NewIssue) -> Result<Issue> {
            let mut counter = self.counter.lock().unwrap();
            *counter += 1;
            let key = format!("{}-{}", issue.queue, counter);

            let stored = Issue {
                key: key.clone(),
                summary: issue.summary,
                description: issue.description,
                custom_fields: issue.custom_fields,
            };
            self.issues.lock().unwrap().insert(key, stored.clone());
            Ok(stored)
        }

        async fn get_issue(&self, key: &str) -> Result<Issue> {
            self.issue(key)
                .ok_or_else(|| TrackerError::NotFound(key.to_string()))
        }

        async fn update_issue(&self, key: &str, patch: IssueUpdate) -> Result<Issue> {
            let mut issues = self.issues.lock().unwrap();
            let issue = issues
                .get_mut(key)
                .ok_or_else(|| TrackerError::NotFound(key.to_string()))?;

            if let Some(summary) = patch.summary {
                issue.summary = summary;
            }
            for (field, value) in patch.custom_fields {
                issue.custom_fields.insert(field, value);
            }
            Ok(issue.clone())
        }

        async fn search_issues(&self, query: &str) -> Result<Vec<Issue>> {
            // Only the `Queue: X` part of the query is honored; managers
            // filter on custom fields client-side in tests.
            let queue = query
                .split_whitespace()
                .skip_while(|word| *word != "Queue:")
                .nth(1)
                .unwrap_or("");
            let prefix = format!("{}-", queue);

            let issues = self.issues.lock().unwrap();
            let mut found: Vec<Issue> = issues
                .values()
                .filter(|issue| issue.key.starts_with(&prefix))
                .cloned()
                .collect();
            found.sort_by(|a, b| a.key.cmp(&b.key));
            Ok(found)
        }

        async fn add_comment(&self, key: &str, _text: &str) -> Result<()> {
            if self.issues.lock().unwrap().contains_key(key) {
                Ok(())
            } else {
                Err(TrackerError::NotFound(key.to_string()))
            }
        }
    }
}

//! GitHub fetcher: search page, per-repository detail, raw README.

use async_trait::async_trait;
use ranking_engine::types::SearchResponse;
use ranking_engine::{RepositoryDetail, RepositorySummary, SearchFilters};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, Response, StatusCode};
use tracing::debug;

use crate::error::ScoutError;
use crate::settings::Settings;

const USER_AGENT: &str = concat!("repo-scout/", env!("CARGO_PKG_VERSION"));
const GITHUB_JSON: &str = "application/vnd.github.v3+json";

/// Where search results, details and READMEs come from.
#[async_trait]
pub trait RepositorySource: Send + Sync {
  /// First page of results, at most `max_results` items, in platform order.
  async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<RepositorySummary>, ScoutError>;

  async fn detail(&self, repo: &RepositorySummary) -> Result<RepositoryDetail, ScoutError>;

  /// README text, or `None` when the file is not served with 200.
  async fn readme(&self, repo: &RepositorySummary) -> Result<Option<String>, ScoutError>;
}

#[async_trait]
impl<T: RepositorySource + ?Sized> RepositorySource for &T {
  async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<RepositorySummary>, ScoutError> {
    (**self).search(query, filters).await
  }

  async fn detail(&self, repo: &RepositorySummary) -> Result<RepositoryDetail, ScoutError> {
    (**self).detail(repo).await
  }

  async fn readme(&self, repo: &RepositorySummary) -> Result<Option<String>, ScoutError> {
    (**self).readme(repo).await
  }
}

pub struct GithubClient {
  http: Client,
  api_base: String,
  raw_base: String,
  branch: String,
  max_results: usize,
}

impl GithubClient {
  pub fn new(settings: &Settings) -> Result<Self, ScoutError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_JSON));

    let http = Client::builder()
      .user_agent(USER_AGENT)
      .default_headers(headers)
      .timeout(settings.api_timeout())
      .build()?;

    Ok(Self {
      http,
      api_base: settings.api_base.trim_end_matches('/').to_string(),
      raw_base: settings.raw_base.trim_end_matches('/').to_string(),
      branch: settings.default_branch.clone(),
      max_results: settings.max_results,
    })
  }

  pub fn search_url(&self) -> String {
    format!("{}/search/repositories", self.api_base)
  }

  pub fn readme_url(&self, full_name: &str) -> String {
    format!("{}/{}/{}/README.md", self.raw_base, full_name, self.branch)
  }

  fn ensure_success(resp: Response) -> Result<Response, ScoutError> {
    let status = resp.status();
    if status.is_success() {
      Ok(resp)
    } else {
      Err(ScoutError::Status {
        status: status.as_u16(),
        url: resp.url().to_string(),
      })
    }
  }
}

#[async_trait]
impl RepositorySource for GithubClient {
  async fn search(&self, query: &str, filters: &SearchFilters) -> Result<Vec<RepositorySummary>, ScoutError> {
    let q = filters.qualified_query(query);
    let per_page = self.max_results.to_string();
    debug!(q = %q, per_page = %per_page, "searching repositories");

    let resp = self
      .http
      .get(self.search_url())
      .query(&[
        ("q", q.as_str()),
        ("sort", "stars"),
        ("order", "desc"),
        ("per_page", per_page.as_str()),
      ])
      .send()
      .await?;
    let body = Self::ensure_success(resp)?.text().await?;

    let mut items = SearchResponse::from_json(&body)?.items;
    items.truncate(self.max_results);
    Ok(items)
  }

  async fn detail(&self, repo: &RepositorySummary) -> Result<RepositoryDetail, ScoutError> {
    debug!(url = %repo.url, "fetching repository detail");
    let resp = self.http.get(&repo.url).send().await?;
    let body = Self::ensure_success(resp)?.text().await?;
    Ok(RepositoryDetail::from_json(&body)?)
  }

  async fn readme(&self, repo: &RepositorySummary) -> Result<Option<String>, ScoutError> {
    let url = self.readme_url(&repo.full_name);
    debug!(url = %url, "fetching readme");
    let resp = self.http.get(&url).send().await?;
    if resp.status() != StatusCode::OK {
      debug!(status = %resp.status(), repo = %repo.full_name, "no readme");
      return Ok(None);
    }
    Ok(Some(resp.text().await?))
  }
}

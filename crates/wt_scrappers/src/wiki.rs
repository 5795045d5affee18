use std::time::Duration;

use reqwest::Client;
use scraper::Html;
use serde::Deserialize;
use serde_json::{Map, Value};
use url::Url;
use wt_core::{Error, Result};

pub const DEFAULT_WIKI: &str = "https://sw.wikipedia.org";

#[derive(Debug, Clone)]
pub struct WikiConfig {
    pub base_url: String,
    pub summary_timeout: Duration,
    pub query_timeout: Duration,
}

impl Default for WikiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_WIKI.to_string(),
            summary_timeout: Duration::from_secs(30),
            query_timeout: Duration::from_secs(60),
        }
    }
}

/// REST `page/summary` payload, only the parts we read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageSummary {
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub page_type: Option<String>,
    pub extract: Option<String>,
    pub extract_html: Option<String>,
    pub content_urls: Option<ContentUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentUrls {
    pub desktop: Option<PlatformUrls>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformUrls {
    pub page: Option<String>,
}

impl PageSummary {
    /// Lead text, taken from `extract_html` when the plain extract is missing.
    pub fn lead_text(&self) -> String {
        match (&self.extract, &self.extract_html) {
            (Some(extract), _) if !extract.trim().is_empty() => extract.clone(),
            (_, Some(html)) => Html::parse_fragment(html)
                .root_element()
                .text()
                .collect::<String>()
                .trim()
                .to_string(),
            _ => String::new(),
        }
    }

    pub fn page_url(&self) -> Option<&str> {
        self.content_urls
            .as_ref()?
            .desktop
            .as_ref()?
            .page
            .as_deref()
    }

    /// "standard" pages are articles; anything else keeps its REST type.
    pub fn content_type(&self) -> String {
        match self.page_type.as_deref() {
            Some("standard") | None | Some("") => "article".to_string(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WikiClient {
    client: Client,
    base: Url,
    config: WikiConfig,
}

impl WikiClient {
    pub fn new(config: WikiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl(config.base_url.clone()));
        }
        Ok(Self {
            client: Client::new(),
            base,
            config,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// `{wiki}/wiki/{Title_With_Underscores}`
    pub fn article_url(&self, title: &str) -> Result<Url> {
        let page = title.replace(' ', "_");
        self.endpoint(&["wiki", page.as_str()])
    }

    pub async fn summary(&self, title: &str) -> Result<PageSummary> {
        let url = self.endpoint(&["api", "rest_v1", "page", "summary", title])?;
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .timeout(self.config.summary_timeout)
            .send()
            .await?;
        if response.status().as_u16() == 404 {
            return Err(Error::NotFound(title.to_string()));
        }
        let summary = response.error_for_status()?.json::<PageSummary>().await?;
        Ok(summary)
    }

    /// Runs an Action API `prop` query for one page, following `continue`
    /// tokens, and returns every entry found under `list_key`.
    pub async fn query_all(
        &self,
        title: &str,
        params: &[(&str, &str)],
        list_key: &str,
    ) -> Result<Vec<Value>> {
        let url = self.endpoint(&["w", "api.php"])?;
        let mut items = Vec::new();
        let mut cont: Option<Map<String, Value>> = None;

        loop {
            let mut query: Vec<(String, String)> = [
                ("action", "query"),
                ("format", "json"),
                ("formatversion", "2"),
                ("titles", title),
                ("redirects", "1"),
            ]
            .iter()
            .chain(params.iter())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
            if let Some(cont) = &cont {
                for (key, value) in cont {
                    let value = match value {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    query.push((key.clone(), value));
                }
            }

            let body = self
                .client
                .get(url.clone())
                .query(&query)
                .timeout(self.config.query_timeout)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await?;

            if let Some(error) = body.get("error") {
                let info = error
                    .get("info")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error");
                return Err(Error::Wiki(info.to_string()));
            }

            if let Some(found) = body
                .pointer("/query/pages/0")
                .and_then(|page| page.get(list_key))
                .and_then(Value::as_array)
            {
                items.extend(found.iter().cloned());
            }

            match body.get("continue").and_then(Value::as_object) {
                Some(next) if !next.is_empty() => cont = Some(next.clone()),
                _ => break,
            }
        }

        Ok(items)
    }

    /// Main-namespace link targets, in API order.
    pub async fn links(&self, title: &str) -> Result<Vec<String>> {
        let items = self
            .query_all(
                title,
                &[("prop", "links"), ("plnamespace", "0"), ("pllimit", "max")],
                "links",
            )
            .await?;
        Ok(titles(&items))
    }

    /// External link URLs as the API returns them (possibly protocol-relative).
    pub async fn extlinks(&self, title: &str) -> Result<Vec<String>> {
        let items = self
            .query_all(title, &[("prop", "extlinks"), ("ellimit", "max")], "extlinks")
            .await?;
        Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => obj
                    .get("url")
                    .or_else(|| obj.get("*"))
                    .and_then(Value::as_str)
                    .map(str::to_string),
                _ => None,
            })
            .collect())
    }

    /// Visible category titles.
    pub async fn categories(&self, title: &str) -> Result<Vec<String>> {
        let items = self
            .query_all(
                title,
                &[("prop", "categories"), ("clshow", "!hidden"), ("cllimit", "max")],
                "categories",
            )
            .await?;
        Ok(titles(&items))
    }
}

fn titles(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.get("title").and_then(Value::as_str))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

use crate::common::error::{Result, ScraperError};
use crate::config::CrawlConfig;
use crate::domain::RawSnapshot;
use crate::infra::FsSnapshotStore;
use crate::observability::metrics;
use futures::stream::{self, StreamExt};
use scraper::{Html, Selector};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Totals for one crawl
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct CrawlReport {
    pub requested: usize,
    pub stored: usize,
    pub failed: usize,
}

/// Fetches each seed page once and stores its `<body>` markup as a snapshot.
pub struct Crawler {
    client: reqwest::Client,
    store: FsSnapshotStore,
    max_concurrency: usize,
}

impl Crawler {
    pub fn new(config: &CrawlConfig, store: FsSnapshotStore, max_concurrency: usize) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_seconds));
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            store,
            max_concurrency: max_concurrency.max(1),
        })
    }

    /// Crawl every URL. Individual failures are logged and counted.
    #[instrument(skip(self, urls), fields(urls = urls.len()))]
    pub async fn crawl(&self, urls: Vec<String>) -> Result<CrawlReport> {
        self.store.ensure().await?;
        let t_crawl = std::time::Instant::now();
        let requested = urls.len();

        let results: Vec<bool> = stream::iter(urls)
            .map(|url| async move {
                match self.crawl_one(&url).await {
                    Ok(id) => {
                        debug!(url = %url, snapshot = %id, "Crawled page");
                        metrics::crawl::page_crawled();
                        true
                    }
                    Err(e) => {
                        warn!(url = %url, error = %e, "Request failed");
                        metrics::crawl::crawl_error(e.kind());
                        false
                    }
                }
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let stored = results.iter().filter(|ok| **ok).count();
        let report = CrawlReport {
            requested,
            stored,
            failed: requested - stored,
        };
        metrics::crawl::duration(t_crawl.elapsed().as_secs_f64());
        info!("Crawled {} of {} URLs ({} failed)", report.stored, report.requested, report.failed);
        Ok(report)
    }

    async fn crawl_one(&self, url: &str) -> Result<String> {
        let snapshot = self.fetch_page(url).await?;
        self.store.put(&snapshot).await
    }

    /// GET one page; the snapshot URL is the final URL after redirects.
    pub async fn fetch_page(&self, url: &str) -> Result<RawSnapshot> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let loaded_url = response.url().to_string();
        let body = response.text().await?;
        Ok(RawSnapshot {
            url: loaded_url,
            html: Some(body_html(&body)),
        })
    }
}

/// Inner markup of `<body>`, or the whole document if there is none.
pub fn body_html(document: &str) -> String {
    let parsed = Html::parse_document(document);
    match Selector::parse("body") {
        Ok(selector) => parsed
            .select(&selector)
            .next()
            .map(|body| body.inner_html())
            .unwrap_or_else(|| parsed.root_element().html()),
        Err(_) => parsed.root_element().html(),
    }
}

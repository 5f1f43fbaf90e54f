use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use sitewalk_core::{
    BrowserSession, CrawlConfig, CrawlError, CrawlReport, FormInteraction, FrontierItem, TerminationReason,
    TimingConfig,
};
use sitewalk_frontier::{canonical, check, host_of, normalize, normalize::is_navigable, resolve};
use sitewalk_parser::LinkExtractor;

use crate::navigation::navigate_with_fallback;
use crate::session::CrawlSession;

/// Bounded breadth-first crawler over one browser session.
///
/// Each dequeued item is committed, navigated, mined for links and given a
/// form pass before the next item is looked at. A form that navigates has
/// its landing page mined too.
pub struct Crawler<S: BrowserSession> {
    config: CrawlConfig,
    timing: TimingConfig,
    session: S,
    extractor: LinkExtractor,
    cancel: Arc<AtomicBool>,
}

impl<S: BrowserSession> Crawler<S> {
    pub fn new(mut config: CrawlConfig, timing: TimingConfig, session: S) -> Self {
        if !config.same_domain_only {
            warn!("cross-origin crawling is not supported, forcing same_domain_only");
            config.same_domain_only = true;
        }
        Self {
            config,
            timing,
            session,
            extractor: LinkExtractor::new(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share a stop flag with the caller. Checked once per loop iteration.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    pub fn with_extractor(mut self, extractor: LinkExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    /// Crawl from `start_url` until the frontier drains, the page budget is
    /// spent or the stop flag is raised.
    ///
    /// Only an unusable start URL is an error; everything that goes wrong
    /// per page is logged and skipped.
    pub async fn run(&mut self, start_url: &str) -> Result<CrawlReport, CrawlError> {
        let start = resolve(start_url, "")
            .filter(is_navigable)
            .filter(|u| u.host_str().is_some())
            .ok_or_else(|| CrawlError::InvalidUrl(start_url.to_string()))?;
        let start_key = canonical(&start);

        let mut crawl = CrawlSession::new(start_key.clone());
        crawl.begin();
        crawl.frontier.push(FrontierItem::new(start_key.clone(), 0));
        self.seed_routes(&mut crawl);

        info!(
            start = %start_key,
            max_depth = self.config.max_depth,
            max_pages = self.config.max_pages,
            queued = crawl.frontier.len(),
            "crawl started"
        );

        let reason = loop {
            if self.cancel.load(Ordering::Relaxed) {
                break TerminationReason::Cancelled;
            }
            if crawl.discovered.len() >= self.config.max_pages {
                break TerminationReason::FrontierExhausted;
            }
            let Some(item) = crawl.frontier.pop() else {
                break TerminationReason::FrontierExhausted;
            };

            if crawl.visited.contains(&item.url) {
                crawl.skipped.already_visited += 1;
                continue;
            }
            if item.depth > self.config.max_depth {
                crawl.skipped.too_deep += 1;
                continue;
            }
            let admission = check(&item.url, &crawl.start_url, &self.config);
            if !admission.is_admitted() {
                debug!(url = %item.url, ?admission, "filtered");
                crawl.skipped.filtered += 1;
                continue;
            }

            let index = crawl.commit(&item);
            info!(url = %item.url, depth = item.depth, discovered = crawl.discovered.len(), "page discovered");

            if crawl.discovered.len() == self.config.max_pages {
                break TerminationReason::MaxPagesReached;
            }
            if item.depth == self.config.max_depth {
                debug!(url = %item.url, "max depth, not expanding");
                continue;
            }

            self.expand(&mut crawl, index, &item).await;
        };

        let dropped = crawl.frontier.discard();
        crawl.terminate(reason);
        info!(
            reason = %reason,
            discovered = crawl.discovered.len(),
            visited = crawl.visited.len(),
            dropped,
            "crawl finished"
        );

        Ok(crawl.into_report())
    }

    /// Seed routes join the start URL at depth 0. Anything that does not
    /// resolve to a same-host http(s) URL is dropped.
    fn seed_routes(&self, crawl: &mut CrawlSession) {
        let Some(routes) = self.config.seed_routes.as_deref() else {
            return;
        };
        let start_host = host_of(&crawl.start_url);

        for route in routes {
            let Some(url) = resolve(route, &crawl.start_url).filter(is_navigable) else {
                debug!(route = %route, "seed route does not resolve, dropped");
                continue;
            };
            let key = canonical(&url);
            if host_of(&key) != start_host {
                debug!(route = %route, "seed route on another host, dropped");
                continue;
            }
            crawl.frontier.push(FrontierItem::new(key, 0));
        }
    }

    async fn expand(&mut self, crawl: &mut CrawlSession, index: usize, item: &FrontierItem) {
        let outcome = navigate_with_fallback(&mut self.session, &item.url, &self.timing).await;
        if !outcome.is_loaded() {
            crawl.skipped.navigation_failed += 1;
            return;
        }

        // The page's own links are read before the form pass can navigate away.
        let mut links = self.extractor.extract(&self.session).await.links;
        if self.config.auto_fill_forms && self.form_pass(crawl, index).await {
            for link in self.extractor.extract(&self.session).await.links {
                if !links.contains(&link) {
                    links.push(link);
                }
            }
        }

        let found = links.len();
        let mut queued = 0;
        for link in links {
            if crawl.visited.contains(&link) {
                continue;
            }
            if !check(&link, &crawl.start_url, &self.config).is_admitted() {
                continue;
            }
            if crawl.frontier.push(FrontierItem::new(link, item.depth + 1)) {
                queued += 1;
            }
        }
        debug!(url = %item.url, found, queued, "links extracted");
    }

    /// Fill and submit whatever form the page shows. A submission that lands
    /// on a new URL marks that URL visited and turns the current page's entry
    /// into a before/after pair. Returns whether the session moved.
    async fn form_pass(&mut self, crawl: &mut CrawlSession, index: usize) -> bool {
        let before = match self.session.current_url().await {
            Ok(url) => normalize(&url, &url),
            Err(e) => {
                warn!(error = %e, "cannot read URL before form pass, skipping forms");
                return false;
            }
        };

        let custom = self.config.custom_form_fields.as_deref();
        let Some(attempt) = sitewalk_forms::interact(&mut self.session, custom).await else {
            return false;
        };
        if !attempt.submit.fired() {
            return false;
        }

        self.session
            .wait_for_timeout(Duration::from_millis(self.timing.submit_settle_ms))
            .await;

        let after = match self.session.current_url().await {
            Ok(url) => normalize(&url, &url),
            Err(e) => {
                warn!(url = %before, error = %e, "cannot read URL after submit");
                return false;
            }
        };

        if after == before {
            debug!(url = %before, "submit did not change URL");
            return false;
        }

        info!(before = %before, after = %after, filled = attempt.fields_filled, "form submission navigated");
        crawl.visited.insert(after.clone());
        crawl.discovered[index].form_interaction = Some(FormInteraction {
            before_url: before,
            after_url: after,
            fields_filled: attempt.fields_filled,
        });
        true
    }
}

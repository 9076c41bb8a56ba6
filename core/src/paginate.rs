//! Multi-page result accumulation for the search calls.
//!
//! # Design
//! Pagination is layered on top of `send`, never inside it: the driver sends
//! the call, and while the response carries a `next_page_token` it waits,
//! sets the token on the same call and sends again. Tokens only become valid
//! a couple of seconds after they are issued, hence the fixed delay. The
//! first error from any page aborts the walk and is returned unchanged.

use std::thread;
use std::time::Duration;

use tracing::debug;

use crate::error::Result;
use crate::http::HttpClient;
use crate::search::{NearbyCall, RadarSearchCall, SearchResponse, TextSearchCall};

/// Wait before a freshly issued page token is accepted by the server.
pub const PAGE_TOKEN_DELAY: Duration = Duration::from_secs(2);

/// A search call that can be re-sent with a continuation token.
pub trait Paginate {
    fn set_page_token(&mut self, token: String);
    fn send_page(&self) -> Result<SearchResponse>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    /// Sleep between consecutive page requests.
    pub delay: Duration,
    /// Stop after this many pages, `None` for all of them.
    pub max_pages: Option<usize>,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            delay: PAGE_TOKEN_DELAY,
            max_pages: None,
        }
    }
}

/// Send `call` and follow `next_page_token` until it runs out.
///
/// The returned response holds every page's results in order and the union
/// of their attributions. When `max_pages` cuts the walk short, the unused
/// token is left in `next_page_token` so the caller can resume.
pub fn collect_all<P: Paginate>(call: &mut P, options: &PaginationOptions) -> Result<SearchResponse> {
    let mut merged = call.send_page()?;
    let mut pages = 1;
    let mut token = merged.next_page_token.take();

    while let Some(next) = token {
        if options.max_pages.is_some_and(|max| pages >= max) {
            merged.next_page_token = Some(next);
            break;
        }

        thread::sleep(options.delay);
        call.set_page_token(next);
        let mut page = call.send_page()?;
        pages += 1;
        debug!(page = pages, results = page.results.len(), "fetched next page");

        merged.results.append(&mut page.results);
        for attribution in page.html_attributions {
            if !merged.html_attributions.contains(&attribution) {
                merged.html_attributions.push(attribution);
            }
        }
        token = page.next_page_token;
    }

    Ok(merged)
}

impl<C: HttpClient> Paginate for NearbyCall<'_, C> {
    fn set_page_token(&mut self, token: String) {
        self.page_token = Some(token);
    }

    fn send_page(&self) -> Result<SearchResponse> {
        self.send()
    }
}

impl<C: HttpClient> Paginate for TextSearchCall<'_, C> {
    fn set_page_token(&mut self, token: String) {
        self.page_token = Some(token);
    }

    fn send_page(&self) -> Result<SearchResponse> {
        self.send()
    }
}

impl<C: HttpClient> Paginate for RadarSearchCall<'_, C> {
    fn set_page_token(&mut self, token: String) {
        self.page_token = Some(token);
    }

    fn send_page(&self) -> Result<SearchResponse> {
        self.send()
    }
}

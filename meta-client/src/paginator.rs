//! Following `links.next` across a paginated collection.

use serde::de::DeserializeOwned;
use storemeta_core::PageAccumulator;
use storemeta_types::{Document, Page};
use tracing::debug;

use crate::http::HttpClient;
use crate::transport::Transport;
use crate::ClientError;

/// Fetches every page of a collection through an [`HttpClient`].
pub struct Paginator<'a, T: Transport> {
    client: &'a HttpClient<T>,
}

impl<'a, T: Transport> Paginator<'a, T> {
    /// A paginator over `client`.
    pub fn new(client: &'a HttpClient<T>) -> Self {
        Self { client }
    }

    /// Every item of the collection, in server order.
    ///
    /// Any failing page aborts the whole fetch with that page's error.
    pub async fn fetch_all<R: DeserializeOwned>(&self, first_url: &str) -> Result<Vec<R>, ClientError> {
        Ok(self.fetch_pages(first_url).await?.into_items())
    }

    /// Like [`Self::fetch_all`], keeping page bookkeeping for the caller.
    pub async fn fetch_pages<R: DeserializeOwned>(
        &self,
        first_url: &str,
    ) -> Result<PageAccumulator<R>, ClientError> {
        let mut acc = PageAccumulator::new(first_url);
        while let Some(url) = acc.next_url().map(str::to_string) {
            let document: Document<R> = self.client.get(&url).await?;
            let page = Page::from(document);
            debug!(%url, items = page.items.len(), has_next = !page.is_last(), "fetched page");
            acc.push(page);
        }
        debug!(pages = acc.pages(), items = acc.items().len(), "pagination complete");
        Ok(acc)
    }
}

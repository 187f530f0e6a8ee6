use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;

use crate::Result;

/// A list response that can be walked page by page.
pub trait PaginatedResponse {
    type Item;
    fn items(self) -> Vec<Self::Item>;
    fn next_page_token(&self) -> Option<&str>;
}

impl PaginatedResponse for crate::types::ListSourcesResponse {
    type Item = crate::types::Source;
    fn items(self) -> Vec<Self::Item> {
        self.sources
    }
    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}

impl PaginatedResponse for crate::types::ListSessionsResponse {
    type Item = crate::types::Session;
    fn items(self) -> Vec<Self::Item> {
        self.sessions
    }
    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}

impl PaginatedResponse for crate::types::ListActivitiesResponse {
    type Item = crate::types::Activity;
    fn items(self) -> Vec<Self::Item> {
        self.activities
    }
    fn next_page_token(&self) -> Option<&str> {
        self.next_page_token.as_deref()
    }
}

/// Boxed page-fetch future, as produced by the client's `stream_*` helpers.
pub type FetchFuture<R> = Pin<Box<dyn Future<Output = Result<R>> + Send>>;

/// Streams the items of a paginated list endpoint, fetching the next page
/// lazily as the previous one drains. The first fetch is issued with no
/// page token; iteration ends when a page carries no `nextPageToken`, or on
/// the first error.
pub struct Paginator<R, F>
where
    R: PaginatedResponse,
    F: Fn(Option<String>) -> FetchFuture<R>,
{
    fetch: F,
    buffer: VecDeque<R::Item>,
    next_page_token: Option<String>,
    started: bool,
    done: bool,
    in_flight: Option<FetchFuture<R>>,
}

impl<R, F> Paginator<R, F>
where
    R: PaginatedResponse,
    F: Fn(Option<String>) -> FetchFuture<R>,
{
    pub fn new(fetch: F) -> Self {
        Self {
            fetch,
            buffer: VecDeque::new(),
            next_page_token: None,
            started: false,
            done: false,
            in_flight: None,
        }
    }
}

impl<R, F> Stream for Paginator<R, F>
where
    R: PaginatedResponse + Unpin,
    F: Fn(Option<String>) -> FetchFuture<R> + Unpin,
    R::Item: Unpin,
{
    type Item = Result<R::Item>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        loop {
            if let Some(item) = this.buffer.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }
            if this.done {
                return Poll::Ready(None);
            }

            if this.in_flight.is_none() {
                let token = if this.started {
                    match this.next_page_token.clone() {
                        Some(token) => Some(token),
                        None => {
                            this.done = true;
                            return Poll::Ready(None);
                        }
                    }
                } else {
                    None
                };
                this.in_flight = Some((this.fetch)(token));
            }

            let polled = match this.in_flight.as_mut() {
                Some(page) => page.as_mut().poll(cx),
                None => continue,
            };

            match polled {
                Poll::Ready(result) => {
                    this.in_flight = None;
                    this.started = true;
                    match result {
                        Ok(response) => {
                            this.next_page_token =
                                response.next_page_token().map(|s| s.to_string());
                            this.buffer = response.items().into();
                            // Loop again to drain the buffer.
                        }
                        Err(err) => {
                            this.done = true;
                            return Poll::Ready(Some(Err(err)));
                        }
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

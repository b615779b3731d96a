//! Cursor-driven lazy pagination over unbounded result sets.
//!
//! [`Paginator`] turns a fetch-one-page operation into a forward-only,
//! pull-driven sequence of items. Pages are fetched strictly in cursor order,
//! each cursor depending on the previous page's result; nothing is fetched
//! until the consumer pulls past the buffered page. The sequence is not
//! restartable—build a fresh paginator to iterate from the start.

// crates.io
use futures::Stream;
// self
use crate::_prelude::*;

/// One page of items plus the cursor to request the page after it.
///
/// An absent or empty `next_cursor` signals the end of the stream. Cursors are
/// opaque server-issued strings passed back verbatim.
#[derive(Clone, Debug)]
pub struct Page<T> {
	/// Items in server order.
	pub items: Vec<T>,
	/// Cursor for the next page, when the server reported one.
	pub next_cursor: Option<String>,
}

/// Boxed single-page fetch future driven by [`Paginator`].
pub type PageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Page<T>>> + 'a + Send>>;

type PageFetcher<'a, T> = Box<dyn FnMut(Option<String>) -> PageFuture<'a, T> + 'a + Send>;

/// Pull-driven cursor walk bounded by a caller-supplied item budget.
///
/// The state machine is explicit owned state: the buffered page, the last seen
/// cursor, the remaining budget, and a terminal flag. The sequence ends cleanly
/// when the budget is exhausted, a page carries no cursor, or a page is empty;
/// a fetch failure is surfaced at the failing pull and terminates the walk.
/// Items yielded before a failure remain valid.
pub struct Paginator<'a, T> {
	fetch_page: PageFetcher<'a, T>,
	buffer: std::vec::IntoIter<T>,
	cursor: Option<String>,
	remaining: usize,
	started: bool,
	finished: bool,
}
impl<'a, T> Paginator<'a, T> {
	/// Creates a paginator over `fetch_page` yielding at most `item_limit`
	/// items.
	///
	/// A zero limit produces an empty sequence without ever invoking
	/// `fetch_page`.
	pub fn new<F>(fetch_page: F, item_limit: usize) -> Self
	where
		F: FnMut(Option<String>) -> PageFuture<'a, T> + 'a + Send,
	{
		Self {
			fetch_page: Box::new(fetch_page),
			buffer: Vec::new().into_iter(),
			cursor: None,
			remaining: item_limit,
			started: false,
			finished: item_limit == 0,
		}
	}

	/// Pulls the next item, fetching the next page when the buffer is
	/// exhausted.
	///
	/// Returns `None` once the sequence has ended; after a `Some(Err(_))` every
	/// subsequent pull returns `None`.
	pub async fn next(&mut self) -> Option<Result<T>> {
		if self.finished || self.remaining == 0 {
			self.finished = true;

			return None;
		}

		while self.buffer.as_slice().is_empty() {
			if self.started && self.cursor.is_none() {
				self.finished = true;

				return None;
			}

			match (self.fetch_page)(self.cursor.clone()).await {
				Ok(page) => {
					self.started = true;
					self.cursor = page.next_cursor.filter(|cursor| !cursor.is_empty());

					if page.items.is_empty() {
						self.finished = true;

						return None;
					}

					self.buffer = page.items.into_iter();
				},
				Err(error) => {
					self.finished = true;

					return Some(Err(error));
				},
			}
		}

		let item = self.buffer.next()?;

		self.remaining -= 1;

		Some(Ok(item))
	}

	/// Adapts the paginator into a [`Stream`] for combinator-style consumers.
	pub fn into_stream(self) -> impl Stream<Item = Result<T>> + 'a
	where
		T: 'a,
	{
		futures::stream::unfold(self, |mut paginator| async move {
			let item = paginator.next().await?;

			Some((item, paginator))
		})
	}
}
impl<T> Debug for Paginator<'_, T> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Paginator")
			.field("buffered", &self.buffer.len())
			.field("cursor", &self.cursor)
			.field("remaining", &self.remaining)
			.field("finished", &self.finished)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use futures::StreamExt;
	// self
	use super::*;
	use crate::error::ApiError;

	/// Serves `k`-item pages forever, recording the cursor of every call.
	fn endless_fetcher(
		k: u32,
		calls: Arc<Mutex<Vec<Option<String>>>>,
	) -> impl FnMut(Option<String>) -> PageFuture<'static, u32> + Send {
		move |cursor| {
			let calls = Arc::clone(&calls);

			Box::pin(async move {
				let index = {
					let mut calls = calls.lock();

					calls.push(cursor);
					calls.len() as u32
				};

				Ok(Page {
					items: (0..k).map(|offset| index * 100 + offset).collect(),
					next_cursor: Some(format!("c{index}")),
				})
			})
		}
	}

	/// Serves a fixed script of pages, recording the cursor of every call.
	fn scripted_fetcher(
		pages: Vec<Page<u32>>,
		calls: Arc<Mutex<Vec<Option<String>>>>,
	) -> impl FnMut(Option<String>) -> PageFuture<'static, u32> + Send {
		let script = Arc::new(Mutex::new(pages.into_iter()));

		move |cursor| {
			let calls = Arc::clone(&calls);
			let script = Arc::clone(&script);

			Box::pin(async move {
				calls.lock().push(cursor);

				Ok(script.lock().next().expect("Fetcher script should not be exhausted."))
			})
		}
	}

	async fn drain(paginator: &mut Paginator<'_, u32>) -> Vec<u32> {
		let mut items = Vec::new();

		while let Some(item) = paginator.next().await {
			items.push(item.expect("Drained paginator should not surface errors."));
		}

		items
	}

	#[tokio::test]
	async fn zero_limit_never_fetches() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let mut paginator = Paginator::new(endless_fetcher(10, Arc::clone(&calls)), 0);

		assert!(paginator.next().await.is_none());
		assert!(paginator.next().await.is_none());
		assert!(calls.lock().is_empty());
	}

	#[tokio::test]
	async fn budget_bounds_fetch_count_and_cursor_chain() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let mut paginator = Paginator::new(endless_fetcher(10, Arc::clone(&calls)), 25);
		let items = drain(&mut paginator).await;

		assert_eq!(items.len(), 25);

		let calls = calls.lock();

		// ceil(25 / 10) fetches, each fed the previous page's cursor.
		assert_eq!(
			*calls,
			vec![None, Some("c1".into()), Some("c2".into())]
		);
	}

	#[tokio::test]
	async fn missing_cursor_ends_sequence_below_budget() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let pages = vec![
			Page { items: (0..10).collect(), next_cursor: Some("c1".into()) },
			Page { items: (10..20).collect(), next_cursor: Some("c2".into()) },
			Page { items: (20..25).collect(), next_cursor: None },
		];
		let mut paginator = Paginator::new(scripted_fetcher(pages, Arc::clone(&calls)), 100);
		let items = drain(&mut paginator).await;

		assert_eq!(items.len(), 25);
		assert_eq!(calls.lock().len(), 3);
	}

	#[tokio::test]
	async fn empty_cursor_is_treated_as_end() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let pages = vec![Page { items: (0..3).collect(), next_cursor: Some(String::new()) }];
		let mut paginator = Paginator::new(scripted_fetcher(pages, Arc::clone(&calls)), 100);
		let items = drain(&mut paginator).await;

		assert_eq!(items.len(), 3);
		assert_eq!(calls.lock().len(), 1);
	}

	#[tokio::test]
	async fn empty_page_ends_sequence() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let pages = vec![
			Page { items: (0..4).collect(), next_cursor: Some("c1".into()) },
			Page { items: Vec::new(), next_cursor: Some("c2".into()) },
		];
		let mut paginator = Paginator::new(scripted_fetcher(pages, Arc::clone(&calls)), 100);
		let items = drain(&mut paginator).await;

		assert_eq!(items.len(), 4);
		assert_eq!(calls.lock().len(), 2);
	}

	#[tokio::test]
	async fn final_page_is_truncated_to_budget() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let mut paginator = Paginator::new(endless_fetcher(10, Arc::clone(&calls)), 12);
		let mut items = Vec::new();

		while let Some(item) = paginator.next().await {
			items.push(item.expect("Truncation test should not surface errors."));
		}

		assert_eq!(items.len(), 12);
		assert_eq!(calls.lock().len(), 2);
	}

	#[tokio::test]
	async fn fetch_failure_surfaces_at_failing_pull() {
		let attempts = Arc::new(Mutex::new(0_usize));
		let attempts_in = Arc::clone(&attempts);
		let mut paginator: Paginator<u32> = Paginator::new(
			move |_| {
				let attempts = Arc::clone(&attempts_in);

				Box::pin(async move {
					let attempt = {
						let mut attempts = attempts.lock();

						*attempts += 1;
						*attempts
					};

					if attempt == 1 {
						Ok(Page { items: vec![1, 2], next_cursor: Some("c1".into()) })
					} else {
						Err(ApiError { status: 500, body: None }.into())
					}
				})
			},
			100,
		);

		assert_eq!(paginator.next().await.map(Result::unwrap), Some(1));
		assert_eq!(paginator.next().await.map(Result::unwrap), Some(2));
		assert!(paginator.next().await.is_some_and(|item| item.is_err()));
		assert!(paginator.next().await.is_none());
		assert_eq!(*attempts.lock(), 2);
	}

	#[tokio::test]
	async fn stream_adapter_yields_same_items() {
		let calls = Arc::new(Mutex::new(Vec::new()));
		let pages = vec![Page { items: (0..5).collect(), next_cursor: None }];
		let paginator = Paginator::new(scripted_fetcher(pages, Arc::clone(&calls)), 3);
		let items: Vec<_> = paginator
			.into_stream()
			.map(|item| item.expect("Stream adapter should not surface errors."))
			.collect()
			.await;

		assert_eq!(items, vec![0, 1, 2]);
	}
}

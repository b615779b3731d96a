//! Scraper facade binding the general and trends auth contexts to the public
//! operation surface.

// self
use crate::{
	_prelude::*,
	auth::GuestAuth,
	endpoint::Endpoints,
	paginate::{Page, Paginator},
	profile::{self, Profile},
	search::{self, SearchMode},
	trends,
	tweets::{self, Tweet},
};

// Public web-app bearer tokens; the general token covers every read endpoint
// except the trends guide, which only accepts the second one.
const BEARER_TOKEN: &str = "AAAAAAAAAAAAAAAAAAAAAFQODgEAAAAAVHTp76lzh3rFzcHbmHVvQxYYpTw%3DckAlMINMjmCwxUcaXbAN4XqJVdgMJaHqNOFgPMK0zN1qLqLQCF";
const BEARER_TOKEN_TRENDS: &str = "AAAAAAAAAAAAAAAAAAAAAPYXBAAAAAAACLXUNDekMxqa8h%2F40K4moUkGsoc%3DTYfbDKbT3jJPCEVnMYqilB28NHfOPqkca3qaAxGfsyKCs0wRbw";

/// Lazy tweet sequence returned by the search and timeline operations.
pub type TweetCursor<'a> = Paginator<'a, Tweet>;
/// Lazy profile sequence returned by the profile search operation.
pub type ProfileCursor<'a> = Paginator<'a, Profile>;

/// Client facade over the unofficial web API.
///
/// Owns two independently-stateful [`GuestAuth`] contexts: one for profile,
/// search, and timeline operations, one scoped to the trends guide. Each
/// acquires and invalidates its guest token on its own; cookie/CSRF overrides
/// installed through the facade apply to both.
#[derive(Debug)]
pub struct Scraper {
	auth: GuestAuth,
	auth_trends: GuestAuth,
}
impl Scraper {
	/// Creates a scraper against the production endpoints.
	pub fn new() -> Self {
		Self::with_endpoints(Endpoints::default())
	}

	/// Creates a scraper against a custom endpoint catalog, typically a test
	/// server.
	pub fn with_endpoints(endpoints: Endpoints) -> Self {
		let http = ReqwestClient::default();

		Self {
			auth: GuestAuth::new(BEARER_TOKEN, endpoints.clone(), http.clone()),
			auth_trends: GuestAuth::new(BEARER_TOKEN_TRENDS, endpoints, http),
		}
	}

	/// Looks up a profile by screen name.
	pub async fn get_profile(&self, username: &str) -> Result<Profile> {
		profile::get_profile(&self.auth, username).await
	}

	/// Resolves a screen name to its user id.
	pub async fn get_user_id_by_screen_name(&self, screen_name: &str) -> Result<String> {
		profile::get_user_id(&self.auth, screen_name).await
	}

	/// Searches tweets lazily, yielding at most `max_tweets` items.
	pub fn search_tweets(
		&self,
		query: &str,
		max_tweets: usize,
		include_replies: bool,
		mode: SearchMode,
	) -> TweetCursor<'_> {
		let query = query.to_owned();

		Paginator::new(
			move |cursor| {
				let query = query.clone();

				Box::pin(search::fetch_search_tweets(
					&self.auth,
					query,
					max_tweets,
					include_replies,
					mode,
					cursor,
				))
			},
			max_tweets,
		)
	}

	/// Searches profiles lazily, yielding at most `max_profiles` items.
	pub fn search_profiles(
		&self,
		query: &str,
		max_profiles: usize,
		include_replies: bool,
	) -> ProfileCursor<'_> {
		let query = query.to_owned();

		Paginator::new(
			move |cursor| {
				let query = query.clone();

				Box::pin(search::fetch_search_profiles(
					&self.auth,
					query,
					max_profiles,
					include_replies,
					cursor,
				))
			},
			max_profiles,
		)
	}

	/// Fetches a single page of tweet search results for callers driving the
	/// cursor themselves.
	pub async fn fetch_search_tweets(
		&self,
		query: &str,
		max_tweets: usize,
		include_replies: bool,
		mode: SearchMode,
		cursor: Option<String>,
	) -> Result<Page<Tweet>> {
		search::fetch_search_tweets(
			&self.auth,
			query.to_owned(),
			max_tweets,
			include_replies,
			mode,
			cursor,
		)
		.await
	}

	/// Fetches the current trend names through the trends context.
	pub async fn get_trends(&self, include_replies: bool) -> Result<Vec<String>> {
		trends::get_trends(&self.auth_trends, include_replies).await
	}

	/// Walks a user's timeline lazily, yielding at most `max_tweets` items.
	///
	/// The screen name resolves to a user id on the first fetch; later pages
	/// reuse the resolved id.
	pub fn get_tweets(
		&self,
		user: &str,
		max_tweets: usize,
		include_replies: bool,
	) -> TweetCursor<'_> {
		let user = user.to_owned();
		let resolved_id: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));

		Paginator::new(
			move |cursor| {
				let user = user.clone();
				let resolved_id = Arc::clone(&resolved_id);

				Box::pin(async move {
					let cached = resolved_id.lock().clone();
					let user_id = match cached {
						Some(user_id) => user_id,
						None => {
							let user_id = profile::get_user_id(&self.auth, &user).await?;

							*resolved_id.lock() = Some(user_id.clone());

							user_id
						},
					};

					tweets::fetch_user_tweets(
						&self.auth,
						&user_id,
						max_tweets,
						include_replies,
						cursor,
					)
					.await
				})
			},
			max_tweets,
		)
	}

	/// Fetches a single tweet by id; `Ok(None)` when the id is unknown.
	pub async fn get_tweet(&self, id: &str, include_replies: bool) -> Result<Option<Tweet>> {
		tweets::get_tweet(&self.auth, id, include_replies).await
	}

	/// Reports whether either context currently holds usable credentials.
	pub fn has_guest_token(&self) -> bool {
		self.auth.has_token() || self.auth_trends.has_token()
	}

	/// Installs a session cookie on both contexts; chainable.
	pub fn with_cookie(&self, cookie: &str) -> &Self {
		self.auth.use_cookie(cookie);
		self.auth_trends.use_cookie(cookie);

		self
	}

	/// Installs a CSRF token on both contexts; chainable.
	pub fn with_x_csrf_token(&self, token: &str) -> &Self {
		self.auth.use_csrf_token(token);
		self.auth_trends.use_csrf_token(token);

		self
	}

	/// Returns the general-purpose auth context.
	pub fn auth(&self) -> &GuestAuth {
		&self.auth
	}

	/// Returns the trends-scoped auth context.
	pub fn trends_auth(&self) -> &GuestAuth {
		&self.auth_trends
	}
}
impl Default for Scraper {
	fn default() -> Self {
		Self::new()
	}
}

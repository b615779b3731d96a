//! Tweet and profile search over the adaptive search endpoint.

// self
use crate::{
	_prelude::*,
	auth::GuestAuth,
	http::{self, RequestSpec},
	paginate::Page,
	profile::Profile,
	timeline::{self, TimelineRaw},
	tweets::Tweet,
};

// The adaptive search endpoint rejects page sizes above 50.
const MAX_SEARCH_PAGE: usize = 50;

/// Result filter applied to a search query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchMode {
	/// Ranked results, the default web-app tab.
	Top,
	/// Most recent results.
	Latest,
	/// Tweets carrying photos.
	Photos,
	/// Tweets carrying videos.
	Videos,
	/// Matching user profiles.
	Users,
}

/// Fetches one page of tweet search results.
pub(crate) async fn fetch_search_tweets(
	auth: &GuestAuth,
	query: String,
	count: usize,
	include_replies: bool,
	mode: SearchMode,
	cursor: Option<String>,
) -> Result<Page<Tweet>> {
	let raw = fetch_search_page(auth, query, count, include_replies, mode, cursor).await?;

	Ok(timeline::parse_tweet_page(raw))
}

/// Fetches one page of profile search results.
pub(crate) async fn fetch_search_profiles(
	auth: &GuestAuth,
	query: String,
	count: usize,
	include_replies: bool,
	cursor: Option<String>,
) -> Result<Page<Profile>> {
	let raw =
		fetch_search_page(auth, query, count, include_replies, SearchMode::Users, cursor).await?;

	Ok(timeline::parse_profile_page(raw))
}

async fn fetch_search_page(
	auth: &GuestAuth,
	query: String,
	count: usize,
	include_replies: bool,
	mode: SearchMode,
	cursor: Option<String>,
) -> Result<TimelineRaw> {
	let url = auth.endpoints().search(
		&query,
		count.min(MAX_SEARCH_PAGE),
		include_replies,
		mode,
		cursor.as_deref(),
	);

	http::execute(auth, RequestSpec::get("search", url)).await
}

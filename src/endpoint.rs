//! Catalog of the unofficial web endpoints the scraper talks to.
//!
//! Every URL is derived from a single API base so tests can point the whole
//! client at a mock server. Query construction mirrors what the web app sends;
//! the common parameter block is shared by the search, timeline, conversation,
//! and guide endpoints.

// self
use crate::{_prelude::*, search::SearchMode};

const PRODUCTION_API_BASE: &str = "https://api.twitter.com";

/// Endpoint catalog bound to one API base URL.
#[derive(Clone, Debug)]
pub struct Endpoints {
	api_base: Url,
}
impl Endpoints {
	/// Binds the catalog to a custom API base, typically a test server.
	pub fn new(api_base: Url) -> Self {
		Self { api_base }
	}

	pub(crate) fn guest_activate(&self) -> Url {
		self.url("/1.1/guest/activate.json")
	}

	pub(crate) fn user_by_screen_name(&self, screen_name: &str) -> Url {
		let mut url = self.url("/graphql/4S2ihIKfF3xhp-ENxvUAfQ/UserByScreenName");
		let variables = serde_json::json!({
			"screen_name": screen_name,
			"withHighlightedLabel": true,
		});

		url.query_pairs_mut().append_pair("variables", &variables.to_string());

		url
	}

	pub(crate) fn search(
		&self,
		query: &str,
		count: usize,
		include_replies: bool,
		mode: SearchMode,
		cursor: Option<&str>,
	) -> Url {
		let mut url = self.url("/2/search/adaptive.json");

		{
			let mut pairs = url.query_pairs_mut();

			for (key, value) in api_params(include_replies) {
				pairs.append_pair(key, &value);
			}

			pairs
				.append_pair("q", query)
				.append_pair("count", &count.to_string())
				.append_pair("query_source", "typed_query")
				.append_pair("pc", "1")
				.append_pair("spelling_corrections", "1");

			match mode {
				SearchMode::Top => {},
				SearchMode::Latest => {
					pairs.append_pair("tweet_search_mode", "live");
				},
				SearchMode::Photos => {
					pairs.append_pair("result_filter", "image");
				},
				SearchMode::Videos => {
					pairs.append_pair("result_filter", "video");
				},
				SearchMode::Users => {
					pairs.append_pair("result_filter", "user");
				},
			}

			if let Some(cursor) = cursor {
				pairs.append_pair("cursor", cursor);
			}
		}

		url
	}

	pub(crate) fn profile_timeline(
		&self,
		user_id: &str,
		count: usize,
		include_replies: bool,
		cursor: Option<&str>,
	) -> Url {
		let mut url = self.url(&format!("/2/timeline/profile/{user_id}.json"));

		{
			let mut pairs = url.query_pairs_mut();

			for (key, value) in api_params(include_replies) {
				pairs.append_pair(key, &value);
			}

			pairs.append_pair("count", &count.to_string());

			if let Some(cursor) = cursor {
				pairs.append_pair("cursor", cursor);
			}
		}

		url
	}

	pub(crate) fn conversation(&self, tweet_id: &str, include_replies: bool) -> Url {
		let mut url = self.url(&format!("/2/timeline/conversation/{tweet_id}.json"));

		{
			let mut pairs = url.query_pairs_mut();

			for (key, value) in api_params(include_replies) {
				pairs.append_pair(key, &value);
			}
		}

		url
	}

	pub(crate) fn trends_guide(&self, include_replies: bool) -> Url {
		let mut url = self.url("/2/guide.json");

		{
			let mut pairs = url.query_pairs_mut();

			for (key, value) in api_params(include_replies) {
				pairs.append_pair(key, &value);
			}

			pairs
				.append_pair("count", "20")
				.append_pair("candidate_source", "trends")
				.append_pair("include_page_configuration", "false")
				.append_pair("entity_tokens", "false");
		}

		url
	}

	fn url(&self, path: &str) -> Url {
		let mut url = self.api_base.clone();

		url.set_path(path);

		url
	}
}
impl Default for Endpoints {
	fn default() -> Self {
		Self {
			api_base: Url::parse(PRODUCTION_API_BASE)
				.expect("Hardcoded production API base must parse."),
		}
	}
}

fn api_params(include_replies: bool) -> Vec<(&'static str, String)> {
	vec![
		("include_profile_interstitial_type", "1".into()),
		("include_user_entities", "true".into()),
		("include_reply_count", "1".into()),
		("tweet_mode", "extended".into()),
		("include_tweet_replies", include_replies.to_string()),
	]
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn catalog() -> Endpoints {
		Endpoints::new(Url::parse("http://127.0.0.1:9009").expect("Test base URL should parse."))
	}

	#[test]
	fn activate_targets_configured_base() {
		let url = catalog().guest_activate();

		assert_eq!(url.as_str(), "http://127.0.0.1:9009/1.1/guest/activate.json");
	}

	#[test]
	fn user_lookup_embeds_variables_json() {
		let url = catalog().user_by_screen_name("alice");
		let variables = url
			.query_pairs()
			.find(|(key, _)| key == "variables")
			.map(|(_, value)| value.into_owned())
			.expect("UserByScreenName URL should carry a variables parameter.");

		assert!(variables.contains("\"screen_name\":\"alice\""));
	}

	#[test]
	fn search_carries_mode_and_cursor() {
		let url = catalog().search("rustlang", 50, false, SearchMode::Latest, Some("cur-1"));
		let pairs: Vec<_> =
			url.query_pairs().map(|(key, value)| (key.into_owned(), value.into_owned())).collect();

		assert!(pairs.contains(&("q".into(), "rustlang".into())));
		assert!(pairs.contains(&("count".into(), "50".into())));
		assert!(pairs.contains(&("tweet_search_mode".into(), "live".into())));
		assert!(pairs.contains(&("cursor".into(), "cur-1".into())));
		assert!(pairs.contains(&("include_tweet_replies".into(), "false".into())));
	}

	#[test]
	fn profile_search_filters_users() {
		let url = catalog().search("alice", 20, true, SearchMode::Users, None);

		assert!(url.query().is_some_and(|query| query.contains("result_filter=user")));
		assert!(url.query().is_some_and(|query| !query.contains("cursor=")));
	}

	#[test]
	fn timeline_path_embeds_user_id() {
		let url = catalog().profile_timeline("42", 200, true, None);

		assert_eq!(url.path(), "/2/timeline/profile/42.json");
	}
}

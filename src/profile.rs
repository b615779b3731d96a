//! Profile domain objects and user lookup by screen name.

// self
use crate::{
	_prelude::*,
	auth::GuestAuth,
	error::{ApiError, ParseError},
	http::{self, RequestSpec},
	timeline::{self, RawUser},
};

/// A user profile resolved from the unofficial user-lookup endpoint or a
/// search timeline.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Profile {
	/// User identifier.
	pub user_id: String,
	/// Screen name (handle without the leading `@`).
	pub username: String,
	/// Display name.
	pub name: String,
	/// Biography, when set.
	pub biography: Option<String>,
	/// Free-form location, when set.
	pub location: Option<String>,
	/// Website URL, when set.
	pub website: Option<String>,
	/// Account creation instant, when the wire timestamp parsed.
	pub joined: Option<OffsetDateTime>,
	/// Follower count.
	pub followers_count: u32,
	/// Following count.
	pub following_count: u32,
	/// Tweet count.
	pub tweets_count: u32,
	/// Like count.
	pub likes_count: u32,
	/// List membership count.
	pub listed_count: u32,
	/// Avatar image URL, when set.
	pub avatar: Option<String>,
	/// Banner image URL, when set.
	pub banner: Option<String>,
	/// Whether the account is protected.
	pub is_private: bool,
	/// Whether the account carries a verified badge.
	pub is_verified: bool,
	/// Identifiers of tweets pinned to the profile.
	pub pinned_tweet_ids: Vec<String>,
}
impl Profile {
	pub(crate) fn from_raw(raw: &RawUser) -> Self {
		Self {
			user_id: raw.id_str.clone(),
			username: raw.screen_name.clone(),
			name: raw.name.clone(),
			biography: raw.description.clone().filter(|value| !value.is_empty()),
			location: raw.location.clone().filter(|value| !value.is_empty()),
			website: raw.url.clone().filter(|value| !value.is_empty()),
			joined: timeline::parse_created_at(&raw.created_at),
			followers_count: raw.followers_count,
			following_count: raw.friends_count,
			tweets_count: raw.statuses_count,
			likes_count: raw.favourites_count,
			listed_count: raw.listed_count,
			avatar: raw.profile_image_url_https.clone(),
			banner: raw.profile_banner_url.clone(),
			is_private: raw.protected,
			is_verified: raw.verified,
			pinned_tweet_ids: raw.pinned_tweet_ids_str.clone(),
		}
	}
}

#[derive(Debug, Deserialize)]
struct UserResponse {
	#[serde(default)]
	data: UserData,
	#[serde(default)]
	errors: Vec<ApiMessage>,
}

#[derive(Debug, Default, Deserialize)]
struct UserData {
	#[serde(default)]
	user: Option<UserResult>,
}

#[derive(Debug, Deserialize)]
struct UserResult {
	#[serde(default)]
	rest_id: Option<String>,
	#[serde(default)]
	legacy: Option<RawUser>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiMessage {
	#[serde(default)]
	message: String,
}

/// Looks up a profile by screen name.
pub(crate) async fn get_profile(auth: &GuestAuth, username: &str) -> Result<Profile> {
	let (rest_id, legacy) = fetch_user(auth, username).await?;
	let legacy = legacy.ok_or(ParseError::MissingField { field: "data.user.legacy" })?;
	let mut profile = Profile::from_raw(&legacy);

	// The graphql payload carries the id beside `legacy`, not inside it.
	profile.user_id = rest_id;

	Ok(profile)
}

/// Resolves a screen name to its user id.
pub(crate) async fn get_user_id(auth: &GuestAuth, screen_name: &str) -> Result<String> {
	let (rest_id, _) = fetch_user(auth, screen_name).await?;

	Ok(rest_id)
}

async fn fetch_user(auth: &GuestAuth, screen_name: &str) -> Result<(String, Option<RawUser>)> {
	let url = auth.endpoints().user_by_screen_name(screen_name);
	let response: UserResponse = http::execute(auth, RequestSpec::get("user", url)).await?;

	if let Some(error) = response.errors.first() {
		return Err(ApiError { status: 200, body: Some(error.message.clone()) }.into());
	}

	let user = response.data.user.ok_or(ParseError::MissingField { field: "data.user" })?;
	let rest_id = user.rest_id.ok_or(ParseError::MissingField { field: "data.user.rest_id" })?;

	Ok((rest_id, user.legacy))
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn from_raw_normalizes_empty_strings() {
		let raw: RawUser = serde_json::from_value(serde_json::json!({
			"id_str": "10",
			"screen_name": "alice",
			"name": "Alice",
			"description": "",
			"location": "Somewhere",
			"created_at": "Mon Nov 29 21:18:15 +0000 2010",
			"followers_count": 12,
			"friends_count": 34,
			"pinned_tweet_ids_str": ["99"]
		}))
		.expect("Profile fixture should deserialize.");
		let profile = Profile::from_raw(&raw);

		assert_eq!(profile.username, "alice");
		assert!(profile.biography.is_none());
		assert_eq!(profile.location.as_deref(), Some("Somewhere"));
		assert_eq!(profile.joined.map(|joined| joined.year()), Some(2010));
		assert_eq!(profile.followers_count, 12);
		assert_eq!(profile.following_count, 34);
		assert_eq!(profile.pinned_tweet_ids, vec!["99"]);
	}
}

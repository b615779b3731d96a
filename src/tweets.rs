//! Tweet domain objects, single-tweet lookup, and user timeline fetches.

// self
use crate::{
	_prelude::*,
	auth::GuestAuth,
	http::{self, RequestSpec},
	paginate::Page,
	timeline::{self, RawTweet, RawUser, TimelineRaw},
};

// The timeline endpoint rejects page sizes above 200.
const MAX_TIMELINE_PAGE: usize = 200;

/// A single tweet resolved against its author.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tweet {
	/// Tweet identifier.
	pub id: String,
	/// Conversation the tweet belongs to.
	pub conversation_id: String,
	/// Author identifier.
	pub user_id: String,
	/// Author screen name.
	pub username: String,
	/// Full tweet text.
	pub text: String,
	/// Creation instant, when the wire timestamp parsed.
	pub time: Option<OffsetDateTime>,
	/// Like count.
	pub likes: u32,
	/// Reply count.
	pub replies: u32,
	/// Retweet count.
	pub retweets: u32,
	/// Hashtag texts without the leading `#`.
	pub hashtags: Vec<String>,
	/// Expanded URLs mentioned in the tweet.
	pub urls: Vec<String>,
	/// Photo URLs.
	pub photos: Vec<String>,
	/// Highest-bitrate video URLs.
	pub videos: Vec<String>,
	/// Whether the tweet replies to another tweet.
	pub is_reply: bool,
	/// Whether the tweet is a retweet.
	pub is_retweet: bool,
	/// Whether the tweet quotes another tweet.
	pub is_quoted: bool,
	/// Canonical web URL of the tweet.
	pub permanent_url: String,
}
impl Tweet {
	pub(crate) fn from_raw(raw: &RawTweet, author: &RawUser) -> Self {
		let photos = raw
			.extended_entities
			.iter()
			.flat_map(|entities| &entities.media)
			.filter(|media| media.kind == "photo")
			.map(|media| media.media_url_https.clone())
			.collect();
		let videos = raw
			.extended_entities
			.iter()
			.flat_map(|entities| &entities.media)
			.filter(|media| media.kind == "video" || media.kind == "animated_gif")
			.filter_map(|media| {
				media
					.video_info
					.as_ref()?
					.variants
					.iter()
					.max_by_key(|variant| variant.bitrate.unwrap_or(0))
					.map(|variant| variant.url.clone())
			})
			.collect();

		Self {
			id: raw.id_str.clone(),
			conversation_id: raw.conversation_id_str.clone(),
			user_id: raw.user_id_str.clone(),
			username: author.screen_name.clone(),
			text: raw.full_text.clone(),
			time: timeline::parse_created_at(&raw.created_at),
			likes: raw.favorite_count,
			replies: raw.reply_count,
			retweets: raw.retweet_count,
			hashtags: raw.entities.hashtags.iter().map(|hashtag| hashtag.text.clone()).collect(),
			urls: raw.entities.urls.iter().filter_map(|url| url.expanded_url.clone()).collect(),
			photos,
			videos,
			is_reply: raw.in_reply_to_status_id_str.is_some(),
			is_retweet: raw.retweeted_status_id_str.is_some(),
			is_quoted: raw.quoted_status_id_str.is_some(),
			permanent_url: format!(
				"https://twitter.com/{}/status/{}",
				author.screen_name, raw.id_str
			),
		}
	}
}

/// Fetches one page of a user's timeline.
pub(crate) async fn fetch_user_tweets(
	auth: &GuestAuth,
	user_id: &str,
	count: usize,
	include_replies: bool,
	cursor: Option<String>,
) -> Result<Page<Tweet>> {
	let url = auth.endpoints().profile_timeline(
		user_id,
		count.min(MAX_TIMELINE_PAGE),
		include_replies,
		cursor.as_deref(),
	);
	let raw: TimelineRaw = http::execute(auth, RequestSpec::get("timeline", url)).await?;

	Ok(timeline::parse_tweet_page(raw))
}

/// Fetches a single tweet through its conversation timeline.
///
/// Returns `Ok(None)` when the conversation payload does not contain the
/// requested id.
pub(crate) async fn get_tweet(
	auth: &GuestAuth,
	id: &str,
	include_replies: bool,
) -> Result<Option<Tweet>> {
	let url = auth.endpoints().conversation(id, include_replies);
	let raw: TimelineRaw = http::execute(auth, RequestSpec::get("conversation", url)).await?;

	Ok(timeline::hydrate_tweet(&raw.global_objects, id))
}

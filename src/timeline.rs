//! Legacy timeline-v1 wire shapes shared by search, profile timelines,
//! conversations, and the trends guide.
//!
//! Payloads carry a `globalObjects` bag of tweets/users keyed by id plus a
//! `timeline.instructions` list that fixes ordering and carries cursors.
//! Parsing is best-effort: unknown fields are ignored, absent counters default
//! to zero, and entries referencing objects missing from the bag are skipped.

// crates.io
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::{_prelude::*, paginate::Page, profile::Profile, tweets::Tweet};

// "Wed Oct 10 20:19:24 +0000 2018"
const CREATED_AT_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
	"[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
);

pub(crate) fn parse_created_at(raw: &str) -> Option<OffsetDateTime> {
	OffsetDateTime::parse(raw, CREATED_AT_FORMAT).ok()
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimelineRaw {
	#[serde(default, rename = "globalObjects")]
	pub global_objects: GlobalObjects,
	#[serde(default)]
	pub timeline: TimelineNav,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct GlobalObjects {
	#[serde(default)]
	pub tweets: HashMap<String, RawTweet>,
	#[serde(default)]
	pub users: HashMap<String, RawUser>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimelineNav {
	#[serde(default)]
	pub instructions: Vec<Instruction>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Instruction {
	#[serde(default)]
	pub add_entries: Option<AddEntries>,
	#[serde(default)]
	pub replace_entry: Option<ReplaceEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct AddEntries {
	#[serde(default)]
	pub entries: Vec<Entry>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ReplaceEntry {
	#[serde(default)]
	pub entry: Option<Entry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Entry {
	#[serde(default)]
	pub entry_id: String,
	#[serde(default)]
	pub content: EntryContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EntryContent {
	#[serde(default)]
	pub item: Option<ContentItem>,
	#[serde(default)]
	pub operation: Option<Operation>,
	#[serde(default)]
	pub timeline_module: Option<TimelineModule>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContentItem {
	#[serde(default)]
	pub content: ItemContent,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ItemContent {
	#[serde(default)]
	pub tweet: Option<TweetRef>,
	#[serde(default)]
	pub user: Option<UserRef>,
	#[serde(default)]
	pub trend: Option<TrendRef>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TweetRef {
	#[serde(default)]
	pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct UserRef {
	#[serde(default)]
	pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TrendRef {
	#[serde(default)]
	pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Operation {
	#[serde(default)]
	pub cursor: Option<CursorRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CursorRef {
	#[serde(default)]
	pub value: String,
	#[serde(default)]
	pub cursor_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct TimelineModule {
	#[serde(default)]
	pub items: Vec<ModuleItem>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ModuleItem {
	#[serde(default)]
	pub item: Option<ContentItem>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawTweet {
	#[serde(default)]
	pub id_str: String,
	#[serde(default)]
	pub conversation_id_str: String,
	#[serde(default)]
	pub created_at: String,
	#[serde(default)]
	pub full_text: String,
	#[serde(default)]
	pub user_id_str: String,
	#[serde(default)]
	pub favorite_count: u32,
	#[serde(default)]
	pub reply_count: u32,
	#[serde(default)]
	pub retweet_count: u32,
	#[serde(default)]
	pub in_reply_to_status_id_str: Option<String>,
	#[serde(default)]
	pub retweeted_status_id_str: Option<String>,
	#[serde(default)]
	pub quoted_status_id_str: Option<String>,
	#[serde(default)]
	pub entities: RawEntities,
	#[serde(default)]
	pub extended_entities: Option<RawExtendedEntities>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawEntities {
	#[serde(default)]
	pub hashtags: Vec<RawHashtag>,
	#[serde(default)]
	pub urls: Vec<RawUrl>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawHashtag {
	#[serde(default)]
	pub text: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawUrl {
	#[serde(default)]
	pub expanded_url: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawExtendedEntities {
	#[serde(default)]
	pub media: Vec<RawMedia>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawMedia {
	#[serde(default)]
	pub media_url_https: String,
	#[serde(default, rename = "type")]
	pub kind: String,
	#[serde(default)]
	pub video_info: Option<RawVideoInfo>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawVideoInfo {
	#[serde(default)]
	pub variants: Vec<RawVariant>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawVariant {
	#[serde(default)]
	pub bitrate: Option<u32>,
	#[serde(default)]
	pub url: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(crate) struct RawUser {
	#[serde(default)]
	pub id_str: String,
	#[serde(default)]
	pub screen_name: String,
	#[serde(default)]
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
	#[serde(default)]
	pub location: Option<String>,
	#[serde(default)]
	pub url: Option<String>,
	#[serde(default)]
	pub created_at: String,
	#[serde(default)]
	pub followers_count: u32,
	#[serde(default)]
	pub friends_count: u32,
	#[serde(default)]
	pub statuses_count: u32,
	#[serde(default)]
	pub favourites_count: u32,
	#[serde(default)]
	pub listed_count: u32,
	#[serde(default)]
	pub profile_image_url_https: Option<String>,
	#[serde(default)]
	pub profile_banner_url: Option<String>,
	#[serde(default)]
	pub protected: bool,
	#[serde(default)]
	pub verified: bool,
	#[serde(default)]
	pub pinned_tweet_ids_str: Vec<String>,
}

/// Orders the `globalObjects` tweets by instruction entries and extracts the
/// bottom cursor.
pub(crate) fn parse_tweet_page(raw: TimelineRaw) -> Page<Tweet> {
	let mut items = Vec::new();
	let mut next_cursor = None;

	for_each_entry(&raw.timeline, |entry| {
		if let Some(tweet_ref) = entry.content.item.as_ref().and_then(|item| item.content.tweet.as_ref())
			&& let Some(tweet) = hydrate_tweet(&raw.global_objects, &tweet_ref.id)
		{
			items.push(tweet);
		}
		if let Some(cursor) = bottom_cursor(entry) {
			next_cursor = Some(cursor);
		}
	});

	Page { items, next_cursor }
}

/// Orders the `globalObjects` users by instruction entries and extracts the
/// bottom cursor.
pub(crate) fn parse_profile_page(raw: TimelineRaw) -> Page<Profile> {
	let mut items = Vec::new();
	let mut next_cursor = None;

	for_each_entry(&raw.timeline, |entry| {
		if let Some(user_ref) = entry.content.item.as_ref().and_then(|item| item.content.user.as_ref())
			&& let Some(user) = raw.global_objects.users.get(&user_ref.id)
		{
			items.push(Profile::from_raw(user));
		}
		if let Some(cursor) = bottom_cursor(entry) {
			next_cursor = Some(cursor);
		}
	});

	Page { items, next_cursor }
}

/// Collects trend names from the guide timeline's module entries.
pub(crate) fn parse_trends(raw: &TimelineRaw) -> Vec<String> {
	let mut trends = Vec::new();

	for instruction in &raw.timeline.instructions {
		let Some(add) = &instruction.add_entries else {
			continue;
		};

		for entry in &add.entries {
			let Some(module) = &entry.content.timeline_module else {
				continue;
			};

			for item in &module.items {
				if let Some(trend) =
					item.item.as_ref().and_then(|item| item.content.trend.as_ref())
					&& !trend.name.is_empty()
				{
					trends.push(trend.name.clone());
				}
			}
		}
	}

	trends
}

/// Looks up a tweet by id, resolving its author through the users bag.
pub(crate) fn hydrate_tweet(objects: &GlobalObjects, id: &str) -> Option<Tweet> {
	let raw = objects.tweets.get(id)?;
	let author = objects.users.get(&raw.user_id_str)?;

	Some(Tweet::from_raw(raw, author))
}

fn for_each_entry(timeline: &TimelineNav, mut visit: impl FnMut(&Entry)) {
	for instruction in &timeline.instructions {
		if let Some(add) = &instruction.add_entries {
			for entry in &add.entries {
				visit(entry);
			}
		}
		if let Some(replace) = &instruction.replace_entry
			&& let Some(entry) = &replace.entry
		{
			visit(entry);
		}
	}
}

fn bottom_cursor(entry: &Entry) -> Option<String> {
	let cursor = entry.content.operation.as_ref()?.cursor.as_ref()?;

	if !(entry.entry_id.contains("cursor-bottom") || cursor.cursor_type == "Bottom") {
		return None;
	}
	if cursor.value.is_empty() {
		return None;
	}

	Some(cursor.value.clone())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn search_page() -> TimelineRaw {
		serde_json::from_value(serde_json::json!({
			"globalObjects": {
				"tweets": {
					"1": {
						"id_str": "1",
						"conversation_id_str": "1",
						"created_at": "Wed Oct 10 20:19:24 +0000 2018",
						"full_text": "first #rust",
						"user_id_str": "10",
						"favorite_count": 3,
						"reply_count": 1,
						"retweet_count": 2,
						"entities": { "hashtags": [{ "text": "rust" }], "urls": [] }
					},
					"2": {
						"id_str": "2",
						"created_at": "not a date",
						"full_text": "second",
						"user_id_str": "10",
						"in_reply_to_status_id_str": "1"
					},
					"3": {
						"id_str": "3",
						"full_text": "orphaned",
						"user_id_str": "99"
					}
				},
				"users": {
					"10": {
						"id_str": "10",
						"screen_name": "alice",
						"name": "Alice",
						"followers_count": 5
					}
				}
			},
			"timeline": {
				"instructions": [{
					"addEntries": {
						"entries": [
							{ "entryId": "sq-I-t-1", "content": { "item": { "content": { "tweet": { "id": "1" } } } } },
							{ "entryId": "sq-I-t-2", "content": { "item": { "content": { "tweet": { "id": "2" } } } } },
							{ "entryId": "sq-I-t-3", "content": { "item": { "content": { "tweet": { "id": "3" } } } } },
							{ "entryId": "sq-cursor-top", "content": { "operation": { "cursor": { "value": "top", "cursorType": "Top" } } } },
							{ "entryId": "sq-cursor-bottom", "content": { "operation": { "cursor": { "value": "scroll-2", "cursorType": "Bottom" } } } }
						]
					}
				}]
			}
		}))
		.expect("Search fixture should deserialize.")
	}

	#[test]
	fn created_at_parses_wire_format() {
		let parsed = parse_created_at("Wed Oct 10 20:19:24 +0000 2018")
			.expect("Wire timestamp should parse.");

		assert_eq!(parsed.year(), 2018);
		assert_eq!(parsed.hour(), 20);
		assert!(parse_created_at("not a date").is_none());
	}

	#[test]
	fn tweet_page_orders_entries_and_finds_bottom_cursor() {
		let page = parse_tweet_page(search_page());

		// The orphaned tweet has no author in the users bag and is skipped.
		assert_eq!(
			page.items.iter().map(|tweet| tweet.id.as_str()).collect::<Vec<_>>(),
			vec!["1", "2"]
		);
		assert_eq!(page.next_cursor.as_deref(), Some("scroll-2"));
		assert!(page.items[1].is_reply);
		assert_eq!(page.items[0].hashtags, vec!["rust"]);
		assert_eq!(page.items[0].username, "alice");
	}

	#[test]
	fn replace_entry_supplies_cursor() {
		let raw: TimelineRaw = serde_json::from_value(serde_json::json!({
			"timeline": {
				"instructions": [{
					"replaceEntry": {
						"entryIdToReplace": "sq-cursor-bottom",
						"entry": {
							"entryId": "sq-cursor-bottom",
							"content": { "operation": { "cursor": { "value": "scroll-3", "cursorType": "Bottom" } } }
						}
					}
				}]
			}
		}))
		.expect("Replace-entry fixture should deserialize.");
		let page = parse_tweet_page(raw);

		assert!(page.items.is_empty());
		assert_eq!(page.next_cursor.as_deref(), Some("scroll-3"));
	}

	#[test]
	fn profile_page_resolves_users() {
		let raw: TimelineRaw = serde_json::from_value(serde_json::json!({
			"globalObjects": {
				"users": {
					"10": { "id_str": "10", "screen_name": "alice", "name": "Alice" },
					"11": { "id_str": "11", "screen_name": "bob", "name": "Bob", "protected": true }
				}
			},
			"timeline": {
				"instructions": [{
					"addEntries": {
						"entries": [
							{ "entryId": "user-10", "content": { "item": { "content": { "user": { "id": "10" } } } } },
							{ "entryId": "user-11", "content": { "item": { "content": { "user": { "id": "11" } } } } }
						]
					}
				}]
			}
		}))
		.expect("Profile fixture should deserialize.");
		let page = parse_profile_page(raw);

		assert_eq!(
			page.items.iter().map(|profile| profile.username.as_str()).collect::<Vec<_>>(),
			vec!["alice", "bob"]
		);
		assert!(page.items[1].is_private);
		assert!(page.next_cursor.is_none());
	}

	#[test]
	fn trends_come_from_timeline_modules() {
		let raw: TimelineRaw = serde_json::from_value(serde_json::json!({
			"timeline": {
				"instructions": [{
					"addEntries": {
						"entries": [{
							"entryId": "trends",
							"content": {
								"timelineModule": {
									"items": [
										{ "item": { "content": { "trend": { "name": "#One" } } } },
										{ "item": { "content": { "trend": { "name": "#Two" } } } },
										{ "item": { "content": {} } }
									]
								}
							}
						}]
					}
				}]
			}
		}))
		.expect("Trends fixture should deserialize.");

		assert_eq!(parse_trends(&raw), vec!["#One", "#Two"]);
	}
}

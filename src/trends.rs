//! Trend retrieval over the guide timeline.

// self
use crate::{
	_prelude::*,
	auth::GuestAuth,
	http::{self, RequestSpec},
	timeline::{self, TimelineRaw},
};

/// Fetches the current trend names.
pub(crate) async fn get_trends(auth: &GuestAuth, include_replies: bool) -> Result<Vec<String>> {
	let url = auth.endpoints().trends_guide(include_replies);
	let raw: TimelineRaw = http::execute(auth, RequestSpec::get("trends", url)).await?;

	Ok(timeline::parse_trends(&raw))
}

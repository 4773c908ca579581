//! Inbound search parameters: extraction, validation, and adult-count normalization.

// self
use crate::{_prelude::*, error::ValidationError};

/// Validated flight-search parameters.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct SearchQuery {
	/// Origin location code.
	pub origin: String,
	/// Destination location code.
	pub destination: String,
	/// Departure date, passed through to the provider unchanged.
	pub date: String,
	/// Adult passenger count in `1..=9`.
	pub adults: u8,
}
impl SearchQuery {
	/// Smallest adult count sent to the provider.
	pub const MIN_ADULTS: u8 = 1;
	/// Largest adult count sent to the provider.
	pub const MAX_ADULTS: u8 = 9;

	/// Validates the mandatory parameters and normalizes `adults`.
	///
	/// Empty strings count as missing.
	pub fn new(
		origin: impl Into<String>,
		destination: impl Into<String>,
		date: impl Into<String>,
		adults: Option<&str>,
	) -> Result<Self, ValidationError> {
		let origin = origin.into();
		let destination = destination.into();
		let date = date.into();
		let missing = [("origin", &origin), ("destination", &destination), ("date", &date)]
			.into_iter()
			.filter(|(_, value)| value.is_empty())
			.map(|(name, _)| name)
			.collect::<Vec<_>>();

		if !missing.is_empty() {
			return Err(ValidationError::MissingParameters { missing });
		}

		Ok(Self { origin, destination, date, adults: normalize_adults(adults) })
	}

	/// Parses a URL-encoded query string (without the leading `?`).
	///
	/// The first occurrence of a repeated key wins; unknown keys are ignored.
	pub fn from_query_str(raw: &str) -> Result<Self, ValidationError> {
		let mut origin = None;
		let mut destination = None;
		let mut date = None;
		let mut adults = None;

		for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
			let slot = match key.as_ref() {
				"origin" => &mut origin,
				"destination" => &mut destination,
				"date" => &mut date,
				"adults" => &mut adults,
				_ => continue,
			};

			if slot.is_none() {
				*slot = Some(value.into_owned());
			}
		}

		Self::new(
			origin.unwrap_or_default(),
			destination.unwrap_or_default(),
			date.unwrap_or_default(),
			adults.as_deref(),
		)
	}
}

/// Normalizes the raw `adults` parameter into `1..=9`.
///
/// The leading integer is parsed the lenient way browsers' `parseInt` does (surrounding
/// whitespace, sign, and trailing garbage tolerated). Absent, unparsable, or zero values
/// become 1; everything else is clamped.
pub fn normalize_adults(raw: Option<&str>) -> u8 {
	let min = i64::from(SearchQuery::MIN_ADULTS);
	let max = i64::from(SearchQuery::MAX_ADULTS);

	match raw.and_then(parse_leading_int) {
		Some(count) if count != 0 => count.clamp(min, max) as u8,
		_ => SearchQuery::MIN_ADULTS,
	}
}

fn parse_leading_int(raw: &str) -> Option<i64> {
	let trimmed = raw.trim_start();
	let (negative, rest) = match trimmed.as_bytes().first() {
		Some(b'-') => (true, &trimmed[1..]),
		Some(b'+') => (false, &trimmed[1..]),
		_ => (false, trimmed),
	};
	let end = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());

	if end == 0 {
		return None;
	}

	// Overlong digit runs saturate; they clamp to the same bound either way.
	let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);

	Some(if negative { -magnitude } else { magnitude })
}

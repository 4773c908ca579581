//! Projection of provider offers into compact flight summaries.

// crates.io
use serde::Serializer;
// self
use crate::{_prelude::*, error::MappingError, provider::FlightOffer};

/// Reduced view of a provider offer returned to clients.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FlightSummary {
	/// Provider offer identifier, copied verbatim.
	pub id: String,
	/// Carrier code of the first segment of the first itinerary.
	pub airline: String,
	/// Total price.
	#[serde(serialize_with = "serialize_price")]
	pub price: f64,
	/// Segments in the first itinerary minus one.
	pub stops: usize,
	/// `HH:MM` of the first segment's departure timestamp.
	#[serde(rename = "time")]
	pub departure_time: String,
}
impl FlightSummary {
	/// Summarizes one offer, failing when it lacks the fields a summary needs.
	pub fn from_offer(offer: &FlightOffer) -> Result<Self, MappingError> {
		let itinerary = offer
			.itineraries
			.first()
			.ok_or_else(|| MappingError::MissingItinerary { offer: offer.id.clone() })?;
		let segment = itinerary
			.segments
			.first()
			.ok_or_else(|| MappingError::MissingSegment { offer: offer.id.clone() })?;
		let price = parse_price(&offer.price.total).ok_or_else(|| MappingError::InvalidPrice {
			offer: offer.id.clone(),
			total: offer.price.total.clone(),
		})?;
		let departure_time = clock_time(&segment.departure.at).ok_or_else(|| {
			MappingError::InvalidDeparture {
				offer: offer.id.clone(),
				at: segment.departure.at.clone(),
			}
		})?;

		Ok(Self {
			id: offer.id.clone(),
			airline: segment.carrier_code.clone(),
			price,
			stops: itinerary.segments.len() - 1,
			departure_time: departure_time.to_owned(),
		})
	}
}

/// Summarizes every offer in order; one malformed offer fails the whole batch.
pub fn summarize(offers: &[FlightOffer]) -> Result<Vec<FlightSummary>, MappingError> {
	offers.iter().map(FlightSummary::from_offer).collect()
}

/// Characters 11..16 of an ISO-8601-like timestamp; no timezone handling.
fn clock_time(at: &str) -> Option<&str> {
	at.get(11..16)
}

fn parse_price(total: &str) -> Option<f64> {
	total.trim().parse::<f64>().ok().filter(|price| price.is_finite() && *price >= 0.)
}

// Integral prices are written without a fractional part (`200`, not `200.0`).
fn serialize_price<S>(price: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
	S: Serializer,
{
	const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.;

	if price.fract() == 0. && price.abs() <= MAX_SAFE_INTEGER {
		serializer.serialize_i64(*price as i64)
	} else {
		serializer.serialize_f64(*price)
	}
}

//! Flight-offers wire types (only the fields the relay reads; everything else is ignored).

// self
use crate::_prelude::*;

/// Top-level flight-offers search document.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FlightOffersResponse {
	/// Offers in provider ranking order.
	pub data: Vec<FlightOffer>,
}

/// A single priced flight option.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct FlightOffer {
	/// Provider-assigned offer identifier.
	pub id: String,
	/// Outbound (and optional return) itineraries.
	#[serde(default)]
	pub itineraries: Vec<Itinerary>,
	/// Pricing block.
	pub price: OfferPrice,
}

/// One direction of travel.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Itinerary {
	/// Flight legs in travel order.
	#[serde(default)]
	pub segments: Vec<Segment>,
}

/// One flight leg.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
	/// Departure point of the leg.
	pub departure: SegmentEndpoint,
	/// Marketing carrier code, e.g. `AA`.
	pub carrier_code: String,
}

/// Departure or arrival point of a segment.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SegmentEndpoint {
	/// Local timestamp, `YYYY-MM-DDTHH:MM:SS`.
	pub at: String,
}

/// Offer pricing.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct OfferPrice {
	/// Total price as a decimal string, e.g. `"219.50"`.
	pub total: String,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unknown_fields_are_ignored() {
		let payload = r#"{
			"meta": { "count": 1 },
			"data": [{
				"type": "flight-offer",
				"id": "1",
				"source": "GDS",
				"itineraries": [{
					"duration": "PT5H",
					"segments": [{
						"departure": { "iataCode": "JFK", "terminal": "8", "at": "2024-05-01T14:35:00" },
						"arrival": { "iataCode": "ORD", "at": "2024-05-01T16:40:00" },
						"carrierCode": "AA",
						"number": "100"
					}]
				}],
				"price": { "currency": "EUR", "total": "219.50", "base": "180.00" }
			}],
			"dictionaries": {}
		}"#;
		let response: FlightOffersResponse =
			serde_json::from_str(payload).expect("Provider payload should deserialize.");
		let offer = &response.data[0];

		assert_eq!(offer.id, "1");
		assert_eq!(offer.price.total, "219.50");
		assert_eq!(offer.itineraries[0].segments[0].carrier_code, "AA");
		assert_eq!(offer.itineraries[0].segments[0].departure.at, "2024-05-01T14:35:00");
	}

	#[test]
	fn missing_itineraries_default_to_empty() {
		let response: FlightOffersResponse =
			serde_json::from_str(r#"{"data":[{"id":"7","price":{"total":"10.00"}}]}"#)
				.expect("Offers without itineraries should still deserialize.");

		assert!(response.data[0].itineraries.is_empty());
	}
}

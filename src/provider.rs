//! Travel-data provider surface: endpoint layout, flight-offers wire types, and the search
//! client.
//!
//! `endpoints` derives the token and flight-offers URLs from one base URL. `offers` mirrors
//! the subset of the provider's flight-offers document the relay reads. `search` defines
//! [`OfferSource`], the seam the relay searches through, and its reqwest implementation.

pub mod endpoints;
pub mod offers;
pub mod search;

pub use endpoints::*;
pub use offers::*;
pub use search::*;

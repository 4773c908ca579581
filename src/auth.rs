//! Bearer credential models, the token-source seam, and the single-flight credential cache.

pub mod cache;
pub mod credential;
pub mod secret;
pub mod source;

pub use cache::*;
pub use credential::*;
pub use secret::*;
pub use source::*;

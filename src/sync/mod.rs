// model = "claude-opus-4-5"
// created = 2026-10-16
// modified = 2026-10-16
// driver = "Isaac Clayton"

//! Keeping replicas of a document consistent.

pub mod checksum;
pub mod jupiter;
pub mod relay;
pub mod request;

pub use checksum::Checksum;
pub use jupiter::Jupiter;
pub use jupiter::Side;
pub use relay::Outgoing;
pub use relay::Relay;
pub use request::Request;

//! Remote collaborators of the Salary Engine.
//!
//! The engine consumes two external services: the field-ops service
//! (attendance, travel records, employee directory, travel-allowance
//! upserts) and a routing provider (road distances between coordinate
//! pairs). Both are abstracted behind async traits so the calculation and
//! resolution logic can be exercised against in-memory fakes.

mod field_ops;
mod routing;

pub use field_ops::{FieldOpsClient, HttpFieldOpsClient};
pub use routing::{HttpRoutingClient, RoutingCredential, RoutingProvider};

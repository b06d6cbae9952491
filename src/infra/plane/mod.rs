// Plane infra layer.
// - `plane_client.rs` talks to the Plane HTTP API.

#[path = "plane_client.rs"]
pub mod plane_client;

pub use plane_client::PlaneApiClient;

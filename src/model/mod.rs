//! Wire types shared with the dashboard.
//!
//! DTOs in this module are the JSON shapes of the HTTP API. Server-side domain
//! models convert into and out of them at the controller boundary.

pub mod api;
pub mod economy;

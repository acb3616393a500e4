/// OpenAPI documentation generation.
pub mod documentation;
/// Roster, filter, pause, and reset operations.
pub mod game_service;
/// Health check service.
pub mod health_service;
/// Read-only projections of the session and the catalogue.
pub mod public_service;
/// Round lifecycle operations.
pub mod round_service;
/// Server-Sent Events message generation.
pub mod sse_events;
/// Server-Sent Events broadcasting service.
pub mod sse_service;
/// Shared-store persistence and cross-window hydration.
pub mod sync_service;

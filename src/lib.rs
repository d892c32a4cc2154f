//! Three-dimensional cargo stowage core for a crewed station.
//!
//! This crate implements the four tightly coupled subsystems that sit behind
//! a station's inventory surface: a 3D bin-packing [`placement`] planner, a
//! [`retrieval`] planner that minimizes disturbance, a [`waste`]
//! identification/return planner, and a [`simulation`] clock. Everything
//! else — the HTTP/CLI surface, CSV ingestion from disk, rendered operator
//! views, and a relational store — is an external collaborator; [`Station`]
//! is the seam where one would be attached.
//!
//! # Layout
//!
//! - [`geometry`] — axis-aligned poses and the per-container spatial index.
//! - [`model`] — `Item`, `Container`, the event log, and the in-memory stores.
//! - [`placement`] — ordering, rotation, the placement pass, and rearrangement.
//! - [`retrieval`] — blocker detection and retrieval step generation.
//! - [`waste`] — waste identification, weight-capped return planning, undocking.
//! - [`simulation`] — the virtual clock.
//! - [`io`] — typed ingestion/export rows for the CSV-like wire format.
//! - [`error`] — the shared `InventoryError` kind.
//! - [`station`] — the transport-agnostic request-surface facade.

pub mod error;
pub mod geometry;
#[cfg(feature = "serde")]
pub mod io;
pub mod model;
pub mod placement;
pub mod retrieval;
pub mod simulation;
pub mod station;
pub mod waste;

pub use error::{ErrorKind, InventoryError, Result};
pub use station::Station;

/// Identifier type used for items, containers, and users.
///
/// Unlike the teacher's scheduling identifiers, these are never synthesized
/// by this crate — they are assigned by the external ingestion layer and
/// carried through unchanged (spec.md §3).
pub type Id = String;

/// Generates a new unique identifier (UUID v4), used only for log entries.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

//! Typed records (spec.md §3) and the stores that own them (spec.md §9:
//! "global services").
//!
//! Mirrors the teacher crate's split between a scheduling primitive
//! (`Schedule`) and the graph that owns tasks by id
//! (`SchedulingBlock`'s `id_by_node`/`node_by_id` pair): here, [`Container`]
//! and [`Item`] are plain typed records, and [`ItemStore`]/[`ContainerStore`]
//! are the id-indexed collections that own them plus the reverse
//! container-to-items index spec.md §9 calls for.

mod container;
mod item;
mod log;
mod store;

pub use container::Container;
pub use item::Item;
pub use log::{ActionKind, EventLog, LogEntry};
pub use store::{ContainerStore, ItemStore};

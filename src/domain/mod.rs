//! Domain models for nodefetch
//!
//! This module contains pure domain objects: what a workflow scan finds, what the
//! resolver turns it into, and what the history remembers.

pub mod history;
pub mod item;
pub mod resource;

pub use history::HistoryItem;
pub use item::ScannedItem;
pub use resource::{ComputeType, EnrichedResource, NOT_AVAILABLE, ResourceType};

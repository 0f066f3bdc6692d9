//! Markscope Stream Model
//!
//! Core data contracts shared by every Markscope session:
//! - **Samples:** Timestamped landmark observations and the JSONL
//!   recording format
//! - **Catalogs:** Named points of the face, hand, and pose topologies
//! - **Messages:** The coordinate message grammar (render and parse)
//! - **Entries:** Console log entries carrying text plus structured data
//!
//! Coordinates are camera-frame normalized (`[0.0, 1.0]` per axis) so
//! recordings compare across capture resolutions.

pub mod catalog;
pub mod entry;
pub mod message;
pub mod sample;

pub use catalog::*;
pub use entry::*;
pub use message::*;
pub use sample::*;

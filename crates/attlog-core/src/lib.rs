//! Core domain logic for attendance reconstruction.
//!
//! This crate contains the fundamental types and logic for:
//! - Normalization: range filtering, name resolution, punch classification
//! - Reconstruction: folding punches into per-user per-day session records
//! - Source boundary: the seam a device transport client plugs into, plus a
//!   file-backed dump reader

pub mod event;
pub mod normalize;
pub mod reconstruct;
pub mod source;
pub mod types;

pub use event::{NormalizedEvent, PunchKind, RawPunchEvent};
pub use normalize::{RangeError, UNKNOWN_USER, UserDirectory, normalize};
pub use reconstruct::{SessionRecord, reconstruct, reconstruct_sessions};
pub use source::{DumpSource, PunchSource, SourceError};
pub use types::{UserId, ValidationError};

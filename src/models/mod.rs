//! Core data models for the rescisão client.
//!
//! This module contains the form snapshot submitted to the calculation
//! service, the breakdown it returns, and the cache entry that pairs them.

mod cache_entry;
mod extra_compensation;
mod form_snapshot;
mod result_record;
mod stored;

pub use cache_entry::CacheEntry;
pub use extra_compensation::ExtraCompensationRecord;
pub use form_snapshot::{FormSnapshot, NoticeType, TerminationReason};
pub use result_record::{CalculationDetails, CalculationResponse, ResultRecord};

//! Keyword safety filtering.
//!
//! The [`SafetyFilter`] is a case-insensitive substring denylist. It has no
//! notion of word boundaries, so "skill" is flagged for containing "kill".

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filter;

pub use filter::SafetyFilter;

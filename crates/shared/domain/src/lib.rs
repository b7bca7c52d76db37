//! # Domain Models
//!
//! This crate contains the pure feature-model types plus the validated
//! feature registry. Keep it lean: no I/O, networking, or heavy logic—just
//! data and simple helpers.

pub mod features;
pub mod registry;

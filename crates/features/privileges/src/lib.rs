//! # Privilege Compilation Engine
//!
//! Compiles registered feature definitions into the complete authorization
//! table a downstream authorizer consults: flattened action lists per
//! privilege, per scope (global, space, per-feature, reserved).
//!
//! ## Architecture
//!
//! 1. **Actions ([`actions`]):** the opaque action tokens and their
//!    namespaced constructors.
//! 2. **Builders ([`builder`]):** per-concern translation of one privilege's
//!    capability lists into actions (api, app, saved-object, ui).
//! 3. **Iterator ([`iterator`]):** flattened, ordered walks over a feature's
//!    two-level privilege hierarchy, with configurable sub-feature folding.
//! 4. **Compiler ([`privileges`]):** orchestrates the above into the final
//!    [`RawPrivileges`] table.
//!
//! The whole pipeline is pure: features in, table out, no I/O and no shared
//! mutable state. Authorization decisions and privilege assignment are out of
//! scope; this crate only produces the static tables they consult.

pub mod actions;
pub mod builder;
mod error;
pub mod iterator;
pub mod privileges;

pub use crate::actions::{Action, Actions};
pub use crate::error::PrivilegesError;
pub use crate::privileges::{BasePrivileges, PrivilegeCompiler, RawPrivileges};

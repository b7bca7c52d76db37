use thiserror::Error;

/// Compilation-time configuration errors.
///
/// Compilation is all-or-nothing: a malformed feature aborts the entire call
/// rather than being skipped, since a partially-compiled privilege table
/// would be a silent security gap.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrivilegesError {
    #[error(
        "feature '{feature_id}' has no privilege definition; \
         declare an empty privileges map for features without grantable privileges"
    )]
    MissingPrivileges { feature_id: String },
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! WAPI error types for ibgrid.
//!
//! Every [`Connector`](crate::connector::Connector) surfaces failures as an
//! [`InfobloxError`]. The manipulator selectively catches some variants:
//!
//! - [`InfobloxError::SearchError`] during update/delete by filter (logged, skipped)
//! - [`InfobloxError::CannotCreateObject`] during zone creation (logged, swallowed)
//!
//! Everything else propagates to the caller.

use thiserror::Error;

/// Errors that can occur while talking to the grid master.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InfobloxError {
    /// Object lookup failed
    ///
    /// Returned when a GET against an object type is rejected by WAPI. An empty
    /// result is NOT an error; it is reported as an empty list.
    #[error("Cannot search {obj_type} objects: {reason}")]
    SearchError {
        /// Object type that was queried (e.g., "member")
        obj_type: String,
        /// Reason reported by WAPI
        reason: String,
    },

    /// Object creation was rejected by WAPI
    #[error("Cannot create {obj_type} object: {reason}")]
    CannotCreateObject {
        /// Object type that failed to create
        obj_type: String,
        /// Reason reported by WAPI
        reason: String,
    },

    /// Update by reference was rejected by WAPI
    #[error("Cannot update object {reference}: {reason}")]
    CannotUpdateObject {
        /// Reference of the object being updated
        reference: String,
        /// Reason reported by WAPI
        reason: String,
    },

    /// Delete by reference was rejected by WAPI
    #[error("Cannot remove object {reference}: {reason}")]
    CannotRemoveObject {
        /// Reference of the object being deleted
        reference: String,
        /// Reason reported by WAPI
        reason: String,
    },

    /// The grid master could not be reached (DNS, TCP, TLS, timeout)
    #[error("Connection to {url} failed: {reason}")]
    ConnectionError {
        /// URL that could not be reached
        url: String,
        /// Transport level reason
        reason: String,
    },

    /// WAPI answered with a body that could not be interpreted
    #[error("Malformed WAPI response: {reason}")]
    MalformedResponse {
        /// What was wrong with the body
        reason: String,
    },

    /// Invalid connector configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl InfobloxError {
    /// `true` for lookup failures
    #[must_use]
    pub fn is_search_error(&self) -> bool {
        matches!(self, Self::SearchError { .. })
    }

    /// `true` when WAPI refused to create an object
    #[must_use]
    pub fn is_cannot_create(&self) -> bool {
        matches!(self, Self::CannotCreateObject { .. })
    }
}

/// Result alias used across the library
pub type Result<T, E = InfobloxError> = std::result::Result<T, E>;

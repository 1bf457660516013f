// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Grid master connectivity.
//!
//! The [`Connector`] trait is the only seam between the object manipulator and
//! the grid master. It exposes four generic verbs over named object types and
//! opaque references, plus the naming defaults the manipulator needs to derive
//! view names.
//!
//! [`WapiConnector`] implements the trait over the WAPI REST interface.
//!
//! # Example
//!
//! ```rust,no_run
//! use ibgrid::connector::{Connector, ConnectorOptions, WapiConnector};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = ConnectorOptions::from_yaml_file("/etc/ibgrid/config.yaml")?;
//! let connector = WapiConnector::new(options)?;
//!
//! let members = connector.get_object("member", None, Some(&["host_name"]), None).await?;
//! println!("{} members", members.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod retry;
pub mod wapi;

pub use config::ConnectorOptions;
pub use wapi::WapiConnector;

use crate::errors::Result;
use crate::types::Record;
use async_trait::async_trait;

/// Generic object access against a grid master.
///
/// Implementations own transport, authentication and serialization. All
/// methods take `&self`; a connector shared between tasks must be internally
/// thread-safe.
#[async_trait]
pub trait Connector: Send + Sync {
    /// Search objects of `obj_type`.
    ///
    /// `filter` fields must match exactly, `extattrs` maps an extensible
    /// attribute name to `{"value": ...}`. An empty result is `Ok(vec![])`.
    ///
    /// # Errors
    ///
    /// Returns [`InfobloxError::SearchError`](crate::errors::InfobloxError::SearchError)
    /// when the search is rejected.
    async fn get_object(
        &self,
        obj_type: &str,
        filter: Option<&Record>,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Vec<Record>>;

    /// Create an object and return it (at least its `_ref`).
    ///
    /// # Errors
    ///
    /// Returns [`CannotCreateObject`](crate::errors::InfobloxError::CannotCreateObject) when
    /// the grid refuses the payload.
    async fn create_object(
        &self,
        obj_type: &str,
        payload: &Record,
        return_fields: Option<&[&str]>,
    ) -> Result<Record>;

    /// Replace the given fields of the object identified by `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected or the grid is unreachable.
    async fn update_object(&self, reference: &str, payload: &Record) -> Result<()>;

    /// Delete the object identified by `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected or the grid is unreachable.
    async fn delete_object(&self, reference: &str) -> Result<()>;

    /// Default network view name
    fn network_view(&self) -> &str;

    /// Default DNS view name
    fn dns_view(&self) -> &str;

    /// Whether views are partitioned per tenant
    fn multi_tenant(&self) -> bool;

    /// Name server group assigned to new authoritative zones
    fn ns_group(&self) -> Option<&str>;
}

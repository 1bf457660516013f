// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Grid object manipulation.
//!
//! [`ObjectManipulator`] turns grid management operations into connector calls.
//! Every operation is a lookup optionally followed by one mutation per target:
//!
//! - Members: create, pre-provision, DNS enablement, delete
//! - Anycast loopback addresses on member loopback interfaces
//! - OSPF areas on members
//! - Name server groups
//! - Network and DNS views, including per-tenant views
//! - TSIG keys
//! - Authoritative zones
//!
//! # Example
//!
//! ```rust,no_run
//! use ibgrid::connector::{ConnectorOptions, WapiConnector};
//! use ibgrid::manipulator::ObjectManipulator;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let connector = WapiConnector::new(ConnectorOptions::from_yaml_file("config.yaml")?)?;
//! let manipulator = ObjectManipulator::new(connector);
//!
//! manipulator
//!     .create_anycast_loopback("member1.example.com", "172.16.0.53", true, false)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod anycast;
mod members;
mod nsgroups;
mod ospf;
mod tsig;
mod views;
mod zones;

#[cfg(test)]
pub(crate) mod fake;

use crate::connector::Connector;
use crate::constants::FIELD_REF;
use crate::errors::Result;
use crate::types::{Outcome, Record};
use serde_json::Value;
use tracing::{info, warn};

/// Domain operations on top of a [`Connector`].
///
/// The manipulator holds no state besides the connector; every call performs
/// its own lookups.
#[derive(Debug, Clone)]
pub struct ObjectManipulator<C> {
    connector: C,
}

impl<C: Connector> ObjectManipulator<C> {
    /// Wrap a connector
    pub fn new(connector: C) -> Self {
        Self { connector }
    }

    /// The wrapped connector
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Create an object, or return the existing one.
    ///
    /// When `check_if_exists` is set, `payload` is first used as a search filter and
    /// a match is returned unchanged. Otherwise `extra` is merged into `payload`
    /// and the object is created.
    ///
    /// The returned record carries `_ref` plus `return_fields` when requested,
    /// whichever path was taken.
    pub(crate) async fn create_object(
        &self,
        obj_type: &str,
        mut payload: Record,
        extra: Record,
        check_if_exists: bool,
        return_fields: Option<&[&str]>,
    ) -> Result<Record> {
        if check_if_exists {
            if let Some(existing) = self
                .get_object_or_none(obj_type, Some(&payload), return_fields, None)
                .await?
            {
                let existing = if return_fields.is_some() {
                    existing
                } else {
                    reference_only(&existing)
                };
                info!(obj_type = %obj_type, object = ?existing, "Infoblox object already exists");
                return Ok(existing);
            }
        }

        payload.extend(extra);
        let created = self
            .connector
            .create_object(obj_type, &payload, return_fields)
            .await?;
        info!(obj_type = %obj_type, object = ?created, "Infoblox object was created");

        Ok(created)
    }

    /// First object matching `filter`, or `None`.
    ///
    /// Additional matches are ignored.
    pub(crate) async fn get_object_or_none(
        &self,
        obj_type: &str,
        filter: Option<&Record>,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Option<Record>> {
        let objects = self
            .connector
            .get_object(obj_type, filter, return_fields, extattrs)
            .await?;
        Ok(objects.into_iter().next())
    }

    /// Reference of the first object matching `filter`, or `None`.
    pub(crate) async fn get_object_ref_or_none(
        &self,
        obj_type: &str,
        filter: &Record,
    ) -> Result<Option<String>> {
        let object = self
            .get_object_or_none(obj_type, Some(filter), None, None)
            .await?;
        Ok(object.as_ref().and_then(object_ref).map(str::to_string))
    }

    /// Resolve `filter` to a reference, tolerating absence and search failures.
    async fn resolve_ref(
        &self,
        obj_type: &str,
        filter: &Record,
        action: &str,
    ) -> Result<Option<String>> {
        match self.get_object_ref_or_none(obj_type, filter).await {
            Ok(Some(reference)) => Ok(Some(reference)),
            Ok(None) => {
                warn!(
                    obj_type = %obj_type,
                    filter = ?filter,
                    "Infoblox object will not be {action} because it cannot be found"
                );
                Ok(None)
            }
            Err(e) if e.is_search_error() => {
                warn!(
                    obj_type = %obj_type,
                    filter = ?filter,
                    "Infoblox object will not be {action} because it cannot be found"
                );
                info!(error = %e, "Search failed");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Replace `fields` on the object matching `filter`.
    ///
    /// Returns [`Outcome::NotFound`] without touching the grid when the object is
    /// missing or the search fails.
    pub(crate) async fn update_object(
        &self,
        obj_type: &str,
        filter: &Record,
        fields: &Record,
    ) -> Result<Outcome> {
        match self.resolve_ref(obj_type, filter, "updated").await? {
            Some(reference) => {
                self.update_object_by_ref(&reference, fields).await?;
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::NotFound),
        }
    }

    /// Replace `fields` on the object identified by `reference`.
    pub(crate) async fn update_object_by_ref(
        &self,
        reference: &str,
        fields: &Record,
    ) -> Result<()> {
        self.connector.update_object(reference, fields).await?;
        info!(reference = %reference, "Infoblox object was updated");
        Ok(())
    }

    /// Delete the object matching `filter`.
    ///
    /// Returns [`Outcome::NotFound`] without touching the grid when the object is
    /// missing or the search fails.
    pub(crate) async fn delete_object(&self, obj_type: &str, filter: &Record) -> Result<Outcome> {
        match self.resolve_ref(obj_type, filter, "deleted").await? {
            Some(reference) => {
                self.connector.delete_object(&reference).await?;
                info!(reference = %reference, "Infoblox object was deleted");
                Ok(Outcome::Applied)
            }
            None => Ok(Outcome::NotFound),
        }
    }
}

/// `_ref` of a record
pub(crate) fn object_ref(object: &Record) -> Option<&str> {
    object.get(FIELD_REF).and_then(Value::as_str)
}

/// A record holding only the `_ref` of `object`
fn reference_only(object: &Record) -> Record {
    object
        .iter()
        .filter(|(field, _)| field.as_str() == FIELD_REF)
        .map(|(field, value)| (field.clone(), value.clone()))
        .collect()
}

/// List-valued field of a record; a missing or non-list field is empty.
pub(crate) fn list_field(object: &Record, field: &str) -> Vec<Value> {
    object
        .get(field)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Name server group operations.

use super::ObjectManipulator;
use crate::connector::Connector;
use crate::constants::{FIELD_NAME, OBJ_NS_GROUP};
use crate::errors::Result;
use crate::types::{record, Outcome, Record};
use serde_json::json;

impl<C: Connector> ObjectManipulator<C> {
    /// List every name server group.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    pub async fn get_all_ns_groups(
        &self,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Vec<Record>> {
        self.connector
            .get_object(OBJ_NS_GROUP, Some(&Record::new()), return_fields, extattrs)
            .await
    }

    /// Search name server groups by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    pub async fn get_ns_group(
        &self,
        group_name: &str,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Vec<Record>> {
        self.connector
            .get_object(
                OBJ_NS_GROUP,
                Some(&record(json!({ FIELD_NAME: group_name }))),
                return_fields,
                extattrs,
            )
            .await
    }

    /// Replace the given fields of a name server group.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected. A missing group is
    /// reported as [`Outcome::NotFound`].
    pub async fn update_ns_group(&self, group_name: &str, group: &Record) -> Result<Outcome> {
        self.update_object(
            OBJ_NS_GROUP,
            &record(json!({ FIELD_NAME: group_name })),
            group,
        )
        .await
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! OSPF area settings on grid members.

use super::{list_field, object_ref, ObjectManipulator};
use crate::connector::Connector;
use crate::constants::{FIELD_AREA_ID, FIELD_HOST_NAME, FIELD_OSPF_LIST, OBJ_MEMBER};
use crate::errors::Result;
use crate::types::{record, Outcome, Record};
use serde_json::{json, Value};
use std::fmt::Display;
use tracing::error;

impl<C: Connector> ObjectManipulator<C> {
    /// Append OSPF settings to a member's `ospf_list`.
    ///
    /// A missing member is logged and reported as [`Outcome::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the update fails.
    pub async fn create_ospf(&self, member_name: &str, ospf_options: Record) -> Result<Outcome> {
        let member = self
            .get_object_or_none(
                OBJ_MEMBER,
                Some(&record(json!({ FIELD_HOST_NAME: member_name }))),
                Some(&[FIELD_OSPF_LIST]),
                None,
            )
            .await?;

        let Some(member) = member else {
            error!(member = %member_name, "Grid member is not found");
            return Ok(Outcome::NotFound);
        };
        let Some(reference) = object_ref(&member) else {
            error!(member = %member_name, "Grid member has no reference");
            return Ok(Outcome::NotFound);
        };

        let mut ospf_list = list_field(&member, FIELD_OSPF_LIST);
        ospf_list.push(Value::Object(ospf_options));

        let payload = record(json!({ FIELD_OSPF_LIST: ospf_list }));
        self.update_object_by_ref(reference, &payload).await?;
        Ok(Outcome::Applied)
    }

    /// Remove the OSPF settings for `area_id` from a member.
    ///
    /// Area ids are compared as strings. The member is updated only when an
    /// entry matched; otherwise [`Outcome::Unchanged`] is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the update fails.
    pub async fn delete_ospf(&self, area_id: impl Display, member_name: &str) -> Result<Outcome> {
        let member = self
            .get_object_or_none(
                OBJ_MEMBER,
                Some(&record(json!({ FIELD_HOST_NAME: member_name }))),
                Some(&[FIELD_OSPF_LIST]),
                None,
            )
            .await?;

        let Some(member) = member else {
            return Ok(Outcome::NotFound);
        };
        let Some(reference) = object_ref(&member) else {
            return Ok(Outcome::NotFound);
        };

        let area_id = area_id.to_string();
        let ospf_list = list_field(&member, FIELD_OSPF_LIST);
        let before = ospf_list.len();
        let remaining: Vec<Value> = ospf_list
            .into_iter()
            .filter(|settings| {
                settings.get(FIELD_AREA_ID).and_then(Value::as_str) != Some(area_id.as_str())
            })
            .collect();

        if remaining.len() == before {
            return Ok(Outcome::Unchanged);
        }

        let payload = record(json!({ FIELD_OSPF_LIST: remaining }));
        self.update_object_by_ref(reference, &payload).await?;
        Ok(Outcome::Applied)
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Authoritative zone operations.

use super::ObjectManipulator;
use crate::connector::Connector;
use crate::constants::OBJ_ZONE_AUTH;
use crate::errors::Result;
use crate::types::{record, Outcome, Record};
use serde_json::{json, Value};
use tracing::warn;

impl<C: Connector> ObjectManipulator<C> {
    /// Create an authoritative zone in `dns_view` unless it exists.
    ///
    /// The zone is served by the connector's name server group and the grid
    /// restarts its DNS service if needed. A refused creation is logged and
    /// reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns an error for any failure other than a refused creation.
    pub async fn create_zone_auth(&self, fqdn: &str, dns_view: &str) -> Result<Option<Record>> {
        let zone = record(json!({"fqdn": fqdn, "view": dns_view}));

        let mut extra = record(json!({"restart_if_needed": true}));
        if let Some(ns_group) = self.connector.ns_group() {
            extra.insert("ns_group".to_string(), Value::String(ns_group.to_string()));
        }

        match self
            .create_object(OBJ_ZONE_AUTH, zone, extra, true, None)
            .await
        {
            Ok(created) => Ok(Some(created)),
            Err(e) if e.is_cannot_create() => {
                warn!(
                    fqdn = %fqdn,
                    view = %dns_view,
                    error = %e,
                    "Authoritative zone was not created"
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Delete an authoritative zone by FQDN.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected.
    pub async fn delete_zone_auth(&self, fqdn: &str) -> Result<Outcome> {
        self.delete_object(OBJ_ZONE_AUTH, &record(json!({"fqdn": fqdn})))
            .await
    }
}

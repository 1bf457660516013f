// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Network view and DNS view operations.
//!
//! In multi-tenant mode each tenant gets its own network view, tagged with the
//! `TenantID` extensible attribute, and a DNS view bound to it:
//!
//! | Object       | Name                                  |
//! |--------------|---------------------------------------|
//! | network view | `{default network view}.{tenant}`     |
//! | DNS view     | `{default DNS view}.{network view}`   |

use super::ObjectManipulator;
use crate::connector::Connector;
use crate::constants::{
    DEFAULT_NETWORK_VIEW, EA_TENANT_ID, FIELD_NAME, OBJ_DNS_VIEW, OBJ_NETWORK_VIEW,
};
use crate::errors::Result;
use crate::types::{record, Outcome, Record};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

impl<C: Connector> ObjectManipulator<C> {
    /// Create a DNS view bound to a network view, unless it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the creation fails.
    pub async fn create_dns_view(
        &self,
        net_view_name: &str,
        dns_view_name: &str,
    ) -> Result<Record> {
        let dns_view = record(json!({
            FIELD_NAME: dns_view_name,
            "network_view": net_view_name,
        }));
        self.create_object(OBJ_DNS_VIEW, dns_view, Record::new(), true, None)
            .await
    }

    /// Delete a DNS view by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected.
    pub async fn delete_dns_view(&self, dns_view_name: &str) -> Result<Outcome> {
        self.delete_object(OBJ_DNS_VIEW, &record(json!({ FIELD_NAME: dns_view_name })))
            .await
    }

    /// Create a network view tagged with its tenant, unless it exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the creation fails.
    pub async fn create_network_view(
        &self,
        net_view_name: &str,
        tenant_id: &str,
    ) -> Result<Record> {
        let net_view = record(json!({ FIELD_NAME: net_view_name }));
        let extattrs = record(json!({
            "extattrs": { EA_TENANT_ID: { "value": tenant_id } }
        }));
        self.create_object(OBJ_NETWORK_VIEW, net_view, extattrs, true, None)
            .await
    }

    /// Delete a network view by name.
    ///
    /// The `default` network view is never deleted; the request is refused
    /// without contacting the grid and reported as [`Outcome::Unchanged`].
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected.
    pub async fn delete_network_view(&self, net_view_name: &str) -> Result<Outcome> {
        if net_view_name == DEFAULT_NETWORK_VIEW {
            info!("Refusing to delete the default network view");
            return Ok(Outcome::Unchanged);
        }

        self.delete_object(
            OBJ_NETWORK_VIEW,
            &record(json!({ FIELD_NAME: net_view_name })),
        )
        .await
    }

    /// Make sure a tenant's network view and DNS view exist and return the DNS view name.
    ///
    /// Without `net_view`, the network view is named after the connector's
    /// default network view and the tenant. Creation failures are logged and
    /// ignored: the derived name is returned regardless.
    pub async fn create_multi_tenant_dns_view(
        &self,
        net_view: Option<&str>,
        tenant: &str,
    ) -> String {
        let net_view = match net_view {
            Some(name) => name.to_string(),
            None => format!("{}.{tenant}", self.connector.network_view()),
        };
        let dns_view = format!("{}.{net_view}", self.connector.dns_view());

        if let Err(e) = self.create_tenant_views(&net_view, &dns_view, tenant).await {
            warn!(error = %e, "Issue happens during views creating");
        }

        debug!(net_view = %net_view, dns_view = %dns_view, "Tenant views resolved");
        dns_view
    }

    async fn create_tenant_views(
        &self,
        net_view: &str,
        dns_view: &str,
        tenant: &str,
    ) -> Result<()> {
        self.create_network_view(net_view, tenant).await?;
        self.create_dns_view(net_view, dns_view).await?;
        Ok(())
    }

    /// DNS view to use for a tenant.
    ///
    /// In single-tenant mode this is the connector's default DNS view. In
    /// multi-tenant mode the tenant's network view is looked up by its
    /// `TenantID` extensible attribute and the tenant views are created on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the network view search fails.
    pub async fn get_dns_view(&self, tenant: &str) -> Result<String> {
        if !self.connector.multi_tenant() {
            return Ok(self.connector.dns_view().to_string());
        }

        let extattrs = record(json!({ EA_TENANT_ID: { "value": tenant } }));
        let net_view = self
            .get_object_or_none(OBJ_NETWORK_VIEW, None, Some(&[FIELD_NAME]), Some(&extattrs))
            .await?;
        let net_view_name = net_view
            .as_ref()
            .and_then(|view| view.get(FIELD_NAME))
            .and_then(Value::as_str);

        Ok(self.create_multi_tenant_dns_view(net_view_name, tenant).await)
    }
}

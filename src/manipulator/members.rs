// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Grid member operations.

use super::ObjectManipulator;
use crate::connector::Connector;
use crate::constants::{FIELD_HOST_NAME, OBJ_MEMBER, OBJ_MEMBER_DNS};
use crate::errors::Result;
use crate::types::{record, MemberSpec, Outcome, Record};
use serde_json::{json, Value};

fn host_filter(member_name: &str) -> Record {
    record(json!({ FIELD_HOST_NAME: member_name }))
}

/// Extra creation fields derived from the interfaces present in `spec`.
pub(crate) fn member_settings(spec: &MemberSpec) -> Record {
    let mut extra = Record::new();

    if let Some(ipv4) = &spec.lan1.ipv4 {
        extra.insert("vip_setting".to_string(), json!(ipv4));
    }
    if let Some(ipv6) = &spec.lan1.ipv6 {
        extra.insert("ipv6_setting".to_string(), json!(ipv6));
    }
    if let Some(nat_ip) = &spec.nat_ip {
        extra.insert(
            "nat_setting".to_string(),
            json!({"enabled": true, "external_virtual_ip": nat_ip}),
        );
    }
    if let Some(ipv4) = spec.mgmt.as_ref().and_then(|mgmt| mgmt.ipv4.as_ref()) {
        extra.insert(
            "node_info".to_string(),
            json!([{"mgmt_network_setting": ipv4}]),
        );
        extra.insert("mgmt_port_setting".to_string(), json!({"enabled": true}));
    }
    if let Some(ipv4) = spec.lan2.as_ref().and_then(|lan2| lan2.ipv4.as_ref()) {
        extra.insert("lan2_enabled".to_string(), Value::Bool(true));
        extra.insert(
            "lan2_port_setting".to_string(),
            json!({"enabled": true, "network_setting": ipv4}),
        );
    }

    extra
}

impl<C: Connector> ObjectManipulator<C> {
    /// Search members by host name.
    ///
    /// # Errors
    ///
    /// Returns an error if the search fails.
    pub async fn get_member(
        &self,
        member_name: &str,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Vec<Record>> {
        self.connector
            .get_object(
                OBJ_MEMBER,
                Some(&host_filter(member_name)),
                return_fields,
                extattrs,
            )
            .await
    }

    /// Create a grid member unless one with the same host name and platform exists.
    ///
    /// LAN1, LAN2, MGMT and NAT settings are only sent for the interfaces
    /// configured in `spec`.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the creation fails.
    pub async fn create_member(&self, spec: &MemberSpec) -> Result<Record> {
        let member = record(json!({
            FIELD_HOST_NAME: spec.name,
            "platform": spec.platform,
        }));

        self.create_object(OBJ_MEMBER, member, member_settings(spec), true, None)
            .await
    }

    /// Record the hardware and licenses of a member that has not joined the grid yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected. A missing member is
    /// reported as [`Outcome::NotFound`].
    pub async fn pre_provision_member(
        &self,
        member_name: &str,
        hwmodel: Option<&str>,
        hwtype: &str,
        licenses: &[String],
    ) -> Result<Outcome> {
        let fields = record(json!({
            "pre_provisioning": {
                "hardware_info": [{"hwmodel": hwmodel, "hwtype": hwtype}],
                "licenses": licenses,
            }
        }));

        self.update_object(OBJ_MEMBER, &host_filter(member_name), &fields)
            .await
    }

    /// Enable or disable the DNS service on a member.
    ///
    /// # Errors
    ///
    /// Returns an error if the update is rejected. A missing member is
    /// reported as [`Outcome::NotFound`].
    pub async fn configure_member_dns(
        &self,
        member_name: &str,
        enable_dns: bool,
    ) -> Result<Outcome> {
        let fields = record(json!({ "enable_dns": enable_dns }));

        self.update_object(OBJ_MEMBER_DNS, &host_filter(member_name), &fields)
            .await
    }

    /// Remove a member from the grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected. A missing member is
    /// reported as [`Outcome::NotFound`].
    pub async fn delete_member(&self, member_name: &str) -> Result<Outcome> {
        self.delete_object(OBJ_MEMBER, &host_filter(member_name))
            .await
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Anycast loopback addresses on member loopback interfaces.
//!
//! Loopback addresses live in the member's `additional_ip_list`. WAPI only
//! supports replacing the whole list, so every change reads the list, edits it
//! locally and writes it back by reference.

use super::{list_field, object_ref, ObjectManipulator};
use crate::connector::Connector;
use crate::constants::{
    FIELD_ADDITIONAL_IP_LIST, FIELD_HOST_NAME, HOST_SUBNET_MASK, LOOPBACK_INTERFACE, OBJ_MEMBER,
};
use crate::errors::Result;
use crate::types::{record, Outcome, Record};
use serde_json::{json, Value};
use tracing::{debug, error, warn};

/// Loopback entry for `ip`. Addresses containing `:` are treated as IPv6.
pub(crate) fn anycast_loopback(ip: &str, enable_bgp: bool, enable_ospf: bool) -> Value {
    let mut entry = json!({
        "anycast": true,
        "enable_bgp": enable_bgp,
        "enable_ospf": enable_ospf,
        "interface": LOOPBACK_INTERFACE,
    });

    if ip.contains(':') {
        entry["ipv6_network_setting"] = json!({ "virtual_ip": ip });
    } else {
        entry["ipv4_network_setting"] = json!({
            "address": ip,
            "subnet_mask": HOST_SUBNET_MASK,
        });
    }

    entry
}

/// Whether a loopback entry carries `ip`.
///
/// Substring match on the IPv4 address or IPv6 virtual IP, so `10.0.0.1` also
/// matches `10.0.0.10`.
pub(crate) fn entry_matches(entry: &Value, ip: &str) -> bool {
    let contains = |setting: &str, field: &str| {
        entry
            .get(setting)
            .and_then(|s| s.get(field))
            .and_then(Value::as_str)
            .is_some_and(|address| address.contains(ip))
    };

    contains("ipv4_network_setting", "address") || contains("ipv6_network_setting", "virtual_ip")
}

impl<C: Connector> ObjectManipulator<C> {
    /// Add an anycast address to a member's loopback interface.
    ///
    /// A missing member is logged and reported as [`Outcome::NotFound`]; no
    /// error is raised.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the update fails.
    pub async fn create_anycast_loopback(
        &self,
        member_name: &str,
        ip: &str,
        enable_bgp: bool,
        enable_ospf: bool,
    ) -> Result<Outcome> {
        let loopback = anycast_loopback(ip, enable_bgp, enable_ospf);

        let member = self
            .get_object_or_none(
                OBJ_MEMBER,
                Some(&record(json!({ FIELD_HOST_NAME: member_name }))),
                Some(&[FIELD_ADDITIONAL_IP_LIST]),
                None,
            )
            .await?;

        let Some((member, reference)) = member.and_then(|m| {
            let reference = object_ref(&m)?.to_string();
            Some((m, reference))
        }) else {
            error!(
                member = %member_name,
                ip = %ip,
                "Grid member is not found, can not assign anycast loopback ip"
            );
            return Ok(Outcome::NotFound);
        };

        let mut ip_list = list_field(&member, FIELD_ADDITIONAL_IP_LIST);
        ip_list.push(loopback);

        let payload = record(json!({ FIELD_ADDITIONAL_IP_LIST: ip_list }));
        self.update_object_by_ref(&reference, &payload).await?;
        Ok(Outcome::Applied)
    }

    /// Remove an anycast address from loopback interfaces.
    ///
    /// With `member_name`, only that member is inspected; otherwise every
    /// member is. Only members that actually carried a matching entry are
    /// updated. Matching is by substring, see [`entry_matches`].
    ///
    /// Returns the number of members updated.
    ///
    /// # Errors
    ///
    /// Returns an error if a lookup or an update fails.
    pub async fn delete_anycast_loopback(
        &self,
        ip: &str,
        member_name: Option<&str>,
    ) -> Result<usize> {
        let members: Vec<Record> = match member_name {
            Some(name) => self
                .get_object_or_none(
                    OBJ_MEMBER,
                    Some(&record(json!({ FIELD_HOST_NAME: name }))),
                    Some(&[FIELD_ADDITIONAL_IP_LIST]),
                    None,
                )
                .await?
                .filter(|member| !list_field(member, FIELD_ADDITIONAL_IP_LIST).is_empty())
                .into_iter()
                .collect(),
            None => {
                self.connector
                    .get_object(OBJ_MEMBER, None, Some(&[FIELD_ADDITIONAL_IP_LIST]), None)
                    .await?
            }
        };

        let mut updated = 0;
        for member in &members {
            let ip_list = list_field(member, FIELD_ADDITIONAL_IP_LIST);
            let before = ip_list.len();
            let remaining: Vec<Value> = ip_list
                .into_iter()
                .filter(|entry| !entry_matches(entry, ip))
                .collect();

            if remaining.len() == before {
                continue;
            }

            let Some(reference) = object_ref(member) else {
                warn!(member = ?member, "Grid member has no reference, skipping");
                continue;
            };

            let payload = record(json!({ FIELD_ADDITIONAL_IP_LIST: remaining }));
            self.update_object_by_ref(reference, &payload).await?;
            updated += 1;
        }

        debug!(ip = %ip, updated = updated, "Anycast loopback removal finished");
        Ok(updated)
    }
}

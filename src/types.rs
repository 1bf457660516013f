// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared data types for grid object manipulation.

use crate::constants::DEFAULT_MEMBER_PLATFORM;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An opaque WAPI object, a query filter, or a request payload.
///
/// Persisted objects always carry a `_ref` field.
pub type Record = serde_json::Map<String, Value>;

/// Convert a JSON value into a [`Record`].
///
/// Non-object values yield an empty record.
#[must_use]
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

/// Result of an operation that mutates a remote object only when it can be found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[must_use]
pub enum Outcome {
    /// The object was found and the mutation was issued
    Applied,
    /// The object was found but nothing needed to change (or the change was refused)
    Unchanged,
    /// The object does not exist, or the lookup failed
    NotFound,
}

impl Outcome {
    /// `true` when a mutation was sent to the grid
    #[must_use]
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// IPv4 settings of a member interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv4Setting {
    pub address: String,
    pub subnet_mask: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    /// Any other WAPI network setting fields, sent as given
    #[serde(flatten)]
    pub extra: Record,
}

/// IPv6 settings of a member interface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ipv6Setting {
    pub virtual_ip: String,
    pub cidr_prefix: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateway: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Any other WAPI IPv6 setting fields, sent as given
    #[serde(flatten)]
    pub extra: Record,
}

/// Addressing of one member port (LAN1, LAN2 or MGMT).
///
/// Either family may be absent; absent families are simply not configured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Setting>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Ipv6Setting>,
}

/// Description of a grid member to create.
///
/// # Example
///
/// ```rust
/// use ibgrid::types::{InterfaceSettings, Ipv4Setting, MemberSpec};
///
/// let spec = MemberSpec {
///     lan1: InterfaceSettings {
///         ipv4: Some(Ipv4Setting {
///             address: "10.0.0.10".to_string(),
///             subnet_mask: "255.255.255.0".to_string(),
///             gateway: Some("10.0.0.1".to_string()),
///             ..Ipv4Setting::default()
///         }),
///         ipv6: None,
///     },
///     ..MemberSpec::new("member1.example.com")
/// };
/// assert_eq!(spec.platform, "VNIOS");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSpec {
    pub name: String,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default)]
    pub mgmt: Option<InterfaceSettings>,
    #[serde(default)]
    pub lan1: InterfaceSettings,
    #[serde(default)]
    pub lan2: Option<InterfaceSettings>,
    #[serde(default)]
    pub nat_ip: Option<String>,
}

fn default_platform() -> String {
    DEFAULT_MEMBER_PLATFORM.to_string()
}

impl MemberSpec {
    /// Member with the default platform and no interfaces configured
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            platform: default_platform(),
            mgmt: None,
            lan1: InterfaceSettings::default(),
            lan2: None,
            nat_ip: None,
        }
    }
}

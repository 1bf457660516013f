// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Property schemas for orchestration templates.
//!
//! These are plain declarations; no validation happens here. The orchestration
//! engine consumes them as JSON.

use serde::Serialize;
use std::collections::BTreeMap;

/// Kind of a schema property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Map,
    String,
}

/// Declarative description of one template property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySchema {
    #[serde(rename = "type")]
    pub property_type: PropertyType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Names of custom constraints the engine resolves, e.g. `neutron.network`
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<String>,

    pub required: bool,

    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub schema: BTreeMap<String, PropertySchema>,
}

impl PropertySchema {
    fn string(description: String, constraint: &str) -> Self {
        Self {
            property_type: PropertyType::String,
            description: Some(description),
            constraints: vec![constraint.to_string()],
            required: false,
            schema: BTreeMap::new(),
        }
    }
}

/// Build the schema of a port property named `port_name`.
///
/// The port is a map of three optional strings: the network to attach to,
/// a fixed IP address, and an existing port ID.
///
/// # Example
///
/// ```rust
/// use ibgrid::resource_utils::port_schema;
///
/// let schema = port_schema("lan1", true);
/// assert!(schema.required);
/// assert_eq!(schema.schema.len(), 3);
/// ```
#[must_use]
pub fn port_schema(port_name: &str, is_required: bool) -> PropertySchema {
    let mut schema = BTreeMap::new();
    schema.insert(
        "network".to_string(),
        PropertySchema::string(
            format!("Name or ID of network to which to attach the {port_name} port."),
            "neutron.network",
        ),
    );
    schema.insert(
        "fixed_ip".to_string(),
        PropertySchema::string(
            format!("Fixed IP address to specify for the {port_name} port."),
            "ip_addr",
        ),
    );
    schema.insert(
        "port".to_string(),
        PropertySchema::string(
            format!("ID of an existing port to associate with the {port_name} port."),
            "neutron.port",
        ),
    );

    PropertySchema {
        property_type: PropertyType::Map,
        description: None,
        constraints: Vec::new(),
        required: is_required,
        schema,
    }
}

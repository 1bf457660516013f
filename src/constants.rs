// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for ibgrid.
//!
//! This module contains the WAPI object type names, field names and defaults used
//! throughout the codebase. Constants are organized by category for easy maintenance.

// ============================================================================
// WAPI Object Types
// ============================================================================

/// Grid member
pub const OBJ_MEMBER: &str = "member";

/// DNS service properties of a grid member
pub const OBJ_MEMBER_DNS: &str = "member:dns";

/// Name server group
pub const OBJ_NS_GROUP: &str = "nsgroup";

/// DNS view
pub const OBJ_DNS_VIEW: &str = "view";

/// Network view
pub const OBJ_NETWORK_VIEW: &str = "networkview";

/// TSIG key
pub const OBJ_TSIG: &str = "tsig";

/// Authoritative DNS zone
pub const OBJ_ZONE_AUTH: &str = "zone_auth";

// ============================================================================
// Field Names
// ============================================================================

/// Opaque object reference returned by WAPI for every persisted object
pub const FIELD_REF: &str = "_ref";

/// Query parameter carrying the comma separated list of fields to return
pub const PARAM_RETURN_FIELDS: &str = "_return_fields";

/// Member host name (lookup key for members)
pub const FIELD_HOST_NAME: &str = "host_name";

/// Generic name field (views, nsgroups, tsig keys)
pub const FIELD_NAME: &str = "name";

/// Member loopback / additional interface list
pub const FIELD_ADDITIONAL_IP_LIST: &str = "additional_ip_list";

/// Member OSPF configuration list
pub const FIELD_OSPF_LIST: &str = "ospf_list";

/// OSPF area identifier inside an `ospf_list` entry
pub const FIELD_AREA_ID: &str = "area_id";

/// Extensible attribute used to tag network views with their tenant
pub const EA_TENANT_ID: &str = "TenantID";

// ============================================================================
// Defaults
// ============================================================================

/// Default platform for new grid members
pub const DEFAULT_MEMBER_PLATFORM: &str = "VNIOS";

/// Default hardware type used when pre-provisioning a member
pub const DEFAULT_HWTYPE: &str = "IB-VNIOS";

/// Interface name for anycast loopback entries
pub const LOOPBACK_INTERFACE: &str = "LOOPBACK";

/// Host mask applied to IPv4 anycast loopback addresses
pub const HOST_SUBNET_MASK: &str = "255.255.255.255";

/// System network view. Never deleted.
pub const DEFAULT_NETWORK_VIEW: &str = "default";

/// Default DNS view name
pub const DEFAULT_DNS_VIEW: &str = "default";

/// Default WAPI version
pub const DEFAULT_WAPI_VERSION: &str = "2.5";

/// Default HTTP request timeout (10 seconds)
pub const DEFAULT_HTTP_REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Environment Variables
// ============================================================================

/// Grid master host
pub const ENV_HOST: &str = "IBGRID_HOST";

/// WAPI user name
pub const ENV_USERNAME: &str = "IBGRID_USERNAME";

/// WAPI password
pub const ENV_PASSWORD: &str = "IBGRID_PASSWORD";

/// Log output format (`text` or `json`)
pub const ENV_LOG_FORMAT: &str = "RUST_LOG_FORMAT";

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # ibgrid - Infoblox grid management over WAPI
//!
//! ibgrid provisions and tears down objects on an Infoblox grid: members,
//! anycast loopback addresses, OSPF areas, name server groups, network and
//! DNS views, TSIG keys and authoritative zones.
//!
//! ## Overview
//!
//! - [`connector`] - The [`Connector`](connector::Connector) contract and its
//!   WAPI REST implementation
//! - [`manipulator`] - Domain operations built on a connector
//! - [`resource_utils`] - Property schemas for orchestration templates
//! - [`cli`] - Command line front-end
//!
//! Every manipulator operation is a lookup followed by at most one mutation
//! per target, so repeating an operation is safe.
//!
//! ## Example
//!
//! ```rust,no_run
//! use ibgrid::connector::{ConnectorOptions, WapiConnector};
//! use ibgrid::manipulator::ObjectManipulator;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let options = ConnectorOptions {
//!     host: "gm.example.com".to_string(),
//!     username: "admin".to_string(),
//!     password: "infoblox".to_string(),
//!     ..ConnectorOptions::default()
//! };
//! let manipulator = ObjectManipulator::new(WapiConnector::new(options)?);
//!
//! let dns_view = manipulator.get_dns_view("tenant-1").await?;
//! manipulator.create_zone_auth("example.com", &dns_view).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod connector;
pub mod constants;
pub mod errors;
pub mod manipulator;
pub mod resource_utils;
pub mod types;

#[cfg(test)]
mod errors_tests;

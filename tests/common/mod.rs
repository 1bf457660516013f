// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Common test utilities for integration tests

use ibgrid::connector::retry::ExponentialBackoff;
use ibgrid::connector::{ConnectorOptions, WapiConnector};
use ibgrid::manipulator::ObjectManipulator;
use std::time::Duration;
use wiremock::MockServer;

/// WAPI path prefix for the default version
pub const WAPI_PREFIX: &str = "/wapi/v2.5";

/// Path of `object` (a type or a reference) under the WAPI prefix
pub fn wapi_path(object: &str) -> String {
    format!("{WAPI_PREFIX}/{object}")
}

/// Connector options pointing at the mock grid master
pub fn options_for(server: &MockServer) -> ConnectorOptions {
    ConnectorOptions {
        host: server.uri(),
        username: "admin".to_string(),
        password: "infoblox".to_string(),
        ..ConnectorOptions::default()
    }
}

/// Manipulator over a WAPI connector with a millisecond retry schedule
pub fn manipulator_for(options: ConnectorOptions) -> ObjectManipulator<WapiConnector> {
    let backoff = ExponentialBackoff::new(
        Duration::from_millis(1),
        Duration::from_millis(5),
        Some(Duration::from_secs(2)),
        2.0,
        0.0,
    );
    let connector = WapiConnector::new(options)
        .expect("valid connector options")
        .with_backoff(backoff);
    ObjectManipulator::new(connector)
}

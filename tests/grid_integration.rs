// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! End-to-end tests of manipulator operations against a mock grid master.
//!
//! Each test mounts the exact WAPI requests an operation is expected to make;
//! unexpected requests get a 404 from wiremock and `expect` counts are
//! verified when the server drops.

mod common;

use common::{manipulator_for, options_for, wapi_path};
use ibgrid::types::Outcome;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MEMBER_REF: &str = "member/b25lLnZpcnR1YWxfbm9kZSQw:member1.example.com";
const NET_VIEW_REF: &str = "networkview/ZG5zLm5ldHdvcmtfdmlldyQx:nv.t1";
const DNS_VIEW_REF: &str = "view/ZG5zLnZpZXckLl9kZWZhdWx0:dv.nv.t1";

// ============================================================================
// Anycast
// ============================================================================

#[tokio::test]
async fn test_anycast_loopback_round_trip() {
    let server = MockServer::start().await;
    let existing = json!({
        "anycast": true,
        "enable_bgp": false,
        "enable_ospf": true,
        "interface": "LOOPBACK",
        "ipv4_network_setting": {"address": "172.16.0.1", "subnet_mask": "255.255.255.255"}
    });
    let added = json!({
        "anycast": true,
        "enable_bgp": true,
        "enable_ospf": false,
        "interface": "LOOPBACK",
        "ipv4_network_setting": {"address": "172.16.0.53", "subnet_mask": "255.255.255.255"}
    });

    Mock::given(method("GET"))
        .and(path(wapi_path("member")))
        .and(query_param("host_name", "member1.example.com"))
        .and(query_param("_return_fields", "additional_ip_list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_ref": MEMBER_REF, "additional_ip_list": [existing.clone()]}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(wapi_path(MEMBER_REF)))
        .and(body_json(json!({"additional_ip_list": [existing, added]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(MEMBER_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let manipulator = manipulator_for(options_for(&server));
    let outcome = manipulator
        .create_anycast_loopback("member1.example.com", "172.16.0.53", true, false)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::Applied);
}

#[tokio::test]
async fn test_anycast_loopback_missing_member_sends_no_update() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("member")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manipulator = manipulator_for(options_for(&server));
    let outcome = manipulator
        .create_anycast_loopback("ghost.example.com", "172.16.0.53", true, false)
        .await
        .unwrap();

    assert_eq!(outcome, Outcome::NotFound);
}

// ============================================================================
// Views
// ============================================================================

#[tokio::test]
async fn test_multi_tenant_dns_view_created_on_first_use() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("networkview")))
        .and(query_param("*TenantID", "t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(wapi_path("networkview")))
        .and(query_param("name", "nv.t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(wapi_path("networkview")))
        .and(body_json(json!({
            "name": "nv.t1",
            "extattrs": {"TenantID": {"value": "t1"}}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(NET_VIEW_REF)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(wapi_path("view")))
        .and(query_param("name", "dv.nv.t1"))
        .and(query_param("network_view", "nv.t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(wapi_path("view")))
        .and(body_json(json!({"name": "dv.nv.t1", "network_view": "nv.t1"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(DNS_VIEW_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let mut options = options_for(&server);
    options.multi_tenant = true;
    options.network_view = "nv".to_string();
    options.dns_view = "dv".to_string();

    let manipulator = manipulator_for(options);
    let dns_view = manipulator.get_dns_view("t1").await.unwrap();

    assert_eq!(dns_view, "dv.nv.t1");
}

#[tokio::test]
async fn test_delete_network_view() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("networkview")))
        .and(query_param("name", "nv.t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"_ref": NET_VIEW_REF, "name": "nv.t1"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(wapi_path(NET_VIEW_REF)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(NET_VIEW_REF)))
        .expect(1)
        .mount(&server)
        .await;

    let manipulator = manipulator_for(options_for(&server));
    assert_eq!(
        manipulator.delete_network_view("nv.t1").await.unwrap(),
        Outcome::Applied
    );
}

#[tokio::test]
async fn test_delete_default_network_view_never_reaches_grid() {
    let server = MockServer::start().await;

    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let manipulator = manipulator_for(options_for(&server));
    assert_eq!(
        manipulator.delete_network_view("default").await.unwrap(),
        Outcome::Unchanged
    );
}

// ============================================================================
// Zones
// ============================================================================

#[tokio::test]
async fn test_zone_creation_refused_by_grid_is_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("zone_auth")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(wapi_path("zone_auth")))
        .and(body_json(json!({
            "fqdn": "example.com",
            "view": "default",
            "ns_group": "grid-ns",
            "restart_if_needed": true
        })))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Error": "AdmConDataError: None (IBDataConflictError: IB.Data.Conflict:Duplicate object)",
            "code": "Client.Ibap.Data.Conflict",
            "text": "Duplicate object 'example.com' of type zone exists in the database."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut options = options_for(&server);
    options.ns_group = Some("grid-ns".to_string());

    let manipulator = manipulator_for(options);
    let created = manipulator
        .create_zone_auth("example.com", "default")
        .await
        .unwrap();

    assert!(created.is_none());
}

#[tokio::test]
async fn test_zone_search_failure_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(wapi_path("zone_auth")))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "Error": "AdmConProtoError: Unknown argument/field: 'fqdn2'",
            "text": "Unknown argument/field: 'fqdn2'"
        })))
        .mount(&server)
        .await;

    let manipulator = manipulator_for(options_for(&server));
    let err = manipulator
        .create_zone_auth("example.com", "default")
        .await
        .unwrap_err();

    assert!(err.is_search_error());
}

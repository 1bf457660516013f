// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-memory [`Connector`] for unit tests.
//!
//! Objects live in a vector keyed by generated references. Every call is
//! recorded so tests can assert on exactly which mutations were issued.

use crate::connector::Connector;
use crate::constants::{FIELD_REF, PARAM_RETURN_FIELDS};
use crate::errors::{InfobloxError, Result};
use crate::types::Record;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Mutex;

/// A recorded connector call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Get {
        obj_type: String,
        filter: Option<Record>,
        return_fields: Option<Vec<String>>,
        extattrs: Option<Record>,
    },
    Create {
        obj_type: String,
        payload: Record,
    },
    Update {
        reference: String,
        payload: Record,
    },
    Delete {
        reference: String,
    },
}

impl Call {
    pub(crate) fn is_mutation(&self) -> bool {
        !matches!(self, Self::Get { .. })
    }
}

#[derive(Debug, Default)]
struct State {
    objects: Vec<(String, Record)>,
    calls: Vec<Call>,
    next_id: usize,
    failing_searches: HashSet<String>,
    failing_creates: HashSet<String>,
}

#[derive(Debug)]
pub(crate) struct FakeConnector {
    state: Mutex<State>,
    network_view: String,
    dns_view: String,
    multi_tenant: bool,
    ns_group: Option<String>,
}

impl FakeConnector {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
            network_view: "default".to_string(),
            dns_view: "default".to_string(),
            multi_tenant: false,
            ns_group: None,
        }
    }

    pub(crate) fn multi_tenant(mut self, network_view: &str, dns_view: &str) -> Self {
        self.multi_tenant = true;
        self.network_view = network_view.to_string();
        self.dns_view = dns_view.to_string();
        self
    }

    pub(crate) fn with_ns_group(mut self, ns_group: &str) -> Self {
        self.ns_group = Some(ns_group.to_string());
        self
    }

    /// Store an object directly, without recording a call. Returns its reference.
    pub(crate) fn seed(&self, obj_type: &str, object: Value) -> String {
        let mut state = self.state.lock().unwrap();
        let mut object = crate::types::record(object);
        let reference = next_ref(&mut state, obj_type, &object);
        object.insert(FIELD_REF.to_string(), Value::String(reference.clone()));
        state.objects.push((obj_type.to_string(), object));
        reference
    }

    pub(crate) fn fail_searches_for(&self, obj_type: &str) {
        let mut state = self.state.lock().unwrap();
        state.failing_searches.insert(obj_type.to_string());
    }

    pub(crate) fn fail_creates_for(&self, obj_type: &str) {
        let mut state = self.state.lock().unwrap();
        state.failing_creates.insert(obj_type.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub(crate) fn mutations(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_mutation).collect()
    }

    /// Stored object by reference
    pub(crate) fn object(&self, reference: &str) -> Option<Record> {
        let state = self.state.lock().unwrap();
        state
            .objects
            .iter()
            .find(|(_, object)| object.get(FIELD_REF).and_then(Value::as_str) == Some(reference))
            .map(|(_, object)| object.clone())
    }

    /// All stored objects of a type
    pub(crate) fn objects(&self, obj_type: &str) -> Vec<Record> {
        let state = self.state.lock().unwrap();
        state
            .objects
            .iter()
            .filter(|(kind, _)| kind == obj_type)
            .map(|(_, object)| object.clone())
            .collect()
    }
}

fn next_ref(state: &mut State, obj_type: &str, object: &Record) -> String {
    state.next_id += 1;
    let label = ["name", "host_name", "fqdn"]
        .iter()
        .find_map(|field| object.get(*field).and_then(Value::as_str))
        .unwrap_or("unnamed");
    format!("{obj_type}/ZmFrZQ{}:{label}", state.next_id)
}

fn matches_filter(object: &Record, filter: Option<&Record>) -> bool {
    filter
        .into_iter()
        .flatten()
        .filter(|(field, _)| field.as_str() != PARAM_RETURN_FIELDS)
        .all(|(field, expected)| object.get(field) == Some(expected))
}

fn matches_extattrs(object: &Record, extattrs: Option<&Record>) -> bool {
    extattrs.into_iter().flatten().all(|(name, attr)| {
        object
            .get("extattrs")
            .and_then(|attrs| attrs.get(name))
            .and_then(|value| value.get("value"))
            == attr.get("value")
    })
}

fn project(object: &Record, return_fields: Option<&[&str]>) -> Record {
    match return_fields {
        None => object.clone(),
        Some(fields) => object
            .iter()
            .filter(|(field, _)| field.as_str() == FIELD_REF || fields.contains(&field.as_str()))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect(),
    }
}

#[async_trait]
impl Connector for FakeConnector {
    async fn get_object(
        &self,
        obj_type: &str,
        filter: Option<&Record>,
        return_fields: Option<&[&str]>,
        extattrs: Option<&Record>,
    ) -> Result<Vec<Record>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Get {
            obj_type: obj_type.to_string(),
            filter: filter.cloned(),
            return_fields: return_fields.map(|f| f.iter().map(|s| (*s).to_string()).collect()),
            extattrs: extattrs.cloned(),
        });

        if state.failing_searches.contains(obj_type) {
            return Err(InfobloxError::SearchError {
                obj_type: obj_type.to_string(),
                reason: "injected search failure".to_string(),
            });
        }

        Ok(state
            .objects
            .iter()
            .filter(|(kind, object)| {
                kind == obj_type
                    && matches_filter(object, filter)
                    && matches_extattrs(object, extattrs)
            })
            .map(|(_, object)| project(object, return_fields))
            .collect())
    }

    async fn create_object(
        &self,
        obj_type: &str,
        payload: &Record,
        return_fields: Option<&[&str]>,
    ) -> Result<Record> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Create {
            obj_type: obj_type.to_string(),
            payload: payload.clone(),
        });

        if state.failing_creates.contains(obj_type) {
            return Err(InfobloxError::CannotCreateObject {
                obj_type: obj_type.to_string(),
                reason: "injected create failure".to_string(),
            });
        }

        let mut object = payload.clone();
        let reference = next_ref(&mut state, obj_type, &object);
        object.insert(FIELD_REF.to_string(), Value::String(reference));
        let created = project(&object, Some(return_fields.unwrap_or(&[])));
        state.objects.push((obj_type.to_string(), object));
        Ok(created)
    }

    async fn update_object(&self, reference: &str, payload: &Record) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Update {
            reference: reference.to_string(),
            payload: payload.clone(),
        });

        let object = state
            .objects
            .iter_mut()
            .find(|(_, object)| object.get(FIELD_REF).and_then(Value::as_str) == Some(reference))
            .map(|(_, object)| object)
            .ok_or_else(|| InfobloxError::CannotUpdateObject {
                reference: reference.to_string(),
                reason: "reference not found".to_string(),
            })?;
        for (field, value) in payload {
            object.insert(field.clone(), value.clone());
        }
        Ok(())
    }

    async fn delete_object(&self, reference: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call::Delete {
            reference: reference.to_string(),
        });

        let before = state.objects.len();
        state
            .objects
            .retain(|(_, object)| object.get(FIELD_REF).and_then(Value::as_str) != Some(reference));
        if state.objects.len() == before {
            return Err(InfobloxError::CannotRemoveObject {
                reference: reference.to_string(),
                reason: "reference not found".to_string(),
            });
        }
        Ok(())
    }

    fn network_view(&self) -> &str {
        &self.network_view
    }

    fn dns_view(&self) -> &str {
        &self.dns_view
    }

    fn multi_tenant(&self) -> bool {
        self.multi_tenant
    }

    fn ns_group(&self) -> Option<&str> {
        self.ns_group.as_deref()
    }
}

// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! TSIG key operations.
//!
//! The key algorithm is accepted for interface parity but is not part of the
//! WAPI payload; the grid applies its default algorithm.

use super::ObjectManipulator;
use crate::connector::Connector;
use crate::constants::{FIELD_NAME, OBJ_TSIG};
use crate::errors::Result;
use crate::types::{record, Outcome, Record};
use serde_json::json;
use tracing::debug;

fn tsig_payload(name: &str, secret: &str) -> Record {
    record(json!({ FIELD_NAME: name, "key": secret }))
}

impl<C: Connector> ObjectManipulator<C> {
    /// Create a TSIG key unless an identical one exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup or the creation fails.
    pub async fn create_tsig(&self, name: &str, algorithm: &str, secret: &str) -> Result<Record> {
        debug!(name = %name, algorithm = %algorithm, "Algorithm is not sent to the grid");
        self.create_object(OBJ_TSIG, tsig_payload(name, secret), Record::new(), true, None)
            .await
    }

    /// Delete a TSIG key matching name and secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is rejected.
    pub async fn delete_tsig(&self, name: &str, algorithm: &str, secret: &str) -> Result<Outcome> {
        debug!(name = %name, algorithm = %algorithm, "Algorithm is not sent to the grid");
        self.delete_object(OBJ_TSIG, &tsig_payload(name, secret))
            .await
    }
}

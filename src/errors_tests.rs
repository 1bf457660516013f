// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for WAPI error types.

#[cfg(test)]
mod tests {
    use crate::errors::InfobloxError;

    #[test]
    fn test_search_error_display() {
        let error = InfobloxError::SearchError {
            obj_type: "member".to_string(),
            reason: "AdmConProtoError: Unknown argument/field: 'hostname'".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Cannot search member objects: AdmConProtoError: Unknown argument/field: 'hostname'"
        );
        assert!(error.is_search_error());
        assert!(!error.is_cannot_create());
    }

    #[test]
    fn test_cannot_create_display() {
        let error = InfobloxError::CannotCreateObject {
            obj_type: "zone_auth".to_string(),
            reason: "The zone already exists".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Cannot create zone_auth object: The zone already exists"
        );
        assert!(error.is_cannot_create());
        assert!(!error.is_search_error());
    }

    #[test]
    fn test_cannot_update_display() {
        let error = InfobloxError::CannotUpdateObject {
            reference: "member/b25lLnZpcnR1YWxfbm9kZSQw:gm.example.com".to_string(),
            reason: "Invalid value".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Cannot update object member/b25lLnZpcnR1YWxfbm9kZSQw:gm.example.com: Invalid value"
        );
    }

    #[test]
    fn test_cannot_remove_display() {
        let error = InfobloxError::CannotRemoveObject {
            reference: "tsig/ZG5zLnRzaWck:key1".to_string(),
            reason: "Reference not found".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Cannot remove object tsig/ZG5zLnRzaWck:key1: Reference not found"
        );
    }

    #[test]
    fn test_connection_error_display() {
        let error = InfobloxError::ConnectionError {
            url: "https://gm.example.com/wapi/v2.5/member".to_string(),
            reason: "connection refused".to_string(),
        };

        assert_eq!(
            error.to_string(),
            "Connection to https://gm.example.com/wapi/v2.5/member failed: connection refused"
        );
        assert!(!error.is_search_error());
    }

    #[test]
    fn test_config_error_display() {
        let error = InfobloxError::Config("host must not be empty".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: host must not be empty"
        );
    }

    #[test]
    fn test_errors_are_clone_and_comparable() {
        let error = InfobloxError::MalformedResponse {
            reason: "expected array".to_string(),
        };
        assert_eq!(error.clone(), error);
    }
}

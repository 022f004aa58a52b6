//! The `{ success, data, error }` response envelope.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::error::{BookingError, Result};

/// Body of every backend response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T: DeserializeOwned> ApiResponse<T> {
    /// Unwraps the payload. A successful response without `data` decodes
    /// `null`, which is what unit-returning calls expect.
    pub fn into_result(self, status: Option<u16>) -> Result<T> {
        if !self.success {
            return Err(match status {
                Some(401) => BookingError::Unauthorized,
                Some(403) => BookingError::Forbidden,
                _ => BookingError::Api {
                    status,
                    message: self
                        .error
                        .unwrap_or_else(|| "Request failed".to_string()),
                },
            });
        }
        match self.data {
            Some(data) => Ok(data),
            None => Ok(serde_json::from_value(serde_json::Value::Null)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Bus;

    #[test]
    fn test_success_with_data() {
        let body = r#"{"success":true,"data":[1,2,3]}"#;
        let response: ApiResponse<Vec<u32>> = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_result(Some(200)).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_success_without_data_is_unit() {
        let response: ApiResponse<()> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        response.into_result(Some(200)).unwrap();

        let response: ApiResponse<Bus> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            response.into_result(Some(200)),
            Err(BookingError::Serialization { .. })
        ));
    }

    #[test]
    fn test_failure_maps_to_api_error() {
        let response: ApiResponse<()> =
            serde_json::from_str(r#"{"success":false,"error":"Seat 1A is taken"}"#).unwrap();
        let err = response.into_result(Some(409)).unwrap_err();
        assert_eq!(err.to_string(), "API error (409): Seat 1A is taken");

        let response: ApiResponse<()> = ApiResponse::failure("expired");
        assert!(matches!(
            response.into_result(Some(401)),
            Err(BookingError::Unauthorized)
        ));
    }
}

//! Request and response types.

use chrono::NaiveDateTime;
use ems_model::Employee;
use http::StatusCode;
use serde::{Deserialize, Serialize};

/// Employee as returned to clients (no password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    /// Employee ID.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Department.
    pub department: Option<String>,
    /// Role label.
    pub role: String,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
    /// Last update timestamp.
    pub updated_at: NaiveDateTime,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name,
            email: employee.email,
            phone: employee.phone,
            department: employee.department,
            role: employee.role,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// Response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// HTTP status code.
    pub code: u16,
    /// Human-readable message.
    pub message: String,
    /// Payload.
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Creates a 200 response.
    #[must_use]
    pub fn success(data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data,
        }
    }

    /// Creates a 201 response.
    #[must_use]
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::CREATED.as_u16(),
            message: message.into(),
            data: Some(data),
        }
    }

    /// Creates an error response without data.
    #[must_use]
    pub fn error(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            message: message.into(),
            data: None,
        }
    }

    /// Gets the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Login request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Login email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl LoginRequest {
    /// Creates a login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Login response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Whether the login succeeded.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Bearer token on success.
    pub token: Option<String>,
}

impl LoginResponse {
    /// Creates a successful login response.
    #[must_use]
    pub fn success(token: impl Into<String>) -> Self {
        Self {
            success: true,
            message: "Login successful".to_string(),
            token: Some(token.into()),
        }
    }

    /// Creates a failed login response.
    #[must_use]
    pub fn failed() -> Self {
        Self {
            success: false,
            message: "Login failed".to_string(),
            token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_constructors() {
        let ok: ApiResponse<u8> = ApiResponse::success(Some(1), "Fine");
        assert_eq!(ok.status(), StatusCode::OK);

        let created = ApiResponse::created("x", "Employee created successfully");
        assert_eq!(created.code, 201);
        assert_eq!(created.data, Some("x"));

        let error: ApiResponse<()> = ApiResponse::error(StatusCode::BAD_REQUEST, "nope");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json, serde_json::json!({"code": 400, "message": "nope", "data": null}));
    }

    #[test]
    fn login_response_shape() {
        let json = serde_json::to_value(LoginResponse::success("Bearer abc")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "message": "Login successful", "token": "Bearer abc"})
        );
        assert!(!LoginResponse::failed().success);
    }
}

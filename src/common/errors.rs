use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

/// Error types for request validation and application failures
#[derive(Debug, Clone, Error)]
pub enum BusinessError {
    /// Validation errors for user input (400 Bad Request)
    #[error("Validation error in field '{field}': {message}")]
    ValidationError { field: String, message: String },
    /// Resource not found (404 Not Found)
    #[error("{resource} with id '{id}' not found")]
    NotFound { resource: String, id: String },
    /// Duplicate resource (409 Conflict)
    #[error("{resource} with this {field} already exists")]
    Duplicate { resource: String, field: String },
    /// External service errors (502 Bad Gateway)
    #[error("External service '{service}' error: {message}")]
    ExternalServiceError { service: String, message: String },
    /// Generic application error (500 Internal Server Error)
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl BusinessError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            BusinessError::ValidationError { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            BusinessError::NotFound { .. } => (StatusCode::NOT_FOUND, "RESOURCE_NOT_FOUND"),
            BusinessError::Duplicate { .. } => (StatusCode::CONFLICT, "DUPLICATE_RESOURCE"),
            BusinessError::ExternalServiceError { .. } => {
                (StatusCode::BAD_GATEWAY, "EXTERNAL_SERVICE_ERROR")
            }
            BusinessError::InternalError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        }
    }
}

impl IntoResponse for BusinessError {
    fn into_response(self) -> Response {
        let (status, error_code) = self.status_and_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": self.to_string(),
                "type": format!("{self:?}").split(' ').next().unwrap_or("Unknown")
            }
        }));

        (status, body).into_response()
    }
}

/// Maps storage failures onto the HTTP-facing error taxonomy
pub struct ErrorMapper;

impl ErrorMapper {
    pub fn map_db_error(err: DbErr, context: &str) -> BusinessError {
        match err {
            DbErr::RecordNotFound(msg) => BusinessError::NotFound {
                resource: Self::resource_from_context(context),
                id: Self::extract_id_from_message(&msg),
            },
            DbErr::Conn(conn_err) => BusinessError::ExternalServiceError {
                service: "database".to_string(),
                message: conn_err.to_string(),
            },
            DbErr::Exec(exec_err) => Self::map_constraint(&exec_err.to_string(), context),
            DbErr::Query(query_err) => Self::map_constraint(&query_err.to_string(), context),
            _ => BusinessError::InternalError {
                message: err.to_string(),
            },
        }
    }

    fn map_constraint(err_msg: &str, context: &str) -> BusinessError {
        let lowered = err_msg.to_lowercase();
        if lowered.contains("unique constraint")
            || lowered.contains("duplicate key")
            || lowered.contains("duplicate entry")
        {
            BusinessError::Duplicate {
                resource: Self::resource_from_context(context),
                field: Self::extract_field_from_constraint(&lowered),
            }
        } else {
            BusinessError::InternalError {
                message: err_msg.to_string(),
            }
        }
    }

    fn resource_from_context(context: &str) -> String {
        context.replace('_', " ")
    }

    fn extract_id_from_message(msg: &str) -> String {
        // Messages are built as "<resource> with id '<id>' not found"
        if let Some(start_pos) = msg.find(" id '") {
            let after_id = &msg[start_pos + 5..];
            if let Some(end_pos) = after_id.find('\'') {
                return after_id[..end_pos].to_string();
            }
        }

        msg.split_whitespace()
            .map(|word| word.trim_matches('\'').trim_matches('"'))
            .find(|word| word.parse::<i64>().is_ok())
            .map_or_else(|| "unknown".to_string(), str::to_string)
    }

    fn extract_field_from_constraint(msg: &str) -> String {
        if msg.contains("item_code") || msg.contains("itemcode") {
            "item_code".to_string()
        } else if msg.contains("name") {
            "name".to_string()
        } else {
            "field".to_string()
        }
    }
}

#[macro_export]
macro_rules! validation_error {
    ($field:expr, $message:expr) => {
        $crate::common::errors::BusinessError::ValidationError {
            field: $field.to_string(),
            message: $message.to_string(),
        }
    };
}

#[macro_export]
macro_rules! not_found {
    ($resource:expr, $id:expr) => {
        $crate::common::errors::BusinessError::NotFound {
            resource: $resource.to_string(),
            id: $id.to_string(),
        }
    };
}

/// Extension trait to add business error conversion to `DbErr`
pub trait DbErrorExt {
    fn to_business_error(self, context: &str) -> BusinessError;
}

impl DbErrorExt for DbErr {
    fn to_business_error(self, context: &str) -> BusinessError {
        ErrorMapper::map_db_error(self, context)
    }
}

pub type BusinessResult<T> = Result<T, BusinessError>;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    #[test]
    fn test_validation_error_creation() {
        let err = validation_error!("tested", "must not be negative");
        assert!(matches!(err, BusinessError::ValidationError { .. }));
        assert_eq!(
            err.to_string(),
            "Validation error in field 'tested': must not be negative"
        );
    }

    #[test]
    fn test_error_mapper_not_found() {
        let db_err = DbErr::RecordNotFound("Production run with id '42' not found".to_string());

        match ErrorMapper::map_db_error(db_err, "production_run") {
            BusinessError::NotFound { resource, id } => {
                assert_eq!(resource, "production run");
                assert_eq!(id, "42");
            }
            other => panic!("Expected not found error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_mapper_custom_is_internal() {
        let db_err = DbErr::Custom("something odd".to_string());
        assert!(matches!(
            ErrorMapper::map_db_error(db_err, "inventory_item"),
            BusinessError::InternalError { .. }
        ));
    }

    #[test]
    fn test_constraint_message_maps_to_duplicate() {
        let err = ErrorMapper::map_constraint(
            "error returned from database: UNIQUE constraint failed: inventory.item_code",
            "inventory_item",
        );
        match err {
            BusinessError::Duplicate { resource, field } => {
                assert_eq!(resource, "inventory item");
                assert_eq!(field, "item_code");
            }
            other => panic!("Expected duplicate error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_response_shape() {
        let response = not_found!("Quality control entry", 7).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
        assert_eq!(body["error"]["type"], "NotFound");
        assert_eq!(
            body["error"]["message"],
            "Quality control entry with id '7' not found"
        );
    }
}

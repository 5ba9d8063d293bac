use actix_web::{HttpResponse, error::InternalError};
use serde::Serialize;
use validator::ValidationErrors;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub fields: serde_json::Value,
}

impl ErrorResponse {
    pub fn message(error: &str, message: impl Into<String>) -> Self {
        ErrorResponse {
            error: error.to_string(),
            fields: serde_json::json!({"message": message.into()}),
        }
    }
}

/// Collect validator messages per field as `{"field": {"errors": [...]}}`
pub fn field_errors(errors: &ValidationErrors) -> serde_json::Map<String, serde_json::Value> {
    let mut fields = serde_json::Map::new();

    for (field, errors) in errors.field_errors() {
        let messages: Vec<String> = errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Validation error in field: {}", field))
            })
            .collect();
        fields.insert(field.to_string(), serde_json::json!({"errors": messages}));
    }

    fields
}

/// Turn a serde error from a request body or query string into a message
/// a client can act on.
fn describe_deserialize_error(err_string: &str) -> String {
    if err_string.contains("EOF while parsing") {
        "Request body is empty. Expected JSON payload".to_string()
    } else if err_string.contains("unknown variant") {
        format!(
            "Invalid enum value. Check allowed values for this field ({})",
            err_string
        )
    } else if err_string.contains("missing field") {
        format!("Required field missing: {}", err_string)
    } else {
        format!("Invalid request format: {}", err_string)
    }
}

fn bad_request(error_response: ErrorResponse) -> actix_web::Error {
    InternalError::from_response("", HttpResponse::BadRequest().json(error_response)).into()
}

fn extractor_error(err: actix_web_validator::Error) -> actix_web::Error {
    match err {
        actix_web_validator::Error::Validate(validation_errors) => bad_request(ErrorResponse {
            error: "Validation failed".to_string(),
            fields: serde_json::Value::Object(field_errors(&validation_errors)),
        }),
        actix_web_validator::Error::Deserialize(de_err) => bad_request(ErrorResponse::message(
            "Request validation failed",
            describe_deserialize_error(&de_err.to_string()),
        )),
        other => bad_request(ErrorResponse::message(
            "Request validation failed",
            other.to_string(),
        )),
    }
}

/// JSON body extractor config shared by every JSON endpoint
pub fn json_config(limit: usize) -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| extractor_error(err))
}

/// Query string extractor config shared by every filtered endpoint
pub fn query_config() -> actix_web_validator::QueryConfig {
    actix_web_validator::QueryConfig::default().error_handler(|err, _req| extractor_error(err))
}

/// Path segments that fail to parse (e.g. a malformed job id) name no
/// resource, so they answer 404 with the usual error body.
pub fn path_config() -> actix_web::web::PathConfig {
    actix_web::web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorResponse::message(
            "Not found",
            format!("No resource at this path: {}", err),
        ));
        InternalError::from_response(err, response).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_errors_get_specific_messages() {
        assert_eq!(
            describe_deserialize_error("EOF while parsing a value at line 1 column 0"),
            "Request body is empty. Expected JSON payload"
        );
        assert!(describe_deserialize_error("unknown variant `Freelance`, expected one of ...")
            .starts_with("Invalid enum value"));
        assert!(describe_deserialize_error("missing field `title` at line 1 column 2")
            .contains("`title`"));
        assert!(describe_deserialize_error("premature end of input")
            .starts_with("Invalid request format"));
    }
}

use std::collections::HashMap;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use receive_contact_core::contract::{validate_submission, InboundRequest, StoredRecord};
use receive_contact_core::decode::decode_submission;

use crate::adapters::notify::ContactNotifier;
use crate::adapters::store::SubmissionStore;
use crate::adapters::verify::HumanVerifier;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

/// Run one submission through the pipeline: decode, validate, verify, store,
/// notify. Every stage failure short-circuits into a categorized response;
/// nothing after the failing stage executes and nothing is rolled back.
pub fn handle_contact_event(
    event: Value,
    verifier: &impl HumanVerifier,
    store: &impl SubmissionStore,
    notifier: &impl ContactNotifier,
) -> ApiGatewayResponse {
    let started_at = Instant::now();

    let request = match inbound_request_from_event(&event) {
        Ok(value) => value,
        Err(message) => {
            log_stage_failure("decode", &message);
            return error_response(400, "failed to parse request");
        }
    };

    let submission = match decode_submission(&request) {
        Ok(value) => value,
        Err(error) => {
            log_stage_failure("decode", error.message());
            return error_response(400, "failed to parse request");
        }
    };

    let submission = match validate_submission(submission) {
        Ok(value) => value,
        Err(error) => {
            log_stage_failure("validate", error.message());
            return error_response(400, error.message());
        }
    };

    if !verifier.verify_token(&submission.verification_token) {
        log_stage_failure("verify", "verification token rejected");
        return error_response(400, "human verification failed");
    }

    let record = StoredRecord::from_submission(
        submission,
        Uuid::new_v4().to_string(),
        chrono::Utc::now().to_rfc3339(),
    );

    if let Err(error) = store.put_record(&record) {
        log_stage_failure("store", &error);
        return error_response(500, "failed to store submission");
    }

    if let Err(error) = notifier.send_notification(&record) {
        log_stage_failure("notify", &error);
        return error_response(500, "failed to send notification");
    }

    log_contact_info(
        "submission_processed",
        json!({
            "record_id": record.id,
            "received_at": record.received_at,
            "duration_ms": started_at.elapsed().as_millis(),
        }),
    );

    success_response(200, json!({ "message": "submission received" }))
}

fn inbound_request_from_event(event: &Value) -> Result<InboundRequest, String> {
    let Some(object) = event.as_object() else {
        return Err("request event must be a JSON object".to_string());
    };

    let mut headers = HashMap::new();
    if let Some(Value::Object(map)) = object.get("headers") {
        for (key, value) in map {
            if let Some(text) = value.as_str() {
                headers.insert(key.clone(), text.to_string());
            }
        }
    }

    let body = match object.get("body") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(_) => return Err("request body must be a string".to_string()),
    };

    let is_base64_encoded = object
        .get("isBase64Encoded")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    Ok(InboundRequest {
        headers,
        body,
        is_base64_encoded,
    })
}

/// Fixed response for configuration read failures. Produced before any user
/// data is touched.
pub fn config_error_response() -> ApiGatewayResponse {
    error_response(500, "server configuration error")
}

fn response_headers() -> Value {
    json!({
        "Content-Type": "application/json",
        "Access-Control-Allow-Origin": "*",
    })
}

fn success_response(status_code: u16, payload: impl Serialize) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: response_headers(),
        body: serde_json::to_string(&payload).expect("response payload should serialize"),
    }
}

fn error_response(status_code: u16, message: &str) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: response_headers(),
        body: json!({ "error": message }).to_string(),
    }
}

fn log_stage_failure(stage: &str, error: &str) {
    log_contact_error(
        "stage_failed",
        json!({
            "stage": stage,
            "error": error,
        }),
    );
}

fn log_contact_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "contact_handler",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_contact_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "contact_handler",
            "level": "error",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

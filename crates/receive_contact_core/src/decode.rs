use std::collections::HashMap;
use std::convert::Infallible;

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine as _;
use multer::Multipart;

use crate::contract::{ContactSubmission, InboundRequest};

const MULTIPART_MEDIA_TYPE: &str = "multipart/form-data";

/// Errors encountered while turning a raw request into a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    message: String,
}

impl DecodeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for DecodeError {}

/// Look up a header by name, tolerating arbitrary casing from upstream
/// transports: exact match first, then a case-insensitive scan.
pub fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    if let Some(value) = headers.get(name) {
        return Some(value);
    }

    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Decode an inbound request into a whitespace-trimmed submission. Supports
/// JSON and multipart/form-data bodies, with optional base64 transport
/// encoding applied before either interpretation.
pub fn decode_submission(request: &InboundRequest) -> Result<ContactSubmission, DecodeError> {
    let body = transport_body(request)?;
    let content_type = header_value(&request.headers, "Content-Type").unwrap_or("");

    if is_multipart(content_type) {
        decode_multipart(body, content_type)
    } else {
        decode_json(&body)
    }
}

fn transport_body(request: &InboundRequest) -> Result<Vec<u8>, DecodeError> {
    if request.is_base64_encoded {
        BASE64_STANDARD
            .decode(request.body.as_bytes())
            .map_err(|error| DecodeError::new(format!("invalid base64 body: {error}")))
    } else {
        Ok(request.body.clone().into_bytes())
    }
}

fn is_multipart(content_type: &str) -> bool {
    content_type
        .to_ascii_lowercase()
        .starts_with(MULTIPART_MEDIA_TYPE)
}

fn decode_json(body: &[u8]) -> Result<ContactSubmission, DecodeError> {
    let submission: ContactSubmission = serde_json::from_slice(body)
        .map_err(|error| DecodeError::new(format!("malformed JSON body: {error}")))?;
    Ok(submission.trimmed())
}

fn decode_multipart(body: Vec<u8>, content_type: &str) -> Result<ContactSubmission, DecodeError> {
    let boundary = multer::parse_boundary(content_type)
        .map_err(|error| DecodeError::new(format!("invalid multipart content type: {error}")))?;

    futures::executor::block_on(async move {
        let stream = futures::stream::once(async move { Ok::<_, Infallible>(body) });
        let mut multipart = Multipart::new(stream, boundary);
        let mut submission = ContactSubmission::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|error| DecodeError::new(format!("malformed multipart body: {error}")))?
        {
            let field_name = field.name().map(str::to_string);
            let value = field
                .text()
                .await
                .map_err(|error| DecodeError::new(format!("unreadable multipart part: {error}")))?;
            let value = value.trim().to_string();

            match field_name.as_deref() {
                Some("name") => submission.name = value,
                Some("email") => submission.email = value,
                Some("subject") => submission.subject = value,
                Some("message") => submission.message = value,
                Some("verificationToken") | Some("recaptchaToken") => {
                    submission.verification_token = value;
                }
                _ => {}
            }
        }

        Ok(submission)
    })
}

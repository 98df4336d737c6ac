use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const MAX_EMAIL_LEN: usize = 256;
pub const MAX_MESSAGE_LEN: usize = 2000;

/// One inbound invocation as seen by the decode pipeline: a header bag, a
/// body, and whether the body arrived base64 transport-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    pub headers: HashMap<String, String>,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// A decoded contact-form payload. Wire names follow the public form contract:
/// the token field is `recaptchaToken` in JSON bodies and `verificationToken`
/// in multipart bodies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(rename = "recaptchaToken", alias = "verificationToken")]
    pub verification_token: String,
}

impl ContactSubmission {
    /// Strip surrounding whitespace from every field.
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
            verification_token: self.verification_token.trim().to_string(),
        }
    }
}

/// The durable shape of an accepted submission. Written once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub received_at: String,
}

impl StoredRecord {
    pub fn from_submission(submission: ContactSubmission, id: String, received_at: String) -> Self {
        Self {
            id,
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            received_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Enforce field presence and bounds on a decoded, trimmed submission. The
/// first violated rule wins and its message is the user-facing string.
pub fn validate_submission(
    submission: ContactSubmission,
) -> Result<ContactSubmission, ValidationError> {
    if submission.name.is_empty()
        || submission.email.is_empty()
        || submission.subject.is_empty()
        || submission.message.is_empty()
        || submission.verification_token.is_empty()
    {
        return Err(ValidationError::new("required fields missing"));
    }

    if submission.email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::new("invalid email"));
    }

    if submission.message.len() > MAX_MESSAGE_LEN {
        return Err(ValidationError::new("message too long"));
    }

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_submission() -> ContactSubmission {
        ContactSubmission {
            name: "Alice".to_string(),
            email: "a@example.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
            verification_token: "tok123".to_string(),
        }
    }

    #[test]
    fn validate_accepts_complete_submission() {
        let submission = sample_submission();
        let validated = validate_submission(submission.clone()).expect("submission should pass");
        assert_eq!(validated, submission);
    }

    #[test]
    fn validate_rejects_any_empty_field() {
        for field in ["name", "email", "subject", "message", "token"] {
            let mut submission = sample_submission();
            match field {
                "name" => submission.name.clear(),
                "email" => submission.email.clear(),
                "subject" => submission.subject.clear(),
                "message" => submission.message.clear(),
                _ => submission.verification_token.clear(),
            }

            let error = validate_submission(submission).expect_err("submission should fail");
            assert_eq!(error.message(), "required fields missing");
        }
    }

    #[test]
    fn validate_enforces_email_bound() {
        let mut submission = sample_submission();
        submission.email = "a".repeat(MAX_EMAIL_LEN + 1);
        let error = validate_submission(submission).expect_err("submission should fail");
        assert_eq!(error.message(), "invalid email");

        let mut submission = sample_submission();
        submission.email = "a".repeat(MAX_EMAIL_LEN);
        validate_submission(submission).expect("boundary-length email should pass");
    }

    #[test]
    fn validate_enforces_message_bound() {
        let mut submission = sample_submission();
        submission.message = "m".repeat(MAX_MESSAGE_LEN + 1);
        let error = validate_submission(submission).expect_err("submission should fail");
        assert_eq!(error.message(), "message too long");

        let mut submission = sample_submission();
        submission.message = "m".repeat(MAX_MESSAGE_LEN);
        validate_submission(submission).expect("boundary-length message should pass");
    }

    #[test]
    fn empty_field_precedes_length_rules() {
        let mut submission = sample_submission();
        submission.name.clear();
        submission.email = "a".repeat(MAX_EMAIL_LEN + 1);
        submission.message = "m".repeat(MAX_MESSAGE_LEN + 1);

        let error = validate_submission(submission).expect_err("submission should fail");
        assert_eq!(error.message(), "required fields missing");
    }

    #[test]
    fn trimmed_strips_surrounding_whitespace() {
        let submission = ContactSubmission {
            name: "  Alice \n".to_string(),
            email: "\ta@example.com".to_string(),
            subject: "Hi ".to_string(),
            message: " Hello ".to_string(),
            verification_token: " tok123 ".to_string(),
        };

        assert_eq!(submission.trimmed(), sample_submission());
    }

    #[test]
    fn stored_record_copies_submission_fields_verbatim() {
        let record = StoredRecord::from_submission(
            sample_submission(),
            "id-1".to_string(),
            "2026-08-07T00:00:00+00:00".to_string(),
        );

        assert_eq!(record.id, "id-1");
        assert_eq!(record.name, "Alice");
        assert_eq!(record.email, "a@example.com");
        assert_eq!(record.subject, "Hi");
        assert_eq!(record.message, "Hello");
        assert_eq!(record.received_at, "2026-08-07T00:00:00+00:00");
    }

    #[test]
    fn submission_json_uses_recaptcha_token_wire_name() {
        let submission: ContactSubmission = serde_json::from_str(
            r#"{"name":"Alice","email":"a@example.com","subject":"Hi","message":"Hello","recaptchaToken":"tok123"}"#,
        )
        .expect("payload should parse");
        assert_eq!(submission, sample_submission());

        let aliased: ContactSubmission = serde_json::from_str(
            r#"{"name":"Alice","email":"a@example.com","subject":"Hi","message":"Hello","verificationToken":"tok123"}"#,
        )
        .expect("aliased payload should parse");
        assert_eq!(aliased, sample_submission());
    }

    #[test]
    fn submission_json_tolerates_missing_fields() {
        let submission: ContactSubmission =
            serde_json::from_str(r#"{"name":"Alice"}"#).expect("partial payload should parse");
        assert_eq!(submission.name, "Alice");
        assert!(submission.verification_token.is_empty());
    }
}

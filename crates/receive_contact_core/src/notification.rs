use crate::contract::StoredRecord;

/// Subject line for the operator notification email.
pub fn notification_subject(record: &StoredRecord) -> String {
    format!("[Contact] {}", record.subject)
}

/// Plain-text notification body: submitter identity, receipt timestamp, and
/// the message itself under a divider.
pub fn notification_body(record: &StoredRecord) -> String {
    format!(
        "A new contact form submission has been received.\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\
         Received: {}\n\
         \n\
         --- Message ---\n\
         {}\n",
        record.name, record.email, record.subject, record.received_at, record.message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> StoredRecord {
        StoredRecord {
            id: "id-1".to_string(),
            name: "Alice".to_string(),
            email: "a@example.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello there".to_string(),
            received_at: "2026-08-07T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn subject_carries_submission_subject() {
        assert_eq!(notification_subject(&sample_record()), "[Contact] Hi");
    }

    #[test]
    fn body_carries_every_notification_field() {
        let body = notification_body(&sample_record());

        assert!(body.contains("Name: Alice"));
        assert!(body.contains("Email: a@example.com"));
        assert!(body.contains("Subject: Hi"));
        assert!(body.contains("Received: 2026-08-07T00:00:00+00:00"));
        assert!(body.contains("--- Message ---\nHello there"));
    }
}

use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_ses::types::{Body, Content, Destination, Message};
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::{json, Value};

use receive_contact_core::contract::StoredRecord;
use receive_contact_core::notification::{notification_body, notification_subject};
use receive_contact_lambda::adapters::notify::ContactNotifier;
use receive_contact_lambda::adapters::store::SubmissionStore;
use receive_contact_lambda::adapters::verify::RecaptchaVerifier;
use receive_contact_lambda::handlers::contact::{
    config_error_response, handle_contact_event, ApiGatewayResponse,
};

struct RuntimeConfig {
    table_name: String,
    from_email: String,
    to_email: String,
    recaptcha_secret: String,
    region: Option<String>,
}

impl RuntimeConfig {
    fn from_env() -> Result<Self, String> {
        Ok(Self {
            table_name: required_env("TABLE_NAME")?,
            from_email: required_env("FROM_EMAIL")?,
            to_email: required_env("TO_EMAIL")?,
            recaptcha_secret: required_env("RECAPTCHA_SECRET_KEY")?,
            region: std::env::var("REGION")
                .ok()
                .filter(|value| !value.trim().is_empty()),
        })
    }
}

fn required_env(name: &str) -> Result<String, String> {
    std::env::var(name).map_err(|_| format!("{name} must be configured"))
}

struct DynamoDbSubmissionStore {
    table_name: String,
    dynamodb_client: aws_sdk_dynamodb::Client,
}

impl SubmissionStore for DynamoDbSubmissionStore {
    fn put_record(&self, record: &StoredRecord) -> Result<(), String> {
        let table_name = self.table_name.clone();
        let record = record.clone();
        let client = self.dynamodb_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .item("id", AttributeValue::S(record.id))
                    .item("name", AttributeValue::S(record.name))
                    .item("email", AttributeValue::S(record.email))
                    .item("subject", AttributeValue::S(record.subject))
                    .item("message", AttributeValue::S(record.message))
                    .item("received_at", AttributeValue::S(record.received_at))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to write record to dynamodb: {error}"))
            })
        })
    }
}

struct SesContactNotifier {
    from_email: String,
    to_email: String,
    ses_client: aws_sdk_ses::Client,
}

impl ContactNotifier for SesContactNotifier {
    fn send_notification(&self, record: &StoredRecord) -> Result<(), String> {
        let from_email = self.from_email.clone();
        let to_email = self.to_email.clone();
        let reply_to = record.email.clone();
        let subject = notification_subject(record);
        let body = notification_body(record);
        let client = self.ses_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let subject = Content::builder()
                    .data(subject)
                    .build()
                    .map_err(|error| format!("failed to build notification subject: {error}"))?;
                let text = Content::builder()
                    .data(body)
                    .build()
                    .map_err(|error| format!("failed to build notification body: {error}"))?;
                let message = Message::builder()
                    .subject(subject)
                    .body(Body::builder().text(text).build())
                    .build();

                client
                    .send_email()
                    .source(from_email)
                    .destination(Destination::builder().to_addresses(to_email).build())
                    .message(message)
                    .reply_to_addresses(reply_to)
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(|error| format!("failed to send notification email: {error}"))
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    let config = match RuntimeConfig::from_env() {
        Ok(value) => value,
        Err(message) => {
            eprintln!(
                "{}",
                json!({
                    "component": "contact_lambda",
                    "level": "error",
                    "event": "stage_failed",
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                    "details": { "stage": "config", "error": message },
                })
            );
            return Ok(config_error_response());
        }
    };

    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
    if let Some(region) = config.region.clone() {
        loader = loader.region(aws_config::Region::new(region));
    }
    let aws_config = loader.load().await;

    let store = DynamoDbSubmissionStore {
        table_name: config.table_name.clone(),
        dynamodb_client: aws_sdk_dynamodb::Client::new(&aws_config),
    };
    let notifier = SesContactNotifier {
        from_email: config.from_email.clone(),
        to_email: config.to_email.clone(),
        ses_client: aws_sdk_ses::Client::new(&aws_config),
    };
    let verifier = RecaptchaVerifier::new(config.recaptcha_secret);

    Ok(handle_contact_event(event.payload, &verifier, &store, &notifier))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}

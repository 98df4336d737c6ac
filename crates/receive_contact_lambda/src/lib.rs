//! AWS-oriented adapters and handlers for contact-form intake.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! DynamoDB and SES adapters, and the reCAPTCHA verification client) around
//! the deterministic pipeline in `receive_contact_core`.

pub mod adapters;
pub mod handlers;

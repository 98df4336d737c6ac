//! Contact-form intake domain primitives.
//!
//! This crate owns deterministic request decoding, submission validation, and
//! notification composition together with the request/record contracts. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.

pub mod contract;
pub mod decode;
pub mod notification;

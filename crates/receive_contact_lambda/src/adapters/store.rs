use receive_contact_core::contract::StoredRecord;

/// Durable keyed persistence for accepted submissions. One write per record,
/// no retry, no read path.
pub trait SubmissionStore {
    fn put_record(&self, record: &StoredRecord) -> Result<(), String>;
}

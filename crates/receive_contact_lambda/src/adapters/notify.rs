use receive_contact_core::contract::StoredRecord;

/// Outbound notification dispatch for an accepted submission. Exactly one
/// send attempt per record.
pub trait ContactNotifier {
    fn send_notification(&self, record: &StoredRecord) -> Result<(), String>;
}

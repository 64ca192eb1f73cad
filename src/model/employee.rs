use sqlx::FromRow;

/// The slice of an employee row the ledger needs to attribute an event.
///
/// The directory table itself is owned by the HR system; this service only
/// reads it, so the struct stays deliberately small.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct DirectoryEntry {
    pub employee_id: u64,
    pub is_active: bool,
}

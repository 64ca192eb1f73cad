use chrono::{NaiveDate, NaiveTime};
use sqlx::MySqlPool;

use crate::model::attendance::UpdateAttendance;


/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, PartialEq)]
pub enum SqlValue {
    U64(u64),
    Bool(bool),
    Date(NaiveDate),
    Time(NaiveTime),
    String(String),
}


/// ===============================
/// SQL update container
/// ===============================
#[derive(Debug)]
pub struct SqlUpdate {
    pub sql: String,
    pub values: Vec<SqlValue>,
}


/// ===============================
/// Build the attendance UPDATE
/// ===============================
/// Walks the typed patch field by field, so the column list is fixed at
/// compile time and client-supplied keys never reach the SQL text. Returns
/// `None` when the patch carries no fields.
pub fn build_attendance_update(changes: &UpdateAttendance, id: u64) -> Option<SqlUpdate> {
    let mut assignments: Vec<&str> = Vec::new();
    let mut values: Vec<SqlValue> = Vec::new();

    if let Some(employee_id) = changes.employee_id {
        assignments.push("employee_id = ?");
        values.push(SqlValue::U64(employee_id));
    }
    if let Some(date) = changes.date {
        assignments.push("date = ?");
        values.push(SqlValue::Date(date));
    }
    if let Some(entry_time) = changes.entry_time {
        assignments.push("entry_time = ?");
        values.push(SqlValue::Time(entry_time));
    }
    if let Some(exit_time) = changes.exit_time {
        assignments.push("exit_time = ?");
        values.push(SqlValue::Time(exit_time));
    }
    if let Some(entry_manual) = changes.entry_manual {
        assignments.push("entry_manual = ?");
        values.push(SqlValue::Bool(entry_manual));
    }
    if let Some(exit_manual) = changes.exit_manual {
        assignments.push("exit_manual = ?");
        values.push(SqlValue::Bool(exit_manual));
    }
    if let Some(permiso) = &changes.permiso {
        assignments.push("permiso = ?");
        values.push(SqlValue::String(permiso.clone()));
    }

    if assignments.is_empty() {
        return None;
    }

    let sql = format!(
        "UPDATE attendance SET {} WHERE id = ?",
        assignments.join(", ")
    );

    // WHERE id = ?
    values.push(SqlValue::U64(id));

    Some(SqlUpdate { sql, values })
}


/// ===============================
/// Execute the update
/// ===============================
pub async fn execute_update(pool: &MySqlPool, update: SqlUpdate) -> Result<u64, sqlx::Error> {
    let mut query = sqlx::query(&update.sql);

    for value in update.values {
        query = match value {
            SqlValue::U64(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::Time(v) => query.bind(v),
            SqlValue::String(v) => query.bind(v),
        };
    }

    let result = query.execute(pool).await?;
    Ok(result.rows_affected())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_patch_builds_only_the_given_columns() {
        let changes = UpdateAttendance {
            exit_time: NaiveTime::from_hms_opt(17, 30, 0),
            exit_manual: Some(true),
            ..UpdateAttendance::default()
        };

        let update = build_attendance_update(&changes, 7).expect("non-empty patch");
        assert_eq!(
            update.sql,
            "UPDATE attendance SET exit_time = ?, exit_manual = ? WHERE id = ?"
        );
        assert_eq!(
            update.values,
            vec![
                SqlValue::Time(NaiveTime::from_hms_opt(17, 30, 0).unwrap()),
                SqlValue::Bool(true),
                SqlValue::U64(7),
            ]
        );
    }

    #[test]
    fn full_patch_lists_columns_in_declaration_order() {
        let changes = UpdateAttendance {
            employee_id: Some(42),
            date: NaiveDate::from_ymd_opt(2024, 3, 1),
            entry_time: NaiveTime::from_hms_opt(8, 0, 0),
            exit_time: NaiveTime::from_hms_opt(17, 0, 0),
            entry_manual: Some(false),
            exit_manual: Some(false),
            permiso: Some("authorized absence".to_string()),
        };

        let update = build_attendance_update(&changes, 1).expect("non-empty patch");
        assert_eq!(
            update.sql,
            "UPDATE attendance SET employee_id = ?, date = ?, entry_time = ?, \
             exit_time = ?, entry_manual = ?, exit_manual = ?, permiso = ? WHERE id = ?"
        );
        assert_eq!(update.values.len(), 8);
        assert_eq!(update.values.last(), Some(&SqlValue::U64(1)));
    }

    #[test]
    fn empty_patch_builds_nothing() {
        assert!(build_attendance_update(&UpdateAttendance::default(), 7).is_none());
    }
}

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::MySqlPool;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

use crate::directory;
use crate::model::attendance::{AttendanceRecord, DailySummary, OpenShift};

/// Clock event kind as it arrives on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum EventKind {
    Entrada,
    Salida,
}

/// What the ledger did with a clock event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RegisterOutcome {
    Created,
    AlreadyRegistered,
    Closed,
    NoOpenRecord,
}

impl RegisterOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterOutcome::Created => "created",
            RegisterOutcome::AlreadyRegistered => "already_registered",
            RegisterOutcome::Closed => "closed",
            RegisterOutcome::NoOpenRecord => "no_open_record",
        }
    }
}

/// Applies one clock event to the ledger.
///
/// An entry is a plain INSERT; the `(employee_id, date)` unique key turns a
/// repeat into `AlreadyRegistered` without a read-then-write window. An exit
/// only lands on a row whose `exit_time` is still NULL; zero rows affected
/// means there was nothing to close.
pub async fn register_event(
    pool: &MySqlPool,
    employee_id: u64,
    kind: EventKind,
    date: NaiveDate,
    time: NaiveTime,
    manual: bool,
) -> Result<RegisterOutcome, sqlx::Error> {
    match kind {
        EventKind::Entrada => {
            let result = sqlx::query(
                r#"
                INSERT INTO attendance (employee_id, date, entry_time, entry_manual)
                VALUES (?, ?, ?, ?)
                "#,
            )
            .bind(employee_id)
            .bind(date)
            .bind(time)
            .bind(manual)
            .execute(pool)
            .await;

            match result {
                Ok(_) => Ok(RegisterOutcome::Created),

                // Duplicate entry for the same employee and date
                Err(sqlx::Error::Database(db_err))
                    if db_err.code().as_deref() == Some("23000") =>
                {
                    Ok(RegisterOutcome::AlreadyRegistered)
                }

                Err(e) => Err(e),
            }
        }

        EventKind::Salida => {
            let result = sqlx::query(
                r#"
                UPDATE attendance
                SET exit_time = ?, exit_manual = ?
                WHERE employee_id = ?
                AND date = ?
                AND exit_time IS NULL
                "#,
            )
            .bind(time)
            .bind(manual)
            .bind(employee_id)
            .bind(date)
            .execute(pool)
            .await?;

            if result.rows_affected() == 0 {
                return Ok(RegisterOutcome::NoOpenRecord);
            }

            Ok(RegisterOutcome::Closed)
        }
    }
}

/// Stamps an exit on every record of the day that is still open and reports
/// how many rows that touched. Safe to repeat; an already-closed day simply
/// matches nothing.
pub async fn close_shift(
    pool: &MySqlPool,
    date: NaiveDate,
    close_time: NaiveTime,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE attendance
        SET exit_time = ?
        WHERE date = ?
        AND exit_time IS NULL
        "#,
    )
    .bind(close_time)
    .bind(date)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}

pub async fn records_for_date(
    pool: &MySqlPool,
    date: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT a.id, a.employee_id, a.date, a.entry_time, a.exit_time,
               a.entry_manual, a.exit_manual, a.permiso,
               e.name AS employee_name, e.position
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        WHERE a.date = ?
        ORDER BY e.name
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await
}

/// History for one employee, newest day first.
pub async fn records_for_employee(
    pool: &MySqlPool,
    employee_id: u64,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT a.id, a.employee_id, a.date, a.entry_time, a.exit_time,
               a.entry_manual, a.exit_manual, a.permiso,
               e.name AS employee_name, e.position
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        WHERE a.employee_id = ?
        AND a.date BETWEEN ? AND ?
        ORDER BY a.date DESC
        "#,
    )
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await
}

/// Records of the day whose exit has not been stamped yet.
pub async fn open_shifts(
    pool: &MySqlPool,
    date: NaiveDate,
) -> Result<Vec<OpenShift>, sqlx::Error> {
    sqlx::query_as::<_, OpenShift>(
        r#"
        SELECT e.identity_number, e.name, a.entry_time
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        WHERE a.date = ?
        AND a.exit_time IS NULL
        ORDER BY a.entry_time
        "#,
    )
    .bind(date)
    .fetch_all(pool)
    .await
}

pub async fn record_by_id(
    pool: &MySqlPool,
    id: u64,
) -> Result<Option<AttendanceRecord>, sqlx::Error> {
    sqlx::query_as::<_, AttendanceRecord>(
        r#"
        SELECT a.id, a.employee_id, a.date, a.entry_time, a.exit_time,
               a.entry_manual, a.exit_manual, a.permiso,
               e.name AS employee_name, e.position
        FROM attendance a
        JOIN employees e ON e.id = a.employee_id
        WHERE a.id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Counts attendance for one date against the active directory.
pub async fn daily_summary(
    pool: &MySqlPool,
    date: NaiveDate,
) -> Result<DailySummary, sqlx::Error> {
    let total = directory::active_count(pool).await?;

    let asistieron = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT employee_id)
        FROM attendance
        WHERE date = ?
        AND entry_time IS NOT NULL
        "#,
    )
    .bind(date)
    .fetch_one(pool)
    .await?;

    let en_turno = sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(DISTINCT employee_id)
        FROM attendance
        WHERE date = ?
        AND entry_time IS NOT NULL
        AND exit_time IS NULL
        "#,
    )
    .bind(date)
    .fetch_one(pool)
    .await?;

    Ok(DailySummary::from_counts(date, total, asistieron, en_turno))
}

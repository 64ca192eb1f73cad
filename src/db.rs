use std::time::Duration;

use sqlx::MySqlPool;
use sqlx::mysql::MySqlPoolOptions;

const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
    identity_number VARCHAR(50) NOT NULL,
    name VARCHAR(150) NOT NULL,
    position VARCHAR(100) NULL,
    is_active BOOLEAN NOT NULL DEFAULT TRUE,
    PRIMARY KEY (id),
    UNIQUE KEY uq_employees_identity (identity_number)
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const CREATE_ATTENDANCE: &str = r#"
CREATE TABLE IF NOT EXISTS attendance (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
    employee_id BIGINT UNSIGNED NOT NULL,
    date DATE NOT NULL,
    entry_time TIME NULL,
    exit_time TIME NULL,
    entry_manual BOOLEAN NOT NULL DEFAULT FALSE,
    exit_manual BOOLEAN NOT NULL DEFAULT FALSE,
    permiso VARCHAR(255) NULL,
    PRIMARY KEY (id),
    UNIQUE KEY uq_attendance_employee_date (employee_id, date),
    KEY idx_attendance_date (date),
    CONSTRAINT fk_attendance_employee FOREIGN KEY (employee_id)
        REFERENCES employees (id) ON DELETE CASCADE
) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

pub async fn init_db(database_url: &str, max_connections: u32) -> MySqlPool {
    let pool = MySqlPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .expect("Failed to connect to database");

    ensure_schema(&pool)
        .await
        .expect("Failed to ensure database schema");

    pool
}

/// Creates the tables on first boot. The unique key on (employee_id, date)
/// is what turns a repeated entry into a conflict instead of a second row.
async fn ensure_schema(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_EMPLOYEES).execute(pool).await?;
    sqlx::query(CREATE_ATTENDANCE).execute(pool).await?;
    Ok(())
}

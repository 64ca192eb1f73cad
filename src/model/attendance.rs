use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One attendance row joined with the employee's display attributes.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": 42,
        "date": "2024-03-01",
        "entry_time": "08:00:00",
        "exit_time": "17:00:00",
        "entry_manual": false,
        "exit_manual": false,
        "permiso": null,
        "employee_name": "Maria Lopez",
        "position": "Operator"
    })
)]
pub struct AttendanceRecord {
    #[schema(example = 1)]
    pub id: u64,

    #[schema(example = 42)]
    pub employee_id: u64,

    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub date: NaiveDate,

    #[schema(example = "08:00:00", value_type = Option<String>, nullable = true)]
    pub entry_time: Option<NaiveTime>,

    #[schema(example = "17:00:00", value_type = Option<String>, nullable = true)]
    pub exit_time: Option<NaiveTime>,

    pub entry_manual: bool,

    pub exit_manual: bool,

    /// Authorized leave/exemption marker, free text.
    #[schema(example = "medical appointment", nullable = true)]
    pub permiso: Option<String>,

    #[schema(example = "Maria Lopez")]
    pub employee_name: String,

    #[schema(example = "Operator", nullable = true)]
    pub position: Option<String>,
}

/// A record still missing its exit event for the day.
#[derive(Debug, Serialize, sqlx::FromRow, ToSchema)]
pub struct OpenShift {
    #[schema(example = "0801199012345")]
    pub identity_number: String,

    #[schema(example = "Maria Lopez")]
    pub name: String,

    #[schema(example = "08:00:00", value_type = Option<String>, nullable = true)]
    pub entry_time: Option<NaiveTime>,
}

/// Aggregated attendance statistics for one date. Derived on demand, never
/// stored. Field names are the wire contract consumed by the dashboards.
#[derive(Debug, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "fecha": "2024-03-01",
        "total_empleados": 10,
        "asistieron": 7,
        "faltaron": 3,
        "porcentaje_asistencia": 70,
        "porcentaje_faltas": 30,
        "con_permiso": 0,
        "empleados_activos": 2
    })
)]
pub struct DailySummary {
    #[schema(example = "2024-03-01", value_type = String, format = "date")]
    pub fecha: NaiveDate,
    #[schema(example = 10)]
    pub total_empleados: i64,
    #[schema(example = 7)]
    pub asistieron: i64,
    #[schema(example = 3)]
    pub faltaron: i64,
    #[schema(example = 70)]
    pub porcentaje_asistencia: i64,
    #[schema(example = 30)]
    pub porcentaje_faltas: i64,
    /// Reserved; leave-marker aggregation is not computed yet.
    #[schema(example = 0)]
    pub con_permiso: i64,
    /// Employees currently on shift (entry registered, no exit).
    #[schema(example = 2)]
    pub empleados_activos: i64,
}

impl DailySummary {
    /// Builds the summary from the raw counts.
    ///
    /// `faltaron` is plain subtraction and may go negative when attendance
    /// rows reference employees that were since deactivated; that is left
    /// visible on purpose. With no active employees both percentages keep
    /// their 0/100 split.
    pub fn from_counts(fecha: NaiveDate, total: i64, asistieron: i64, en_turno: i64) -> Self {
        let faltaron = total - asistieron;
        let porcentaje_asistencia = if total > 0 {
            ((asistieron as f64 / total as f64) * 100.0).round() as i64
        } else {
            0
        };
        let porcentaje_faltas = 100 - porcentaje_asistencia;

        DailySummary {
            fecha,
            total_empleados: total,
            asistieron,
            faltaron,
            porcentaje_asistencia,
            porcentaje_faltas,
            con_permiso: 0,
            empleados_activos: en_turno,
        }
    }
}

/// Field patch for `PUT /attendance/{id}`.
///
/// Every updatable column is an explicit optional; only fields present in the
/// payload are written. Absent and `null` both mean "leave unchanged".
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateAttendance {
    #[schema(example = 42)]
    pub employee_id: Option<u64>,
    #[schema(example = "2024-03-01", value_type = Option<String>, format = "date")]
    pub date: Option<NaiveDate>,
    #[schema(example = "08:15:00", value_type = Option<String>)]
    pub entry_time: Option<NaiveTime>,
    #[schema(example = "17:30:00", value_type = Option<String>)]
    pub exit_time: Option<NaiveTime>,
    pub entry_manual: Option<bool>,
    pub exit_manual: Option<bool>,
    #[schema(example = "authorized absence")]
    pub permiso: Option<String>,
}

impl UpdateAttendance {
    pub fn is_empty(&self) -> bool {
        self.employee_id.is_none()
            && self.date.is_none()
            && self.entry_time.is_none()
            && self.exit_time.is_none()
            && self.entry_manual.is_none()
            && self.exit_manual.is_none()
            && self.permiso.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn summary_for_a_typical_day() {
        // 10 active employees, 7 clocked in, 2 of them still on shift
        let summary = DailySummary::from_counts(date(2024, 3, 1), 10, 7, 2);
        assert_eq!(
            summary,
            DailySummary {
                fecha: date(2024, 3, 1),
                total_empleados: 10,
                asistieron: 7,
                faltaron: 3,
                porcentaje_asistencia: 70,
                porcentaje_faltas: 30,
                con_permiso: 0,
                empleados_activos: 2,
            }
        );
    }

    #[test]
    fn percentages_are_complementary() {
        for (total, asistieron) in [(10, 7), (3, 1), (3, 2), (8, 1), (7, 7), (9, 0)] {
            let summary = DailySummary::from_counts(date(2024, 3, 1), total, asistieron, 0);
            assert_eq!(
                summary.porcentaje_asistencia + summary.porcentaje_faltas,
                100,
                "total={} asistieron={}",
                total,
                asistieron
            );
        }
    }

    #[test]
    fn summary_rounds_half_up() {
        // 1/3 -> 33.33 -> 33, 2/3 -> 66.67 -> 67, 1/8 -> 12.5 -> 13
        assert_eq!(
            DailySummary::from_counts(date(2024, 3, 1), 3, 1, 0).porcentaje_asistencia,
            33
        );
        assert_eq!(
            DailySummary::from_counts(date(2024, 3, 1), 3, 2, 0).porcentaje_asistencia,
            67
        );
        assert_eq!(
            DailySummary::from_counts(date(2024, 3, 1), 8, 1, 0).porcentaje_asistencia,
            13
        );
    }

    #[test]
    fn summary_with_no_active_employees() {
        let summary = DailySummary::from_counts(date(2024, 3, 1), 0, 0, 0);
        assert_eq!(summary.porcentaje_asistencia, 0);
        assert_eq!(summary.porcentaje_faltas, 100);
        assert_eq!(summary.faltaron, 0);
    }

    #[test]
    fn absences_are_not_clamped() {
        // more attendance rows than currently-active employees
        let summary = DailySummary::from_counts(date(2024, 3, 1), 5, 7, 0);
        assert_eq!(summary.faltaron, -2);
    }

    #[test]
    fn summary_serializes_with_the_dashboard_keys() {
        let summary = DailySummary::from_counts(date(2024, 3, 1), 10, 7, 2);
        let value = serde_json::to_value(&summary).expect("serialize");
        let obj = value.as_object().expect("object");

        let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "asistieron",
                "con_permiso",
                "empleados_activos",
                "faltaron",
                "fecha",
                "porcentaje_asistencia",
                "porcentaje_faltas",
                "total_empleados",
            ]
        );
        assert_eq!(obj["fecha"], "2024-03-01");
        assert_eq!(obj["porcentaje_asistencia"], 70);
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(UpdateAttendance::default().is_empty());
        let patch = UpdateAttendance {
            exit_manual: Some(true),
            ..UpdateAttendance::default()
        };
        assert!(!patch.is_empty());
    }
}

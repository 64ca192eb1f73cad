use crate::api::attendance::{
    CloseShiftRequest, CloseShiftResponse, RegisterEventRequest, RegisterEventResponse,
};
use crate::api::reports::{RangeQuery, SummaryQuery};
use crate::ledger::RegisterOutcome;
use crate::model::attendance::{AttendanceRecord, DailySummary, OpenShift, UpdateAttendance};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Asistencia API",
        version = "1.0.0",
        description = r#"
## Attendance Tracking Service

This API records **daily clock events** for a workforce whose employee
directory lives in an external HR database.

### 🔹 Key Features
- **Event Registration**
  - Badge kiosks and supervisors post entry/exit events
  - One attendance record per employee per day, enforced by the storage layer
- **Shift Closing**
  - Stamp a closing time on every record still open at end of day
- **Reporting**
  - Records by date, per-employee history, open shifts, daily summary
- **Corrections**
  - Field-level updates of single records by authorized back office staff

### 📦 Response Format
- JSON-based RESTful responses
- Clock event results are reported as an `outcome`, never as an error

### 🚀 Usage
Use this API to build:
- Badge kiosk firmware integrations
- Supervisor dashboards
- Attendance reports

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::attendance::register_event,
        crate::api::attendance::close_shift,
        crate::api::attendance::update_record,
        crate::api::attendance::get_record,

        crate::api::reports::by_date,
        crate::api::reports::by_employee,
        crate::api::reports::summary,
        crate::api::reports::open_records
    ),
    components(
        schemas(
            RegisterEventRequest,
            RegisterEventResponse,
            RegisterOutcome,
            CloseShiftRequest,
            CloseShiftResponse,
            UpdateAttendance,
            AttendanceRecord,
            OpenShift,
            DailySummary,
            RangeQuery,
            SummaryQuery
        )
    ),
    tags(
        (name = "Attendance", description = "Clock event and correction APIs"),
        (name = "Reports", description = "Read-only reporting APIs"),
    )
)]
pub struct ApiDoc;

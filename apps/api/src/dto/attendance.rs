use serde::{Deserialize, Serialize};
use soramayo_core::{AppError, NonEmptyString};
use soramayo_domain::{
    AttendanceDay, AttendanceEntry, AttendanceRecord, Employee, EmployeeId, NewEmployee,
};
use ts_rs::TS;

use super::records::parse_fecha;

/// Incoming payload for creating or updating a roster employee.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-request.ts"
)]
pub struct EmployeeRequest {
    pub nombre: String,
    pub apellido: String,
    pub dni: Option<String>,
    pub puesto: String,
}

impl TryFrom<EmployeeRequest> for NewEmployee {
    type Error = AppError;

    fn try_from(request: EmployeeRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            nombre: NonEmptyString::new(request.nombre)
                .map_err(|_| AppError::Validation("nombre must not be empty".to_owned()))?,
            apellido: NonEmptyString::new(request.apellido)
                .map_err(|_| AppError::Validation("apellido must not be empty".to_owned()))?,
            dni: request.dni,
            puesto: NonEmptyString::new(request.puesto)
                .map_err(|_| AppError::Validation("puesto must not be empty".to_owned()))?,
        })
    }
}

/// API representation of one roster employee.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/employee-response.ts"
)]
pub struct EmployeeResponse {
    pub id: String,
    pub nombre: String,
    pub apellido: String,
    pub dni: Option<String>,
    pub puesto: String,
    pub activo: bool,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id.to_string(),
            nombre: employee.nombre,
            apellido: employee.apellido,
            dni: employee.dni,
            puesto: employee.puesto,
            activo: employee.activo,
        }
    }
}

/// One employee's row inside a day submission.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/attendance-entry-request.ts"
)]
pub struct AttendanceEntryRequest {
    pub empleado_id: String,
    pub presente: bool,
    pub horas_extra: f64,
    pub observaciones: Option<String>,
}

/// Incoming payload for saving one day's attendance batch.
#[derive(Debug, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/attendance-day-request.ts"
)]
pub struct AttendanceDayRequest {
    pub fecha: String,
    pub entries: Vec<AttendanceEntryRequest>,
}

impl TryFrom<AttendanceDayRequest> for AttendanceDay {
    type Error = AppError;

    fn try_from(request: AttendanceDayRequest) -> Result<Self, Self::Error> {
        let entries = request
            .entries
            .into_iter()
            .map(|entry| {
                Ok(AttendanceEntry {
                    empleado_id: parse_employee_id(&entry.empleado_id)?,
                    presente: entry.presente,
                    horas_extra: entry.horas_extra,
                    observaciones: entry.observaciones,
                })
            })
            .collect::<Result<Vec<_>, AppError>>()?;

        Ok(Self {
            fecha: parse_fecha(&request.fecha)?,
            entries,
        })
    }
}

/// API representation of one stored attendance row.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../packages/api-types/src/generated/attendance-record-response.ts"
)]
pub struct AttendanceRecordResponse {
    pub empleado_id: String,
    pub fecha: String,
    pub presente: bool,
    pub horas_extra: f64,
    pub observaciones: Option<String>,
}

impl From<AttendanceRecord> for AttendanceRecordResponse {
    fn from(record: AttendanceRecord) -> Self {
        Self {
            empleado_id: record.empleado_id.to_string(),
            fecha: record.fecha.to_string(),
            presente: record.presente,
            horas_extra: record.horas_extra,
            observaciones: record.observaciones,
        }
    }
}

pub(crate) fn parse_employee_id(value: &str) -> Result<EmployeeId, AppError> {
    uuid::Uuid::parse_str(value)
        .map(EmployeeId::from_uuid)
        .map_err(|_| AppError::Validation(format!("invalid employee id '{value}'")))
}

#[cfg(test)]
mod tests {
    use soramayo_domain::{AttendanceDay, EmployeeId};

    use super::{AttendanceDayRequest, AttendanceEntryRequest};

    #[test]
    fn day_request_converts_with_valid_ids() {
        let request = AttendanceDayRequest {
            fecha: "2024-06-03".to_owned(),
            entries: vec![AttendanceEntryRequest {
                empleado_id: EmployeeId::new().to_string(),
                presente: true,
                horas_extra: 1.5,
                observaciones: None,
            }],
        };

        let day = AttendanceDay::try_from(request);
        assert!(matches!(day, Ok(ref value) if value.entries.len() == 1));
    }

    #[test]
    fn malformed_employee_id_is_rejected() {
        let request = AttendanceDayRequest {
            fecha: "2024-06-03".to_owned(),
            entries: vec![AttendanceEntryRequest {
                empleado_id: "not-a-uuid".to_owned(),
                presente: true,
                horas_extra: 0.0,
                observaciones: None,
            }],
        };

        assert!(AttendanceDay::try_from(request).is_err());
    }
}

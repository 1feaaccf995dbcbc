//! Common types used throughout the appointment service

use crate::error::{AppointmentError, AppointmentResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;
use utoipa::ToSchema;

/// Unique identifier for appointments
pub type AppointmentId = u64;

/// Caller-supplied appointment fields, kept in the order received
pub type AppointmentFields = Map<String, Value>;

/// Keys owned by the service that callers can never set on creation
const RESERVED_FIELDS: [&str; 2] = ["id", "status"];

/// Approval state of an appointment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Rejected,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::Rejected => "rejected",
        }
    }

    /// Whether an explicit status update may move an appointment into this state.
    /// `Pending` is only reachable through creation.
    pub fn is_update_target(&self) -> bool {
        matches!(self, AppointmentStatus::Approved | AppointmentStatus::Rejected)
    }

    /// Compute the state reached by updating to `target`.
    ///
    /// Any state may move to `Approved` or `Rejected`, including itself; there
    /// is no terminal state.
    pub fn transition_to(self, target: AppointmentStatus) -> AppointmentResult<AppointmentStatus> {
        if target.is_update_target() {
            Ok(target)
        } else {
            Err(AppointmentError::InvalidStatus {
                status: target.to_string(),
            })
        }
    }

    /// Interpret the raw `status` value of an update request.
    ///
    /// Missing, null, non-string and unknown values are all invalid, as is
    /// `"pending"`.
    pub fn update_target_from_json(value: Option<&Value>) -> AppointmentResult<AppointmentStatus> {
        let status = match value {
            Some(Value::String(text)) => text.parse::<AppointmentStatus>()?,
            Some(other) => {
                return Err(AppointmentError::InvalidStatus {
                    status: other.to_string(),
                })
            }
            None => {
                return Err(AppointmentError::InvalidStatus {
                    status: "<missing>".to_string(),
                })
            }
        };

        if status.is_update_target() {
            Ok(status)
        } else {
            Err(AppointmentError::InvalidStatus {
                status: status.to_string(),
            })
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = AppointmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "approved" => Ok(AppointmentStatus::Approved),
            "rejected" => Ok(AppointmentStatus::Rejected),
            _ => Err(AppointmentError::InvalidStatus {
                status: s.to_string(),
            }),
        }
    }
}

/// A requested clinic visit.
///
/// Besides `id` and `status`, every field the caller sent on creation is kept
/// verbatim and serialized between the two, so the wire shape is
/// `{"id": .., <caller fields>.., "status": ..}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Appointment {
    #[schema(value_type = u64, example = 1)]
    pub id: AppointmentId,

    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub fields: AppointmentFields,

    pub status: AppointmentStatus,
}

impl Appointment {
    /// Build a new pending appointment, dropping any caller-supplied `id` or `status`
    pub fn new(id: AppointmentId, mut fields: AppointmentFields) -> Self {
        fields.retain(|key, _| !RESERVED_FIELDS.contains(&key.as_str()));

        Self {
            id,
            fields,
            status: AppointmentStatus::Pending,
        }
    }

    /// Move to `target`, leaving every other field untouched
    pub fn update_status(&mut self, target: AppointmentStatus) -> AppointmentResult<()> {
        self.status = self.status.transition_to(target)?;
        Ok(())
    }

    pub fn patient_name(&self) -> Option<&str> {
        self.fields.get("patientName").and_then(Value::as_str)
    }

    pub fn doctor_id(&self) -> Option<i64> {
        self.fields.get("doctorId").and_then(Value::as_i64)
    }

    pub fn appointment_date(&self) -> Option<&str> {
        self.fields.get("appointmentDate").and_then(Value::as_str)
    }
}

/// Body of a status update request
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdateRequest {
    /// Target status, `approved` or `rejected`
    #[schema(value_type = Option<String>, example = "approved")]
    #[serde(default)]
    pub status: Option<Value>,
}

/// Normalize a textual identifier (e.g. a path segment) to an [`AppointmentId`].
///
/// Surrounding whitespace is ignored; anything that is not an unsigned decimal
/// integer yields `None`.
pub fn parse_appointment_id(raw: &str) -> Option<AppointmentId> {
    raw.trim().parse::<AppointmentId>().ok()
}

//! Appointment operations
//!
//! The three operations exposed over HTTP: create, list and update-status.
//! Each runs to completion against the injected store and records metrics.

use crate::error::{AppointmentError, AppointmentResult};
use crate::metrics::MetricsCollector;
use crate::store::AppointmentStore;
use crate::types::{parse_appointment_id, Appointment, AppointmentFields, AppointmentStatus};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Appointment operations over a shared store
#[derive(Clone)]
pub struct AppointmentService {
    store: Arc<dyn AppointmentStore>,
    metrics: Arc<MetricsCollector>,
}

impl AppointmentService {
    pub fn new(store: Arc<dyn AppointmentStore>, metrics: Arc<MetricsCollector>) -> Self {
        Self { store, metrics }
    }

    /// The backing store
    pub fn store(&self) -> Arc<dyn AppointmentStore> {
        self.store.clone()
    }

    /// Create a pending appointment from arbitrary caller fields.
    ///
    /// Fields are not validated; any `id` or `status` the caller sent is
    /// replaced by the generated id and `pending`.
    pub fn create(&self, fields: AppointmentFields) -> AppointmentResult<Appointment> {
        let timer = self.metrics.start_timer();

        let appointment = self.store.create(fields)?;
        let stored = self.store.count()?;

        self.metrics.record_appointment_created(stored);
        self.metrics.record_operation("create", timer.stop());

        info!(
            "Appointment created - id: {}, patient: {:?}, doctor: {:?}, date: {:?}",
            appointment.id,
            appointment.patient_name(),
            appointment.doctor_id(),
            appointment.appointment_date()
        );

        Ok(appointment)
    }

    /// All appointments in creation order
    pub fn list(&self) -> AppointmentResult<Vec<Appointment>> {
        let timer = self.metrics.start_timer();

        let appointments = self.store.list()?;

        self.metrics.record_operation("list", timer.stop());
        debug!("Listed {} appointments", appointments.len());

        Ok(appointments)
    }

    /// Move the appointment identified by `raw_id` to the status in `status`.
    ///
    /// `raw_id` is normalized to a numeric id first; text that is not a
    /// number can never match. The target must be `approved` or `rejected`.
    pub fn update_status(
        &self,
        raw_id: &str,
        status: Option<&Value>,
    ) -> AppointmentResult<Appointment> {
        let timer = self.metrics.start_timer();

        let result = self.apply_status_update(raw_id, status);
        self.metrics.record_operation("update_status", timer.stop());

        match &result {
            Ok(appointment) => {
                self.metrics.record_status_updated(appointment.status);
                info!(
                    "Appointment status updated - id: {}, status: {}",
                    appointment.id, appointment.status
                );
            }
            Err(e @ AppointmentError::Internal { .. }) => {
                self.metrics.record_status_update_failed(e.kind());
                error!("Appointment status update failed - id: '{}', error: {}", raw_id, e);
            }
            Err(e) => {
                self.metrics.record_status_update_failed(e.kind());
                warn!("Appointment status update rejected - id: '{}', reason: {}", raw_id, e);
            }
        }

        result
    }

    fn apply_status_update(
        &self,
        raw_id: &str,
        status: Option<&Value>,
    ) -> AppointmentResult<Appointment> {
        let id = parse_appointment_id(raw_id).ok_or_else(|| AppointmentError::NotFound {
            id: raw_id.to_string(),
        })?;
        let target = AppointmentStatus::update_target_from_json(status)?;

        self.store.update_status(id, target)
    }
}

//! In-memory appointment store

use crate::error::{AppointmentError, AppointmentResult};
use crate::store::AppointmentStore;
use crate::types::{Appointment, AppointmentFields, AppointmentId, AppointmentStatus};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// First id handed out by a fresh store
const FIRST_APPOINTMENT_ID: AppointmentId = 1;

#[derive(Debug)]
struct StoreInner {
    appointments: Vec<Appointment>,
    /// Position of each appointment in `appointments`
    index: HashMap<AppointmentId, usize>,
    next_id: AppointmentId,
}

impl StoreInner {
    /// Locate `id` in `appointments`. Shared by lookups and status updates.
    fn position_of(&self, id: AppointmentId) -> Option<usize> {
        self.index
            .get(&id)
            .copied()
            .filter(|&position| position < self.appointments.len())
    }
}

/// Appointment store backed by a vector guarded by a single lock.
///
/// The collection, its id index and the id counter live under the same
/// `RwLock`, so creation and status updates are fully serialized while
/// listings can proceed in parallel.
#[derive(Debug)]
pub struct InMemoryAppointmentStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryAppointmentStore {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(StoreInner {
                appointments: Vec::new(),
                index: HashMap::new(),
                next_id: FIRST_APPOINTMENT_ID,
            }),
        }
    }

    fn read(&self) -> AppointmentResult<RwLockReadGuard<'_, StoreInner>> {
        self.inner.read().map_err(|_| AppointmentError::Internal {
            message: "Failed to acquire appointments read lock".to_string(),
        })
    }

    fn write(&self) -> AppointmentResult<RwLockWriteGuard<'_, StoreInner>> {
        self.inner.write().map_err(|_| AppointmentError::Internal {
            message: "Failed to acquire appointments write lock".to_string(),
        })
    }
}

impl Default for InMemoryAppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn create(&self, fields: AppointmentFields) -> AppointmentResult<Appointment> {
        let mut inner = self.write()?;

        let id = inner.next_id;
        inner.next_id = id.checked_add(1).ok_or_else(|| AppointmentError::Internal {
            message: "Appointment id space exhausted".to_string(),
        })?;

        let appointment = Appointment::new(id, fields);
        let position = inner.appointments.len();
        inner.appointments.push(appointment.clone());
        inner.index.insert(id, position);

        debug!("Stored appointment {} at position {}", id, position);
        Ok(appointment)
    }

    fn list(&self) -> AppointmentResult<Vec<Appointment>> {
        Ok(self.read()?.appointments.clone())
    }

    fn find_by_id(&self, id: AppointmentId) -> AppointmentResult<Option<Appointment>> {
        let inner = self.read()?;
        Ok(inner
            .position_of(id)
            .map(|position| inner.appointments[position].clone()))
    }

    fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> AppointmentResult<Appointment> {
        let mut inner = self.write()?;

        let position = inner.position_of(id).ok_or_else(|| AppointmentError::NotFound {
            id: id.to_string(),
        })?;
        let appointment = &mut inner.appointments[position];

        appointment.update_status(status)?;
        Ok(appointment.clone())
    }

    fn count(&self) -> AppointmentResult<usize> {
        Ok(self.read()?.appointments.len())
    }
}

//! Appointment storage interface and implementations
//!
//! The store owns every appointment for the lifetime of the process. It is
//! append-only apart from in-place status changes; nothing is ever removed.

pub mod memory;

pub use memory::InMemoryAppointmentStore;

use crate::error::AppointmentResult;
use crate::types::{Appointment, AppointmentFields, AppointmentId, AppointmentStatus};

/// Trait for appointment storage operations
pub trait AppointmentStore: Send + Sync {
    /// Store a new pending appointment built from the caller's fields and
    /// return it with its freshly assigned id
    fn create(&self, fields: AppointmentFields) -> AppointmentResult<Appointment>;

    /// All appointments in insertion order
    fn list(&self) -> AppointmentResult<Vec<Appointment>>;

    /// Look up a single appointment
    fn find_by_id(&self, id: AppointmentId) -> AppointmentResult<Option<Appointment>>;

    /// Overwrite the status of a stored appointment and return the updated record
    fn update_status(
        &self,
        id: AppointmentId,
        status: AppointmentStatus,
    ) -> AppointmentResult<Appointment>;

    /// Number of stored appointments
    fn count(&self) -> AppointmentResult<usize>;
}

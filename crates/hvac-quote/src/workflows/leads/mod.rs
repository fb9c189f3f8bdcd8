//! Contact capture for customers who picked a tier on the results screen.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{Lead, LeadDraft, LeadField, LeadId, LeadSubmission, LeadValidationError};
pub use repository::LeadRepository;
pub use router::lead_router;
pub use service::{LeadError, LeadService};

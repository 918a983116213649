//! Persistence layer for the follow-up reminder job.
//!
//! All access goes through [`store::CrmStore`], a thin SeaORM wrapper over
//! the database shared with the interactive CRM. The job context connects
//! with unrestricted credentials (service role); row-level restrictions only
//! apply to the interactive UI.

pub mod entities;
pub mod error;
pub mod store;


pub use error::{Result, StorageError};
pub use store::CrmStore;

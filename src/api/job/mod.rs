pub mod dto;
pub mod handlers;
pub mod models;
pub mod salary;
pub mod service;

// Re-export commonly used types
pub use dto::{JobFilter, NewJob};
pub use models::{Job, JobType};
pub use service::JobService;

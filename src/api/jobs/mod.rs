pub mod dto;
pub mod handlers;
pub mod models;
pub mod params;
pub mod service;

// Re-export commonly used types
pub use dto::JobResponse;
pub use models::Job;
pub use params::{JobSearchParams, RawSearchQuery};
pub use service::JobService;

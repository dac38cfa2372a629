pub mod allocator;
pub mod service;

pub use allocator::schedule;
pub use service::SchedulingService;

pub mod dispatcher;
pub mod drift;
pub mod scheduler;

pub use dispatcher::NotifyDispatcher;
pub use drift::RatingDriftDetector;
pub use scheduler::EventScheduler;

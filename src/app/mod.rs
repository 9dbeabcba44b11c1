// Application layer - Workflow orchestration

pub mod container;
pub mod workflow_controller;

// Re-export controller
pub use container::DefaultAppContainer;
pub use workflow_controller::{
    Resolution, Session, SubmissionTicket, UserIntent, WorkflowController,
};

//! Application services for task orchestration.

mod admission;
mod cycle;
mod lifecycle;
mod planner;
pub mod prompts;
mod report;
mod rollup;

pub use admission::{
    AdmissionError, AdmissionOutcome, AdmissionResult, AdmissionService, RejectedSuggestion,
};
pub use cycle::{CycleError, CycleResult, ProcessingCycle};
pub use lifecycle::{Advance, TaskLifecycleEngine, TaskLifecycleError};
pub use planner::{
    AssignmentStrategy, CreateTaskRequest, DecompositionPlanner, FirstEligible, PlannedTasks,
    PlanningError, PlanningResult,
};
pub use report::{CycleFailure, ProcessingReport, ReportAction, ReportEntry};
pub use rollup::{RollupOutcome, RollupPass};

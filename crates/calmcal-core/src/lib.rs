//! # CalmCal Core Library
//!
//! This library provides the scheduling and stress-analysis logic for CalmCal,
//! a calendar that breaks events into subtasks and keeps an eye on workload.
//! All operations are available through the standalone `calmcal` CLI; any
//! graphical front-end is a thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Task model**: tasks, priorities, stress tiers and the subtask catalog
//! - **Scheduler**: earliest-free-slot search and the event expansion pipeline
//! - **Stats**: workload metrics, recommendations and work-life balance
//! - **Reschedule**: bulk date moves, previews and single-task relocation
//! - **Storage**: TOML configuration and the JSON task file
//!
//! ## Key Components
//!
//! - [`SlotFinder`]: Finds the next conflict-free daytime slot
//! - [`EventScheduler`]: Turns a validated event into placed tasks
//! - [`WorkloadAnalyzer`]: Computes [`StressMetrics`] from a task list
//! - [`RescheduleEngine`]: Moves tasks and reports advisory warnings
//! - [`Planner`]: In-memory session tying the pieces together
//! - [`MetricsSource`]: Local or remote origin of metrics snapshots

pub mod agenda;
pub mod assistant;
pub mod error;
pub mod event;
pub mod metrics_service;
pub mod planner;
pub mod preferences;
pub mod reschedule;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod task;

pub use assistant::AssistantContext;
pub use error::{ConfigError, CoreError, MetricsServiceError, SlotError, ValidationError, ValidationErrors};
pub use event::{EventRequest, ValidEvent};
pub use metrics_service::{LocalMetrics, MetricsSource, MetricsTracker, RemoteMetricsClient};
pub use planner::Planner;
pub use preferences::Preferences;
pub use reschedule::{DeadlineNotice, RescheduleEngine, RescheduleWarning, Severity, WarningKind};
pub use scheduler::{EventScheduler, SchedulerConfig, SlotFinder};
pub use stats::{StressMetrics, WorkLifeBalance, WorkloadAnalyzer};
pub use storage::{Config, TaskFile};
pub use task::{
    classify, Frequency, Priority, Recurrence, StressBand, StressClassifier, StressLevel, SubtaskCatalog,
    SubtaskTemplate, Task, TaskCategory,
};

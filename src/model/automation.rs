//! Automation records: actions, tasks, schedules.
//!
//! These are the collection-stored kinds. Their `id` is the dense position
//! assigned by the store, `name` is the natural key; everything else is
//! configuration the process controller reads back verbatim.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::CollectionKind;
use crate::store::CollectionRecord;

fn default_true_case() -> String {
    "conditions_true".to_string()
}

fn default_false_case() -> String {
    "conditions_false".to_string()
}

fn default_error_case() -> String {
    "error".to_string()
}

fn default_job_creation_delta_time() -> f64 {
    0.5
}

fn default_max_concurrent_jobs() -> u32 {
    10
}

/// The smallest unit of work in a task: one screen interaction plus its
/// branching configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Dense collection id; assigned by the store.
    #[serde(default)]
    pub id: Option<u32>,
    /// Natural key, unique within the action collection.
    pub name: String,
    /// Controller function this action invokes.
    pub function: String,
    /// Screen region the action operates on, when position-bound.
    #[serde(default)]
    pub x1: Option<i32>,
    #[serde(default)]
    pub x2: Option<i32>,
    #[serde(default)]
    pub y1: Option<i32>,
    #[serde(default)]
    pub y2: Option<i32>,
    /// Image tokens this action references.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub image_conditions: Vec<String>,
    #[serde(default)]
    pub variables: Vec<String>,
    #[serde(default)]
    pub variable_conditions: Vec<String>,
    #[serde(default)]
    pub comparison_values: Vec<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub time_delay: f64,
    #[serde(default)]
    pub sleep_duration: f64,
    #[serde(default)]
    pub key_pressed: Option<String>,
    /// Next-action label when this action's conditions hold.
    #[serde(default = "default_true_case")]
    pub true_case: String,
    /// Next-action label when they do not.
    #[serde(default = "default_false_case")]
    pub false_case: String,
    #[serde(default)]
    pub skip_to_name: Option<String>,
    #[serde(default = "default_error_case")]
    pub error_case: String,
    #[serde(default)]
    pub num_repeats: u32,
    /// Randomize the cursor path for this action.
    #[serde(default)]
    pub random_path: bool,
    /// Pixel jitter applied to the target position.
    #[serde(default)]
    pub random_range: u32,
    #[serde(default)]
    pub random_delay: f64,
}

impl Action {
    /// Creates an action with every optional field at its default.
    pub fn new(name: impl Into<String>, function: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            function: function.into(),
            x1: None,
            x2: None,
            y1: None,
            y2: None,
            images: Vec::new(),
            image_conditions: Vec::new(),
            variables: Vec::new(),
            variable_conditions: Vec::new(),
            comparison_values: Vec::new(),
            created_at: Utc::now(),
            time_delay: 0.0,
            sleep_duration: 0.0,
            key_pressed: None,
            true_case: default_true_case(),
            false_case: default_false_case(),
            skip_to_name: None,
            error_case: default_error_case(),
            num_repeats: 0,
            random_path: false,
            random_range: 0,
            random_delay: 0.0,
        }
    }
}

impl CollectionRecord for Action {
    const KIND: CollectionKind = CollectionKind::Action;

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An ordered collection of actions that completes one goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    /// Task that must complete before this one may run.
    #[serde(default)]
    pub task_dependency_id: Option<u32>,
    /// Action ids in execution order.
    #[serde(default)]
    pub action_id_list: Vec<u32>,
    /// Seconds between job spawns when fanning the task out.
    #[serde(default = "default_job_creation_delta_time")]
    pub job_creation_delta_time: f64,
    #[serde(default = "default_max_concurrent_jobs")]
    pub max_concurrent_jobs: u32,
    /// Ids of the conditions gating this task.
    #[serde(default)]
    pub conditionals: Vec<u32>,
    #[serde(default)]
    pub early_result_available: Vec<bool>,
    #[serde(default)]
    pub fastest_timeline: Vec<f64>,
    /// Raw JSON payloads of the most recent condition evaluations.
    #[serde(default)]
    pub last_conditional_results: Vec<Value>,
}

impl Task {
    /// Creates a task with every optional field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            task_dependency_id: None,
            action_id_list: Vec::new(),
            job_creation_delta_time: default_job_creation_delta_time(),
            max_concurrent_jobs: default_max_concurrent_jobs(),
            conditionals: Vec::new(),
            early_result_available: Vec::new(),
            fastest_timeline: Vec::new(),
            last_conditional_results: Vec::new(),
        }
    }
}

impl CollectionRecord for Task {
    const KIND: CollectionKind = CollectionKind::Task;

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A series of tasks to run over a given timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    #[serde(default)]
    pub id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub schedule_dependency_id: Option<u32>,
    /// Task ids in execution order.
    #[serde(default)]
    pub task_id_list: Vec<u32>,
}

impl Schedule {
    /// Creates a schedule with no dependency and no tasks.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            schedule_dependency_id: None,
            task_id_list: Vec::new(),
        }
    }
}

impl CollectionRecord for Schedule {
    const KIND: CollectionKind = CollectionKind::Schedule;

    fn id(&self) -> Option<u32> {
        self.id
    }

    fn assign_id(&mut self, id: u32) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Efficiency measurement for one task run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRank {
    pub task_rank: u32,
    pub task_id: u32,
    pub delta_vars: Vec<f64>,
    pub duration: NaiveTime,
}

/// Relative mouse coordinates for one action at a given resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MousePosition {
    pub action_id: u32,
    pub x: i32,
    pub y: i32,
    pub screen_width: u32,
    pub screen_height: u32,
}

//! Command handlers.
//!
//! Every command reads the task list and config through [`Context`] and
//! prints JSON to stdout; diagnostics go to stderr.

pub mod analyze;
pub mod config;
pub mod event;
pub mod reschedule;
pub mod slot;
pub mod task;
pub mod templates;

use std::path::PathBuf;

use calmcal_core::{Config, Planner, TaskFile};
use chrono::{DateTime, Utc};
use serde::Serialize;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// File locations and the reference time shared by all commands.
pub struct Context {
    tasks_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    now: Option<DateTime<Utc>>,
}

impl Context {
    pub fn new(
        tasks_path: Option<PathBuf>,
        config_path: Option<PathBuf>,
        now: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            tasks_path,
            config_path,
            now,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }

    pub fn config_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Config::default_path()?),
        }
    }

    pub fn load_config(&self) -> Result<Config, Box<dyn std::error::Error>> {
        Ok(Config::load_from(&self.config_path()?)?)
    }

    pub fn task_file(&self) -> Result<TaskFile, Box<dyn std::error::Error>> {
        match &self.tasks_path {
            Some(path) => Ok(TaskFile::new(path.clone())),
            None => Ok(TaskFile::default_location()?),
        }
    }

    /// Planner over the stored task list.
    pub fn planner(&self) -> Result<Planner, Box<dyn std::error::Error>> {
        let config = self.load_config()?;
        let tasks = self.task_file()?.load()?;
        Ok(Planner::from_config(&config, tasks))
    }

    pub fn save(&self, planner: &Planner) -> CmdResult {
        self.task_file()?.save(planner.tasks())?;
        Ok(())
    }
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CmdResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

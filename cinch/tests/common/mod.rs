#![allow(dead_code)]

use cinch::{Hook, testing::EventLog};

// ============================================================================
// Test Argument Types
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Job {
    pub id: u32,
    pub queue: &'static str,
}

pub fn job(id: u32, queue: &'static str) -> Job {
    Job { id, queue }
}

pub fn jobs(ids: &[u32]) -> Vec<Job> {
    ids.iter().map(|id| job(*id, "default")).collect()
}

// ============================================================================
// Test Hooks
// ============================================================================

/// Logs `"{label}:{id}"` and continues.
pub fn log_hook(log: &EventLog, label: &'static str) -> impl Hook<Job> {
    let log = log.clone();
    move |job: &Job| log.push(format!("{label}:{}", job.id))
}

/// Logs `"{label}:{id}"` and halts for the given job id.
pub fn halt_for(log: &EventLog, label: &'static str, halt_id: u32) -> impl Hook<Job> {
    let log = log.clone();
    move |job: &Job| {
        log.push(format!("{label}:{}", job.id));
        job.id != halt_id
    }
}

/// Logs `"{label}"` and returns the given result.
pub fn step(log: &EventLog, label: &'static str, result: bool) -> impl Hook<Job> {
    let log = log.clone();
    move |_: &Job| {
        log.push(label);
        result
    }
}

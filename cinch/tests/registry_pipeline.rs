use cinch::{
    BoxError, CinchError, HookRegistry, HookResult, RegistryError,
    hooks::{LoggingAround, LoggingHook, RetryAround, ValidateHook},
    testing::{EventLog, RecordingAround, RecordingHook},
};
use std::cell::RefCell;

mod common;
use common::{Job, job, jobs, log_hook};

/// A stand-in for the queue the terminal action pushes into.
#[derive(Default)]
struct Queue {
    pushed: RefCell<Vec<u32>>,
    failures_left: RefCell<usize>,
}

impl Queue {
    fn flaky(failures: usize) -> Self {
        Self {
            failures_left: RefCell::new(failures),
            ..Self::default()
        }
    }

    fn push(&self, job: &Job) -> Result<u32, BoxError> {
        let mut failures = self.failures_left.borrow_mut();
        if *failures > 0 {
            *failures -= 1;
            return Err("connection reset".into());
        }
        self.pushed.borrow_mut().push(job.id);
        Ok(job.id)
    }

    fn push_many(&self, jobs: Vec<&Job>) -> Result<usize, BoxError> {
        let mut pushed = self.pushed.borrow_mut();
        pushed.extend(jobs.iter().map(|job| job.id));
        Ok(jobs.len())
    }
}

fn client_hooks(log: &EventLog) -> HookRegistry<Job> {
    let mut hooks = HookRegistry::new();
    hooks
        .define_around("around_push")
        .unwrap()
        .add(LoggingAround::new("push"), Some("log"));
    hooks
        .chain_mut("before_push")
        .unwrap()
        .add(ValidateHook::new("known_queue", |job: &Job| job.queue != "unknown"), Some("queue"));
    hooks
        .chain_mut("after_push")
        .unwrap()
        .add(log_hook(log, "pushed"), Some("audit"));
    hooks
}

#[test]
fn test_single_push_through_registry() {
    let log = EventLog::new();
    let hooks = client_hooks(&log);
    let queue = Queue::default();

    let id = hooks
        .invoke_around("around_push", &job(4, "mail"), || queue.push(&job(4, "mail")))
        .unwrap();
    assert_eq!(id, Some(4));
    assert_eq!(log.lines(), vec!["pushed:4"]);

    let rejected = hooks
        .invoke_around("around_push", &job(5, "unknown"), || queue.push(&job(5, "unknown")))
        .unwrap();
    assert_eq!(rejected, None);
    assert_eq!(*queue.pushed.borrow(), vec![4]);
}

#[test]
fn test_bulk_push_through_registry() {
    let log = EventLog::new();
    let hooks = client_hooks(&log);
    let queue = Queue::default();

    let mut batch = jobs(&[1, 2, 3]);
    batch[1].queue = "unknown";

    let count = hooks
        .invoke_around_bulk("around_push", &batch, |accepted| queue.push_many(accepted))
        .unwrap();

    assert_eq!(count, 2);
    assert_eq!(*queue.pushed.borrow(), vec![1, 3]);
    assert_eq!(log.lines(), vec!["pushed:1", "pushed:3"]);
}

#[test]
fn test_derived_registry_adds_retry_without_touching_base() {
    let log = EventLog::new();
    let base = client_hooks(&log);
    let mut derived = base.derive();
    derived
        .around_mut("around_push")
        .unwrap()
        .add(RetryAround::new(2), Some("retry"));

    let flaky = Queue::flaky(1);
    let err = base
        .invoke_around("around_push", &job(1, "mail"), || flaky.push(&job(1, "mail")))
        .unwrap_err();
    assert!(matches!(err, CinchError::Custom(e) if e.to_string() == "connection reset"));

    let flaky = Queue::flaky(2);
    let id = derived
        .invoke_around("around_push", &job(1, "mail"), || flaky.push(&job(1, "mail")))
        .unwrap();
    assert_eq!(id, Some(1));
    assert!(!base.around("around_push").unwrap().exists("retry"));
}

#[test]
fn test_linear_hook_by_name() {
    let recorder = RecordingHook::<Job>::new();
    let mut hooks = HookRegistry::new();
    let validate = hooks.define("validate").unwrap();
    validate.add(LoggingHook::new("validate"), Some("log"));
    validate.add(recorder.clone(), Some("record"));
    validate.add(|job: &Job| job.id < 10, Some("limit"));

    assert_eq!(hooks.invoke("validate", &job(3, "mail")).unwrap(), HookResult::Next);
    assert_eq!(hooks.invoke("validate", &job(30, "mail")).unwrap(), HookResult::Halt);
    assert_eq!(recorder.count(), 2);

    let err = hooks.invoke("missing", &job(1, "mail")).unwrap_err();
    assert!(matches!(
        err,
        CinchError::Registry(RegistryError::NotFound(ref name)) if name == "missing"
    ));
}

#[test]
fn test_paired_chains_follow_around_definition() {
    let log = EventLog::new();
    let mut hooks = HookRegistry::<Job>::new();
    hooks
        .define_around("around_perform")
        .unwrap()
        .add(RecordingAround::new("perform", log.clone()), Some("record"));
    hooks
        .chain_mut("before_perform")
        .unwrap()
        .add(log_hook(&log, "before"), None);
    hooks
        .chain_mut("after_perform")
        .unwrap()
        .add(log_hook(&log, "after"), None);

    hooks
        .invoke_around("around_perform", &job(8, "mail"), || {
            log.push("work");
            Ok(())
        })
        .unwrap();

    assert_eq!(
        log.lines(),
        vec!["before:8", "perform-before", "work", "perform-after", "after:8"]
    );
    assert!(hooks.chain("before_missing").is_none());
}

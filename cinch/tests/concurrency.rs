use cinch::{
    AroundChain, Chain, HookResult,
    hooks::RetryAround,
    testing::{CountingHook, RecordingHook},
};
use std::{sync::Arc, thread};

mod common;
use common::{Job, job};

#[test]
fn test_configured_chain_is_shared_across_threads() {
    let counter = CountingHook::new();
    let mut chain = Chain::new();
    chain.add(counter.clone(), Some("count"));
    chain.add(|job: &Job| job.id % 2 == 0, Some("even"));
    let chain = Arc::new(chain);

    let handles: Vec<_> = (0..8)
        .map(|id| {
            let chain = Arc::clone(&chain);
            thread::spawn(move || chain.invoke(&job(id, "mail")).unwrap())
        })
        .collect();
    let results: Vec<HookResult> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert_eq!(counter.count(), 8);
    assert_eq!(results.iter().filter(|r| r.is_halt()).count(), 4);
}

#[test]
fn test_around_chain_invoked_from_scoped_threads() {
    let recorder = RecordingHook::<Job>::new();
    let mut before = Chain::new();
    before.add(recorder.clone(), Some("record"));

    let mut chain = AroundChain::new().with_before(before);
    chain.add(RetryAround::new(1), Some("retry"));

    thread::scope(|scope| {
        for id in 0..4 {
            let chain = &chain;
            scope.spawn(move || {
                let value = chain.invoke(&job(id, "mail"), || Ok(id * 10)).unwrap();
                assert_eq!(value, Some(id * 10));
            });
        }
    });

    let mut seen: Vec<u32> = recorder.calls().into_iter().map(|job| job.id).collect();
    seen.sort();
    assert_eq!(seen, vec![0, 1, 2, 3]);
}

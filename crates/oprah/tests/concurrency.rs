//! Concurrent presentation against a shared composer.

mod common;

use std::sync::mpsc;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

use common::{COMMENT, USER, User, composer};
use oprah::{PresenterCache, Resolution};
use pretty_assertions::assert_eq;

const THREADS: usize = 8;

#[test]
fn concurrent_misses_resolve_once() {
    let composer = composer();
    let barrier = Barrier::new(THREADS);

    let stacks: Vec<Vec<&'static str>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|id| {
                let composer = composer.clone();
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let presented = composer
                        .present(Arc::new(User {
                            id: u32::try_from(id).unwrap(),
                        }))
                        .unwrap();
                    presented.decorator_names()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    for stack in stacks {
        assert_eq!(
            stack,
            vec!["Fixtures::UserPresenter", "Fixtures::EntityPresenter"]
        );
    }
    assert_eq!(composer.cache().misses(), 1);
    assert_eq!(composer.cache().len(), 1);
}

#[test]
fn concurrent_type_lookups_share_the_resolution() {
    let composer = composer();
    let barrier = Barrier::new(THREADS);

    let resolutions: Vec<Resolution> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                let composer = &composer;
                let barrier = &barrier;
                scope.spawn(move || {
                    barrier.wait();
                    let descriptor = if i % 2 == 0 { &*USER } else { &*COMMENT };
                    composer.resolve_type(descriptor).unwrap()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect()
    });

    let user = composer.cache().fetch(USER.name()).unwrap();
    let comment = composer.cache().fetch(COMMENT.name()).unwrap();
    for (i, resolution) in resolutions.iter().enumerate() {
        let expected = if i % 2 == 0 { &user } else { &comment };
        assert!(Arc::ptr_eq(resolution, expected));
    }
    assert_eq!(composer.cache().misses(), 2);
}

#[test]
fn slow_resolution_does_not_block_other_keys() {
    let cache = PresenterCache::new();
    let (started_tx, started_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    thread::scope(|scope| {
        let cache = &cache;
        let slow = scope.spawn(move || {
            cache.lookup::<()>("Slow", || {
                started_tx.send(()).unwrap();
                release_rx
                    .recv_timeout(Duration::from_secs(5))
                    .expect("released by the other key");
                Ok(Resolution::from(Vec::new()))
            })
        });

        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        // "Slow" is mid-computation and holds its slot.
        cache
            .lookup::<()>("Fast", || Ok(Resolution::from(Vec::new())))
            .unwrap();
        release_tx.send(()).unwrap();

        slow.join().unwrap().unwrap();
    });

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.misses(), 2);
}

#[test]
fn counting_entries_does_not_block_other_keys() {
    let cache = PresenterCache::new();
    let (started_tx, started_rx) = mpsc::channel::<()>();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    thread::scope(|scope| {
        let cache = &cache;
        let slow = scope.spawn(move || {
            cache.lookup::<()>("Slow", || {
                started_tx.send(()).unwrap();
                release_rx
                    .recv_timeout(Duration::from_secs(5))
                    .expect("released after the other key");
                Ok(Resolution::from(Vec::new()))
            })
        });
        started_rx.recv_timeout(Duration::from_secs(5)).unwrap();

        // Waits on "Slow" until it is released.
        let counter = scope.spawn(move || cache.len());
        thread::sleep(Duration::from_millis(100));

        let start = Instant::now();
        cache
            .lookup::<()>("Fast", || Ok(Resolution::from(Vec::new())))
            .unwrap();
        let waited = start.elapsed();
        release_tx.send(()).unwrap();

        assert!(waited < Duration::from_secs(2), "waited {waited:?}");
        slow.join().unwrap().unwrap();
        assert!(counter.join().unwrap() >= 1);
    });

    assert_eq!(cache.len(), 2);
}

#[test]
fn clear_during_lookups_never_corrupts_entries() {
    let composer = composer();

    thread::scope(|scope| {
        for _ in 0..4 {
            let composer = &composer;
            scope.spawn(move || {
                for id in 0..50 {
                    let presented = composer.present(Arc::new(User { id })).unwrap();
                    assert_eq!(
                        presented.decorator_names(),
                        vec!["Fixtures::UserPresenter", "Fixtures::EntityPresenter"]
                    );
                }
            });
        }
        let composer = &composer;
        scope.spawn(move || {
            for _ in 0..20 {
                composer.clear_cache();
                thread::yield_now();
            }
        });
    });

    let settled = composer.resolve_type(&USER).unwrap();
    assert_eq!(settled.len(), 2);
}

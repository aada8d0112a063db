//! Parsing from many threads at once

use scanfilter_core::{parse, Predicate};
use std::sync::Arc;
use std::thread;

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_types_are_thread_safe() {
    assert_send_sync::<Predicate>();
    assert_send_sync::<scanfilter_core::ParseError>();
    assert_send_sync::<scanfilter_core::Error>();
}

#[test]
fn test_concurrent_parsing() {
    let expected = Arc::new(parse("foo is not null and foo < 5 or 10 < foo").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let expected = Arc::clone(&expected);
            thread::spawn(move || {
                for _ in 0..100 {
                    let pred = parse("foo is not null and foo < 5 or 10 < foo").unwrap();
                    assert_eq!(&pred, expected.as_ref());
                    assert!(parse("foo LIKE '%x'").is_err());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_shared_predicate_across_threads() {
    let pred = Arc::new(parse("a = 1 and b in (1, 2, 3)").unwrap());

    thread::scope(|scope| {
        for _ in 0..4 {
            let pred = Arc::clone(&pred);
            scope.spawn(move || {
                let names: Vec<&str> = pred.references().iter().map(|r| r.name()).collect();
                assert_eq!(names, vec!["a", "b"]);
            });
        }
    });
}

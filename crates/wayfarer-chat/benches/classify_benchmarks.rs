//! Benchmarks for intent classification latency.
//!
//! Classification runs once per user message on the request path, so it
//! should stay well under a millisecond even for long messages against the
//! full default gazetteer.

use std::time::Duration;

use criterion::{criterion_group, criterion_main, Criterion};
use wayfarer_chat::{ConversationContext, IntentClassifier, SearchResultSet};
use wayfarer_core::config::GazetteerConfig;

const MESSAGES: &[&str] = &[
    "hello",
    "find hotels in Rome",
    "book a flight from JFK to NRT next friday in business class",
    "dinner for 4 people, italian food in Barcelona on march 3rd",
    "is UA123 on time?",
    "cancel booking BK-1001",
    "maximize my points",
    "what about Paris?",
    "plan a trip to Lisbon for 2 guests next weekend",
    "xyz",
];

/// A long message that matches nothing early, to exercise every pattern.
fn long_message() -> String {
    let filler = "we were thinking about maybe going somewhere warm with good beaches \
                  and a relaxed atmosphere where the kids can play all day ";
    format!("{}and then perhaps a rental car in Miami", filler.repeat(8))
}

fn bench_classify(c: &mut Criterion) {
    let classifier = IntentClassifier::new(&GazetteerConfig::default().destinations);
    let mut context = ConversationContext::new("bench");
    context.record_results(SearchResultSet::Hotels(vec![]));
    let long = long_message();

    let mut group = c.benchmark_group("classify");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("mixed_messages_fresh", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let text = MESSAGES[idx % MESSAGES.len()];
            idx += 1;
            classifier.classify(text, None)
        });
    });

    group.bench_function("mixed_messages_with_context", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let text = MESSAGES[idx % MESSAGES.len()];
            idx += 1;
            classifier.classify(text, Some(&context))
        });
    });

    group.bench_function("long_message", |b| {
        b.iter(|| classifier.classify(&long, None));
    });

    group.finish();

    // Standalone p95 check over the mixed set.
    let mut times = Vec::with_capacity(1000);
    for i in 0..1000 {
        let text = MESSAGES[i % MESSAGES.len()];
        let start = std::time::Instant::now();
        let _classified = classifier.classify(text, Some(&context));
        times.push(start.elapsed());
    }
    times.sort();
    let target = Duration::from_millis(1);
    let p95 = times[949];
    eprintln!("\n=== Intent classification latency (1000 messages) ===");
    eprintln!("Median:  {:?}", times[499]);
    eprintln!("p95:     {:?} (target: {:?})", p95, target);
    assert!(p95 < target, "classification p95 {:?} exceeds {:?}", p95, target);
}

criterion_group!(benches, bench_classify);
criterion_main!(benches);

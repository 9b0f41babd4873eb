//! Benchmarks for utterance resolution.
//!
//! Resolution runs on every submission, so it should stay well under a
//! millisecond even for long free-text input in either script.

use std::time::Duration;

use arogya_chat::ResponseResolver;
use arogya_core::types::Language;
use criterion::{criterion_group, criterion_main, Criterion};

/// A realistic utterance; the trigger varies by index to exercise every
/// priority level, including no match at all.
fn generate_utterance(index: usize) -> String {
    let trigger = match index % 6 {
        0 => "vaccine",
        1 => "डेंगू",
        2 => "prevent",
        3 => "जरूरी",
        4 => "VACCINATION",
        _ => "fever",
    };
    format!(
        "My child has had a high temperature since yesterday evening and the \
         health worker in our village said I should ask about {} before we \
         travel to the district hospital. Question number {}.",
        trigger, index
    )
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = ResponseResolver::default();
    let utterances: Vec<String> = (0..600).map(generate_utterance).collect();

    let mut group = c.benchmark_group("resolver");
    group.sample_size(200);
    group.measurement_time(Duration::from_secs(5));

    group.bench_function("resolve_english", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let reply = resolver.resolve(&utterances[idx % utterances.len()], Language::English);
            idx += 1;
            reply
        });
    });

    group.bench_function("resolve_hindi", |b| {
        let mut idx = 0usize;
        b.iter(|| {
            let reply = resolver.resolve(&utterances[idx % utterances.len()], Language::Hindi);
            idx += 1;
            reply
        });
    });

    // No trigger anywhere: every needle is scanned.
    group.bench_function("classify_miss", |b| {
        let utterance = generate_utterance(5);
        b.iter(|| resolver.classify(&utterance));
    });

    group.finish();
}

criterion_group!(benches, bench_resolve);
criterion_main!(benches);

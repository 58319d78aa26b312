//! Benchmarks for cross-venue edge ranking

use arb_streamer::edge::{EdgeEngine, EdgeThresholds};
use arb_streamer::market::{Market, Venue};
use arb_streamer::matching::similarity;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_decimal::Decimal;

const TOPICS: [&str; 8] = [
    "fed", "bitcoin", "election", "rain", "oscars", "inflation", "senate", "gdp",
];

fn markets(venue: Venue, count: usize, suffix: &str) -> Vec<Market> {
    (0..count)
        .map(|i| {
            let title = format!(
                "Will {} {} exceed {} by {}{}",
                TOPICS[i % TOPICS.len()],
                TOPICS[(i / TOPICS.len()) % TOPICS.len()],
                i,
                2025 + i % 3,
                suffix
            );
            let yes = Decimal::new((i as i64 * 37) % 100, 2);
            Market::new(venue, format!("{}-{}", venue.as_str(), i), title).with_yes(yes)
        })
        .collect()
}

fn benchmark_similarity(c: &mut Criterion) {
    c.bench_function("title_similarity", |b| {
        b.iter(|| {
            similarity(
                black_box("Will the Fed cut rates at the June 2025 meeting?"),
                black_box("Fed rate cut in June 2025"),
            )
        })
    });
}

fn benchmark_find_edges(c: &mut Criterion) {
    let kalshi = markets(Venue::Kalshi, 300, "");
    let polymarket = markets(Venue::Polymarket, 500, "?");
    let engine = EdgeEngine::new(EdgeThresholds::default());

    c.bench_function("find_edges_300x500", |b| {
        b.iter(|| engine.find_edges(black_box(&kalshi), black_box(&polymarket)))
    });
}

criterion_group!(benches, benchmark_similarity, benchmark_find_edges);
criterion_main!(benches);

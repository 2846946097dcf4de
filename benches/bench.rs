// Criterion benchmarks for Campus Events

use campus_events::core::{build_prompt, most_recent, past_activity, reconcile};
use campus_events::models::{Booking, Event, RecommendationRequest, RecommendationResponse};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::collections::HashSet;

fn create_event(id: usize) -> Event {
    Event {
        id: format!("evt-{}", id),
        title: format!("Campus Event {}", id),
        description: "Talks, food and music on the quad".to_string(),
        date: Utc.with_ymd_and_hms(2026, 9, 1, 18, 0, 0).unwrap() + Duration::hours((id * 7 % 500) as i64),
        venue: "Main Quad".to_string(),
        price: (id % 4) as f64 * 50.0,
        committee_id: format!("club-{}", id % 12),
        image_url: None,
    }
}

fn create_catalog(size: usize) -> Vec<Event> {
    (0..size).map(create_event).collect()
}

fn bench_reconcile(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconcile");

    for catalog_size in [10, 100, 500].iter() {
        let catalog = create_catalog(*catalog_size);
        // A typical answer: a handful of hits, a repeat and one invented title
        let response = RecommendationResponse {
            recommended_events: vec![
                format!("Campus Event {}", catalog_size - 1),
                "Campus Event 3".to_string(),
                "Campus Event 3".to_string(),
                "Midnight Gala".to_string(),
                "Campus Event 0".to_string(),
            ],
        };

        group.bench_with_input(
            BenchmarkId::new("five_titles", catalog_size),
            catalog_size,
            |b, _| b.iter(|| reconcile(black_box(&response), black_box(&catalog))),
        );
    }

    group.finish();
}

fn bench_build_prompt(c: &mut Criterion) {
    let catalog = create_catalog(200);
    let request = RecommendationRequest {
        student_id: "student123".to_string(),
        interests: vec!["music".to_string(), "robotics".to_string(), "film".to_string()],
        past_activity: catalog.iter().take(15).map(|e| e.title.clone()).collect(),
        all_events: catalog.iter().map(|e| e.title.clone()).collect(),
    };

    c.bench_function("build_prompt_200_events", |b| {
        b.iter(|| build_prompt(black_box(&request)))
    });
}

fn bench_history_and_fallback(c: &mut Criterion) {
    let catalog = create_catalog(500);
    let bookings: Vec<Booking> = (0..40)
        .map(|i| Booking {
            id: format!("b-{}", i),
            event_id: format!("evt-{}", i * 11),
            user_id: "student123".to_string(),
            booking_date: Utc::now(),
            qr_code: format!("tkt-stud-{}", i),
        })
        .collect();

    c.bench_function("past_activity_then_most_recent_500", |b| {
        b.iter(|| {
            let attended = past_activity(black_box(&bookings), black_box(&catalog));
            let excluded: HashSet<&str> = attended.iter().map(String::as_str).collect();
            black_box(most_recent(&catalog, &excluded, 5))
        })
    });
}

criterion_group!(
    benches,
    bench_reconcile,
    bench_build_prompt,
    bench_history_and_fallback
);

criterion_main!(benches);

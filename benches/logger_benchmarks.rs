//! Criterion benchmarks for rust_field_logger

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_field_logger::formatters::{Formatter, FormatterBudget, JsonFormatter, TextFormatter};
use rust_field_logger::prelude::*;
use std::sync::Arc;

fn sample_fields() -> FieldMap {
    fields!(
        "app" => "myapp",
        "env" => "prod",
        "sql" => "SELECT * FROM admins",
        "user" => fields!("id" => 42, "name" => "alice", "roles" => vec!["admin", "ops"]),
        "password" => "hunter2",
        "latency_ms" => 12.5
    )
}

fn null_logger(level: LogLevel) -> Logger {
    Logger::builder()
        .level(level)
        .handler(HandlerKind::Null)
        .build()
        .unwrap()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("null_handler", |b| {
        b.iter(|| black_box(null_logger(LogLevel::Info)));
    });

    group.bench_function("with_filters", |b| {
        b.iter(|| {
            let logger = Logger::builder()
                .handler(HandlerKind::Null)
                .filter_data("password")
                .filter_data(FilterRule::regex("^token"))
                .filter_message("secret")
                .build()
                .unwrap();
            black_box(logger)
        });
    });

    group.finish();
}

// ============================================================================
// Logging Performance Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(LogLevel::Debug);

    group.bench_function("message_only", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("with_fields", |b| {
        let fields = sample_fields();
        b.iter(|| logger.info(("Deploying", black_box(fields.clone()))));
    });

    group.bench_function("lazy_block", |b| {
        b.iter(|| logger.debug_with(|| format!("expensive {}", black_box(42))));
    });

    let text = Logger::builder()
        .handler(HandlerKind::Stream)
        .output(Output::new("sink", std::io::sink()))
        .build()
        .unwrap();

    group.bench_function("stream_text", |b| {
        let fields = sample_fields();
        b.iter(|| text.info(("Deploying", black_box(fields.clone()))));
    });

    group.finish();
}

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    let logger = Arc::new(null_logger(LogLevel::Info));

    group.bench_function("multi_thread_4", |b| {
        let logger = Arc::clone(&logger);
        b.iter(|| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let logger = Arc::clone(&logger);
                    std::thread::spawn(move || {
                        logger.info(black_box("Concurrent message"));
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    });

    group.finish();
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");
    group.throughput(Throughput::Elements(1));

    let fields = sample_fields();
    for max_bytes in [32usize, 8192] {
        let budget = FormatterBudget::default().with_max_bytes(max_bytes);

        group.bench_with_input(BenchmarkId::new("text", max_bytes), &budget, |b, budget| {
            b.iter(|| black_box(TextFormatter.dump(&fields, *budget)));
        });

        group.bench_with_input(BenchmarkId::new("json", max_bytes), &budget, |b, budget| {
            b.iter(|| black_box(JsonFormatter.dump(&fields, *budget)));
        });
    }

    group.finish();
}

// ============================================================================
// Filtering Benchmarks
// ============================================================================

fn bench_data_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("data_filter");
    group.throughput(Throughput::Elements(1));

    let fields = sample_fields();
    let filter = DataFilter::new(vec![
        FilterRule::literal("password"),
        FilterRule::literal("user.name"),
        FilterRule::regex("^sq"),
        FilterRule::predicate(|path: &[String]| path.last().is_some_and(|key| key == "roles")),
    ])
    .unwrap();

    group.bench_function("mixed_rules", |b| {
        b.iter(|| black_box(filter.filter(black_box(&fields))));
    });

    let message = MessageFilter::new(vec![MessageRule::literal("secret")]).unwrap();
    group.bench_function("message_mask", |b| {
        b.iter(|| black_box(message.mask_text(black_box("a secret and another secret"))));
    });

    group.finish();
}

fn bench_level_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("level_filtering");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger(LogLevel::Warn);

    group.bench_function("below_threshold", |b| {
        b.iter(|| logger.debug(black_box("This should be filtered")));
    });

    group.bench_function("above_threshold", |b| {
        b.iter(|| logger.error(black_box("This should be logged")));
    });

    group.finish();
}

// ============================================================================
// Criterion Configuration
// ============================================================================

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_concurrent_logging,
    bench_formatters,
    bench_data_filter,
    bench_level_filtering
);

criterion_main!(benches);

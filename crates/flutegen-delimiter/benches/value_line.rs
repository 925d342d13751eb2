//! Value line tokenizing benchmarks
//!
//! # Line Shapes
//!
//! - **Plain**: unquoted TSV values
//! - **Quoted**: CSV values with embedded delimiters and `""` escapes
//! - **Continued**: a quoted value spread over several physical lines

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use flutegen_delimiter::{RecordReader, ValueLineAnalyzer};
use std::hint::black_box;
use std::io::Cursor;

// ============================================================================
// Fixtures
// ============================================================================

fn plain_line(columns: usize) -> String {
    (0..columns)
        .map(|i| format!("value{i}"))
        .collect::<Vec<_>>()
        .join("\t")
}

fn quoted_line(columns: usize) -> String {
    (0..columns)
        .map(|i| format!("\"say \"\"{i}\"\", then, more\""))
        .collect::<Vec<_>>()
        .join(",")
}

fn continued_file(records: usize) -> String {
    let mut text = String::from("ID,MEMO,NAME\n");
    for i in 0..records {
        text.push_str(&format!("{i},\"first line\nsecond line\nthird\",name{i}\n"));
    }
    text
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_line_analyze");

    for columns in [4, 32, 256] {
        let plain = plain_line(columns);
        group.throughput(Throughput::Bytes(plain.len() as u64));
        group.bench_with_input(BenchmarkId::new("plain", columns), &plain, |b, line| {
            let analyzer = ValueLineAnalyzer::new("\t");
            b.iter(|| analyzer.analyze(black_box(line)));
        });

        let quoted = quoted_line(columns);
        group.throughput(Throughput::Bytes(quoted.len() as u64));
        group.bench_with_input(BenchmarkId::new("quoted", columns), &quoted, |b, line| {
            let analyzer = ValueLineAnalyzer::new(",");
            b.iter(|| analyzer.analyze(black_box(line)));
        });
    }

    group.finish();
}

fn bench_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_reader");

    for records in [100, 10_000] {
        let text = continued_file(records);
        group.throughput(Throughput::Elements(records as u64));
        group.bench_with_input(BenchmarkId::new("continued", records), &text, |b, text| {
            b.iter(|| {
                let mut reader = RecordReader::new(Cursor::new(text.as_bytes()), ",", "bench.csv");
                let _ = reader.read_header();
                reader.filter_map(Result::ok).count()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_reader);
criterion_main!(benches);

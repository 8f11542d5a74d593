use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fspath::escape::{escape, needs_escaping, unescape};
use fspath::{FsPath, PathKind, Separator};

fn bench_escape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape");

    // Benchmark the identity fast path
    group.bench_function("needs_escaping_miss", |b| {
        b.iter(|| needs_escaping(black_box("a perfectly ordinary file name.txt")));
    });

    // Benchmark the short-circuit on an early hit
    group.bench_function("needs_escaping_hit", |b| {
        b.iter(|| needs_escaping(black_box("<immediately restricted>")));
    });

    group.bench_function("escape_clean", |b| {
        b.iter(|| escape(black_box("a perfectly ordinary file name.txt")));
    });

    group.bench_function("escape_restricted", |b| {
        b.iter(|| escape(black_box("a<b>c|d\"e\\f/g%h")));
    });

    group.bench_function("unescape_tokens", |b| {
        b.iter(|| unescape(black_box("a%3cb%3ec%7cd%93e%5cf%2fg%25h")));
    });

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, input) in [
        ("absolute", "C:\\projects\\app\\src\\main.rs"),
        ("relative", "..\\..\\app\\src\\main.rs"),
        ("unknown", "??\\app\\src\\main.rs"),
        ("escaped", "C:\\inbox\\re a%3cb%7cc.txt"),
        ("unc", "\\\\server\\share\\data"),
    ] {
        group.bench_with_input(BenchmarkId::new("parse", name), &input, |b, &input| {
            b.iter(|| FsPath::parse(black_box(input)));
        });
    }

    group.finish();
}

fn bench_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");

    let deep = FsPath::parse("C:\\a\\b\\c\\d\\e\\f").unwrap();
    let anchor = FsPath::parse("C:\\a\\b\\x\\y").unwrap();
    let relative = deep.make_relative(&anchor).unwrap();

    group.bench_function("parent", |b| {
        b.iter(|| black_box(&deep).parent());
    });

    group.bench_function("combine", |b| {
        b.iter(|| black_box(&deep).combine(["g", "h"]));
    });

    group.bench_function("make_relative", |b| {
        b.iter(|| black_box(&deep).make_relative(black_box(&anchor)));
    });

    group.bench_function("make_absolute", |b| {
        b.iter(|| black_box(&relative).make_absolute(black_box(&anchor)));
    });

    group.finish();
}

fn bench_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("display");

    let plain = FsPath::parse("C:\\projects\\app\\src\\main.rs").unwrap();
    let escaped = FsPath::from_segments(PathKind::Absolute, ["C:", "a<b", "c|d"]).unwrap();

    group.bench_function("plain", |b| {
        b.iter(|| black_box(&plain).to_path_string(Separator::Directory));
    });

    group.bench_function("escaped", |b| {
        b.iter(|| black_box(&escaped).to_path_string(Separator::Directory));
    });

    group.finish();
}

criterion_group!(benches, bench_escape, bench_parse, bench_algebra, bench_display);
criterion_main!(benches);

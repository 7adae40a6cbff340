use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use goparse::lexer::Lexer;
use goparse::parse_file;
use std::hint::black_box as bb;

const SMALL_INTERFACE: &str = r#"
package repository

type UserRepository interface {
    FindByID(id int) *User
    RemoveByID(id int)
}
"#;

const MEDIUM_PACKAGE: &str = r#"
package store

import (
    "context"
    "time"
)

type Entry struct {
    Key     string
    Value   []byte
    Expires time.Time
}

type Store interface {
    Get(ctx context.Context, key string) (*Entry, error)
    Put(ctx context.Context, e *Entry) error
    Delete(ctx context.Context, keys ...string) (int, error)
    Watch(ctx context.Context) <-chan *Entry
    Snapshot() map[string][]*Entry
}

func helper(n int) int {
    total := 0
    for i := 0; i < n; i++ {
        total += i * i
    }
    return total
}
"#;

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for (name, input) in [("small", SMALL_INTERFACE), ("medium", MEDIUM_PACKAGE)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("iterate_only_bytes", name),
            &input,
            |b, &input| {
                b.iter(|| {
                    let mut acc: u64 = 0;
                    for (l, _t, r) in Lexer::new(bb(input)) {
                        acc = acc.wrapping_add(l as u64);
                        acc = acc.wrapping_add(r as u64);
                    }
                    bb(acc);
                });
            },
        );
    }

    group.finish();
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("parser");

    for (name, input) in [("small", SMALL_INTERFACE), ("medium", MEDIUM_PACKAGE)] {
        group.throughput(Throughput::Bytes(input.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_file", name), &input, |b, &input| {
            b.iter(|| bb(parse_file(bb(input)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lexer, bench_parser);
criterion_main!(benches);

//! INI parse / write benchmarks.
//!
//! Measures parsing and serialising a synthetic file with many sections,
//! inline comments and multi-line values.

use cfgreg_ini::{IniDocument, parse_str};
use criterion::{Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;

/// Build a file with `sections` sections of `options` options each.
fn synthetic_ini(sections: usize, options: usize) -> String {
    let mut text = String::from("# generated\n");
    for s in 0..sections {
        writeln!(text, "[Section{s}]").unwrap();
        for o in 0..options {
            if o % 10 == 0 {
                writeln!(text, "multi{o} = first line ; note\n  second line").unwrap();
            } else {
                writeln!(text, "Option{o} = value-{s}-{o}").unwrap();
            }
        }
        text.push('\n');
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let text = synthetic_ini(50, 40);

    c.bench_function("ini_parse_50x40", |b| {
        b.iter(|| {
            let _doc = black_box(parse_str(black_box(&text)).unwrap());
        });
    });
}

fn bench_write(c: &mut Criterion) {
    let doc: IniDocument = parse_str(&synthetic_ini(50, 40)).unwrap();

    c.bench_function("ini_write_50x40", |b| {
        b.iter(|| {
            let _text = black_box(doc.to_ini_string());
        });
    });
}

criterion_group!(benches, bench_parse, bench_write);
criterion_main!(benches);

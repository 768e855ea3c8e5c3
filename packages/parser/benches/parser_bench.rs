use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagekit_parser::{parse_fragment, serialize_fragment, StyleDeclarations};

const FEATHER_ICON: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"><circle cx="12" cy="12" r="10"></circle><line x1="12" y1="8" x2="12" y2="16"></line><line x1="8" y1="12" x2="16" y2="12"></line></svg>"#;

fn parse_icon(c: &mut Criterion) {
    c.bench_function("parse_icon", |b| b.iter(|| parse_fragment(black_box(FEATHER_ICON))));
}

fn parse_large_icon(c: &mut Criterion) {
    let mut source = String::from(r#"<svg viewBox="0 0 512 512"><g>"#);
    for i in 0..200 {
        source.push_str(&format!(
            r#"<path d="M{i} {i}L{} {}Z" fill="currentColor"/>"#,
            i + 10,
            i + 20
        ));
    }
    source.push_str("</g></svg>");

    c.bench_function("parse_large_icon", |b| b.iter(|| parse_fragment(black_box(&source))));
}

fn serialize_icon(c: &mut Criterion) {
    let fragment = parse_fragment(FEATHER_ICON).unwrap();
    c.bench_function("serialize_icon", |b| {
        b.iter(|| serialize_fragment(black_box(&fragment)))
    });
}

fn parse_inline_style(c: &mut Criterion) {
    let css = "display: inline-block; vertical-align: middle; flex-shrink: 0; color: #ff0000; background: url(\"a;b\")";
    c.bench_function("parse_inline_style", |b| {
        b.iter(|| StyleDeclarations::parse(black_box(css)))
    });
}

criterion_group!(
    benches,
    parse_icon,
    parse_large_icon,
    serialize_icon,
    parse_inline_style
);
criterion_main!(benches);

//! Benchmarks for hierarchy inference.
//!
//! Run with: cargo bench
//!
//! Synthetic documents alternate chapter, section and body paragraphs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use pdf_structure::analysis::StyleDistribution;
use pdf_structure::render::{self, RenderOptions};
use pdf_structure::source::{Line, PageLines};
use pdf_structure::{HierarchyParser, MapperKind, MemorySource, ParserOptions, TextContainer};

/// Creates paragraph boxes for `chapters` chapters with four sections each.
fn create_containers(chapters: usize) -> Vec<TextContainer> {
    let mut containers = Vec::new();
    for chapter in 0..chapters {
        containers.push(TextContainer::single_line(
            &format!("Chapter {}", chapter + 1),
            18.0,
            "Helvetica-Bold",
            chapter,
        ));
        for section in 0..4 {
            containers.push(TextContainer::single_line(
                &format!("{}.{} Section heading", chapter + 1, section + 1),
                13.0,
                "Helvetica-Bold",
                chapter,
            ));
            for _ in 0..5 {
                containers.push(TextContainer::single_line(
                    "Benchmark body text for hierarchy inference performance measurement.",
                    10.0,
                    "Helvetica",
                    chapter,
                ));
            }
        }
    }
    containers
}

/// Creates page lines that have to be grouped into boxes on every read.
fn create_pages(page_count: usize) -> Vec<PageLines> {
    (0..page_count)
        .map(|index| {
            let mut lines = vec![
                Line::from_text("Page heading", 16.0, "Times-Bold", 72.0, 740.0).into(),
            ];
            let mut y = 700.0;
            for paragraph in 0..6 {
                for line in 0..4 {
                    let text = format!("paragraph {} line {} of the body text", paragraph, line);
                    lines.push(Line::from_text(&text, 10.0, "Times", 72.0, y).into());
                    y -= 11.0;
                }
                y -= 8.0;
            }
            PageLines::new(index, lines)
        })
        .collect()
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for chapters in [10, 100] {
        let source = MemorySource::new(create_containers(chapters));
        group.bench_with_input(BenchmarkId::new("containers", chapters), &source, |b, source| {
            b.iter(|| HierarchyParser::new().parse(black_box(source)))
        });
    }

    for pages in [10, 100] {
        let source = MemorySource::from_pages(create_pages(pages));
        group.bench_with_input(BenchmarkId::new("pages", pages), &source, |b, source| {
            b.iter(|| HierarchyParser::new().parse(black_box(source)))
        });
    }

    group.finish();
}

fn bench_mappers(c: &mut Criterion) {
    let source = MemorySource::new(create_containers(50));
    let mut group = c.benchmark_group("mapper");

    for kind in [
        MapperKind::Log,
        MapperKind::LogLegacy,
        MapperKind::PivotLinear,
        MapperKind::Linear,
    ] {
        let parser = HierarchyParser::new().with_options(ParserOptions::new().with_mapper(kind));
        group.bench_function(kind.as_str(), |b| {
            b.iter(|| parser.parse(black_box(&source)))
        });
    }

    group.finish();
}

fn bench_distribution(c: &mut Criterion) {
    let containers = create_containers(100);
    c.bench_function("distribution_analyze", |b| {
        b.iter(|| StyleDistribution::analyze(black_box(&containers)))
    });
}

fn bench_render(c: &mut Criterion) {
    let source = MemorySource::new(create_containers(100));
    let doc = match HierarchyParser::new().parse(&source) {
        Ok(doc) => doc,
        Err(e) => panic!("benchmark document failed to parse: {}", e),
    };
    let options = RenderOptions::default();

    c.bench_function("render_text", |b| {
        b.iter(|| render::to_text(black_box(&doc), &options))
    });
    c.bench_function("render_json", |b| {
        b.iter(|| render::to_json(black_box(&doc), render::JsonFormat::Compact))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_mappers,
    bench_distribution,
    bench_render
);
criterion_main!(benches);

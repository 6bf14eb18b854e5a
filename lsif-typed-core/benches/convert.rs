//! Benchmark for conversion and export performance.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lsif_typed_core::exporter::ndjson::write_ndjson;
use lsif_typed_core::{
    convert_index, ConversionOptions, Document, Index, Metadata, Occurrence, Relationship,
    SymbolInformation, TextEncoding, ToolInfo,
};

/// A synthetic project: every document defines a handful of classes that
/// implement a shared interface and call into the previous document.
fn synthetic_index(documents: usize, symbols_per_document: usize) -> Index {
    let interface = "scip-ts npm dep 1.0 Handler#".to_string();
    let documents = (0..documents)
        .map(|d| {
            let mut symbols = Vec::new();
            let mut occurrences = Vec::new();
            for s in 0..symbols_per_document {
                let symbol = format!("scip-ts npm app 1.0 mod{d}/Class{s}#");
                let line = (s * 10) as i32;
                symbols.push(
                    SymbolInformation::new(symbol.clone())
                        .with_documentation(format!("```ts\nclass Class{s}\n```"))
                        .with_relationship(Relationship::implementation(interface.clone())),
                );
                occurrences.push(Occurrence::definition(vec![line, 6, 12], symbol));
                if d > 0 {
                    let callee = format!("scip-ts npm app 1.0 mod{}/Class{s}#", d - 1);
                    occurrences.push(Occurrence::reference(vec![line + 1, 4, 10], callee));
                }
                let local = format!("local {s}");
                symbols.push(SymbolInformation::new(local.clone()));
                occurrences.push(Occurrence::definition(vec![line + 2, 8, 9], local.clone()));
                occurrences.push(Occurrence::reference(vec![line + 3, 8, 9], local));
            }
            Document {
                relative_path: format!("src/mod{d}.ts"),
                symbols,
                occurrences,
            }
        })
        .collect();

    Index {
        metadata: Some(Metadata {
            project_root: "file:///bench".to_string(),
            tool_info: Some(ToolInfo {
                name: "scip-typescript".to_string(),
                version: "0.3.0".to_string(),
            }),
            text_encoding: TextEncoding::Utf16,
        }),
        external_symbols: vec![SymbolInformation::new(interface)],
        documents,
    }
}

fn bench_convert_small(c: &mut Criterion) {
    let index = synthetic_index(10, 10);
    c.bench_function("convert_10_documents", |b| {
        b.iter(|| convert_index(black_box(&index), ConversionOptions::default()))
    });
}

fn bench_convert_large(c: &mut Criterion) {
    let index = synthetic_index(500, 20);
    c.bench_function("convert_500_documents", |b| {
        b.iter(|| convert_index(black_box(&index), ConversionOptions::default()))
    });
}

fn bench_export_ndjson(c: &mut Criterion) {
    let index = synthetic_index(100, 20);
    let elements = match convert_index(&index, ConversionOptions::default()) {
        Ok(elements) => elements,
        Err(err) => panic!("synthetic index failed to convert: {}", err),
    };
    c.bench_function("export_ndjson_100_documents", |b| {
        b.iter(|| {
            let mut buffer = Vec::with_capacity(1 << 20);
            write_ndjson(black_box(&elements), &mut buffer).map(|_| buffer.len())
        })
    });
}

criterion_group!(benches, bench_convert_small, bench_convert_large, bench_export_ndjson);
criterion_main!(benches);

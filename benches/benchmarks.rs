//! Performance benchmarks for dirjson

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use dirjson::test_utils::TestDir;
use dirjson::{
    ProjectDocument, ReaderConfig, SilentProgress, TreeReader, TreeWriter, WriterConfig,
    to_pretty_json,
};

const SOURCE: &str = r#"//! Module documentation

use std::path::Path;

fn main() {
    println!("Hello, world!");
}
"#;

/// Build a tree of `dirs` directories, each with `files` source files.
fn create_tree(dirs: usize, files: usize) -> TestDir {
    let dir = TestDir::new();
    for d in 0..dirs {
        for f in 0..files {
            dir.add_file(&format!("module_{}/nested/file_{}.rs", d, f), SOURCE);
        }
    }
    dir
}

fn bench_read_tree(c: &mut Criterion) {
    let dir = create_tree(20, 25);
    let reader = TreeReader::new(ReaderConfig::default());

    c.bench_function("read_tree_500_files", |b| {
        b.iter(|| black_box(reader.read(dir.path())))
    });

    let tree = reader.read(dir.path());
    c.bench_function("serialize_tree_500_files", |b| {
        b.iter(|| black_box(to_pretty_json(&tree).unwrap()))
    });
}

fn bench_write_document(c: &mut Criterion) {
    let entries: Vec<_> = (0..200)
        .map(|i| {
            serde_json::json!({
                "name": format!("pkg_{}/src/file_{}.rs", i % 10, i),
                "content": SOURCE,
            })
        })
        .collect();
    let text = serde_json::json!({ "project_files": entries }).to_string();

    c.bench_function("parse_document_200_entries", |b| {
        b.iter(|| black_box(ProjectDocument::from_json_str(&text, &WriterConfig::default())))
    });

    let document = ProjectDocument::from_json_str(&text, &WriterConfig::default()).unwrap();
    let out = TestDir::new();
    let writer = TreeWriter::new(WriterConfig {
        output_dir: out.path().join("generated"),
        ..Default::default()
    });
    c.bench_function("write_document_200_entries", |b| {
        b.iter(|| black_box(writer.write(&document, &mut SilentProgress).unwrap()))
    });
}

criterion_group!(benches, bench_read_tree, bench_write_document);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nbt_codec::{
    from_bytes, from_snbt, from_value, to_bytes, to_snbt_with_options, to_value, BinaryOptions,
    Compression, Edition, Payload, SnbtOptions, Tag,
};

/// A chunk-like document with `sections` sub-compounds.
fn chunk(sections: usize) -> Tag {
    let sections = (0..sections)
        .map(|y| {
            Payload::compound(vec![
                Tag::new("Y", Payload::Byte(y as i8)).unwrap(),
                Tag::new("BlockStates", Payload::LongArray((1..=256).map(|i| i << 36).collect())).unwrap(),
                Tag::new("SkyLight", Payload::ByteArray(vec![15; 2048])).unwrap(),
                Tag::new(
                    "Palette",
                    Payload::list(vec![
                        Payload::compound(vec![Tag::new(
                            "Name",
                            Payload::string("minecraft:stone").unwrap(),
                        )
                        .unwrap()]),
                        Payload::compound(vec![Tag::new(
                            "Name",
                            Payload::string("minecraft:air").unwrap(),
                        )
                        .unwrap()]),
                    ])
                    .unwrap(),
                )
                .unwrap(),
            ])
        })
        .collect();

    Tag::root(Payload::compound(vec![
        Tag::new("DataVersion", Payload::Int(3465)).unwrap(),
        Tag::new("xPos", Payload::Int(-12)).unwrap(),
        Tag::new("zPos", Payload::Int(40)).unwrap(),
        Tag::new("Status", Payload::string("minecraft:full").unwrap()).unwrap(),
        Tag::new("sections", Payload::list(sections).unwrap()).unwrap(),
    ]))
    .unwrap()
}

fn benchmark_binary_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_encode");

    for size in [1, 8, 24].iter() {
        let root = chunk(*size);
        for (label, compression) in [("none", Compression::None), ("gzip", Compression::Gzip)] {
            let options = BinaryOptions::java().with_compression(compression);
            group.bench_with_input(BenchmarkId::new(label, size), &root, |b, root| {
                b.iter(|| to_bytes(black_box(root), &options))
            });
        }
    }
    group.finish();
}

fn benchmark_binary_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_decode");

    for size in [1, 8, 24].iter() {
        let root = chunk(*size);
        for edition in [Edition::Java, Edition::Bedrock] {
            let options = BinaryOptions::new(edition).with_compression(Compression::None);
            let bytes = to_bytes(&root, &options).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", edition), size),
                &bytes,
                |b, bytes| b.iter(|| from_bytes(black_box(bytes), &options)),
            );
        }
        let gzipped = to_bytes(&root, &BinaryOptions::java()).unwrap();
        group.bench_with_input(BenchmarkId::new("auto_gzip", size), &gzipped, |b, bytes| {
            b.iter(|| from_bytes(black_box(bytes), &BinaryOptions::java()))
        });
    }
    group.finish();
}

fn benchmark_snbt(c: &mut Criterion) {
    let mut group = c.benchmark_group("snbt");
    let payload = chunk(4).into_payload();

    for (label, options) in [
        ("compact", SnbtOptions::compact()),
        ("pretty", SnbtOptions::default()),
        ("multiline", SnbtOptions::multiline()),
    ] {
        group.bench_function(format!("serialize_{}", label), |b| {
            b.iter(|| to_snbt_with_options(black_box(&payload), &options))
        });

        let text = to_snbt_with_options(&payload, &options);
        group.bench_function(format!("parse_{}", label), |b| {
            b.iter(|| from_snbt(black_box(&text)))
        });
    }
    group.finish();
}

fn benchmark_generic(c: &mut Criterion) {
    let payload = chunk(4).into_payload();
    let value = to_value(&payload);

    c.bench_function("generic_to_value", |b| b.iter(|| to_value(black_box(&payload))));
    c.bench_function("generic_from_value", |b| {
        b.iter(|| from_value(black_box(&value)))
    });
}

criterion_group!(
    benches,
    benchmark_binary_encode,
    benchmark_binary_decode,
    benchmark_snbt,
    benchmark_generic,
);
criterion_main!(benches);

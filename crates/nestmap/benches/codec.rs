use criterion::{criterion_group, criterion_main, Criterion};
use nestmap::{find_value, flatten, merge, unflatten};
use serde_json::{json, Map, Value};
use std::hint::black_box;

/// A tree `width` wide at every level and `depth` levels deep.
fn wide_tree(width: usize, depth: usize) -> Value {
    let mut value = json!("leaf");
    for level in 0..depth {
        let mut map = Map::new();
        for i in 0..width {
            map.insert(format!("k{level}_{i}"), value.clone());
        }
        value = Value::Object(map);
    }
    value
}

fn bench_codec(c: &mut Criterion) {
    let tree = wide_tree(6, 5);
    let flat = flatten(&tree).unwrap();

    c.bench_function("flatten_6x5", |b| {
        b.iter(|| flatten(black_box(&tree)).unwrap())
    });
    c.bench_function("unflatten_6x5", |b| b.iter(|| unflatten(black_box(&flat))));
    c.bench_function("merge_self_6x5", |b| {
        b.iter(|| merge(black_box(&tree), black_box(&tree)).unwrap())
    });
    c.bench_function("find_value_miss_6x5", |b| {
        b.iter(|| find_value(black_box(&json!("absent")), black_box(&tree)))
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);

use criterion::{Criterion, criterion_group, criterion_main};
use rowcraft::field::{Field, FieldType};
use rowcraft::table::{self, Table};
use rowcraft::transform::Transform;
use rowcraft::value::Value;

fn gen_table(row_count: usize, transformed: bool) -> Table {
    let header = if transformed {
        vec![
            Field::with_transform("time", FieldType::UInt, Transform::sequence()),
            Field::with_transform("temp", FieldType::Int, Transform::new(20, 100, 0)),
        ]
    } else {
        vec![
            Field::new("time", FieldType::UInt),
            Field::new("temp", FieldType::Float),
        ]
    };

    let mut data = Vec::with_capacity(row_count);
    for i in 0..row_count {
        // Deterministic but non-trivial series
        let temp = 20.0 + (i % 80) as f64 * 0.25;
        data.push(vec![
            Value::UInt(1_609_459_200 + i as u32 * 60),
            Value::Float(temp),
        ]);
    }

    Table {
        header,
        data,
        meta: None,
    }
}

fn bench_encode(c: &mut Criterion) {
    for &row_count in &[10usize, 100, 1000] {
        let plain = gen_table(row_count, false);
        c.bench_function(&format!("encode_{}_rows", row_count), |b| {
            b.iter(|| {
                let _ = table::encode(&plain).unwrap();
            })
        });

        let transformed = gen_table(row_count, true);
        c.bench_function(&format!("encode_{}_rows_transformed", row_count), |b| {
            b.iter(|| {
                let _ = table::encode(&transformed).unwrap();
            })
        });
    }
}

fn bench_decode(c: &mut Criterion) {
    for &row_count in &[10usize, 100, 1000] {
        let buf = table::encode(&gen_table(row_count, false)).unwrap();
        c.bench_function(&format!("decode_{}_rows", row_count), |b| {
            b.iter(|| {
                let _ = table::decode(&buf).unwrap();
            })
        });
    }
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqdot_core::{build_matrix, filter_matrix};

fn generate_test_sequence(length: usize) -> Vec<u8> {
    let pattern = b"ATCGGATCCA";
    pattern.iter().copied().cycle().take(length).collect()
}

fn bench_build_matrix(c: &mut Criterion) {
    let seq1 = generate_test_sequence(1000);
    let seq2 = generate_test_sequence(800);

    c.bench_function("build_1000x800", |b| {
        b.iter(|| build_matrix(black_box(&seq1), black_box(&seq2)).unwrap())
    });
}

fn bench_filter_matrix(c: &mut Criterion) {
    let seq1 = generate_test_sequence(1000);
    let seq2 = generate_test_sequence(800);
    let matrix = build_matrix(&seq1, &seq2).unwrap();

    let mut group = c.benchmark_group("filter_1000x800");
    for &(window, threshold) in &[(5usize, 3usize), (20, 12), (100, 60)] {
        group.bench_function(format!("w{}_t{}", window, threshold), |b| {
            b.iter(|| filter_matrix(black_box(&matrix), window, threshold).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_matrix, bench_filter_matrix);
criterion_main!(benches);

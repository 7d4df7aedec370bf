//! Benchmarks for QUASAR circuit operations
//!
//! Run with: cargo bench -p quasar-ir

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use quasar_ir::{Circuit, QubitId};

/// Benchmark circuit creation
fn bench_circuit_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("circuit_creation");

    for num_qubits in &[2, 5, 10, 20, 50] {
        group.bench_with_input(
            BenchmarkId::new("with_size", num_qubits),
            num_qubits,
            |b, &n| {
                b.iter(|| Circuit::with_size(black_box("bench"), black_box(n)));
            },
        );
    }

    group.finish();
}

/// Benchmark adding gates to a circuit
fn bench_gate_addition(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_addition");

    group.bench_function("h_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10);
        b.iter(|| {
            circuit.h(black_box(QubitId(0))).unwrap();
        });
    });

    group.bench_function("cx_gate", |b| {
        let mut circuit = Circuit::with_size("bench", 10);
        b.iter(|| {
            circuit
                .cx(black_box(QubitId(0)), black_box(QubitId(1)))
                .unwrap();
        });
    });

    group.finish();
}

/// Benchmark depth calculation and text drawing on GHZ circuits
fn bench_depth_and_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("depth_and_draw");

    for n in &[5u32, 20, 50] {
        let circuit = Circuit::ghz(*n).unwrap();
        group.bench_with_input(BenchmarkId::new("depth", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.depth()));
        });
        group.bench_with_input(BenchmarkId::new("draw_text", n), &circuit, |b, circuit| {
            b.iter(|| black_box(circuit.to_string()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_circuit_creation,
    bench_gate_addition,
    bench_depth_and_draw
);
criterion_main!(benches);

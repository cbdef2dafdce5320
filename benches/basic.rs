use criterion::{
    black_box,
    criterion_group,
    criterion_main,
    BenchmarkId,
    Criterion,
    Throughput,
};

use firstfit::Heap;

fn alloc_free_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("alloc free sizes");

    for size in [16, 64, 256, 1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut heap = Heap::new();

            b.iter(|| {
                let ptr = heap.alloc(black_box(size)).unwrap();
                heap.free(Some(ptr));
            });
        });
    }

    group.finish();
}

fn realloc_cycle(c: &mut Criterion) {
    c.bench_function("realloc shrink grow", |b| {
        let mut heap = Heap::new();
        let mut ptr = heap.alloc(1024).unwrap();

        b.iter(|| {
            ptr = heap.realloc(Some(ptr), black_box(64)).unwrap().unwrap();
            ptr = heap.realloc(Some(ptr), black_box(1024)).unwrap().unwrap();
        });
    });
}

fn first_fit_scan(c: &mut Criterion) {
    c.bench_function("first fit over a long chain", |b| {
        let mut heap = Heap::new();

        // A chain of occupied blocks with one free slot near the end.
        let blocks: Vec<_> = (0..1000).map(|_| heap.alloc(64).unwrap()).collect();
        heap.free(Some(blocks[998]));

        b.iter(|| {
            let ptr = heap.alloc(black_box(64)).unwrap();
            heap.free(Some(ptr));
        });
    });
}

criterion_group!(benches, alloc_free_sizes, realloc_cycle, first_fit_scan);
criterion_main!(benches);

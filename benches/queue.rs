use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use list_transfer::{CircularQueue, Item};

const ITEMS: i32 = 1024;

fn bench_enqueue_dequeue(c: &mut Criterion) {
    c.bench_function("enqueue_dequeue_1k", |b| {
        let mut queue = CircularQueue::with_capacity(ITEMS as usize);
        b.iter(|| {
            for i in 0..ITEMS {
                queue.enqueue(Item::new(black_box(i)));
            }
            while let Some(item) = queue.dequeue() {
                black_box(item);
            }
        })
    });
}

fn bench_transfer(c: &mut Criterion) {
    c.bench_function("transfer_1k", |b| {
        b.iter_batched(
            || ((0..ITEMS).collect::<CircularQueue<i32>>(), CircularQueue::new()),
            |(mut src, mut dst)| {
                black_box(src.transfer(&mut dst));
                dst
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_enqueue_dequeue, bench_transfer);
criterion_main!(benches);

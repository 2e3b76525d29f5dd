use criterion::{black_box, criterion_group, criterion_main, Criterion};
use esl_core::rle;

const WIDTH: usize = 400;
const HEIGHT: usize = 300;

/// Price tag style plane: a border, a few text-like rows and a dithered block
fn label_plane() -> Vec<bool> {
    let mut plane = vec![false; WIDTH * HEIGHT];
    for y in 0..HEIGHT {
        for x in 0..WIDTH {
            let border = x < 2 || y < 2 || x >= WIDTH - 2 || y >= HEIGHT - 2;
            let text = (40..80).contains(&y) && (x / 3) % 4 != 0;
            let dither = (200..260).contains(&y) && (x + y) % 2 == 0;
            plane[y * WIDTH + x] = border || text || dither;
        }
    }
    plane
}

fn bench_rle(c: &mut Criterion) {
    let plane = label_plane();
    let compressed = rle::compress(&plane);

    c.bench_function("compress 400x300", |b| {
        b.iter(|| rle::compress(black_box(&plane)))
    });
    c.bench_function("decompress 400x300", |b| {
        b.iter(|| rle::decompress(black_box(&compressed), WIDTH * HEIGHT))
    });
}

criterion_group!(benches, bench_rle);
criterion_main!(benches);

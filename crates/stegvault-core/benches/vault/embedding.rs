use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use stegvault_core::{ChannelLayout, Key, PixelBuffer, Vault, VaultOptions};

fn carrier() -> PixelBuffer {
    PixelBuffer::from_fn(512, 512, ChannelLayout::Rgba, |x, y, c| {
        (x ^ y) as u8 ^ (c as u8 * 64)
    })
    .expect("Carrier cannot be built.")
}

pub fn vault_embedding(c: &mut Criterion) {
    let cover = carrier();
    let key = Key::generate();
    let secret_message = vec![42u8; 16 * 1024];

    let mut group = c.benchmark_group("Vault Embedding");
    for (name, options) in [
        ("sequential", VaultOptions::default()),
        ("parallel", VaultOptions::default().with_parallel(true)),
        (
            "parallel, fill unused",
            VaultOptions::default()
                .with_parallel(true)
                .with_fill_unused(true),
        ),
    ] {
        let vault = Vault::with_options(options);
        group.bench_function(name, |b| {
            b.iter_batched(
                || secret_message.clone(),
                |message| {
                    vault
                        .embed(&cover, &message, &key)
                        .expect("Cannot hide secret message")
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, vault_embedding);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use stegvault_core::{read_bits, ChannelLayout, Key, LsbOptions, PixelBuffer};

pub fn vault_extraction(c: &mut Criterion) {
    let cover = PixelBuffer::from_fn(512, 512, ChannelLayout::Rgb, |x, y, _| (x + y) as u8)
        .expect("Carrier cannot be built.");
    let key = Key::generate();
    let stego = stegvault_core::embed(&cover, &[7u8; 16 * 1024], &key)
        .expect("Cannot hide secret message");

    c.bench_function("Vault Extraction", |b| {
        b.iter(|| stegvault_core::extract(&stego, &key).expect("Cannot unveil secret message"))
    });

    c.bench_function("Raw Bit Reading", |b| {
        b.iter(|| {
            read_bits(&stego, 8 * 16 * 1024, &LsbOptions::default())
                .expect("Cannot read raw bits")
        })
    });
}

criterion_group!(benches, vault_extraction);
criterion_main!(benches);

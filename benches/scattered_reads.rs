use divan::Bencher;
use seekbuf::{BufferedReader, MemorySource, RefillPolicy, SeekableSource};

const DATA_LEN: usize = 4 * 1024 * 1024;

fn main() {
    divan::main();
}

fn source() -> MemorySource {
    MemorySource::new((0..DATA_LEN).map(|i| (i % 251) as u8).collect::<Vec<_>>())
}

/// Offsets that drift forward with small jumps back, like an index walk.
fn offsets() -> impl Iterator<Item = u64> {
    (0..20_000u64).map(|i| (i * 197 + (i % 7) * 3_001) % (DATA_LEN as u64 - 64))
}

const CAPACITIES: [usize; 3] = [4 * 1024, 64 * 1024, 512 * 1024];

fn small_reads(bencher: Bencher, capacity: usize, policy: RefillPolicy) {
    bencher
        .with_inputs(|| {
            BufferedReader::builder(source())
                .with_capacity(capacity)
                .with_refill_policy(policy)
                .build()
                .unwrap()
        })
        .bench_values(|mut reader| {
            let mut buf = [0u8; 12];
            for offset in offsets() {
                reader.seek(offset);
                reader.read_fully(&mut buf).unwrap();
                divan::black_box(&buf);
            }
        })
}

#[divan::bench(args = CAPACITIES)]
fn small_reads_discard(bencher: Bencher, capacity: usize) {
    small_reads(bencher, capacity, RefillPolicy::Discard)
}

#[divan::bench(args = CAPACITIES)]
fn small_reads_slide(bencher: Bencher, capacity: usize) {
    small_reads(bencher, capacity, RefillPolicy::Slide)
}

#[divan::bench]
fn small_reads_unbuffered(bencher: Bencher) {
    bencher.with_inputs(source).bench_values(|mut source| {
        let mut buf = [0u8; 12];
        for offset in offsets() {
            source.seek(offset).unwrap();
            source.read(&mut buf).unwrap();
            divan::black_box(&buf);
        }
    })
}

#[divan::bench]
fn single_bytes_sequential(bencher: Bencher) {
    bencher
        .with_inputs(|| BufferedReader::new(source()).unwrap())
        .bench_values(|mut reader| {
            for _ in 0..DATA_LEN {
                divan::black_box(reader.read_byte().unwrap());
            }
        })
}

use automata_incremental::{
    prelude::*,
    random::{generate_random_dfa, generate_random_words},
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn classified_sample(symbols: usize, number: usize) -> Vec<(String, bool)> {
    let mut rng = fastrand::Rng::with_seed(17);
    let dfa = generate_random_dfa(&mut rng, symbols, 20);
    let mut words = generate_random_words(&mut rng, dfa.alphabet(), 0, 16, number)
        .into_iter()
        .collect::<Vec<_>>();
    words.sort();
    words
        .into_iter()
        .map(|word| {
            let accepted = dfa.accepts(&word);
            (word, accepted)
        })
        .collect()
}

fn insert_sample(alphabet: &CharAlphabet, sample: &[(String, bool)]) -> PrefixClosedDagBuilder {
    let mut builder = PrefixClosedDagBuilder::new(alphabet.clone());
    for (word, accepting) in sample {
        // prefix-closedness makes some of the drawn classifications contradictory
        let _ = builder.insert(word, *accepting);
    }
    builder
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for symbols in [2, 4] {
        for number in [100, 1000] {
            let alphabet = CharAlphabet::of_size(symbols);
            let mixed = classified_sample(symbols, number);
            let accepted = mixed
                .iter()
                .map(|(word, _)| (word.clone(), true))
                .collect::<Vec<_>>();

            group.bench_with_input(
                BenchmarkId::new(format!("accepted/{symbols}"), number),
                &accepted,
                |b, sample| b.iter(|| black_box(insert_sample(&alphabet, sample))),
            );
            group.bench_with_input(
                BenchmarkId::new(format!("mixed/{symbols}"), number),
                &mixed,
                |b, sample| b.iter(|| black_box(insert_sample(&alphabet, sample))),
            );
        }
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let alphabet = CharAlphabet::of_size(3);
    let sample = classified_sample(3, 1000);
    let builder = insert_sample(&alphabet, &sample);
    c.bench_function("lookup", |b| {
        b.iter(|| {
            sample
                .iter()
                .filter(|(word, _)| builder.lookup(black_box(word)).is_definitive())
                .count()
        })
    });
}

criterion_group!(benches, bench_insert, bench_lookup);
criterion_main!(benches);

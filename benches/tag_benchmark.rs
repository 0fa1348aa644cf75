use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use freqtag::{config::TaggerConfig, dataset, task, TagModel, Tagger};

const WORDS: [(&str, &str); 12] = [
    ("the", "DT"),
    ("a", "DT"),
    ("board", "NN"),
    ("director", "NN"),
    ("will", "MD"),
    ("join", "VB"),
    ("run", "VB"),
    ("run", "NN"),
    ("as", "IN"),
    (",", ","),
    ("Vinken", "NNP"),
    (".", "."),
];

/// A tagged corpus of `n` tokens cycling through a small lexicon.
fn corpus(n: usize) -> String {
    (0..n)
        .map(|i| {
            let (w, t) = WORDS[(i * 7 + i / 5) % WORDS.len()];
            format!("{w}/{t}")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn tag(model: &TagModel, words: &[String]) -> usize {
    model.tagger(&TaggerConfig::default()).tag(words).len()
}

fn tag_benchmark(c: &mut Criterion) {
    let train = corpus(50_000);
    let model = task::train_tagger(&dataset::read_tagged_tokens(&train)).expect("failed to train");
    let words: Vec<String> = dataset::read_tagged_tokens(&corpus(10_000)).into_iter().map(|t| t.word).collect();

    c.bench_function("train_tagger", |b| {
        b.iter(|| task::train_tagger(black_box(&dataset::read_tagged_tokens(&train))))
    });
    c.bench_function("tag", |b| b.iter(|| tag(black_box(&model), black_box(&words))));
}

criterion_group! {
    name = benchmarks;
    config = Criterion::default().measurement_time(Duration::from_secs(10));
    targets = tag_benchmark
}

criterion_main!(benchmarks);

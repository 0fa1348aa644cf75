use criterion::{black_box, criterion_group, criterion_main, Criterion};
use freqtag::{config::ClassifierConfig, dataset::InstanceFormat, task};

const LEFT: [&str; 6] = ["the", "busy", "telephone", "struggling", "new", "product"];
const RIGHT: [&str; 5] = ["was", "is", "dead", "scrapped", "ringing"];
const MESSAGES: [&str; 4] = [
    "Apple doing a demo on the new iPad :)",
    "Does Merkel still lead? The leader",
    "http://t.co/x the phone is broken :(",
    "can't wait for the event ;-)",
];

fn wsd_corpus(n: usize, labeled: bool) -> String {
    let mut s = String::from("<corpus lang=\"en\">\n<lexelt item=\"line-n\">\n");
    for i in 0..n {
        let id = format!("line-n.{i}:");
        s.push_str(&format!("<instance id=\"{id}\">\n"));
        if labeled {
            let sense = if i % 3 == 0 { "phone" } else { "product" };
            s.push_str(&format!("<answer instance=\"{id}\" senseid=\"{sense}\"/>\n"));
        }
        let left: Vec<_> = (0..4).map(|k| LEFT[(i + k * 5) % LEFT.len()]).collect();
        let right: Vec<_> = (0..3).map(|k| RIGHT[(i * 3 + k) % RIGHT.len()]).collect();
        s.push_str(&format!(
            "<context>\n <s> {} <head>line</head> {} </s>\n</context>\n</instance>\n",
            left.join(" "),
            right.join(" ")
        ));
    }
    s.push_str("</lexelt>\n</corpus>\n");
    s
}

fn sentiment_corpus(n: usize, labeled: bool) -> String {
    let mut s = String::from("<corpus lang=\"en\">\n<lexelt item=\"sentiment\">\n");
    for i in 0..n {
        s.push_str(&format!("<instance id=\"{i}\">\n"));
        if labeled {
            let label = if i % 2 == 0 { "positive" } else { "negative" };
            s.push_str(&format!("<answer instance=\"{i}\" sentiment=\"{label}\"/>\n"));
        }
        s.push_str(&format!("<context>\n{}\n</context>\n</instance>\n", MESSAGES[i % MESSAGES.len()]));
    }
    s.push_str("</lexelt>\n</corpus>\n");
    s
}

fn classify_benchmark(c: &mut Criterion) {
    let config = ClassifierConfig::default();

    let (train, test) = (wsd_corpus(2_000, true), wsd_corpus(500, false));
    c.bench_function("wsd", |b| {
        b.iter(|| task::classify_corpus(black_box(&train), black_box(&test), InstanceFormat::Wsd, &config))
    });

    let (train, test) = (sentiment_corpus(2_000, true), sentiment_corpus(500, false));
    c.bench_function("sentiment", |b| {
        b.iter(|| task::classify_corpus(black_box(&train), black_box(&test), InstanceFormat::Sentiment, &config))
    });
}

criterion_group!(benchmarks, classify_benchmark);
criterion_main!(benchmarks);

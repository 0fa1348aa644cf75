use freqtag::{
    config::TaggerConfig,
    dataset,
    freq::tagger::{Decision, TaggedWord},
    task, Evaluation, TagTrainer, Tagger, Trainer,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn train(tokens: &[(&str, &str)]) -> freqtag::TagModel {
    let mut trainer = TagTrainer::new();
    for (w, t) in tokens {
        trainer.append(w, t);
    }
    trainer.train().expect("non-empty training data")
}

fn decode(model: &freqtag::TagModel, text: &str) -> Vec<TaggedWord> {
    let words: Vec<&str> = text.split_whitespace().collect();
    model.tagger(&TaggerConfig::default()).decode(&words)
}

#[test]
fn seen_word_takes_its_only_tag() {
    init();
    let run = task::tag_corpus("The/DT dog/NN barks/VBZ ./.", "dog", &TaggerConfig::default()).unwrap();
    assert_eq!(run.output(), "dog/NN");
}

#[test]
fn unseen_word_falls_back_and_carries_state() {
    let model = train(&[("The", "DT"), ("dog", "NN"), ("barks", "VBZ"), (".", ".")]);
    let tagged = decode(&model, "The zorblax barks");
    assert_eq!(tagged[1].tag, "NN");
    assert_eq!(tagged[1].decision, Decision::Unseen);
    // barks is scored against the fallback tag, which NN -> VBZ confirms
    assert_eq!(tagged[2].tag, "VBZ");
    assert_eq!(tagged[2].decision, Decision::Scored);
}

#[test]
fn unseen_word_ignores_override_rules() {
    let model = train(&[("The", "DT"), ("dog", "NN")]);
    let tagged = decode(&model, "ACME 757s");
    assert_eq!(tagged[0].tag, "NN");
    assert_eq!(tagged[1].tag, "NN");
}

#[test]
fn configured_fallback_tag() {
    let model = train(&[("The", "DT"), ("dog", "NN")]);
    let config = TaggerConfig { fallback_tag: "UNK".to_string(), overrides: true };
    assert_eq!(model.tagger(&config).tag(&["cat"]), vec!["UNK"]);
}

#[test]
fn punctuation_literal_beats_the_statistics() {
    let model = train(&[("x", "NN"), (",", "NN"), ("x", "NN")]);
    let tagged = decode(&model, "x ,");
    assert_eq!(tagged[1].tag, ",");
    assert_eq!(tagged[1].decision, Decision::Override);

    let config = TaggerConfig { overrides: false, ..Default::default() };
    assert_eq!(model.tagger(&config).tag(&["x", ","]), vec!["NN", "NN"]);
}

#[test]
fn override_feeds_the_next_transition() {
    // "Boeing 757s" : the plural override must become the previous tag
    let model = train(&[("757s", "CD"), ("sold", "VBD"), ("them", "PRP"), ("NNPS", "NNPS"), ("sold", "VBN")]);
    let tagged = decode(&model, "757s sold");
    assert_eq!(tagged[0].tag, "NNPS");
    // only NNPS -> VBN was observed, so VBN survives the transition filter
    assert_eq!(tagged[1].tag, "VBN");
}

#[test]
fn all_caps_plural_needs_a_lowercase_s() {
    let model = train(&[("the", "DT"), ("CDS", "NNS"), ("the", "DT"), ("IPOs", "NNS")]);
    let tagger = model.tagger(&TaggerConfig::default());
    assert_eq!(tagger.tag(&["the", "CDS"]), vec!["DT", "NNP"]);
    // mixed case is not all-uppercase, so the scored tag stands
    assert_eq!(tagger.tag(&["the", "IPOs"]), vec!["DT", "NNS"]);
}

#[test]
fn ties_keep_first_observed_tag() {
    let model = train(&[("run", "VB"), ("run", "NN")]);
    assert_eq!(model.tagger(&TaggerConfig::default()).tag(&["run"]), vec!["VB"]);
    let model = train(&[("run", "NN"), ("run", "VB")]);
    assert_eq!(model.tagger(&TaggerConfig::default()).tag(&["run"]), vec!["NN"]);
}

#[test]
fn transition_term_changes_the_winner() {
    // emission alone prefers NN for "book" (2/3 vs 1/2); after "to" only VB is possible
    let model = train(&[
        ("the", "DT"),
        ("book", "NN"),
        ("to", "TO"),
        ("book", "VB"),
        ("a", "DT"),
        ("book", "NN"),
        ("seller", "NN"),
        ("go", "VB"),
    ]);
    let tagger = model.tagger(&TaggerConfig::default());
    assert_eq!(tagger.tag(&["book"]), vec!["NN"]);
    assert_eq!(tagger.tag(&["to", "book"]), vec!["TO", "VB"]);
    assert_eq!(tagger.tag(&["a", "book"]), vec!["DT", "NN"]);
}

#[test]
fn emission_only_when_no_transition_matches() {
    let model = train(&[("a", "DT"), ("dog", "NN"), (".", ".")]);
    let tagged = decode(&model, "dog dog");
    assert_eq!(tagged[1].tag, "NN");
    assert_eq!(tagged[1].decision, Decision::EmissionOnly);
}

#[test]
fn fixture_corpus() {
    init();
    let train = include_str!("data/pos-train.txt");
    let test = include_str!("data/pos-test.txt");
    let key = include_str!("data/pos-key.txt");
    let run = task::tag_corpus(train, test, &TaggerConfig::default()).unwrap();
    assert_eq!(
        run.output(),
        "the/DT\nboard/NN\nwill/MD\njoin/VB\na/DT\ndirector/NN\n./."
    );
    assert_eq!(run.tagged[2].decision, Decision::EmissionOnly);

    let predicted: Vec<_> = run.tagged.iter().map(|t| t.tag.clone()).collect();
    let reference: Vec<_> = dataset::read_tagged_tokens(key).into_iter().map(|t| t.tag).collect();
    let mut evaluation = Evaluation::default();
    evaluation.accumulate(reference.as_slice(), predicted.as_slice()).unwrap();
    assert_eq!(evaluation.evaluate().accuracy, 1.0);
}

#[test]
fn tagging_is_deterministic() {
    let train = include_str!("data/pos-train.txt");
    let test = "Vinken will join the nonexecutive board as a director Nov. 29 .";
    let a = task::tag_corpus(train, test, &TaggerConfig::default()).unwrap();
    let b = task::tag_corpus(train, test, &TaggerConfig::default()).unwrap();
    assert_eq!(a.output(), b.output());
    assert_eq!(a.tagged.len(), 12);
}

#[test]
fn tagging_log_lists_tables_and_words() {
    let run = task::tag_corpus("The/DT dog/NN barks/VBZ ./.", "dog cat", &TaggerConfig::default()).unwrap();
    let mut buf = Vec::new();
    run.log().write_to(&mut buf, freqtag::LogFormat::Text).unwrap();
    let s = String::from_utf8(buf).unwrap();
    assert!(s.contains("Word/tag frequency:\nThe/DT\t\t1\n"), "{s}");
    assert!(s.contains("Tag-1/tag frequency:\nDT NN\t\t1\n"), "{s}");
    assert!(s.contains("cat\t\tNN\n"), "{s}");
}

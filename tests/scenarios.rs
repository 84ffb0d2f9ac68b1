use docmatch::{search, similarity, Candidate, DocumentSearcher, Hits, SearchConfig};

const TEXTS: &[&str] = &[
    "the quick brown fox jumps",
    "Hello, World!",
    "cat dog cat",
    "stock market prices fall sharply as markets react",
    "snake_case and 42 numbers",
    "Ünïcödé wörds ÄND CASE",
    "東京 は 晴れ",
    "?!",
    "",
];

fn key_order<D: Candidate<Key = &'static str>>(hits: &Hits<&D>) -> Vec<&'static str> {
    hits.iter().map(|hit| *hit.key.key()).collect()
}

#[test]
fn high_overlap_scores_high() {
    let docs = vec![("d1", "the quick brown fox jumps")];
    let hits = search("the quick brown fox", &docs);
    assert_eq!(hits.len(), 1);
    assert!(hits.list[0].score > 0.8);
}

#[test]
fn disjoint_vocabulary_scores_zero() {
    let docs = vec![("d2", "xyz qrs tuv")];
    let hits = search("apple banana", &docs);
    assert_eq!(hits.list[0].score, 0.0);
}

#[test]
fn punctuation_and_case_are_ignored() {
    let docs = vec![("d3", "hello world")];
    let hits = search("Hello, World!", &docs);
    assert_eq!(hits.list[0].score, 1.0);
}

#[test]
fn repeated_terms_rank_deterministically() {
    let docs = vec![("a", "cat dog"), ("b", "cat dog cat")];
    let first = search("cat", &docs);
    assert!(first.iter().all(|hit| hit.score > 0.0));
    assert!((first.list.iter().find(|h| *h.key.key() == "a").unwrap().score
        - 1.0 / 2f64.sqrt())
    .abs()
        < 1e-12);
    for _ in 0..10 {
        let again = search("cat", &docs);
        assert_eq!(key_order(&again), key_order(&first));
    }

    // proportional repetition does not change the score
    let scaled = vec![("a", "cat dog"), ("b", "cat dog cat dog")];
    let hits = search("cat", &scaled);
    assert_eq!(key_order(&hits), vec!["a", "b"]);
    assert_eq!(hits.list[0].score, hits.list[1].score);
}

#[test]
fn empty_candidate_list_is_not_an_error() {
    let docs: Vec<(&str, &str)> = vec![];
    assert!(search("anything", &docs).is_empty());
    assert!(search("", &docs).is_empty());
}

#[test]
fn self_similarity_is_one() {
    for text in TEXTS.iter().filter(|t| !docmatch::tokenize(t).is_empty()) {
        assert!((similarity(text, text) - 1.0).abs() < 1e-9, "{text:?}");
    }
}

#[test]
fn similarity_is_symmetric_and_bounded() {
    for a in TEXTS {
        for b in TEXTS {
            let ab = similarity(a, b);
            assert_eq!(ab.to_bits(), similarity(b, a).to_bits(), "{a:?} / {b:?}");
            assert!((0.0..=1.0).contains(&ab), "{a:?} / {b:?} = {ab}");
        }
    }
}

#[test]
fn empty_text_scores_zero_both_ways() {
    for text in TEXTS {
        assert_eq!(similarity("", text), 0.0);
        assert_eq!(similarity(text, ""), 0.0);
    }
}

#[test]
fn equal_scores_keep_input_order() {
    let docs = vec![
        ("z", "alpha beta"),
        ("m", "gamma"),
        ("a", "beta alpha"),
        ("q", "alpha beta alpha beta"),
        ("b", "gamma gamma"),
    ];
    let hits = search("alpha beta", &docs);
    assert_eq!(key_order(&hits), vec!["z", "a", "q", "m", "b"]);
}

#[test]
fn repeated_searches_are_bit_identical() {
    let docs: Vec<(String, String)> = TEXTS
        .iter()
        .cycle()
        .take(600)
        .enumerate()
        .map(|(i, text)| (format!("doc{i}"), format!("{text} extra{}", i % 13)))
        .collect();
    let searcher = DocumentSearcher::<String>::new(SearchConfig {
        parallel_threshold: 64,
        cache_vectors: true,
    });
    let query = "the cat and the fox with extra3";
    let baseline: Vec<(String, u64)> = searcher
        .search(query, &docs)
        .into_iter()
        .map(|hit| (hit.key.0.clone(), hit.score.to_bits()))
        .collect();
    assert_eq!(baseline.len(), docs.len());
    for _ in 0..3 {
        let again: Vec<(String, u64)> = searcher
            .search(query, &docs)
            .into_iter()
            .map(|hit| (hit.key.0.clone(), hit.score.to_bits()))
            .collect();
        assert_eq!(again, baseline);
    }
}

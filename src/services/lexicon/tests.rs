use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn empty_lexicon_is_neutral() {
    let lexicon = LexiconScorer::new();
    assert!(lexicon.is_empty());
    assert_eq!(lexicon.analyze("I love this"), Sentiment::NEUTRAL);
}

#[test]
fn words_are_case_insensitive_and_clamped() {
    let mut lexicon = LexiconScorer::new();
    lexicon.add_word("Great", 1.7, -0.2);
    assert!(lexicon.contains("great"));
    assert_eq!(
        lexicon.get("GREAT"),
        Some(LexiconEntry {
            polarity: 1.0,
            subjectivity: 0.0
        })
    );
}

#[test]
fn love_and_hate() {
    let lexicon = LexiconScorer::default();
    assert!(lexicon.analyze("I love this").polarity > 0.0);
    assert!(lexicon.analyze("I hate this").polarity < 0.0);
}

#[test]
fn unknown_words_and_empty_text_score_zero() {
    let lexicon = LexiconScorer::default();
    assert_eq!(lexicon.analyze(""), Sentiment::NEUTRAL);
    assert_eq!(lexicon.analyze("The parcel arrived on Tuesday"), Sentiment::NEUTRAL);
}

#[test]
fn mean_over_assessments() {
    let mut lexicon = LexiconScorer::new();
    lexicon.add_word("good", 0.6, 0.4);
    lexicon.add_word("bad", -0.2, 0.8);
    let score = lexicon.analyze("good food, bad service");
    assert!(close(score.polarity, 0.2));
    assert!(close(score.subjectivity, 0.6));
}

#[test]
fn intensifier_scales_next_word() {
    let mut lexicon = LexiconScorer::new();
    lexicon.add_word("good", 0.5, 0.5);
    lexicon.add_modifier("very", 1.5);
    let score = lexicon.analyze("very good");
    assert!(close(score.polarity, 0.75));
    assert!(close(score.subjectivity, 0.75));
}

#[test]
fn negation_flips_and_damps() {
    let mut lexicon = LexiconScorer::new();
    lexicon.add_word("good", 0.8, 0.6);
    assert!(close(lexicon.analyze("not good").polarity, -0.4));
    assert!(close(lexicon.analyze("It isn't good").polarity, -0.4));
    assert!(close(lexicon.analyze("It isn’t good").polarity, -0.4));
}

#[test]
fn punctuation_resets_pending_negation() {
    let mut lexicon = LexiconScorer::new();
    lexicon.add_word("good", 0.8, 0.6);
    assert!(close(lexicon.analyze("Not really. Good!").polarity, 0.8));
}

#[test]
fn scores_stay_in_range() {
    let lexicon = LexiconScorer::default();
    for text in [
        "extremely incredibly absolutely perfect",
        "not not not terrible",
        "very very very awful!!!",
        "¿Qué? ünïcödé wörds and emoji 🎉",
    ] {
        let score = lexicon.analyze(text);
        assert!(score.in_range(), "{text}: {score:?}");
    }
}

#[test]
fn overrides_merge_over_defaults() {
    let mut lexicon = LexiconScorer::default();
    let csv = "word,polarity,subjectivity\ngood,0.1,0.2\n meh , -0.1, 0.3\n";
    let added = lexicon.load_overrides(csv.as_bytes()).unwrap();
    assert_eq!(added, 2);
    assert_eq!(lexicon.get("good").map(|e| e.polarity), Some(0.1));
    assert!(lexicon.contains("meh"));
    assert!(lexicon.contains("terrible"));
}

#[test]
fn overrides_reject_out_of_range_values() {
    let mut lexicon = LexiconScorer::new();
    let csv = "word,polarity,subjectivity\ngood,2.0,0.2\n";
    let err = lexicon.load_overrides(csv.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("line 2"));
}

#[test]
fn overrides_reject_malformed_rows() {
    let mut lexicon = LexiconScorer::new();
    let csv = "word,polarity,subjectivity\ngood,high,0.2\n";
    assert!(lexicon.load_overrides(csv.as_bytes()).is_err());
}

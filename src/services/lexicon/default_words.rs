//! Built-in English word list.

use super::LexiconScorer;

impl Default for LexiconScorer {
    fn default() -> Self {
        let mut lexicon = Self::new();

        // Strongly positive
        for (word, polarity, subjectivity) in [
            ("excellent", 1.0, 1.0),
            ("wonderful", 1.0, 1.0),
            ("perfect", 1.0, 1.0),
            ("superb", 1.0, 1.0),
            ("awesome", 1.0, 1.0),
            ("impressive", 1.0, 1.0),
            ("best", 1.0, 0.3),
            ("brilliant", 0.9, 1.0),
            ("beautiful", 0.85, 1.0),
            ("great", 0.8, 0.75),
            ("happy", 0.8, 1.0),
            ("amazing", 0.6, 0.9),
            ("delighted", 0.7, 0.8),
            ("loved", 0.7, 0.8),
            ("fantastic", 0.4, 0.9),
        ] {
            lexicon.add_word(word, polarity, subjectivity);
        }

        // Moderately positive
        for (word, polarity, subjectivity) in [
            ("good", 0.7, 0.6),
            ("nice", 0.6, 1.0),
            ("love", 0.5, 0.6),
            ("lovely", 0.5, 0.75),
            ("glad", 0.5, 1.0),
            ("pleased", 0.5, 1.0),
            ("satisfied", 0.5, 1.0),
            ("helpful", 0.5, 0.5),
            ("interesting", 0.5, 0.5),
            ("better", 0.5, 0.5),
            ("outstanding", 0.5, 0.67),
            ("okay", 0.5, 0.5),
            ("easy", 0.43, 0.83),
            ("fine", 0.42, 0.5),
            ("enjoy", 0.4, 0.5),
            ("enjoyed", 0.4, 0.5),
            ("comfortable", 0.4, 0.8),
            ("friendly", 0.375, 0.5),
            ("clean", 0.37, 0.69),
            ("cool", 0.35, 0.65),
            ("useful", 0.3, 0.0),
            ("fun", 0.3, 0.2),
            ("positive", 0.23, 0.55),
            ("fast", 0.2, 0.6),
        ] {
            lexicon.add_word(word, polarity, subjectivity);
        }

        // Strongly negative
        for (word, polarity, subjectivity) in [
            ("terrible", -1.0, 1.0),
            ("awful", -1.0, 1.0),
            ("horrible", -1.0, 1.0),
            ("worst", -1.0, 1.0),
            ("boring", -1.0, 1.0),
            ("hated", -0.9, 0.7),
            ("hate", -0.8, 0.9),
            ("annoying", -0.8, 0.9),
            ("stupid", -0.8, 1.0),
            ("disappointed", -0.75, 0.75),
            ("bad", -0.7, 0.67),
            ("ugly", -0.7, 1.0),
        ] {
            lexicon.add_word(word, polarity, subjectivity);
        }

        // Moderately negative
        for (word, polarity, subjectivity) in [
            ("disappointing", -0.6, 0.7),
            ("dirty", -0.6, 0.8),
            ("unhappy", -0.6, 0.9),
            ("sad", -0.5, 1.0),
            ("angry", -0.5, 1.0),
            ("useless", -0.5, 0.2),
            ("expensive", -0.5, 0.7),
            ("difficult", -0.5, 1.0),
            ("wrong", -0.5, 0.9),
            ("poor", -0.4, 0.6),
            ("broken", -0.4, 0.4),
            ("worse", -0.4, 0.6),
            ("frustrating", -0.4, 0.7),
            ("slow", -0.3, 0.39),
            ("rude", -0.3, 0.6),
            ("confusing", -0.3, 0.7),
            ("mediocre", -0.3, 0.6),
            ("negative", -0.3, 0.4),
        ] {
            lexicon.add_word(word, polarity, subjectivity);
        }

        for (word, factor) in [
            ("extremely", 1.5),
            ("incredibly", 1.5),
            ("absolutely", 1.4),
            ("very", 1.3),
            ("really", 1.3),
            ("totally", 1.3),
            ("highly", 1.3),
            ("so", 1.2),
            ("too", 1.2),
            ("quite", 1.1),
            ("fairly", 0.9),
            ("rather", 0.9),
            ("somewhat", 0.7),
            ("slightly", 0.5),
            ("barely", 0.4),
        ] {
            lexicon.add_modifier(word, factor);
        }

        lexicon
    }
}

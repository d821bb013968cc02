//! Flesch-style readability on a 1..=10 scale.

use crate::config::MIN_READABILITY_WORDS;

/// Readability from average sentence and word lengths.
///
/// `206.835 - 1.015 * avg_sentence_length - 84.6 * avg_word_length`, divided
/// by ten, rounded and clamped to [1, 10]. Returns 0 when fewer than
/// `MIN_READABILITY_WORDS` words were measured; 0 is never a real score.
pub fn readability_score(avg_sentence_length: f64, avg_word_length: f64, word_count: usize) -> u8 {
    if word_count < MIN_READABILITY_WORDS {
        return 0;
    }
    let score = 206.835 - 1.015 * avg_sentence_length - 84.6 * avg_word_length;
    (score / 10.0).round().clamp(1.0, 10.0) as u8
}

//! Readability metrics over README text.
//!
//! Heuristic syllable counting (vowel groups, silent trailing `e`), sentence
//! splitting on `.`, `!` and `?`. Good enough to rank documentation, not to
//! grade prose.

use crate::types::ReadmeMetrics;

/// Words considered by Linsear Write.
const LINSEAR_SAMPLE: usize = 100;

/// Counts gathered in one pass over the text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextStats {
  pub words: usize,
  pub sentences: usize,
  pub syllables: usize,
  /// Words with three or more syllables.
  pub polysyllables: usize,
  pub letters: usize,
  /// Non-whitespace characters inside words, punctuation included.
  pub chars: usize,
  /// Linsear Write: easy words, hard words and sentences within the sample.
  linsear_easy: usize,
  linsear_hard: usize,
  linsear_sentences: usize,
}

impl TextStats {
  pub fn from_text(text: &str) -> Self {
    let mut stats = Self::default();
    let mut last_sampled_sentence = None;

    let sentences = text
      .split(|c: char| matches!(c, '.' | '!' | '?'))
      .filter(|s| s.split_whitespace().any(is_word));

    for (idx, sentence) in sentences.enumerate() {
      stats.sentences += 1;
      for token in sentence.split_whitespace().filter(|t| is_word(t)) {
        let syl = syllables(token);
        stats.words += 1;
        stats.syllables += syl;
        stats.letters += token.chars().filter(|c| c.is_alphabetic()).count();
        stats.chars += token.chars().count();
        if syl >= 3 {
          stats.polysyllables += 1;
        }
        if stats.words <= LINSEAR_SAMPLE {
          if syl >= 3 {
            stats.linsear_hard += 1;
          } else {
            stats.linsear_easy += 1;
          }
          if last_sampled_sentence != Some(idx) {
            last_sampled_sentence = Some(idx);
            stats.linsear_sentences += 1;
          }
        }
      }
    }
    stats
  }

  fn words_per_sentence(&self) -> f64 {
    self.words as f64 / self.sentences.max(1) as f64
  }

  fn syllables_per_word(&self) -> f64 {
    self.syllables as f64 / self.words.max(1) as f64
  }

  pub fn flesch_reading_ease(&self) -> f64 {
    if self.words == 0 {
      return 0.0;
    }
    let score = 206.835 - 1.015 * self.words_per_sentence() - 84.6 * self.syllables_per_word();
    (score * 100.0).round() / 100.0
  }

  pub fn flesch_kincaid_grade(&self) -> f64 {
    0.39 * self.words_per_sentence() + 11.8 * self.syllables_per_word() - 15.59
  }

  pub fn smog_index(&self) -> f64 {
    if self.sentences < 3 {
      return 0.0;
    }
    1.043 * (self.polysyllables as f64 * 30.0 / self.sentences as f64).sqrt() + 3.1291
  }

  pub fn coleman_liau_index(&self) -> f64 {
    let words = self.words.max(1) as f64;
    let l = self.letters as f64 / words * 100.0;
    let s = self.sentences as f64 / words * 100.0;
    0.058 * l - 0.296 * s - 15.8
  }

  pub fn automated_readability_index(&self) -> f64 {
    let words = self.words.max(1) as f64;
    4.71 * (self.chars as f64 / words) + 0.5 * self.words_per_sentence() - 21.43
  }

  pub fn linsear_write(&self) -> f64 {
    if self.linsear_sentences == 0 {
      return 0.0;
    }
    let mut r = (self.linsear_easy + 3 * self.linsear_hard) as f64 / self.linsear_sentences as f64;
    if r <= 20.0 {
      r -= 2.0;
    }
    r / 2.0
  }

  pub fn gunning_fog(&self) -> f64 {
    let complex = 100.0 * self.polysyllables as f64 / self.words.max(1) as f64;
    0.4 * (self.words_per_sentence() + complex)
  }

  /// Grades voted by each formula, in vote order.
  fn grade_votes(&self) -> Vec<i64> {
    let bounds = |score: f64| [score.round() as i64, score.ceil() as i64];

    let mut votes = Vec::with_capacity(16);
    votes.extend(bounds(self.flesch_kincaid_grade()));
    votes.extend_from_slice(ease_band(self.flesch_reading_ease()));
    for score in [
      self.smog_index(),
      self.coleman_liau_index(),
      self.automated_readability_index(),
      self.linsear_write(),
      self.gunning_fog(),
    ] {
      votes.extend(bounds(score));
    }
    votes
  }

  /// Consensus grade label, e.g. "9th and 10th grade".
  pub fn grade_level(&self) -> String {
    if self.words == 0 {
      return "n/a".to_string();
    }
    let grade = most_common(&self.grade_votes()).unwrap_or(0);
    format!(
      "{}{} and {}{} grade",
      grade - 1,
      ordinal_suffix(grade - 1),
      grade,
      ordinal_suffix(grade)
    )
  }
}

/// School grades implied by a Flesch reading ease score.
fn ease_band(ease: f64) -> &'static [i64] {
  match ease {
    e if (90.0..100.0).contains(&e) => &[5],
    e if (80.0..90.0).contains(&e) => &[6],
    e if (70.0..80.0).contains(&e) => &[7],
    e if (60.0..70.0).contains(&e) => &[8, 9],
    e if (50.0..60.0).contains(&e) => &[10],
    e if (40.0..50.0).contains(&e) => &[11],
    e if e < 40.0 => &[12],
    _ => &[],
  }
}

fn is_word(token: &str) -> bool {
  token.chars().any(char::is_alphanumeric)
}

/// Vowel-group syllable estimate; never less than one for a word.
pub fn syllables(word: &str) -> usize {
  let letters: Vec<char> = word
    .chars()
    .filter(char::is_ascii_alphabetic)
    .map(|c| c.to_ascii_lowercase())
    .collect();
  if letters.is_empty() {
    return 1;
  }

  let mut count = 0;
  let mut prev_vowel = false;
  for c in &letters {
    let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    if vowel && !prev_vowel {
      count += 1;
    }
    prev_vowel = vowel;
  }

  let n = letters.len();
  let silent_e = n > 2 && letters[n - 1] == 'e' && letters[n - 2] != 'l';
  if silent_e && count > 1 {
    count -= 1;
  }
  count.max(1)
}

/// Most frequent value; ties go to the value seen first.
fn most_common(values: &[i64]) -> Option<i64> {
  let mut tally: Vec<(i64, usize)> = Vec::new();
  for &v in values {
    match tally.iter_mut().find(|(seen, _)| *seen == v) {
      Some((_, n)) => *n += 1,
      None => tally.push((v, 1)),
    }
  }
  let mut best: Option<(i64, usize)> = None;
  for (v, n) in tally {
    if best.map_or(true, |(_, top)| n > top) {
      best = Some((v, n));
    }
  }
  best.map(|(v, _)| v)
}

fn ordinal_suffix(n: i64) -> &'static str {
  let n = n.abs();
  if (11..=13).contains(&(n % 100)) {
    return "th";
  }
  match n % 10 {
    1 => "st",
    2 => "nd",
    3 => "rd",
    _ => "th",
  }
}

pub fn flesch_reading_ease(text: &str) -> f64 {
  TextStats::from_text(text).flesch_reading_ease()
}

pub fn grade_level(text: &str) -> String {
  TextStats::from_text(text).grade_level()
}

/// Crude section count: every `#` character.
pub fn section_count(text: &str) -> usize {
  text.matches('#').count()
}

pub fn analyze(text: &str) -> ReadmeMetrics {
  let stats = TextStats::from_text(text);
  ReadmeMetrics {
    readability: stats.flesch_reading_ease(),
    grade_level: stats.grade_level(),
    sections: section_count(text),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn syllable_heuristic() {
    assert_eq!(syllables("cat"), 1);
    assert_eq!(syllables("hello"), 2);
    assert_eq!(syllables("make"), 1);
    assert_eq!(syllables("readable"), 3);
    assert_eq!(syllables("documentation"), 5);
    assert_eq!(syllables("42"), 1);
  }

  #[test]
  fn counts_words_and_sentences() {
    let stats = TextStats::from_text("The cat sat. The dog ran! Why?");
    assert_eq!(stats.words, 7);
    assert_eq!(stats.sentences, 3);
    assert_eq!(stats.syllables, 7);
    assert_eq!(stats.polysyllables, 0);
  }

  #[test]
  fn simple_text_is_easy_to_read() {
    // 7 words, 3 sentences, 7 syllables.
    let expected: f64 = 206.835 - 1.015 * (7.0 / 3.0) - 84.6;
    let got = flesch_reading_ease("The cat sat. The dog ran! Why?");
    assert!((got - (expected * 100.0).round() / 100.0).abs() < 1e-9);
    assert!(got > 100.0);
  }

  #[test]
  fn dense_text_scores_lower_than_plain_text() {
    let plain = "Run the tool. It is fast. It is small.";
    let dense = "Comprehensive configuration documentation necessitates considerable organizational deliberation.";
    assert!(flesch_reading_ease(dense) < flesch_reading_ease(plain));
  }

  #[test]
  fn empty_text_has_no_grade() {
    assert_eq!(flesch_reading_ease(""), 0.0);
    assert_eq!(grade_level("  \n "), "n/a");
  }

  #[test]
  fn grade_label_shape() {
    let label = grade_level("Install the crate. Run the binary. Read the report it writes.");
    assert!(label.ends_with(" grade"), "got: {}", label);
    assert!(label.contains(" and "), "got: {}", label);
  }

  #[test]
  fn ordinal_suffixes() {
    assert_eq!(ordinal_suffix(1), "st");
    assert_eq!(ordinal_suffix(2), "nd");
    assert_eq!(ordinal_suffix(3), "rd");
    assert_eq!(ordinal_suffix(11), "th");
    assert_eq!(ordinal_suffix(22), "nd");
    assert_eq!(ordinal_suffix(-1), "st");
  }

  #[test]
  fn most_common_prefers_first_on_tie() {
    assert_eq!(most_common(&[7, 8, 8, 7]), Some(7));
    assert_eq!(most_common(&[3, 9, 9]), Some(9));
    assert_eq!(most_common(&[]), None);
  }

  #[test]
  fn sections_count_hash_marks() {
    let text = "# Title\n\n## Install\n\ncode with a # comment\n";
    assert_eq!(section_count(text), 4);
    assert_eq!(analyze(text).sections, 4);
  }
}

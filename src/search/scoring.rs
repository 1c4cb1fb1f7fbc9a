//! Approximate substring scoring used by the fuzzy search index.
//!
//! A pattern is aligned against every substring of the text with an edit-distance
//! recurrence that lets the match start anywhere. The score of an alignment is
//! `errors / pattern_len + |start - location| / distance`, so 0.0 is an exact match
//! at the expected location and anything above the threshold is discarded.

/// Fixed matching configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyOptions {
    /// Highest score still considered a match.
    pub threshold: f64,
    /// Expected start position of a match within the text.
    pub location: usize,
    /// How quickly distance from `location` erodes the score.
    pub distance: usize,
    /// Queries longer than this are truncated.
    pub max_pattern_length: usize,
    /// Minimum number of pattern characters that must actually match.
    pub min_match_char_length: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            location: 0,
            distance: 80,
            max_pattern_length: 32,
            min_match_char_length: 1,
        }
    }
}

impl FuzzyOptions {
    /// Number of leading text characters worth scanning.
    ///
    /// A match starting past `location + threshold * distance` scores above the
    /// threshold even with zero errors.
    fn window(&self, pattern_len: usize) -> usize {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let reach = (self.threshold * self.distance as f64).ceil() as usize;
        self.location + reach + pattern_len
    }

    #[allow(clippy::cast_precision_loss)]
    fn score(&self, errors: usize, start: usize, pattern_len: usize) -> f64 {
        let accuracy = errors as f64 / pattern_len as f64;
        let proximity = start.abs_diff(self.location);
        if self.distance == 0 {
            return if proximity == 0 { accuracy } else { 1.0 + accuracy };
        }
        accuracy + proximity as f64 / self.distance as f64
    }
}

/// Best score of `pattern` against any substring of `text`, or `None` above the threshold.
///
/// Both inputs are expected to be case-normalized already.
pub fn match_score(pattern: &[char], text: &[char], options: &FuzzyOptions) -> Option<f64> {
    let m = pattern.len();
    if m == 0 {
        return None;
    }
    let text = &text[..text.len().min(options.window(m))];

    // column[i]: (errors, start) of the best alignment of pattern[..i] ending at the
    // current text position. Row 0 is free, so a match may start anywhere.
    let mut column: Vec<(usize, usize)> = (0..=m).map(|i| (i, 0)).collect();
    let mut next: Vec<(usize, usize)> = Vec::with_capacity(m + 1);
    let mut best: Option<f64> = None;

    for (j, &ch) in text.iter().enumerate() {
        next.clear();
        next.push((0, j + 1));
        for i in 1..=m {
            let (diag_errors, diag_start) = column[i - 1];
            let substitute = (diag_errors + usize::from(pattern[i - 1] != ch), diag_start);
            let skip_text = (column[i].0 + 1, column[i].1);
            let skip_pattern = (next[i - 1].0 + 1, next[i - 1].1);
            next.push(substitute.min(skip_text).min(skip_pattern));
        }
        std::mem::swap(&mut column, &mut next);

        let (errors, start) = column[m];
        if m.saturating_sub(errors) < options.min_match_char_length {
            continue;
        }
        let score = options.score(errors, start, m);
        if score <= options.threshold && best.is_none_or(|b| score < b) {
            best = Some(score);
        }
    }

    best
}

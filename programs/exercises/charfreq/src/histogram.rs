use crate::counts::CharCounts;
use crate::render::Report;
use std::fmt;

/// Running letter counts over any number of text chunks.
///
/// Whitespace is skipped and everything else is upper-cased before it is
/// counted, digits and punctuation included. Where upper-casing expands a
/// character (`ß` becomes `SS`) each resulting character counts.
#[derive(Debug, Default, Clone)]
pub struct Histogram {
    counts: CharCounts,
    total: usize,
}

impl Histogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: &str) {
        text.chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_uppercase)
            .for_each(|c| {
                self.counts.bump(c);
                self.total += 1;
            });
    }

    pub fn counts(&self) -> &CharCounts {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn report(&self) -> Report {
        Report::from_counts(&self.counts, self.total)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.report())
    }
}

#[cfg(test)]
fn histogram_of(chunks: &[&str]) -> Histogram {
    let mut h = Histogram::new();
    chunks.iter().for_each(|chunk| h.add(chunk));
    h
}

#[test]
fn test_whitespace_is_ignored() {
    let spaced = histogram_of(&["A B"]);
    let tight = histogram_of(&["AB"]);
    assert_eq!(spaced.counts(), tight.counts());
    assert_eq!(spaced.total(), 2);

    let odd_spaces = histogram_of(&["\tA\u{00A0}\u{3000}B\r\n\u{2028}"]);
    assert_eq!(odd_spaces.counts(), tight.counts());
}

#[test]
fn test_case_folds_to_upper() {
    let lower = histogram_of(&["a"]);
    let upper = histogram_of(&["A"]);
    assert_eq!(lower.counts(), upper.counts());
    assert_eq!(lower.counts().get('A'), 1);
    assert_eq!(lower.counts().get('a'), 0);

    let sharp = histogram_of(&["ß"]);
    assert_eq!(sharp.counts().get('S'), 2);
    assert_eq!(sharp.total(), 2);
}

#[test]
fn test_characters_not_bytes() {
    let h = histogram_of(&["é日🦀é"]);
    assert_eq!(h.total(), 4);
    assert_eq!(h.counts().get('É'), 2);
    assert_eq!(h.counts().get('日'), 1);
    assert_eq!(h.counts().get('🦀'), 1);
}

#[test]
fn test_total_matches_counts() {
    let mut h = Histogram::new();
    for chunk in ["", "   ", "Hello, World!", "1234 5678", "¿Qué tal?", "\n"] {
        h.add(chunk);
        assert_eq!(h.counts().sum(), h.total());
    }
    assert_eq!(h.total(), 12 + 8 + 8);
}

#[test]
fn test_chunk_boundaries_do_not_matter() {
    let whole = histogram_of(&["AB"]);
    let split = histogram_of(&["A", "B"]);
    assert_eq!(whole.counts(), split.counts());
    assert_eq!(whole.total(), split.total());

    let text = "the quick brown fox jumps over the lazy dog";
    let pieces: Vec<&str> = text.split_inclusive('o').collect();
    let pieced = histogram_of(&pieces);
    assert_eq!(pieced.counts(), histogram_of(&[text]).counts());
    assert_eq!(pieced.to_string(), histogram_of(&[text]).to_string());
}

#[test]
fn test_only_whitespace_renders_nothing() {
    assert_eq!(histogram_of(&[]).to_string(), "");
    assert_eq!(histogram_of(&[" \n\t ", "\r\n"]).to_string(), "");
}

#[test]
fn test_hello_world() {
    let h = histogram_of(&["Hello, World!"]);
    assert_eq!(h.total(), 12);
    assert_eq!(h.counts().get('L'), 3);
    assert_eq!(h.counts().get('O'), 2);
    for c in ['H', 'E', ',', 'W', 'R', 'D', '!'] {
        assert_eq!(h.counts().get(c), 1);
    }

    let report = h.report();
    let order: String = report.entries().iter().map(|e| e.character).collect();
    assert_eq!(order, "LO!,DEHRW");
    let sum: f64 = report.entries().iter().map(|e| e.percentage).sum();
    assert!((sum - 100.0).abs() < 1e-9);

    // every line follows from the counts
    let expected: Vec<String> = order
        .chars()
        .map(|c| {
            let percentage = h.counts().get(c) as f64 / h.total() as f64 * 100.0;
            format!("{}: {} {:.2}%", c, "#".repeat(percentage.round() as usize), percentage)
        })
        .collect();
    assert_eq!(h.to_string(), expected.join("\n"));

    let text = h.to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], format!("L: {} 25.00%", "#".repeat(25)));
    assert_eq!(lines[1], format!("O: {} 16.67%", "#".repeat(17)));
    assert_eq!(lines[2], format!("!: {} 8.33%", "#".repeat(8)));
}

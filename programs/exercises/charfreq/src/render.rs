use crate::counts::CharCounts;
use std::fmt;

/// Entries under this share of the total are left out of the report.
pub const THRESHOLD: f64 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ReportEntry {
    pub character: char,
    pub percentage: f64,
}

/// The histogram as it gets printed: most frequent first, equal counts in
/// character order, nothing under [`THRESHOLD`] percent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Report {
    entries: Vec<ReportEntry>,
}

impl Report {
    pub fn from_counts(counts: &CharCounts, total: usize) -> Report {
        if total == 0 {
            return Report::default();
        }
        let mut pairs: Vec<(char, usize)> = counts.iter().collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let entries = pairs
            .into_iter()
            .map(|(character, count)| ReportEntry {
                character,
                percentage: count as f64 / total as f64 * 100.0,
            })
            .filter(|entry| entry.percentage >= THRESHOLD)
            .collect();
        Report { entries }
    }

    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for ReportEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}%",
            self.character,
            "#".repeat(bar_length(self.percentage)),
            to_fixed(self.percentage)
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.entries.iter().map(|e| e.to_string()).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// Renders `counts` against `total` as one line per character, joined by
/// newlines with none at the end. A zero total renders as "".
pub fn render(counts: &CharCounts, total: usize) -> String {
    Report::from_counts(counts, total).to_string()
}

// half away from zero, so 12.5% draws 13 marks
fn bar_length(percentage: f64) -> usize {
    percentage.round() as usize
}

// `{:.2}` settles an exact tie at the third decimal towards the even digit;
// these go up instead. Only multiples of 1/8 can tie exactly.
fn to_fixed(percentage: f64) -> String {
    let tie = (percentage * 8.0).fract() == 0.0 && (percentage * 4.0).fract() != 0.0;
    if tie {
        format!("{:.2}", percentage + 0.001)
    } else {
        format!("{:.2}", percentage)
    }
}

#[cfg(test)]
fn counts_of(pairs: &[(char, usize)]) -> CharCounts {
    pairs.iter().copied().collect()
}

#[test]
fn test_zero_total_is_empty() {
    assert_eq!(render(&CharCounts::new(), 0), "");
    assert!(Report::from_counts(&counts_of(&[('A', 3)]), 0).is_empty());
}

#[test]
fn test_ties_break_by_character() {
    let report = Report::from_counts(&counts_of(&[('C', 10), ('B', 50), ('A', 50)]), 110);
    let order: Vec<char> = report.entries().iter().map(|e| e.character).collect();
    assert_eq!(order, vec!['A', 'B', 'C']);
    assert_eq!(
        report.to_string(),
        [
            format!("A: {} 45.45%", "#".repeat(45)),
            format!("B: {} 45.45%", "#".repeat(45)),
            format!("C: {} 9.09%", "#".repeat(9)),
        ]
        .join("\n")
    );
}

#[test]
fn test_threshold_boundary() {
    let kept = render(&counts_of(&[('A', 99), ('B', 1)]), 100);
    assert_eq!(kept.lines().last(), Some("B: # 1.00%"));

    let dropped = Report::from_counts(&counts_of(&[('A', 9901), ('B', 99)]), 10000);
    assert_eq!(dropped.entries().len(), 1);
    assert_eq!(dropped.entries()[0].character, 'A');
}

#[test]
fn test_bar_rounds_half_away_from_zero() {
    let text = render(&counts_of(&[('A', 7), ('B', 1)]), 8);
    assert_eq!(
        text,
        format!("A: {} 87.50%\nB: {} 12.50%", "#".repeat(88), "#".repeat(13))
    );
}

#[test]
fn test_two_and_a_half_percent_draws_three_marks() {
    let text = render(&counts_of(&[('A', 39), ('B', 1)]), 40);
    assert_eq!(text.lines().last(), Some("B: ### 2.50%"));
}

#[test]
fn test_two_decimals() {
    assert_eq!(to_fixed(100.0), "100.00");
    assert_eq!(to_fixed(1.0), "1.00");
    assert_eq!(to_fixed(100.0 / 3.0), "33.33");
    assert_eq!(to_fixed(200.0 / 3.0), "66.67");
    assert_eq!(to_fixed(1.125), "1.13");
    assert_eq!(to_fixed(1.375), "1.38");
    assert_eq!(to_fixed(2.625), "2.63");
    assert_eq!(to_fixed(1.25), "1.25");
}

#[test]
fn test_single_character_fills_the_bar() {
    let text = render(&counts_of(&[('X', 4)]), 4);
    assert_eq!(text, format!("X: {} 100.00%", "#".repeat(100)));
}

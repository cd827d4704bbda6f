use fnv::FnvHashMap;

/// Occurrences per character. A character that was never counted reads as 0.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CharCounts {
    map: FnvHashMap<char, usize>,
}

impl CharCounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, c: char) -> usize {
        self.map.get(&c).copied().unwrap_or(0)
    }

    pub fn bump(&mut self, c: char) {
        *self.map.entry(c).or_insert(0) += 1;
    }

    /// In no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.map.iter().map(|(c, n)| (*c, *n))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn sum(&self) -> usize {
        self.map.values().sum()
    }
}

impl FromIterator<(char, usize)> for CharCounts {
    fn from_iter<I: IntoIterator<Item = (char, usize)>>(iter: I) -> Self {
        let mut counts = CharCounts::new();
        iter.into_iter().for_each(|(c, n)| {
            *counts.map.entry(c).or_insert(0) += n;
        });
        counts
    }
}

#[test]
fn test_absent_reads_zero() {
    let mut counts = CharCounts::new();
    assert_eq!(counts.get('Q'), 0);
    assert!(counts.is_empty());
    counts.bump('Q');
    counts.bump('Q');
    counts.bump('Z');
    assert_eq!(counts.get('Q'), 2);
    assert_eq!(counts.get('Z'), 1);
    assert_eq!(counts.get('A'), 0);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts.sum(), 3);
}

#[test]
fn test_collect_merges_duplicates() {
    let counts: CharCounts = vec![('A', 2), ('B', 1), ('A', 3)].into_iter().collect();
    assert_eq!(counts.get('A'), 5);
    assert_eq!(counts.get('B'), 1);
    assert_eq!(counts.len(), 2);
}

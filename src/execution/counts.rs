use crate::error::ExecResult;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;

/// Measurement histogram: bit-string (qubit n-1 leftmost) to shot count.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Counts(BTreeMap<String, u64>);

#[derive(Serialize)]
struct CsvRow<'a> {
    state: &'a str,
    index: Option<u64>,
    count: u64,
    probability: f64,
}

/// Basis-state index of a bit-string; register separators are ignored.
pub fn state_index(bits: &str) -> Option<u64> {
    let bits: String = bits.chars().filter(|c| !c.is_whitespace()).collect();
    u64::from_str_radix(&bits, 2).ok()
}

impl Counts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` shots to `state`.
    pub fn insert(&mut self, state: impl Into<String>, count: u64) {
        *self.0.entry(state.into()).or_insert(0) += count;
    }

    pub fn get(&self, state: &str) -> u64 {
        self.0.get(state).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(s, &c)| (s.as_str(), c))
    }

    /// The `k` most frequent outcomes, most frequent first.
    pub fn top(&self, k: usize) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
        entries.truncate(k);
        entries
    }

    /// Shots that landed on a marked state.
    pub fn success_count(&self, marked: &BTreeSet<u64>) -> u64 {
        self.iter()
            .filter(|(s, _)| state_index(s).is_some_and(|i| marked.contains(&i)))
            .map(|(_, c)| c)
            .sum()
    }

    /// Fraction of shots that landed on a marked state; 0 without shots.
    pub fn success_rate(&self, marked: &BTreeSet<u64>) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.success_count(marked) as f64 / total as f64
    }

    pub fn probabilities(&self) -> BTreeMap<String, f64> {
        let total = self.total().max(1) as f64;
        self.0
            .iter()
            .map(|(s, &c)| (s.clone(), c as f64 / total))
            .collect()
    }

    /// Writes the histogram as CSV, most frequent outcome first.
    pub fn write_csv<W: Write>(&self, writer: W) -> ExecResult<()> {
        let total = self.total().max(1) as f64;
        let mut wtr = csv::Writer::from_writer(writer);
        for (state, count) in self.top(self.len()) {
            wtr.serialize(CsvRow {
                state,
                index: state_index(state),
                count,
                probability: count as f64 / total,
            })?;
        }
        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for Counts {
    fn from_iter<I: IntoIterator<Item = (S, u64)>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for (state, count) in iter {
            counts.insert(state, count);
        }
        counts
    }
}

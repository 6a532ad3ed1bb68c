//! Summary statistics over per-trial match counts.

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Summary {
    pub min: u32,
    pub max: u32,
    pub mean: f64,
}

/// Reduce match counts to min/max/mean. An empty slice yields `Summary::default()`.
pub fn summarize(values: &[u32]) -> Summary {
    let (first, rest) = match values.split_first() {
        Some(split) => split,
        None => return Summary::default(),
    };

    let mut total = u64::from(*first);
    let mut min = *first;
    let mut max = *first;

    for &v in rest {
        total += u64::from(v);
        min = min.min(v);
        max = max.max(v);
    }

    Summary {
        min,
        max,
        mean: total as f64 / values.len() as f64,
    }
}

//! Combine per-window results into one list

use tally_domain::TransactionList;

/// Concatenate per-window lists in window order
///
/// No merging happens at window boundaries, so a transaction that falls
/// inside an overlap may appear twice. See [`dedup_overlaps`].
pub fn aggregate(windows: Vec<TransactionList>) -> TransactionList {
    let total = windows.iter().map(Vec::len).sum();
    let mut combined = Vec::with_capacity(total);
    for list in windows {
        combined.extend(list);
    }
    combined
}

/// Drop transactions repeated from the immediately preceding window
///
/// Each transaction in window `i` is matched one-for-one against window
/// `i - 1`'s original result; a matched transaction is removed. Duplicates
/// within a single window are kept. Returns the filtered lists and the number
/// of transactions removed.
pub fn dedup_overlaps(windows: Vec<TransactionList>) -> (Vec<TransactionList>, usize) {
    let mut removed = 0;
    let mut filtered = Vec::with_capacity(windows.len());
    let mut previous: Option<TransactionList> = None;

    for list in windows {
        let kept = match &previous {
            Some(prev) => {
                let mut used = vec![false; prev.len()];
                list.iter()
                    .filter(|tx| {
                        let matched = prev
                            .iter()
                            .enumerate()
                            .position(|(i, p)| !used[i] && p.same_movement(tx));
                        match matched {
                            Some(i) => {
                                used[i] = true;
                                removed += 1;
                                false
                            }
                            None => true,
                        }
                    })
                    .cloned()
                    .collect()
            }
            None => list.clone(),
        };
        filtered.push(kept);
        previous = Some(list);
    }

    (filtered, removed)
}

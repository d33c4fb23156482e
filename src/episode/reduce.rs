// src/episode/reduce.rs — Minimal-occurrence and non-overlap reducers

use super::occurrence::Occurrence;

/// Minimal occurrences of an episode extended by one more symbol.
///
/// `base` holds the minimal occurrences of the episode, `extension` the raw
/// occurrences of the appended symbol; both sorted by `start`. For each
/// extension position `ts`, the base occurrence chosen is the first one at
/// or after the cursor that ends before `ts` while its successor (if any)
/// ends after `ts`. A base occurrence is consumed by at most one extension.
pub fn compute_mo(base: &[Occurrence], extension: &[Occurrence]) -> Vec<Occurrence> {
    let mut minimal = Vec::new();
    let mut cursor = 0;

    for ext in extension {
        let ts = ext.start;
        let found = (cursor..base.len()).find(|&j| {
            let current = base[j];
            match base.get(j + 1) {
                Some(next) => current.end < ts && next.end > ts,
                None => current.end < ts,
            }
        });

        if let Some(j) = found {
            minimal.push(Occurrence::new(base[j].start, ts));
            cursor = j + 1;
        }
    }

    minimal
}

/// Greedy chain of pairwise non-overlapping occurrences, in input order.
///
/// The first occurrence is always kept; after that, an occurrence is kept
/// only if it starts strictly after the end of the last kept one.
pub fn compute_mano(occurrences: &[Occurrence]) -> Vec<Occurrence> {
    let mut iter = occurrences.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut chain = vec![*first];
    let mut last_end = first.end;
    for occ in iter {
        if occ.start > last_end {
            chain.push(*occ);
            last_end = occ.end;
        }
    }
    chain
}

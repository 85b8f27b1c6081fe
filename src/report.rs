use std::{fmt::Debug, hash::Hash, iter::Sum};

use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::{
    rule::RuleSet,
    validate::{self, Verdict},
};

pub fn evaluate<T>(rules: &RuleSet<T>, sequences: &[Vec<T>], parallel: bool) -> Vec<Verdict<T>>
where
    T: Clone + Eq + Hash + Debug + Send + Sync,
{
    if parallel {
        sequences
            .par_iter()
            .map(|seq| validate::validate(rules, seq))
            .collect()
    } else {
        sequences
            .iter()
            .map(|seq| validate::validate(rules, seq))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary<T> {
    pub valid_n: usize,
    pub invalid_n: usize,
    pub median_sum: T,
}

pub fn summarize<T>(verdicts: &[Verdict<T>]) -> Summary<T>
where
    T: Copy + Sum<T>,
{
    let valid_n = verdicts.iter().filter(|v| v.is_valid()).count();
    Summary {
        valid_n,
        invalid_n: verdicts.len() - valid_n,
        median_sum: verdicts.iter().filter_map(|v| v.median().copied()).sum(),
    }
}

// Invalid sequences with cyclic rules can't be reordered and add nothing.
pub fn corrected_median_sum<T>(
    rules: &RuleSet<T>,
    sequences: &[Vec<T>],
    verdicts: &[Verdict<T>],
    parallel: bool,
) -> T
where
    T: Copy + Eq + Hash + Debug + Send + Sync + Sum<T>,
{
    let correct = |(seq, verdict): (&Vec<T>, &Verdict<T>)| -> Option<T> {
        if verdict.is_valid() {
            return None;
        }

        let Some(order) = validate::reorder(rules, seq) else {
            log::warn!("Sequence {:?} can't be reordered, its rules are cyclic.", seq);
            return None;
        };
        validate::median(&order).copied()
    };

    if parallel {
        sequences
            .par_iter()
            .zip(verdicts.par_iter())
            .filter_map(correct)
            .sum()
    } else {
        sequences.iter().zip(verdicts).filter_map(correct).sum()
    }
}

use std::{
    collections::{BTreeSet, HashMap, HashSet},
    fmt::{Debug, Display},
    hash::Hash,
};

use crate::{graph::DependencyGraph, rule::RuleSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation<T> {
    NotReady { position: usize, item: T },
    Empty,
}

impl<T: Display> Display for Violation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::NotReady { position, item } => write!(
                f,
                "Item({}) at position {} comes before some of its predecessors.",
                item, position
            ),
            Violation::Empty => write!(f, "Empty sequence has no order to check."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<T> {
    Valid { median: T },
    Invalid(Violation<T>),
}

impl<T> Verdict<T> {
    pub fn is_valid(&self) -> bool {
        matches!(self, Verdict::Valid { .. })
    }

    pub fn median(&self) -> Option<&T> {
        match self {
            Verdict::Valid { median } => Some(median),
            Verdict::Invalid(_) => None,
        }
    }
}

/// Lower middle item, `sequence[len / 2]`.
pub fn median<T>(sequence: &[T]) -> Option<&T> {
    sequence.get(sequence.len() / 2)
}

pub fn validate<T>(rules: &RuleSet<T>, sequence: &[T]) -> Verdict<T>
where
    T: Clone + Eq + Hash + Debug,
{
    let applicable = rules.applicable_to(sequence);
    log::debug!(
        "{} of {} rules apply to sequence {:?}",
        applicable.len(),
        rules.len(),
        sequence
    );
    let graph = DependencyGraph::build(sequence, &applicable);
    graph.check_order(sequence)
}

pub fn reorder<T>(rules: &RuleSet<T>, sequence: &[T]) -> Option<Vec<T>>
where
    T: Clone + Eq + Hash + Debug,
{
    let applicable = rules.applicable_to(sequence);
    DependencyGraph::build(sequence, &applicable).topological_order(sequence)
}

impl<T> DependencyGraph<T>
where
    T: Clone + Eq + Hash + Debug,
{
    // Kahn's algorithm, but the next item is dictated by `sequence`.
    pub fn check_order(&self, sequence: &[T]) -> Verdict<T> {
        let Some(median) = median(sequence) else {
            return Verdict::Invalid(Violation::Empty);
        };
        if sequence.len() == 1 {
            return Verdict::Valid {
                median: median.clone(),
            };
        }

        self.log_dump();
        let mut in_degrees = self.in_degrees();
        let mut ready = in_degrees
            .iter()
            .filter(|(_, in_degree)| **in_degree == 0)
            .map(|(item, _)| item.clone())
            .collect::<HashSet<_>>();
        for (position, item) in sequence.iter().enumerate() {
            if !ready.remove(item) {
                log::debug!(
                    "Item {:?} at position {} isn't ready, {} predecessors pending.",
                    item,
                    position,
                    in_degrees.get(item).copied().unwrap_or(0)
                );
                return Verdict::Invalid(Violation::NotReady {
                    position,
                    item: item.clone(),
                });
            }

            log::trace!("Consume {:?} at position {}.", item, position);
            release_successors(self.successors(item), &mut in_degrees, |after| {
                ready.insert(after.clone());
            });
        }

        Verdict::Valid {
            median: median.clone(),
        }
    }

    // Ties go to the earliest position in `sequence`.
    pub fn topological_order(&self, sequence: &[T]) -> Option<Vec<T>> {
        let positions = sequence
            .iter()
            .enumerate()
            .map(|(ind, item)| (item.clone(), ind))
            .collect::<HashMap<_, _>>();
        let mut in_degrees = self.in_degrees();
        let mut ready = sequence
            .iter()
            .enumerate()
            .filter(|(_, item)| in_degrees.get(*item) == Some(&0))
            .map(|(ind, _)| ind)
            .collect::<BTreeSet<_>>();
        let mut order = Vec::with_capacity(sequence.len());
        while let Some(ind) = ready.pop_first() {
            let item = &sequence[ind];
            order.push(item.clone());
            release_successors(self.successors(item), &mut in_degrees, |after| {
                if let Some(after_ind) = positions.get(after) {
                    ready.insert(*after_ind);
                }
            });
        }

        if order.len() == positions.len() {
            Some(order)
        } else {
            log::debug!(
                "Only {} of {} items could be ordered, rules are cyclic.",
                order.len(),
                positions.len()
            );
            None
        }
    }
}

fn release_successors<T, F>(afters: &[T], in_degrees: &mut HashMap<T, usize>, mut on_ready: F)
where
    T: Eq + Hash,
    F: FnMut(&T),
{
    for after in afters {
        if let Some(in_degree) = in_degrees.get_mut(after) {
            *in_degree = in_degree.saturating_sub(1);
            if *in_degree == 0 {
                on_ready(after);
            }
        }
    }
}

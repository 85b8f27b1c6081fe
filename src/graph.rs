use std::{
    collections::{HashMap, HashSet},
    fmt::Debug,
    hash::Hash,
};

use crate::rule::Rule;

/// Every member of the sequence has an in-degree entry, 0 when nothing precedes it.
#[derive(Debug, Clone)]
pub struct DependencyGraph<T> {
    successors: HashMap<T, Vec<T>>,
    in_degrees: HashMap<T, usize>,
}

impl<T> DependencyGraph<T>
where
    T: Clone + Eq + Hash,
{
    pub fn build<'a, I>(sequence: &[T], rules: I) -> Self
    where
        I: IntoIterator<Item = &'a Rule<T>>,
        T: 'a,
    {
        let mut successors: HashMap<T, Vec<T>> = HashMap::new();
        let mut in_degrees = sequence
            .iter()
            .map(|item| (item.clone(), 0))
            .collect::<HashMap<_, _>>();
        let mut seen_edges = HashSet::new();
        for rule in rules {
            if !seen_edges.insert((rule.before(), rule.after())) {
                continue;
            }

            successors
                .entry(rule.before().clone())
                .or_default()
                .push(rule.after().clone());
            *in_degrees.entry(rule.after().clone()).or_insert(0) += 1;
            in_degrees.entry(rule.before().clone()).or_insert(0);
        }

        Self {
            successors,
            in_degrees,
        }
    }

    pub fn successors(&self, item: &T) -> &[T] {
        self.successors
            .get(item)
            .map(|afters| afters.as_slice())
            .unwrap_or(&[])
    }

    pub fn in_degree(&self, item: &T) -> Option<usize> {
        self.in_degrees.get(item).copied()
    }

    pub(crate) fn in_degrees(&self) -> HashMap<T, usize> {
        self.in_degrees.clone()
    }
}

impl<T> DependencyGraph<T> {
    pub fn item_n(&self) -> usize {
        self.in_degrees.len()
    }

    pub fn edge_n(&self) -> usize {
        self.successors.values().map(|afters| afters.len()).sum()
    }
}

impl<T: Debug> DependencyGraph<T> {
    pub(crate) fn log_dump(&self) {
        log::debug!(
            "Dependency graph has {} items and {} edges.",
            self.item_n(),
            self.edge_n()
        );
        if log::log_enabled!(log::Level::Trace) {
            for (item, afters) in &self.successors {
                log::trace!("{:?} -> {:?}", item, afters);
            }
            for (item, in_degree) in &self.in_degrees {
                log::trace!("in-degree of {:?} is {}", item, in_degree);
            }
        }
    }
}

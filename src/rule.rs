use std::{
    collections::{HashMap, HashSet},
    fmt::Display,
    hash::Hash,
    str::FromStr,
};

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rule<T> {
    before: T,
    after: T,
}

impl<T> Rule<T> {
    pub fn new(before: T, after: T) -> Self {
        Self { before, after }
    }

    pub fn before(&self) -> &T {
        &self.before
    }

    pub fn after(&self) -> &T {
        &self.after
    }
}

impl<T: Display> Display for Rule<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}|{}", self.before, self.after)
    }
}

impl<T: FromStr> FromStr for Rule<T> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (before_text, after_text) = s
            .split_once('|')
            .ok_or(Error::InvalidRuleText(s.to_string()))?;
        let before = before_text
            .trim()
            .parse::<T>()
            .map_err(|_| Error::InvalidRuleText(s.to_string()))?;
        let after = after_text
            .trim()
            .parse::<T>()
            .map_err(|_| Error::InvalidRuleText(s.to_string()))?;

        Ok(Self::new(before, after))
    }
}

/// Keeps only the rules whose both ends are members of `sequence`.
pub fn applicable_rules<T>(rules: &[Rule<T>], sequence: &[T]) -> Vec<Rule<T>>
where
    T: Clone + Eq + Hash,
{
    let members = sequence.iter().collect::<HashSet<_>>();
    rules
        .iter()
        .filter(|r| members.contains(&r.before) && members.contains(&r.after))
        .cloned()
        .collect()
}

#[derive(Debug, Clone)]
pub struct RuleSet<T> {
    successors: HashMap<T, Vec<T>>,
    rule_n: usize,
}

impl<T> Default for RuleSet<T> {
    fn default() -> Self {
        Self {
            successors: HashMap::new(),
            rule_n: 0,
        }
    }
}

impl<T> RuleSet<T>
where
    T: Clone + Eq + Hash,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the same rule was already known.
    pub fn add(&mut self, rule: Rule<T>) -> bool {
        let Rule { before, after } = rule;
        let afters = self.successors.entry(before).or_default();
        if afters.contains(&after) {
            return false;
        }

        afters.push(after);
        self.rule_n += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.rule_n
    }

    pub fn is_empty(&self) -> bool {
        self.rule_n == 0
    }

    pub(crate) fn describe(&self) -> String {
        format!(
            "{} rules over {} predecessors",
            self.rule_n,
            self.successors.len()
        )
    }

    /// Same filter as [`applicable_rules`], grouped by predecessor in sequence order.
    pub fn applicable_to(&self, sequence: &[T]) -> Vec<Rule<T>> {
        let members = sequence.iter().collect::<HashSet<_>>();
        let mut applicable = Vec::new();
        for before in sequence {
            if let Some(afters) = self.successors.get(before) {
                applicable.extend(
                    afters
                        .iter()
                        .filter(|after| members.contains(after))
                        .map(|after| Rule::new(before.clone(), after.clone())),
                );
            }
        }

        applicable
    }
}

impl<T> FromIterator<Rule<T>> for RuleSet<T>
where
    T: Clone + Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = Rule<T>>>(iter: I) -> Self {
        let mut rules = Self::new();
        for rule in iter {
            rules.add(rule);
        }

        rules
    }
}

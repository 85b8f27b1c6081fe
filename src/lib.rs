use std::{
    collections::HashSet,
    error,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::Parser;

pub mod graph;
pub mod report;
pub mod rule;
pub mod validate;

pub use rule::{Rule, RuleSet};
pub use validate::{reorder, validate, Verdict, Violation};

#[derive(Debug)]
pub enum Error {
    InvalidRuleText(String),
    InvalidPageText(String),
    DuplicatePage(usize, String),
    EmptyUpdate,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidRuleText(s) => write!(f, "Invalid rule text({}) for printer.", s),
            Error::InvalidPageText(s) => write!(f, "Invalid page number text({}) in update.", s),
            Error::DuplicatePage(page, s) => {
                write!(f, "Page {} appears more than once in update({}).", page, s)
            }
            Error::EmptyUpdate => write!(f, "Found an update without any page."),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    pub input_path: PathBuf,
    #[arg(long)]
    pub serial: bool,
    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[derive(Debug, clap::Args)]
pub struct LoggingArgs {
    #[arg(short, long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
    #[arg(short, long)]
    quiet: bool,
}

impl LoggingArgs {
    // None leaves the level to DAY5_LOG, or warn without it.
    fn level_filter(&self) -> Option<log::LevelFilter> {
        match (self.quiet, self.verbose) {
            (true, _) => Some(log::LevelFilter::Error),
            (false, 0) => None,
            (false, 1) => Some(log::LevelFilter::Info),
            (false, 2) => Some(log::LevelFilter::Debug),
            (false, _) => Some(log::LevelFilter::Trace),
        }
    }

    pub fn init_logging(&self) {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(log::LevelFilter::Warn);
        builder.parse_env("DAY5_LOG");
        if let Some(level) = self.level_filter() {
            builder.filter_level(level);
        }
        builder.init();
    }
}

#[derive(Debug, Clone)]
pub struct PrintQueue {
    rules: RuleSet<usize>,
    updates: Vec<Vec<usize>>,
}

impl PrintQueue {
    pub fn rules(&self) -> &RuleSet<usize> {
        &self.rules
    }

    pub fn updates(&self) -> &[Vec<usize>] {
        &self.updates
    }
}

impl FromStr for PrintQueue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut builder = PrintQueueBuilder::new();
        for line in s.lines() {
            builder.add_line(line)?;
        }

        Ok(builder.build())
    }
}

struct PrintQueueBuilder {
    rules: RuleSet<usize>,
    updates: Vec<Vec<usize>>,
    in_updates: bool,
    pending_blank_n: usize,
}

impl PrintQueueBuilder {
    pub fn new() -> Self {
        Self {
            rules: RuleSet::new(),
            updates: Vec::new(),
            in_updates: false,
            pending_blank_n: 0,
        }
    }

    pub fn add_line(&mut self, line: &str) -> Result<(), Error> {
        let line = line.trim();
        if line.is_empty() {
            if self.in_updates {
                self.pending_blank_n += 1;
            } else {
                self.in_updates = true;
            }
            return Ok(());
        }

        if !self.in_updates {
            let rule = line.parse::<Rule<usize>>()?;
            if !self.rules.add(rule) {
                log::debug!("Rule({}) is given more than once.", rule);
            }
            return Ok(());
        }

        // Blank lines are only tolerated at the end of the update section.
        if self.pending_blank_n > 0 {
            return Err(Error::EmptyUpdate);
        }

        self.updates.push(parse_update(line)?);
        Ok(())
    }

    pub fn build(self) -> PrintQueue {
        log::info!(
            "Loaded {} and {} updates.",
            self.rules.describe(),
            self.updates.len()
        );
        PrintQueue {
            rules: self.rules,
            updates: self.updates,
        }
    }
}

fn parse_update(text: &str) -> Result<Vec<usize>, Error> {
    let mut seen = HashSet::new();
    text.split(',')
        .map(|s| {
            let page = s
                .trim()
                .parse::<usize>()
                .map_err(|_| Error::InvalidPageText(s.to_string()))?;
            if seen.insert(page) {
                Ok(page)
            } else {
                Err(Error::DuplicatePage(page, text.to_string()))
            }
        })
        .collect()
}

pub fn read_print_queue<P: AsRef<Path>>(path: P) -> Result<PrintQueue> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = PrintQueueBuilder::new();
    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} from given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder
            .add_line(line.as_str())
            .with_context(|| format!("Failed to parse line {}({}).", ind + 1, line))?;
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sections() {
        let queue = "1|2\n2|3\n1|2\n\n1,2,3\n5\n\n".parse::<PrintQueue>().unwrap();
        assert_eq!(queue.rules().len(), 2);
        assert_eq!(queue.updates(), &[vec![1, 2, 3], vec![5]]);
    }

    #[test]
    fn rules_only() {
        let queue = "1|2\n".parse::<PrintQueue>().unwrap();
        assert_eq!(queue.rules().len(), 1);
        assert!(queue.updates().is_empty());
    }

    #[test]
    fn reject_bad_rule() {
        assert!(matches!(
            "1|2\n1,2\n\n1,2".parse::<PrintQueue>(),
            Err(Error::InvalidRuleText(_))
        ));
    }

    #[test]
    fn reject_bad_page() {
        assert!(matches!(
            "1|2\n\n1,x,2".parse::<PrintQueue>(),
            Err(Error::InvalidPageText(s)) if s == "x"
        ));
        assert!(matches!(
            "1|2\n\n1,,2".parse::<PrintQueue>(),
            Err(Error::InvalidPageText(_))
        ));
    }

    #[test]
    fn reject_repeated_page() {
        assert!(matches!(
            "\n3,1,3".parse::<PrintQueue>(),
            Err(Error::DuplicatePage(3, _))
        ));
    }

    #[test]
    fn reject_gap_between_updates() {
        assert!(matches!(
            "1|2\n\n1,2\n\n2,1".parse::<PrintQueue>(),
            Err(Error::EmptyUpdate)
        ));
    }

    #[test]
    fn verbosity_flags_pick_level() {
        let level_of = |argv: &[&str]| {
            CLIArgs::try_parse_from(argv)
                .unwrap()
                .logging
                .level_filter()
        };
        assert_eq!(level_of(&["part1", "in.txt"]), None);
        assert_eq!(level_of(&["part1", "-q", "in.txt"]), Some(log::LevelFilter::Error));
        assert_eq!(level_of(&["part1", "-v", "in.txt"]), Some(log::LevelFilter::Info));
        assert_eq!(level_of(&["part1", "-vv", "in.txt"]), Some(log::LevelFilter::Debug));
        assert_eq!(level_of(&["part1", "-vvvv", "in.txt"]), Some(log::LevelFilter::Trace));
        assert!(CLIArgs::try_parse_from(["part1", "-q", "-v", "in.txt"]).is_err());
        assert!(CLIArgs::try_parse_from(["part1", "--log", "debug", "in.txt"]).is_err());
    }

    #[test]
    fn read_missing_file() {
        let err = read_print_queue("no/such/input.txt").unwrap_err();
        assert!(err.to_string().contains("no/such/input.txt"));
    }

    #[test]
    fn read_example_file() {
        let queue = read_print_queue(concat!(env!("CARGO_MANIFEST_DIR"), "/example.txt")).unwrap();
        assert_eq!(queue.rules().len(), 21);
        assert_eq!(queue.updates().len(), 6);
        assert_eq!(queue.updates()[2], vec![75, 29, 13]);
    }
}

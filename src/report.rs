//! Reporting utilities: command dispatch, timing, and tree printing.

use crate::error::ParkdError;
use crate::tree::KdTree;
use crate::types::Coord;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

/// What to report after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Everything below.
    All,
    /// Summary of the tree and the execution environment.
    Info,
    /// Rotated rendering of the whole tree.
    Print,
    /// Phase timings.
    Time,
}

impl FromStr for Command {
    type Err = ParkdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Command::All),
            "info" => Ok(Command::Info),
            "print" => Ok(Command::Print),
            "time" => Ok(Command::Time),
            other => Err(ParkdError::UnknownCommand(other.to_string())),
        }
    }
}

/// How long each phase of a build took.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildTiming {
    /// Building the tree itself.
    pub construction: Duration,
    /// Replicating the dataset to the participant group; zero when the
    /// group tier was inactive.
    pub distribution: Duration,
}

impl fmt::Display for BuildTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Construction time: {:?} | Distribution time: {:?}",
            self.construction, self.distribution
        )
    }
}

/// Write the requested report for a finished build to `out`.
pub fn report<T, W>(
    command: Command,
    tree: &KdTree<T>,
    timing: &BuildTiming,
    out: &mut W,
) -> io::Result<()>
where
    T: Coord + fmt::Display,
    W: Write,
{
    match command {
        Command::Info => info(tree, out),
        Command::Print => writeln!(out, "{tree}"),
        Command::Time => writeln!(out, "{timing}"),
        Command::All => {
            info(tree, out)?;
            writeln!(out, "{tree}")?;
            writeln!(out, "{timing}")
        }
    }
}

fn info<T, W>(tree: &KdTree<T>, out: &mut W) -> io::Result<()>
where
    T: Coord + fmt::Display,
    W: Write,
{
    let mut ranks = Vec::new();
    tree.root().for_each(&mut |node| {
        if let Some(rank) = node.owner() {
            ranks.push(rank);
        }
    });
    ranks.sort_unstable();
    ranks.dedup();

    log::info!(
        "tree: {} points, depth {}, {} participating ranks",
        tree.cardinality(),
        tree.depth(),
        ranks.len()
    );
    writeln!(
        out,
        "{} points, depth {}, built by {} rank(s)",
        tree.cardinality(),
        tree.depth(),
        ranks.len().max(1)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dataset, TreeBuilder};

    fn built() -> KdTree<f64> {
        let mut data: Dataset<f64> = [(0.0, 5.0), (10.0, 1.0), (20.0, 9.0), (30.0, 2.0)]
            .into_iter()
            .collect();
        TreeBuilder::new().sequential().build(&mut data).unwrap()
    }

    #[test]
    fn commands_parse() {
        assert_eq!("all".parse::<Command>().unwrap(), Command::All);
        assert_eq!("info".parse::<Command>().unwrap(), Command::Info);
        assert_eq!("print".parse::<Command>().unwrap(), Command::Print);
        assert_eq!("time".parse::<Command>().unwrap(), Command::Time);
        assert!(matches!(
            "bogus".parse::<Command>(),
            Err(ParkdError::UnknownCommand(s)) if s == "bogus"
        ));
    }

    #[test]
    fn print_renders_every_point() {
        let tree = built();
        let mut out = Vec::new();
        report(Command::Print, &tree, &BuildTiming::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for needle in ["(0, 5)", "(10, 1)", "(20, 9)", "(30, 2)"] {
            assert!(text.contains(needle), "missing {needle} in:\n{text}");
        }
    }

    #[test]
    fn time_writes_both_phases() {
        let tree = built();
        let timing = BuildTiming {
            construction: Duration::from_millis(5),
            distribution: Duration::from_millis(1),
        };
        let mut out = Vec::new();
        report(Command::Time, &tree, &timing, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Construction time"));
        assert!(text.contains("Distribution time"));
    }

    #[test]
    fn all_includes_summary_tree_and_timing() {
        let tree = built();
        let mut out = Vec::new();
        report(Command::All, &tree, &BuildTiming::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("4 points"));
        assert!(text.contains("(20, 9)"));
        assert!(text.contains("Construction time"));
    }
}

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use maxsets::verify::check_family;
use maxsets::{enumerate, par_enumerate, EnumerateConfig, Graph, PivotRule, SetKind, VertexSet};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maxsets")]
#[command(about = "Enumerate the maximal cliques and maximal independent sets of a graph")]
struct Cmd {
    /// Graph file: a 0/1 adjacency matrix, or an edge list (vertex count, then `u v` lines)
    graph: PathBuf,

    /// Which family to enumerate
    #[arg(long, value_enum, default_value_t = Kind::Both)]
    kind: Kind,

    /// Branch pruning rule
    #[arg(long, value_enum, default_value_t = Pivot::None)]
    pivot: Pivot,

    /// Split the search across the rayon thread pool (collects all sets before printing)
    #[arg(long)]
    parallel: bool,

    /// Print only the number of sets per family
    #[arg(long)]
    count: bool,

    /// Stop after this many sets per family (with --parallel the full family is still
    /// enumerated and only the output is cut)
    #[arg(long)]
    limit: Option<usize>,

    /// Check every produced set for validity, maximality and uniqueness
    #[arg(long)]
    verify: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Cliques,
    Independent,
    Both,
}

#[derive(Clone, Copy, ValueEnum)]
enum Pivot {
    None,
    Tomita,
}

impl From<Pivot> for PivotRule {
    fn from(p: Pivot) -> Self {
        match p {
            Pivot::None => PivotRule::None,
            Pivot::Tomita => PivotRule::Tomita,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cmd = Cmd::parse();
    let graph = Graph::from_file(&cmd.graph)
        .with_context(|| format!("failed to load graph from {}", cmd.graph.display()))?;
    tracing::info!(
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let kinds: &[SetKind] = match cmd.kind {
        Kind::Cliques => &[SetKind::Clique],
        Kind::Independent => &[SetKind::IndependentSet],
        Kind::Both => &[SetKind::Clique, SetKind::IndependentSet],
    };
    let config = EnumerateConfig {
        pivot: cmd.pivot.into(),
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for &kind in kinds {
        let limit = cmd.limit.unwrap_or(usize::MAX);
        let sets: Vec<VertexSet> = if cmd.parallel {
            let mut all = par_enumerate(&graph, kind, &config)?;
            all.truncate(limit);
            all
        } else {
            enumerate(&graph, kind, &config)?.take(limit).collect()
        };

        if cmd.verify {
            let checked = check_family(&graph, kind, &sets)
                .with_context(|| format!("{} verification failed", label(kind)))?;
            tracing::info!(kind = label(kind), checked, "verified");
        }

        if cmd.count {
            writeln!(out, "{}: {}", label(kind), sets.len())?;
        } else {
            writeln!(out, "# {} ({})", label(kind), sets.len())?;
            for set in &sets {
                writeln!(out, "{set}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn label(kind: SetKind) -> &'static str {
    match kind {
        SetKind::Clique => "maximal cliques",
        SetKind::IndependentSet => "maximal independent sets",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn limit_help_mentions_parallel_collection() {
        let cmd = Cmd::command();
        let limit = cmd
            .get_arguments()
            .find(|a| a.get_id() == "limit")
            .unwrap();
        let help = limit.get_help().unwrap().to_string();
        assert!(help.contains("--parallel"), "limit help: {help}");
        cmd.debug_assert();
    }

    #[test]
    fn parallel_and_limit_parse_together() {
        let cmd = Cmd::try_parse_from(["maxsets", "g.txt", "--parallel", "--limit", "3"]).unwrap();
        assert!(cmd.parallel);
        assert_eq!(cmd.limit, Some(3));
    }
}

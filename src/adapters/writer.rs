//! Graph serialization: CSV edge lists, JSON adjacency maps, Graphviz DOT.

use crate::domain::graph::DependencyGraph;
use crate::domain::ports::GraphWriter;
use anyhow::{Context, Result};
use petgraph::dot::{Config, Dot};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum GraphFormat {
    /// `Source,Target[,Weight]` rows, one per edge
    #[default]
    Csv,
    /// `{"source": {"target": weight}}`
    Json,
    /// Graphviz digraph with weights as edge labels
    Dot,
}

/// Writes one row per edge after a `Source,Target[,Weight]` header.
pub fn write_csv<W: Write>(graph: &DependencyGraph, with_weights: bool, out: &mut W) -> Result<()> {
    if with_weights {
        writeln!(out, "Source,Target,Weight")?;
    } else {
        writeln!(out, "Source,Target")?;
    }
    for (source, target, weight) in graph.edges() {
        if with_weights {
            writeln!(out, "{source},{target},{weight}")?;
        } else {
            writeln!(out, "{source},{target}")?;
        }
    }
    Ok(())
}

pub fn write_json<W: Write>(graph: &DependencyGraph, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, graph).context("Failed to serialize graph")?;
    writeln!(out)?;
    Ok(())
}

pub fn render_dot(graph: &DependencyGraph, with_weights: bool) -> String {
    let graph = graph.to_petgraph();
    if with_weights {
        format!("{}", Dot::new(&graph))
    } else {
        format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}

/// Writes the graph to a file in the chosen format.
pub struct FileGraphWriter {
    path: PathBuf,
    format: GraphFormat,
    with_weights: bool,
}

impl FileGraphWriter {
    pub fn new(path: impl Into<PathBuf>, format: GraphFormat) -> Self {
        Self {
            path: path.into(),
            format,
            with_weights: false,
        }
    }

    pub fn with_weights(mut self, with_weights: bool) -> Self {
        self.with_weights = with_weights;
        self
    }
}

impl GraphWriter for FileGraphWriter {
    fn write(&self, graph: &DependencyGraph) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Cannot create {}", self.path.display()))?;
        let mut out = BufWriter::new(file);
        match self.format {
            GraphFormat::Csv => write_csv(graph, self.with_weights, &mut out)?,
            GraphFormat::Json => write_json(graph, &mut out)?,
            GraphFormat::Dot => out.write_all(render_dot(graph, self.with_weights).as_bytes())?,
        }
        out.flush()
            .with_context(|| format!("Cannot write {}", self.path.display()))
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }
}

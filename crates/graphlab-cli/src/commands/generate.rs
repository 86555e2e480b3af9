//! Graph generation command.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Cell;
use serde::Serialize;

use super::GraphSource;
use crate::OutputFormat;
use crate::output::{self, Format};

/// Generated graph summary.
#[derive(Serialize)]
struct GraphSummary {
    nodes: usize,
    edges: usize,
    connected: bool,
}

/// Run the generate command.
pub fn run(source: &GraphSource, out: Option<&Path>, format: OutputFormat, quiet: bool) -> Result<()> {
    let graph = source.load()?;

    if let Some(path) = out {
        let json = serde_json::to_string_pretty(&graph)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
        output::success(&format!("Graph written to {}", path.display()), quiet);
    }

    let fmt: Format = format.into();
    match fmt {
        Format::Json => {
            if out.is_none() {
                output::print_json(&graph, quiet)?;
            } else {
                let summary = GraphSummary {
                    nodes: graph.node_count(),
                    edges: graph.edge_count(),
                    connected: graph.validate_connectivity(),
                };
                output::print_json(&summary, quiet)?;
            }
        }
        Format::Table => {
            if quiet {
                return Ok(());
            }
            let mut table = output::create_table();
            output::add_header(&mut table, &["Edge", "Weight"]);
            for edge in &graph.edges {
                table.add_row(vec![Cell::new(edge.id()), Cell::new(edge.weight)]);
            }
            println!("{table}");
            output::print_key_value_table(
                &[
                    ("Nodes", graph.node_count().to_string()),
                    ("Edges", graph.edge_count().to_string()),
                    ("Connected", graph.validate_connectivity().to_string()),
                ],
                fmt,
                quiet,
            )?;
        }
    }
    Ok(())
}

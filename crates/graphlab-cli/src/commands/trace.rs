//! Step trace command.

use anyhow::Result;
use comfy_table::{Cell, Color};
use graphlab::{TraceOutcome, TraceParams, trace_by_key};

use super::GraphSource;
use crate::OutputFormat;
use crate::output::{self, Format};

/// Run the trace command.
pub fn run(
    source: &GraphSource,
    algorithm: &str,
    start: String,
    goal: Option<String>,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let graph = source.load()?;
    let mut params = TraceParams::new(start);
    if let Some(goal) = goal {
        params = params.with_goal(goal);
    }
    let trace = trace_by_key(&graph, algorithm, &params)?;

    let fmt: Format = format.into();
    match fmt {
        Format::Json => output::print_json(&trace, quiet)?,
        Format::Table => {
            if quiet {
                return Ok(());
            }
            let pseudocode = trace.pseudocode();
            let mut table = output::create_table();
            output::add_header(&mut table, &["#", "Line", "Explanation", "Frontier"]);
            for (i, step) in trace.steps.iter().enumerate() {
                let line = pseudocode
                    .get(step.pseudocode_line)
                    .map_or("", |l| l.trim());
                table.add_row(vec![
                    Cell::new(i),
                    Cell::new(line).fg(Color::DarkGrey),
                    Cell::new(&step.explanation),
                    Cell::new(step.frontier.join(", ")),
                ]);
            }
            println!("{table}");
            output::print_key_value_table(&outcome_rows(&trace.outcome), fmt, quiet)?;
        }
    }
    Ok(())
}

fn outcome_rows(outcome: &TraceOutcome) -> Vec<(&'static str, String)> {
    match outcome {
        TraceOutcome::Traversal { order } => vec![("Visit order", order.join(", "))],
        TraceOutcome::ShortestPath {
            distances,
            goal,
            path,
        } => {
            let mut rows: Vec<(&'static str, String)> = vec![(
                "Distances",
                distances
                    .iter()
                    .map(|(id, d)| format!("{id}={d}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            )];
            if let Some(goal) = goal {
                rows.push(("Goal", goal.clone()));
                rows.push((
                    "Path",
                    path.as_ref()
                        .map_or_else(|| "unreachable".to_string(), |p| p.join(" -> ")),
                ));
            }
            rows
        }
        TraceOutcome::SpanningTree {
            edges,
            total_weight,
        } => vec![
            ("Tree edges", edges.join(", ")),
            ("Total weight", total_weight.to_string()),
        ],
        TraceOutcome::MaxFlow { value, edge_flows } => vec![
            ("Maximum flow", value.to_string()),
            (
                "Edge flows",
                edge_flows
                    .iter()
                    .filter(|(_, f)| *f > 0.0)
                    .map(|(id, f)| format!("{id}={f}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        ],
    }
}

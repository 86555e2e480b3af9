//! Scripted play session command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color};
use graphlab::{Algorithm, MoveValidator, ScoringPolicy, SessionSummary, TraceParams, Verdict};
use serde::Serialize;

use super::GraphSource;
use crate::OutputFormat;
use crate::output::{self, Format};

/// Arguments of the play command.
pub struct PlayArgs {
    pub algorithm: String,
    pub start: String,
    pub goal: Option<String>,
    pub scoring: Option<PathBuf>,
    pub moves: Vec<String>,
}

/// One graded move.
#[derive(Serialize)]
struct GradedMove {
    #[serde(rename = "move")]
    mv: String,
    #[serde(flatten)]
    verdict: Verdict,
}

/// Session output.
#[derive(Serialize)]
struct PlayOutput {
    moves: Vec<GradedMove>,
    frontier: Vec<String>,
    summary: SessionSummary,
}

fn load_policy(path: Option<&PathBuf>) -> Result<ScoringPolicy> {
    let Some(path) = path else {
        return Ok(ScoringPolicy::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Run the play command.
pub fn run(source: &GraphSource, args: &PlayArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let graph = source.load()?;
    let mut params = TraceParams::new(args.start.clone());
    if let Some(goal) = &args.goal {
        params = params.with_goal(goal.clone());
    }

    let mut validator = MoveValidator::new(&graph, algorithm, &params)?
        .with_policy(load_policy(args.scoring.as_ref())?)
        .with_difficulty(source.difficulty);

    let moves: Vec<GradedMove> = args
        .moves
        .iter()
        .map(|mv| GradedMove {
            mv: mv.clone(),
            verdict: validator.submit_move(mv.as_str()),
        })
        .collect();
    let output = PlayOutput {
        moves,
        frontier: validator.frontier().to_vec(),
        summary: validator.summary(),
    };

    let fmt: Format = format.into();
    match fmt {
        Format::Json => output::print_json(&output, quiet)?,
        Format::Table => {
            if quiet {
                return Ok(());
            }
            let mut table = output::create_table();
            output::add_header(&mut table, &["Move", "Verdict", "Reason", "Score"]);
            for graded in &output.moves {
                let verdict = if graded.verdict.correct {
                    Cell::new("correct").fg(Color::Green)
                } else {
                    Cell::new("incorrect").fg(Color::Red)
                };
                table.add_row(vec![
                    Cell::new(&graded.mv),
                    verdict,
                    Cell::new(&graded.verdict.reason),
                    Cell::new(format!("{:+}", graded.verdict.score_delta)),
                ]);
            }
            println!("{table}");
            output::status(&format!("Phase: {:?}", validator.phase()), quiet);
            output::print_key_value_table(
                &[
                    ("Algorithm", output.summary.algorithm.to_string()),
                    ("Difficulty", output.summary.difficulty.to_string()),
                    ("Score", output.summary.final_score.to_string()),
                    ("Moves", output.summary.move_count.to_string()),
                    ("Elapsed (ms)", output.summary.elapsed_ms.to_string()),
                    ("Frontier", output.frontier.join(", ")),
                ],
                fmt,
                quiet,
            )?;
        }
    }
    Ok(())
}

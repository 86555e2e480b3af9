//! Pseudocode listing command.

use anyhow::Result;
use comfy_table::{Cell, Color};
use graphlab::{Algorithm, pseudocode};

use crate::OutputFormat;
use crate::output::{self, Format};

/// Run the pseudocode command.
pub fn run(key: &str, format: OutputFormat, quiet: bool) -> Result<()> {
    let algorithm: Algorithm = key.parse()?;
    let lines = pseudocode(algorithm);

    let fmt: Format = format.into();
    match fmt {
        Format::Json => output::print_json(&lines, quiet)?,
        Format::Table => {
            if quiet {
                return Ok(());
            }
            let mut table = output::create_table();
            output::add_header(&mut table, &["Line", algorithm.display_name()]);
            for (i, line) in lines.iter().enumerate() {
                table.add_row(vec![Cell::new(i).fg(Color::DarkGrey), Cell::new(line)]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

//! The `examsmith topics` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use examsmith_core::model::TOPICS;

pub fn execute() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Code", "Topic"]);

    for info in TOPICS {
        table.add_row(vec![Cell::new(info.code), Cell::new(info.name)]);
    }

    println!("{table}");
    Ok(())
}

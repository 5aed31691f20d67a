// nl2sql/src/commands/ask.rs
//
// USE CASE: One question end to end, printed as a table.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use std::path::PathBuf;

use nl2sql_core::domain::QueryResult;

pub async fn execute(question: String, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = super::load(config_path.as_deref())?;
    let gateway = super::build_gateway(&config)?;

    let result = gateway.process_question(&question).await?;

    println!("🧠 SQL: {}", result.generated_sql());
    println!("{}", render_table(&result));
    println!(
        "📊 {} row(s) in {} ms",
        result.row_count(),
        result.execution_time_ms()
    );
    Ok(())
}

pub fn render_table(result: &QueryResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(result.columns().to_vec());

    for row in result.rows() {
        let cells: Vec<String> = result
            .columns()
            .iter()
            .map(|col| row.get(col).map(ToString::to_string).unwrap_or_default())
            .collect();
        table.add_row(cells);
    }

    table
}

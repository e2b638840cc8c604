//! Inspect command - classify a single file without writing anything

use crate::cli::error::{explain, HelpfulError};
use crate::cli::output::{color_for_status, print_json, print_table};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Color, ContentArrangement, Table};
use dropwatch::AppConfig;
use dropwatch_triage::{classify, load_dataset, route};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Debug)]
pub struct InspectArgs {
    pub file: PathBuf,
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectResult {
    file: PathBuf,
    #[serde(flatten)]
    assessment: dropwatch_triage::QualityAssessment,
    next_stages: Vec<dropwatch_triage::Stage>,
}

/// Execute the inspect command
pub fn run(config: AppConfig, args: InspectArgs) -> anyhow::Result<()> {
    if !args.file.exists() {
        return Err(HelpfulError::file_not_found(&args.file).into());
    }

    let dataset = load_dataset(&args.file, &config.triage.load_options())
        .map_err(|e| explain(e.into()))?;
    let assessment = classify(&dataset);
    let result = InspectResult {
        file: args.file,
        next_stages: route(assessment.status).to_vec(),
        assessment,
    };

    if args.json {
        return print_json(&result);
    }

    let status = result.assessment.status.as_str();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Field").fg(Color::Cyan),
        Cell::new("Value").fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("File"),
        Cell::new(result.file.display()),
    ]);
    table.add_row(vec![Cell::new("Status"), Cell::new(status).fg(color_for_status(status))]);
    table.add_row(vec![
        Cell::new("Records"),
        Cell::new(result.assessment.total_records),
    ]);
    table.add_row(vec![
        Cell::new("Rows with nulls"),
        Cell::new(result.assessment.rows_with_nulls),
    ]);
    println!("{}", table);

    let null_rows: Vec<Vec<String>> = result
        .assessment
        .columns_with_nulls()
        .map(|c| vec![c.column.clone(), c.nulls.to_string()])
        .collect();
    if !null_rows.is_empty() {
        println!();
        print_table(&["COLUMN", "NULLS"], null_rows);
    }
    Ok(())
}

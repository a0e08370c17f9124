//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use pwl_codec::ScenarioReport;
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format error as JSON: {}", e),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print a successful result, as `{"success": true, <key>: value}` in JSON
/// mode or as `message` otherwise.
pub fn print_success<T: Serialize>(message: &str, key: &str, value: &T, json: bool) {
    if json {
        print_json(key, value);
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print `{"success": true, <key>: value}`.
pub fn print_json<T: Serialize>(key: &str, value: &T) {
    let mut output = json!({ "success": true });
    if let Some(map) = output.as_object_mut() {
        map.insert(key.to_string(), json!(value));
    }
    match serde_json::to_string_pretty(&output) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Failed to format result as JSON: {}", e),
    }
}

/// Print scenario reports
pub fn print_reports(reports: &[ScenarioReport], json: bool) {
    let passed = reports.iter().filter(|r| r.passed()).count();

    if json {
        let output = json!({
            "success": passed == reports.len(),
            "passed": passed,
            "total": reports.len(),
            "reports": reports
        });
        match serde_json::to_string_pretty(&output) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("Failed to format reports as JSON: {}", e),
        }
        return;
    }

    let rows: Vec<Vec<String>> = reports
        .iter()
        .map(|r| {
            let status = if r.passed() {
                "PASS".green().to_string()
            } else {
                "FAIL".red().bold().to_string()
            };
            vec![
                r.scenario.to_string(),
                r.mode.to_string(),
                format!("{}/{}", r.stats.max_abs_err, r.max_abs_err_bound),
                format!("{:+.4}", r.stats.avg_err),
                status,
            ]
        })
        .collect();
    print_table(&["scenario", "mode", "max_err/bound", "avg_err", "result"], &rows);

    println!();
    let summary = format!("{passed}/{} scenario runs within bounds", reports.len());
    if passed == reports.len() {
        println!("{}", summary.as_str().green().bold());
    } else {
        println!("{}", summary.as_str().red().bold());
    }
}

/// Print a left-aligned table with bold headers.
pub fn print_table(headers: &[&str], rows: &[Vec<String>]) {
    if rows.is_empty() {
        println!("{}", "No data".yellow());
        return;
    }

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| visible_len(cell.as_str()))
                .chain(std::iter::once(header.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(header, &width)| format!("{:<width$}", header).as_str().bold().to_string())
        .collect();
    println!("{}", header_line.join("  ").trim_end());

    let separator: Vec<String> = widths.iter().map(|&width| "-".repeat(width)).collect();
    println!("{}", separator.join("  "));

    for row in rows {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| {
                let pad = width.saturating_sub(visible_len(cell));
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

/// Character count ignoring ANSI colour escapes.
fn visible_len(s: &str) -> usize {
    let mut len = 0;
    let mut in_escape = false;
    for c in s.chars() {
        match (in_escape, c) {
            (false, '\u{1b}') => in_escape = true,
            (true, 'm') => in_escape = false,
            (true, _) => {}
            (false, _) => len += 1,
        }
    }
    len
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(cli_error) => cli_error.kind(),
        None => "error",
    }
}

//! Output formatting for CLI

use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use judge_core::{CallResult, Step, WorkflowState};
use serde::Serialize;
use serde_json::Value;

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Outcome of one system test, as rendered for the user.
#[derive(Debug, Serialize)]
pub struct TestReport<'a> {
    pub system: String,
    pub keyword: &'a str,
    pub result: &'a CallResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<&'a str>,
    /// Present only when `path` is set; `null` here means no match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted: Option<Option<&'a Value>>,
}

pub fn print_json<T: Serialize>(item: &T) {
    println!("{}", serde_json::to_string_pretty(item).unwrap_or_default());
}

pub fn print_report(report: &TestReport<'_>, format: OutputFormat) {
    if format == OutputFormat::Json {
        print_json(report);
        return;
    }

    println!("{} (keyword: {:?})", report.system.bold(), report.keyword);
    match report.result {
        CallResult::Failure { error, .. } => {
            println!("  {} {}", "✗".red(), error.red());
        }
        CallResult::Success { status, data } => {
            println!("  {} call succeeded (status {})", "✓".green(), status);
            println!("{}", indent(&pretty(data)));
            if let (Some(path), Some(extracted)) = (report.path, report.extracted) {
                match extracted {
                    Some(value) => {
                        println!("  {} {}", "extracted".bold(), path);
                        println!("{}", indent(&pretty(value)));
                    }
                    None => println!("  {} no match for path {:?}", "!".yellow(), path),
                }
            }
        }
    }
}

pub fn print_progress(state: &WorkflowState) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Step", "Task", "Done"]);
    for step in Step::ALL {
        let done = if state.is_step_completed(step) { "✓" } else { "•" };
        table.add_row(vec![step.to_string(), step.label().to_string(), done.to_string()]);
    }
    println!("{table}");
}

pub fn print_keyword_preview(keywords: &[String], preview: &[String]) {
    println!("{} keywords loaded", keywords.len());
    if preview.is_empty() {
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Keyword"]);
    for (i, keyword) in preview.iter().enumerate() {
        table.add_row(vec![(i + 1).to_string(), keyword.clone()]);
    }
    println!("{table}");
    if keywords.len() > preview.len() {
        println!("... and {} more", keywords.len() - preview.len());
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn report_json_distinguishes_no_match_from_no_path() {
        let result = CallResult::success(200, json!({"a": 1}));
        let no_match = TestReport {
            system: "System A".to_string(),
            keyword: "k",
            result: &result,
            path: Some("b"),
            extracted: Some(None),
        };
        let value = serde_json::to_value(&no_match).unwrap();
        assert!(value["extracted"].is_null());
        assert!(value.as_object().unwrap().contains_key("extracted"));

        let no_path = TestReport {
            path: None,
            extracted: None,
            ..no_match
        };
        let value = serde_json::to_value(&no_path).unwrap();
        assert!(!value.as_object().unwrap().contains_key("extracted"));
        assert_eq!(value["result"]["success"], true);
    }

    #[test]
    fn indent_prefixes_every_line() {
        assert_eq!(indent("{\n}"), "    {\n    }");
    }
}

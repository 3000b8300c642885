//! Ad-hoc single search call

use anyhow::Result;
use clap::Args;
use judge_core::config::DEFAULT_KEYWORD_PARAM;
use judge_core::{extract_path, Executor, HttpMethod, SystemConfig};

use crate::output::{print_report, OutputFormat, TestReport};

#[derive(Args)]
pub struct CallArgs {
    /// Endpoint URL
    #[arg(long)]
    url: String,

    /// HTTP method (GET or POST)
    #[arg(short, long, default_value = "GET")]
    method: HttpMethod,

    /// Name of the keyword parameter
    #[arg(short, long, default_value = DEFAULT_KEYWORD_PARAM)]
    param: String,

    /// Keyword to search for
    #[arg(short, long)]
    keyword: String,

    /// Request headers as a JSON object
    #[arg(long)]
    headers: Option<String>,

    /// POST body template as a JSON object
    #[arg(long)]
    body: Option<String>,

    /// Dotted JSON path to extract from the response
    #[arg(long)]
    path: Option<String>,
}

impl From<CallArgs> for SystemConfig {
    fn from(args: CallArgs) -> Self {
        let mut system = SystemConfig::new(args.method, args.url);
        system.keyword_param = args.param;
        system.headers = args.headers;
        system.body = args.body;
        system.json_path = args.path;
        system
    }
}

pub fn execute(args: CallArgs, format: OutputFormat) -> Result<()> {
    let keyword = args.keyword.clone();
    let system = SystemConfig::from(args);

    let result = Executor::new().execute(&system.request_spec(&keyword));
    let path = system.json_path();
    let extracted = match (path, result.data()) {
        (Some(p), Some(data)) => Some(extract_path(data, p)),
        _ => None,
    };

    print_report(
        &TestReport {
            system: system.url.clone(),
            keyword: &keyword,
            result: &result,
            path,
            extracted,
        },
        format,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_map_onto_system_config() {
        let args = CallArgs {
            url: "http://localhost:3000/search".to_string(),
            method: HttpMethod::Post,
            param: "q".to_string(),
            keyword: "rust".to_string(),
            headers: Some(r#"{"X-Key": "1"}"#.to_string()),
            body: Some(r#"{"size": 1}"#.to_string()),
            path: Some("data.results.0".to_string()),
        };
        let system = SystemConfig::from(args);
        assert_eq!(system.method, HttpMethod::Post);
        assert_eq!(system.keyword_param, "q");
        assert_eq!(system.json_path(), Some("data.results.0"));

        let spec = system.request_spec("rust");
        assert_eq!(spec.headers.unwrap()["X-Key"], "1");
        assert!(spec.body_template.is_some());
    }
}

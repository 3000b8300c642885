//! Keyword list parsing and preview

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Args};
use judge_core::{keyword_preview, load_keywords, KeywordSource};

use crate::output::{print_json, print_keyword_preview, OutputFormat};

#[derive(Args)]
#[command(group(ArgGroup::new("source").required(true).args(["text", "file", "csv"])))]
pub struct KeywordsArgs {
    /// Keywords as free text
    #[arg(long)]
    text: Option<String>,

    /// Text file with keywords
    #[arg(long)]
    file: Option<PathBuf>,

    /// CSV file; the first column holds the keywords
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Delimiter for text input (`\n` for one keyword per line)
    #[arg(short, long, default_value = ",")]
    delimiter: String,

    /// Number of keywords to preview
    #[arg(long, default_value_t = 5)]
    limit: usize,
}

impl KeywordsArgs {
    fn source(self) -> Option<KeywordSource> {
        match (self.text, self.file, self.csv) {
            (Some(text), _, _) => Some(KeywordSource::Text {
                text,
                delimiter: self.delimiter,
            }),
            (_, Some(file), _) => Some(KeywordSource::File {
                file,
                delimiter: self.delimiter,
            }),
            (_, _, Some(csv)) => Some(KeywordSource::Csv { csv }),
            (None, None, None) => None,
        }
    }
}

pub fn execute(args: KeywordsArgs, format: OutputFormat) -> Result<()> {
    let limit = args.limit;
    let source = args
        .source()
        .context("one of --text, --file or --csv is required")?;
    let keywords = load_keywords(&source)?;
    if keywords.is_empty() {
        bail!("no keywords found in input");
    }

    match format {
        OutputFormat::Json => print_json(&keywords),
        OutputFormat::Text => print_keyword_preview(&keywords, keyword_preview(&keywords, limit)),
    }
    Ok(())
}

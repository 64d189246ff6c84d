use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "costvista")]
#[command(about = "Negotiated-rate price statistics per billing code", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Summarize a JSON array of rate records by billing code.
    Summarize(SummarizeArgs),
    /// Search the built-in list of common procedures.
    Catalog(CatalogArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// JSON file holding an array of rate records ("-" reads stdin).
    #[arg(long, short)]
    pub input: String,

    /// Only summarize these billing codes (repeatable, comma-separated allowed).
    #[arg(long = "code")]
    pub codes: Vec<String>,

    /// Free text; any standalone 4-5 digit codes in it are added to --code.
    #[arg(long)]
    pub query: Option<String>,

    /// Keep only summaries whose code or description contains this text.
    #[arg(long)]
    pub search: Option<String>,

    /// Summary column to sort by (code, description, count, min, median, p25, p75, max).
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort direction (asc or desc). Without --sort, output stays in code order.
    #[arg(long)]
    pub dir: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Include the (code-filtered) input rows in JSON output.
    #[arg(long)]
    pub include_rows: bool,

    /// Keep only rows whose code contains this text.
    #[arg(long)]
    pub row_code: Option<String>,

    /// Keep only rows whose provider name contains this text.
    #[arg(long)]
    pub provider: Option<String>,

    /// Keep only rows with a negotiated rate at or above this value.
    #[arg(long)]
    pub min_rate: Option<f64>,

    /// Keep only rows with a negotiated rate at or below this value.
    #[arg(long)]
    pub max_rate: Option<f64>,

    /// Row column to sort by (provider_name, code_type, code, description,
    /// rate_type, negotiated_rate, geo, last_updated).
    #[arg(long)]
    pub row_sort: Option<String>,

    /// Row sort direction (asc or desc).
    #[arg(long)]
    pub row_dir: Option<String>,

    /// Also write the filtered rows as CSV to this file.
    #[arg(long)]
    pub rows_output: Option<String>,

    /// Write to this file instead of stdout.
    #[arg(long, short)]
    pub output: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Code or label fragment; empty lists everything.
    #[arg(default_value = "")]
    pub query: String,

    #[arg(long, default_value_t = 10)]
    pub limit: usize,
}

/// Splits comma-separated values and drops blanks.
pub fn flatten_list(items: &[String]) -> Vec<String> {
    let mut out = Vec::new();
    for item in items {
        for part in item.split(',') {
            let p = part.trim();
            if !p.is_empty() {
                out.push(p.to_string());
            }
        }
    }
    out
}

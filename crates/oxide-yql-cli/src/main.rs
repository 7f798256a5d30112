//! oxide-yql CLI
//!
//! Shows how SQL with JDBC placeholders is classified and rewritten into YQL.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing::{Level, debug, info};
use tracing_subscriber::FmtSubscriber;

use oxide_yql_core::lexer::Span;
use oxide_yql_core::{
    DefaultTypeLookup, HostValue, ParserOptions, QueryParams, QueryStatement, YqlQuery,
};

/// Rewrite JDBC-style SQL into YQL.
#[derive(Parser)]
#[command(name = "oxide-yql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    options: OptionFlags,

    #[command(subcommand)]
    command: Commands,
}

/// Parser toggles. Flags override values loaded from `--config`.
#[derive(Args)]
struct OptionFlags {
    /// JSON file with parser options (kebab-case keys).
    #[arg(short, long, env = "OXIDE_YQL_CONFIG")]
    config: Option<PathBuf>,

    /// Treat every statement as a DATA statement.
    #[arg(long, env = "OXIDE_YQL_NO_DETECT_QUERY_TYPE")]
    no_detect_query_type: bool,

    /// Leave `?` placeholders untouched.
    #[arg(long, env = "OXIDE_YQL_NO_JDBC_PARAMETERS")]
    no_jdbc_parameters: bool,

    /// Rewrite placeholders in DDL, DECLARE and unknown statements too.
    #[arg(long, env = "OXIDE_YQL_FORCE_JDBC_PARAMETERS")]
    force_jdbc_parameters: bool,

    /// Do not emit DECLARE lines for generated parameters.
    #[arg(long, env = "OXIDE_YQL_NO_DECLARE")]
    no_declare: bool,

    /// Keep `IN (?, ...)` as separate placeholders.
    #[arg(long, env = "OXIDE_YQL_NO_IN_LIST")]
    no_in_list: bool,
}

impl OptionFlags {
    fn load(&self) -> anyhow::Result<ParserOptions> {
        let mut options = match &self.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("parsing {}", path.display()))?
            }
            None => ParserOptions::default(),
        };
        if self.no_detect_query_type {
            options.detect_query_type = false;
        }
        if self.no_jdbc_parameters {
            options.detect_jdbc_parameters = false;
        }
        if self.force_jdbc_parameters {
            options.force_jdbc_parameters = true;
        }
        if self.no_declare {
            options.declare_jdbc_parameters = false;
        }
        if self.no_in_list {
            options.replace_in_by_list = false;
        }
        Ok(options)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a query and print the rewritten text.
    Parse {
        /// SQL text (read from stdin if not specified).
        sql: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the bulk statement for a batchable INSERT, UPSERT, REPLACE,
    /// UPDATE or DELETE.
    Batch {
        /// SQL text (read from stdin if not specified).
        sql: Option<String>,

        /// One row of values as a JSON array, in placeholder order.
        #[arg(short, long = "row", required = true)]
        rows: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let options = cli.options.load()?;
    debug!(?options, "Parser options");

    match cli.command {
        Commands::Parse { sql, json } => {
            let query = YqlQuery::parse(&read_sql(sql)?, options)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&query)?);
            } else {
                print_query(&query);
            }
        }
        Commands::Batch { sql, rows } => {
            let query = YqlQuery::parse(&read_sql(sql)?, options)?;
            let mut batch = query.batched()?;
            let mut params = query.new_params(Arc::new(DefaultTypeLookup::new()));
            for row in &rows {
                bind_row(&mut params, row)?;
                batch.add_batch(&params)?;
                params.clear();
            }
            info!(rows = batch.batch_size(), "Built batch");
            println!("{}", batch.yql_text()?);
        }
    }

    Ok(())
}

fn read_sql(sql: Option<String>) -> anyhow::Result<String> {
    if let Some(sql) = sql {
        return Ok(sql);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("reading SQL from stdin")?;
    Ok(buf)
}

fn print_query(query: &YqlQuery) {
    println!("Query type: {}", query.query_type());
    println!("YQL: {}", query.yql());
    println!("Statements:");
    for (i, statement) in query.statements().iter().enumerate() {
        print_statement(i + 1, statement);
    }

    let params = query.new_params(Arc::new(DefaultTypeLookup::new()));
    if !params.is_empty() {
        println!("Parameters:");
        for (i, param) in params.describe().iter().enumerate() {
            let ty = param
                .ty
                .as_ref()
                .map_or_else(|| String::from("?"), ToString::to_string);
            println!("  {:>3}  {}  {}", i + 1, param.display_name, ty);
        }
    }

    match query.batch() {
        Some(batch) => {
            println!("Batch: {} `{}`", batch.command().as_str(), batch.table());
            for (column, param) in batch.bindings() {
                println!("  {column} <- {param}");
            }
        }
        None => println!("Batch: -"),
    }
}

fn print_statement(index: usize, statement: &QueryStatement) {
    let span = statement.span();
    let forced = if statement.is_forced() { " (forced)" } else { "" };
    let returning = if statement.has_returning() {
        " RETURNING"
    } else {
        ""
    };
    let extent = describe_span(span);
    println!(
        "  {index}. {}{forced} {}{returning} [{extent}] placeholders: {}",
        statement.query_type(),
        statement.command(),
        statement.slot_count()
    );
}

fn describe_span(span: Span) -> String {
    if span.is_empty() {
        String::from("empty")
    } else {
        format!("{}..{}, {} bytes", span.start, span.end, span.len())
    }
}

fn bind_row(params: &mut QueryParams, row: &str) -> anyhow::Result<()> {
    let values: Vec<Value> =
        serde_json::from_str(row).with_context(|| format!("row is not a JSON array: {row}"))?;
    if values.len() != params.len() {
        anyhow::bail!(
            "row has {} values, query has {} placeholders",
            values.len(),
            params.len()
        );
    }
    for (i, value) in values.into_iter().enumerate() {
        params.set(i + 1, json_to_host(value)?)?;
    }
    Ok(())
}

fn json_to_host(value: Value) -> anyhow::Result<HostValue> {
    Ok(match value {
        Value::Null => HostValue::Null,
        Value::Bool(b) => HostValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                HostValue::Int(i)
            } else if let Some(u) = n.as_u64() {
                HostValue::UInt(u)
            } else {
                HostValue::Float(n.as_f64().unwrap_or_default())
            }
        }
        Value::String(s) => HostValue::Text(s),
        other => anyhow::bail!("unsupported value: {other}"),
    })
}

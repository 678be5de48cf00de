

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use glossary_retrieval::{KnowledgeConfig, KnowledgeRetriever, Language, RetrievalOptions};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new("warn,glossary_retrieval=info")?,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(Some(cli)) => cli,
        Ok(None) => {
            print_help();
            return Ok(());
        }
        Err(err) => {
            eprintln!("error: {}", err);
            eprintln!("Run with --help for usage.");
            std::process::exit(2);
        }
    };

    let config = KnowledgeConfig::load(cli.config_path.as_deref())?;
    let retriever = Arc::new(KnowledgeRetriever::from_config(&config)?);

    if cli.show_stats {
        let loaded = retriever.cache().load()?;
        let report = serde_json::json!({
            "version": loaded.store.version(),
            "loaded_at": loaded.store.loaded_at().to_rfc3339(),
            "stats": loaded.store.stats(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if cli.query_words.is_empty() {
        print_help();
        return Ok(());
    }

    let defaults = retriever.default_options();
    let options = RetrievalOptions::new(
        cli.max_results.unwrap_or(defaults.max_results),
        cli.min_relevance.unwrap_or(defaults.min_relevance),
        cli.include_related.unwrap_or(defaults.include_related),
    );
    let language = match cli.lang {
        Some(tag) => Language::parse_or(&tag, config.default_language),
        None => config.default_language,
    };
    let budget: Duration = retriever.budget();

    let block = retriever
        .retrieve_with_budget(cli.query_words.join(" "), language, options, budget)
        .await;

    if block.is_empty() {
        eprintln!("No matching domain knowledge.");
    } else {
        print!("{}", block);
    }
    Ok(())
}

#[derive(Debug, Default)]
struct CliArgs {
    config_path: Option<PathBuf>,
    lang: Option<String>,
    max_results: Option<usize>,
    min_relevance: Option<u32>,
    include_related: Option<bool>,
    show_stats: bool,
    query_words: Vec<String>,
}

/// `Ok(None)` means help was requested. Everything after `--` is query text.
fn parse_args(args: &[String]) -> anyhow::Result<Option<CliArgs>> {
    let mut cli = CliArgs::default();
    let mut i = 0;

    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--config" | "-c" => cli.config_path = Some(PathBuf::from(value_of(args, &mut i)?)),
            "--lang" | "-l" => cli.lang = Some(value_of(args, &mut i)?.to_string()),
            "--max" | "-n" => cli.max_results = Some(parse_value(args, &mut i)?),
            "--min" | "-m" => cli.min_relevance = Some(parse_value(args, &mut i)?),
            "--no-related" => cli.include_related = Some(false),
            "--stats" => cli.show_stats = true,
            "--help" | "-h" => return Ok(None),
            "--" => {
                cli.query_words.extend(args[i + 1..].iter().cloned());
                break;
            }
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("unknown option '{}'", flag),
            word => cli.query_words.push(word.to_string()),
        }
        i += 1;
    }
    Ok(Some(cli))
}

fn value_of<'a>(args: &'a [String], i: &mut usize) -> anyhow::Result<&'a str> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .with_context(|| format!("option '{}' needs a value", flag))
}

fn parse_value<T>(args: &[String], i: &mut usize) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let flag = args[*i].clone();
    let raw = value_of(args, i)?;
    raw.parse()
        .with_context(|| format!("invalid value '{}' for option '{}'", raw, flag))
}

fn print_help() {
    println!("knowledge-retrieve: print the glossary context block for a query");
    println!();
    println!("USAGE:");
    println!("    knowledge-retrieve [OPTIONS] [--] QUERY...");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>   Config file (TOML/JSON/YAML); KNOWLEDGE_* env vars override");
    println!("    -l, --lang <TAG>      Output language: en, ko");
    println!("    -n, --max <N>         Maximum directly matched terms");
    println!("    -m, --min <N>         Minimum relevance score");
    println!("        --no-related      Do not expand related terms");
    println!("        --stats           Print knowledge store statistics and exit");
    println!("    -h, --help            Show this help");
}

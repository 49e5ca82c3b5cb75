use anyhow::Context as _;
use clap::Parser;
use rustc_hash::FxHashMap;
use simplefmt::{BatchError, Config, Constraint, SymbolTable};
use std::{fs, path::PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// A view name that may appear in the format strings (repeatable).
    #[arg(long = "view", value_name = "NAME")]
    views: Vec<String>,

    /// A metric placeholder and its value (repeatable).
    #[arg(long = "metric", value_name = "NAME=VALUE", value_parser = parse_metric)]
    metrics: Vec<(String, f64)>,

    /// The priority of required constraints.
    #[arg(long, default_value_t = simplefmt::REQUIRED_PRIORITY)]
    required_priority: f64,

    /// Read additional format strings from a file, one per line.
    /// Blank lines and lines starting with `#` are ignored.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Print the full descriptors instead of their canonical form.
    #[arg(long)]
    debug: bool,

    /// The format strings to compile.
    formats: Vec<String>,
}

fn parse_metric(s: &str) -> anyhow::Result<(String, f64)> {
    let (name, value) = s
        .split_once('=')
        .context("expected a metric in the form NAME=VALUE")?;
    let value = value
        .trim()
        .parse()
        .with_context(|| anyhow::anyhow!("invalid value for metric `{}`", name))?;
    Ok((name.trim().to_owned(), value))
}

/// Compile each format once, collecting the descriptors and every failure.
fn compile_batch<'v, W, M>(
    config: &Config,
    formats: &[String],
    metrics: &M,
    views: &'v W,
) -> (Vec<Constraint<'v, W::Value>>, Vec<BatchError>)
where
    W: SymbolTable + ?Sized,
    M: SymbolTable + ?Sized,
    M::Value: Copy + Into<f64>,
{
    let mut constraints = Vec::with_capacity(formats.len());
    let mut errors = vec![];
    for (index, format) in formats.iter().enumerate() {
        match config.compile(format, metrics, views) {
            Ok(constraint) => constraints.push(constraint),
            Err(source) => errors.push(BatchError { index, source }),
        }
    }
    (constraints, errors)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    tracing::debug!("parsed CLI args = {:?}", args);

    let mut formats = args.formats.clone();
    if let Some(file) = &args.file {
        let content = fs::read_to_string(file)
            .with_context(|| anyhow::anyhow!("failed to read {}", file.display()))?;
        formats.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_owned),
        );
    }
    if formats.is_empty() {
        anyhow::bail!("no format strings given");
    }

    let views: FxHashMap<&str, &str> = args.views.iter().map(|v| (&**v, &**v)).collect();
    let metrics: FxHashMap<&str, f64> = args
        .metrics
        .iter()
        .map(|(name, value)| (&**name, *value))
        .collect();
    let config = Config::new().required_priority(args.required_priority);

    let (constraints, errors) = compile_batch(&config, &formats, &metrics, &views);
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("constraint #{}:", err.index);
            eprintln!("{}", err.source.diagnostic(&formats[err.index]));
        }
        let suffix = if errors.len() == 1 { "" } else { "s" };
        anyhow::bail!("{} constraint{} failed to compile", errors.len(), suffix);
    }

    for constraint in &constraints {
        if args.debug {
            println!("{:#?}", constraint);
        } else {
            println!("{}", constraint);
        }
    }

    Ok(())
}

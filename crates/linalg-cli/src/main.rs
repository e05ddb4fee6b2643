//! Linalg Binding - CLI
//!
//! Command-line front-end that loads the module into an in-process runtime
//! and calls its functions on JSON-encoded values.

use std::fs;
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

use linalg_core::{BackendKind, LinalgConfig, Value};
use linalg_host::Runtime;

/// Matrix multiply and LU solve over JSON vectors
#[derive(Parser)]
#[command(name = "linalg")]
#[command(version)]
#[command(about = "Matrix multiply and LU solve over nested JSON vectors")]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Numeric backend (overrides the config file)
    #[arg(long, value_enum, global = true)]
    backend: Option<BackendArg>,

    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON result
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Matrix multiply M0 and M1
    Multiply {
        /// First matrix (JSON, or @file)
        m0: String,
        /// Second matrix (JSON, or @file)
        m1: String,
    },
    /// Solve A x = b for x
    Solve {
        /// Square matrix (JSON, or @file)
        a: String,
        /// Right-hand side vector (JSON, or @file)
        b: String,
    },
    /// Call a bound function by name
    Call {
        /// Function name, e.g. gsl-blas-dgemm
        name: String,
        /// Positional arguments (JSON, or @file)
        args: Vec<String>,
    },
    /// List bound functions with arity and docstring
    Functions,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    Native,
    Nalgebra,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Native => BackendKind::Native,
            BackendArg::Nalgebra => BackendKind::Nalgebra,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_ref(), cli.backend)?;
    debug!(backend = %config.backend, max_dimension = config.max_dimension, "configuration");
    let runtime = Runtime::with_module(config)?;

    let result = match cli.command {
        Commands::Multiply { m0, m1 } => {
            runtime.funcall("gsl-blas-dgemm", &[parse_value(&m0)?, parse_value(&m1)?])?
        }
        Commands::Solve { a, b } => {
            runtime.funcall("gsl-linalg-LU-solve", &[parse_value(&a)?, parse_value(&b)?])?
        }
        Commands::Call { name, args } => {
            let args = args
                .iter()
                .map(|a| parse_value(a))
                .collect::<Result<Vec<Value>>>()?;
            runtime.funcall(&name, &args)?
        }
        Commands::Functions => {
            print_functions(&runtime);
            return Ok(());
        }
    };

    let out = if cli.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{}", out);
    Ok(())
}

fn load_config(path: Option<&PathBuf>, backend: Option<BackendArg>) -> Result<LinalgConfig> {
    let mut config = match path {
        Some(p) => LinalgConfig::from_json_file(p)
            .with_context(|| format!("failed to load config {}", p.display()))?,
        None => LinalgConfig::default(),
    };
    if let Some(b) = backend {
        config.backend = b.into();
    }
    Ok(config)
}

/// Parse a JSON literal, or the contents of a file when prefixed with `@`.
fn parse_value(arg: &str) -> Result<Value> {
    match arg.strip_prefix('@') {
        Some(path) => {
            let doc = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path))?;
            serde_json::from_str(&doc)
                .with_context(|| format!("{} is not a numeric JSON vector", path))
        }
        None => serde_json::from_str(arg)
            .with_context(|| format!("'{}' is not a numeric JSON value", arg)),
    }
}

fn print_functions(runtime: &Runtime) {
    for name in runtime.functions().names() {
        if let Some(spec) = runtime.describe(name) {
            println!("{} ({}..={} args)", spec.name, spec.min_args, spec.max_args);
            for line in spec.doc.lines() {
                println!("    {}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn temp_with(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp");
        file.write_all(contents.as_bytes()).expect("write");
        file
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "linalg", "solve", "[[2]]", "[4]", "--backend", "nalgebra", "-vv",
        ])
        .expect("parse failed");
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.backend, Some(BackendArg::Nalgebra)));
        assert!(matches!(cli.command, Commands::Solve { .. }));
    }

    #[test]
    fn backend_flag_overrides_default() {
        let config = load_config(None, Some(BackendArg::Nalgebra)).expect("config");
        assert_eq!(config.backend, BackendKind::Nalgebra);
    }

    #[test]
    fn config_file_loads_and_flag_wins() {
        let file = temp_with(r#"{ "backend": "native", "max_dimension": 16 }"#);
        let path = file.path().to_path_buf();

        let config = load_config(Some(&path), None).expect("config");
        assert_eq!(config.backend, BackendKind::Native);
        assert_eq!(config.max_dimension, 16);

        let config = load_config(Some(&path), Some(BackendArg::Nalgebra)).expect("config");
        assert_eq!(config.backend, BackendKind::Nalgebra);
        assert_eq!(config.max_dimension, 16);
    }

    #[test]
    fn bad_config_file_is_an_error() {
        let file = temp_with(r#"{ "backend": "gsl" }"#);
        assert!(load_config(Some(&file.path().to_path_buf()), None).is_err());

        let missing = PathBuf::from("/nonexistent/linalg.json");
        let err = load_config(Some(&missing), None).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/linalg.json"));
    }

    #[test]
    fn at_prefix_reads_value_from_file() {
        let file = temp_with("[[1, 2], [3, 4.5]]");
        let arg = format!("@{}", file.path().display());
        assert_eq!(
            parse_value(&arg).expect("parse"),
            Value::from(vec![
                vec![Value::Integer(1), Value::Integer(2)],
                vec![Value::Integer(3), Value::Float(4.5)],
            ])
        );

        let bad = temp_with(r#"["x"]"#);
        assert!(parse_value(&format!("@{}", bad.path().display())).is_err());
        assert!(parse_value("@/nonexistent/matrix.json").is_err());
    }

    #[test]
    fn inline_json_parses() {
        assert_eq!(
            parse_value("[1, 2.5]").expect("parse"),
            Value::Vector(vec![Value::Integer(1), Value::Float(2.5)])
        );
        assert!(parse_value("[true]").is_err());
    }
}

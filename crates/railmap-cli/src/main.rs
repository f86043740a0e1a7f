use railmap_layout::graph::{self, MissingReverse, Network};
use railmap_layout::{Algorithm, LayoutConfig};
use serde::Serialize;
use std::io::Read;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Graph(graph::Error),
    Layout(railmap_layout::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Graph(err) => write!(f, "{err}"),
            CliError::Layout(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<graph::Error> for CliError {
    fn from(value: graph::Error) -> Self {
        Self::Graph(value)
    }
}

impl From<railmap_layout::Error> for CliError {
    fn from(value: railmap_layout::Error) -> Self {
        Self::Layout(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Layout,
    Check,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    config: Option<String>,
    algorithm: Option<Algorithm>,
    max_ticks: Option<usize>,
    pretty: bool,
    strict: bool,
    prune: bool,
    verbose: bool,
}

#[derive(Serialize)]
struct CheckOut<'a> {
    stations: usize,
    links: usize,
    pruned: &'a [String],
    missing_reverse: &'a [MissingReverse],
}

fn usage() -> &'static str {
    "railmap-cli\n\
\n\
USAGE:\n\
  railmap-cli [layout] [--pretty] [--algorithm physics|spring] [--max-ticks <n>] [--config <path>] [--strict] [--prune] [--verbose] [<path>|-]\n\
  railmap-cli check [--pretty] [--prune] [--verbose] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', the network JSON is read from stdin.\n\
  - layout prints final positions and per-connection segments as JSON.\n\
  - check validates platform destinations and lists one-way connections.\n\
  - --config reads a layout config JSON; --algorithm and --max-ticks override it.\n\
  - --prune drops stations without platforms before anything else.\n\
  - Logs go to stderr; RUST_LOG sets the filter (default warn, --verbose for debug).\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "layout" => args.command = Command::Layout,
            "check" => args.command = Command::Check,
            "--pretty" => args.pretty = true,
            "--strict" => args.strict = true,
            "--prune" => args.prune = true,
            "--verbose" | "-v" => args.verbose = true,
            "--algorithm" => {
                let Some(name) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.algorithm = Some(
                    name.parse::<Algorithm>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--max-ticks" => {
                let Some(n) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.max_ticks = Some(n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<LayoutConfig, CliError> {
    let mut config = match args.config.as_deref() {
        Some(path) => LayoutConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => LayoutConfig::default(),
    };
    if let Some(algorithm) = args.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(cap) = args.max_ticks {
        match config.algorithm {
            Algorithm::Physics => config.physics.max_ticks = Some(cap),
            Algorithm::Spring => config.spring.max_steps = Some(cap),
        }
    }
    config.strict |= args.strict;
    Ok(config)
}

fn load_network(args: &Args) -> Result<(Network, Vec<String>), CliError> {
    let text = read_input(args.input.as_deref())?;
    let mut network = Network::from_json_str(&text)?;
    let pruned = if args.prune {
        network.prune_platformless()
    } else {
        Vec::new()
    };
    if !pruned.is_empty() {
        tracing::debug!(count = pruned.len(), "pruned stations without platforms");
    }
    Ok((network, pruned))
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Layout => {
            let config = load_config(&args)?;
            let (network, _) = load_network(&args)?;
            let result = railmap_layout::layout(&network, &config)?;
            write_json(&result, args.pretty)
        }
        Command::Check => {
            let (network, pruned) = load_network(&args)?;
            network.validate()?;
            let snapshot = graph::GraphSnapshot::build(&network);
            let missing = network.missing_reverse_connections();
            write_json(
                &CheckOut {
                    stations: network.len(),
                    links: snapshot.links().len(),
                    pruned: &pruned,
                    missing_reverse: &missing,
                },
                args.pretty,
            )
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    init_tracing(args.verbose);

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

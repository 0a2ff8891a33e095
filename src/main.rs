use std::env;
use std::io::{self, BufWriter};

use anyhow::{Context, Result};
use log::info;

use shifted_matching::io::{read_parameter, read_sequences, write_frontier, write_json};
use shifted_matching::{DominanceFrontier, Family, GraphCatalog, SearchConfig, explain_frontier, run_search};

const USAGE: &str = "\
Usage:
  shifted-matching [search] [--family bipartite|general] [--workers N] [--json] [--quiet]
  shifted-matching minimize [--json]
  shifted-matching explain [--family bipartite|general] [--nested]

search    reads s from stdin and prints the frontier of failing size sequences
minimize  reads failing sequences from stdin, one per line, and prints their frontier
explain   reads s, then sequences, reduces them to their frontier and prints the
          critical graph combinations of each as JSON

Options:
  --family F     graph family (default: bipartite)
  --workers N    worker threads (default: available parallelism)
  --json         print JSON instead of one sequence per line
  --quiet        hide the progress bar
  --nested       only report nested graph chains
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
  Search,
  Minimize,
  Explain,
}

struct Cli {
  command: Command,
  config: SearchConfig,
  json: bool,
  nested: bool,
}

fn init_logging() {
  let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    .format_timestamp_millis()
    .try_init();
}

fn parse_args() -> Result<Option<Cli>> {
  let mut cli = Cli {
    command: Command::Search,
    config: SearchConfig::default(),
    json: false,
    nested: false,
  };
  let mut args = env::args().skip(1).peekable();
  match args.peek().map(String::as_str) {
    Some("search") => {
      args.next();
    }
    Some("minimize") => {
      cli.command = Command::Minimize;
      args.next();
    }
    Some("explain") => {
      cli.command = Command::Explain;
      args.next();
    }
    _ => {}
  }

  while let Some(arg) = args.next() {
    match arg.as_str() {
      "--family" => {
        let value = args.next().context("--family needs a value")?;
        cli.config.family = value.parse::<Family>()?;
      }
      "--workers" => {
        let value = args.next().context("--workers needs a value")?;
        cli.config.workers = value
          .parse()
          .with_context(|| format!("parse worker count {value:?}"))?;
      }
      "--json" => cli.json = true,
      "--quiet" => cli.config.show_progress = false,
      "--nested" => cli.nested = true,
      "--help" | "-h" => {
        print!("{USAGE}");
        return Ok(None);
      }
      other => anyhow::bail!("Unexpected argument: {other}\n\n{USAGE}"),
    }
  }
  Ok(Some(cli))
}

fn main() -> Result<()> {
  init_logging();
  let Some(cli) = parse_args()? else {
    return Ok(());
  };
  let stdin = io::stdin();
  let mut input = stdin.lock();
  let mut out = BufWriter::new(io::stdout().lock());

  match cli.command {
    Command::Search => {
      let mut config = cli.config;
      config.s = read_parameter(&mut input)?;
      info!("Running {} search for s = {}", config.family, config.s);
      let report = run_search(&config)?;
      if cli.json {
        write_json(&mut out, &report.frontier)?;
      } else {
        write_frontier(&mut out, &report.frontier)?;
      }
    }
    Command::Minimize => {
      let sequences = read_sequences(input)?;
      let count = sequences.len();
      let frontier: DominanceFrontier = sequences.into_iter().collect();
      info!("Reduced {} sequences to a frontier of {}", count, frontier.len());
      if cli.json {
        write_json(&mut out, &frontier)?;
      } else {
        write_frontier(&mut out, &frontier)?;
      }
    }
    Command::Explain => {
      let s = read_parameter(&mut input)?;
      let catalog = GraphCatalog::build(cli.config.family, s);
      let sequences = read_sequences(input)?;
      let count = sequences.len();
      let explanations = explain_frontier(&catalog, sequences, cli.nested)?;
      info!(
        "Explained {} maximal sequences out of {} for s = {}",
        explanations.len(),
        count,
        s
      );
      write_json(&mut out, &explanations)?;
    }
  }
  Ok(())
}

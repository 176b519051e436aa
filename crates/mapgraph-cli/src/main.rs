use futures::executor::block_on;
use mapgraph::layout::{
    LayoutError, LayoutOptions, LayoutScope, LayoutSession, LayoutStrategyKind,
};
use mapgraph::{
    Comment, Concept, LayoutConfig, Perspective, Relationship, VisualGraph, map_for_render,
};
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Config(mapgraph::Error),
    Layout(LayoutError),
    UnknownPerspective(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Config(err) => write!(f, "config error: {err}"),
            CliError::Layout(err) => write!(f, "layout failed: {err}"),
            CliError::UnknownPerspective(id) => write!(f, "unknown perspective `{id}`"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<mapgraph::Error> for CliError {
    fn from(value: mapgraph::Error) -> Self {
        Self::Config(value)
    }
}

impl From<LayoutError> for CliError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Map,
    Layout,
}

#[derive(Debug)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    perspective: Option<String>,
    editing: bool,
    strategy: LayoutStrategyKind,
    scope: LayoutScope,
    width: Option<f64>,
    height: Option<f64>,
    config: Option<String>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            command: Command::Map,
            input: None,
            pretty: false,
            perspective: None,
            editing: false,
            strategy: LayoutStrategyKind::Stress,
            scope: LayoutScope::All,
            width: None,
            height: None,
            config: None,
        }
    }
}

/// A map as exported by the persistence layer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(default)]
    map_id: Option<String>,
    #[serde(default)]
    concepts: Vec<Concept>,
    #[serde(default)]
    relationships: Vec<Relationship>,
    #[serde(default)]
    comments: Vec<Comment>,
    #[serde(default)]
    perspectives: Vec<Perspective>,
    /// Node ids placed by an earlier layout pass; anchors for `--scope new-only`.
    #[serde(default)]
    laid_out: Vec<String>,
}

fn usage() -> &'static str {
    "mapgraph-cli\n\
\n\
USAGE:\n\
  mapgraph-cli [map] [--pretty] [--perspective <id>] [--editing] [<path>|-]\n\
  mapgraph-cli layout [--pretty] [--perspective <id>] [--editing] [--strategy circular|stress|hierarchical|force-directed] [--scope all|new-only] [--width <w>] [--height <h>] [--config <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Input is a JSON map snapshot: {concepts, relationships, comments?, perspectives?, laidOut?}.\n\
  - map prints the render-ready {nodes, edges}; layout also repositions the nodes.\n\
  - --config accepts JSON5 layout settings; --width/--height override the config.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_number(raw: &str) -> Result<f64, CliError> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(CliError::Usage(usage())),
    }
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "map" => args.command = Command::Map,
            "layout" => args.command = Command::Layout,
            "--pretty" => args.pretty = true,
            "--editing" => args.editing = true,
            "--perspective" => args.perspective = Some(next_value(&mut it)?.clone()),
            "--strategy" => {
                args.strategy = next_value(&mut it)?
                    .parse()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scope" => {
                args.scope = next_value(&mut it)?
                    .parse()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--width" => args.width = Some(parse_number(next_value(&mut it)?)?),
            "--height" => args.height = Some(parse_number(next_value(&mut it)?)?),
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
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
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
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
    println!();
    Ok(())
}

fn layout_options(args: &Args) -> Result<LayoutOptions, CliError> {
    let mut config = LayoutConfig::empty_object();
    if let Some(path) = args.config.as_deref() {
        let file = LayoutConfig::from_json_str(&std::fs::read_to_string(path)?)?;
        config.deep_merge(file.as_value());
    }
    if let Some(w) = args.width {
        config.set_value("width", w.into());
    }
    if let Some(h) = args.height {
        config.set_value("height", h.into());
    }
    Ok(LayoutOptions::from_config(&config)?)
}

fn run(args: Args) -> Result<(), CliError> {
    let snapshot: Snapshot = serde_json::from_str(&read_input(args.input.as_deref())?)?;

    let perspective = match args.perspective.as_deref() {
        None => None,
        Some(id) => Some(
            snapshot
                .perspectives
                .iter()
                .find(|p| p.id == id)
                .ok_or_else(|| CliError::UnknownPerspective(id.to_string()))?,
        ),
    };

    let graph = map_for_render(
        &snapshot.concepts,
        &snapshot.relationships,
        &snapshot.comments,
        perspective,
        args.editing,
    );

    let graph = match args.command {
        Command::Map => graph,
        Command::Layout => {
            let options = layout_options(&args)?;
            let session = LayoutSession::new();
            session.switch_map(snapshot.map_id.as_deref().unwrap_or("snapshot"));
            session.with_tracker(|t| t.replace(snapshot.laid_out.iter().cloned()));
            let nodes = block_on(session.apply_layout(
                &graph.nodes,
                &graph.edges,
                args.strategy,
                &options,
                args.scope,
            ))?;
            VisualGraph {
                nodes,
                edges: graph.edges,
            }
        }
    };

    write_json(&graph, args.pretty)
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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

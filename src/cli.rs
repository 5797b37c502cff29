use crate::config::{Config, load_config};
use crate::graphviz::export_workflow_dot;
use crate::layout::{compute_node_layout, compute_workflow_layout};
use crate::layout_dump::write_layout_dump;
use crate::model::{DefinitionStore, WorkflowDef};
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::validate::{SchemaKind, check};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wlf", version, about = "Render dataflow workflow documents")]
pub struct Args {
    /// Workflow file (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Definition store files (JSON arrays of tagged elements), merged in order
    #[arg(short = 's', long = "store")]
    pub stores: Vec<PathBuf>,

    /// Output file. Defaults to stdout for SVG and DOT if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, layout and render overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Canvas width in pixels
    #[arg(short = 'w', long = "width")]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[arg(short = 'H', long = "height")]
    pub height: Option<u32>,

    /// Render the node definition with this id from the store instead of a workflow
    #[arg(long = "node")]
    pub node: Option<String>,

    /// Write the computed layout as JSON
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,

    /// Skip schema validation of the input workflow
    #[arg(long = "no-validate")]
    pub no_validate: bool,

    /// Log layout decisions to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
    Dot,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width.max(1);
    }
    if let Some(height) = args.height {
        config.render.height = height.max(1);
    }
    let store = load_store(&args.stores)?;
    tracing::debug!(definitions = store.len(), "definition store loaded");

    if let Some(node_id) = args.node.as_deref() {
        return run_node(&args, node_id, &store, &config);
    }

    let document = read_document(args.input.as_deref())?;
    if !args.no_validate {
        check(&document, SchemaKind::Workflow).context("input is not a valid workflow")?;
    }
    let workflow: WorkflowDef = serde_json::from_value(document)?;

    if args.output_format == OutputFormat::Dot {
        return write_output_svg(&export_workflow_dot(&workflow, &store), args.output.as_deref());
    }

    let layout = compute_workflow_layout(&workflow, &store, &config)?;
    tracing::debug!(viewport = ?layout.viewport.as_tuple(), "viewport");
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }
    let svg = render_svg(&layout, &config.theme, &config.layout);
    emit(&svg, &args, &config)
}

fn run_node(args: &Args, node_id: &str, store: &DefinitionStore, config: &Config) -> Result<()> {
    let def = store
        .node(node_id)
        .ok_or_else(|| anyhow::anyhow!("node definition `{}` not found in store", node_id))?;
    if args.output_format == OutputFormat::Dot {
        return Err(anyhow::anyhow!("DOT output is only available for workflows"));
    }
    let layout = compute_node_layout(def, store, config);
    if let Some(path) = args.dump_layout.as_deref() {
        write_layout_dump(path, &layout)?;
    }
    let svg = render_svg(&layout, &config.theme, &config.layout);
    emit(&svg, args, config)
}

fn emit(svg: &str, args: &Args, config: &Config) -> Result<()> {
    match args.output_format {
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(svg, &output, &config.render)
        }
        _ => write_output_svg(svg, args.output.as_deref()),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init();
}

fn load_store(paths: &[PathBuf]) -> Result<DefinitionStore> {
    let mut store = DefinitionStore::new();
    for path in paths {
        let document = read_document(Some(path))?;
        let loaded: DefinitionStore = serde_json::from_value(document)
            .with_context(|| format!("invalid definition store {}", path.display()))?;
        store.extend_from(loaded);
    }
    Ok(store)
}

fn read_document(path: Option<&Path>) -> Result<serde_json::Value> {
    let (content, is_json5) = read_input(path)?;
    parse_document(&content, is_json5)
}

fn parse_document(content: &str, is_json5: bool) -> Result<serde_json::Value> {
    if is_json5 {
        return json5::from_str(content).map_err(|err| anyhow::anyhow!("invalid JSON5: {}", err));
    }
    Ok(serde_json::from_str(content)?)
}

fn read_input(path: Option<&Path>) -> Result<(String, bool)> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            return Ok((buf, false));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        let is_json5 = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json5"))
            .unwrap_or(false);
        return Ok((content, is_json5));
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok((buf, false))
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json5_documents() {
        let doc = parse_document("{id: 'w', nodes: [], // trailing\n}", true).unwrap();
        assert_eq!(doc["id"], "w");
        assert!(parse_document("{id: 'w'}", false).is_err());
    }

    #[test]
    fn png_requires_output_path() {
        assert!(ensure_output(&None, "png").is_err());
        let path = PathBuf::from("out.png");
        assert_eq!(ensure_output(&Some(path.clone()), "png").unwrap(), path);
    }

    #[test]
    fn args_accept_repeated_stores() {
        let args = Args::parse_from([
            "wlf", "-i", "w.json", "-s", "a.json", "-s", "b.json", "-e", "dot", "-w", "800",
        ]);
        assert_eq!(args.stores.len(), 2);
        assert_eq!(args.output_format, OutputFormat::Dot);
        assert_eq!(args.width, Some(800));
        assert_eq!(args.height, None);
    }
}

use boutline::render::raster::{RasterError, RasterOptions, svg_to_png};
use boutline::render::{Selection, SvgRenderOptions, render_chart_svg};
use boutline::{ChartConfig, Engine};
use boutline_render::LayoutOptions;
use futures::executor::block_on;
use serde::Serialize;
use std::io::Read;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Core(boutline::Error),
    Render(boutline_render::Error),
    Raster(RasterError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Raster(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<boutline::Error> for CliError {
    fn from(value: boutline::Error) -> Self {
        Self::Core(value)
    }
}

impl From<boutline_render::Error> for CliError {
    fn from(value: boutline_render::Error) -> Self {
        match value {
            boutline_render::Error::Core(err) => Self::Core(err),
            other => Self::Render(other),
        }
    }
}

impl From<RasterError> for CliError {
    fn from(value: RasterError) -> Self {
        Self::Raster(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl CliError {
    fn is_missing_reference(&self) -> bool {
        matches!(self, CliError::Core(boutline::Error::MissingReference { .. }))
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Parse,
    Align,
    Layout,
    Render,
}

#[derive(Debug, Clone, Copy, Default)]
enum RenderFormat {
    #[default]
    Svg,
    Png,
}

impl FromStr for RenderFormat {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(Self::Svg),
            "png" => Ok(Self::Png),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    reference: Option<String>,
    mode: Option<&'static str>,
    order: Option<&'static str>,
    select: Option<String>,
    seed: Option<u64>,
    render_format: RenderFormat,
    render_scale: f32,
    background: Option<String>,
    viewport_width: Option<f64>,
    viewport_height: Option<f64>,
    diagram_id: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "boutline-cli\n\
\n\
USAGE:\n\
  boutline-cli [parse] [--pretty] [<path>|-]\n\
  boutline-cli align [--reference <name>] [--mode date|equal] [--order asc|desc] [--config <json>] [--pretty] [<path>|-]\n\
  boutline-cli layout [align options] [--seed <n>] [--viewport-width <w>] [--viewport-height <h>] [--pretty] [<path>|-]\n\
  boutline-cli render [layout options] [--select <display name>] [--format svg|png] [--scale <n>] [--background <css-color>] [--id <diagram-id>] [--out <path>] [<path>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', bout CSV is read from stdin.\n\
  - parse prints the ingested boxer records and row statistics as JSON.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
  - PNG output defaults to writing next to the input file (or ./out.png for stdin).\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) to see skipped rows and alignment details on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        command: Command::Parse,
        render_format: RenderFormat::Svg,
        render_scale: 1.0,
        ..Default::default()
    };

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "parse" => args.command = Command::Parse,
            "align" => args.command = Command::Align,
            "layout" => args.command = Command::Layout,
            "render" => args.command = Command::Render,
            "--pretty" => args.pretty = true,
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--reference" => {
                let name = next_value(&mut it)?.trim();
                if name.is_empty() {
                    return Err(CliError::Usage(usage()));
                }
                args.reference = Some(name.to_string());
            }
            "--mode" => {
                args.mode = Some(match next_value(&mut it)?.as_str() {
                    "date" => "date",
                    "equal" | "equalSpacing" => "equalSpacing",
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            "--order" => {
                args.order = Some(match next_value(&mut it)?.as_str() {
                    "asc" | "ascending" => "ascending",
                    "desc" | "descending" => "descending",
                    _ => return Err(CliError::Usage(usage())),
                });
            }
            "--select" => args.select = Some(next_value(&mut it)?.clone()),
            "--seed" => {
                let seed = next_value(&mut it)?;
                args.seed = Some(seed.parse::<u64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--format" => {
                args.render_format = next_value(&mut it)?
                    .parse::<RenderFormat>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--scale" => {
                let scale = next_value(&mut it)?;
                args.render_scale = scale.parse::<f32>().map_err(|_| CliError::Usage(usage()))?;
                if !(args.render_scale.is_finite() && args.render_scale > 0.0) {
                    return Err(CliError::Usage(usage()));
                }
            }
            "--background" => {
                let bg = next_value(&mut it)?;
                if !bg.trim().is_empty() {
                    args.background = Some(bg.trim().to_string());
                }
            }
            "--viewport-width" => {
                let w = next_value(&mut it)?;
                args.viewport_width =
                    Some(w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--viewport-height" => {
                let h = next_value(&mut it)?;
                args.viewport_height =
                    Some(h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--id" => args.diagram_id = Some(next_value(&mut it)?.clone()),
            "--out" => args.out = Some(next_value(&mut it)?.clone()),
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

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            print!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn default_raster_out_path(input: Option<&str>, ext: &str) -> std::path::PathBuf {
    match input {
        Some(path) if path != "-" => std::path::PathBuf::from(path).with_extension(ext),
        _ => std::path::PathBuf::from(format!("out.{ext}")),
    }
}

/// Config file (if any) with command-line flags applied on top.
fn build_overrides(args: &Args) -> Result<ChartConfig, CliError> {
    let mut cfg = match args.config.as_deref() {
        Some(path) => ChartConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => ChartConfig::empty_object(),
    };
    if let Some(name) = args.reference.as_deref() {
        cfg.set_value("reference.name", serde_json::json!(name));
    }
    if let Some(mode) = args.mode {
        cfg.set_value("align.mode", serde_json::json!(mode));
    }
    if let Some(order) = args.order {
        cfg.set_value("align.order", serde_json::json!(order));
    }
    if let Some(seed) = args.seed {
        cfg.set_value("chart.opacitySeed", serde_json::json!(seed));
    }
    if let Some(w) = args.viewport_width {
        cfg.set_value("chart.width", serde_json::json!(w));
    }
    if let Some(h) = args.viewport_height {
        cfg.set_value("chart.height", serde_json::json!(h));
    }
    Ok(cfg)
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run(args: Args) -> Result<(), CliError> {
    let text = read_input(args.input.as_deref())?;
    let engine = Engine::new().with_config(build_overrides(&args)?);

    let dataset = block_on(engine.load_bouts(&text))?;
    tracing::debug!(
        boxers = dataset.boxers.len(),
        skipped = dataset.stats.skipped,
        "loaded bouts"
    );
    if let Command::Parse = args.command {
        return write_json(&dataset, args.pretty);
    }

    let chart = block_on(engine.align(&dataset))?;
    if let Command::Align = args.command {
        return write_json(&chart, args.pretty);
    }

    let layout_opts = LayoutOptions::from_config(engine.config())?;
    let layout = boutline_render::layout_chart(&chart, &layout_opts)?;
    if let Command::Layout = args.command {
        return write_json(&layout, args.pretty);
    }

    let selection = match args.select.as_deref() {
        Some(name) => {
            if !layout.trajectories.iter().any(|t| t.display_name == name) {
                tracing::warn!(selection = name, "selected trajectory not in chart");
            }
            Selection::trajectory(name)
        }
        None => Selection::None,
    };
    let svg_options = SvgRenderOptions {
        diagram_id: args.diagram_id.clone(),
        ..Default::default()
    };
    let svg = render_chart_svg(&layout, &svg_options, &selection)?;

    match args.render_format {
        RenderFormat::Svg => write_text(&svg, args.out.as_deref())?,
        RenderFormat::Png => {
            let bytes = svg_to_png(
                &svg,
                &RasterOptions {
                    scale: args.render_scale,
                    background: args.background.clone(),
                },
            )?;
            let out = args.out.clone().unwrap_or_else(|| {
                default_raster_out_path(args.input.as_deref(), "png")
                    .to_string_lossy()
                    .to_string()
            });
            if out == "-" {
                use std::io::Write;
                std::io::stdout().lock().write_all(&bytes)?;
            } else {
                std::fs::write(out, bytes)?;
            }
        }
    }
    Ok(())
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

    init_logging();

    match run(args) {
        Ok(()) => {}
        Err(err) if err.is_missing_reference() => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}

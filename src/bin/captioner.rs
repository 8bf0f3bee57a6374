use std::{
    ffi::OsString,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use captioner::{Caption, CaptionStyle, CaptionStyleBuilder, Dpi, Position, Rgba8, StyleFile};
use clap::{CommandFactory, Parser};

/// Overlay an outlined text caption onto an image.
///
/// With only INPUT, writes `<INPUT>.png` carrying the stock disclaimer in bold 15px Impact at
/// the bottom of the image.
#[derive(Parser, Debug)]
#[command(name = "captioner", version)]
struct Cli {
    /// Image to caption (any format the decoder recognizes).
    input: Option<PathBuf>,

    /// Output path; `.jpg`/`.jpeg` write JPEG, anything else PNG. Defaults to `<INPUT>.png`.
    output: Option<PathBuf>,

    /// Caption text; backslash escapes such as `\n` are expanded.
    text: Option<String>,

    /// JSON style file applied before the other options.
    #[arg(long, value_name = "FILE")]
    style: Option<PathBuf>,

    /// Vertical band to place the caption in (top or bottom).
    #[arg(long)]
    position: Option<Position>,

    /// Font family name.
    #[arg(long, value_name = "FAMILY")]
    font: Option<String>,

    /// Font em size in pixels.
    #[arg(long, value_name = "PX")]
    size: Option<f32>,

    /// Use the bold weight.
    #[arg(long, overrides_with = "no_bold")]
    bold: bool,

    /// Use the regular weight.
    #[arg(long, overrides_with = "bold")]
    no_bold: bool,

    /// Use the italic style.
    #[arg(long, overrides_with = "no_italic")]
    italic: bool,

    /// Use the upright style.
    #[arg(long, overrides_with = "italic")]
    no_italic: bool,

    /// Text color (`#RRGGBB`, `#RRGGBBAA` or a color name).
    #[arg(long, value_name = "COLOR")]
    color: Option<Rgba8>,

    /// Plate and halo color.
    #[arg(long, value_name = "COLOR")]
    background: Option<Rgba8>,

    /// Halo thickness in points.
    #[arg(long, value_name = "PT")]
    border: Option<f32>,

    /// Resolution used to convert points to pixels, overriding the image metadata.
    #[arg(long)]
    dpi: Option<f32>,

    /// Extra font file to make available (repeatable).
    #[arg(long = "font-file", value_name = "PATH")]
    font_files: Vec<PathBuf>,

    /// Log debug details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(input) = cli.input.clone() else {
        println!("{}", Cli::command().render_help());
        return;
    };

    if let Err(err) = run(&cli, &input) {
        println!("Error: {err:#}");
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli, input: &Path) -> anyhow::Result<()> {
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(input));
    let style = build_style(cli)?;

    Caption::new()
        .load(input)?
        .render(&style)?
        .save(&output)?;

    tracing::info!(output = %output.display(), "wrote captioned image");
    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let mut s = OsString::from(input.as_os_str());
    s.push(".png");
    PathBuf::from(s)
}

fn build_style(cli: &Cli) -> anyhow::Result<CaptionStyle> {
    let mut b: CaptionStyleBuilder = CaptionStyle::disclaimer().to_builder();

    if let Some(path) = &cli.style {
        let file = StyleFile::load(path)
            .with_context(|| format!("load style '{}'", path.display()))?;
        b = b.apply_file(file)?;
    }

    if let Some(text) = &cli.text {
        b = b.text(captioner::unescape(text)?);
    }
    if let Some(position) = cli.position {
        b = b.position(position);
    }
    if let Some(font) = &cli.font {
        b = b.font_family(font.clone());
    }
    if let Some(size) = cli.size {
        b = b.font_size(size);
    }
    if cli.bold {
        b = b.bold(true);
    } else if cli.no_bold {
        b = b.bold(false);
    }
    if cli.italic {
        b = b.italic(true);
    } else if cli.no_italic {
        b = b.italic(false);
    }
    if let Some(color) = cli.color {
        b = b.color(color);
    }
    if let Some(background) = cli.background {
        b = b.background(background);
    }
    if let Some(border) = cli.border {
        b = b.border_pt(border);
    }
    if let Some(dpi) = cli.dpi {
        b = b.dpi(Some(Dpi::new(dpi)?));
    }
    for font in &cli.font_files {
        b = b.font_file(font.clone());
    }

    Ok(b.build()?)
}

/// Note3D Terminal - drafting viewer and editor
///
/// Controls:
///   - 1/2/3: XY/YZ/ZX drafting view, 4: rotatable 3D view
///   - Arrows: move the cursor (drafting) or rotate the camera (3D)
///   - a then l/o/p/b/B: add line/circle/rect/wire cube/cube from anchor to cursor
///   - a, v (mid point), e: three-point arc; y adds polygon corners, Y closes
///   - Space: pick under the cursor, k: cycle color, x: delete
///   - m: move picked with arrows, m again to place; t, cursor, t: rotate picked
///     about the anchor; r/R: rotate picked in fixed steps
///   - S: save, Q/ESC: quit
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use note3d_core::{from_text, Item, PartsId, Plane, SceneGraph};
use note3d_terminal::{demo_model, TerminalApp, ViewMode};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "note3d-terminal")]
#[command(about = "Terminal drafting editor for hierarchical 3D models", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive editor
    Edit {
        /// Model file to open; created on save if missing
        file: Option<PathBuf>,
        /// Initial view
        #[arg(short, long, value_enum, default_value_t = View::Xy)]
        view: View,
        /// Pick box half size in character rows
        #[arg(long, default_value_t = 1.0)]
        pick_size: f64,
        /// Start from the built-in demo model when no file is given
        #[arg(long)]
        demo: bool,
    },
    /// Print the parts tree of a model file
    Info {
        /// Model file
        file: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum View {
    Xy,
    Yz,
    Zx,
    #[value(name = "3d")]
    Rotating,
}

impl From<View> for ViewMode {
    fn from(view: View) -> Self {
        match view {
            View::Xy => ViewMode::Drafting(Plane::Xy),
            View::Yz => ViewMode::Drafting(Plane::Yz),
            View::Zx => ViewMode::Drafting(Plane::Zx),
            View::Rotating => ViewMode::Rotating,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "note3d_core=warn,note3d_terminal=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Edit {
            file,
            view,
            pick_size,
            demo,
        }) => edit(file, view, pick_size, demo),
        Some(Commands::Info { file }) => show_info(&file),
        None => edit(None, View::Xy, 1.0, true),
    }
}

/// Read a model, keeping whatever loaded before a decode error.
fn load_model(path: &Path) -> Result<(SceneGraph, String)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    match from_text(&text) {
        Ok(model) => {
            info!(path = %path.display(), items = model.item_count(), "model loaded");
            Ok((model, format!("opened {}", path.display())))
        }
        Err(partial) => {
            warn!(path = %path.display(), error = %partial, "model loaded with errors");
            let status = format!("partially loaded: {}", partial.source);
            Ok((partial.into_graph(), status))
        }
    }
}

fn edit(file: Option<PathBuf>, view: View, pick_size: f64, demo: bool) -> Result<()> {
    let (model, status) = match &file {
        Some(path) if path.exists() => load_model(path)?,
        Some(path) => (SceneGraph::new(), format!("new file {}", path.display())),
        None if demo => (demo_model(), "demo model".to_string()),
        None => (SceneGraph::new(), String::new()),
    };

    let mut app = TerminalApp::new(model, view.into())
        .context("querying terminal size")?
        .with_pick_size(pick_size)
        .with_status(status);
    if let Some(path) = file {
        app = app.with_save_path(path);
    }
    app.run().context("running terminal editor")?;
    Ok(())
}

fn show_info(file: &Path) -> Result<()> {
    let (model, status) = load_model(file)?;
    println!("{status}");
    for item in model.walk() {
        let Some(index) = model.index_of(item) else {
            continue;
        };
        let depth = match item {
            Item::Parts(id) => ancestors(&model, model.parts(id).and_then(|p| p.parent())),
            Item::Element(id) => ancestors(&model, model.element(id).map(|e| e.owner())),
        };
        if let Some(text) = model.describe(index) {
            let pad = "  ".repeat(depth);
            for line in text.lines() {
                println!("{pad}{line}");
            }
        }
    }
    Ok(())
}

fn ancestors(model: &SceneGraph, mut next: Option<PartsId>) -> usize {
    let mut depth = 0;
    while let Some(parts) = next.and_then(|id| model.parts(id)) {
        depth += 1;
        next = parts.parent();
    }
    depth
}

use anyhow::{Context, bail};
use clap::Parser;
use shelf_share::{
    EstimatorSession, ImageRef, ShareResult, ShelfShareConfig, ShelfShareEstimator, image_helper,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Lays a grid over a shelf photo, marks cells, and reports the shelf share.
#[derive(Parser, Debug)]
#[command(name = "shelf_share_tester", version, about)]
struct Args {
    /// Shelf photo to annotate.
    #[arg(long)]
    image: PathBuf,

    /// TOML file with `[grid]` and `[overlay]` sections.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the configured number of rows.
    #[arg(long)]
    rows: Option<u32>,

    /// Overrides the configured number of columns.
    #[arg(long)]
    cols: Option<u32>,

    /// Toggle a cell by grid coordinate, as ROW,COL. Repeatable.
    #[arg(long = "select", value_name = "ROW,COL", value_parser = parse_pair)]
    select: Vec<(u32, u32)>,

    /// Toggle the cell under an image pixel, as X,Y. Repeatable.
    #[arg(long = "click", value_name = "X,Y", value_parser = parse_pair)]
    click: Vec<(u32, u32)>,

    /// Where to write the annotated PNG.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the snapshot as JSON instead of a summary line.
    #[arg(long)]
    json: bool,
}

fn parse_pair(value: &str) -> Result<(u32, u32), String> {
    let (first, second) = value
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated numbers, got `{value}`"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|err| format!("`{part}` in `{value}`: {err}"))
    };
    Ok((parse(first)?, parse(second)?))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    // --- 1. Configuration ---
    let mut config = match &args.config {
        Some(path) => ShelfShareConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ShelfShareConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.grid.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.grid.cols = cols;
    }

    // --- 2. Photo ---
    let photo = image_helper::load(&args.image)
        .with_context(|| format!("opening {}", args.image.display()))?;
    let image = ImageRef::of(&photo)?;
    info!("loaded {} ({}x{})", args.image.display(), image.width(), image.height());

    // --- 3. Estimator Session ---
    let mut estimator = ShelfShareEstimator::from_config(&config).context("invalid grid")?;
    estimator.subscribe(|share: ShareResult| info!("shelf share now {share}"));
    let overlay = estimator.overlay(image);
    let (session, task) = EstimatorSession::spawn(estimator);
    session.show().await?;

    // --- 4. Operator Input ---
    for &(row, col) in &args.select {
        session
            .toggle_cell(row, col)
            .await
            .with_context(|| format!("selecting cell {row},{col}"))?;
    }
    for &(x, y) in &args.click {
        let Some(cell) = overlay.cell_at(x, y) else {
            warn!("click at {x},{y} is outside the {}x{} photo", image.width(), image.height());
            bail!("click at {x},{y} is outside the photo");
        };
        session.toggle_cell(cell.row, cell.col).await?;
    }

    // --- 5. Report ---
    let snapshot = session.snapshot().await?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!(
            "shelf share: {} (competitor: {}%)",
            snapshot.share, snapshot.competitor_share
        );
    }

    // --- 6. Annotated Output ---
    if let Some(output) = &args.output {
        let canvas = overlay.render(&photo, &snapshot.selected, &config.overlay)?;
        image_helper::save_png(output, &canvas)
            .with_context(|| format!("writing {}", output.display()))?;
        info!("overlay saved to {}", output.display());
    }

    session.shutdown().await;
    task.await?;
    Ok(())
}

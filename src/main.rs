mod app;
mod assembler;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod render;
mod scales;
mod state;
mod ui;

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use log::{error, info};

use assembler::ChartAssembler;
use config::{RunConfig, CONFIG_FILE};
use state::{ViewerEntry, ViewerState};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RunConfig::load(Path::new(CONFIG_FILE)).context("loading configuration")?;
    let document = data::loader::load_document(&config.plots_file).context("loading chart data")?;

    let assembler = ChartAssembler::new(&config, &document);
    let mut entries = Vec::new();
    let mut failed = 0usize;

    for (kind, chart) in assembler.assemble() {
        let path = config.output_path(kind.file_name());
        let written_to = match render::render_and_persist(&chart, &path) {
            Ok(()) => Some(path),
            Err(e) => {
                error!("{e}");
                failed += 1;
                None
            }
        };
        entries.push(ViewerEntry {
            kind,
            chart,
            written_to,
        });
    }

    let state = ViewerState::new(entries);
    info!(
        "{} chart(s) saved to {}",
        state.written_count(),
        config.output_dir.display()
    );

    if config.show && !state.entries.is_empty() {
        app::run_viewer(state).map_err(|e| anyhow!("viewer failed: {e}"))?;
    }

    if failed > 0 {
        bail!("{failed} chart(s) could not be written");
    }
    Ok(())
}

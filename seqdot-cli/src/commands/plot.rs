//! Plot command implementation - read two FASTA files, write the raw plot
//! and optionally a filtered one

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::CliError;
use seqdot_core::{FastaError, FastaParser, FilterParams, Sequence, Session};
use seqdot_render::{DotPlotExporter, PlotLabels};

#[allow(clippy::too_many_arguments)]
pub fn execute(
    config: &Config,
    seq1: PathBuf,
    seq2: PathBuf,
    window: Option<usize>,
    threshold: Option<usize>,
    out: Option<PathBuf>,
    filtered_out: Option<PathBuf>,
    name1: Option<String>,
    name2: Option<String>,
) -> Result<()> {
    log::info!("Starting dot plot");
    log::info!("Sequence 1: {}", seq1.display());
    log::info!("Sequence 2: {}", seq2.display());

    let first = read_sequence(&seq1)?;
    let second = read_sequence(&seq2)?;
    let name1 = name1.unwrap_or_else(|| display_name(&seq1));
    let name2 = name2.unwrap_or_else(|| display_name(&seq2));
    let session = Session::new(first, name1, second, name2);

    let params = resolve_params(config, window, threshold);
    if let Some(params) = params {
        params
            .validate(session.seq1().len(), session.seq2().len())
            .map_err(CliError::from)?;
    }

    let exporter = DotPlotExporter::new(config.render.export_config());
    let out = out.unwrap_or_else(|| config.render.raw_output.clone());
    let matrix = session.matrix().map_err(CliError::from)?;
    log::info!(
        "Built {}x{} matrix with {} matches",
        matrix.rows(),
        matrix.cols(),
        matrix.count_matches()
    );
    export(&exporter, &out, matrix, &PlotLabels::from_session(&session, None))?;

    if let Some(params) = params {
        let filtered_out = filtered_out.unwrap_or_else(|| config.render.filtered_output.clone());
        let filtered = session.filtered(params).map_err(CliError::from)?;
        log::info!(
            "Window {} / threshold {} kept {} of {} matches",
            params.window,
            params.threshold,
            filtered.count_matches(),
            matrix.count_matches()
        );
        export(
            &exporter,
            &filtered_out,
            &filtered,
            &PlotLabels::from_session(&session, Some(params)),
        )?;
    }

    Ok(())
}

/// Filtering runs when either value is given; the other comes from `[filter]`
fn resolve_params(
    config: &Config,
    window: Option<usize>,
    threshold: Option<usize>,
) -> Option<FilterParams> {
    match (window, threshold) {
        (None, None) => None,
        (window, threshold) => Some(FilterParams::new(
            window.unwrap_or(config.filter.window),
            threshold.unwrap_or(config.filter.threshold),
        )),
    }
}

fn read_sequence(path: &Path) -> Result<Sequence> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()).into());
    }

    FastaParser::read_sequence(path).map_err(|e| {
        let invalid = e
            .chain()
            .find_map(|cause| cause.downcast_ref::<FastaError>())
            .and_then(|fasta| match fasta {
                FastaError::Sequence { id, source } => Some(format!("record {}: {}", id, source)),
                _ => None,
            });
        match invalid {
            Some(message) => CliError::invalid_sequence(path.display().to_string(), message).into(),
            None => e,
        }
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn export(
    exporter: &DotPlotExporter,
    path: &Path,
    matrix: &seqdot_core::SimilarityMatrix,
    labels: &PlotLabels,
) -> Result<()> {
    exporter
        .export(path, matrix, labels)
        .map_err(|e| CliError::rendering(format!("{}: {:#}", path.display(), e)))?;
    log::info!("Dot plot saved to {}", path.display());
    Ok(())
}

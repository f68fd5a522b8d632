//! Plain-text rendering of search results

use std::path::{Path, PathBuf};

use crate::beam::propagator::Trace;
use crate::io::configuration::{OUTPUT_EXTENSION, OUTPUT_SUFFIX};
use crate::io::error::{LazorError, Result};
use crate::lattice::board::{Board, CellKind};
use crate::lattice::configuration::{Configuration, Placement, PointTag};
use crate::lattice::mask::LatticeMask;
use crate::lattice::point::{Cell, LatticePoint};
use crate::search::outcome::{SearchOutcome, SearchReport, SearchStats};

/// Symbol drawn for a target the beams reached
pub const TARGET_HIT: char = '@';
/// Symbol drawn for a target no beam reached
pub const TARGET_MISSED: char = 'P';

/// Draw the board grid in board-file token syntax with `placement` filled in
pub fn render_grid(board: &Board, placement: &Placement) -> String {
    let mut out = String::new();
    for (y, row) in board.rows().enumerate() {
        let tokens: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(x, kind)| match (kind, placement.get(Cell::new(x, y))) {
                (CellKind::Open, Some(block)) => block.symbol().to_string(),
                _ => kind.symbol().to_string(),
            })
            .collect();
        out.push_str(&tokens.join(" "));
        out.push('\n');
    }
    out
}

const fn tag_symbol(tag: PointTag) -> char {
    match tag {
        PointTag::Empty => ' ',
        PointTag::Passable => '.',
        PointTag::BeamHit => '*',
        PointTag::AdjacentToBlock(kind) => kind.symbol(),
    }
}

/// Draw every lattice point of `config`, marking beams, blocks and targets
///
/// Rows run top to bottom over `0..=2H`, columns over `0..=2W`.
pub fn render_lattice(config: &Configuration<'_>, visited: &LatticeMask) -> String {
    let board = config.board();
    let (max_x, max_y) = board.lattice_extent();
    let mut out = String::new();
    for y in 0..=max_y {
        let line: String = (0..=max_x)
            .map(|x| {
                let point = LatticePoint::new(x, y);
                if board.targets().contains(&point) {
                    if visited.contains(point) {
                        TARGET_HIT
                    } else {
                        TARGET_MISSED
                    }
                } else {
                    tag_symbol(config.tag_at(point, visited))
                }
            })
            .collect();
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn render_stats(stats: &SearchStats) -> String {
    format!(
        "Search: {} nodes, {} evaluations, {} pruned, {} rejected\n",
        stats.nodes, stats.evaluations, stats.pruned, stats.rejected
    )
}

fn render_trace(trace: &Trace) -> String {
    format!(
        "Beams: {} segments, {} lattice points lit\n",
        trace.beams().len(),
        trace.points().len()
    )
}

/// Render a finished search
///
/// With `lattice` set, a solved report also carries the lattice view of the
/// winning configuration.
///
/// # Errors
///
/// Returns [`LazorError::MalformedBoard`] if the solution cannot be laid
/// onto `board`, which only happens when it came from a different board.
pub fn render_report(board: &Board, report: &SearchReport, lattice: bool) -> Result<String> {
    let mut out = format!("{board}\n\n");

    match &report.outcome {
        SearchOutcome::Solved(solution) => {
            out.push_str("Solved\n");
            out.push_str(&render_grid(board, &solution.placement));
            out.push_str(&format!("Placement: {}\n", solution.placement));
            out.push_str(&render_trace(&solution.trace));
            if lattice {
                let config = Configuration::new(board, solution.placement.clone())?;
                out.push('\n');
                out.push_str(&render_lattice(&config, solution.trace.visited()));
            }
        }
        SearchOutcome::Exhausted => {
            out.push_str("No solution: every placement leaves a target unlit\n");
        }
    }

    out.push_str(&render_stats(&report.stats));
    Ok(out)
}

/// Render a search that stopped with an error
pub fn render_failure(board: &Board, error: &LazorError) -> String {
    format!("{board}\n\nNo solution: {error}\n")
}

/// Report file written next to a board file: `<stem>_solved.txt`
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!(
        "{}{}.{}",
        stem.to_string_lossy(),
        OUTPUT_SUFFIX,
        OUTPUT_EXTENSION
    );

    input_path
        .parent()
        .map_or_else(|| PathBuf::from(&output_name), |parent| parent.join(&output_name))
}

/// Write report text to `path`
///
/// # Errors
///
/// Returns [`LazorError::FileSystem`] if the file cannot be written.
pub fn write_report(path: &Path, text: &str) -> Result<()> {
    std::fs::write(path, text).map_err(|source| LazorError::FileSystem {
        path: path.to_path_buf(),
        operation: "write report",
        source,
    })
}

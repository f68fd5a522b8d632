//! Board file (`.bff`) loading
//!
//! ```text
//! # comment
//! GRID START
//! o o x
//! o B o
//! GRID STOP
//! A 2
//! C 1
//! L 2 7 1 -1
//! P 3 0
//! ```
//!
//! Grid tokens are `o` (open), `x` (non-placeable) and `A`/`B`/`C` (fixed
//! reflect/opaque/refract blocks). Count lines give the movable pool, `L`
//! lines give beam sources as `x y dx dy` and `P` lines give target points,
//! all in lattice coordinates.

use std::collections::BTreeSet;
use std::path::Path;

use crate::io::error::{LazorError, Result, syntax_error};
use crate::lattice::block::{BlockCounts, BlockKind};
use crate::lattice::board::{BeamSource, Board, CellKind};
use crate::lattice::point::{Direction, LatticePoint};

const GRID_START: &str = "GRID START";
const GRID_STOP: &str = "GRID STOP";

/// Collected pieces of a board file before validation
#[derive(Default)]
struct BoardSections {
    rows: Vec<Vec<CellKind>>,
    counts: BlockCounts,
    counted: BTreeSet<BlockKind>,
    sources: Vec<BeamSource>,
    targets: Vec<LatticePoint>,
}

/// Parse one grid line into cells
fn parse_grid_row(line_number: usize, line: &str) -> Result<Vec<CellKind>> {
    line.split_whitespace()
        .flat_map(str::chars)
        .map(|symbol| match symbol {
            'o' => Ok(CellKind::Open),
            'x' => Ok(CellKind::NonPlaceable),
            other => BlockKind::from_symbol(other).map(CellKind::Fixed).ok_or_else(|| {
                syntax_error(line_number, &format!("unknown grid token '{other}'"))
            }),
        })
        .collect()
}

/// Parse exactly `N` integer fields
fn parse_fields<const N: usize>(
    line_number: usize,
    keyword: &str,
    fields: &[&str],
) -> Result<[i32; N]> {
    if fields.len() != N {
        return Err(syntax_error(
            line_number,
            &format!(
                "'{keyword}' expects {N} values, found {}",
                fields.len()
            ),
        ));
    }
    let mut values = [0; N];
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field.parse().map_err(|error| {
            syntax_error(line_number, &format!("'{field}' is not an integer: {error}"))
        })?;
    }
    Ok(values)
}

impl BoardSections {
    fn parse_directive(&mut self, line_number: usize, line: &str) -> Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&keyword, fields)) = tokens.split_first() else {
            return Ok(());
        };

        match keyword {
            "L" => {
                let [x, y, dx, dy] = parse_fields::<4>(line_number, keyword, fields)?;
                let direction = Direction::new(dx, dy).ok_or_else(|| {
                    syntax_error(
                        line_number,
                        &format!("direction ({dx}, {dy}) is not a unit diagonal"),
                    )
                })?;
                self.sources
                    .push(BeamSource::new(LatticePoint::new(x, y), direction));
            }
            "P" => {
                let [x, y] = parse_fields::<2>(line_number, keyword, fields)?;
                self.targets.push(LatticePoint::new(x, y));
            }
            _ => {
                let kind = keyword
                    .chars()
                    .next()
                    .filter(|_| keyword.len() == 1)
                    .and_then(BlockKind::from_symbol)
                    .ok_or_else(|| {
                        syntax_error(line_number, &format!("unknown directive '{keyword}'"))
                    })?;
                let [count] = parse_fields::<1>(line_number, keyword, fields)?;
                if count < 0 {
                    return Err(syntax_error(
                        line_number,
                        &format!("negative block count {count}"),
                    ));
                }
                if !self.counted.insert(kind) {
                    return Err(syntax_error(
                        line_number,
                        &format!("duplicate count for block '{keyword}'"),
                    ));
                }
                self.counts.set(kind, count as usize);
            }
        }
        Ok(())
    }
}

/// Parse board file text into a validated [`Board`]
///
/// # Errors
///
/// Returns an error if:
/// - A line cannot be parsed ([`LazorError::BoardSyntax`])
/// - The grid is missing, ragged, or sources/targets fall outside the lattice
///   ([`LazorError::MalformedBoard`])
pub fn parse_board(text: &str) -> Result<Board> {
    let mut sections = BoardSections::default();
    let mut grid_open: Option<usize> = None;
    let mut grid_seen = false;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match (line, grid_open) {
            (GRID_START, None) if !grid_seen => {
                grid_open = Some(line_number);
                grid_seen = true;
            }
            (GRID_START, _) => {
                return Err(syntax_error(line_number, &"unexpected GRID START"));
            }
            (GRID_STOP, Some(_)) => grid_open = None,
            (GRID_STOP, None) => {
                return Err(syntax_error(line_number, &"GRID STOP without GRID START"));
            }
            (_, Some(_)) => sections.rows.push(parse_grid_row(line_number, line)?),
            (_, None) => sections.parse_directive(line_number, line)?,
        }
    }

    if let Some(start) = grid_open {
        return Err(syntax_error(start, &"GRID START is never closed"));
    }

    Board::from_rows(
        sections.rows,
        sections.counts,
        sections.sources,
        sections.targets,
    )
}

/// Read and parse a board file
///
/// # Errors
///
/// Returns [`LazorError::FileSystem`] if the file cannot be read, plus every
/// error of [`parse_board`].
pub fn load_board(path: &Path) -> Result<Board> {
    let text = std::fs::read_to_string(path).map_err(|source| LazorError::FileSystem {
        path: path.to_path_buf(),
        operation: "read board",
        source,
    })?;
    parse_board(&text)
}

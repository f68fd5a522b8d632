//! Command-line interface for batch solving of board files

use crate::io::board_file::load_board;
use crate::io::configuration::{BOARD_EXTENSION, DEFAULT_THREADS};
use crate::io::error::{LazorError, Result, invalid_parameter};
use crate::io::progress::{ProgressManager, SearchProgress};
use crate::io::report::{output_path, render_failure, render_report, write_report};
use crate::search::outcome::SearchConfig;
use crate::search::placement::PlacementSearch;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "lazor")]
#[command(
    author,
    version,
    about = "Place movable blocks so that every target is lit by a beam"
)]
/// Command-line arguments for the solver
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Board file or directory of board files to solve
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Worker threads for the placement search
    #[arg(short = 'j', long, default_value_t = DEFAULT_THREADS)]
    pub threads: usize,

    /// Stop after expanding this many search nodes
    #[arg(short, long)]
    pub budget: Option<u64>,

    /// Propagate independent beam sources concurrently
    #[arg(long)]
    pub parallel_beams: bool,

    /// Append the lattice view of the solution to each report
    #[arg(short, long)]
    pub lattice: bool,

    /// Hide spinners and skip notices
    #[arg(short, long)]
    pub quiet: bool,

    /// Overwrite reports that already exist
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Whether boards with an existing report are left alone
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Whether spinners are drawn
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Search options selected on the command line
    pub const fn search_config(&self) -> SearchConfig {
        SearchConfig {
            threads: self.threads,
            node_budget: self.budget,
            parallel_beams: self.parallel_beams,
        }
    }
}

/// Orchestrates batch solving of board files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Processor for the boards named by `cli`
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve every selected board and write its report
    ///
    /// Boards without a solution still get a report. Only failures to read
    /// or write files, bad options and invalid boards abort the run.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, board loading or report
    /// writing fails
    pub fn process(&mut self) -> Result<Vec<PathBuf>> {
        self.cli.search_config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        let mut written = Vec::with_capacity(files.len());
        for (index, file) in files.iter().enumerate() {
            written.push(self.process_file(file, index)?);
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(written)
    }

    fn is_board_file(path: &Path) -> bool {
        path.extension().and_then(|s| s.to_str()) == Some(BOARD_EXTENSION)
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !Self::is_board_file(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("board files must have the .{BOARD_EXTENSION} extension"),
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                Vec::new()
            })
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|source| LazorError::FileSystem {
                path: target.clone(),
                operation: "list directory",
                source,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if Self::is_board_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be a board file or a directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        if output_path(input_path).exists() {
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<PathBuf> {
        let board = load_board(input_path)?;

        let observer = self
            .progress_manager
            .as_mut()
            .map_or_else(SearchProgress::hidden, |pm| pm.start_file(index, input_path));

        let (text, summary) =
            match PlacementSearch::with_observer(&board, self.cli.search_config(), observer).run() {
                Ok(report) => {
                    let summary = if report.outcome.is_solved() {
                        "solved"
                    } else {
                        "no solution"
                    };
                    (render_report(&board, &report, self.cli.lattice)?, summary)
                }
                Err(error @ (LazorError::Infeasible { .. } | LazorError::BudgetExceeded { .. })) => {
                    (render_failure(&board, &error), "no solution")
                }
                Err(error) => return Err(error),
            };

        let output = output_path(input_path);
        write_report(&output, &text)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, summary);
        }

        Ok(output)
    }
}

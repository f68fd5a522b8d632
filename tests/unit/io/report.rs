//! Tests for text rendering and writing of search reports

#[cfg(test)]
mod tests {
    use lazor::LazorError;
    use lazor::beam::propagator::Propagator;
    use lazor::io::report::{
        TARGET_HIT, TARGET_MISSED, output_path, render_failure, render_grid, render_lattice,
        render_report, write_report,
    };
    use lazor::lattice::block::{BlockCounts, BlockKind};
    use lazor::lattice::board::{BeamSource, Board, CellKind};
    use lazor::lattice::configuration::{Configuration, Placement};
    use lazor::lattice::point::{Cell, Direction, LatticePoint};
    use lazor::search::outcome::{SearchConfig, SearchOutcome, SearchReport, SearchStats};
    use lazor::search::placement::solve;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    fn mirror_board() -> Board {
        Board::from_rows(
            vec![vec![CellKind::Open, CellKind::Open]],
            BlockCounts::new().with(BlockKind::Reflect, 1),
            vec![BeamSource::new(LatticePoint::new(1, 0), Direction::DOWN_RIGHT)],
            [LatticePoint::new(1, 2), LatticePoint::new(3, 0)],
        )
        .unwrap()
    }

    // Tests movable placements are drawn in board-file syntax
    // Verified by drawing the load-time cell instead of the placement
    #[test]
    fn test_render_grid_fills_placement() {
        let board = Board::from_rows(
            vec![vec![CellKind::Open, CellKind::NonPlaceable, CellKind::Open]],
            BlockCounts::new().with(BlockKind::Refract, 1),
            vec![],
            [],
        )
        .unwrap();
        let mut placement = Placement::new();
        placement.insert(Cell::new(2, 0), BlockKind::Refract);
        assert_eq!(render_grid(&board, &placement), "o x C\n");
    }

    // Tests the lattice view marks beams, blocks and targets
    // Verified by drawing hit targets with the miss symbol
    #[test]
    fn test_render_lattice() {
        let board = mirror_board();
        let config = Configuration::new(
            &board,
            [(Cell::new(1, 0), BlockKind::Reflect)].into_iter().collect(),
        )
        .unwrap();
        let trace = Propagator::new(&config).run().unwrap();
        let view = render_lattice(&config, trace.visited());
        let rows: Vec<&str> = view.lines().collect();

        assert_eq!(rows.len(), 3);
        let top: Vec<char> = rows.first().unwrap().chars().collect();
        assert_eq!(top.get(1), Some(&'*'));
        assert_eq!(top.get(3), Some(&TARGET_MISSED));
        assert_eq!(top.get(4), Some(&'A'));
        let bottom: Vec<char> = rows.last().unwrap().chars().collect();
        assert_eq!(bottom.get(1), Some(&TARGET_HIT));
    }

    // Tests solved reports carry grid, placement, statistics and lattice view
    // Verified by skipping the lattice view when requested
    #[test]
    fn test_render_solved_report() {
        let board = Board::from_rows(
            vec![vec![CellKind::Open, CellKind::Open]],
            BlockCounts::new().with(BlockKind::Reflect, 1),
            vec![BeamSource::new(LatticePoint::new(1, 0), Direction::DOWN_RIGHT)],
            [LatticePoint::new(1, 2)],
        )
        .unwrap();
        let report = solve(&board, SearchConfig::default()).unwrap();

        let text = render_report(&board, &report, false).unwrap();
        assert!(text.contains("Solved"));
        assert!(text.contains("o A\n"));
        assert!(text.contains("Placement: {A@[1, 0]}"));
        assert!(text.contains("2 evaluations"));

        let with_lattice = render_report(&board, &report, true).unwrap();
        assert!(with_lattice.lines().count() > text.lines().count());
        assert!(with_lattice.contains(TARGET_HIT));
    }

    // Tests exhausted reports say there is no solution
    // Verified by rendering Exhausted as solved
    #[test]
    fn test_render_exhausted_report() {
        let board = mirror_board();
        let report = SearchReport {
            outcome: SearchOutcome::Exhausted,
            stats: SearchStats {
                nodes: 3,
                evaluations: 2,
                pruned: 0,
                rejected: 0,
            },
        };
        let text = render_report(&board, &report, true).unwrap();
        assert!(text.contains("No solution"));
        assert!(text.contains("3 nodes"));
        assert!(!text.contains("Placement"));
    }

    // Tests the report layout: summary, blank line, verdict, statistics
    // Verified by dropping the newline after the statistics line
    #[test]
    fn test_report_layout() {
        let board = mirror_board();
        let report = SearchReport {
            outcome: SearchOutcome::Exhausted,
            stats: SearchStats {
                nodes: 3,
                evaluations: 2,
                pruned: 0,
                rejected: 0,
            },
        };
        let text = render_report(&board, &report, false).unwrap();
        assert_eq!(
            text,
            format!(
                "{board}\n\nNo solution: every placement leaves a target unlit\n\
                 Search: 3 nodes, 2 evaluations, 0 pruned, 0 rejected\n"
            )
        );
    }

    // Tests failed searches still produce readable text
    // Verified by omitting the error message
    #[test]
    fn test_render_failure() {
        let board = mirror_board();
        let text = render_failure(
            &board,
            &LazorError::Infeasible {
                required: 4,
                available: 2,
            },
        );
        assert!(text.contains("No solution"));
        assert!(text.contains("4 movable blocks"));
    }

    // Tests report paths sit next to the board
    // Verified by keeping the board extension
    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("boards/mad_1.bff")),
            PathBuf::from("boards/mad_1_solved.txt")
        );
        assert_eq!(
            output_path(Path::new("tiny.bff")),
            PathBuf::from("tiny_solved.txt")
        );
    }

    // Tests writing and failing to write reports
    // Verified by swallowing write errors
    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out_solved.txt");
        write_report(&path, "hello\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n");

        let bad = dir.path().join("missing").join("out.txt");
        assert!(matches!(
            write_report(&bad, "x"),
            Err(LazorError::FileSystem { .. })
        ));
    }
}

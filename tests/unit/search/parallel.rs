//! Tests for frontier splitting and branch-parallel exploration

#[cfg(test)]
mod tests {
    use lazor::LazorError;
    use lazor::lattice::block::{BlockCounts, BlockKind};
    use lazor::lattice::board::{BeamSource, Board, CellKind};
    use lazor::lattice::point::{Cell, Direction, LatticePoint};
    use lazor::search::observer::NullObserver;
    use lazor::search::outcome::{SearchConfig, SearchOutcome};
    use lazor::search::parallel::{explore, frontier};
    use lazor::search::placement::{Branch, NodeBudget, solve};

    const O: CellKind = CellKind::Open;

    fn threads(count: usize) -> SearchConfig {
        SearchConfig {
            threads: count,
            ..SearchConfig::default()
        }
    }

    /// The source leaves the board at once and its origin is the target, so
    /// every placement wins and the first cell should be returned
    fn always_lit_board() -> Board {
        Board::from_rows(
            vec![vec![O, O, O]],
            BlockCounts::new().with(BlockKind::Reflect, 1),
            vec![BeamSource::new(LatticePoint::new(0, 1), Direction::UP_LEFT)],
            [LatticePoint::new(0, 1)],
        )
        .unwrap()
    }

    // Tests the frontier stops expanding once it is big enough
    // Verified by expanding one level further than needed
    #[test]
    fn test_frontier_reaches_target() {
        let open: Vec<Cell> = (0..4).map(|x| Cell::new(x, 0)).collect();
        let root = Branch::root(BlockCounts::new().with(BlockKind::Reflect, 2));
        let level = frontier(root.clone(), &open, 2);
        assert_eq!(level.len(), 3);
        assert!(level.iter().all(|branch| branch.placed.len() == 1));
        assert_eq!(frontier(root, &open, 1).len(), 1);
    }

    // Tests the frontier keeps depth-first order and stops at leaves
    // Verified by sorting branches by kind before cell
    #[test]
    fn test_frontier_order_and_leaves() {
        let open: Vec<Cell> = (0..3).map(|x| Cell::new(x, 0)).collect();
        let root = Branch::root(BlockCounts::new().with(BlockKind::Reflect, 1).with(BlockKind::Opaque, 1));
        let level = frontier(root, &open, 100);
        assert_eq!(level.len(), 6);
        assert!(level.iter().all(Branch::is_leaf));
        let cells: Vec<Vec<Cell>> = level
            .iter()
            .map(|branch| branch.placed.iter().map(|&(cell, _)| cell).collect())
            .collect();
        assert_eq!(
            cells.first(),
            Some(&vec![Cell::new(0, 0), Cell::new(1, 0)])
        );
        assert_eq!(
            cells.last(),
            Some(&vec![Cell::new(1, 0), Cell::new(2, 0)])
        );
    }

    // Tests parallel search returns the lowest-index solution
    // Verified by keeping the first solution to finish
    #[test]
    fn test_parallel_returns_first_solution() {
        let board = always_lit_board();
        for count in [2, 3, 8] {
            let report = solve(&board, threads(count)).unwrap();
            let solution = report.outcome.solution().unwrap();
            assert_eq!(solution.placement.to_string(), "{A@[0, 0]}");
        }
    }

    // Tests parallel and sequential searches agree on the placement
    // Verified by merging outputs in thread order
    #[test]
    fn test_parallel_matches_sequential() {
        let board = Board::from_rows(
            vec![vec![O, O], vec![O, O]],
            BlockCounts::new().with(BlockKind::Reflect, 1).with(BlockKind::Opaque, 1),
            vec![BeamSource::new(LatticePoint::new(1, 0), Direction::DOWN_RIGHT)],
            [LatticePoint::new(1, 2)],
        )
        .unwrap();
        let sequential = solve(&board, SearchConfig::default()).unwrap();
        let parallel = solve(&board, threads(4)).unwrap();
        assert_eq!(sequential.outcome, parallel.outcome);
    }

    // Tests exhausted parallel searches evaluate every leaf once
    // Verified by letting two workers take the same branch
    #[test]
    fn test_parallel_exhausted_counts() {
        let board = Board::from_rows(
            vec![vec![O, O, O]],
            BlockCounts::new().with(BlockKind::Reflect, 1).with(BlockKind::Opaque, 1),
            vec![],
            [LatticePoint::new(0, 0)],
        )
        .unwrap();
        let open = board.open_cells();
        let budget = NodeBudget::new(None);
        let report = explore(
            &board,
            &open,
            threads(3),
            &budget,
            &NullObserver,
            Branch::root(*board.movable_counts()),
        )
        .unwrap();
        assert_eq!(report.outcome, SearchOutcome::Exhausted);
        assert_eq!(report.stats.evaluations, 6);
    }

    // Tests the shared budget also stops parallel workers
    // Verified by giving each worker its own budget
    #[test]
    fn test_parallel_budget_exceeded() {
        let board = Board::from_rows(
            vec![vec![O, O, O, O]],
            BlockCounts::new().with(BlockKind::Opaque, 2),
            vec![],
            [LatticePoint::new(0, 0)],
        )
        .unwrap();
        let config = SearchConfig {
            threads: 2,
            node_budget: Some(3),
            parallel_beams: false,
        };
        assert!(matches!(
            solve(&board, config),
            Err(LazorError::BudgetExceeded { nodes: 3 })
        ));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::num::NonZero;

    use strum::VariantArray;
    use unordered_pair::UnorderedPair;

    use crate::builder::{GridBuilder, InvalidGridReason};
    use crate::color::Color;
    use crate::grid::CellPair;
    use crate::location::{Dimension, Location};
    use crate::network::FlowNetwork;
    use crate::solver::{FlowSolver, NaiveSolver, Solver, SolverError};

    fn dims(rows: usize, cols: usize) -> (Dimension, Dimension) {
        (NonZero::new(rows).unwrap(), NonZero::new(cols).unwrap())
    }

    #[test]
    fn default_grid_is_all_white_ones() {
        let grid = GridBuilder::with_dims(dims(2, 3)).build().unwrap();

        assert_eq!(format!("{}", grid), "w1 w1 w1
w1 w1 w1
");
        // 2x2=4 horizontal pairs plus 3 vertical ones
        assert_eq!(grid.valid_pairs().len(), 7);
    }

    #[test]
    fn display_shows_colors_and_values() {
        let grid = GridBuilder::with_dims(dims(2, 2))
            .color_rows(&[vec![0, 1], vec![3, 4]])
            .value_rows(&[vec![3, 2], vec![1, 9]])
            .build()
            .unwrap();

        assert_eq!(format!("{}", grid), "w3 r2
g1 k9
");
    }

    #[test]
    fn builder_rejects_wrong_row_count() {
        let mut builder = GridBuilder::with_dims(dims(2, 2));
        builder.color_rows(&[vec![0, 0]]);

        assert_eq!(
            builder.is_valid(),
            Some(&vec![InvalidGridReason::RowCountMismatch { expected: 2, got: 1 }])
        );
        assert!(builder.build().is_err());
    }

    #[test]
    fn builder_rejects_ragged_rows() {
        let mut builder = GridBuilder::with_dims(dims(2, 2));
        builder.value_rows(&[vec![1, 2], vec![3]]);

        assert_eq!(
            builder.is_valid(),
            Some(&vec![InvalidGridReason::RowLengthMismatch { row: 1, expected: 2, got: 1 }])
        );
    }

    #[test]
    fn builder_rejects_unknown_color_code() {
        let mut builder = GridBuilder::with_dims(dims(1, 2));
        builder.color_rows(&[vec![0, 5]]);

        assert_eq!(
            builder.is_valid(),
            Some(&vec![InvalidGridReason::UnknownColorCode { code: 5 }])
        );
    }

    #[test]
    fn builder_rejects_zero_value() {
        let mut builder = GridBuilder::with_dims(dims(1, 2));
        builder.value_rows(&[vec![3, 0]]);

        assert_eq!(
            builder.is_valid(),
            Some(&vec![InvalidGridReason::ZeroValue { location: Location(0, 1) }])
        );
    }

    #[test]
    fn builder_rejects_out_of_bounds_edits() {
        let mut builder = GridBuilder::with_dims(dims(2, 2));
        builder.paint(Location(2, 0), Color::Red);

        assert_eq!(
            builder.is_valid(),
            Some(&vec![InvalidGridReason::OutOfBounds { location: Location(2, 0) }])
        );

        // further edits are no-ops once invalid; no second reason accumulates
        builder.set_value(Location(9, 9), 4);
        assert_eq!(builder.is_valid().unwrap().len(), 1);
    }

    #[test]
    fn color_compatibility_is_symmetric() {
        for &a in Color::VARIANTS {
            for &b in Color::VARIANTS {
                assert_eq!(a.pairs_with(b), b.pairs_with(a), "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn color_compatibility_table() {
        use Color::*;

        for &c in Color::VARIANTS {
            assert!(!Black.pairs_with(c));
            assert_eq!(White.pairs_with(c), c != Black);
        }
        assert!(Red.pairs_with(Blue));
        assert!(Red.pairs_with(Red));
        assert!(Blue.pairs_with(Blue));
        assert!(!Red.pairs_with(Green));
        assert!(!Blue.pairs_with(Green));
        assert!(Green.pairs_with(Green));
        assert!(Green.pairs_with(White));
    }

    #[test]
    fn adjacency_is_four_directional() {
        let center = Location(1, 1);

        for neighbor in [Location(0, 1), Location(2, 1), Location(1, 0), Location(1, 2)] {
            assert!(center.adjacent_to(neighbor));
            assert!(neighbor.adjacent_to(center));
        }
        // no diagonals, no self, no distance two
        assert!(!center.adjacent_to(Location(0, 0)));
        assert!(!center.adjacent_to(Location(2, 2)));
        assert!(!center.adjacent_to(center));
        assert!(!center.adjacent_to(Location(1, 3)));
    }

    fn mixed_grid() -> crate::grid::Grid {
        GridBuilder::with_dims(dims(3, 4))
            .color_rows(&[vec![0, 1, 2, 0], vec![3, 4, 1, 2], vec![0, 3, 3, 4]])
            .value_rows(&[vec![4, 8, 2, 6], vec![1, 9, 3, 3], vec![7, 2, 2, 5]])
            .build()
            .unwrap()
    }

    #[test]
    fn enumerated_pairs_are_valid_and_unique() {
        let grid = mixed_grid();
        let pairs = grid.valid_pairs();

        assert!(!pairs.is_empty());
        for pair in &pairs {
            assert!(grid.valid_pair(pair.0, pair.1), "{:?} should be valid", pair);
        }

        let deduplicated: HashSet<CellPair> = pairs.iter().copied().collect();
        assert_eq!(deduplicated.len(), pairs.len());
    }

    #[test]
    fn forbidden_cells_never_enumerated() {
        let grid = mixed_grid();

        for pair in grid.valid_pairs() {
            assert!(!grid.is_forbidden(pair.0));
            assert!(!grid.is_forbidden(pair.1));
        }
    }

    #[test]
    fn out_of_bounds_queries_are_merely_invalid() {
        let grid = GridBuilder::with_dims(dims(2, 2)).build().unwrap();

        assert!(!grid.valid_pair(Location(0, 0), Location(0, 5)));
        assert!(!grid.valid_pair(Location(9, 9), Location(9, 8)));
        // in bounds but not adjacent
        assert!(!grid.valid_pair(Location(0, 0), Location(1, 1)));
        assert!(!grid.valid_pair(Location(0, 0), Location(0, 0)));
    }

    #[test]
    fn one_by_two_grid_pairs_once() {
        let grid = GridBuilder::with_dims(dims(1, 2))
            .value_rows(&[vec![3, 5]])
            .build()
            .unwrap();

        let expected = UnorderedPair(Location(0, 0), Location(0, 1));
        assert_eq!(grid.valid_pairs(), vec![expected]);
        assert_eq!(grid.cost(&expected), 2);

        let mut naive = NaiveSolver::new(&grid);
        assert_eq!(naive.run().unwrap(), 2);
        assert_eq!(naive.pairs(), &[expected]);

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 2);
        assert_eq!(flow.pairs(), &[expected]);
    }

    #[test]
    fn two_by_two_with_black_corner() {
        let grid = GridBuilder::with_dims(dims(2, 2))
            .paint(Location(0, 0), Color::Black)
            .value_rows(&[vec![1, 5], vec![5, 5]])
            .build()
            .unwrap();

        // the two candidate pairs share (1, 1), so only one can be taken
        assert_eq!(grid.valid_pairs().len(), 2);
        assert_eq!(grid.score(&[]), 15);

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 5);
        assert_eq!(flow.pairs().len(), 1);
        let pair = flow.pairs()[0];
        assert!(pair.0 == Location(1, 1) || pair.1 == Location(1, 1));
        assert_eq!(grid.cost(&pair), 0);

        let mut naive = NaiveSolver::new(&grid);
        assert_eq!(naive.run().unwrap(), 5);
    }

    #[test]
    fn all_black_grid_scores_zero() {
        let grid = GridBuilder::with_dims(dims(2, 2))
            .color_rows(&[vec![4, 4], vec![4, 4]])
            .build()
            .unwrap();

        assert!(grid.valid_pairs().is_empty());

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 0);
        assert!(flow.pairs().is_empty());

        let mut naive = NaiveSolver::new(&grid);
        assert_eq!(naive.run().unwrap(), 0);
        assert!(naive.pairs().is_empty());
    }

    #[test]
    fn one_by_one_grid_is_its_own_score() {
        let grid = GridBuilder::with_dims(dims(1, 1))
            .value_rows(&[vec![7]])
            .build()
            .unwrap();

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 7);
        assert!(flow.pairs().is_empty());
    }

    #[test]
    fn incompatible_colors_leave_everything_unpaired() {
        let grid = GridBuilder::with_dims(dims(1, 3))
            .color_rows(&[vec![3, 1, 3]])
            .value_rows(&[vec![2, 4, 6]])
            .build()
            .unwrap();

        assert!(grid.valid_pairs().is_empty());

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 12);
    }

    #[test]
    fn flow_beats_naive_where_greedy_traps_itself() {
        // greedy grabs the middle zero-cost pair and strands both tens
        let grid = GridBuilder::with_dims(dims(1, 4))
            .value_rows(&[vec![10, 1, 1, 10]])
            .build()
            .unwrap();

        let mut naive = NaiveSolver::new(&grid);
        assert_eq!(naive.run().unwrap(), 20);

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 18);
        assert_eq!(flow.pairs().len(), 2);
    }

    #[test]
    fn flow_leaves_cells_unpaired_when_pairing_costs_more() {
        // pairing the outer cells into the hundreds is worse than leaving them
        let grid = GridBuilder::with_dims(dims(1, 4))
            .value_rows(&[vec![1, 100, 100, 1]])
            .build()
            .unwrap();

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 2);
        assert_eq!(flow.pairs(), &[UnorderedPair(Location(0, 1), Location(0, 2))]);
    }

    #[test]
    fn flow_never_scores_above_naive() {
        let grids = [
            mixed_grid(),
            GridBuilder::with_dims(dims(4, 4)).build().unwrap(),
            GridBuilder::with_dims(dims(3, 3))
                .paint(Location(1, 1), Color::Black)
                .value_rows(&[vec![9, 1, 9], vec![1, 1, 1], vec![9, 1, 9]])
                .build()
                .unwrap(),
        ];

        for grid in &grids {
            let naive_score = NaiveSolver::new(grid).run().unwrap();
            let flow_score = FlowSolver::new(grid).run().unwrap();
            assert!(
                flow_score <= naive_score,
                "flow scored {} against naive {}",
                flow_score,
                naive_score
            );
        }
    }

    #[test]
    fn flow_pairing_is_disjoint_and_valid() {
        let grid = mixed_grid();
        let mut flow = FlowSolver::new(&grid);
        flow.run().unwrap();

        let mut seen: HashSet<Location> = HashSet::new();
        for pair in flow.pairs() {
            assert!(grid.valid_pair(pair.0, pair.1));
            assert!(seen.insert(pair.0), "{:?} used twice", pair.0);
            assert!(seen.insert(pair.1), "{:?} used twice", pair.1);
        }
    }

    #[test]
    fn perfect_matching_on_uniform_grid() {
        let grid = GridBuilder::with_dims(dims(2, 3)).build().unwrap();

        let mut flow = FlowSolver::new(&grid);
        assert_eq!(flow.run().unwrap(), 0);
        assert_eq!(flow.pairs().len(), 3);
    }

    #[test]
    fn repeated_runs_are_idempotent() {
        let grid = mixed_grid();
        let mut flow = FlowSolver::new(&grid);

        let first = flow.run().unwrap();
        let first_pairs: HashSet<CellPair> = flow.pairs().iter().copied().collect();
        let second = flow.run().unwrap();
        let second_pairs: HashSet<CellPair> = flow.pairs().iter().copied().collect();

        assert_eq!(first, second);
        assert_eq!(first_pairs, second_pairs);
    }

    #[test]
    fn score_is_recomputable_after_run() {
        let grid = mixed_grid();
        let mut flow = FlowSolver::new(&grid);

        let reported = flow.run().unwrap();
        assert_eq!(flow.score(), reported);
        assert_eq!(grid.score(flow.pairs()), reported);
    }

    #[test]
    fn network_installs_residual_twins() {
        let mut network = FlowNetwork::with_nodes(2);
        network.add_edge(0, 1, 1, 7);

        let (_, forward) = network.edges_from(0).next().unwrap();
        assert_eq!((forward.to, forward.capacity, forward.cost, forward.flow), (1, 1, 7, 0));

        let (_, reverse) = network.edges_from(1).next().unwrap();
        assert_eq!((reverse.to, reverse.capacity, reverse.cost, reverse.flow), (0, 0, -7, 0));
    }

    #[test]
    fn flow_mirrors_onto_reverse_edges() {
        // S=0, T=1, via 2
        let mut network = FlowNetwork::with_nodes(3);
        network.add_edge(0, 2, 1, -3);
        network.add_edge(2, 1, 1, 0);

        assert_eq!(network.min_cost_flow(0, 1).unwrap(), -3);

        let (_, forward) = network.edges_from(0).next().unwrap();
        assert_eq!(forward.flow, 1);
        assert_eq!(forward.residual(), 0);
        // reverse twin of 0 -> 2, reachable from node 2
        let reverse = network
            .edges_from(2)
            .find(|(_, edge)| edge.to == 0)
            .map(|(_, edge)| edge)
            .unwrap();
        assert_eq!(reverse.flow, -1);
        assert_eq!(reverse.residual(), 1);
    }

    #[test]
    fn augmentation_stops_when_no_longer_profitable() {
        // bipartite: S=0, T=1, left x=2 y=3, right p=4 q=5.
        // One unit through x-p (-10) beats two units x-q + y-p (-9);
        // the solver must stop at the cheaper single-unit flow.
        let mut network = FlowNetwork::with_nodes(6);
        network.add_edge(0, 2, 1, 0);
        network.add_edge(0, 3, 1, 0);
        network.add_edge(4, 1, 1, 0);
        network.add_edge(5, 1, 1, 0);
        network.add_edge(2, 4, 1, -10);
        network.add_edge(2, 5, 1, -1);
        network.add_edge(3, 4, 1, -8);

        assert_eq!(network.min_cost_flow(0, 1).unwrap(), -10);

        let selected: Vec<_> = network
            .unit_flow_edges()
            .filter(|&(u, v)| u > 1 && v > 1)
            .collect();
        assert_eq!(selected, vec![(2, 4)]);
    }

    #[test]
    fn negative_residual_cycle_is_an_internal_fault() {
        let mut network = FlowNetwork::with_nodes(4);
        network.add_edge(0, 2, 1, 0);
        // a deliberately broken construction: both directions negative
        network.add_edge(2, 3, 1, -5);
        network.add_edge(3, 2, 1, -5);

        assert_eq!(
            network.min_cost_flow(0, 1),
            Err(SolverError::NegativeResidualCycle)
        );
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZero;
    use std::time::Duration;

    use ndarray::Array2;
    use strum::VariantArray;

    use crate::cell::{Cell, Label};
    use crate::config::{parse_timeout, Separator, Settings};
    use crate::edge::{Edge, EdgeUniverse, Orientation};
    use crate::error::PuzzleError;
    use crate::formula::Formula;
    use crate::grid::Grid;
    use crate::location::Location;
    use crate::palette::Palette;
    use crate::solver::{build, submit, Assignment, Outcome, Verdict};
    use crate::variables::VariableTable;

    // flow free classic pack level 1
    const CLASSIC_LEVEL_1: &str = "5
A 0 B 0 D
0 0 C 0 E
0 0 0 0 0
0 B 0 D 0
0 A C E 0
";

    fn parse(input: &str) -> Grid {
        Grid::parse(input, &Settings::default()).unwrap()
    }

    fn solve(input: &str) -> Outcome {
        parse(input).solve(&Settings::default()).unwrap()
    }

    /// Every terminus touches exactly one edge of its own color and nothing else;
    /// every other cell touches no colored edge or exactly two of one color.
    fn assert_locally_valid(grid: &Grid, assignment: &Assignment) {
        let palette = Palette::extract(grid);
        let universe = EdgeUniverse::build(grid).unwrap();

        for (location, label) in grid.labels() {
            let incident = universe.incident(location);
            let per_color = palette.ids()
                .map(|color| incident.iter().filter(|edge| assignment.carries(**edge, color)).count())
                .collect::<Vec<_>>();

            match palette.classify(label) {
                Cell::Terminus { color } => {
                    for (other, count) in per_color.iter().enumerate() {
                        assert_eq!(*count, if other == color { 1 } else { 0 }, "terminus at {}", location);
                    }
                }
                Cell::Passthrough => {
                    let used = per_color.iter().filter(|count| **count > 0).collect::<Vec<_>>();
                    assert!(used.len() <= 1 && used.iter().all(|count| **count == 2), "cell at {} has {:?}", location, per_color);
                }
            }
        }
    }

    #[test]
    fn zero_colors_is_sat() {
        let outcome = solve("3
0 0 0
0 0 0
0 0 0
");
        assert_eq!(outcome.verdict(), Verdict::Sat);
        assert_eq!(outcome.assignment().unwrap().true_vars().count(), 0);
    }

    #[test]
    fn lone_terminus_on_single_cell_is_unsat() {
        let grid = parse("1\nA\n");
        let formula = build(&grid).unwrap();

        assert_eq!(formula.variables().len(), 0);
        assert!(formula.constraints()[0].alternatives.is_empty());
        assert_eq!(submit(&formula, &Settings::default()), Outcome::Unsat);
    }

    #[test]
    fn single_empty_cell_is_sat() {
        let formula = build(&parse("1\n0\n")).unwrap();
        assert_eq!(formula.constraints()[0].alternatives, vec![vec![]]);

        let cnf = formula.to_cnf();
        // one selector, one clause choosing it
        assert_eq!(cnf.var_count(), 1);
        assert_eq!(cnf.len(), 1);
        assert_eq!(submit(&formula, &Settings::default()).verdict(), Verdict::Sat);
    }

    #[test]
    fn edge_counts() {
        for size in 1..=7 {
            let grid = Grid::from_array(Array2::from_elem((size, size), Label::Empty));
            let universe = EdgeUniverse::build(&grid).unwrap();

            for orientation in Orientation::VARIANTS {
                assert_eq!(universe.count(*orientation), size * (size - 1));
            }
            assert_eq!(universe.len(), 2 * size * (size - 1));
        }
    }

    #[test]
    fn edges_are_vertical_then_horizontal() {
        let universe = EdgeUniverse::build(&parse("2\n0 0\n0 0\n")).unwrap();
        assert_eq!(universe.edges(), &[
            Edge { orientation: Orientation::Vertical, origin: Location(0, 0) },
            Edge { orientation: Orientation::Vertical, origin: Location(1, 0) },
            Edge { orientation: Orientation::Horizontal, origin: Location(0, 0) },
            Edge { orientation: Orientation::Horizontal, origin: Location(0, 1) },
        ]);
        assert_eq!(universe.edges()[0].far_end(), Location(0, 1));
        assert_eq!(universe.edges()[2].far_end(), Location(1, 0));
    }

    #[test]
    fn edge_between_either_order() {
        let right = Edge::between(Location(2, 3), Location(2, 4)).unwrap();
        assert_eq!(right, Edge::between(Location(2, 4), Location(2, 3)).unwrap());
        assert_eq!(right, Edge { orientation: Orientation::Vertical, origin: Location(2, 3) });

        let below = Edge::between(Location(3, 1), Location(2, 1)).unwrap();
        assert_eq!(below, Edge { orientation: Orientation::Horizontal, origin: Location(2, 1) });
        assert!(below.touches(Location(3, 1)));
        assert!(!below.touches(Location(3, 2)));

        assert_eq!(Edge::between(Location(0, 0), Location(1, 1)), None);
        assert_eq!(Edge::between(Location(0, 0), Location(0, 0)), None);
    }

    #[test]
    fn incident_edges_up_down_left_right() {
        let universe = EdgeUniverse::build(&parse("3\n0 0 0\n0 0 0\n0 0 0\n")).unwrap();
        let center = Location(1, 1);

        assert_eq!(universe.incident(center), vec![
            Edge::between(center, Location(0, 1)).unwrap(),
            Edge::between(center, Location(2, 1)).unwrap(),
            Edge::between(center, Location(1, 0)).unwrap(),
            Edge::between(center, Location(1, 2)).unwrap(),
        ]);
        assert_eq!(universe.incident(Location(0, 0)), vec![
            Edge::between(Location(0, 0), Location(1, 0)).unwrap(),
            Edge::between(Location(0, 0), Location(0, 1)).unwrap(),
        ]);
        assert_eq!(universe.incident(Location(0, 1)).len(), 3);
        assert!(universe.incident(Location(5, 5)).is_empty());
    }

    #[test]
    fn one_variable_per_edge_and_color() {
        let grid = parse("4
A 0 0 B
0 C 0 0
0 0 C 0
B 0 0 A
");
        let palette = Palette::extract(&grid);
        let universe = EdgeUniverse::build(&grid).unwrap();
        let variables = VariableTable::allocate(&universe, &palette);

        assert_eq!(palette.len(), 3);
        assert_eq!(variables.len(), universe.len() * palette.len());

        for (position, edge) in universe.edges().iter().enumerate() {
            for color in palette.ids() {
                let var = variables.at(position, color).unwrap();
                assert_eq!((var.edge, var.color), (*edge, color));
                assert_eq!(variables.lookup(var.var), Some(var));
            }
        }
        assert_eq!(variables.at(0, 3), None);
    }

    #[test]
    fn palette_in_first_occurrence_order() {
        let grid = parse("3
B 0 A
A 0 C
B C 0
");
        let palette = Palette::extract(&grid);

        assert_eq!(palette.ids().map(|color| palette.name(color)).collect::<Vec<_>>(), vec!["B", "A", "C"]);
        assert_eq!(palette.id_of("C"), Some(2));
        assert_eq!(palette.id_of("0"), None);
        assert_eq!(palette.terminus_counts(&grid), vec![(0, 2), (1, 2), (2, 2)]);
    }

    #[test]
    fn alternative_counts() {
        let grid = parse("3
A B 0
0 0 0
0 B A
");
        let formula = build(&grid).unwrap();
        let at = |location: Location| formula.constraints().iter().find(|c| c.location == location).unwrap();

        // two colors: 1 + 2 * C(degree, 2)
        assert_eq!(at(Location(1, 1)).alternatives.len(), 1 + 2 * 6);
        assert_eq!(at(Location(1, 0)).alternatives.len(), 1 + 2 * 3);
        assert_eq!(at(Location(2, 0)).alternatives.len(), 1 + 2);
        assert!(at(Location(1, 1)).units.is_empty());

        // termini: one alternative per incident edge, one unit per foreign variable
        assert_eq!(at(Location(0, 0)).alternatives.len(), 2);
        assert_eq!(at(Location(0, 0)).units.len(), 2);
        assert_eq!(at(Location(0, 1)).alternatives.len(), 3);
        assert_eq!(at(Location(0, 1)).units.len(), 3);

        for alternative in &at(Location(0, 1)).alternatives {
            assert_eq!(alternative.iter().filter(|lit| lit.is_positive()).count(), 1);
            assert_eq!(alternative.len(), 3);
        }
    }

    #[test]
    fn formula_is_deterministic() {
        let grid = parse(CLASSIC_LEVEL_1);
        assert_eq!(build(&grid).unwrap(), build(&grid).unwrap());
        assert_eq!(build(&grid).unwrap().to_cnf().len(), build(&grid).unwrap().to_cnf().len());
    }

    #[test]
    fn relabeling_colors_keeps_formula() {
        let renamed = CLASSIC_LEVEL_1
            .replace('A', "red")
            .replace('B', "green")
            .replace('C', "blue")
            .replace('D', "yellow")
            .replace('E', "orange");

        let original = build(&parse(CLASSIC_LEVEL_1)).unwrap();
        let relabeled = build(&parse(&renamed)).unwrap();
        assert_eq!(original.constraints(), relabeled.constraints());
        assert_eq!(original.variables(), relabeled.variables());
    }

    #[test]
    fn permuting_colors_is_equisatisfiable() {
        // swapping which color is met first changes variable numbering but not the verdict
        let swapped = CLASSIC_LEVEL_1.replace('A', "x").replace('E', "A").replace('x', "E");
        assert_eq!(solve(CLASSIC_LEVEL_1).verdict(), Verdict::Sat);
        assert_eq!(solve(&swapped).verdict(), Verdict::Sat);

        let crossed = "2\nA B\nB A\n";
        let crossed_swapped = "2\nB A\nA B\n";
        assert_eq!(solve(crossed).verdict(), solve(crossed_swapped).verdict());
    }

    #[test]
    fn crossed_pairs_stay_unsat() {
        let grid = Grid::from_rows(NonZero::new(2).unwrap(), &[vec!["A", "B"], vec!["B", "A"]]).unwrap();
        let formula = build(&grid).unwrap();
        assert_eq!(formula.variables().len(), 4 * 2);

        for _ in 0..3 {
            assert_eq!(submit(&formula, &Settings::default()), Outcome::Unsat);
        }
    }

    #[test]
    fn corner_to_corner_path() {
        let grid = parse("3
X 0 0
0 0 0
0 0 X
");
        let outcome = grid.solve(&Settings::default()).unwrap();
        let assignment = outcome.assignment().unwrap();
        assert_locally_valid(&grid, assignment);

        // follow the path from one terminus and make sure it reaches the other
        let universe = EdgeUniverse::build(&grid).unwrap();
        let mut at = Location(0, 0);
        let mut came_by = None;
        for _ in 0..9 {
            if at == Location(2, 2) {
                break;
            }
            let next = universe.incident(at).into_iter()
                .find(|edge| Some(*edge) != came_by && assignment.carries(*edge, 0))
                .unwrap();
            let (origin, far) = (next.origin, next.far_end());
            at = if origin == at { far } else { origin };
            came_by = Some(next);
        }
        assert_eq!(at, Location(2, 2));
    }

    #[test]
    fn solve_classic() {
        let grid = parse(CLASSIC_LEVEL_1);
        assert_eq!(format!("{}", grid), "A 0 B 0 D
0 0 C 0 E
0 0 0 0 0
0 B 0 D 0
0 A C E 0
");

        let outcome = grid.solve(&Settings::default()).unwrap();
        assert_locally_valid(&grid, outcome.assignment().unwrap());
    }

    #[test]
    fn solve_with_timeout() {
        let settings = Settings { timeout: Some(Duration::from_secs(60)), ..Default::default() };
        let grid = Grid::parse(CLASSIC_LEVEL_1, &settings).unwrap();
        let outcome = grid.solve(&settings).unwrap();

        assert_eq!(outcome.verdict(), Verdict::Sat);
        assert_locally_valid(&grid, outcome.assignment().unwrap());
    }

    #[test]
    fn elapsed_timeout_is_unknown() {
        // 12x12, one pair per row: far too much to solve in no time at all
        let mut input = String::from("12\n");
        for row in 0..12 {
            let color = format!("c{}", row);
            let cells = (0..12)
                .map(|col| if col == 0 || col == 11 { color.as_str() } else { "0" })
                .collect::<Vec<_>>();
            input.push_str(&cells.join(" "));
            input.push('\n');
        }

        let settings = Settings { timeout: Some(Duration::ZERO), ..Default::default() };
        let grid = Grid::parse(&input, &settings).unwrap();
        let outcome = grid.solve(&settings).unwrap();

        assert_eq!(outcome, Outcome::Unknown);
        assert_eq!(outcome.verdict(), Verdict::Unknown);
        assert_eq!(outcome.verdict().to_string(), "unknown");
        assert!(outcome.assignment().is_none());
    }

    #[test]
    fn timeout_parsing() {
        assert_eq!(parse_timeout("2"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_timeout("0.25"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_timeout("0"), Ok(Duration::ZERO));
        for bad in ["-1", "NaN", "inf", "1e40", "", "soon"] {
            assert!(parse_timeout(bad).is_err(), "{}", bad);
        }
    }

    #[test]
    fn carries_outside_formula() {
        let formula = build(&parse("2\nA A\n0 0\n")).unwrap();
        let outcome = submit(&formula, &Settings::default());
        let assignment = outcome.assignment().unwrap();

        let top = Edge::between(Location(0, 0), Location(0, 1)).unwrap();
        let off_grid = Edge::between(Location(4, 4), Location(4, 5)).unwrap();
        assert!(!assignment.carries(top, 1));
        assert!(!assignment.carries(off_grid, 0));
        assert_eq!(formula.variables().get(top, 0), formula.variables().at(0, 0));
        assert_eq!(formula.variables().get(off_grid, 0), None);
    }

    #[test]
    fn assignment_values_match_carries() {
        let grid = parse("2\nA A\n0 0\n");
        let formula = build(&grid).unwrap();
        let outcome = submit(&formula, &Settings::default());
        let assignment = outcome.assignment().unwrap();
        assert_locally_valid(&grid, assignment);

        // either straight across the top, or around through the bottom row
        assert!(assignment.true_vars().count() == 1 || assignment.true_vars().count() == 3);
        for var in formula.variables().iter() {
            assert_eq!(assignment.value(var), assignment.carries(var.edge, var.color));
        }
    }

    #[test]
    fn missing_row_is_malformed() {
        let err = Grid::parse("3\n0 0 0\n0 0 0\n", &Settings::default()).unwrap_err();
        assert!(matches!(err, PuzzleError::MalformedInput { line: 4, .. }), "{:?}", err);
    }

    #[test]
    fn short_row_is_malformed() {
        let err = Grid::parse("2\n0 0\n0\n", &Settings::default()).unwrap_err();
        assert!(matches!(err, PuzzleError::MalformedInput { line: 3, .. }), "{:?}", err);
    }

    #[test]
    fn bad_size_line_is_malformed() {
        for input in ["", "x\n0\n", "0\n", "-1\n0\n"] {
            let err = Grid::parse(input, &Settings::default()).unwrap_err();
            assert!(matches!(err, PuzzleError::MalformedInput { line: 1, .. }), "{:?}", err);
        }
    }

    #[test]
    fn trailing_blank_lines_ignored() {
        assert_eq!(parse("2\nA A\n0 0\n\n\n"), parse("2\nA A\n0 0"));
    }

    #[test]
    fn rectangular_grid_rejected() {
        let grid = Grid::from_array(Array2::from_elem((2, 3), Label::Empty));
        assert!(matches!(build(&grid), Err(PuzzleError::NonSquareGrid { height: 2, width: 3 })));
        assert!(matches!(grid.solve(&Settings::default()), Err(PuzzleError::NonSquareGrid { .. })));
    }

    #[test]
    fn no_space_separator() {
        let settings = Settings { separator: Separator::NoSpace, ..Default::default() };
        let grid = Grid::parse("3\nA0A\n000\n000\n", &settings).unwrap();

        assert_eq!(grid.label(Location(0, 2)), Some(&Label::Color("A".to_owned())));
        assert_eq!(grid.render(Separator::NoSpace), "A0A\n000\n000\n");
        assert_eq!(grid.solve(&settings).unwrap().verdict(), Verdict::Sat);
    }

    #[test]
    fn unpaired_color() {
        let input = "2\nA 0\n0 0\n";
        // permitted by default, but a lone terminus can never be joined
        assert_eq!(solve(input), Outcome::Unsat);

        let strict = Settings { strict_pairs: true, ..Default::default() };
        let err = Grid::parse(input, &strict).unwrap_err();
        assert!(matches!(err, PuzzleError::UnpairedColor { ref color, count: 1 } if color == "A"), "{:?}", err);
        assert!(Grid::parse(CLASSIC_LEVEL_1, &strict).is_ok());
    }

    #[test]
    fn blocked_pair_is_unsat() {
        // B walls A off from its partner
        assert_eq!(solve("3
A B 0
B 0 0
0 0 A
"), Outcome::Unsat);
    }

    #[test]
    fn formula_of_fresh_grid_is_independent() {
        let first = Formula::build(&parse("2\nA A\n0 0\n")).unwrap();
        let second = Formula::build(&parse("2\nA 0\nA 0\n")).unwrap();
        assert_eq!(first.variables(), second.variables());
        assert_ne!(first.constraints(), second.constraints());
    }
}

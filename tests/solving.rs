//! End-to-end solving scenarios driving the full stack: scripting a space,
//! distribution, and the search drivers.

use emerald_solver::distribute;
use emerald_solver::BranchAndBound;
use emerald_solver::CmpOp;
use emerald_solver::DepthFirstSearch;
use emerald_solver::Domain;
use emerald_solver::SearchResult;
use emerald_solver::Solution;
use emerald_solver::SolvedTest;
use emerald_solver::Space;
use emerald_solver::SpaceStatus;
use emerald_solver::VarName;
use emerald_solver::SUP;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn names(list: &[&str]) -> Vec<VarName> {
    list.iter().map(|&name| VarName::from(name)).collect()
}

#[test]
fn simple_plus_is_solved_by_propagation_alone() {
    init_logging();
    let mut space = Space::new();
    let _ = space.num("X", 3).expect("in range");
    let _ = space.num("Z", 10).expect("in range");
    let _ = space.decl("Y");
    let _ = space.plus_into("X", "Y", "Z");

    let mut search = DepthFirstSearch::new(space);
    match search.next_solution() {
        SearchResult::Solved { solution, more } => {
            assert_eq!(solution.get_integer_value("X"), 3);
            assert_eq!(solution.get_integer_value("Y"), 7);
            assert_eq!(solution.get_integer_value("Z"), 10);
            assert!(!more);
        }
        SearchResult::Exhausted => panic!("expected a solution"),
    }
}

#[test]
fn infeasible_plus_exhausts_without_solutions() {
    init_logging();
    let mut space = Space::new();
    let _ = space.num("X", 13).expect("in range");
    let _ = space.num("Z", 10).expect("in range");
    let _ = space.decl("Y");
    let _ = space.plus_into("X", "Y", "Z");

    let mut search = DepthFirstSearch::new(space);
    assert!(matches!(search.next_solution(), SearchResult::Exhausted));
}

#[test]
fn distinct_sum_enumerates_only_valid_pairs() {
    init_logging();
    let mut space = Space::new();
    let _ = space.decl_with("A", Domain::range(0, 10));
    let _ = space.decl_with("B", Domain::range(0, 10));
    let pair = names(&["A", "B"]);
    let _ = space.distinct(&pair);
    let _ = space.plus_into("A", "B", "C");
    let decisions = names(&["A", "B", "C"]);
    distribute::fail_first(&mut space, &decisions);

    let mut search = DepthFirstSearch::new(space);
    let solutions = search.all_solutions();

    // 11 * 11 pairs minus the 11 diagonal ones.
    assert_eq!(solutions.len(), 110);
    for solution in &solutions {
        let a = solution.get_integer_value("A");
        let b = solution.get_integer_value("B");
        let c = solution.get_integer_value("C");
        assert_ne!(a, b);
        assert_eq!(a + b, c);
    }
}

#[test]
fn send_more_money_has_the_classic_first_solution() {
    init_logging();
    let mut space = Space::new();
    let letters = names(&["S", "E", "N", "D", "M", "O", "R", "Y"]);
    for letter in &letters {
        let _ = space.decl_with(letter, Domain::range(0, 9));
    }
    // Leading digits cannot be zero.
    let _ = space.decl_with("S", Domain::range(1, 9));
    let _ = space.decl_with("M", Domain::range(1, 9));
    let _ = space.distinct(&letters);

    let send = space
        .wsum(&[1000, 100, 10, 1], &names(&["S", "E", "N", "D"]))
        .expect("well-formed");
    let more = space
        .wsum(&[1000, 100, 10, 1], &names(&["M", "O", "R", "E"]))
        .expect("well-formed");
    let money = space
        .wsum(&[10000, 1000, 100, 10, 1], &names(&["M", "O", "N", "E", "Y"]))
        .expect("well-formed");
    let _ = space.plus_into(send, more, money);

    distribute::fail_first(&mut space, &letters);

    let mut search = DepthFirstSearch::with_solved_test(
        space,
        SolvedTest::for_variables(letters.iter().cloned()),
    );
    match search.next_solution() {
        SearchResult::Solved { solution, .. } => {
            assert_eq!(solution.get_integer_value("S"), 9);
            assert_eq!(solution.get_integer_value("E"), 5);
            assert_eq!(solution.get_integer_value("N"), 6);
            assert_eq!(solution.get_integer_value("D"), 7);
            assert_eq!(solution.get_integer_value("M"), 1);
            assert_eq!(solution.get_integer_value("O"), 0);
            assert_eq!(solution.get_integer_value("R"), 8);
            assert_eq!(solution.get_integer_value("Y"), 2);
        }
        SearchResult::Exhausted => panic!("SEND + MORE = MONEY is satisfiable"),
    }
}

#[test]
fn reified_less_than_with_a_false_boolean_enforces_the_complement() {
    init_logging();
    let mut space = Space::new();
    let _ = space.decl_with("X", Domain::range(1, 10));
    let _ = space.decl_with("Y", Domain::range(5, 6));
    let _ = space.decl_with("Z", Domain::singleton(0));
    let _ = space.reified_into(CmpOp::Lt, "X", "Y", "Z");
    let decisions = names(&["X", "Y"]);
    distribute::fail_first(&mut space, &decisions);

    let mut search = DepthFirstSearch::new(space);
    let solutions = search.all_solutions();

    // X >= Y over X in [5, 10], Y in {5, 6}.
    assert_eq!(solutions.len(), 11);
    for solution in &solutions {
        assert!(solution.get_integer_value("X") >= solution.get_integer_value("Y"));
        assert_eq!(solution.get_integer_value("Z"), 0);
    }
}

fn queens_space(count: usize) -> (Space, Vec<VarName>) {
    let mut space = Space::new();
    let rows: Vec<VarName> = (1..=count)
        .map(|i| VarName::from(format!("R{i}")))
        .collect();
    for row in &rows {
        let _ = space.decl_with(row, Domain::range(1, count as u64));
    }
    let _ = space.distinct(&rows);
    // No two queens share a diagonal: Ri + (i - j) != Rj and
    // Rj + (i - j) != Ri for i > j.
    for i in 0..count {
        for j in 0..i {
            let offset = space.konst((i - j) as u64).expect("in range");
            let shifted_i = space.plus(&rows[i], offset.clone());
            let _ = space.neq(shifted_i, &rows[j]);
            let shifted_j = space.plus(&rows[j], offset);
            let _ = space.neq(shifted_j, &rows[i]);
        }
    }
    (space, rows)
}

fn assert_valid_placement(solution: &Solution, rows: &[VarName]) {
    let positions: Vec<u64> = rows
        .iter()
        .map(|row| solution.get_integer_value(&row.to_string()))
        .collect();
    for i in 0..positions.len() {
        for j in 0..i {
            assert_ne!(positions[i], positions[j], "same column");
            assert_ne!(
                positions[i].abs_diff(positions[j]),
                (i - j) as u64,
                "same diagonal"
            );
        }
    }
}

#[test]
fn eight_queens_first_solution_is_a_valid_placement() {
    init_logging();
    let (mut space, rows) = queens_space(8);
    distribute::fail_first(&mut space, &rows);

    let mut search =
        DepthFirstSearch::with_solved_test(space, SolvedTest::for_variables(rows.iter().cloned()));
    match search.next_solution() {
        SearchResult::Solved { solution, more } => {
            assert_valid_placement(&solution, &rows);
            assert!(more, "more than one placement exists");
        }
        SearchResult::Exhausted => panic!("8-queens is satisfiable"),
    }
}

#[test]
fn eight_queens_has_ninety_two_solutions() {
    init_logging();
    let (mut space, rows) = queens_space(8);
    distribute::fail_first(&mut space, &rows);

    let mut search =
        DepthFirstSearch::with_solved_test(space, SolvedTest::for_variables(rows.iter().cloned()));
    let solutions = search.all_solutions();
    assert_eq!(solutions.len(), 92);
    for solution in &solutions {
        assert_valid_placement(solution, &rows);
    }
}

#[test]
fn branch_and_bound_maximizes_the_sum() {
    init_logging();
    let mut space = Space::new();
    let _ = space.decl_with("X", Domain::range(1, 5));
    let _ = space.decl_with("Y", Domain::range(1, 5));
    let _ = space.decl_with("A", Domain::range(1, 5));
    let _ = space.plus_into("X", "Y", "Z");
    let _ = space.neq("X", "A");
    let decisions = names(&["X", "Y", "A"]);
    distribute::naive(&mut space, &decisions);

    let mut search = BranchAndBound::new(space, |space: &mut Space, best: &Solution| {
        let incumbent = best.get_integer_value("Z");
        let _ = space.constrain(&"Z".into(), &Domain::range(incumbent + 1, SUP));
    });
    let best = search.run().expect("satisfiable");
    assert_eq!(best.get_integer_value("Z"), 10);
    assert_ne!(best.get_integer_value("X"), best.get_integer_value("A"));
}

#[test]
fn propagation_is_idempotent_at_fixpoint() {
    init_logging();
    let mut space = Space::new();
    let _ = space.decl_with("X", Domain::range(0, 9));
    let _ = space.decl_with("Y", Domain::range(3, 12));
    let _ = space.lt("X", "Y");
    let _ = space.plus_into("X", "Y", "S");

    let first = space.propagate();
    assert_eq!(first, SpaceStatus::Stable);
    assert_eq!(space.propagate(), first);
}

#[test]
fn a_stable_space_reports_unresolved_domains() {
    init_logging();
    let mut space = Space::new();
    let _ = space.decl_with("X", Domain::range(0, 5));
    let _ = space.decl_with("Y", Domain::range(2, 2));
    let _ = space.gte("X", "Y");

    assert_eq!(space.propagate(), SpaceStatus::Stable);
    let solution = space.solution();
    assert_eq!(
        solution.get("X"),
        Some(&emerald_solver::SolutionValue::Unresolved(Domain::range(2, 5)))
    );
    assert_eq!(
        solution.get("Y"),
        Some(&emerald_solver::SolutionValue::Assigned(2))
    );
}

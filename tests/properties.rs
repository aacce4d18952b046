use gcl::{Arrays, Channels, Program, Variables, build_cfg, run};
use proptest::prelude::*;

fn sort(values: &[i64]) -> Vec<i64> {
    let program = Program::read_file("tests/programs/insertionsort.gc").unwrap();
    let n = i64::try_from(values.len()).unwrap();
    let memory = program.run(Variables::from([("n".to_string(), n)]),
                             Arrays::from([("A".to_string(), values.to_vec())]),
                             Channels::new())
                        .unwrap();
    memory.read_array("A").unwrap().to_vec()
}

proptest! {
    #[test]
    fn division_truncates_toward_zero(a in -1000i64..1000,
                                      b in (-50i64..50).prop_filter("non-zero divisor", |b| *b != 0)) {
        let memory = run("q := a / b; r := a % b",
                         Variables::from([("a".to_string(), a), ("b".to_string(), b)]),
                         Arrays::new(),
                         Channels::new()).unwrap();
        let q = memory.read_var("q").unwrap();
        let r = memory.read_var("r").unwrap();

        prop_assert_eq!(q * b + r, a);
        prop_assert!(r.abs() < b.abs());
        prop_assert!(r == 0 || r.signum() == a.signum(), "{a} % {b} = {r}");
    }

    #[test]
    fn insertion_sort_sorts_a_permutation(values in Just((0..20).collect::<Vec<i64>>()).prop_shuffle()) {
        let sorted = sort(&values);
        prop_assert_eq!(sorted, (0..20).collect::<Vec<i64>>());
    }

    #[test]
    fn insertion_sort_matches_std(values in prop::collection::vec(-100i64..100, 0..30)) {
        let mut expected = values.clone();
        expected.sort_unstable();

        let sorted = sort(&values);
        prop_assert_eq!(&sorted, &expected);
        prop_assert_eq!(sort(&sorted), expected);
    }

    #[test]
    fn straight_line_graphs_are_paths(count in 1usize..20) {
        let source = (0..count).map(|i| format!("x{i} := {i}"))
                               .collect::<Vec<_>>()
                               .join("; ");
        let graph = build_cfg(&source).unwrap();

        prop_assert_eq!(graph.edge_count(), count);
        prop_assert_eq!(graph.node_count(), count + 1);
    }
}

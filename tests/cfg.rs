use std::fs;

use gcl::{
    Error, Program, build_cfg,
    cfg::{Action, ProgramGraph, ProgramPoint},
    error::GraphError,
};
use petgraph::algo::has_path_connecting;
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

fn edge(from: &str, to: &str, label: &str) -> (String, String, String) {
    (from.to_string(), to.to_string(), label.to_string())
}

fn graph_of(src: &str) -> ProgramGraph {
    build_cfg(src).unwrap_or_else(|e| panic!("Failed to build graph: {e}\n{src}"))
}

/// Every intermediate point lies on a path: something enters it and something
/// leaves it.
fn assert_connected(graph: &ProgramGraph) {
    assert!(!graph.out_edges(graph.entry()).is_empty(), "entry has no outgoing edge");
    assert!(!graph.in_edges(graph.exit()).is_empty(), "exit has no incoming edge");

    for node in graph.node_indices() {
        if let ProgramPoint::Point(n) = graph.point(node) {
            assert!(!graph.in_edges(node).is_empty(), "q{n} has no incoming edge");
            assert!(!graph.out_edges(node).is_empty(), "q{n} has no outgoing edge");
        }
    }
}

#[test]
fn factorial_graph() {
    let graph = Program::read_file("tests/programs/factorial.gc").unwrap()
                                                                 .build_cfg()
                                                                 .unwrap();

    assert_eq!(graph.node_count(), 5);
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.nodes(), vec!["Entry", "Exit", "q1", "q2", "q3"]);
    assert_eq!(graph.edges(),
               vec![edge("Entry", "q1", "y := 1"),
                    edge("q1", "q2", "x > 0"),
                    edge("q2", "q3", "y := x * y"),
                    edge("q3", "q1", "x := x - 1"),
                    edge("q1", "Exit", "!(x > 0)"),]);
}

#[test]
fn loop_exit_edge_carries_the_negated_guard() {
    let graph = graph_of("do x > 0 -> x := x - 1 od");
    let exits = graph.in_edges(graph.exit());

    assert_eq!(exits.len(), 1);
    let Action::Guard(guard) = &exits[0].action else {
        panic!("expected a guard edge, found {}", exits[0].label);
    };
    assert_eq!(guard.to_string(), "!(x > 0)");
}

#[test]
fn alternation_has_no_false_edge() {
    let graph = graph_of("if x > 0 -> y := 1 fi");

    assert_eq!(graph.edges(),
               vec![edge("Entry", "q1", "x > 0"), edge("q1", "Exit", "y := 1")]);
    assert_eq!(graph.out_edges(graph.entry()).len(), 1);
}

#[test]
fn sequence_allocates_a_middle_point() {
    let graph = graph_of("x := 1; y := 2; skip");

    assert_eq!(graph.edges(),
               vec![edge("Entry", "q1", "x := 1"),
                    edge("q1", "q2", "y := 2"),
                    edge("q2", "Exit", "skip"),]);
}

#[test]
fn leaf_commands_are_single_edges() {
    let graph = graph_of("do true -> if x = 0 -> break fi; continue od");

    let labels: Vec<String> = graph.edges().into_iter().map(|(_, _, l)| l).collect();
    assert!(labels.contains(&"break".to_string()));
    assert!(labels.contains(&"continue".to_string()));
    assert!(labels.contains(&"!true".to_string()));
}

#[test]
fn program_points_are_numbered_from_one() {
    let graph = graph_of("x := 1; y := 2");
    let ids: Vec<i64> = graph.node_indices().map(|n| graph.point(n).id()).collect();

    assert_eq!(ids, vec![0, -1, 1]);
}

#[test]
fn several_guards_are_unsupported() {
    let err = build_cfg("if x > 0 -> y := 1 [] x <= 0 -> y := 2 fi").unwrap_err();
    assert!(matches!(err, Error::Graph(GraphError::UnsupportedConstruct { line: 1, .. })),
            "{err}");

    let err = build_cfg("x := 1;\ndo x > 0 -> x := x - 1 [] x < 0 -> x := x + 1 od").unwrap_err();
    assert!(matches!(err, Error::Graph(GraphError::UnsupportedConstruct { line: 2, .. })),
            "{err}");
}

#[test]
fn building_does_not_run_the_program() {
    // Undefined names and a zero divisor only matter at run time.
    let graph = graph_of("x := y / 0");
    assert_eq!(graph.edges(), vec![edge("Entry", "Exit", "x := y / 0")]);
}

#[test]
fn dot_export() {
    let dot = graph_of("y := 1; do x > 0 -> x := x - 1 od").to_dot();

    assert_eq!(dot,
               "digraph program_graph {
  Entry;
  Exit;
  q1;
  q2;
  Entry -> q1 [label=\"y := 1\"];
  q1 -> q2 [label=\"x > 0\"];
  q2 -> q1 [label=\"x := x - 1\"];
  q1 -> Exit [label=\"!(x > 0)\"];
}");
}

#[test]
fn program_corpus_graphs_are_connected() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/programs").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "gc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;

        let graph = build_cfg(&content).unwrap_or_else(|e| panic!("{path:?}: {e}"));
        assert_eq!(graph.edge_count(), graph.edges().len());
        assert_connected(&graph);
        assert!(has_path_connecting(graph.as_graph(), graph.entry(), graph.exit(), None),
                "{path:?}: exit is unreachable from entry");
    }

    assert!(count > 0, "No programs found in tests/programs");
}

#[test]
fn long_sequences_build_a_path() {
    let src = (0..10_000).map(|i| format!("x{} := {i}", i % 10))
                         .collect::<Vec<_>>()
                         .join(";\n");
    let graph = graph_of(&src);

    assert_eq!(graph.node_count(), 10_001);
    assert_eq!(graph.edge_count(), 10_000);
    assert_eq!(graph.out_edges(graph.entry())[0].label, "x0 := 0");
    assert_eq!(graph.in_edges(graph.exit())[0].label, "x9 := 9999");
    assert!(has_path_connecting(graph.as_graph(), graph.entry(), graph.exit(), None));
}

use std::fs;

use gcl::{
    Arrays, Channel, Channels, Error, Memory, Program, Variables,
    error::{ParseError, RuntimeError},
    run,
};
use walkdir::WalkDir;

fn vars(pairs: &[(&str, i64)]) -> Variables {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

fn arrays(pairs: &[(&str, &[i64])]) -> Arrays {
    pairs.iter().map(|(k, v)| ((*k).to_string(), v.to_vec())).collect()
}

fn assert_success(src: &str, initial: &[(&str, i64)], arrs: &[(&str, &[i64])]) -> Memory {
    match run(src, vars(initial), arrays(arrs), Channels::new()) {
        Ok(memory) => memory,
        Err(e) => panic!("Program failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str, initial: &[(&str, i64)], arrs: &[(&str, &[i64])]) -> Error {
    match run(src, vars(initial), arrays(arrs), Channels::new()) {
        Ok(memory) => panic!("Program succeeded but was expected to fail:\n{src}\n{memory}"),
        Err(e) => e,
    }
}

fn runtime_error(src: &str, initial: &[(&str, i64)]) -> RuntimeError {
    match assert_failure(src, initial, &[]) {
        Error::Runtime(e) => e,
        other => panic!("Expected a runtime error, got: {other}"),
    }
}

fn load(name: &str) -> Program {
    Program::read_file(format!("tests/programs/{name}")).unwrap_or_else(|e| {
                                                            panic!("Failed to read {name}: {e}")
                                                        })
}

#[test]
fn program_corpus_parses() {
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

        if let Err(e) = Program::new(content).parse() {
            panic!("{path:?} failed to parse: {e}");
        }
    }

    assert!(count > 0, "No programs found in tests/programs");
}

#[test]
fn assignment_and_basic_arithmetic() {
    let memory = assert_success("x := (1+1)*3/2-2%2", &[], &[]);
    assert_eq!(memory.read_var("x"), Some(3));

    let memory = assert_success("a := 1 + 2 * 3; b := (1 + 2) * 3; c := 10 - 4 - 3; d := --4",
                                &[],
                                &[]);
    assert_eq!(memory.read_var("a"), Some(7));
    assert_eq!(memory.read_var("b"), Some(9));
    assert_eq!(memory.read_var("c"), Some(3));
    assert_eq!(memory.read_var("d"), Some(4));
}

#[test]
fn division_truncates_toward_zero() {
    let memory = assert_success("a := -7 / 2; b := -7 % 2; c := 7 / -2; d := 7 % -2", &[], &[]);
    assert_eq!(memory.read_var("a"), Some(-3));
    assert_eq!(memory.read_var("b"), Some(-1));
    assert_eq!(memory.read_var("c"), Some(-3));
    assert_eq!(memory.read_var("d"), Some(1));
}

#[test]
fn factorial() {
    let program = load("factorial.gc");

    let memory = program.run(vars(&[("x", 5)]), Arrays::new(), Channels::new())
                        .unwrap();
    assert_eq!(memory.read_var("y"), Some(120));
    assert_eq!(memory.read_var("x"), Some(0));

    let memory = program.run(vars(&[("x", 0)]), Arrays::new(), Channels::new())
                        .unwrap();
    assert_eq!(memory.read_var("y"), Some(1));
}

#[test]
fn loop_with_compound_guard() {
    let src = "y := 1; do x > 0 & true -> y := x * y; x := x - 1 od";
    assert_eq!(assert_success(src, &[("x", 5)], &[]).read_var("y"), Some(120));
    assert_eq!(assert_success(src, &[("x", 0)], &[]).read_var("y"), Some(1));
}

#[test]
fn alternation() {
    let src = "y := 1; if x > 0 & y < 2 -> y := x * y; x := x - 1 fi";

    let memory = assert_success(src, &[("x", -1)], &[]);
    assert_eq!(memory.read_var("y"), Some(1));
    assert_eq!(memory.read_var("x"), Some(-1));

    let memory = assert_success(src, &[("x", 100)], &[]);
    assert_eq!(memory.read_var("y"), Some(100));
    assert_eq!(memory.read_var("x"), Some(99));
}

#[test]
fn false_guard_leaves_memory_unchanged() {
    let memory = assert_success("if false -> x := 1; y := 2 fi", &[("x", 7)], &[]);
    assert_eq!(memory.vars(), &vars(&[("x", 7)]));
}

#[test]
fn array_assignment() {
    let memory = assert_success("a[0] := 2; a[1] := 4; a[2] := a[1] + 1",
                                &[],
                                &[("a", &[1, 2, 3])]);
    assert_eq!(memory.read_array("a"), Some(&[2, 4, 5][..]));
}

#[test]
fn out_of_range_writes_are_ignored() {
    let memory = assert_success("a[3] := 9; a[-1] := 9; b[0] := 9", &[], &[("a", &[1, 2, 3])]);
    assert_eq!(memory.read_array("a"), Some(&[1, 2, 3][..]));
    assert_eq!(memory.read_array("b"), None);
}

#[test]
fn out_of_range_reads_are_absent() {
    let err = runtime_error("x := a[5]", &[]);
    assert!(matches!(err, RuntimeError::TypeMismatch { line: 1, .. }), "{err}");

    let err = runtime_error("if a[5] < 0 -> skip fi", &[]);
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }), "{err}");

    let memory = assert_success("if A[5] = 0 -> x := 1 fi", &[("x", 0)], &[("A", &[1, 2, 3])]);
    assert_eq!(memory.read_var("x"), Some(0));

    let memory = assert_success("if A[5] != 0 -> x := 1 fi", &[("x", 0)], &[("A", &[1, 2, 3])]);
    assert_eq!(memory.read_var("x"), Some(1));

    let memory = assert_success("if a[5] = b[2] -> x := 1 fi", &[("x", 0)], &[]);
    assert_eq!(memory.read_var("x"), Some(1));
}

#[test]
fn absent_values_print_as_absent() {
    let (_, out) = Program::new("print A[7]; print A[0]")
        .run_with_output(Variables::new(), arrays(&[("A", &[1, 2, 3])]), Channels::new(), Vec::new())
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "absent\n1\n");
}

#[test]
fn search_runs_past_the_end_of_the_array() {
    let memory = load("search.gc").run(vars(&[("n", 5), ("key", 9)]),
                                       arrays(&[("A", &[1, 2, 3])]),
                                       Channels::new())
                                  .unwrap();
    assert_eq!(memory.read_var("pos"), Some(-1));
    assert_eq!(memory.read_var("i"), Some(5));
}

#[test]
fn break_leaves_the_innermost_loop() {
    let src = load("search.gc");
    let array: &[i64] = &[4, 8, 15, 16, 23, 42];

    let memory = src.run(vars(&[("n", 6), ("key", 16)]),
                         arrays(&[("A", array)]),
                         Channels::new())
                    .unwrap();
    assert_eq!(memory.read_var("pos"), Some(3));
    assert_eq!(memory.read_var("i"), Some(3));

    let memory = src.run(vars(&[("n", 6), ("key", 5)]),
                         arrays(&[("A", array)]),
                         Channels::new())
                    .unwrap();
    assert_eq!(memory.read_var("pos"), Some(-1));
    assert_eq!(memory.read_var("i"), Some(6));
}

#[test]
fn break_in_nested_loops() {
    let src = "i := 0; n := 0;
               do i < 3 ->
                   j := 0;
                   do true -> if j = 2 -> break fi; j := j + 1; n := n + 1 od;
                   i := i + 1
               od";
    let memory = assert_success(src, &[], &[]);
    assert_eq!(memory.read_var("i"), Some(3));
    assert_eq!(memory.read_var("n"), Some(6));
}

#[test]
fn continue_skips_the_rest_of_the_body() {
    let memory = load("evensum.gc").run(vars(&[("n", 10)]), Arrays::new(), Channels::new())
                                   .unwrap();
    assert_eq!(memory.read_var("s"), Some(30));
}

#[test]
fn gcd() {
    let memory = load("gcd.gc").run(vars(&[("a", 84), ("b", 36)]), Arrays::new(), Channels::new())
                               .unwrap();
    assert_eq!(memory.read_var("a"), Some(12));
    assert_eq!(memory.read_var("b"), Some(12));
}

#[test]
fn short_circuit_operators_skip_the_right_operand() {
    assert_success("if false && undefined > 0 -> x := 1 fi", &[], &[]);
    assert_success("if true || undefined > 0 -> x := 1 fi", &[], &[]);

    let err = runtime_error("if false & undefined > 0 -> x := 1 fi", &[]);
    assert_eq!(err,
               RuntimeError::UndefinedVariable { name: "undefined".to_string(),
                                                 line: 1, });
    let err = runtime_error("if true | undefined > 0 -> x := 1 fi", &[]);
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn boolean_operators() {
    let src = "if (x > 0 | x < -10) & !(x = 5) -> r := 1 fi";
    assert_eq!(assert_success(src, &[("x", 3), ("r", 0)], &[]).read_var("r"), Some(1));
    assert_eq!(assert_success(src, &[("x", 5), ("r", 0)], &[]).read_var("r"), Some(0));
    assert_eq!(assert_success(src, &[("x", -11), ("r", 0)], &[]).read_var("r"), Some(1));
    assert_eq!(assert_success(src, &[("x", -3), ("r", 0)], &[]).read_var("r"), Some(0));
}

#[test]
fn parenthesized_arithmetic_in_guard() {
    let memory = assert_success("if (x + 1) * 2 >= 8 -> r := 1 fi", &[("x", 3)], &[]);
    assert_eq!(memory.read_var("r"), Some(1));
}

#[test]
fn several_guards_are_unsupported() {
    let err = runtime_error("if x > 0 -> y := 1 [] x <= 0 -> y := 2 fi", &[("x", 1)]);
    assert!(matches!(err, RuntimeError::UnsupportedConstruct { line: 1, .. }), "{err}");

    let err = runtime_error("do x > 0 -> x := x - 1 [] x < 0 -> x := x + 1 od", &[("x", 1)]);
    assert!(matches!(err, RuntimeError::UnsupportedConstruct { .. }), "{err}");
}

#[test]
fn undefined_variable() {
    let err = runtime_error("x := 1;\ny := z + 1", &[]);
    assert_eq!(err,
               RuntimeError::UndefinedVariable { name: "z".to_string(),
                                                 line: 2, });
}

#[test]
fn guards_must_be_boolean() {
    assert!(matches!(assert_failure("if x -> skip fi", &[("x", 1)], &[]),
                     Error::Parse(ParseError::ExpectedToken { .. })));
}

#[test]
fn absent_values_do_not_mix_with_integers() {
    let err = runtime_error("x := a[0] + 1", &[]);
    assert_eq!(err.to_string(),
               "Error on line 1: Type mismatch: Cannot use + on absent value and integer.");
}

#[test]
fn arithmetic_faults() {
    assert_eq!(runtime_error("x := 1 / 0", &[]),
               RuntimeError::DivisionByZero { line: 1 });
    assert_eq!(runtime_error("x := 1 % (y - y)", &[("y", 3)]),
               RuntimeError::DivisionByZero { line: 1 });
    assert!(matches!(runtime_error("x := y * y", &[("y", i64::MAX)]),
                     RuntimeError::Overflow { .. }));
}

#[test]
fn end_of_input_reports_the_last_line() {
    let Error::Parse(err) = assert_failure("x := 1;", &[], &[]) else {
        panic!("expected a parse error");
    };
    assert!(matches!(err, ParseError::UnexpectedEndOfInput { line: 1 }), "{err}");

    let Error::Parse(err) = assert_failure("x := 1;\ny :=", &[], &[]) else {
        panic!("expected a parse error");
    };
    assert_eq!(err.line(), 2);
    assert_eq!(err.to_string(), "Error on line 2: Unexpected end of input.");

    let Error::Parse(err) = assert_failure("", &[], &[]) else {
        panic!("expected a parse error");
    };
    assert_eq!(err.line(), 1);
}

#[test]
fn long_programs_do_not_exhaust_the_stack() {
    let src = (0..10_000).map(|i| format!("x{} := {i}", i % 10))
                         .collect::<Vec<_>>()
                         .join(";\n");

    let program = Program::new(src.clone());
    assert_eq!(program.code(), src);
    assert!(program.parse().unwrap().to_string().starts_with("x0 := 0; x1 := 1"));

    let memory = program.run(Variables::new(), Arrays::new(), Channels::new())
                        .unwrap();
    assert_eq!(memory.read_var("x9"), Some(9999));
    assert_eq!(memory.read_var("x0"), Some(9990));

    let err = runtime_error(&format!("{src};\nx := undefined"), &[]);
    assert_eq!(err,
               RuntimeError::UndefinedVariable { name: "undefined".to_string(),
                                                 line: 10_001, });
}

#[test]
fn program_text_is_kept_verbatim() {
    let program = load("factorial.gc");
    assert_eq!(program.code(),
               fs::read_to_string("tests/programs/factorial.gc").unwrap());
}

#[test]
fn parse_errors() {
    assert!(matches!(assert_failure("x := ", &[], &[]),
                     Error::Parse(ParseError::UnexpectedEndOfInput { .. })));
    assert!(matches!(assert_failure("if x > 0 -> skip", &[], &[]),
                     Error::Parse(_)));
    assert!(matches!(assert_failure("skip fi", &[], &[]),
                     Error::Parse(ParseError::UnexpectedTrailingTokens { .. })));
    assert!(matches!(assert_failure("x := 99999999999999999999", &[], &[]),
                     Error::Parse(ParseError::LiteralTooLarge { .. })));
    assert!(matches!(assert_failure("x := 1 $ 2", &[], &[]),
                     Error::Parse(ParseError::UnexpectedToken { .. })));
}

#[test]
fn print_writes_to_the_output() {
    let (memory, out) = Program::new("i := 0; do i < 3 -> print i * i; i := i + 1 od")
        .run_with_output(Variables::new(), Arrays::new(), Channels::new(), Vec::new())
        .unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "0\n1\n4\n");
    assert_eq!(memory.read_var("i"), Some(3));
}

#[test]
fn channels_are_carried_unchanged() {
    let channels = Channels::from([(Channel::In, vec![1, 2, 3])]);
    let memory = load("channels.gc").run(vars(&[("x", 4)]), arrays(&[("A", &[0])]), channels)
                                    .unwrap();

    assert_eq!(memory.read_channel(Channel::In), Some(&[1, 2, 3][..]));
    assert_eq!(memory.read_channel(Channel::Out), Some(&[] as &[i64]));
    assert_eq!(memory.read_var("x"), Some(4));

    let err = runtime_error("read x", &[]);
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn runs_do_not_share_state() {
    let program = Program::new("x := x + 1");
    let first = program.run(vars(&[("x", 1)]), Arrays::new(), Channels::new())
                       .unwrap();
    let second = program.run(vars(&[("x", 1)]), Arrays::new(), Channels::new())
                        .unwrap();

    assert_eq!(first, second);
    assert_eq!(second.read_var("x"), Some(2));
}

use std::io::Cursor;

use rill::{HostIo, Session, SharedWriter};

struct Outcome {
    output:            String,
    had_error:         bool,
    had_runtime_error: bool,
    diagnostics:       Vec<String>,
}

fn run_with_input(source: &str, input: &str) -> Outcome {
    let writer = SharedWriter::new();
    let io = HostIo::new(Box::new(Cursor::new(input.as_bytes().to_vec())),
                         Box::new(writer.clone()));

    let mut session = Session::new(io);
    session.run(source);

    Outcome { output:            writer.contents(),
              had_error:         session.had_error(),
              had_runtime_error: session.had_runtime_error(),
              diagnostics:       session.drain_diagnostics(), }
}

fn run(source: &str) -> Outcome {
    run_with_input(source, "")
}

fn assert_prints(source: &str, expected: &str) {
    let outcome = run(source);
    assert!(!outcome.had_error && !outcome.had_runtime_error,
            "script failed: {:?}\nsource: {source}",
            outcome.diagnostics);
    assert_eq!(outcome.output, expected, "source: {source}");
}

fn assert_runtime_error(source: &str) {
    let outcome = run(source);
    assert!(outcome.had_runtime_error,
            "expected a runtime error, got output {:?}",
            outcome.output);
}

fn assert_static_error(source: &str) {
    let outcome = run(source);
    assert!(outcome.had_error,
            "expected a static error, got output {:?}",
            outcome.output);
}

#[test]
fn arithmetic_and_precedence() {
    assert_prints("println(1+2*3);", "7\n");
    assert_prints("println((1+2)*3);", "9\n");
    assert_prints("println(7 / 2);", "3.5\n");
    assert_prints("println(2^3^2);", "512\n");
    assert_prints("println(-2^2);", "-4\n");
    assert_prints("println(10 - 2 - 3);", "5\n");
}

#[test]
fn number_literal_forms() {
    assert_prints("println(0.5);", "0.5\n");
    assert_prints("println(.5);", "0.5\n");
    assert_prints("println(1e3);", "1000\n");
    assert_prints("println(2.5e-2);", "0.025\n");
}

#[test]
fn string_concatenation_and_escapes() {
    assert_prints("println(\"foo\" + \"bar\");", "foobar\n");
    assert_prints("println(\"a\\tb\");", "a\tb\n");
    assert_prints("println(\"say \\\"hi\\\"\");", "say \"hi\"\n");
    assert_prints("print(\"line\\n\");", "line\n");
}

#[test]
fn comparisons_use_epsilon() {
    assert_prints("println(0.1 + 0.2 == 0.3);", "true\n");
    assert_prints("println(1 <= 1);", "true\n");
    assert_prints("println(1 < 1);", "false\n");
    assert_prints("println(3 >= 2);", "true\n");
    assert_prints("println(2 > 3);", "false\n");
    assert_prints("println(1 != 2);", "true\n");
}

#[test]
fn truthiness_and_logical_operators() {
    assert_prints("println(1 and 2);", "true\n");
    assert_prints("println(0 or nix);", "false\n");
    assert_prints("println(!nix);", "true\n");
    assert_prints("println(not false);", "true\n");
    assert_prints("println(\"\" and []);", "true\n");
}

#[test]
fn logical_operators_short_circuit() {
    assert_prints("fn boom() { return 1 / 0; } println(false and boom());", "false\n");
    assert_prints("fn boom() { return 1 / 0; } println(true or boom());", "true\n");
}

#[test]
fn comments_are_ignored() {
    assert_prints("// a line comment\nprintln(1); /[ a block\ncomment ]/ println(2);",
                  "1\n2\n");
}

#[test]
fn unterminated_block_comment_warns_without_failing() {
    let outcome = run("println(1); /[ never closed");
    assert!(!outcome.had_error && !outcome.had_runtime_error);
    assert_eq!(outcome.output, "1\n");
    assert!(outcome.diagnostics.iter().any(|line| line.contains("Warning")),
            "expected a warning, got {:?}",
            outcome.diagnostics);
}

#[test]
fn assignment_is_an_expression() {
    assert_prints("x `= (y `= 5) + 1; println(x); println(y);", "6\n5\n");
    assert_prints("a `= b `= 2; println(a); println(b);", "2\n2\n");
}

#[test]
fn compound_assignment_desugars_to_strict() {
    assert_prints("x `= 2; x += 3; println(x);", "5\n");
    assert_prints("x `= 7; x -= 2; println(x);", "5\n");
    assert_prints("x `= 4; x *= 2; println(x);", "8\n");
    assert_prints("x `= 9; x /= 3; println(x);", "3\n");
}

#[test]
fn compound_assignment_rejects_index_targets() {
    assert_static_error("l `= [1,2,3]; l[1] += 1;");
}

#[test]
fn recursive_functions() {
    assert_prints("fn fib(n){ if (n<2) return n; return fib(n-1)+fib(n-2); } println(fib(10));",
                  "55\n");
}

#[test]
fn functions_return_nix_by_default() {
    assert_prints("fn nothing() { } println(nothing());", "nix\n");
    assert_prints("fn early(n) { if (n > 0) { return; } return 1; } println(early(5));",
                  "nix\n");
}

#[test]
fn lambdas_are_first_class() {
    assert_prints("println(fn(a, b) { return a + b; }(2, 3));", "5\n");
    assert_prints("twice `= fn(f, v) { return f(f(v)); };\nfn inc(n) { return n + 1; }\nprintln(twice(inc, 5));",
                  "7\n");
}

#[test]
fn callables_compare_by_identity() {
    assert_prints("f `= fn() { return 1; }; g `= f; println(f == g);", "true\n");
    assert_prints("f `= fn() { return 1; }; h `= fn() { return 1; }; println(f == h);",
                  "false\n");
}

#[test]
fn closures_see_later_mutations() {
    assert_prints("fn mk(){ c `= 0; fn inc(){ c `= c+1; return c; } return inc; } f `= mk(); println(f()); println(f());",
                  "1\n2\n");
}

#[test]
fn closures_capture_the_live_loop_scope() {
    assert_prints("counter `= nix;\nfor (x in 1..3) {\n    if (x == 1) { counter `= fn() { return x; }; }\n}\nprintln(counter());",
                  "3\n");
}

#[test]
fn while_loop_with_break_and_continue() {
    assert_prints("i `= 0; s `= 0;\nwhile (true) {\n    i `= i + 1;\n    if (i > 5) break;\n    if (i == 3) continue;\n    s `= s + i;\n}\nprintln(s);",
                  "12\n");
}

#[test]
fn three_clause_for_loop() {
    assert_prints("s `= 0; for (i = 0; i < 5; i += 1) { s `= s + i; } println(s);", "10\n");
    assert_prints("s `= 0; i `= 0; for (;;) { i `= i + 1; if (i > 3) break; s `= s + i; } println(s);",
                  "6\n");
}

#[test]
fn ranged_for_loop_sums() {
    assert_prints("s `= 0; for (x in 1..5) { s `= s + x; } println(s);", "15\n");
    assert_prints("s `= 0; for (x in [2, 3, 4]) { s `= s + x; } println(s);", "9\n");
    assert_prints("s `= 0; for (x in []) { s `= s + 1; } println(s);", "0\n");
}

#[test]
fn ranged_for_supports_break_and_continue() {
    assert_prints("s `= 0;\nfor (x in 1..10) {\n    if (x == 3) continue;\n    if (x > 5) break;\n    s `= s + x;\n}\nprintln(s);",
                  "12\n");
}

#[test]
fn ranges_materialize_inclusively() {
    assert_prints("r `= 1..10..2; println(r);", "[1, 3, 5, 7, 9]\n");
    assert_prints("println(1..5);", "[1, 2, 3, 4, 5]\n");
    assert_prints("println(1..0);", "[]\n");
    assert_prints("println(5..1..-1);", "[5, 4, 3, 2, 1]\n");
    assert_prints("println(0..1..0.25);", "[0, 0.25, 0.5, 0.75, 1]\n");
}

#[test]
fn range_errors() {
    assert_runtime_error("1..5..0;");
    assert_runtime_error("1..\"x\";");
}

#[test]
fn lists_print_and_compare_structurally() {
    assert_prints("println([1, 2, 3]);", "[1, 2, 3]\n");
    assert_prints("println([]);", "[]\n");
    assert_prints("println([] == []);", "true\n");
    assert_prints("println([1, 2] == [1, 2]);", "true\n");
    assert_prints("println([1, 2] == [2, 1]);", "false\n");
    assert_prints("println([[1], [2]] == [[1], [2]]);", "true\n");
    assert_prints("println([1] == 1);", "false\n");
}

#[test]
fn long_lists_abbreviate() {
    assert_prints("println(1..60);",
                  "[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, ..., 51, 52, 53, 54, 55, 56, 57, 58, 59, 60]\n");
}

#[test]
fn heterogeneous_lists_are_rejected() {
    assert_runtime_error("[1, \"two\"];");
    assert_runtime_error("[true, nix];");
}

#[test]
fn scalar_indexing_is_one_based() {
    assert_prints("l `= [10, 20, 30]; println(l[1]); println(l[3]);", "10\n30\n");
    assert_runtime_error("l `= [1, 2, 3]; l[0];");
    assert_runtime_error("l `= [1, 2, 3]; l[4];");
    assert_runtime_error("l `= [1, 2, 3]; l[1.5];");
    assert_runtime_error("l `= [1, 2, 3]; l[-1];");
    assert_runtime_error("5[1];");
    assert_runtime_error("l `= [1, 2, 3]; l[\"x\"];");
}

#[test]
fn index_assignment_mutates_in_place() {
    assert_prints("l `= [1,2,3]; l[2] `= 20; println(l);", "[1, 20, 3]\n");
    assert_prints("l `= [1, 2, 3]; l[1] = 9; println(l[1]); println(l[2]);", "9\n2\n");
}

#[test]
fn index_assignment_checks_the_list_tag() {
    assert_runtime_error("l `= [1, 2, 3]; l[1] `= \"x\";");
    assert_runtime_error("l `= [\"a\"]; l[1] `= 1;");
}

#[test]
fn gather_indexing() {
    assert_prints("l `= [10, 20, 30, 40]; println(l[[1, 3]]);", "[10, 30]\n");
    assert_prints("l `= [10, 20, 30, 40]; println(l[2..3]);", "[20, 30]\n");
    assert_prints("l `= [10, 20, 30, 40]; println(l[[]]);", "[]\n");
    assert_runtime_error("l `= [1, 2]; l[[1, 5]];");
    assert_runtime_error("l `= [1, 2]; l[[\"a\"]];");
}

#[test]
fn gather_assignment() {
    assert_prints("l `= [1, 2, 3, 4]; l[[1, 4]] `= [9, 8]; println(l);", "[9, 2, 3, 8]\n");
    assert_runtime_error("l `= [1, 2, 3]; l[[1, 2]] `= [9];");
    assert_runtime_error("l `= [1, 2, 3]; l[[1]] `= 9;");
    assert_runtime_error("l `= [1, 2, 3]; l[[1]] `= [\"a\"];");
}

#[test]
fn lists_are_shared_and_copy_is_deep() {
    assert_prints("a `= [1, 2, 3]; b `= a; c `= copy(a); a[1] `= 9; println(b); println(c);",
                  "[9, 2, 3]\n[1, 2, 3]\n");
    assert_prints("x `= [[1], [2]]; println(copy(x) == x);", "true\n");
    assert_prints("x `= [[1], [2]]; y `= copy(x); x[1][1] `= 5; println(y);", "[[1], [2]]\n");
}

#[test]
fn copy_passes_scalars_and_callables_through() {
    assert_prints("println(copy(5)); println(copy(\"s\")); println(copy(nix));",
                  "5\ns\nnix\n");
    assert_prints("f `= fn() { return 1; }; println(copy(f) == f);", "true\n");
}

#[test]
fn read_returns_one_input_line() {
    let outcome = run_with_input("name `= read(); println(\"hi \" + name);", "world\n");
    assert!(!outcome.had_error && !outcome.had_runtime_error);
    assert_eq!(outcome.output, "hi world\n");
}

#[test]
fn print_omits_the_newline() {
    assert_prints("print(1); print(2); println(3);", "123\n");
}

#[test]
fn stringify_renders_callables_as_tags() {
    assert_prints("fn f() { } println(f);", "<fn f>\n");
    assert_prints("println(copy);", "<native fn copy>\n");
}

#[test]
fn division_by_values_within_epsilon_fails() {
    assert_runtime_error("1 / 0;");
    assert_runtime_error("1 / 0.00000000001;");
    assert_prints("println(1 / 0.5);", "2\n");
}

#[test]
fn type_errors_in_operators() {
    assert_runtime_error("1 + \"x\";");
    assert_runtime_error("\"a\" - \"b\";");
    assert_runtime_error("-\"x\";");
    assert_runtime_error("[1] * 2;");
}

#[test]
fn call_errors() {
    assert_runtime_error("5(1);");
    assert_runtime_error("fn f(a) { return a; } f(1, 2);");
    assert_runtime_error("fn f(a) { return a; } f();");
    assert_runtime_error("missing();");
}

#[test]
fn undefined_variables_are_runtime_errors() {
    assert_runtime_error("println(zzz);");
}

#[test]
fn runtime_errors_abort_the_remaining_statements() {
    let outcome = run("println(1); 1 / 0; println(2);");
    assert!(outcome.had_runtime_error);
    assert_eq!(outcome.output, "1\n");
}

#[test]
fn static_errors_block_execution() {
    let outcome = run("println(1)\nprintln(2);");
    assert!(outcome.had_error);
    assert_eq!(outcome.output, "");
}

#[test]
fn parser_recovers_and_reports_multiple_errors() {
    let outcome = run("1 +; 2 *; println(3);");
    assert!(outcome.had_error);
    assert!(outcome.diagnostics.len() >= 2, "diagnostics: {:?}", outcome.diagnostics);
}

#[test]
fn scan_errors_report_and_continue() {
    let outcome = run("x `= 1 $ 2;");
    assert!(outcome.had_error);
    assert!(outcome.diagnostics.iter().any(|line| line.contains("Unexpected character")),
            "diagnostics: {:?}",
            outcome.diagnostics);
    assert_static_error("\"no closing quote");
}

#[test]
fn loop_control_outside_loops_is_static() {
    assert_static_error("break;");
    assert_static_error("continue;");
    assert_static_error("if (true) break;");
    assert_static_error("while (true) { fn f() { break; } break; }");
}

#[test]
fn return_outside_functions_is_static() {
    assert_static_error("return 1;");
    assert_static_error("for (x in [1]) { return; }");
}

#[test]
fn stray_in_clauses_are_static_errors() {
    assert_static_error("x in [1, 2];");
    assert_static_error("y `= x in [1, 2];");
}

#[test]
fn invalid_assignment_targets_are_static_errors() {
    assert_static_error("1 = 2;");
    assert_static_error("(x) `= 2;");
    assert_static_error("1 += 2;");
}

#[test]
fn blocks_shadow_and_restore() {
    assert_prints("x `= 1; { x `= 2; println(x); } println(x);", "2\n2\n");
}

#[test]
fn repl_echoes_bare_expressions() {
    let mut session = Session::new(HostIo::new(Box::new(Cursor::new(Vec::new())),
                                               Box::new(SharedWriter::new())));
    assert_eq!(session.run_line("1 + 2"), Some("3".to_string()));
    assert_eq!(session.run_line("\"hi\""), Some("\"hi\"".to_string()));
    assert_eq!(session.run_line("[\"a\", \"b\"]"), Some("[\"a\", \"b\"]".to_string()));
}

#[test]
fn repl_state_persists_across_lines() {
    let mut session = Session::new(HostIo::new(Box::new(Cursor::new(Vec::new())),
                                               Box::new(SharedWriter::new())));
    assert_eq!(session.run_line("x `= 4;"), None);
    assert_eq!(session.run_line("x"), Some("4".to_string()));
    assert_eq!(session.run_line("x + 1"), Some("5".to_string()));
}

#[test]
fn repl_closures_survive_their_defining_line() {
    let mut session = Session::new(HostIo::new(Box::new(Cursor::new(Vec::new())),
                                               Box::new(SharedWriter::new())));
    assert_eq!(session.run_line("fn mk() { return fn() { return 7; }; }"), None);
    assert_eq!(session.run_line("f `= mk();"), None);
    assert_eq!(session.run_line("f()"), Some("7".to_string()));
}

#[test]
fn repl_suppresses_nix_valued_calls() {
    let writer = SharedWriter::new();
    let mut session = Session::new(HostIo::new(Box::new(Cursor::new(Vec::new())),
                                               Box::new(writer.clone())));
    assert_eq!(session.run_line("println(5)"), None);
    assert_eq!(writer.contents(), "5\n");
}

#[test]
fn repl_resets_error_flags_per_line() {
    let mut session = Session::new(HostIo::new(Box::new(Cursor::new(Vec::new())),
                                               Box::new(SharedWriter::new())));
    assert_eq!(session.run_line("$"), None);
    assert!(session.had_error());
    assert_eq!(session.run_line("1"), Some("1".to_string()));
    assert!(!session.had_error());
}

#[test]
fn assignment_without_semicolon_echoes_in_repl() {
    let mut session = Session::new(HostIo::new(Box::new(Cursor::new(Vec::new())),
                                               Box::new(SharedWriter::new())));
    assert_eq!(session.run_line("x `= 21 * 2"), Some("42".to_string()));
    assert_eq!(session.run_line("x"), Some("42".to_string()));
}

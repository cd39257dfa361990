use std::{
    fs,
    io::{self, Cursor},
    path::PathBuf,
};

use pretty_assertions::assert_eq;
use scriptit::{
    ast::{Expression, PostfixItem},
    error::Error,
    interpreter::{evaluator::core::Context, io::SharedOutput},
    run_program,
};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_scriptit_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run(&code) {
                panic!("ScriptIt example {} in {:?} failed:\n{}\nError: {}",
                       i + 1,
                       path,
                       code,
                       e);
            }
        }
    }

    assert!(count > 0, "No ScriptIt examples found in book/src");
}

fn extract_scriptit_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```scriptit") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

/// Runs `src` in a fresh context and returns what it printed.
fn run(src: &str) -> Result<String, Error> {
    let output = SharedOutput::new();
    let mut context = Context::with_io(output.clone(), io::empty());
    run_program(src, &mut context)?;
    Ok(output.contents())
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(output) => assert_eq!(output, expected, "output of:\n{src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str) {
    if let Ok(output) = run(src) {
        panic!("Script succeeded but was expected to fail, printed:\n{output}")
    }
}

fn assert_error(src: &str, fragment: &str) {
    match run(src) {
        Ok(output) => panic!("Script succeeded but was expected to fail, printed:\n{output}"),
        Err(e) => {
            let message = e.to_string();
            assert!(message.contains(fragment),
                    "error '{message}' does not mention '{fragment}'");
        },
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("scriptit_{}_{name}", std::process::id()))
}

#[test]
fn arithmetic_and_number_display() {
    assert_output("print(3.14 + 0.01).", "3.15\n");
    assert_output("print(20 / 4).", "5\n");
    assert_output("print(7 / 2).", "3.5\n");
    assert_output("print(2 ^ 10).", "1024\n");
    assert_output("print(2 ^ 0.5).", "1.41421\n");
    assert_output("print(PI).", "3.14159\n");
    assert_output("print(1000000.0).", "1e+06\n");
    assert_output("print(1 + 2 * 3 - 4).", "3\n");
    assert_output("print((1 + 2) * 3).", "9\n");
}

#[test]
fn modulo_follows_the_divisor() {
    assert_output("print(7 % 3).", "1\n");
    assert_output("print(-7 % 3).", "2\n");
    assert_output("print(7 % -3).", "-2\n");
}

#[test]
fn booleans_count_as_numbers() {
    assert_output("print(True + True).", "2\n");
    assert_output("print(True * 5).", "5\n");
}

#[test]
fn integer_overflow_promotes_to_real() {
    assert_output("print(9223372036854775807 + 1).", "9.22337e+18\n");
    assert_output("print(2 ^ 70).", "1.18059e+21\n");
}

#[test]
fn oversized_integer_literals_fail() {
    assert_error("print(99999999999999999999999).",
                 "Invalid numeric literal '99999999999999999999999' at line 1");
    assert_output("print(99999999999999999999999.0).", "1e+23\n");
}

#[test]
fn division_and_modulo_by_zero_fail() {
    assert_error("var x = 1 / 0.", "Division by zero");
    assert_error("var x = 1 % 0.", "Modulo by zero");
}

#[test]
fn strings_and_lists_combine_with_operators() {
    assert_output("print(\"a\" + 1).", "a1\n");
    assert_output("print(1 + \"a\").", "1a\n");
    assert_output("print(\"ab\" * 3).", "ababab\n");
    assert_output("print([1] * 3).", "[1, 1, 1]\n");
    assert_output("print([1, 2] + [3]).", "[1, 2, 3]\n");
    assert_error("print(\"a\" - 1).", "Unsupported operand types for '-'");
}

#[test]
fn implicit_multiplication() {
    assert_output("var x = 3.\nprint(2x).", "6\n");
    assert_output("print(2(3 + 1)).", "8\n");
}

#[test]
fn declarations_and_assignment() {
    assert_output("var x.\nprint(x).", "None\n");
    assert_output("var x = 1.\nx = x + 1.\nprint(x).", "2\n");
    assert_output("let y be 10.\nprint(y).", "10\n");
    assert_error("x = 1.", "Undefined variable 'x'");
}

#[test]
fn several_declarations_in_one_statement() {
    assert_output("var a = 1, b = 2.\nprint(a + b).", "3\n");
    assert_output("var x = 1 y = 2 z = 3.\nprint(x + y + z).", "6\n");
    assert_output("var p = 1, q.\nprint(q).", "None\n");
}

#[test]
fn compound_assignment_and_increments() {
    assert_output("var x = 5.\nx += 2.\nx *= 3.\nx--.\n++x.\nprint(x).", "21\n");
    assert_output("var x = 9.\nx /= 2.\nprint(x).", "4.5\n");
    assert_output("var x = 9.\nx %= 4.\nx -= 3.\nprint(x).", "-2\n");
}

#[test]
fn expression_statements_print_their_value() {
    assert_output("1 + 2.", "3\n");
    assert_output("var x = 4.\nx.", "4\n");
    assert_output("var x.\nx.", "");
}

#[test]
fn top_level_give_prints_and_stops() {
    assert_output("give 5.\nprint(1).", "5\n");
    assert_output("give.", "None\n");
}

#[test]
fn comments_and_line_continuation() {
    assert_output("--> a block\ncomment <--\nprint(1). # trailing\n", "1\n");
    assert_output("var x = 1 + `\n  2.\nprint(x).", "3\n");
}

#[test]
fn if_elif_else() {
    let src = r#"
var x = 7.
if x > 10:
    print("big").
elif x > 5:
    print("medium").
else:
    print("small").
;
"#;
    assert_output(src, "medium\n");
    assert_output("if False: print(1).\nelse: print(2).\n;", "2\n");
}

#[test]
fn range_loops() {
    assert_output("for i in range(3): print(i). ;", "0\n1\n2\n3\n");
    assert_output("for i in range(from 1 to 10 step 3): print(i). ;", "1\n4\n7\n10\n");
    assert_output("for i in range(from 3 to 1): print(i). ;", "3\n2\n1\n");
    assert_output("for i in range(from 0 to 1 step 0.25): print(i). ;",
                  "0\n0.25\n0.5\n0.75\n1\n");
    assert_error("for i in range(from 1 to 10 step 0): pass. ;", "Step cannot be zero");
}

#[test]
fn collection_loops() {
    assert_output("for x in [1, \"a\", 2.5]: print(x). ;", "1\na\n2.5\n");
    assert_output("for c in \"abc\": print(c). ;", "a\nb\nc\n");
    assert_output("for v in {3, 1, 2}: print(v). ;", "1\n2\n3\n");
    assert_error("for v in 5: pass. ;", "for-in requires a list, string, or set; got int");
}

#[test]
fn while_loops() {
    let src = r"
var n = 0.
var total = 0.
while n < 5:
    n++.
    total += n.
;
print(total).
";
    assert_output(src, "15\n");
}

#[test]
fn loop_variables_stay_in_the_loop() {
    assert_output("var total = 0.\nfor i in range(from 1 to 4): total += i. ;\nprint(total).\nprint(i).",
                  "10\nNone\n");
}

#[test]
fn functions_and_recursion() {
    let src = r"
fn fact(n):
    if n <= 1:
        give 1.
    ;
    give n * fact(n - 1).
;
print(fact(10)).
";
    assert_output(src, "3628800\n");
    assert_output("fn add(a, b): give(a + b). ;\nprint(add(2, 3)).", "5\n");
    assert_output("fn nothing(): pass. ;\nprint(nothing()).", "None\n");
}

#[test]
fn functions_can_be_called_before_their_definition() {
    assert_output("print(twice(4)).\nfn twice(x): give x * 2. ;", "8\n");
    assert_output("fn later(x).\nprint(later(2)).\nfn later(x): give x + 1. ;", "3\n");
    assert_error("fn pending(a).\npending(1).", "forward-declared but never defined");
}

#[test]
fn functions_overload_by_arity() {
    let src = r"
fn area(r): give 3 * r * r. ;
fn area(w, h): give w * h. ;
print(area(2)).
print(area(2, 3)).
";
    assert_output(src, "12\n6\n");
    assert_error("fn one(a): give a. ;\none(1, 2).", "Unknown function call: one");
}

#[test]
fn functions_cannot_assign_outer_variables() {
    assert_output("var y = 5.\nfn g(): give y * 2. ;\nprint(g()).", "10\n");
    assert_error("var x = 1.\nfn f(): x = 2. ;\nf().", "Undefined variable 'x'");
}

#[test]
fn blocks_can_assign_outer_variables() {
    assert_output("var x = 1.\nif True: x = 2. ;\nprint(x).", "2\n");
}

#[test]
fn function_locals_do_not_leak() {
    assert_output("fn f(): var t = 1. give t. ;\nf().\nprint(t).", "1\nNone\n");
}

#[test]
fn by_reference_parameters_write_back() {
    let src = r"
fn swap(@a, @b):
    var t = a.
    a = b.
    b = t.
;
var x = 1, y = 2.
swap(x, y).
print(x, y).
";
    assert_output(src, "2 1\n");
    assert_output("fn bump(@n): n += 1. ;\nvar c = 1.\nbump(c).\nbump(5).\nprint(c).", "2\n");
}

#[test]
fn function_definition_errors() {
    assert_error("fn f(): ;", "Empty function body not allowed");
    assert_error("fn f(a, a): pass. ;", "Duplicate parameter name 'a' in function 'f'");
}

#[test]
fn recursion_depth_is_limited() {
    std::thread::Builder::new().stack_size(256 * 1024 * 1024)
                               .spawn(|| {
                                   assert_error("fn down(n): give down(n + 1). ;\ndown(0).",
                                                "Maximum call depth");
                               })
                               .unwrap()
                               .join()
                               .unwrap();
}

#[test]
fn equality_and_identity() {
    assert_output("print(0.1 + 0.2 == 0.3).", "True\n");
    assert_output("print(1 == \"1\").", "False\n");
    assert_output("print(None == None).", "True\n");
    assert_output("print([1, 2] == [1, 2.0]).", "True\n");
    assert_output("print(1 is not 2).", "True\n");
    assert_output("print(1 points 1).", "True\n");
    assert_output("print(1 points 1.0).", "False\n");
    assert_output("print(1 not points 1.0).", "True\n");
    assert_error("print(\"a\" < 1).", "Cannot convert str to number");
}

#[test]
fn logical_operators_short_circuit() {
    assert_output("var r = False and missing().\nprint(r).", "False\n");
    assert_output("var r = True or missing().\nprint(r).", "True\n");
    assert_output("print(not 0).", "True\n");
    assert_output("print(1 && \"x\").", "True\n");
}

const NOISY: &str = "fn noisy(x): print(\"called\"). give x. ;\n";

#[test]
fn short_circuit_skips_side_effects() {
    let cases = [("False && noisy(True).", "False\n"),
                 ("True || noisy(False).", "True\n"),
                 ("True && noisy(False).", "called\nFalse\n"),
                 ("print(False && noisy(True)).", "False\n"),
                 ("print((False && noisy(True)) == False).", "True\n"),
                 ("print([True || noisy(1), 0 && noisy(1)]).", "[True, False]\n"),
                 ("print(!(False || noisy(0))).", "called\nTrue\n")];

    for (src, expected) in cases {
        assert_output(&format!("{NOISY}{src}"), expected);
    }
}

#[test]
fn parenthesized_guards_protect_their_right_side() {
    assert_output("var x = 0.\nif (x != 0 && 10 / x > 1): print(1). ;\nprint(\"ok\").", "ok\n");
    assert_output("var x = 5.\nif (x != 0 && 10 / x > 1): print(1). ;", "1\n");
    assert_output("var x = 0.\nprint(len([(x == 0 || 1 / x)])).", "1\n");
}

#[test]
fn adjacent_operands_are_rejected() {
    assert_error("var x = 2.\nprint(\"a\" x).", "Unexpected token 'x' at line 2");
    assert_error("var x = 2.\nvar y = x \"b\".", "at line 2");
    assert_error("print([1] [2]).", "Unexpected token '['");
    assert_error("print(1 !2).", "Unexpected token '!'");

    let output = SharedOutput::new();
    let mut context = Context::with_io(output.clone(), io::empty());
    assert!(run_program("print(1).\nprint(\"a\" 2).", &mut context).is_err());
    assert_eq!(output.contents(), "");
}

#[test]
fn leftover_operands_are_an_error() {
    let mut context = Context::with_io(SharedOutput::new(), io::empty());
    let two_numbers = Expression::Postfix(vec![PostfixItem::Number { text: "1".to_string(),
                                                                     line: 4, },
                                               PostfixItem::Number { text: "2".to_string(),
                                                                     line: 4, }]);

    let err = context.evaluate(&two_numbers).unwrap_err();
    assert_eq!(err.to_string(), "Malformed expression: 2 values left on the stack at line 4");
}

#[test]
fn containers_display() {
    assert_output("print([1, \"a\", [2.5]]).", "[1, a, [2.5]]\n");
    assert_output("print({3, 1, 2, 1}).", "{1, 2, 3}\n");
    assert_output("print({\"b\" -> 2, \"a\" -> 1}).", "{\"a\": 1, \"b\": 2}\n");
    assert_output("print({}).", "{}\n");
    assert_output("pprint([1, \"a\"]).", "[\n  1,\n  \"a\"\n]\n");
}

#[test]
fn string_methods() {
    assert_output("print(\"Hello\".upper()).", "HELLO\n");
    assert_output("print(upper() of \"abc\").", "ABC\n");
    assert_output("print(\"a,b,c\".split(\",\")).", "[a, b, c]\n");
    assert_output("print(\"  pad  \".strip().size()).", "3\n");
    assert_output("print(\"hello world\".title()).", "Hello World\n");
    assert_output("print(\"banana\".count(\"an\")).", "2\n");
    assert_output("print(\"banana\".find(\"z\")).", "-1\n");
    assert_output("print(\"-42\".zfill(5)).", "-0042\n");
    assert_output("print(\"ab\".center(6, \"*\")).", "**ab**\n");
    assert_output("print(\"abcdef\".slice(1, 4)).", "bcd\n");
    assert_output("print(\"abcdef\".slice(5, 0, -2)).", "fdb\n");
    assert_output("print(\"-\".join([1, 2, 3])).", "1-2-3\n");
    assert_output("print(\"abc\".at(-1)).", "c\n");
}

#[test]
fn list_methods_mutate_the_variable() {
    let src = r"
var l = [3, 1, 2].
l.sort().
l.append(4).
var last = l.pop().
print(l, last).
l.insert(0, 9).
l.remove(1).
print(l.index(2), l.contains(3), l.front(), l.back()).
";
    assert_output(src, "[1, 2, 3]\n[1, 2, 3, 4]\n[1, 2, 3] 4\n[9, 1, 2, 3]\n[9, 2, 3]\n1 True 9 3\n");
    assert_error("var l = [1].\nl.remove(5).", "not in list");
    assert_error("var l = [].\nl.front().", "empty list");
}

#[test]
fn method_results_on_copies_leave_the_original() {
    assert_output("var a = [1].\nvar b = a.\nvar c = b.append(2).\nprint(a, b).", "[1] [1, 2]\n");
}

#[test]
fn set_methods() {
    let src = r"
var s = {1, 2}.
s.add(3).
s.remove(7).
var n = s.extend([2, 4]).
print(s.size(), s.contains(4), s.has(9)).
print({1, 1.0, 2}.size()).
";
    assert_output(src, "{1, 2, 3}\n{1, 2, 3}\n4 True False\n2\n");
}

#[test]
fn dict_methods() {
    let src = r#"
var d = {"a" -> 1, "b" -> 2}.
print(d.keys(), d.values()).
print(d.get("c", 0), d.get("a"), d.has("b")).
var e = d.update({"c" -> 3}).
print(d.size(), d.items()).
"#;
    assert_output(src, "[a, b] [1, 2]\n0 1 True\n3 [[a, 1], [b, 2], [c, 3]]\n");
}

#[test]
fn universal_methods() {
    assert_output("var n = 42.\nprint(n.type(), n.is_int(), n.toDouble(), n.str().size()).",
                  "int True 42 2\n");
    assert_output("var s = \"7\".\nprint(s.toInt() + 1, s.repr()).", "8 \"7\"\n");
}

#[test]
fn method_dispatch_errors() {
    assert_error("var n = 5.\nn.upper().", "Unknown method 'upper' on type 'int'");
    assert_error("\"abc\".upper(1).", "Method 'upper' on str does not accept 1 argument(s)");
}

#[test]
fn conversion_builtins() {
    assert_output("print(int(3.7), int(\"12\"), float(\"2.5\"), str(3) + \"x\").", "3 12 2.5 3x\n");
    assert_output("print(bool(0), bool(\"a\"), type(1.5), len(\"héllo\")).", "False True float 5\n");
    assert_output("print(isinstance(42, \"int\"), repr(\"q\")).", "True \"q\"\n");
    assert_error("int(\"abc\").", "Cannot convert");
}

#[test]
fn math_builtins() {
    assert_output("print(sqrt(16), abs(-3), round(3.7), floor(-1.5), ceil(1.2)).", "4 3 4 -2 2\n");
    assert_output("print(log(1), min(3, 7), max(3, 7.5)).", "0 3 7.5\n");
    assert_error("sqrt(-1).", "math domain error");
}

#[test]
fn container_builtins() {
    assert_output("print(range_list(1, 3), range_list(3, 1)).", "[1, 2, 3] [3, 2, 1]\n");
    assert_output("print(sum([1, 2, 3]), sorted([3, 1, 2]), reversed(\"abc\")).", "6 [1, 2, 3] cba\n");
    assert_output("print(list(\"ab\"), set([2, 2, 1]), dict([[\"k\", 1]])).", "[a, b] {1, 2} {\"k\": 1}\n");
    assert_output("print(enumerate([\"x\"]), zip([1, 2], [3])).", "[[0, x]] [[1, 3]]\n");
    assert_output("print(all([1, True]), any([0, None])).", "True False\n");
    assert_output("var l = [1].\nprint(append(l, 2), pop([1, 2]), l).", "[1, 2] 2 [1]\n");
}

#[test]
fn builtin_arity_is_checked() {
    assert_error("len(1, 2).", "len() takes 1 argument(s), got 2");
    assert_error("open().", "open() takes 1 or 2 argument(s), got 0");
}

#[test]
fn input_reads_from_the_context() {
    let output = SharedOutput::new();
    let mut context = Context::with_io(output.clone(), Cursor::new("Ada\n"));

    run_program("var name = input(\"Name: \").\nprint(\"Hi \" + name).", &mut context).unwrap();

    assert_eq!(output.contents(), "Name: Hi Ada\n");
}

#[test]
fn files_can_be_written_and_read() {
    let path = temp_path("files.txt");
    let path = path.display();
    let src = format!(
                      r#"
write("{path}", "one\ntwo").
write("{path}", "\nthree", "a").
print(readLine("{path}")).
var f = open("{path}").
print(read(f).size()).
close(f).
"#
    );

    assert_output(&src, "[one, two, three]\n13\n");
    let _ = fs::remove_file(path.to_string());
}

#[test]
fn closing_twice_is_an_error() {
    let path = temp_path("twice.txt");
    fs::write(&path, "x").unwrap();
    let src = format!("var f = open(\"{}\").\nclose(f).\nclose(f).", path.display());

    assert_failure(&src);
    let _ = fs::remove_file(path);
}

#[test]
fn let_blocks_release_their_resource() {
    let path = temp_path("let.txt");
    let src = format!(
                      r#"
let f be open("{}", "w"):
    write(f, "inside").
;
"#,
                      path.display()
    );
    let output = SharedOutput::new();
    let mut context = Context::with_io(output, io::empty());

    run_program(&src, &mut context).unwrap();
    assert_eq!(context.files.open_count(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "inside");

    let failing = format!("let f be open(\"{}\"): var x = 1 / 0. ;", path.display());
    assert!(run_program(&failing, &mut context).is_err());
    assert_eq!(context.files.open_count(), 0);

    let _ = fs::remove_file(path);
}

#[test]
fn lexing_and_parsing_errors() {
    assert_error("var x = 1 $ 2.", "Unexpected character '$' at line 1");
    assert_error("print(\"open).", "Unterminated string");
    assert_error("if True: print(1).", "Expected ; at end of if-structure");
    assert_error("var x = (1 + 2.", "Mismatched parens at end");
    assert_error("print((1 + 2).", "Expected ) after arguments");
    assert_error("var x = 1.\n).", "Unexpected token ')' at line 2");
}

#[test]
fn syntax_errors_stop_the_whole_program() {
    assert_output("print(1).", "1\n");
    let output = SharedOutput::new();
    let mut context = Context::with_io(output.clone(), io::empty());

    assert!(run_program("print(1).\nif True: pass.", &mut context).is_err());
    assert_eq!(output.contents(), "");
}

#[test]
fn runtime_errors_keep_earlier_effects() {
    let output = SharedOutput::new();
    let mut context = Context::with_io(output.clone(), io::empty());

    assert!(run_program("var kept = 1.\nprint(kept).\nvar x = 1 / 0.\nprint(2).", &mut context).is_err());
    assert_eq!(output.contents(), "1\n");
    assert!(run_program("print(kept).", &mut context).is_ok());
    assert_eq!(output.contents(), "1\n1\n");
}

#[test]
fn reset_restores_a_fresh_context() {
    let output = SharedOutput::new();
    let mut context = Context::with_io(output.clone(), io::empty());

    run_program("var x = 3.\nfn f(): give 1. ;", &mut context).unwrap();
    context.reset();
    run_program("print(x, PI).", &mut context).unwrap();

    assert_eq!(output.contents(), "None 3.14159\n");
    assert!(run_program("f().", &mut context).is_err());
}

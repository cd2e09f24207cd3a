//! Parser behaviour on complete circuit descriptions.

use std::io::Write;

use revlay_ir::BusKind;
use revlay_real::{DiagnosticKind, ParseError, parse, parse_file, parse_with_diagnostics};

const ADDER: &str = "\
# one-bit full adder built from a majority module
.version 1.0
.numvars 4
.variables cin a b cout
.constants ---0
.garbage 11--
.inputbus x a b
.outputbus s b cout
.module maj
.variables p q r
t3 p q r
t2 r p
.end
maj cin a b
t3 a b cout   # carry
t2 a b
.end
";

#[test]
fn test_adder_metadata() {
    let parsed = parse_with_diagnostics(ADDER).unwrap();
    let circuit = &parsed.circuit;

    assert_eq!(circuit.initial_order(), &["cin", "a", "b", "cout"]);
    assert_eq!(circuit.constant("cout"), Some(0));
    assert_eq!(circuit.constants().len(), 1);
    assert!(circuit.is_garbage("cin"));
    assert!(circuit.is_garbage("a"));
    assert!(!circuit.is_garbage("b"));

    let x = circuit.bus(BusKind::Input, "x").unwrap();
    assert_eq!(x.variables, vec!["a", "b"]);
    let s = circuit.bus(BusKind::Output, "s").unwrap();
    assert_eq!(s.variables, vec!["b", "cout"]);
    assert_eq!(circuit.buses_of("b").count(), 2);

    // .version and .numvars are not supported directives
    assert_eq!(parsed.diagnostics.len(), 2);
    assert!(
        parsed
            .diagnostics
            .iter()
            .all(|d| d.kind == DiagnosticKind::UnknownDirective)
    );
}

#[test]
fn test_adder_instance_is_not_expanded() {
    let circuit = parse(ADDER).unwrap();
    assert_eq!(circuit.num_gates(), 2);
    assert_eq!(circuit.instances().len(), 1);

    let instance = &circuit.instances()[0];
    assert_eq!(instance.template, "maj");
    assert_eq!(instance.actuals, vec!["cin", "a", "b"]);
    assert_eq!(instance.anchor, 0);

    let maj = circuit.template("maj").unwrap();
    assert_eq!(maj.name(), "maj");
    assert_eq!(maj.initial_order(), &["p", "q", "r"]);
    assert_eq!(maj.num_gates(), 2);
}

#[test]
fn test_adder_flattened() {
    let circuit = parse(ADDER).unwrap();
    let flat: Vec<String> = circuit
        .flattened_gates()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(flat, vec!["t3 cin a b", "t2 b cin", "t3 a b cout", "t2 a b"]);
}

#[test]
fn test_module_instantiated_twice() {
    let source = ".module sub\nt a b\n.end\nsub x y\nsub y z\n";
    let circuit = parse(source).unwrap();
    assert_eq!(circuit.instances().len(), 2);
    assert_eq!(circuit.templates().len(), 1);
    assert_eq!(circuit.flattened_gates().unwrap().len(), 2);
}

#[test]
fn test_error_in_nested_module_aborts_with_line() {
    let source = ".module outer\n.module inner\nt\n.end\n.end\n";
    match parse(source) {
        Err(ParseError::MissingToken { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected MissingToken, got {other:?}"),
    }
}

#[test]
fn test_module_defined_inside_module() {
    let source = "\
.module outer
.module inner
t p q
.end
inner a b
t b c
.end
outer x y z
t z w
";
    let circuit = parse(source).unwrap();
    assert_eq!(circuit.initial_order(), &["x", "y", "z", "w"]);
    assert_eq!(circuit.num_gates(), 1);
    assert_eq!(circuit.templates().len(), 1);

    let outer = circuit.template("outer").unwrap();
    assert!(outer.template("inner").is_some());
    assert_eq!(outer.initial_order(), &["a", "b", "c"]);
    assert_eq!(outer.instances().len(), 1);
    assert_eq!(outer.num_gates(), 1);

    let flat: Vec<String> = circuit
        .flattened_gates()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(flat, vec!["t2 x y", "t2 y z", "t2 z w"]);
}

#[test]
fn test_indented_lines() {
    let circuit = parse("  .variables a b\n\tt2 a b\n").unwrap();
    assert_eq!(circuit.num_gates(), 1);
}

#[test]
fn test_parse_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(ADDER.as_bytes()).unwrap();

    let parsed = parse_file(file.path()).unwrap();
    assert_eq!(parsed.circuit.num_variables(), 4);
}

#[test]
fn test_io_error_is_distinct() {
    let dir = tempfile::tempdir().unwrap();
    let err = parse_file(dir.path().join("missing.real")).unwrap_err();
    assert!(matches!(err, ParseError::Io { .. }));
    assert!(err.to_string().contains("missing.real"));
}

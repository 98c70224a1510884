use wirekit::netlist::source::{build_table, instruction_lines};
use wirekit::resolve::worklist;
use wirekit::{
    load_circuit, resolve_all, AssignmentTable, ResolveError, Resolver, SourceError, Strategy,
    TableError,
};

const BOOKLET: &str = "\
# Assembly booklet: gates first, sources last
x AND y -> d
x OR y -> e
x LSHIFT 2 -> f
y RSHIFT 2 -> g
NOT x -> h
NOT y -> i
e -> a
d OR 1 -> b
123 -> x
456 -> y
";

fn booklet_table() -> AssignmentTable {
    build_table(&instruction_lines(BOOKLET)).unwrap()
}

#[test]
fn resolves_booklet_with_both_strategies() {
    let table = booklet_table();
    for strategy in [Strategy::Recursive, Strategy::Worklist] {
        let store = resolve_all(&table, strategy).unwrap();
        assert_eq!(store.get("a"), Some(507));
        assert_eq!(store.get("b"), Some(73));
        assert_eq!(store.get("h"), Some(65412));
        assert_eq!(store.len(), table.len());
    }
}

#[test]
fn feedback_rewires_a_copy() {
    let table = booklet_table();
    let a = Resolver::new(&table).resolve("a").unwrap();

    // drive x with a's signal and resolve a again
    let rewired = table.with_override("x", a).unwrap();
    let mut resolver = Resolver::new(&rewired);
    assert_eq!(resolver.resolve("a").unwrap(), 507 | 456);

    // the original circuit is unchanged
    assert_eq!(Resolver::new(&table).resolve("a").unwrap(), 507);
}

#[test]
fn independent_resolvers_share_one_table() {
    let table = booklet_table();
    let mut first = Resolver::new(&table);
    let mut second = Resolver::new(&table);
    assert_eq!(first.resolve("d").unwrap(), 72);
    assert!(second.results().is_empty());
    assert_eq!(second.resolve("i").unwrap(), 65079);
    assert!(first.results().get("i").is_none());
}

#[test]
fn load_circuit_from_disk() {
    let path = std::env::temp_dir().join(format!("wirekit-booklet-{}.txt", std::process::id()));
    std::fs::write(&path, BOOKLET).unwrap();
    let table = load_circuit(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let (value, _) = worklist::resolve(&table, "b").unwrap();
    assert_eq!(value, 73);
}

#[test]
fn duplicate_line_is_reported_with_position() {
    let text = format!("{}\n7 -> x\n", BOOKLET);
    let err = build_table(&instruction_lines(&text)).unwrap_err();
    match err {
        SourceError::Instruction { line, source } => {
            assert_eq!(line, 13);
            assert_eq!(source, TableError::DuplicateAssignment { wire: "x".into() });
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn broken_circuit_reports_every_problem() {
    let lines = [
        "1 -> x",
        "x XOR 2 -> bad",
        "ghost AND x -> haunted",
        "loop -> knot",
        "knot -> loop",
        "x OR 4 -> fine",
    ];
    let (table, parse_errors) = AssignmentTable::parse_lenient(lines);
    assert_eq!(parse_errors.len(), 1);
    assert_eq!(parse_errors[0].0, 1);

    let mut resolver = Resolver::new(&table);
    let failures = resolver.resolve_each();
    let wires: Vec<&str> = failures.iter().map(|(w, _)| w.as_str()).collect();
    assert_eq!(wires, vec!["haunted", "knot", "loop"]);
    assert!(matches!(failures[0].1, ResolveError::UnknownWire { .. }));
    assert!(matches!(failures[1].1, ResolveError::CircularDependency { .. }));
    assert!(matches!(failures[2].1, ResolveError::CircularDependency { .. }));
    assert_eq!(resolver.results().get("fine"), Some(5));
}

#[test]
fn result_store_reports_in_wire_order() {
    let table = booklet_table();
    let store = resolve_all(&table, Strategy::Recursive).unwrap();
    let json = serde_json::to_string(&store).unwrap();
    assert!(json.starts_with(r#"{"a":507,"b":73,"d":72,"#));
    assert!(json.ends_with(r#""x":123,"y":456}"#));
}

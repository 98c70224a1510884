//! wirekit - CLI Entry Point
//!
//! Commands:
//! - `wirekit run <circuit>` - Resolve wires and print their signals
//! - `wirekit feedback <circuit>` - Feed one wire's signal back into another
//! - `wirekit check <circuit>` - Report malformed lines, unknown wires and cycles
//! - `wirekit demo` - Resolve the built-in reference circuit
//! - `wirekit test` - Built-in self-test

use clap::{Parser, Subcommand, ValueEnum};
use std::collections::BTreeMap;
use wirekit::{AssignmentTable, Signal, Strategy};

#[derive(Parser)]
#[command(name = "wirekit")]
#[command(author = "Yigit")]
#[command(version = "0.1.0")]
#[command(about = "Resolve 16-bit wire circuits built from bitwise logic gates")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve wires and print their signals
    Run {
        /// Path to the circuit file
        circuit: String,
        /// Wire to resolve (repeatable; default: every assigned wire)
        #[arg(short, long)]
        wire: Vec<String>,
        /// Drive a wire with a constant signal, as WIRE=VALUE (repeatable)
        #[arg(short = 'O', long = "override", value_parser = parse_override)]
        overrides: Vec<(String, Signal)>,
        /// Resolution strategy
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Recursive)]
        strategy: StrategyArg,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Show every gate evaluation in order (recursive strategy only)
        #[arg(short, long)]
        trace: bool,
    },
    /// Resolve a wire, feed its signal into another wire, and resolve again
    Feedback {
        /// Path to the circuit file
        circuit: String,
        /// Wire whose signal is fed back
        #[arg(long, default_value = "a")]
        from: String,
        /// Wire that receives the signal
        #[arg(long, default_value = "b")]
        to: String,
        /// Resolution strategy
        #[arg(short, long, value_enum, default_value_t = StrategyArg::Recursive)]
        strategy: StrategyArg,
    },
    /// Report every malformed line, unknown wire and cycle in a circuit
    Check {
        /// Path to the circuit file
        circuit: String,
    },
    /// Resolve the built-in reference circuit
    Demo,
    /// Run the built-in self-test
    Test,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Depth-first with memoization
    Recursive,
    /// Iterative passes until a fixed point
    Worklist,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Recursive => Strategy::Recursive,
            StrategyArg::Worklist => Strategy::Worklist,
        }
    }
}

const REFERENCE_CIRCUIT: [&str; 8] = [
    "123 -> x",
    "456 -> y",
    "x AND y -> d",
    "x OR y -> e",
    "x LSHIFT 2 -> f",
    "y RSHIFT 2 -> g",
    "NOT x -> h",
    "NOT y -> i",
];

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run { circuit, wire, overrides, strategy, json, trace }) => {
            run_circuit(&circuit, &wire, &overrides, strategy.into(), json, trace);
        }
        Some(Commands::Feedback { circuit, from, to, strategy }) => {
            feedback(&circuit, &from, &to, strategy.into());
        }
        Some(Commands::Check { circuit }) => {
            check_circuit(&circuit);
        }
        Some(Commands::Demo) => {
            demo();
        }
        Some(Commands::Test) => {
            run_self_test();
        }
        None => {
            println!("wirekit v0.1.0");
            println!("A 16-bit wire circuit resolver");
            println!();
            println!("Use --help for available commands");
            println!();
            demo();
        }
    }
}

fn parse_override(arg: &str) -> Result<(String, Signal), String> {
    let (wire, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected WIRE=VALUE, got `{}`", arg))?;
    let wire = wire.trim();
    if !wirekit::WireId::is_valid(wire) {
        return Err(format!("invalid wire name `{}`", wire));
    }
    let value = value
        .trim()
        .parse::<Signal>()
        .map_err(|_| format!("signal must be 0-65535, got `{}`", value.trim()))?;
    Ok((wire.to_string(), value))
}

fn load_table(path: &str) -> AssignmentTable {
    use wirekit::load_circuit;

    match load_circuit(path) {
        Ok(table) => {
            println!("📂 Loaded {} assignments from {}", table.len(), path);
            table
        }
        Err(e) => {
            eprintln!("❌ Failed to load circuit: {}", e);
            std::process::exit(1);
        }
    }
}

/// Resolve one wire with the chosen strategy, exiting on failure.
fn resolve_or_exit(table: &AssignmentTable, wire: &str, strategy: Strategy) -> Signal {
    use wirekit::resolve::worklist;
    use wirekit::Resolver;

    let result = match strategy {
        Strategy::Recursive => Resolver::new(table).resolve(wire),
        Strategy::Worklist => worklist::resolve(table, wire).map(|(value, _)| value),
    };

    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("❌ Resolution error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_circuit(
    path: &str,
    wires: &[String],
    overrides: &[(String, Signal)],
    strategy: Strategy,
    json: bool,
    trace: bool,
) {
    use wirekit::resolve::worklist;
    use wirekit::Resolver;

    let mut table = load_table(path);
    for (wire, value) in overrides {
        println!("🔧 Override: {} = {}", wire, value);
        table = match table.with_override(wire, *value) {
            Ok(rewired) => rewired,
            Err(e) => {
                eprintln!("❌ Invalid override: {}", e);
                std::process::exit(1);
            }
        };
    }

    let mut signals: BTreeMap<String, Signal> = BTreeMap::new();

    match strategy {
        Strategy::Recursive => {
            let mut resolver = Resolver::new(&table);
            if trace {
                resolver = resolver.with_trace();
            }

            let result = if wires.is_empty() {
                resolver.resolve_all().map(|_| ())
            } else {
                wires.iter().try_for_each(|w| resolver.resolve(w).map(|_| ()))
            };

            if trace {
                println!();
                println!("━━━ Trace ━━━");
                for (step, (wire, value)) in resolver.trace().iter().enumerate() {
                    let expr = table.get(wire.as_str()).map(|e| e.to_string()).unwrap_or_default();
                    println!("{:05}: {} -> {} = {}", step, expr, wire, value);
                }
            }

            if let Err(e) = result {
                eprintln!("❌ Resolution error: {}", e);
                std::process::exit(1);
            }

            collect_requested(resolver.results(), wires, &mut signals);
        }
        Strategy::Worklist => {
            if trace {
                println!("⚠️  --trace only applies to the recursive strategy");
            }

            if wires.is_empty() {
                match worklist::resolve_all(&table) {
                    Ok(store) => collect_requested(&store, wires, &mut signals),
                    Err(e) => {
                        eprintln!("❌ Resolution error: {}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                for wire in wires {
                    let value = resolve_or_exit(&table, wire, Strategy::Worklist);
                    signals.insert(wire.clone(), value);
                }
            }
        }
    }

    report(&signals, json);
}

fn collect_requested(
    store: &wirekit::ResultStore,
    wires: &[String],
    signals: &mut BTreeMap<String, Signal>,
) {
    if wires.is_empty() {
        for (wire, value) in store.all_resolved() {
            signals.insert(wire.to_string(), value);
        }
    } else {
        for wire in wires {
            if let Some(value) = store.get(wire) {
                signals.insert(wire.clone(), value);
            }
        }
    }
}

fn report(signals: &BTreeMap<String, Signal>, json: bool) {
    if json {
        match serde_json::to_string_pretty(signals) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("❌ Failed to encode JSON: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    println!();
    println!("━━━ Signals ━━━");
    for (wire, value) in signals {
        println!("{}: {}", wire, value);
    }
}

fn feedback(path: &str, from: &str, to: &str, strategy: Strategy) {
    let table = load_table(path);

    let first = resolve_or_exit(&table, from, strategy);
    println!("✓ {}: {}", from, first);

    let rewired = match table.with_override(to, first) {
        Ok(rewired) => rewired,
        Err(e) => {
            eprintln!("❌ Invalid override: {}", e);
            std::process::exit(1);
        }
    };
    println!("🔧 Override: {} = {}", to, first);

    let second = resolve_or_exit(&rewired, from, strategy);
    println!("✓ {}: {}", from, second);
}

fn check_circuit(path: &str) {
    use wirekit::netlist::read_instructions;
    use wirekit::Resolver;

    let lines = match read_instructions(path) {
        Ok(lines) => lines,
        Err(e) => {
            eprintln!("❌ Failed to read circuit: {}", e);
            std::process::exit(1);
        }
    };

    println!("🔍 Checking: {} ({} instructions)", path, lines.len());

    let (table, parse_errors) =
        AssignmentTable::parse_lenient(lines.iter().map(|(_, text)| text.as_str()));
    for (index, e) in &parse_errors {
        eprintln!("❌ line {}: {}", lines[*index].0, e);
    }

    let mut resolver = Resolver::new(&table);
    let failures = resolver.resolve_each();
    for (wire, e) in &failures {
        eprintln!("❌ {}: {}", wire, e);
    }

    println!();
    println!(
        "Assignments: {}, resolved: {}, bad lines: {}, unresolvable wires: {}",
        table.len(),
        resolver.results().len(),
        parse_errors.len(),
        failures.len()
    );

    if parse_errors.is_empty() && failures.is_empty() {
        println!("✓ Circuit is well formed");
    } else {
        std::process::exit(1);
    }
}

fn demo() {
    use wirekit::Resolver;

    println!("━━━ Reference Circuit ━━━");
    for line in REFERENCE_CIRCUIT {
        println!("  {}", line);
    }
    println!();

    let table = match AssignmentTable::parse(REFERENCE_CIRCUIT) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let mut resolver = Resolver::new(&table);
    match resolver.resolve_all() {
        Ok(store) => {
            for (wire, value) in store.all_resolved() {
                println!("  {}: {}", wire, value);
            }
        }
        Err(e) => {
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }
}

fn run_self_test() {
    use wirekit::{resolve_all, ResolveError, Resolver, TableError};

    println!("━━━ wirekit Self-Test ━━━");
    println!();

    let mut passed = 0;
    let mut failed = 0;

    // Test 1: Reference circuit
    print!("Reference circuit... ");
    let expected = [
        ("d", 72), ("e", 507), ("f", 492), ("g", 114),
        ("h", 65412), ("i", 65079), ("x", 123), ("y", 456),
    ];
    let ok = AssignmentTable::parse(REFERENCE_CIRCUIT)
        .ok()
        .and_then(|table| resolve_all(&table, Strategy::Recursive).ok())
        .map(|store| expected.iter().all(|(w, v)| store.get(w) == Some(*v)))
        .unwrap_or(false);
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 2: Reversed input order
    print!("Forward references... ");
    let reversed: Vec<&str> = REFERENCE_CIRCUIT.iter().rev().copied().collect();
    let ok = AssignmentTable::parse(reversed)
        .ok()
        .and_then(|table| resolve_all(&table, Strategy::Worklist).ok())
        .map(|store| expected.iter().all(|(w, v)| store.get(w) == Some(*v)))
        .unwrap_or(false);
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 3: Masking
    print!("16-bit masking... ");
    let ok = AssignmentTable::parse(["NOT 0 -> a", "65535 LSHIFT 1 -> b"])
        .ok()
        .and_then(|table| resolve_all(&table, Strategy::Recursive).ok())
        .map(|store| store.get("a") == Some(65535) && store.get("b") == Some(0xFFFE))
        .unwrap_or(false);
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 4: Cycle detection
    print!("Cycle detection... ");
    let ok = match AssignmentTable::parse(["b -> a", "a -> b"]) {
        Ok(table) => matches!(
            Resolver::new(&table).resolve("a"),
            Err(ResolveError::CircularDependency { .. })
        ),
        Err(_) => false,
    };
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 5: Unknown wire
    print!("Unknown wire... ");
    let ok = match AssignmentTable::parse(["z -> d"]) {
        Ok(table) => matches!(
            Resolver::new(&table).resolve("d"),
            Err(ResolveError::UnknownWire { .. })
        ),
        Err(_) => false,
    };
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    // Test 6: Duplicate assignment
    print!("Duplicate assignment... ");
    let ok = matches!(
        AssignmentTable::parse(["1 -> a", "2 -> a"]),
        Err(TableError::DuplicateAssignment { .. })
    );
    if ok { println!("✓"); passed += 1; }
    else { println!("✗"); failed += 1; }

    println!();
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("Results: {} passed, {} failed", passed, failed);

    if failed == 0 {
        println!("✓ All tests passed!");
    } else {
        std::process::exit(1);
    }
}

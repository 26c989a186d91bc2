//! Property-Based and Fuzz Testing
//!
//! Uses quickcheck for property-based testing of:
//! - Normalization idempotence and exactness
//! - Decomposition round-trip fidelity
//! - Pipeline robustness against arbitrary input (no panics)

use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

use crate::namer::NameAllocator;
use crate::{Function, decompose, parse_definition};

// ============================================================
// PART 1: GENERATORS
// ============================================================

/// Generate random loosely-written definition strings over x/y and the
/// reserved names
fn random_definition(g: &mut Gen) -> String {
    let depth = g.size().min(4);
    gen_definition_recursive(g, depth)
}

fn gen_definition_recursive(g: &mut Gen, depth: usize) -> String {
    if depth == 0 {
        let choice: u8 = u8::arbitrary(g) % 5;
        match choice {
            0 => format!("{}", u8::arbitrary(g) % 100),
            1 => "x".to_string(),
            2 => "y".to_string(),
            3 => "pi".to_string(),
            _ => "2".to_string(),
        }
    } else {
        let choice: u8 = u8::arbitrary(g) % 10;
        match choice {
            0..=3 => {
                let ops = ["+", "-", "*", "/"];
                let op = ops[usize::arbitrary(g) % ops.len()];
                let left = gen_definition_recursive(g, depth - 1);
                let right = gen_definition_recursive(g, depth - 1);
                format!("({} {} {})", left, op, right)
            }
            4..=6 => {
                let fns = ["sin", "cos", "tan", "exp", "ln", "sqrt"];
                let f = fns[usize::arbitrary(g) % fns.len()];
                let arg = gen_definition_recursive(g, depth - 1);
                format!("{}({})", f, arg)
            }
            7 => {
                // Juxtaposed factor, the ambiguity normalization resolves
                let n = u8::arbitrary(g) % 10;
                format!("{}x", n)
            }
            8 => {
                let exponent = u8::arbitrary(g) % 5;
                let base = gen_definition_recursive(g, depth - 1);
                format!("({})^{}", base, exponent)
            }
            _ => gen_definition_recursive(g, depth - 1),
        }
    }
}

// ============================================================
// PART 2: NORMALIZATION PROPERTIES
// ============================================================

#[test]
fn prop_normalization_is_idempotent() {
    fn property(seed: u64) -> TestResult {
        let mut g = Gen::new((seed % 5 + 1) as usize);
        let raw = random_definition(&mut g);
        let Ok(once) = Function::new("x", "y", raw.as_str()).prepare() else {
            return TestResult::discard();
        };
        match Function::new("x", "y", once.definition()).prepare() {
            Ok(twice) => TestResult::from_bool(once.definition() == twice.definition()),
            Err(_) => TestResult::failed(),
        }
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(property as fn(u64) -> TestResult);
}

#[test]
fn prop_normalization_never_panics_on_arbitrary_input() {
    fn property(raw: String) -> bool {
        // Errors are fine; panics are not
        let _ = Function::new("x", "y", raw.as_str()).prepare();
        true
    }
    QuickCheck::new()
        .tests(1000)
        .quickcheck(property as fn(String) -> bool);
}

// ============================================================
// PART 3: DECOMPOSITION PROPERTIES
// ============================================================

#[test]
fn prop_decomposition_round_trips() {
    fn property(seed: u64) -> TestResult {
        let mut g = Gen::new((seed % 5 + 1) as usize);
        let raw = random_definition(&mut g);
        let Ok(f) = Function::new("x", "y", raw.as_str()).prepare() else {
            return TestResult::discard();
        };
        let Ok(tree) = parse_definition(&f) else {
            return TestResult::discard();
        };
        let Ok(decomp) = decompose(&f) else {
            return TestResult::discard();
        };
        // Redundant parentheses in the source render away, so the laws
        // compare trees, not strings
        TestResult::from_bool(decomp.reconstruct() == tree)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(property as fn(u64) -> TestResult);
}

#[test]
fn prop_binding_names_are_unique() {
    fn property(seed: u64) -> TestResult {
        let mut g = Gen::new((seed % 5 + 1) as usize);
        let raw = random_definition(&mut g);
        let Ok(f) = Function::new("x", "y", raw.as_str()).prepare() else {
            return TestResult::discard();
        };
        let Ok(decomp) = decompose(&f) else {
            return TestResult::discard();
        };
        let mut names: Vec<&str> = decomp.bindings().iter().map(|b| b.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        TestResult::from_bool(names.len() == total)
    }
    QuickCheck::new()
        .tests(500)
        .quickcheck(property as fn(u64) -> TestResult);
}

// ============================================================
// PART 4: NAME ALLOCATION PROPERTIES
// ============================================================

#[test]
fn prop_allocator_is_deterministic_and_collision_free() {
    fn property(excluded: Vec<String>, count: u8) -> bool {
        let count = (count % 64) as usize;
        let mut a = NameAllocator::new(excluded.clone());
        let mut b = NameAllocator::new(excluded.clone());
        let mut seen = std::collections::HashSet::new();
        for _ in 0..count {
            let name = a.next();
            if b.next() != name {
                return false;
            }
            if excluded.contains(&name) || !seen.insert(name) {
                return false;
            }
        }
        true
    }
    QuickCheck::new()
        .tests(200)
        .quickcheck(property as fn(Vec<String>, u8) -> bool);
}

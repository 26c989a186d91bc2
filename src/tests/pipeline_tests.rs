//! End-to-end tests driving normalization, decomposition, and
//! differentiation through the public API

use crate::{
    CasError, Function, FunctionBinding, FunctionPrototype, decompose, derivative, derive,
};

#[test]
fn test_prepare_normalizes_the_worked_example() {
    let f = Function::new("x", "y", "3x + 4sin45 - ysiny + sin(lnx)")
        .prepare()
        .unwrap();
    assert_eq!(f.definition(), "3×x+4×sin(45)-y×sin(y)+sin(ln(x))");
}

#[test]
fn test_decomposition_round_trip() {
    let f = Function::new("x", "y", "3x + 4sin45 - ysiny + sin(lnx)")
        .prepare()
        .unwrap();
    let decomp = decompose(&f).unwrap();

    // Substituting every entry back reproduces the normalized definition
    assert_eq!(format!("{}", decomp.reconstruct()), f.definition());

    // Every non-root body is elementary and carries a fresh name
    for binding in decomp.bindings() {
        let Some(body) = binding.body() else { continue };
        assert!(body.node_count() <= 3, "non-elementary body: {}", body);
    }
}

#[test]
fn test_derivative_of_the_worked_example() {
    let f = Function::new("x", "y", "3x + 4sin45 - ysiny + sin(lnx)")
        .prepare()
        .unwrap();
    let d = derivative(&f).unwrap();
    assert_eq!(
        d.definition(),
        "3-(y'(x)×sin(y)+y×(cos(y)×y'(x)))+cos(ln(x))×(1÷x)"
    );
    assert!(d.is_prepared());
}

#[test]
fn test_string_api() {
    assert_eq!(derive("x^2", "x", "y", None, None).unwrap(), "2×x");
    assert_eq!(
        derive("b x", "x", "y", Some(&["b"]), None).unwrap(),
        "b"
    );
    assert_eq!(
        derive("g(3x)", "x", "y", None, Some(&["g"])).unwrap(),
        "g'(3×x)×3"
    );
}

#[test]
fn test_unprepared_function_is_rejected_everywhere() {
    let raw = Function::new("x", "y", "3x");
    assert!(matches!(
        decompose(&raw).unwrap_err(),
        CasError::UnpreparedFunction { .. }
    ));
    assert!(matches!(
        derivative(&raw).unwrap_err(),
        CasError::UnpreparedFunction { .. }
    ));
}

#[test]
fn test_undeclared_symbol_surfaces_at_decomposition() {
    let f = Function::new("x", "y", "x + q").prepare().unwrap();
    let err = decompose(&f).unwrap_err();
    assert!(matches!(err, CasError::UnknownSymbol { token, .. } if token == "q"));
}

#[test]
fn test_symbol_collisions() {
    let err = Function::new("x", "y", "x")
        .assume_constants(["ln"])
        .prepare()
        .unwrap_err();
    assert!(matches!(err, CasError::AmbiguousSymbol { name, .. } if name == "ln"));

    let err = Function::new("a", "y", "a")
        .assume_constants(["a"])
        .prepare()
        .unwrap_err();
    assert!(matches!(err, CasError::AmbiguousSymbol { name, .. } if name == "a"));
}

#[test]
fn test_variable_exponent_is_unsupported() {
    let err = derive("x^x", "x", "y", None, None).unwrap_err();
    assert!(matches!(err, CasError::UnsupportedDerivative { .. }));
}

#[test]
fn test_assumed_function_stays_opaque() {
    let f = Function::new("x", "y", "g(sinx)")
        .assume_function(FunctionPrototype::new("u", "g"))
        .prepare()
        .unwrap();
    let d = derivative(&f).unwrap();
    assert_eq!(d.definition(), "g'(sin(x))×cos(x)");
}

#[test]
fn test_free_functions_appear_in_decomposition() {
    let f = Function::new("x", "y", "g(x)")
        .assume_function(FunctionPrototype::new("u", "g"))
        .prepare()
        .unwrap();
    let decomp = decompose(&f).unwrap();
    assert!(matches!(
        decomp.get("g"),
        Some(FunctionBinding::Free(_))
    ));
}

#[test]
fn test_derivative_chains_through_quotient() {
    assert_eq!(
        derive("sinx ÷ x", "x", "y", None, None).unwrap(),
        "(cos(x)×x-sin(x))÷(x×x)"
    );
}

#[test]
fn test_second_derivative_of_polynomial() {
    let f = Function::new("x", "y", "x^3").prepare().unwrap();
    let first = derivative(&f).unwrap();
    assert_eq!(first.definition(), "3×x^2");
    let second = derivative(&first).unwrap();
    assert_eq!(second.definition(), "3×(2×x)");
}

#[test]
fn test_explicit_grouping_survives_the_pipeline() {
    let f = Function::new("x", "y", "(x+1)(x+2)").prepare().unwrap();
    assert_eq!(f.definition(), "(x+1)×(x+2)");
    let decomp = decompose(&f).unwrap();
    assert_eq!(format!("{}", decomp.reconstruct()), "(x+1)×(x+2)");
}

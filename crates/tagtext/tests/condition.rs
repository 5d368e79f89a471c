//! Tests for the standalone boolean condition entry point used by
//! automation callers.

use tagtext::{EvalContext, EvalError, FunctionRegistry, params};

fn shout(_ctx: &mut EvalContext, params: &[String]) -> Result<String, EvalError> {
    Ok(params.join("").to_uppercase())
}

fn registry() -> FunctionRegistry {
    let mut registry = FunctionRegistry::with_builtins();
    registry.register("shout", shout);
    registry
}

// =============================================================================
// Tag substitution
// =============================================================================

#[test]
fn condition_substitutes_tag_call_result() {
    let registry = registry();
    let mut ctx = EvalContext::with_params(params! { "qty" => "10" });
    assert!(registry.evaluate_condition("<TAG get_param qty /> > 5", &mut ctx));

    let mut ctx = EvalContext::with_params(params! { "qty" => "3" });
    assert!(!registry.evaluate_condition("<TAG get_param qty /> > 5", &mut ctx));
}

#[test]
fn condition_substitutes_multiple_calls() {
    let registry = registry();
    let mut ctx = EvalContext::with_params(params! { "a" => "2", "b" => "3" });
    assert!(registry.evaluate_condition(
        "<TAG get_param a /> + <TAG get_param b /> == 5",
        &mut ctx
    ));
}

#[test]
fn condition_call_result_can_be_boolean_text() {
    let registry = registry();
    let mut ctx = EvalContext::with_params(params! { "flag" => "true" });
    // "true" substitutes textually and then parses as the TRUE literal.
    assert!(registry.evaluate_condition("<TAG get_param flag />", &mut ctx));
}

#[test]
fn nested_calls_reduce_innermost_first() {
    let registry = registry();
    let mut ctx = EvalContext::with_params(params! { "word" => "true" });
    assert!(registry.evaluate_condition("<TAG shout <TAG get_param word /> />", &mut ctx));
}

// =============================================================================
// Plain expressions
// =============================================================================

#[test]
fn condition_without_calls_evaluates_directly() {
    let registry = registry();
    let mut ctx = EvalContext::new();
    assert!(registry.evaluate_condition("1 + 1 == 2", &mut ctx));
    assert!(!registry.evaluate_condition("1 + 1 == 3", &mut ctx));
}

#[test]
fn numeric_result_is_not_truthy() {
    let registry = registry();
    let mut ctx = EvalContext::new();
    assert!(!registry.evaluate_condition("5", &mut ctx));
}

// =============================================================================
// Failure handling: errors become false, never propagate
// =============================================================================

#[test]
fn empty_condition_is_false() {
    let registry = registry();
    let mut ctx = EvalContext::new();
    assert!(!registry.evaluate_condition("", &mut ctx));
    assert!(!registry.evaluate_condition("   ", &mut ctx));
}

#[test]
fn unparseable_condition_is_false_and_logged() {
    let registry = registry();
    let mut ctx = EvalContext::new();
    assert!(!registry.evaluate_condition("garbage words", &mut ctx));
    assert!(ctx.has_errors());
}

#[test]
fn unknown_function_in_condition_is_false_and_logged() {
    let registry = registry();
    let mut ctx = EvalContext::new();
    assert!(!registry.evaluate_condition("<TAG nope /> > 5", &mut ctx));
    assert!(ctx.errors_text().contains("unknown function"));
}

#[test]
fn unterminated_call_in_condition_is_false() {
    let registry = registry();
    let mut ctx = EvalContext::new();
    assert!(!registry.evaluate_condition("<TAG get_param qty > 5", &mut ctx));
    assert!(ctx.has_errors());
}

#[test]
fn failed_division_in_condition_is_false_and_logged() {
    let registry = registry();
    let mut ctx = EvalContext::new();
    assert!(!registry.evaluate_condition("10 / 0 > 1", &mut ctx));
    assert!(ctx.errors_text().contains("division by zero"));
}

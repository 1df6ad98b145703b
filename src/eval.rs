// ABOUTME: Evaluator executing value trees against an environment

use crate::env::Environment;
use crate::error::LispError;
use crate::forms;
use crate::value::Value;
use std::rc::Rc;

/// Evaluate one expression. Recursion depth is bounded by the host call
/// stack; there is no tail-call optimization.
pub fn eval(expr: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    if let Some(name) = expr.symbol_name() {
        return env
            .get(name)
            .ok_or_else(|| LispError::UnboundVariable(name.to_string()));
    }
    if expr.is_self_evaluating() {
        return Ok(expr.clone());
    }
    if expr.is_nil() {
        return Err(LispError::EmptyList);
    }
    let Value::Pair(pair) = expr else {
        return Err(LispError::MalformedList(expr.to_string()));
    };

    // Special forms receive their operands unevaluated
    if let Some(name) = pair.car.symbol_name() {
        if let Some(form) = forms::special_form(name) {
            return form(&pair.cdr, env);
        }
    }

    let operator = eval(&pair.car, env)?;
    let operands = eval_list(&pair.cdr, env)?;
    apply(&operator, &operands, env)
}

/// Apply a procedure to already-evaluated arguments.
pub fn apply(operator: &Value, args: &[Value], env: &Rc<Environment>) -> Result<Value, LispError> {
    match operator {
        Value::Builtin(builtin) => (builtin.func)(args, env),
        Value::Lambda(lambda) => {
            let child = lambda.env.create_child(&lambda.params, args.to_vec())?;
            let results = eval_list(&lambda.body, &child)?;
            results
                .into_iter()
                .last()
                .ok_or_else(|| LispError::custom("Procedure body is empty"))
        }
        _ => Err(LispError::NotAProcedure(operator.to_string())),
    }
}

/// Evaluate each element of a proper list, left to right.
pub fn eval_list(expr: &Value, env: &Rc<Environment>) -> Result<Vec<Value>, LispError> {
    let mut results = Vec::new();
    let mut current = expr;
    loop {
        match current {
            Value::Nil => return Ok(results),
            Value::Pair(pair) => {
                results.push(eval(&pair.car, env)?);
                current = &pair.cdr;
            }
            other => return Err(LispError::MalformedList(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::new_token_queue;
    use crate::tokenizer::tokenize_into;

    fn parse(input: &str) -> Value {
        let queue = new_token_queue();
        tokenize_into(input, &queue).expect("tokenize failed");
        crate::reader::Reader::new(queue).read().expect("read failed")
    }

    fn run(env: &Rc<Environment>, input: &str) -> Result<Value, LispError> {
        eval(&parse(input), env)
    }

    #[test]
    fn test_self_evaluating() {
        let env = Environment::new();
        assert!(matches!(run(&env, "42"), Ok(Value::Number(n)) if n == 42.0));
        assert!(matches!(run(&env, "#f"), Ok(Value::Boolean(false))));
        assert!(matches!(run(&env, r#""s""#), Ok(Value::String(s)) if *s == "s"));
    }

    #[test]
    fn test_symbol_lookup() {
        let env = Environment::new();
        env.define("x", Value::Number(42.0));
        assert!(matches!(run(&env, "x"), Ok(Value::Number(n)) if n == 42.0));
    }

    #[test]
    fn test_unbound_variable() {
        let env = Environment::new();
        let result = run(&env, "nope");
        match result {
            Err(LispError::UnboundVariable(name)) => assert_eq!(name, "nope"),
            other => panic!("Expected UnboundVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_list_is_an_error() {
        let env = Environment::new();
        let result = run(&env, "(quote ())").and_then(|v| eval(&v, &env));
        assert!(matches!(result, Err(LispError::EmptyList)));
    }

    #[test]
    fn test_builtin_application() {
        let env = Environment::global();
        assert!(matches!(run(&env, "(+ 1 2 3)"), Ok(Value::Number(n)) if n == 6.0));
    }

    #[test]
    fn test_nested_application() {
        let env = Environment::global();
        assert!(matches!(run(&env, "(* (+ 1 2) 3)"), Ok(Value::Number(n)) if n == 9.0));
    }

    #[test]
    fn test_operands_evaluate_left_to_right() {
        let env = Environment::global();
        // The second operand references the binding created by the first;
        // any other order would be an unbound-variable error
        let result = run(&env, "(list (define a 1) a)").unwrap();
        assert_eq!(result.to_string(), "(a 1)");
    }

    #[test]
    fn test_lambda_application() {
        let env = Environment::global();
        assert!(matches!(
            run(&env, "((lambda (x) (* x x)) 6)"),
            Ok(Value::Number(n)) if n == 36.0
        ));
    }

    #[test]
    fn test_lambda_body_sequence_returns_last() {
        let env = Environment::global();
        assert!(matches!(
            run(&env, "((lambda (x) 1 2 (+ x 1)) 10)"),
            Ok(Value::Number(n)) if n == 11.0
        ));
    }

    #[test]
    fn test_closure_captures_environment() {
        let env = Environment::global();
        run(&env, "(define (make-adder n) (lambda (x) (+ x n)))").unwrap();
        run(&env, "(define add5 (make-adder 5))").unwrap();
        assert!(matches!(run(&env, "(add5 10)"), Ok(Value::Number(n)) if n == 15.0));
    }

    #[test]
    fn test_closure_over_lambda_parameter() {
        let env = Environment::global();
        run(&env, "(define add10 ((lambda (x) (lambda (y) (+ x y))) 10))").unwrap();
        assert!(matches!(run(&env, "(add10 5)"), Ok(Value::Number(n)) if n == 15.0));
    }

    #[test]
    fn test_recursive_function() {
        let env = Environment::global();
        run(
            &env,
            "(define (fact n) (if (= n 0) 1 (* n (fact (- n 1)))))",
        )
        .unwrap();
        assert!(matches!(run(&env, "(fact 5)"), Ok(Value::Number(n)) if n == 120.0));
    }

    #[test]
    fn test_not_a_procedure() {
        let env = Environment::global();
        assert!(matches!(run(&env, "(42 1)"), Err(LispError::NotAProcedure(_))));
    }

    #[test]
    fn test_procedure_arity_mismatch() {
        let env = Environment::global();
        assert!(run(&env, "((lambda (x) x) 1 2)").is_err());
    }

    #[test]
    fn test_malformed_operand_list() {
        let env = Environment::global();
        let expr = parse("(+ 1 . 2)");
        assert!(matches!(eval(&expr, &env), Err(LispError::MalformedList(_))));
    }

    #[test]
    fn test_eval_list_returns_all_results() {
        let env = Environment::global();
        let expr = parse("(1 2 3)");
        let results = eval_list(&expr, &env).unwrap();
        assert_eq!(results.len(), 3);
        assert!(matches!(results[2], Value::Number(n) if n == 3.0));
    }
}

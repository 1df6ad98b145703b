// ABOUTME: Special forms - syntactic forms whose operands are not pre-evaluated

use crate::env::Environment;
use crate::error::{LispError, ARITY_AT_LEAST_ONE, ARITY_AT_LEAST_TWO, ARITY_TWO};
use crate::eval::{eval, eval_list};
use crate::value::{Lambda, Value};
use std::collections::HashSet;
use std::rc::Rc;

pub type SpecialFormFn = fn(&Value, &Rc<Environment>) -> Result<Value, LispError>;

/// Names recognized inside form templates, exported for the REPL highlighter.
pub const SPECIAL_FORM_NAMES: &[&str] = &[
    "define",
    "lambda",
    "quote",
    "quasiquote",
    "unquote",
    "begin",
    "if",
    "and",
    "or",
    "cond",
    "let",
    "else",
];

/// Look up the handler for a special form by head symbol name.
pub fn special_form(name: &str) -> Option<SpecialFormFn> {
    Some(match name {
        "define" => define_form,
        "lambda" => lambda_form,
        "quote" => quote_form,
        "quasiquote" => quasiquote_form,
        "begin" => begin_form,
        "if" => if_form,
        "and" => and_form,
        "or" => or_form,
        "cond" => cond_form,
        "let" => let_form,
        _ => return None,
    })
}

/// Convert the operand list to a vector, enforcing an operand count range.
fn operands(
    form: &Value,
    name: &'static str,
    min: usize,
    max: usize,
) -> Result<Vec<Value>, LispError> {
    let vec = form.to_vec()?;
    if vec.len() < min || vec.len() > max {
        let expected = if min == max {
            min.to_string()
        } else if max == usize::MAX {
            format!("at least {}", min)
        } else {
            format!("{}-{}", min, max)
        };
        return Err(LispError::arity(name, expected, vec.len()));
    }
    Ok(vec)
}

/// (define name expr) or (define (name . formals) body...)
fn define_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let args = operands(form, "define", 2, usize::MAX)?;
    match &args[0] {
        Value::Symbol(name) => {
            if args.len() > 2 {
                return Err(LispError::arity("define", ARITY_TWO, args.len()));
            }
            let value = eval(&args[1], env)?;
            env.define(name.clone(), value);
            Ok(args[0].clone())
        }
        Value::Pair(decl) => {
            let Some(name) = decl.car.symbol_name() else {
                return Err(LispError::custom(format!(
                    "define: {} is not a symbol name",
                    decl.car
                )));
            };
            // (define (f . formals) body...) == (define f (lambda formals body...))
            let Some((_, body)) = form.as_pair() else {
                return Err(LispError::MalformedList(form.to_string()));
            };
            let lambda_operands = Value::cons(decl.cdr.clone(), body.clone());
            let procedure = lambda_form(&lambda_operands, env)?;
            env.define(name.to_string(), procedure);
            Ok(decl.car.clone())
        }
        other => Err(LispError::custom(format!(
            "Malformed define form: {}",
            other
        ))),
    }
}

/// (lambda (p1 ... pn) body...)
fn lambda_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    operands(form, "lambda", 2, usize::MAX)?;
    let Some((formals, body)) = form.as_pair() else {
        return Err(LispError::MalformedList(form.to_string()));
    };

    let mut params = Vec::new();
    let mut seen = HashSet::new();
    let mut current = formals;
    while let Value::Pair(cell) = current {
        let Some(name) = cell.car.symbol_name() else {
            return Err(LispError::custom(format!(
                "Expect symbol in lambda parameter, found {}",
                cell.car
            )));
        };
        if !seen.insert(name.to_string()) {
            return Err(LispError::DuplicateParameter(name.to_string()));
        }
        params.push(name.to_string());
        current = &cell.cdr;
    }

    Ok(Value::Lambda(Rc::new(Lambda {
        params,
        body: body.clone(),
        env: env.clone(),
    })))
}

/// (quote x)
fn quote_form(form: &Value, _env: &Rc<Environment>) -> Result<Value, LispError> {
    let mut args = operands(form, "quote", 1, 1)?;
    Ok(args.remove(0))
}

/// (quasiquote template)
fn quasiquote_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let args = operands(form, "quasiquote", 1, 1)?;
    quasiquote_item(&args[0], env, 1)
}

/// Walk a quasiquote template. `unquote` at level 1 is the only point that
/// evaluates; nested quasiquotes raise the level, unquotes lower it.
fn quasiquote_item(
    template: &Value,
    env: &Rc<Environment>,
    level: usize,
) -> Result<Value, LispError> {
    let Value::Pair(pair) = template else {
        return Ok(template.clone());
    };
    let mut level = level;
    if let Some(name) = pair.car.symbol_name() {
        if name == "unquote" {
            level -= 1;
            if level == 0 {
                let args = operands(&pair.cdr, "unquote", 1, 1)?;
                return eval(&args[0], env);
            }
        } else if name == "quasiquote" {
            level += 1;
        }
    }
    let car = quasiquote_item(&pair.car, env, level)?;
    let cdr = quasiquote_item(&pair.cdr, env, level)?;
    Ok(Value::cons(car, cdr))
}

/// (begin e1 ... en)
fn begin_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    operands(form, "begin", 1, usize::MAX)?;
    let mut results = eval_list(form, env)?;
    results
        .pop()
        .ok_or_else(|| LispError::arity("begin", ARITY_AT_LEAST_ONE, 0))
}

/// (if test then) or (if test then else)
fn if_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let args = operands(form, "if", 2, 3)?;
    if eval(&args[0], env)?.is_true() {
        eval(&args[1], env)
    } else if args.len() == 3 {
        eval(&args[2], env)
    } else {
        Ok(Value::Nil)
    }
}

/// (and e1 ... en) - first falsy value, else the last value; #t when empty
fn and_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let mut result = Value::Boolean(true);
    let mut current = form;
    while let Value::Pair(pair) = current {
        let value = eval(&pair.car, env)?;
        if !value.is_true() {
            return Ok(value);
        }
        result = value;
        current = &pair.cdr;
    }
    Ok(result)
}

/// (or e1 ... en) - first truthy value, else #f
fn or_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let mut current = form;
    while let Value::Pair(pair) = current {
        let value = eval(&pair.car, env)?;
        if value.is_true() {
            return Ok(value);
        }
        current = &pair.cdr;
    }
    Ok(Value::Boolean(false))
}

/// (cond (test body...) ... (else body...))
fn cond_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let clauses = form.to_vec()?;
    let count = clauses.len();
    for (index, clause) in clauses.iter().enumerate() {
        let parts = operands(clause, "cond", 1, usize::MAX)?;
        let test = if parts[0].symbol_name() == Some("else") {
            if index + 1 != count {
                return Err(LispError::custom("else clause must be the last one"));
            }
            Value::Boolean(true)
        } else {
            eval(&parts[0], env)?
        };
        if test.is_true() {
            // A bare test clause yields the test value itself
            let mut result = test;
            for expr in &parts[1..] {
                result = eval(expr, env)?;
            }
            return Ok(result);
        }
    }
    Ok(Value::Nil)
}

/// (let ((n1 v1) ...) body...) - values evaluate in the enclosing
/// environment, then all bindings land in one fresh child frame.
fn let_form(form: &Value, env: &Rc<Environment>) -> Result<Value, LispError> {
    let args = operands(form, "let", 2, usize::MAX)?;
    let Some((_, body)) = form.as_pair() else {
        return Err(LispError::MalformedList(form.to_string()));
    };

    let bindings = args[0].to_vec()?;
    let mut names = Vec::new();
    let mut values = Vec::new();
    for binding in &bindings {
        let parts = operands(binding, "let", 2, 2)?;
        let Some(name) = parts[0].symbol_name() else {
            return Err(LispError::custom(format!(
                "Expect let binding name, found {}",
                parts[0]
            )));
        };
        values.push(eval(&parts[1], env)?);
        names.push(name.to_string());
    }

    let child = env.create_child(&names, values)?;
    let mut results = eval_list(body, &child)?;
    results
        .pop()
        .ok_or_else(|| LispError::arity("let", ARITY_AT_LEAST_TWO, args.len()))
}

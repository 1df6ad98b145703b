// ABOUTME: Environment frames for variable bindings and lexical scopes

use crate::error::LispError;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A name→value frame with an optional parent. Children hold their parent
/// alive; a closure defined into the environment it captures forms a cycle
/// that lives until process exit (acceptable for a CLI).
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    /// Creates an empty frame with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    /// Creates the global environment, pre-populated with the builtin table.
    pub fn global() -> Rc<Self> {
        let env = Environment::new();
        crate::builtins::register_builtins(&env);
        env
    }

    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(parent),
        })
    }

    /// Installs or overwrites a binding in THIS frame only.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Looks up a name in this frame, then up the parent chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        match &self.parent {
            Some(parent) => parent.get(name),
            None => None,
        }
    }

    /// Creates a child frame binding each parameter to the corresponding
    /// argument. Counts must match.
    pub fn create_child(
        self: &Rc<Self>,
        params: &[String],
        args: Vec<Value>,
    ) -> Result<Rc<Self>, LispError> {
        if params.len() != args.len() {
            return Err(LispError::custom(format!(
                "Procedure expected {} parameters, got {}",
                params.len(),
                args.len()
            )));
        }
        let child = Environment::with_parent(self.clone());
        for (param, arg) in params.iter().zip(args) {
            child.define(param.clone(), arg);
        }
        Ok(child)
    }

    /// Walks to the global frame at the top of the parent chain.
    pub fn root(self: &Rc<Self>) -> Rc<Self> {
        let mut current = self.clone();
        while let Some(parent) = current.parent.clone() {
            current = parent;
        }
        current
    }
}

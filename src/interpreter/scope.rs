use std::{
    collections::{HashMap, HashSet},
    rc::Rc,
};

use tracing::trace;

use crate::{
    ast::FunctionDef,
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::core::Value},
};

/// Index of a frame inside a [`Scope`].
pub type FrameId = usize;

/// One level of the scope chain.
#[derive(Debug, Default)]
struct Frame {
    values:    HashMap<String, Value>,
    /// Keyed `name/arity`.
    functions: HashMap<String, Rc<FunctionDef>>,
    /// Keys registered by a forward declaration and not yet given a body.
    declared:  HashSet<String>,
    parent:    Option<FrameId>,
    /// Assignments do not walk past a barrier frame.
    barrier:   bool,
}

/// The chain of variable and function frames.
///
/// Frames live in an arena and refer to their parent by index. Blocks and
/// calls push a frame on entry and pop it on exit, so the arena behaves as a
/// stack whose top is the current frame. A call frame is a barrier: code in
/// the function can read every enclosing variable but can only assign to
/// names it declared itself.
///
/// # Example
/// ```
/// use scriptit::interpreter::{scope::Scope, value::core::Value};
///
/// let mut scope = Scope::new();
/// scope.define("x", Value::Integer(1));
///
/// scope.push_frame(true);
/// assert_eq!(scope.get("x"), Value::Integer(1));
/// assert!(scope.set("x", Value::Integer(2)).is_err());
/// scope.pop_frame();
///
/// assert!(scope.set("x", Value::Integer(3)).is_ok());
/// assert_eq!(scope.get("x"), Value::Integer(3));
/// ```
#[derive(Debug)]
pub struct Scope {
    frames: Vec<Frame>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Creates a scope holding only the root frame.
    #[must_use]
    pub fn new() -> Self {
        Self { frames: vec![Frame::default()] }
    }

    const fn current(&self) -> FrameId {
        self.frames.len().saturating_sub(1)
    }

    fn current_frame(&mut self) -> &mut Frame {
        let id = self.current();
        &mut self.frames[id]
    }

    /// Iterates the frames from the current one up to the root.
    fn chain(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.frames.last(), |frame| frame.parent.map(|id| &self.frames[id]))
    }

    /// The number of frames, including the root.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Opens a new frame whose parent is the current one.
    pub fn push_frame(&mut self, barrier: bool) {
        let parent = self.current();
        self.frames.push(Frame { parent: Some(parent),
                                 barrier,
                                 ..Frame::default() });
        trace!(depth = self.frames.len(), barrier, "pushed frame");
    }

    /// Discards the current frame. The root frame is never removed.
    pub fn pop_frame(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
            trace!(depth = self.frames.len(), "popped frame");
        }
    }

    /// Reads a variable, searching the whole chain.
    ///
    /// Barriers only restrict assignment, so function bodies can read
    /// variables of their callers. A name that is not found reads as
    /// `None`.
    #[must_use]
    pub fn get(&self, name: &str) -> Value {
        self.lookup(name).cloned().unwrap_or_default()
    }

    /// Like [`Scope::get`], but distinguishes a missing name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Value> {
        self.chain().find_map(|frame| frame.values.get(name))
    }

    /// Assigns to an existing variable.
    ///
    /// The nearest frame holding `name` is updated, but the search stops at
    /// the first barrier frame.
    ///
    /// # Errors
    /// `UndefinedForMutation` when no reachable frame holds `name`.
    pub fn set(&mut self, name: &str, value: Value) -> EvalResult<()> {
        let mut id = Some(self.current());

        while let Some(index) = id {
            let frame = &mut self.frames[index];
            if let Some(slot) = frame.values.get_mut(name) {
                *slot = value;
                return Ok(());
            }
            if frame.barrier {
                break;
            }
            id = frame.parent;
        }

        Err(RuntimeError::UndefinedForMutation { name: name.to_string() })
    }

    /// Creates or overwrites a variable in the current frame.
    pub fn define(&mut self, name: &str, value: Value) {
        self.current_frame().values.insert(name.to_string(), value);
    }

    /// Registers a function with a body in the current frame.
    ///
    /// An existing function with the same name and arity is replaced, and a
    /// pending forward declaration is resolved.
    pub fn define_function(&mut self, def: Rc<FunctionDef>) {
        let key = FunctionDef::key(&def.name, def.arity());
        let frame = self.current_frame();
        frame.declared.remove(&key);
        frame.functions.insert(key, def);
    }

    /// Registers a forward declaration in the current frame.
    ///
    /// # Errors
    /// `AlreadyDefined` when the frame already holds a body for this name and
    /// arity.
    pub fn declare_function(&mut self, def: Rc<FunctionDef>) -> EvalResult<()> {
        let key = FunctionDef::key(&def.name, def.arity());
        let frame = self.current_frame();

        if frame.functions.contains_key(&key) && !frame.declared.contains(&key) {
            return Err(RuntimeError::AlreadyDefined { name:  def.name.clone(),
                                                      arity: def.arity(), });
        }

        frame.declared.insert(key.clone());
        frame.functions.insert(key, def);
        Ok(())
    }

    /// Returns `true` when the current frame holds `name/arity`, declared or
    /// defined.
    #[must_use]
    pub fn has_local_function(&self, name: &str, arity: usize) -> bool {
        self.frames
            .last()
            .is_some_and(|frame| frame.functions.contains_key(&FunctionDef::key(name, arity)))
    }

    /// Looks up `name/arity` along the chain.
    ///
    /// The result may be a forward declaration without a body.
    #[must_use]
    pub fn get_function(&self, name: &str, arity: usize) -> Option<Rc<FunctionDef>> {
        let key = FunctionDef::key(name, arity);
        self.chain().find_map(|frame| frame.functions.get(&key)).cloned()
    }

    /// Returns `true` when `name/arity` is reachable.
    ///
    /// Functions are keyed by arity, so a two-parameter `area` does not make
    /// a one-parameter call resolvable.
    ///
    /// # Example
    /// ```
    /// use std::rc::Rc;
    ///
    /// use scriptit::{ast::FunctionDef, interpreter::scope::Scope};
    ///
    /// let area = FunctionDef { name:   "area".to_string(),
    ///                          params: vec!["w".to_string(), "h".to_string()],
    ///                          by_ref: vec![false, false],
    ///                          body:   Some(Rc::default()),
    ///                          line:   1, };
    ///
    /// let mut scope = Scope::new();
    /// scope.define_function(Rc::new(area.clone()));
    ///
    /// scope.push_frame(true);
    /// assert!(scope.has_function("area", 2));
    /// assert!(!scope.has_function("area", 1));
    /// scope.pop_frame();
    ///
    /// let forward = FunctionDef { body: None, ..area };
    /// assert!(scope.declare_function(Rc::new(forward)).is_err());
    /// ```
    #[must_use]
    pub fn has_function(&self, name: &str, arity: usize) -> bool {
        let key = FunctionDef::key(name, arity);
        self.chain().any(|frame| frame.functions.contains_key(&key))
    }

    /// Drops every frame and starts over with an empty root frame.
    pub fn clear(&mut self) {
        self.frames.clear();
        self.frames.push(Frame::default());
    }
}

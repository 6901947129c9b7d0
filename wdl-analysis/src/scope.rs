//! Name scopes used during type inference.

use indexmap::IndexMap;
use wdl_ast::Span;

use crate::types::Type;

/// The provenance of a name in a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameContext {
    /// The name was introduced by an input declaration.
    Input,
    /// The name was introduced by a private declaration.
    Declaration,
    /// The name was introduced by an output declaration.
    Output,
    /// The name is a scatter iteration variable.
    ScatterVariable,
    /// The name was introduced by a call statement.
    Call,
}

/// A name bound in a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Name {
    /// The type of the name.
    ty: Type,
    /// The span of the name's introduction.
    span: Span,
    /// The provenance of the name.
    context: NameContext,
}

impl Name {
    /// Creates a new name.
    pub fn new(ty: Type, span: Span, context: NameContext) -> Self {
        Self { ty, span, context }
    }

    /// Gets the type of the name.
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// Gets the span of the name's introduction.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Gets the provenance of the name.
    pub fn context(&self) -> NameContext {
        self.context
    }
}

/// A single scope of names, in introduction order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    /// The names of the scope.
    names: IndexMap<String, Name>,
}

impl Scope {
    /// Creates an empty scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a name local to this scope.
    pub fn get(&self, name: &str) -> Option<&Name> {
        self.names.get(name)
    }

    /// Inserts a name into the scope.
    ///
    /// Returns the previously bound name if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, value: Name) -> Option<Name> {
        self.names.insert(name.into(), value)
    }

    /// Iterates the names of the scope in introduction order.
    pub fn names(&self) -> impl Iterator<Item = (&str, &Name)> {
        self.names.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// A stack of scopes forming a context chain.
///
/// Lookup walks the chain innermost-first. The chain is also used to enforce
/// the shadowing policy: a nested scope may not redeclare a name visible in
/// an enclosing scope.
#[derive(Debug, Clone, Default)]
pub struct ScopeStack {
    /// The scopes, outermost first.
    scopes: Vec<Scope>,
}

impl ScopeStack {
    /// Creates a scope stack with a single empty scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::new()],
        }
    }

    /// Pushes a new innermost scope.
    pub fn push(&mut self) {
        self.scopes.push(Scope::new());
    }

    /// Pops the innermost scope.
    ///
    /// # Panics
    ///
    /// Panics if the stack would become empty.
    pub fn pop(&mut self) -> Scope {
        assert!(self.scopes.len() > 1, "cannot pop the outermost scope");
        self.scopes.pop().expect("stack should not be empty")
    }

    /// Looks up a name in the chain, innermost scope first.
    pub fn lookup(&self, name: &str) -> Option<&Name> {
        self.scopes.iter().rev().find_map(|s| s.get(name))
    }

    /// Gets the innermost scope.
    pub fn current(&self) -> &Scope {
        self.scopes.last().expect("stack should not be empty")
    }

    /// Gets the innermost scope mutably.
    pub fn current_mut(&mut self) -> &mut Scope {
        self.scopes.last_mut().expect("stack should not be empty")
    }
}

//! The type-name scope stack the grammar consults to tell a typedef'd type
//! name apart from an ordinary identifier while parsing a declaration.
//!
//! Grounded on the source project's `TypeScope` linked list (one scope per
//! compound statement, five name lists per scope: class/struct/union/enum/
//! typedef tags) and on `apollo-parser`'s `Parser` for the RAII-guard idiom
//! ([`ScopeGuard`] mirrors how that parser's `start_node` returns a value
//! whose `Drop` finishes the node, so a scope can't be left pushed by an
//! early return).

/// One nested scope's five name lists.
#[derive(Debug, Default, Clone)]
struct Names {
    class: Vec<String>,
    struct_: Vec<String>,
    union: Vec<String>,
    enum_: Vec<String>,
    typedef: Vec<String>,
}

/// A stack of nested [`Names`], one pushed per compound-statement entry.
/// Lookups walk outward from the innermost scope so a typedef inside a
/// block shadows one from an enclosing scope.
#[derive(Debug, Default)]
pub struct TypeScope {
    stack: Vec<Names>,
}

impl TypeScope {
    pub fn new() -> Self {
        Self {
            stack: vec![Names::default()],
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top_mut(&mut self) -> &mut Names {
        self.stack.last_mut().expect("scope stack is never empty")
    }

    fn lookup(&self, pick: impl Fn(&Names) -> &[String], name: &str) -> bool {
        self.stack.iter().rev().any(|n| pick(n).iter().any(|s| s == name))
    }

    pub fn add_class(&mut self, name: impl Into<String>) {
        self.top_mut().class.push(name.into());
    }
    pub fn add_struct(&mut self, name: impl Into<String>) {
        self.top_mut().struct_.push(name.into());
    }
    pub fn add_union(&mut self, name: impl Into<String>) {
        self.top_mut().union.push(name.into());
    }
    pub fn add_enum(&mut self, name: impl Into<String>) {
        self.top_mut().enum_.push(name.into());
    }
    pub fn add_typedef(&mut self, name: impl Into<String>) {
        self.top_mut().typedef.push(name.into());
    }

    pub fn is_class(&self, name: &str) -> bool {
        self.lookup(|n| &n.class, name)
    }
    pub fn is_struct(&self, name: &str) -> bool {
        self.lookup(|n| &n.struct_, name)
    }
    pub fn is_union(&self, name: &str) -> bool {
        self.lookup(|n| &n.union, name)
    }
    pub fn is_enum(&self, name: &str) -> bool {
        self.lookup(|n| &n.enum_, name)
    }
    pub fn is_typedef(&self, name: &str) -> bool {
        self.lookup(|n| &n.typedef, name)
    }

    /// True if `name` resolves to any tag or typedef kind in scope; the
    /// grammar uses this to decide whether an identifier can start a type
    /// specifier.
    pub fn is_type_name(&self, name: &str) -> bool {
        self.is_class(name)
            || self.is_struct(name)
            || self.is_union(name)
            || self.is_enum(name)
            || self.is_typedef(name)
    }

    /// Push a fresh, empty scope. Paired with [`TypeScope::pop`]; prefer
    /// [`ScopeGuard::enter`] or [`crate::parser::Parser::with_scope`] over
    /// calling this directly so the pop can't be forgotten on an early
    /// return.
    pub(crate) fn push(&mut self) {
        self.stack.push(Names::default());
    }

    pub(crate) fn pop(&mut self) {
        self.stack.pop();
        debug_assert!(!self.stack.is_empty(), "popped the outermost scope");
    }
}

/// Pushes a fresh scope on creation and pops it on drop, so every exit path
/// out of a compound-statement parse — early return, `?`, panic unwind —
/// leaves the stack balanced.
pub struct ScopeGuard<'a> {
    scope: &'a mut TypeScope,
}

impl<'a> ScopeGuard<'a> {
    pub fn enter(scope: &'a mut TypeScope) -> Self {
        scope.push();
        Self { scope }
    }

    pub fn scope(&mut self) -> &mut TypeScope {
        self.scope
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.scope.pop();
    }
}

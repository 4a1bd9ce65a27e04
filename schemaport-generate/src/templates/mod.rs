//! Templates turning render view models into SQL text.
//!
//! A [`TemplateRegistry`] maps each (action, dialect) pair to a [`Template`].
//! The registry is an ordinary value: build it once (usually with
//! [`TemplateRegistry::builtin`]) and hand it to the
//! [`Generator`](crate::Generator).

mod create;
mod dml;
mod select;

use std::collections::HashMap;
use std::sync::Arc;

use schemaport_schema::Dialect;

use crate::action::Action;
use crate::view::SchemaEntity;

pub use create::CreateTemplate;
pub use dml::{DeleteTemplate, InsertTemplate, UpdateTemplate};
pub use select::{SelectKind, SelectTemplate};

/// Input of a template: dependency-ordered entities for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Target dialect.
    pub dialect: Dialect,
    /// Entities in rendering order.
    pub entities: &'a [SchemaEntity],
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(dialect: Dialect, entities: &'a [SchemaEntity]) -> Self {
        Self { dialect, entities }
    }

    /// Quote an identifier for the target dialect.
    pub fn quote(&self, ident: &str) -> String {
        self.dialect.quote_ident(ident)
    }

    /// Quote and join a list of column names.
    pub fn quote_list<S: AsRef<str>>(&self, names: &[S]) -> String {
        names
            .iter()
            .map(|n| self.quote(n.as_ref()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Renders one action for every entity of a context.
pub trait Template: Send + Sync {
    /// Render the whole artifact.
    fn render(&self, ctx: &RenderContext<'_>) -> String;
}

impl<F> Template for F
where
    F: Fn(&RenderContext<'_>) -> String + Send + Sync,
{
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        self(ctx)
    }
}

/// Templates keyed by action and dialect.
#[derive(Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<(Action, Dialect), Arc<dyn Template>>,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the shipped templates for every action and dialect.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for dialect in Dialect::ALL {
            registry = registry
                .register(Action::Create, dialect, CreateTemplate)
                .register(Action::Insert, dialect, InsertTemplate)
                .register(Action::Update, dialect, UpdateTemplate)
                .register(Action::Delete, dialect, DeleteTemplate)
                .register(
                    Action::SelectSimple,
                    dialect,
                    SelectTemplate::new(SelectKind::Primary),
                )
                .register(
                    Action::SelectIndexedSimple,
                    dialect,
                    SelectTemplate::new(SelectKind::IndexedSimple),
                )
                .register(
                    Action::SelectIndexedCombined,
                    dialect,
                    SelectTemplate::new(SelectKind::IndexedCombined),
                );
        }
        registry
    }

    /// Register a template, replacing any previous one for the same key.
    pub fn register(
        mut self,
        action: Action,
        dialect: Dialect,
        template: impl Template + 'static,
    ) -> Self {
        self.templates.insert((action, dialect), Arc::new(template));
        self
    }

    /// Look up the template for an action and dialect.
    pub fn get(&self, action: Action, dialect: Dialect) -> Option<&dyn Template> {
        self.templates.get(&(action, dialect)).map(|t| t.as_ref())
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if no template is registered.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl std::fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<String> = self
            .templates
            .keys()
            .map(|(action, dialect)| format!("{}/{}", action, dialect))
            .collect();
        keys.sort();
        f.debug_struct("TemplateRegistry").field("templates", &keys).finish()
    }
}

/// Join per-entity statements into one artifact.
pub(crate) fn join_statements(statements: Vec<String>) -> String {
    if statements.is_empty() {
        return String::new();
    }
    let mut out = statements.join("\n\n");
    out.push('\n');
    out
}

/// `a = ?, b = ?` with placeholders numbered from `first`.
pub(crate) fn assignments(
    ctx: &RenderContext<'_>,
    names: &[&str],
    first: usize,
    separator: &str,
) -> String {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{} = {}", ctx.quote(name), ctx.dialect.placeholder(first + i)))
        .collect::<Vec<_>>()
        .join(separator)
}

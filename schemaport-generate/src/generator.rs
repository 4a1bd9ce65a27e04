//! Generation requests and the generator driving templates and sinks.

use std::path::PathBuf;

use futures::future::try_join_all;
use schemaport_schema::{Dialect, ProjectVersion};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::action::Action;
use crate::error::{GenerateError, GenerateResult};
use crate::render::build_schema_entities;
use crate::select::SelectOptions;
use crate::sink::OutputSink;
use crate::templates::{RenderContext, TemplateRegistry};

/// A request to render actions for a project version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Id of this execution, used to namespace output.
    pub execution_id: Uuid,
    /// Target dialect.
    pub dialect: Dialect,
    /// Model to render.
    pub project_version: ProjectVersion,
    /// Entities to render, by id.
    ///
    /// An empty list renders every entity rather than none, so a request
    /// without a selection covers the whole version.
    #[serde(default)]
    pub entities: Vec<Uuid>,
    /// Actions to render, in response order.
    pub actions: Vec<Action>,
}

impl GenerateRequest {
    /// Create a request for every entity with a fresh execution id.
    pub fn new(dialect: Dialect, project_version: ProjectVersion) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            dialect,
            project_version,
            entities: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add an action.
    pub fn action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Replace the actions.
    pub fn actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.actions = actions.into_iter().collect();
        self
    }

    /// Restrict rendering to an entity.
    pub fn entity(mut self, entity_id: Uuid) -> Self {
        self.entities.push(entity_id);
        self
    }

    /// Set the execution id.
    pub fn execution_id(mut self, execution_id: Uuid) -> Self {
        self.execution_id = execution_id;
        self
    }
}

/// Artifact of one action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    /// Rendered action.
    pub action: Action,
    /// SQL text.
    pub data: String,
    /// Where the sink stored it, if anywhere.
    pub path: Option<PathBuf>,
}

/// Outcome of a generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Id of the execution.
    pub execution_id: Uuid,
    /// Output location reported by the sink.
    pub output: Option<PathBuf>,
    /// One result per requested action, in request order.
    pub results: Vec<ActionResult>,
}

impl GenerateResponse {
    /// Artifact of an action, if it was requested.
    pub fn get(&self, action: Action) -> Option<&str> {
        self.results
            .iter()
            .find(|r| r.action == action)
            .map(|r| r.data.as_str())
    }
}

/// Renders requests through a template registry into an output sink.
#[derive(Debug)]
pub struct Generator<S> {
    registry: TemplateRegistry,
    sink: S,
    options: SelectOptions,
}

impl<S: OutputSink> Generator<S> {
    /// Create a generator with the built-in templates.
    pub fn new(sink: S) -> Self {
        Self {
            registry: TemplateRegistry::builtin(),
            sink,
            options: SelectOptions::default(),
        }
    }

    /// Use a custom template registry.
    pub fn with_registry(mut self, registry: TemplateRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Set select synthesis options.
    pub fn with_select_options(mut self, options: SelectOptions) -> Self {
        self.options = options;
        self
    }

    /// Template registry in use.
    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Output sink in use.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Render every requested action.
    ///
    /// Templates are checked before any rendering, so a missing template
    /// leaves the sink untouched. Actions render concurrently and the first
    /// failure aborts the rest.
    pub async fn generate(&self, request: &GenerateRequest) -> GenerateResult<GenerateResponse> {
        if request.actions.is_empty() {
            return Err(GenerateError::invalid_request("no actions requested"));
        }

        let dialect = request.dialect;
        let templates = request
            .actions
            .iter()
            .map(|&action| {
                self.registry
                    .get(action, dialect)
                    .map(|template| (action, template))
                    .ok_or(GenerateError::MissingTemplate { action, dialect })
            })
            .collect::<GenerateResult<Vec<_>>>()?;

        let entities = build_schema_entities(
            &request.project_version,
            dialect,
            &request.entities,
            &self.options,
        );
        let ctx = RenderContext::new(dialect, &entities);

        let results = try_join_all(templates.into_iter().map(|(action, template)| {
            let ctx = &ctx;
            async move {
                let data = template.render(ctx);
                let path = self.sink.write(request.execution_id, action, &data).await?;
                debug!(action = %action, bytes = data.len(), "Rendered action");
                Ok::<_, GenerateError>(ActionResult { action, data, path })
            }
        }))
        .await?;

        let output = self.sink.finish(request.execution_id).await?;

        info!(
            execution_id = %request.execution_id,
            dialect = %dialect,
            entities = entities.len(),
            actions = results.len(),
            "Generation complete"
        );

        Ok(GenerateResponse {
            execution_id: request.execution_id,
            output,
            results,
        })
    }
}

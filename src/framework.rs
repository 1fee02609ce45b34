//! The `Reball` facade: declaration API and startup lifecycle.
//!
//! Commands are declared against a [`Reball`] value, which owns the executor
//! registry and configuration. [`Reball::reconcile_all`] then converges the
//! remote registry and returns the read-only [`Router`] used for every
//! inbound interaction.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::command::{
    compiler::{self, Compilation, CompileError, Declaration},
    domain::{CommandKey, CommandSpec, DispatchKey},
    ports::RemoteCommandRegistry,
    registry::ExecutorRegistry,
    services::{ReconcileReport, ReconcileResult, Reconciler},
};
use crate::config::{ConfigResult, ReballConfig};
use crate::interaction::{
    handler::{ComponentHandler, Executor, Handler, Middleware},
    services::Router,
};

/// Errors raised while declaring a command.
#[derive(Debug, Clone, Error)]
pub enum DeclarationError {
    /// The declaration did not compile to a usable spec.
    #[error(transparent)]
    Compile(#[from] CompileError),
}

/// Result type for declarations.
pub type DeclarationResult<T> = Result<T, DeclarationError>;

/// Command framework facade.
pub struct Reball {
    config: ReballConfig,
    registry: ExecutorRegistry,
    middleware: Vec<Arc<dyn Middleware>>,
    components: BTreeMap<String, Arc<dyn ComponentHandler>>,
}

impl Reball {
    /// Creates a framework from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`crate::config::ConfigError`] when the configuration is
    /// inconsistent.
    pub fn new(config: ReballConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self {
            registry: ExecutorRegistry::new(config.scope_policy()),
            config,
            middleware: Vec::new(),
            components: BTreeMap::new(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ReballConfig {
        &self.config
    }

    /// Returns the executor registry built so far.
    #[must_use]
    pub const fn registry(&self) -> &ExecutorRegistry {
        &self.registry
    }

    /// Compiles a declaration without registering it.
    #[must_use]
    pub fn compile(declaration: impl Into<Declaration>) -> Compilation {
        compiler::compile(declaration)
    }

    /// Compiles a declaration and attaches its executor.
    ///
    /// Subcommand and group declarations are merged into the top-level
    /// command they belong to. Declarations without a category receive the
    /// configured default one. Returns the dispatch key the executor was
    /// attached under.
    ///
    /// # Errors
    ///
    /// Returns [`DeclarationError::Compile`] when the declaration does not
    /// compile to a usable spec.
    pub fn attach(
        &mut self,
        declaration: impl Into<Declaration>,
        middleware: impl IntoIterator<Item = Arc<dyn Middleware>>,
        executor: Arc<dyn Executor>,
    ) -> DeclarationResult<DispatchKey> {
        let mut spec = compiler::compile(declaration).into_spec()?;
        if spec.category.is_none() {
            spec.category = Some(self.config.default_category.clone());
        }
        let dispatch_key = DispatchKey::for_spec(&spec);
        let handler = middleware
            .into_iter()
            .fold(Handler::new(executor), Handler::with_middleware);
        let merged = self.registry.merge(spec, handler);
        debug!(dispatch = %dispatch_key, merged, "attached executor");
        Ok(dispatch_key)
    }

    /// Registers an already merged spec under an explicit dispatch key.
    pub fn register_executor(
        &mut self,
        spec: CommandSpec,
        dispatch_key: DispatchKey,
        handler: Handler,
    ) -> CommandKey {
        self.registry.register_executor(spec, dispatch_key, handler)
    }

    /// Appends process-wide middleware, run before every command's own.
    pub fn use_middleware(&mut self, middleware: Arc<dyn Middleware>) -> &mut Self {
        self.middleware.push(middleware);
        self
    }

    /// Registers a component handler under a custom id prefix.
    ///
    /// A later registration under the same name replaces the earlier one.
    pub fn click(
        &mut self,
        name: impl Into<String>,
        handler: Arc<dyn ComponentHandler>,
    ) -> &mut Self {
        self.components.insert(name.into(), handler);
        self
    }

    /// Reconciles every declared command and builds the router.
    ///
    /// # Errors
    ///
    /// Returns [`crate::command::services::ReconcileError`] when a guild
    /// alias cannot be resolved or a remote call fails; the remote registry
    /// may then be partially updated.
    pub async fn reconcile_all<R>(
        &self,
        remote: Arc<R>,
    ) -> ReconcileResult<(Router, ReconcileReport)>
    where
        R: RemoteCommandRegistry,
    {
        let reconciler = Reconciler::new(remote, self.config.guild_directory());
        let report = reconciler.reconcile(&self.registry).await?;
        let router = self
            .components
            .iter()
            .fold(
                Router::new(
                    Arc::new(self.registry.clone()),
                    Arc::new(report.key_table().clone()),
                ),
                |router, (name, handler)| router.with_component(name.clone(), Arc::clone(handler)),
            )
            .with_middleware(self.middleware.iter().cloned())
            .with_messages(self.config.messages.clone())
            .with_timeout_ms(self.config.handler_timeout_ms);
        Ok((router, report))
    }
}

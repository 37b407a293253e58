//! The reactor driver: loads sources, runs rules to a fixpoint, assembles.
//!
//! Rules are never ordered up front. Each pass offers every outstanding rule
//! instance a chance to run; the loop continues while any instance completed
//! in the last pass. A pass without progress is the fixpoint. Anything still
//! outstanding then is a genuine resolution failure, reported all at once.

use std::sync::Arc;

use schemata_foundation::{Error, Name, Result, SourceLocation};
use schemata_model::{SchemaContext, builtin};
use schemata_source::{
    DefaultResolver, NameResolver, StatementListener, StatementSource, TextSource,
};
use tracing::{debug, trace, warn};

use crate::assemble::Assembler;
use crate::config::ReactorConfig;
use crate::factory::{FactoryRegistry, StatementFactory};
use crate::rule::{RuleInstance, StatementRule, attach_rules};
use crate::rules::builtin_rules;
use crate::statement::{ContextId, ReactorState};
use crate::{BASE_LANGUAGE_NAME, BASE_LANGUAGE_SOURCE};

// =============================================================================
// Reactor
// =============================================================================

/// Compiles statement sources into a [`SchemaContext`].
///
/// A reactor owns all mutable compilation state and is used for one
/// compilation. Compile concurrently with one reactor per compilation.
pub struct Reactor {
    config: ReactorConfig,
    state: ReactorState,
    builtin: Vec<Arc<dyn StatementRule>>,
    custom: Vec<Arc<dyn StatementRule>>,
    factories: FactoryRegistry,
    resolver: Arc<dyn NameResolver>,
    outstanding: Vec<RuleInstance>,
    base_pending: bool,
    passes: usize,
}

impl Reactor {
    /// A reactor over the hard-coded bootstrap schema.
    ///
    /// Only the base-language document is meant to be compiled this way.
    #[must_use]
    pub fn bootstrap() -> Self {
        Self::with_schema(builtin::bootstrap(), ReactorConfig::bootstrap())
    }

    /// A reactor for documents defined by `context`.
    ///
    /// With the default configuration the base-language source is loaded
    /// before the first user document, so user schemas can refer to the
    /// built-in types.
    #[must_use]
    pub fn new(context: SchemaContext) -> Self {
        Self::with_schema(context, ReactorConfig::default())
    }

    fn with_schema(context: SchemaContext, config: ReactorConfig) -> Self {
        Self {
            builtin: builtin_rules(&config),
            custom: Vec::new(),
            factories: FactoryRegistry::default(),
            resolver: Arc::new(DefaultResolver),
            outstanding: Vec::new(),
            base_pending: config.load_base_language,
            passes: 0,
            state: ReactorState::new(context),
            config,
        }
    }

    /// Replaces the configuration. Call before loading anything.
    #[must_use]
    pub fn with_config(mut self, config: ReactorConfig) -> Self {
        self.builtin = builtin_rules(&config);
        self.base_pending = config.load_base_language && self.state.is_empty();
        self.config = config;
        self
    }

    /// Replaces the name resolver used for keywords and identifier values.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl NameResolver + 'static) -> Self {
        self.resolver = Arc::new(resolver);
        self
    }

    /// Adds a rule after the built-in ones. Rules apply to statements loaded
    /// after they are added.
    pub fn add_rule(&mut self, rule: impl StatementRule + 'static) {
        self.custom.push(Arc::new(rule));
    }

    /// Registers the factory used for statements of `type_name` and its
    /// subtypes.
    pub fn add_statement_factory(
        &mut self,
        type_name: Name,
        factory: impl StatementFactory + 'static,
    ) {
        self.factories.register(type_name, Arc::new(factory));
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &ReactorConfig {
        &self.config
    }

    /// The compilation state.
    #[must_use]
    pub fn state(&self) -> &ReactorState {
        &self.state
    }

    /// Number of rule instances not yet completed.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Passes run by the last fixpoint computation.
    #[must_use]
    pub fn passes(&self) -> usize {
        self.passes
    }

    fn catalog(&self) -> Vec<Arc<dyn StatementRule>> {
        self.builtin.iter().chain(&self.custom).cloned().collect()
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Streams a source into statement contexts, attaching rules as each
    /// statement is created.
    ///
    /// # Errors
    /// Returns syntax errors, unknown items, and immediate rule failures.
    pub fn load(&mut self, source: &dyn StatementSource) -> Result<()> {
        self.load_base_language()?;
        self.load_source(source)
    }

    fn load_base_language(&mut self) -> Result<()> {
        if !self.base_pending {
            return Ok(());
        }
        self.base_pending = false;
        self.load_source(&TextSource::new(BASE_LANGUAGE_NAME, BASE_LANGUAGE_SOURCE))
    }

    fn load_source(&mut self, source: &dyn StatementSource) -> Result<()> {
        let rules = self.catalog();
        let before = self.state.len();
        let mut builder = TreeBuilder {
            state: &mut self.state,
            resolver: &*self.resolver,
            rules: &rules,
            outstanding: &mut self.outstanding,
            stack: Vec::new(),
        };
        source.stream(&*self.resolver, &mut builder)?;
        if !builder.stack.is_empty() {
            return Err(Error::internal(format!(
                "source {} ended inside a statement",
                source.name()
            )));
        }
        debug!(
            source = source.name(),
            statements = self.state.len() - before,
            outstanding = self.outstanding.len(),
            "loaded source"
        );
        Ok(())
    }

    // =========================================================================
    // Fixpoint
    // =========================================================================

    /// Runs every outstanding rule to the fixpoint, then assembles.
    ///
    /// # Errors
    /// Returns an unresolved rules error listing every rule left at the
    /// fixpoint, the first immediate rule failure, or a pass limit error.
    pub fn compute_schema_context(&mut self) -> Result<SchemaContext> {
        self.load_base_language()?;
        self.run_to_fixpoint()?;
        self.assemble()
    }

    fn run_to_fixpoint(&mut self) -> Result<()> {
        let rules = self.catalog();
        self.passes = 0;
        while !self.outstanding.is_empty() {
            if let Some(limit) = self.config.max_passes {
                if self.passes >= limit {
                    return Err(Error::pass_limit(limit));
                }
            }
            self.passes += 1;

            let pending = std::mem::take(&mut self.outstanding);
            let offered = pending.len();
            let mut completed = 0;
            for mut instance in pending {
                if !instance.can_process(&self.state) {
                    self.outstanding.push(instance);
                    continue;
                }
                let mut created = Vec::new();
                instance.perform(&mut self.state, &mut created)?;
                completed += 1;
                for id in created {
                    trace!(context = ?id, "attaching rules to new statement");
                    attach_rules(&rules, &mut self.state, id, &mut self.outstanding)?;
                }
            }
            debug!(
                pass = self.passes,
                offered,
                completed,
                outstanding = self.outstanding.len(),
                "reactor pass"
            );
            if completed == 0 {
                break;
            }
        }

        if self.outstanding.is_empty() {
            return Ok(());
        }
        let state = &self.state;
        let messages: Vec<String> = self
            .outstanding
            .iter_mut()
            .map(|instance| instance.error_message(state))
            .collect();
        warn!(
            unresolved = messages.len(),
            passes = self.passes,
            "fixpoint reached with outstanding rules"
        );
        Err(Error::unresolved(messages))
    }

    /// Freezes the completed state into a schema context.
    ///
    /// May be called any number of times after a successful fixpoint.
    ///
    /// # Errors
    /// Returns an illegal state error while rules are outstanding, or a
    /// malformed statement error from a factory.
    pub fn assemble(&self) -> Result<SchemaContext> {
        if !self.outstanding.is_empty() {
            return Err(Error::illegal_state(format!(
                "{} rules are still outstanding",
                self.outstanding.len()
            )));
        }
        Assembler::new(&self.state, &self.factories).assemble()
    }
}

// =============================================================================
// Tree Builder
// =============================================================================

/// Listener that turns source events into statement contexts.
struct TreeBuilder<'r> {
    state: &'r mut ReactorState,
    resolver: &'r dyn NameResolver,
    rules: &'r [Arc<dyn StatementRule>],
    outstanding: &'r mut Vec<RuleInstance>,
    stack: Vec<ContextId>,
}

impl StatementListener for TreeBuilder<'_> {
    fn start_statement(&mut self, keyword: Name, location: SourceLocation) -> Result<()> {
        let parent = self.stack.last().copied();
        let id = self.state.create(parent, keyword, location)?;
        attach_rules(self.rules, self.state, id, self.outstanding)?;
        self.stack.push(id);
        Ok(())
    }

    fn value(&mut self, raw: &str, location: SourceLocation) -> Result<()> {
        let Some(&id) = self.stack.last() else {
            return Err(Error::syntax("value outside of a statement", location));
        };
        let value = self.state.typed_value(id, raw, self.resolver)?;
        self.state.load_value(id, value)
    }

    fn end_statement(&mut self, location: SourceLocation) -> Result<()> {
        self.stack
            .pop()
            .map(|_| ())
            .ok_or_else(|| Error::syntax("statement closed twice", location))
    }
}

use std::sync::Arc;

use jobcmd_catalog::ResourceCatalog;
use jobcmd_core::{BuildError, EngineKind, ExecutionContext, Result};
use tracing::{debug, info_span};

use crate::config::Config;
use crate::engine::{create_engine, JobEngine};

/// Entry point: turns a task attempt's context into a submit command line.
///
/// Holds no per-task state, so one builder can be shared across threads.
pub struct CommandBuilder {
    catalog: Arc<dyn ResourceCatalog>,
    config: Config,
}

impl CommandBuilder {
    pub fn new(catalog: Arc<dyn ResourceCatalog>, config: Config) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Decode, validate and resolve the main resource, without building the command.
    pub fn prepare(&self, ctx: &ExecutionContext) -> Result<Box<dyn JobEngine>> {
        let kind: EngineKind = ctx.task_type.parse().map_err(BuildError::UnsupportedTaskType)?;
        let mut engine = create_engine(kind, ctx, &self.config)?;
        engine.set_main_resource(self.catalog.as_ref())?;
        Ok(engine)
    }

    pub fn build(&self, ctx: &ExecutionContext) -> Result<String> {
        let _span = info_span!("build_command", task_type = %ctx.task_type).entered();
        let engine = self.prepare(ctx)?;
        debug!(kind = %engine.kind(), "engine prepared");
        engine.build_command(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobcmd_catalog::InMemoryCatalog;
    use jobcmd_params::TaskParameters;

    fn builder() -> CommandBuilder {
        CommandBuilder::new(Arc::new(InMemoryCatalog::with_files([(3, "/lib/app.jar")])), Config::default())
    }

    #[test]
    fn prepare_resolves_main_resource() {
        let ctx = ExecutionContext::new(r#"{"mainJar": {"id": 3}}"#, "q");
        let engine = builder().prepare(&ctx).unwrap();
        assert_eq!(engine.kind(), EngineKind::Spark);
        let files = engine.parameters().resource_files_list();
        assert_eq!(files[0].res, "lib/app.jar");
    }

    #[test]
    fn task_type_is_case_insensitive() {
        let mut ctx = ExecutionContext::new(r#"{"mainJar": {"res": "a.jar"}}"#, "q");
        ctx.task_type = "spark".into();
        assert!(builder().build(&ctx).is_ok());
    }

    #[test]
    fn unknown_task_type() {
        let mut ctx = ExecutionContext::new(r#"{"mainJar": {"res": "a.jar"}}"#, "q");
        ctx.task_type = "FLINK".into();
        let err = builder().build(&ctx).unwrap_err();
        assert!(matches!(err, BuildError::UnsupportedTaskType(t) if t == "FLINK"));
    }
}

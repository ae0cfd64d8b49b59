use jobcmd_catalog::ResourceCatalog;
use jobcmd_core::{EngineKind, ExecutionContext, Result};
use jobcmd_params::TaskParameters;

use crate::config::Config;
use crate::spark::SparkEngine;

/// One job engine (Spark, ...) as seen by the command builder.
pub trait JobEngine: Send {
    fn kind(&self) -> EngineKind;

    fn parameters(&self) -> &dyn TaskParameters;

    /// Replace the main resource path with its canonical form.
    fn set_main_resource(&mut self, catalog: &dyn ResourceCatalog) -> Result<()>;

    /// Final single-line command with placeholders substituted.
    fn build_command(&self, ctx: &ExecutionContext) -> Result<String>;
}

/// Decode the context's payload into the engine for `kind`.
pub fn create_engine(kind: EngineKind, ctx: &ExecutionContext, config: &Config) -> Result<Box<dyn JobEngine>> {
    match kind {
        EngineKind::Spark => Ok(Box::new(SparkEngine::init(ctx, config.spark.clone())?)),
    }
}

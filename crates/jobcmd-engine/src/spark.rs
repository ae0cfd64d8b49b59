use jobcmd_catalog::{resolve_resource, ResourceCatalog};
use jobcmd_core::{
    DeployMode, EngineKind, ExecutionContext, ProgramType, Result, SparkParameters, SparkVersion, ValidationError,
};
use jobcmd_params::{decode_and_validate, merge_params, substitute, TaskParameters};
use tracing::{info, warn};

use crate::config::SparkConfig;
use crate::engine::JobEngine;

/// usage: spark-submit [options] <app jar | python file> [app arguments]
pub const SPARK1_COMMAND: &str = "${SPARK_HOME1}/bin/spark-submit";
pub const SPARK2_COMMAND: &str = "${SPARK_HOME2}/bin/spark-submit";

pub struct SparkEngine {
    params: SparkParameters,
    cfg: SparkConfig,
}

impl SparkEngine {
    /// Decode and validate the payload, then pin the scheduler's queue.
    pub fn init(ctx: &ExecutionContext, cfg: SparkConfig) -> Result<Self> {
        info!("spark task params {}", ctx.task_params);
        let mut params = decode_and_validate(&ctx.task_params)?;
        params.queue = Some(ctx.queue.clone());
        Ok(Self { params, cfg })
    }

    pub fn spark_parameters(&self) -> &SparkParameters {
        &self.params
    }

    /// Binary followed by submit options, main resource and app arguments.
    pub fn assemble(&self) -> Vec<String> {
        let mut tokens = vec![spark_command(&self.params.version(), &self.cfg).to_string()];
        tokens.extend(build_args(&self.params, &self.cfg));
        tokens
    }
}

impl JobEngine for SparkEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Spark
    }

    fn parameters(&self) -> &dyn TaskParameters {
        &self.params
    }

    fn set_main_resource(&mut self, catalog: &dyn ResourceCatalog) -> Result<()> {
        let main_jar = self.params.main_jar.as_mut().ok_or(ValidationError::MissingMainResource)?;
        main_jar.res = resolve_resource(main_jar, catalog)?;
        Ok(())
    }

    fn build_command(&self, ctx: &ExecutionContext) -> Result<String> {
        // tokens are joined as-is, without quoting
        let raw = self.assemble().join(" ");
        let params = merge_params(ctx, &self.params.local_parameters_map());
        let command = substitute(&raw, &params);
        info!("spark task command: {}", command);
        Ok(command)
    }
}

/// SPARK1 only for an explicit V1; everything else runs on SPARK2.
pub fn spark_command<'a>(version: &SparkVersion, cfg: &'a SparkConfig) -> &'a str {
    match version {
        SparkVersion::Spark1 => &cfg.spark1_command,
        SparkVersion::Spark2 => &cfg.spark2_command,
        SparkVersion::Unrecognized(v) => {
            warn!("unrecognized spark version {:?}, submitting with SPARK2", v);
            &cfg.spark2_command
        }
    }
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn positive(n: Option<u32>) -> Option<u32> {
    n.filter(|n| *n > 0)
}

/// Submit options in their fixed order, ending with the main resource path and
/// the application arguments.
pub fn build_args(p: &SparkParameters, cfg: &SparkConfig) -> Vec<String> {
    let mut args: Vec<String> = Vec::new();
    let deploy_mode = p.deploy_mode.unwrap_or(cfg.default_deploy_mode);
    let others = non_empty(&p.others);

    if deploy_mode != DeployMode::Local && !others.is_some_and(|o| o.contains("--queue")) {
        if let Some(queue) = non_empty(&p.queue) {
            args.push("--queue".into());
            args.push(queue.into());
        }
    }

    args.push("--master".into());
    if deploy_mode == DeployMode::Local {
        args.push(deploy_mode.as_str().into());
    } else {
        args.push(cfg.master.clone());
        args.push("--deploy-mode".into());
        args.push(deploy_mode.as_str().into());
    }

    if let Some(n) = positive(p.driver_cores) {
        args.push("--driver-cores".into());
        args.push(n.to_string());
    }
    if let Some(m) = non_empty(&p.driver_memory) {
        args.push("--driver-memory".into());
        args.push(m.into());
    }
    if let Some(n) = positive(p.num_executors) {
        args.push("--num-executors".into());
        args.push(n.to_string());
    }
    if let Some(n) = positive(p.executor_cores) {
        args.push("--executor-cores".into());
        args.push(n.to_string());
    }
    if let Some(m) = non_empty(&p.executor_memory) {
        args.push("--executor-memory".into());
        args.push(m.into());
    }
    if let Some(name) = non_empty(&p.app_name) {
        args.push("--name".into());
        args.push(name.into());
    }
    if let Some(o) = others {
        args.push(o.into());
    }

    if p.program_type != Some(ProgramType::Python) {
        if let Some(class) = non_empty(&p.main_class) {
            args.push("--class".into());
            args.push(class.into());
        }
    }

    if let Some(main_jar) = p.main_jar.as_ref().filter(|r| !r.res.is_empty()) {
        args.push(main_jar.res.clone());
    }

    args.extend(p.main_args.iter().cloned());
    args
}

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDateTime};
use jobcmd_core::{ExecutionContext, Property};
use tracing::debug;

use crate::placeholder::substitute;

pub const PARAMETER_DATETIME: &str = "system.datetime";
pub const PARAMETER_BUSINESS_DATE: &str = "system.biz.date";
pub const PARAMETER_CURRENT_DATE: &str = "system.biz.curdate";

pub const PARAMETER_FORMAT_DATE: &str = "%Y%m%d";
pub const PARAMETER_FORMAT_TIME: &str = "%Y%m%d%H%M%S";

/// Built-in parameters derived from the schedule time. Empty when unscheduled.
pub fn system_params(schedule_time: Option<NaiveDateTime>) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Some(at) = schedule_time {
        let biz_date = at - Duration::days(1);
        out.insert(PARAMETER_BUSINESS_DATE.to_string(), biz_date.format(PARAMETER_FORMAT_DATE).to_string());
        out.insert(PARAMETER_CURRENT_DATE.to_string(), at.format(PARAMETER_FORMAT_DATE).to_string());
        out.insert(PARAMETER_DATETIME.to_string(), at.format(PARAMETER_FORMAT_TIME).to_string());
    }
    out
}

/// Global parameters overlaid with local ones (local wins), with `$`-prefixed
/// values cured against the system parameters.
///
/// `task_local` are the locals carried in the task payload; the context's own
/// locals sit above them.
pub fn base_params(ctx: &ExecutionContext, task_local: &BTreeMap<String, Property>) -> BTreeMap<String, Property> {
    let system = system_params(ctx.schedule_time);

    let mut props = ctx.global_params.clone();
    props.extend(task_local.iter().map(|(k, v)| (k.clone(), v.clone())));
    props.extend(ctx.local_params.iter().map(|(k, v)| (k.clone(), v.clone())));

    for p in props.values_mut() {
        if p.value.starts_with('$') {
            p.value = substitute(&p.value, &system);
        }
    }
    props
}

/// Flatten properties to name -> value.
pub fn convert(props: &BTreeMap<String, Property>) -> BTreeMap<String, String> {
    props.iter().map(|(k, p)| (k.clone(), p.value.clone())).collect()
}

/// The mapping used for command substitution. Recomputed on every call.
///
/// Precedence, lowest first: system, global, local, then the context's
/// supplementary `params_map`.
pub fn merge_params(ctx: &ExecutionContext, task_local: &BTreeMap<String, Property>) -> BTreeMap<String, String> {
    let mut props = base_params(ctx, task_local);
    if let Some(extra) = &ctx.params_map {
        props.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    let mut merged = system_params(ctx.schedule_time);
    merged.extend(convert(&props));
    debug!(count = merged.len(), "merged task parameters");
    merged
}

use jobcmd_core::{BuildError, Result, SparkParameters, ValidationError};
use tracing::error;

/// Parse the raw task payload.
///
/// A blank payload or a literal JSON `null` is a configuration problem, not a
/// decoding one: the task was scheduled without parameters at all.
pub fn decode(payload: &str) -> Result<SparkParameters> {
    if payload.trim().is_empty() {
        error!("Spark params is empty");
        return Err(BuildError::Configuration("spark params is empty".to_string()));
    }
    let parsed: Option<SparkParameters> = serde_json::from_str(payload)?;
    parsed.ok_or_else(|| {
        error!("Spark params is null");
        BuildError::Configuration("spark params is null".to_string())
    })
}

/// Structural checks. An unrecognised spark version passes.
pub fn validate(spec: &SparkParameters) -> std::result::Result<(), ValidationError> {
    let main_jar = spec.main_jar.as_ref().ok_or(ValidationError::MissingMainResource)?;
    if !main_jar.needs_lookup() && main_jar.res.trim().is_empty() {
        return Err(ValidationError::EmptyResourcePath);
    }
    for (i, p) in spec.local_params.iter().enumerate() {
        if p.name.trim().is_empty() {
            return Err(ValidationError::UnnamedLocalParam(i));
        }
    }
    Ok(())
}

pub fn decode_and_validate(payload: &str) -> Result<SparkParameters> {
    let spec = decode(payload)?;
    validate(&spec)?;
    Ok(spec)
}

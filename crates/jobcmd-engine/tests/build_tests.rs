use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use jobcmd_catalog::InMemoryCatalog;
use jobcmd_core::{properties_by_name, BuildError, ExecutionContext, Property, ValidationError};
use jobcmd_engine::{CommandBuilder, Config, SPARK1_COMMAND, SPARK2_COMMAND};

fn builder_with(catalog: InMemoryCatalog) -> CommandBuilder {
    CommandBuilder::new(Arc::new(catalog), Config::default())
}

fn globals(pairs: &[(&str, &str)]) -> BTreeMap<String, Property> {
    let props: Vec<Property> = pairs.iter().map(|(k, v)| Property::new(*k, *v)).collect();
    properties_by_name(&props)
}

#[test]
fn test_literal_resource_with_global_placeholder() {
    let payload = r#"{
        "mainJar": {"id": 0, "res": "/jobs/app.jar"},
        "sparkVersion": "V2",
        "mainArgs": ["--class", "Main", "--date", "${DATE}"]
    }"#;
    let mut ctx = ExecutionContext::new(payload, "default");
    ctx.global_params = globals(&[("DATE", "2024-01-01")]);

    let cmd = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap();
    assert!(cmd.starts_with(SPARK2_COMMAND));
    assert!(cmd.contains("--queue default"));
    assert!(cmd.contains(" jobs/app.jar "));
    assert!(!cmd.contains("/jobs/app.jar"));
    assert!(cmd.ends_with("--class Main --date 2024-01-01"));
    assert!(!cmd.contains("${DATE}"));
}

#[test]
fn test_catalog_miss_is_resource_not_found() {
    let ctx = ExecutionContext::new(r#"{"mainJar": {"id": 99}}"#, "default");
    let err = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap_err();
    assert!(matches!(err, BuildError::ResourceNotFound { id: 99 }));
    assert_eq!(err.to_string(), "resource id: 99 not exist");
}

#[test]
fn test_catalog_hit_uses_canonical_path() {
    let ctx = ExecutionContext::new(r#"{"mainJar": {"id": 7, "res": "ignored.jar"}}"#, "default");
    let catalog = InMemoryCatalog::with_files([(7, "/tenant/libs/etl.jar")]);
    let cmd = builder_with(catalog).build(&ctx).unwrap();
    assert!(cmd.ends_with(" tenant/libs/etl.jar"));
    assert!(!cmd.contains("ignored.jar"));
}

#[test]
fn test_negative_ids_go_through_the_catalog() {
    let ctx = ExecutionContext::new(r#"{"mainJar": {"id": -1}}"#, "default");
    let err = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap_err();
    assert!(matches!(err, BuildError::ResourceNotFound { id: -1 }));

    let ctx = ExecutionContext::new(r#"{"mainJar": {"id": -5}}"#, "default");
    let cmd = builder_with(InMemoryCatalog::with_files([(-5, "/x/app.jar")])).build(&ctx).unwrap();
    assert!(cmd.ends_with(" x/app.jar"));
}

#[test]
fn test_spark_version_selects_binary() {
    for (version, binary) in [
        ("\"V1\"", SPARK1_COMMAND),
        ("\"SPARK1\"", SPARK1_COMMAND),
        ("\"SPARK2\"", SPARK2_COMMAND),
        ("\"garbage\"", SPARK2_COMMAND),
        ("null", SPARK2_COMMAND),
    ] {
        let payload = format!(r#"{{"mainJar": {{"res": "a.jar"}}, "sparkVersion": {version}}}"#);
        let cmd = builder_with(InMemoryCatalog::new())
            .build(&ExecutionContext::new(payload, "q"))
            .unwrap();
        assert!(cmd.starts_with(binary), "{version} -> {cmd}");
    }
}

#[test]
fn test_context_queue_wins_over_payload() {
    let ctx = ExecutionContext::new(r#"{"mainJar": {"res": "a.jar"}, "queue": "payload-q"}"#, "scheduler-q");
    let cmd = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap();
    assert!(cmd.contains("--queue scheduler-q"));
    assert!(!cmd.contains("payload-q"));
}

#[test]
fn test_missing_main_resource_is_rejected() {
    let ctx = ExecutionContext::new(r#"{"mainClass": "Main"}"#, "q");
    let err = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap_err();
    assert!(matches!(err, BuildError::Validation(ValidationError::MissingMainResource)));
}

#[test]
fn test_blank_payload_is_configuration_error() {
    let err = builder_with(InMemoryCatalog::new())
        .build(&ExecutionContext::new("  ", "q"))
        .unwrap_err();
    assert!(matches!(err, BuildError::Configuration(_)));
}

#[test]
fn test_unsupported_task_type() {
    let mut ctx = ExecutionContext::new(r#"{"mainJar": {"res": "a.jar"}}"#, "q");
    ctx.task_type = "SHELL".into();
    let err = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap_err();
    assert!(matches!(err, BuildError::UnsupportedTaskType(_)));
}

#[test]
fn test_configured_binary_and_master() {
    let mut config = Config::default();
    config.spark.spark2_command = "/opt/spark/bin/spark-submit".into();
    config.spark.master = "k8s://https://api:6443".into();
    let builder = CommandBuilder::new(Arc::new(InMemoryCatalog::new()), config);

    let cmd = builder
        .build(&ExecutionContext::new(r#"{"mainJar": {"res": "a.jar"}}"#, "q"))
        .unwrap();
    assert_eq!(
        cmd,
        "/opt/spark/bin/spark-submit --queue q --master k8s://https://api:6443 --deploy-mode cluster a.jar"
    );
}

#[test]
fn test_parameter_precedence() {
    let payload = r#"{
        "mainJar": {"res": "a.jar"},
        "mainArgs": ["${A}", "${B}", "${C}"],
        "localParams": [{"prop": "B", "value": "task-local"}, {"prop": "C", "value": "task-local"}]
    }"#;
    let mut ctx = ExecutionContext::new(payload, "q");
    ctx.global_params = globals(&[("A", "global"), ("B", "global"), ("C", "global")]);
    ctx.params_map = Some(globals(&[("C", "parent")]));

    let cmd = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap();
    assert!(cmd.ends_with("a.jar global task-local parent"));
}

#[test]
fn test_unknown_placeholders_stay_verbatim() {
    let payload = r#"{"mainJar": {"res": "a.jar"}, "mainArgs": ["${UNSET}"]}"#;
    let cmd = builder_with(InMemoryCatalog::new())
        .build(&ExecutionContext::new(payload, "q"))
        .unwrap();
    assert!(cmd.ends_with("a.jar ${UNSET}"));
    assert!(cmd.starts_with("${SPARK_HOME2}/bin/spark-submit"));
}

#[test]
fn test_system_params_and_time_expressions() {
    let payload = r#"{
        "mainJar": {"res": "a.jar"},
        "mainArgs": ["${system.biz.date}", "$[yyyyMMdd+1]", "${dt}"]
    }"#;
    let mut ctx = ExecutionContext::new(payload, "q");
    ctx.schedule_time = NaiveDate::from_ymd_opt(2024, 3, 10).and_then(|d| d.and_hms_opt(2, 0, 0));
    ctx.global_params = globals(&[("dt", "${system.biz.curdate}")]);

    let cmd = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap();
    assert!(cmd.ends_with("a.jar 20240309 20240311 20240310"), "{cmd}");
}

#[test]
fn test_stray_placeholder_opener_does_not_hide_later_ones() {
    let payload = r#"{"mainJar": {"res": "a.jar"}, "mainArgs": ["--opt=${", "--date", "${DATE}"]}"#;
    let mut ctx = ExecutionContext::new(payload, "q");
    ctx.global_params = globals(&[("DATE", "2024-01-01")]);
    let cmd = builder_with(InMemoryCatalog::new()).build(&ctx).unwrap();
    assert!(cmd.ends_with("a.jar --opt=${ --date 2024-01-01"), "{cmd}");
}

#[test]
fn test_time_expressions_need_schedule_time() {
    let payload = r#"{"mainJar": {"res": "a.jar"}, "mainArgs": ["$[yyyyMMdd]"]}"#;
    let cmd = builder_with(InMemoryCatalog::new())
        .build(&ExecutionContext::new(payload, "q"))
        .unwrap();
    assert!(cmd.ends_with("a.jar $[yyyyMMdd]"));
}

#[test]
fn test_builds_are_independent_across_threads() {
    let catalog = InMemoryCatalog::with_files((1..=8).map(|i| (i, "/shared/app.jar")));
    let builder = builder_with(catalog);

    std::thread::scope(|s| {
        let handles: Vec<_> = (1..=8)
            .map(|i| {
                let builder = &builder;
                s.spawn(move || {
                    let payload = format!(r#"{{"mainJar": {{"id": {i}}}, "mainArgs": ["${{N}}"]}}"#);
                    let n = i.to_string();
                    let mut ctx = ExecutionContext::new(payload, format!("q{i}"));
                    ctx.global_params = globals(&[("N", n.as_str())]);
                    builder.build(&ctx).unwrap()
                })
            })
            .collect();
        for (i, h) in (1..=8).zip(handles) {
            let cmd = h.join().unwrap();
            assert!(cmd.contains(&format!("--queue q{i} ")));
            assert!(cmd.ends_with(&format!("shared/app.jar {i}")));
        }
    });
}

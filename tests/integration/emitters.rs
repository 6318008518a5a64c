//! End-to-end emitter behavior against an in-memory sink.

use super::test_utils::{assert_json_eq, capture_emitter, parse_lines};
use std::collections::HashMap;
use std::sync::Arc;
use stepcast::catalog;
use stepcast::telemetry::{Emitter, MemorySink, OutputSink, StepRegistry};
use stepcast::EventError;

#[test]
fn test_print_step() {
    let (emitter, buffer) = capture_emitter(&["Initial Setup"]);
    emitter.set_step("Initial Setup").unwrap();
    emitter.print_step("message").unwrap();

    let expected = r#"{"data":{"currentstep":"0","message":"message","name":"Initial Setup","totalsteps":"1"},"datacontenttype":"application/json","id":"random-id","source":"https://minikube.sigs.k8s.io/","specversion":"1.0","type":"io.k8s.sigs.minikube.step"}"#;
    let actual = buffer.contents();
    assert!(actual.ends_with('\n'));
    assert_eq!(actual.lines().count(), 1);
    assert_json_eq(&actual, expected);
}

#[test]
fn test_print_step_with_start_catalog() {
    let buffer = MemorySink::new();
    let registry = Arc::new(StepRegistry::with_steps(catalog::default_start_steps()));
    let emitter = Emitter::new(registry)
        .with_id_provider(|| "random-id".to_string())
        .with_sink(OutputSink::new(buffer.clone()));

    emitter.set_step(catalog::INITIAL_SETUP).unwrap();
    emitter.print_step("message").unwrap();

    let expected = format!(
        r#"{{"data":{{"currentstep":"0","message":"message","name":"Initial Minikube Setup","totalsteps":"{}"}},"datacontenttype":"application/json","id":"random-id","source":"https://minikube.sigs.k8s.io/","specversion":"1.0","type":"io.k8s.sigs.minikube.step"}}"#,
        emitter.registry().total_steps()
    );
    assert_json_eq(&buffer.contents(), &expected);
}

#[test]
fn test_print_info() {
    let (emitter, buffer) = capture_emitter(&[]);
    emitter.print_info("info").unwrap();
    let expected = r#"{"data":{"message":"info"},"datacontenttype":"application/json","id":"random-id","source":"https://minikube.sigs.k8s.io/","specversion":"1.0","type":"io.k8s.sigs.minikube.info"}"#;
    assert_json_eq(&buffer.contents(), expected);
}

#[test]
fn test_error() {
    let (emitter, buffer) = capture_emitter(&[]);
    emitter.print_error("error").unwrap();
    let expected = r#"{"data":{"message":"error"},"datacontenttype":"application/json","id":"random-id","source":"https://minikube.sigs.k8s.io/","specversion":"1.0","type":"io.k8s.sigs.minikube.error"}"#;
    assert_json_eq(&buffer.contents(), expected);
}

#[test]
fn test_error_exit_code() {
    let (emitter, buffer) = capture_emitter(&[]);
    let a = HashMap::from([("a".to_string(), "b".to_string())]);
    let c = HashMap::from([("c".to_string(), "d".to_string())]);
    emitter.print_error_exit_code("error", 5, [&a, &c]).unwrap();
    let expected = r#"{"data":{"a":"b","c":"d","exitcode":"5","message":"error"},"datacontenttype":"application/json","id":"random-id","source":"https://minikube.sigs.k8s.io/","specversion":"1.0","type":"io.k8s.sigs.minikube.error"}"#;
    assert_json_eq(&buffer.contents(), expected);
}

#[test]
fn test_warning() {
    let (emitter, buffer) = capture_emitter(&[]);
    emitter.print_warning("warning").unwrap();
    let expected = r#"{"data":{"message":"warning"},"datacontenttype":"application/json","id":"random-id","source":"https://minikube.sigs.k8s.io/","specversion":"1.0","type":"io.k8s.sigs.minikube.warning"}"#;
    assert_json_eq(&buffer.contents(), expected);
}

#[test]
fn test_unknown_step_keeps_previous_step() {
    let (emitter, buffer) = capture_emitter(&["Fetch", "Build", "Link"]);
    emitter.set_step("Build").unwrap();

    let err = emitter.set_step("Deploy").unwrap_err();
    assert!(matches!(err, EventError::UnknownStep(ref name) if name == "Deploy"));
    assert_eq!(emitter.registry().current_step_index(), Some(1));

    emitter.print_step("still building").unwrap();
    let events = parse_lines(&buffer.contents());
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["data"]["name"], "Build");
    assert_eq!(events[0]["data"]["currentstep"], "1");
}

#[test]
fn test_step_before_set_step_is_degraded_not_fatal() {
    let (emitter, buffer) = capture_emitter(&["Fetch", "Build"]);
    emitter.print_step("early").unwrap();
    emitter.set_step("Fetch").unwrap();
    emitter.print_step("on time").unwrap();

    let events = parse_lines(&buffer.contents());
    assert_eq!(events[0]["data"]["currentstep"], "");
    assert_eq!(events[0]["data"]["name"], "");
    assert_eq!(events[0]["data"]["totalsteps"], "2");
    assert_eq!(events[1]["data"]["currentstep"], "0");
    assert_eq!(events[1]["data"]["name"], "Fetch");
}

#[test]
fn test_step_on_empty_catalog() {
    let (emitter, buffer) = capture_emitter(&[]);
    assert!(emitter.set_step("anything").is_err());
    emitter.print_step("nothing registered").unwrap();
    let events = parse_lines(&buffer.contents());
    assert_eq!(events[0]["data"]["totalsteps"], "0");
    assert_eq!(events[0]["data"]["currentstep"], "");
}

#[test]
fn test_redirected_sink_leaves_default_untouched() {
    let default = MemorySink::new();
    let emitter = Emitter::new(Arc::new(StepRegistry::new()))
        .with_id_provider(|| "random-id".to_string())
        .with_sink(OutputSink::new(default.clone()));

    let capture = MemorySink::new();
    {
        let _guard = emitter.sink().redirect(capture.clone());
        emitter.print_info("captured").unwrap();
        emitter.print_warning("captured too").unwrap();
    }

    assert_eq!(capture.lines().len(), 2);
    assert!(default.is_empty());

    emitter.print_info("back to default").unwrap();
    assert_eq!(default.lines().len(), 1);
    assert_eq!(capture.lines().len(), 2);
}

#[test]
fn test_every_line_has_the_closed_envelope() {
    let (emitter, buffer) = capture_emitter(&["Fetch"]);
    emitter.set_step("Fetch").unwrap();
    emitter.print_step("s").unwrap();
    emitter.print_info("i").unwrap();
    emitter.print_warning("w").unwrap();
    emitter.print_error("e").unwrap();
    emitter
        .print_error_exit_code("x", 1, &[] as &[HashMap<String, String>])
        .unwrap();
    emitter.print_download("a").unwrap();
    emitter.print_download_progress("a", 50).unwrap();

    for event in parse_lines(&buffer.contents()) {
        let object = event.as_object().unwrap();
        let mut keys: Vec<_> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["data", "datacontenttype", "id", "source", "specversion", "type"]
        );
        assert_eq!(event["id"], "random-id");
        for value in event["data"].as_object().unwrap().values() {
            assert!(value.is_string(), "non-string data value: {}", value);
        }
    }
}

#[test]
fn test_default_ids_are_unique() {
    let buffer = MemorySink::new();
    let emitter =
        Emitter::new(Arc::new(StepRegistry::new())).with_sink(OutputSink::new(buffer.clone()));
    emitter.print_info("one").unwrap();
    emitter.print_info("two").unwrap();
    let events = parse_lines(&buffer.contents());
    assert_ne!(events[0]["id"], events[1]["id"]);
}

//! Integration tests: end-to-end navigation decisions over real JSON
//! Schemas.
//!
//! Each test builds a builder state, compiles the three builder schemas
//! with `cb-schema`, runs `validate_and_touch`, and checks what the form
//! management state and the callback observed.

use std::cell::Cell;

use cb_core::{BuilderFormValues, BuilderState, ErrorTree, FieldPath, TestingValues, View};
use cb_errors::{
    BuilderErrors, ErrorSnapshot, FormManagementState, TouchOutcome,
    DECLARATIVE_OAUTH_AUTHENTICATOR,
};
use cb_schema::{
    BuilderSchemas, SchemaRegistry, SchemaSet, SchemaViolation, BUILDER_SCHEMA, GLOBAL_SCHEMA,
    STREAM_SCHEMA,
};
use serde_json::{json, Value};

fn builder_schemas() -> BuilderSchemas {
    let registry = SchemaRegistry::from_schemas([
        (
            GLOBAL_SCHEMA.to_string(),
            json!({
                "type": "object",
                "required": ["urlBase"],
                "properties": {
                    "urlBase": { "type": "string", "minLength": 1 },
                    "authenticator": {
                        "type": "object",
                        "required": ["type"],
                        "properties": { "type": { "type": "string" } }
                    }
                }
            }),
        ),
        (
            STREAM_SCHEMA.to_string(),
            json!({
                "type": "object",
                "required": ["name", "requestOptions"],
                "properties": {
                    "name": { "type": "string", "minLength": 1 },
                    "requestOptions": {
                        "type": "object",
                        "required": ["url"],
                        "properties": { "url": { "type": "string", "minLength": 1 } }
                    }
                }
            }),
        ),
        (
            BUILDER_SCHEMA.to_string(),
            json!({
                "type": "object",
                "required": ["global", "streams"],
                "properties": {
                    "global": { "$ref": "global.schema.json" },
                    "streams": { "type": "array", "items": { "$ref": "stream.schema.json" } }
                }
            }),
        ),
    ]);
    BuilderSchemas::from_registry(&registry).expect("builder schemas compile")
}

fn stream(name: &str, url: &str) -> Value {
    json!({ "name": name, "requestOptions": { "url": url } })
}

fn builder_state(global: Value, streams: Vec<Value>) -> BuilderState {
    BuilderState::new(
        BuilderFormValues::new(json!({ "global": global, "streams": streams }))
            .expect("well-formed document"),
    )
}

fn valid_global() -> Value {
    json!({ "urlBase": "https://api.example.com" })
}

fn path(p: &str) -> FieldPath {
    FieldPath::parse(p).unwrap()
}

#[test]
fn full_mode_navigates_to_first_invalid_stream() {
    let schemas = builder_schemas();
    let state = builder_state(
        valid_global(),
        vec![stream("users", "/users"), stream("orders", "")],
    );
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState::default();
    let calls = Cell::new(0);
    let outcome = engine.validate_and_touch(
        &mut sink,
        Some(&mut || calls.set(calls.get() + 1)),
        None,
    );

    assert_eq!(sink.view, View::Stream(1));
    assert_eq!(
        sink.scroll_to_field,
        Some(path("formValues.streams.1.requestOptions.url"))
    );
    assert_eq!(calls.get(), 0);
    assert!(matches!(outcome, TouchOutcome::Navigated { view: View::Stream(1), .. }));
}

#[test]
fn full_mode_missing_required_field_targets_the_field() {
    let schemas = builder_schemas();
    let state = builder_state(
        valid_global(),
        vec![
            stream("users", "/users"),
            json!({ "name": "orders", "requestOptions": {} }),
        ],
    );
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState::default();
    engine.validate_and_touch(&mut sink, None, None);

    assert_eq!(
        sink.scroll_to_field,
        Some(path("formValues.streams.1.requestOptions.url"))
    );
}

#[test]
fn full_mode_valid_document_invokes_callback_once() {
    let schemas = builder_schemas();
    let state = builder_state(valid_global(), vec![stream("users", "/users")]);
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState {
        view: View::Stream(0),
        scroll_to_field: None,
    };
    let calls = Cell::new(0);
    let outcome = engine.validate_and_touch(
        &mut sink,
        Some(&mut || calls.set(calls.get() + 1)),
        None,
    );

    assert_eq!(outcome, TouchOutcome::Valid);
    assert_eq!(calls.get(), 1);
    assert_eq!(sink.view, View::Stream(0));
    assert_eq!(sink.scroll_to_field, None);
}

#[test]
fn oauth_token_without_testing_value_skips_global_schema() {
    let global = json!({
        "urlBase": "",
        "authenticator": {
            "type": DECLARATIVE_OAUTH_AUTHENTICATOR,
            "access_token_value": "{{ config['client_secret'] }}"
        }
    });
    let state = builder_state(global, vec![]);
    let errors = ErrorTree::new();

    let global_runs = Cell::new(0);
    let global_schema = |_: &Value| -> Result<(), SchemaViolation> {
        global_runs.set(global_runs.get() + 1);
        Err(SchemaViolation::new(path("urlBase"), "must not be empty"))
    };
    let passing = |_: &Value| -> Result<(), SchemaViolation> { Ok(()) };
    let engine = BuilderErrors::new(
        &state,
        &errors,
        SchemaSet {
            global: &global_schema,
            stream: &passing,
            document: &passing,
        },
    );

    let mut sink = FormManagementState::default();
    let outcome = engine.validate_and_touch(&mut sink, None, Some(&[View::Global][..]));

    assert_eq!(global_runs.get(), 0);
    assert_eq!(sink.view, View::Global);
    assert_eq!(
        sink.scroll_to_field,
        Some(path("formValues.global.authenticator.declarative_oauth_flow"))
    );
    assert!(matches!(outcome, TouchOutcome::Navigated { view: View::Global, .. }));
}

#[test]
fn refresh_token_with_testing_value_falls_back_to_schema() {
    let schemas = builder_schemas();
    let global = json!({
        "urlBase": "",
        "authenticator": {
            "type": DECLARATIVE_OAUTH_AUTHENTICATOR,
            "refresh_token_updater": { "refresh_token_name": "refresh_token" },
            "refresh_token": "{{ config[\"client_refresh_token\"] }}",
            "access_token_value": "{{ config['client_secret'] }}"
        }
    });
    let testing_values: TestingValues =
        serde_json::from_value(json!({ "client_refresh_token": "r3fr3sh" })).unwrap();
    let state = builder_state(global, vec![]).with_testing_values(testing_values);
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState::default();
    engine.validate_and_touch(&mut sink, None, Some(&[View::Global][..]));

    assert_eq!(sink.scroll_to_field, Some(path("formValues.global.urlBase")));
}

#[test]
fn full_mode_routes_oauth_error_to_global() {
    let schemas = builder_schemas();
    let global = json!({
        "urlBase": "https://api.example.com",
        "authenticator": {
            "type": DECLARATIVE_OAUTH_AUTHENTICATOR,
            "access_token_value": "{{ config['client_secret'] }}"
        }
    });
    let state = builder_state(global, vec![stream("users", "")]);
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState {
        view: View::Stream(0),
        scroll_to_field: None,
    };
    engine.validate_and_touch(&mut sink, None, None);

    assert_eq!(sink.view, View::Global);
    assert_eq!(
        sink.scroll_to_field,
        Some(path("formValues.global.authenticator.declarative_oauth_flow"))
    );
}

#[test]
fn scoped_mode_navigates_to_first_invalid_listed_view() {
    let schemas = builder_schemas();
    let state = builder_state(
        valid_global(),
        vec![
            stream("users", "/users"),
            stream("orders", "/orders"),
            json!({ "name": "", "requestOptions": { "url": "/items" } }),
        ],
    );
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState::default();
    let outcome = engine.validate_and_touch(
        &mut sink,
        None,
        Some(&[View::Global, View::Stream(2)][..]),
    );

    assert_eq!(sink.view, View::Stream(2));
    assert_eq!(sink.scroll_to_field, Some(path("formValues.streams.2.name")));
    assert_eq!(
        outcome,
        TouchOutcome::Navigated {
            view: View::Stream(2),
            scroll_target: path("formValues.streams.2.name"),
        }
    );
}

#[test]
fn scoped_mode_follows_caller_order() {
    let schemas = builder_schemas();
    let state = builder_state(
        json!({ "urlBase": "" }),
        vec![stream("users", "")],
    );
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState::default();
    engine.validate_and_touch(&mut sink, None, Some(&[View::Stream(0), View::Global][..]));

    assert_eq!(sink.view, View::Stream(0));
    assert_eq!(
        sink.scroll_to_field,
        Some(path("formValues.streams.0.requestOptions.url"))
    );
}

#[test]
fn scoped_valid_view_is_noop_without_callback() {
    let schemas = builder_schemas();
    let state = builder_state(json!({ "urlBase": "" }), vec![stream("users", "/users")]);
    let errors = ErrorTree::new();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    let mut sink = FormManagementState::default();
    let calls = Cell::new(0);
    let outcome = engine.validate_and_touch(
        &mut sink,
        Some(&mut || calls.set(calls.get() + 1)),
        Some(&[View::Stream(0)][..]),
    );

    assert_eq!(outcome, TouchOutcome::Unchanged);
    assert_eq!(calls.get(), 0);
    assert_eq!(sink, FormManagementState::default());
}

#[test]
fn queries_read_the_published_snapshot() {
    let schemas = builder_schemas();
    let state = builder_state(valid_global(), vec![stream("a", "/a"), stream("b", "/b")]);
    let snapshot = ErrorSnapshot::default();
    snapshot.publish(ErrorTree::from_value(&json!({
        "global": { "urlBase": { "type": "required" } },
        "streams": { "1": { "name": {} }, "5": { "name": {} } }
    })));

    let errors = snapshot.load();
    let engine = BuilderErrors::new(&state, &errors, schemas.schema_set());

    assert_eq!(engine.invalid_views(None, None), vec![View::Global, View::Stream(1)]);
    assert_eq!(
        engine.invalid_views(Some(&[View::Stream(1), View::Stream(0)][..]), None),
        vec![View::Stream(1)]
    );
    assert!(engine.has_errors(Some(&[View::Global][..])));
    assert!(!engine.has_errors(Some(&[View::Stream(0), View::Stream(5)][..])));
    assert_eq!(engine.invalid_views(None, None), engine.invalid_views(None, None));
}

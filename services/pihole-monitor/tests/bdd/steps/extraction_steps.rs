//! BDD step definitions for summary field extraction

use cucumber::{given, then};

use pihole_monitor::extract::extract_field;
use pihole_monitor::FetchError;

use crate::world::{canned_response, PiholeWorld};

#[given(expr = "the summary body {string}")]
fn summary_body(world: &mut PiholeWorld, name: String) {
    let response = canned_response(&name).expect("canned response has no body");
    world.body = Some(response.body);
}

#[then(expr = "field {string} is {string}")]
fn field_is(world: &mut PiholeWorld, field: String, value: String) {
    let body = world.body.as_ref().expect("no body");
    assert_eq!(extract_field(body, &field), Ok(value));
}

#[then(expr = "field {string} is the quoted text {string}")]
fn field_is_quoted(world: &mut PiholeWorld, field: String, value: String) {
    let body = world.body.as_ref().expect("no body");
    assert_eq!(extract_field(body, &field), Ok(format!("\"{}\"", value)));
}

#[then(expr = "field {string} is missing")]
fn field_missing(world: &mut PiholeWorld, field: String) {
    let body = world.body.as_ref().expect("no body");
    assert_eq!(
        extract_field(body, &field),
        Err(FetchError::FieldMissing(field.clone()))
    );
}

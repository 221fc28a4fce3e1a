//! BDD step definitions for poll scheduling

use cucumber::{given, then, when};

use pihole_monitor::config::PiholeConfig;
use pihole_monitor::FetchError;

use crate::world::PiholeWorld;

fn parse_fetch_error(name: &str) -> FetchError {
    match name {
        "no endpoint" => FetchError::NoEndpointConfigured,
        "auth rejected" => FetchError::AuthRejected,
        "empty response" => FetchError::EmptyResponse,
        "server error" => FetchError::HttpStatus(500),
        other => panic!("Unknown fetch error: {}", other),
    }
}

#[given(expr = "a Pi-hole at {string} polled every {int} seconds")]
fn pihole_at(world: &mut PiholeWorld, hostname: String, interval: u64) {
    world.endpoint = PiholeConfig {
        hostname,
        api_key: "secret".to_string(),
        poll_interval_seconds: interval,
        ..PiholeConfig::default()
    };
    world.ensure_engine();
}

#[given(expr = "a Pi-hole with no hostname polled every {int} seconds")]
fn pihole_without_host(world: &mut PiholeWorld, interval: u64) {
    world.endpoint = PiholeConfig {
        poll_interval_seconds: interval,
        ..PiholeConfig::default()
    };
    world.ensure_engine();
}

#[given(expr = "the Pi-hole answers with {string}")]
async fn pihole_answers(world: &mut PiholeWorld, name: String) {
    world.http.answer_with(&name).await;
}

#[when(expr = "the Pi-hole now answers with {string}")]
async fn pihole_now_answers(world: &mut PiholeWorld, name: String) {
    world.http.answer_with(&name).await;
}

#[when(expr = "{int} ticks are delivered")]
async fn deliver_ticks(world: &mut PiholeWorld, count: u64) {
    world.ensure_engine();
    for _ in 0..count {
        world.ticks_delivered += 1;
        let scheduler = world.scheduler.as_mut().expect("scheduler not built");
        let outcome = scheduler.tick().await;
        if let Some(poll) = outcome.poll {
            world.polled_on_ticks.push(world.ticks_delivered);
            world.last_poll = Some(poll);
        }
    }
}

#[when("the endpoint is reconfigured")]
async fn reconfigure(world: &mut PiholeWorld) {
    let endpoint = world.endpoint.clone();
    world.state().write().await.replace_endpoint(endpoint);
}

#[then(expr = "polls happened on ticks {int}, {int} and {int}")]
fn polls_happened_on(world: &mut PiholeWorld, first: u64, second: u64, third: u64) {
    assert_eq!(world.polled_on_ticks, vec![first, second, third]);
}

#[then(expr = "the last poll happened on tick {int}")]
fn last_poll_on(world: &mut PiholeWorld, tick: u64) {
    assert_eq!(world.polled_on_ticks.last(), Some(&tick));
}

#[then("no request was sent")]
async fn no_request(world: &mut PiholeWorld) {
    assert!(world.http.requests().await.is_empty());
}

#[then(expr = "{int} request(s) was/were sent")]
async fn request_count(world: &mut PiholeWorld, count: usize) {
    assert_eq!(world.http.requests().await.len(), count);
}

#[then("the last poll succeeded")]
fn last_poll_succeeded(world: &mut PiholeWorld) {
    assert_eq!(world.last_poll, Some(Ok(())));
}

#[then(expr = "the last poll failed with {string}")]
fn last_poll_failed(world: &mut PiholeWorld, error: String) {
    assert_eq!(world.last_poll, Some(Err(parse_fetch_error(&error))));
}

#[then(expr = "the status shows {string} queries and {string} ads")]
async fn status_shows(world: &mut PiholeWorld, queries: String, ads: String) {
    let status = world.state().read().await.cache.read();
    assert_eq!(status.dns_queries_today, queries);
    assert_eq!(status.ads_blocked_today, ads);
}

#[then("the Pi-hole is online")]
async fn is_online(world: &mut PiholeWorld) {
    assert!(world.state().read().await.cache.read().reachable);
}

#[then("the Pi-hole is offline")]
async fn is_offline(world: &mut PiholeWorld) {
    assert!(!world.state().read().await.cache.read().reachable);
}

#[then("blocking is enabled")]
async fn blocking_enabled(world: &mut PiholeWorld) {
    assert!(world.state().read().await.cache.read().service_enabled);
}

#[then("blocking is reported disabled")]
async fn blocking_reported_disabled(world: &mut PiholeWorld) {
    assert!(!world.state().read().await.cache.read().service_enabled);
}

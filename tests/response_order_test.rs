//! Responses render in completion order: a slow response to an earlier
//! request overwrites a faster response to a later one.

mod common;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use usagemon::adapters::{MockHttpClient, MockResponse};
use usagemon::app::AppMessage;
use usagemon::config::MonitorConfig;
use usagemon::poller::StatsPoller;

use common::{drain_into, stats_body, test_app};

fn poller(client: &MockHttpClient) -> (Arc<StatsPoller>, mpsc::UnboundedReceiver<AppMessage>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let poller = StatsPoller::new(Arc::new(client.clone()), &MonitorConfig::default(), tx);
    (Arc::new(poller), rx)
}

#[tokio::test(start_paused = true)]
async fn test_late_older_response_wins() {
    let client = MockHttpClient::new();
    client.push_response(
        MockResponse::json(&stats_body(&[("cpu", 1.0)])).after(Duration::from_millis(100)),
    );
    client.push_response(
        MockResponse::json(&stats_body(&[("cpu", 2.0)])).after(Duration::from_millis(10)),
    );
    let (poller, mut rx) = poller(&client);

    let first = Arc::clone(&poller);
    let a = tokio::spawn(async move { first.fetch_and_render().await });
    tokio::task::yield_now().await;
    let second = Arc::clone(&poller);
    let b = tokio::spawn(async move { second.fetch_and_render().await });

    a.await.unwrap().unwrap();
    b.await.unwrap().unwrap();

    let mut app = test_app();
    let mut arrival = Vec::new();
    while let Ok(message) = rx.try_recv() {
        let AppMessage::UsagesUpdated { seq, .. } = &message;
        arrival.push(*seq);
        app.handle_message(message);
    }

    assert_eq!(arrival, vec![1, 0]);
    assert_eq!(app.usages.labels(), vec!["cpu: 1.00"]);
    assert_eq!(app.updates_applied, 2);
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_ticks_render_in_completion_order() {
    let client = MockHttpClient::new();
    // Tick at 0ms finishes at 120ms; tick at 50ms finishes at 60ms
    client.push_response(
        MockResponse::json(&stats_body(&[("slow", 1.0)])).after(Duration::from_millis(120)),
    );
    client.push_response(
        MockResponse::json(&stats_body(&[("fast", 2.0)])).after(Duration::from_millis(10)),
    );
    client.set_default_response(MockResponse::Pending);
    let (poller, mut rx) = poller(&client);

    let handle = poller.start();
    let mut app = test_app();

    tokio::time::sleep(Duration::from_millis(80)).await;
    drain_into(&mut app, &mut rx);
    assert_eq!(app.usages.labels(), vec!["fast: 2.00"]);

    tokio::time::sleep(Duration::from_millis(60)).await;
    drain_into(&mut app, &mut rx);
    assert_eq!(app.usages.labels(), vec!["slow: 1.00"]);

    handle.stop();
}

#[tokio::test(start_paused = true)]
async fn test_failed_cycle_between_successes_keeps_previous() {
    let client = MockHttpClient::new();
    client.push_response(MockResponse::json(&stats_body(&[("cpu", 10.0)])));
    client.push_response(MockResponse::status(503, "busy"));
    client.set_default_response(MockResponse::Pending);
    let (poller, mut rx) = poller(&client);

    let handle = poller.start();
    let mut app = test_app();

    tokio::time::sleep(Duration::from_millis(70)).await;
    drain_into(&mut app, &mut rx);

    assert_eq!(client.request_count(), 2);
    assert_eq!(app.usages.labels(), vec!["cpu: 10.00"]);
    assert_eq!(app.updates_applied, 1);

    handle.stop();
}

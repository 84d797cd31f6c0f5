//! End-to-end hook behavior against a scripted proxy.

use std::sync::Arc;
use std::time::Duration;

use emucon_client::{ClientConfig, RestClient};
use emucon_core::apigateway::CreateRestApiInput;
use emucon_core::cloudwatch::{LogEventsOptions, LogGroupsOptions};
use emucon_hooks::{Hooks, HooksConfig};
use emucon_query::{ChannelNotifier, Notification, NotificationLevel, QueryStatus, QueryStore};
use emucon_test_utils::{fixtures, FakeProxy, Reply};
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::sleep;

const WAIT: Duration = Duration::from_secs(2);
const QUIET: Duration = Duration::from_millis(300);

fn hooks_with(proxy: &FakeProxy, config: HooksConfig) -> (Hooks, UnboundedReceiver<Notification>) {
    let client = RestClient::new(&ClientConfig::new(proxy.base_url())).expect("client");
    let (notifier, toasts) = ChannelNotifier::new();
    let hooks = Hooks::with_config(QueryStore::default(), client, Arc::new(notifier), config);
    (hooks, toasts)
}

fn hooks(proxy: &FakeProxy) -> (Hooks, UnboundedReceiver<Notification>) {
    hooks_with(proxy, HooksConfig::default())
}

#[tokio::test]
async fn deleting_a_log_group_refetches_the_list_once() {
    let proxy = FakeProxy::start().await;
    let list = "/api/cloudwatch/log-groups";
    let delete = "/api/cloudwatch/log-groups/%2Faws%2Flambda%2Ff";
    proxy
        .respond("GET", list, Reply::ok(fixtures::log_groups_body(&["/aws/lambda/a", "/aws/lambda/f"])))
        .respond("GET", list, Reply::ok(fixtures::log_groups_body(&["/aws/lambda/a"])))
        .respond("DELETE", delete, Reply::empty());
    let (hooks, mut toasts) = hooks(&proxy);

    let mut groups = hooks.use_log_groups(LogGroupsOptions::default(), true);
    groups.settled().await;
    assert_eq!(groups.data().unwrap().items.len(), 2);

    hooks
        .use_delete_log_group()
        .mutate_async("/aws/lambda/f".to_string())
        .await
        .unwrap();
    proxy.wait_for_hits("GET", list, 2, WAIT).await;
    groups.settled().await;
    sleep(QUIET).await;

    assert_eq!(proxy.hits("DELETE", delete), 1);
    assert_eq!(proxy.hits("GET", list), 2);
    let names: Vec<_> = groups
        .data()
        .unwrap()
        .items
        .iter()
        .map(|g| g.log_group_name.clone())
        .collect();
    assert_eq!(names, vec!["/aws/lambda/a".to_string()]);

    let toast = toasts.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Success);
    assert_eq!(toast.message, "Log group deleted");
}

#[tokio::test]
async fn failed_delete_reports_and_keeps_the_list() {
    let proxy = FakeProxy::start().await;
    let list = "/api/cloudwatch/log-groups";
    proxy
        .respond("GET", list, Reply::ok(fixtures::log_groups_body(&["app"])))
        .respond("DELETE", "/api/cloudwatch/log-groups/app", Reply::error(500, "boom"));
    let (hooks, mut toasts) = hooks(&proxy);

    let mut groups = hooks.use_log_groups(LogGroupsOptions::default(), true);
    groups.settled().await;

    let delete = hooks.use_delete_log_group();
    let err = delete.mutate_async("app".to_string()).await.unwrap_err();
    sleep(QUIET).await;

    assert_eq!(err.status(), Some(500));
    assert_eq!(proxy.hits("GET", list), 1);
    assert!(!groups.is_stale());
    let toast = toasts.try_recv().unwrap();
    assert_eq!(toast.level, NotificationLevel::Error);
    assert_eq!(toast.message, "Failed to delete log group: boom");
}

#[tokio::test]
async fn creating_a_rest_api_refreshes_the_list_only() {
    let proxy = FakeProxy::start().await;
    let list = "/api/apigateway/apis";
    proxy
        .respond("GET", list, Reply::ok(fixtures::rest_apis_body(&[("a1", "orders")])))
        .respond("GET", list, Reply::ok(fixtures::rest_apis_body(&[("a1", "orders"), ("b2", "billing")])))
        .respond("GET", "/api/apigateway/apis/a1", Reply::ok(fixtures::rest_api_body("a1", "orders")))
        .respond("POST", list, Reply::ok(fixtures::rest_api_body("b2", "billing")));
    let (hooks, mut toasts) = hooks(&proxy);

    let mut apis = hooks.use_rest_apis(true);
    let mut detail = hooks.use_rest_api("a1", true);
    apis.settled().await;
    detail.settled().await;

    let created = hooks
        .use_create_rest_api()
        .mutate_async(CreateRestApiInput {
            name: "billing".to_string(),
            description: None,
            endpoint_configuration: None,
        })
        .await
        .unwrap();
    assert_eq!(created.id, "b2");

    proxy.wait_for_hits("GET", list, 2, WAIT).await;
    apis.settled().await;
    sleep(QUIET).await;

    assert_eq!(proxy.hits("GET", list), 2);
    assert_eq!(proxy.hits("GET", "/api/apigateway/apis/a1"), 1);
    assert_eq!(apis.data().unwrap().len(), 2);
    let body = proxy.requests_to("POST", list)[0].body.clone().unwrap();
    assert_eq!(body, json!({"name": "billing"}));
    assert_eq!(toasts.try_recv().unwrap().message, "REST API created");
}

#[tokio::test]
async fn tail_mode_polls_until_disabled_or_dropped() {
    let proxy = FakeProxy::start().await;
    let tail = "/api/cloudwatch/log-groups/app/events";
    let head = "/api/cloudwatch/log-groups/other/events";
    proxy
        .respond("GET", tail, Reply::ok(fixtures::log_events_body(&["line"])))
        .respond("GET", head, Reply::ok(fixtures::log_events_body(&["line"])));
    let config = HooksConfig::default().with_log_tail_interval(Duration::from_millis(100));
    let (hooks, _toasts) = hooks_with(&proxy, config);

    let tail_options = LogEventsOptions {
        start_from_head: Some(false),
        ..Default::default()
    };
    let head_options = LogEventsOptions {
        start_from_head: Some(true),
        ..Default::default()
    };
    let mut tailing = hooks.use_log_events("app", tail_options, true);
    let _reading = hooks.use_log_events("other", head_options, true);

    proxy.wait_for_hits("GET", tail, 3, WAIT).await;

    tailing.set_enabled(false);
    sleep(Duration::from_millis(50)).await;
    let paused_at = proxy.hits("GET", tail);
    sleep(QUIET).await;
    assert_eq!(proxy.hits("GET", tail), paused_at);

    tailing.set_enabled(true);
    proxy.wait_for_hits("GET", tail, paused_at + 1, WAIT).await;

    drop(tailing);
    sleep(Duration::from_millis(50)).await;
    let dropped_at = proxy.hits("GET", tail);
    sleep(QUIET).await;
    assert_eq!(proxy.hits("GET", tail), dropped_at);

    assert_eq!(proxy.hits("GET", head), 1);
}

#[tokio::test]
async fn access_keys_load_only_once_the_dialog_opens() {
    let proxy = FakeProxy::start().await;
    let path = "/api/iam/users/alice/access-keys";
    proxy.respond("GET", path, Reply::ok(fixtures::access_keys_body("alice", &["AKIA1", "AKIA2"])));
    let (hooks, _toasts) = hooks(&proxy);

    let mut keys = hooks.use_access_keys("alice", false);
    sleep(QUIET).await;
    assert_eq!(proxy.hits("GET", path), 0);
    assert_eq!(keys.status(), QueryStatus::Idle);

    keys.set_enabled(true);
    let state = keys.settled().await;
    sleep(QUIET).await;

    assert_eq!(state.status, QueryStatus::Success);
    assert_eq!(proxy.hits("GET", path), 1);
    let ids: Vec<_> = keys.data().unwrap().iter().map(|k| k.access_key_id.clone()).collect();
    assert_eq!(ids, vec!["AKIA1".to_string(), "AKIA2".to_string()]);
}

#[tokio::test]
async fn blank_user_never_queries() {
    let proxy = FakeProxy::start().await;
    let (hooks, _toasts) = hooks(&proxy);

    let keys = hooks.use_access_keys("", true);
    sleep(QUIET).await;

    assert!(!keys.is_enabled());
    assert!(proxy.requests().is_empty());
}

#[tokio::test]
async fn blank_user_stays_idle_when_the_dialog_opens() {
    let proxy = FakeProxy::start().await;
    let (hooks, _toasts) = hooks(&proxy);

    let mut keys = hooks.use_access_keys("", false);
    keys.set_enabled(true);
    let state = keys.settled().await;
    sleep(QUIET).await;

    assert!(!keys.is_enabled());
    assert_eq!(state.status, QueryStatus::Idle);
    assert!(keys.error().is_none());
    assert!(proxy.requests().is_empty());
}

#[tokio::test]
async fn not_found_message_reaches_the_handle() {
    let proxy = FakeProxy::start().await;
    proxy.respond("GET", "/api/apigateway/apis/missing", Reply::error(404, "X not found"));
    let (hooks, _toasts) = hooks(&proxy);

    let mut api = hooks.use_rest_api("missing", true);
    let state = api.settled().await;

    assert_eq!(state.status, QueryStatus::Error);
    let err = api.error().unwrap();
    assert_eq!(err.message(), "X not found");
    assert!(err.is_not_found());
    assert!(api.data().is_none());
}

#[tokio::test]
async fn identical_hooks_share_one_request() {
    let proxy = FakeProxy::start().await;
    let path = "/api/dynamodb/tables";
    proxy.respond(
        "GET",
        path,
        Reply::ok(fixtures::table_names_body(&["orders"])).with_delay(Duration::from_millis(50)),
    );
    let (hooks, _toasts) = hooks(&proxy);

    let mut first = hooks.use_tables(true);
    let mut second = hooks.use_tables(true);
    first.settled().await;
    second.settled().await;

    assert_eq!(proxy.hits("GET", path), 1);
    assert_eq!(first.data(), second.data());
    assert_eq!(first.data().unwrap().as_slice(), ["orders".to_string()]);
}

//! Request shapes and response handling against fake proxies.

use emucon_client::{ClientConfig, RestClient};
use emucon_core::apigateway::CreateRestApiInput;
use emucon_core::cloudwatch::{CreateLogGroupInput, LogEventsOptions, LogGroupsOptions};
use emucon_core::dynamodb::DeleteItemInput;
use emucon_core::secrets::DeleteSecretOptions;
use emucon_core::sqs::{DeleteMessageInput, ReceiveMessagesInput};
use emucon_core::ClientError;
use emucon_test_utils::assertions::{assert_api_error, assert_decode_error, assert_invalid_input};
use emucon_test_utils::{fixtures, FakeProxy, Reply};
use httpmock::MockServer;
use serde_json::json;

fn client(base_url: &str) -> RestClient {
    RestClient::new(&ClientConfig::new(base_url)).expect("client")
}

#[tokio::test]
async fn list_log_groups_sends_only_set_options() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("GET")
                .path("/api/cloudwatch/log-groups")
                .query_param("prefix", "/aws/lambda")
                .query_param("limit", "25");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "logGroups": [{"logGroupName": "/aws/lambda/a"}],
                    "nextToken": "tok-2"
                }));
        })
        .await;

    let options = LogGroupsOptions {
        prefix: Some("/aws/lambda".to_string()),
        next_token: None,
        limit: Some(25),
    };
    let page = client(&server.base_url()).list_log_groups(&options).await.unwrap();

    mock.assert_async().await;
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].log_group_name, "/aws/lambda/a");
    assert_eq!(page.next_token.as_deref(), Some("tok-2"));
}

#[tokio::test]
async fn create_rest_api_posts_camel_case_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method("POST")
                .path("/api/apigateway/apis")
                .json_body_partial(r#"{"name":"orders","endpointConfiguration":{"types":["REGIONAL"]}}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(fixtures::rest_api_body("a1b2c3", "orders"));
        })
        .await;

    let input = CreateRestApiInput {
        name: "orders".to_string(),
        description: None,
        endpoint_configuration: Some(emucon_core::apigateway::EndpointConfiguration::regional()),
    };
    let api = client(&server.base_url()).create_rest_api(&input).await.unwrap();

    mock.assert_async().await;
    assert_eq!(api.id, "a1b2c3");
}

#[tokio::test]
async fn not_found_body_message_is_surfaced() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/apigateway/apis/missing");
            then.status(404)
                .header("content-type", "application/json")
                .json_body(fixtures::not_found("X"));
        })
        .await;

    let result = client(&server.base_url()).get_rest_api("missing").await;
    assert_api_error(&result, 404, "X not found");
}

#[tokio::test]
async fn error_without_body_uses_operation_fallback() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/apigateway/apis/abc");
            then.status(502).body("Bad Gateway");
        })
        .await;

    let result = client(&server.base_url()).get_rest_api("abc").await;
    assert_api_error(&result, 502, "Failed to fetch REST API");
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/iam/users");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"users": "not-a-list"}"#);
        })
        .await;

    let result = client(&server.base_url()).list_users().await;
    assert_decode_error(&result);
}

#[tokio::test]
async fn missing_envelope_field_is_empty_list() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method("GET").path("/api/dynamodb/tables");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({}));
        })
        .await;

    let tables = client(&server.base_url()).list_tables().await.unwrap();
    assert!(tables.is_empty());
}

#[tokio::test]
async fn stages_unwrap_item_and_events_are_bare() {
    let proxy = FakeProxy::start().await;
    proxy.respond(
        "GET",
        "/api/apigateway/apis/a1/stages",
        Reply::ok(json!({"item": [{"stageName": "dev"}, {"stageName": "prod"}]})),
    );
    proxy.respond(
        "GET",
        "/api/cloudformation/stacks/web/events",
        Reply::ok(json!([{"EventId": "e1", "ResourceStatus": "CREATE_COMPLETE"}])),
    );

    let client = client(&proxy.base_url());
    let stages = client.list_stages("a1").await.unwrap();
    let events = client.list_stack_events("web").await.unwrap();

    let names: Vec<_> = stages.iter().map(|s| s.stage_name.as_str()).collect();
    assert_eq!(names, vec!["dev", "prod"]);
    assert_eq!(events[0].resource_status, "CREATE_COMPLETE");
}

#[tokio::test]
async fn identifiers_are_percent_encoded_as_one_segment() {
    let proxy = FakeProxy::start().await;
    proxy.respond(
        "DELETE",
        "/api/cloudwatch/log-groups/%2Faws%2Flambda%2Ff",
        Reply::empty(),
    );
    proxy.respond(
        "DELETE",
        "/api/iam/roles/deployer/policies/arn%3Aaws%3Aiam%3A%3Aaws%3Apolicy%2FReadOnlyAccess",
        Reply::empty(),
    );

    let client = client(&proxy.base_url());
    client.delete_log_group("/aws/lambda/f").await.unwrap();
    client
        .detach_role_policy("deployer", "arn:aws:iam::aws:policy/ReadOnlyAccess")
        .await
        .unwrap();

    assert_eq!(proxy.hits("DELETE", "/api/cloudwatch/log-groups/%2Faws%2Flambda%2Ff"), 1);
    assert_eq!(proxy.requests().len(), 2);
}

#[tokio::test]
async fn empty_identifier_never_reaches_the_proxy() {
    let proxy = FakeProxy::start().await;
    let client = client(&proxy.base_url());

    assert_invalid_input(&client.delete_log_group("").await);
    assert_invalid_input(&client.list_access_keys("   ").await);
    assert!(proxy.requests().is_empty());
}

#[tokio::test]
async fn tail_options_only_send_present_fields() {
    let proxy = FakeProxy::start().await;
    let path = "/api/cloudwatch/log-groups/app/events";
    proxy.respond("GET", path, Reply::ok(fixtures::log_events_body(&["one", "two"])));

    let options = LogEventsOptions {
        limit: Some(100),
        start_from_head: Some(false),
        filter_pattern: Some(String::new()),
        ..Default::default()
    };
    let page = client(&proxy.base_url()).get_log_events("app", &options).await.unwrap();

    assert_eq!(page.events.len(), 2);
    assert_eq!(page.next_forward_token.as_deref(), Some("f/0001"));
    let sent = proxy.requests_to("GET", path);
    let mut pairs = sent[0].query_pairs();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("limit".to_string(), "100".to_string()),
            ("startFromHead".to_string(), "false".to_string()),
        ]
    );
}

#[tokio::test]
async fn delete_bodies_carry_keys_and_receipt_handles() {
    let proxy = FakeProxy::start().await;
    proxy.respond("DELETE", "/api/dynamodb/tables/orders/items", Reply::empty());
    proxy.respond("DELETE", "/api/sqs/queues/jobs/messages", Reply::empty());

    let client = client(&proxy.base_url());
    let mut key = serde_json::Map::new();
    key.insert("pk".to_string(), json!("order#1"));
    client
        .delete_item("orders", &DeleteItemInput { key })
        .await
        .unwrap();
    client
        .delete_message(
            "jobs",
            &DeleteMessageInput {
                receipt_handle: "rh-1".to_string(),
            },
        )
        .await
        .unwrap();

    let bodies: Vec<_> = proxy.requests().into_iter().map(|r| r.body).collect();
    assert_eq!(bodies[0], Some(json!({"key": {"pk": "order#1"}})));
    assert_eq!(bodies[1], Some(json!({"receiptHandle": "rh-1"})));
}

#[tokio::test]
async fn receive_messages_posts_to_receive_route() {
    let proxy = FakeProxy::start().await;
    proxy.respond(
        "POST",
        "/api/sqs/queues/jobs/messages/receive",
        Reply::ok(json!({"messages": [{"MessageId": "m1", "ReceiptHandle": "rh", "Body": "hi"}]})),
    );

    let messages = client(&proxy.base_url())
        .receive_messages(
            "jobs",
            &ReceiveMessagesInput {
                max_number_of_messages: Some(10),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].body, "hi");
}

#[tokio::test]
async fn force_delete_secret_sets_query_flag() {
    let proxy = FakeProxy::start().await;
    proxy.respond("DELETE", "/api/secretsmanager/secrets/db-pass", Reply::empty());

    client(&proxy.base_url())
        .delete_secret(
            "db-pass",
            &DeleteSecretOptions {
                force_delete_without_recovery: Some(true),
            },
        )
        .await
        .unwrap();

    let sent = proxy.requests_to("DELETE", "/api/secretsmanager/secrets/db-pass");
    assert_eq!(
        sent[0].query_pairs(),
        vec![("forceDeleteWithoutRecovery".to_string(), "true".to_string())]
    );
}

#[tokio::test]
async fn create_log_group_error_message_from_proxy() {
    let proxy = FakeProxy::start().await;
    proxy.respond(
        "POST",
        "/api/cloudwatch/log-groups",
        Reply::error(400, "The specified log group already exists"),
    );

    let err = client(&proxy.base_url())
        .create_log_group(&CreateLogGroupInput {
            log_group_name: "app".to_string(),
            retention_in_days: None,
        })
        .await
        .unwrap_err();

    assert_eq!(err, ClientError::api(400, "The specified log group already exists"));
}

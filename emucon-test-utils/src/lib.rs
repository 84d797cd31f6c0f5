//! EMUCON Test Utilities
//!
//! Shared test infrastructure for the EMUCON workspace:
//! - A scripted fake backend proxy
//! - Proptest generators for identifiers and options
//! - Fixtures mirroring proxy response bodies
//! - Assertions over `ClientError`

pub mod proxy;

pub use proxy::{FakeProxy, RecordedRequest, Reply};

pub use emucon_core::{ClientError, ClientResult, Service};

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for identifiers and query options.

    use emucon_core::cloudwatch::{LogEventsOptions, LogGroupsOptions};
    use emucon_core::Service;
    use proptest::prelude::*;

    /// Any service.
    pub fn arb_service() -> impl Strategy<Value = Service> {
        prop::sample::select(Service::all().to_vec())
    }

    /// A plain resource name: letters, digits, `-` and `_`.
    pub fn arb_resource_name() -> impl Strategy<Value = String> {
        "[a-zA-Z][a-zA-Z0-9_-]{0,24}"
    }

    /// Log group names, which usually contain slashes.
    pub fn arb_log_group_name() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9_-]{1,12}", 1..4).prop_map(|parts| format!("/{}", parts.join("/")))
    }

    /// IAM-style ARNs with colons and slashes.
    pub fn arb_arn() -> impl Strategy<Value = String> {
        ("[a-z]{2,10}", "[0-9]{12}", "[a-zA-Z0-9/_-]{1,30}")
            .prop_map(|(svc, account, rest)| format!("arn:aws:{}::{}:{}", svc, account, rest))
    }

    /// Any non-blank identifier, including reserved URL characters.
    pub fn arb_identifier() -> impl Strategy<Value = String> {
        prop_oneof![
            arb_resource_name(),
            arb_log_group_name(),
            arb_arn(),
            "[a-zA-Z0-9 ?#&=%+.]{1,20}".prop_filter("non-blank", |s| !s.trim().is_empty()),
        ]
    }

    pub fn arb_log_groups_options() -> impl Strategy<Value = LogGroupsOptions> {
        (
            prop::option::of("[a-z/]{0,10}"),
            prop::option::of("[a-zA-Z0-9]{1,16}"),
            prop::option::of(1u32..100),
        )
            .prop_map(|(prefix, next_token, limit)| LogGroupsOptions {
                prefix,
                next_token,
                limit,
            })
    }

    pub fn arb_log_events_options() -> impl Strategy<Value = LogEventsOptions> {
        (
            prop::option::of("[a-z0-9-]{1,12}"),
            prop::option::of(0i64..2_000_000_000_000),
            prop::option::of("[a-zA-Z ]{0,12}"),
            prop::option::of(1u32..500),
            prop::option::of(any::<bool>()),
        )
            .prop_map(
                |(log_stream_name, start_time, filter_pattern, limit, start_from_head)| {
                    LogEventsOptions {
                        log_stream_name,
                        start_time,
                        filter_pattern,
                        limit,
                        start_from_head,
                        ..Default::default()
                    }
                },
            )
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Response bodies shaped like the proxy's.

    use serde_json::{json, Value};

    pub fn log_groups_body(names: &[&str]) -> Value {
        let groups: Vec<Value> = names
            .iter()
            .map(|name| {
                json!({
                    "logGroupName": name,
                    "arn": format!("arn:aws:logs:us-east-1:000000000000:log-group:{}:*", name),
                    "creationTime": 1_700_000_000_000i64,
                    "storedBytes": 0,
                })
            })
            .collect();
        json!({ "logGroups": groups })
    }

    pub fn log_events_body(messages: &[&str]) -> Value {
        let events: Vec<Value> = messages
            .iter()
            .enumerate()
            .map(|(i, message)| {
                json!({
                    "timestamp": 1_700_000_000_000i64 + i as i64,
                    "message": message,
                    "ingestionTime": 1_700_000_000_100i64 + i as i64,
                })
            })
            .collect();
        json!({
            "events": events,
            "nextForwardToken": "f/0001",
            "nextBackwardToken": "b/0001",
        })
    }

    pub fn rest_apis_body(apis: &[(&str, &str)]) -> Value {
        let items: Vec<Value> = apis
            .iter()
            .map(|(id, name)| json!({ "id": id, "name": name, "createdDate": "2024-01-01T00:00:00Z" }))
            .collect();
        json!({ "items": items })
    }

    pub fn rest_api_body(id: &str, name: &str) -> Value {
        json!({ "id": id, "name": name, "endpointConfiguration": { "types": ["REGIONAL"] } })
    }

    pub fn access_keys_body(user: &str, key_ids: &[&str]) -> Value {
        let keys: Vec<Value> = key_ids
            .iter()
            .map(|id| json!({ "AccessKeyId": id, "UserName": user, "Status": "Active" }))
            .collect();
        json!({ "accessKeyMetadata": keys })
    }

    pub fn users_body(names: &[&str]) -> Value {
        let users: Vec<Value> = names
            .iter()
            .map(|name| {
                json!({
                    "UserName": name,
                    "UserId": format!("AIDA{}", name.to_uppercase()),
                    "Arn": format!("arn:aws:iam::000000000000:user/{}", name),
                    "Path": "/",
                })
            })
            .collect();
        json!({ "users": users })
    }

    pub fn table_names_body(names: &[&str]) -> Value {
        json!({ "tableNames": names })
    }

    pub fn queue_urls_body(names: &[&str]) -> Value {
        let urls: Vec<String> = names
            .iter()
            .map(|name| format!("http://localhost:4566/000000000000/{}", name))
            .collect();
        json!({ "queueUrls": urls })
    }

    pub fn not_found(what: &str) -> Value {
        json!({ "error": format!("{} not found", what) })
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for `ClientResult` values.

    use super::*;

    /// Assert a proxy error with the given status and message.
    #[track_caller]
    pub fn assert_api_error<T: std::fmt::Debug>(result: &ClientResult<T>, status: u16, message: &str) {
        match result {
            Err(ClientError::Api { status: s, message: m }) => {
                assert_eq!(*s, status, "Wrong status in Api error");
                assert_eq!(m, message, "Wrong message in Api error");
            }
            other => panic!("Expected Api({}, {:?}), got: {:?}", status, message, other),
        }
    }

    /// Assert that a call was rejected before any I/O.
    #[track_caller]
    pub fn assert_invalid_input<T: std::fmt::Debug>(result: &ClientResult<T>) {
        match result {
            Err(ClientError::InvalidInput(_)) => {}
            other => panic!("Expected InvalidInput error, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_decode_error<T: std::fmt::Debug>(result: &ClientResult<T>) {
        match result {
            Err(ClientError::Decode { .. }) => {}
            other => panic!("Expected Decode error, got: {:?}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_proxy_repeats_last_reply_and_counts_hits() {
        let proxy = FakeProxy::start().await;
        proxy
            .respond("GET", "/api/s3/buckets", Reply::ok(serde_json::json!({"buckets": []})))
            .respond("GET", "/api/s3/buckets", Reply::error(500, "boom"));

        let url = format!("{}/api/s3/buckets", proxy.base_url());
        assert_eq!(get_status(&url).await, 200);
        assert_eq!(get_status(&url).await, 500);
        assert_eq!(get_status(&url).await, 500);
        assert_eq!(proxy.hits("GET", "/api/s3/buckets"), 3);
    }

    #[test]
    fn test_query_pairs_are_decoded() {
        let req = RecordedRequest {
            method: "GET".to_string(),
            path: "/api/cloudwatch/log-groups".to_string(),
            query: Some("prefix=%2Faws&limit=5".to_string()),
            body: None,
        };
        assert_eq!(
            req.query_pairs(),
            vec![
                ("prefix".to_string(), "/aws".to_string()),
                ("limit".to_string(), "5".to_string()),
            ]
        );
    }

    async fn get_status(url: &str) -> u16 {
        reqwest::get(url).await.unwrap().status().as_u16()
    }
}

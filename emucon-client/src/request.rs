//! Request building and response decoding shared by every endpoint.

use emucon_core::{ClientError, ClientResult, Service};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// Marks `encodeURIComponent` leaves as-is but `urlencoding` escapes.
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode one path segment the way `encodeURIComponent` does, so
/// log group names with slashes and ARNs survive as a single segment.
pub fn encode_segment(value: &str) -> String {
    let mut encoded = urlencoding::encode(value).into_owned();
    // Every '%' in the output opens an escape triple, so these matches
    // never straddle two escapes.
    for (escaped, mark) in UNRESERVED_MARKS {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, mark);
        }
    }
    encoded
}

/// A proxy path under `/api/{service}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiPath(String);

impl ApiPath {
    pub fn new(service: Service) -> Self {
        Self(format!("/api/{}", service.route()))
    }

    /// Append a fixed route segment.
    pub fn lit(mut self, segment: &str) -> Self {
        self.0.push('/');
        self.0.push_str(segment);
        self
    }

    /// Append an encoded identifier. Empty identifiers are rejected so no
    /// request ever targets a collection route by accident.
    pub fn id(mut self, field: &'static str, value: &str) -> ClientResult<Self> {
        if value.trim().is_empty() {
            return Err(ClientError::InvalidInput(format!(
                "{} must not be empty",
                field
            )));
        }
        self.0.push('/');
        self.0.push_str(&encode_segment(value));
        Ok(self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Query parameters derived from an options struct. Unset and empty values
/// are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn from_options<T: Serialize + ?Sized>(options: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(options)
            .map_err(|e| ClientError::InvalidInput(format!("unencodable options: {}", e)))?;
        let mut pairs = Vec::new();
        if let Value::Object(map) = value {
            for (key, value) in map {
                let rendered = match value {
                    Value::Null => continue,
                    Value::String(s) if s.is_empty() => continue,
                    Value::String(s) => s,
                    Value::Bool(b) => b.to_string(),
                    Value::Number(n) => n.to_string(),
                    other => other.to_string(),
                };
                pairs.push((key, rendered));
            }
        }
        Ok(Self(pairs))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Where a list endpoint keeps its array. Conventions differ per endpoint
/// and are recorded next to each call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Envelope {
    Bare,
    Field(&'static str),
}

/// One proxy call: method, path, optional query/body and the message used
/// when the proxy gives no better one.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: Method,
    pub path: ApiPath,
    pub query: QueryParams,
    pub body: Option<Value>,
    pub fallback: &'static str,
}

impl Call {
    pub fn new(method: Method, path: ApiPath, fallback: &'static str) -> Self {
        Self {
            method,
            path,
            query: QueryParams::default(),
            body: None,
            fallback,
        }
    }

    pub fn get(path: ApiPath, fallback: &'static str) -> Self {
        Self::new(Method::GET, path, fallback)
    }

    pub fn post(path: ApiPath, fallback: &'static str) -> Self {
        Self::new(Method::POST, path, fallback)
    }

    pub fn put(path: ApiPath, fallback: &'static str) -> Self {
        Self::new(Method::PUT, path, fallback)
    }

    pub fn delete(path: ApiPath, fallback: &'static str) -> Self {
        Self::new(Method::DELETE, path, fallback)
    }

    pub fn query<T: Serialize + ?Sized>(mut self, options: &T) -> ClientResult<Self> {
        self.query = QueryParams::from_options(options)?;
        Ok(self)
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::InvalidInput(format!("unencodable body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Build the error for a non-2xx response: the body's `error` string when
/// present, the per-call fallback otherwise.
pub fn error_from_response(status: u16, body: &str, fallback: &str) -> ClientError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_owned))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    ClientError::Api { status, message }
}

pub fn decode_error(fallback: &str, cause: impl std::fmt::Display) -> ClientError {
    ClientError::Decode {
        message: fallback.to_string(),
        cause: cause.to_string(),
    }
}

/// Parse a success body. An empty body decodes as JSON `null`.
pub fn parse_body(body: &str, fallback: &str) -> ClientResult<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(body).map_err(|e| decode_error(fallback, e))
}

pub fn decode<T: DeserializeOwned>(value: Value, fallback: &str) -> ClientResult<T> {
    serde_json::from_value(value).map_err(|e| decode_error(fallback, e))
}

/// Pull a list out of its envelope. A missing or `null` field is an empty
/// list.
pub fn unwrap_list<T: DeserializeOwned>(
    value: Value,
    envelope: Envelope,
    fallback: &str,
) -> ClientResult<Vec<T>> {
    let list = match (envelope, value) {
        (_, Value::Null) => return Ok(Vec::new()),
        (Envelope::Bare, list) => list,
        (Envelope::Field(field), Value::Object(mut map)) => {
            map.remove(field).unwrap_or(Value::Null)
        }
        (Envelope::Field(field), other) => {
            return Err(decode_error(
                fallback,
                format!("expected object with `{}`, got {}", field, type_name(&other)),
            ))
        }
    };
    if list.is_null() {
        return Ok(Vec::new());
    }
    decode(list, fallback)
}

/// Read an optional string field of an envelope (continuation tokens).
pub fn string_field(value: &Value, field: &str) -> Option<String> {
    value
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use emucon_core::cloudwatch::{LogEventsOptions, LogGroup};
    use serde_json::json;

    #[test]
    fn test_path_encodes_slashes_in_identifiers() {
        let path = ApiPath::new(Service::CloudWatch)
            .lit("log-groups")
            .id("logGroupName", "/aws/lambda/f")
            .unwrap();
        assert_eq!(path.as_str(), "/api/cloudwatch/log-groups/%2Faws%2Flambda%2Ff");
    }

    #[test]
    fn test_segment_keeps_unreserved_marks() {
        assert_eq!(encode_segment("a!b'(c)*~d_e.f-g"), "a!b'(c)*~d_e.f-g");
        assert_eq!(encode_segment("(x)/y z"), "(x)%2Fy%20z");
        assert_eq!(encode_segment("100%21"), "100%2521");
    }

    #[test]
    fn test_path_encodes_arn() {
        let path = ApiPath::new(Service::Iam)
            .lit("policies")
            .id("policyArn", "arn:aws:iam::000000000000:policy/ReadOnly")
            .unwrap();
        assert_eq!(
            path.as_str(),
            "/api/iam/policies/arn%3Aaws%3Aiam%3A%3A000000000000%3Apolicy%2FReadOnly"
        );
    }

    #[test]
    fn test_path_rejects_empty_identifier() {
        let err = ApiPath::new(Service::DynamoDb)
            .lit("tables")
            .id("tableName", "  ")
            .unwrap_err();
        assert!(matches!(err, ClientError::InvalidInput(_)));
    }

    #[test]
    fn test_query_params_skip_unset_and_empty() {
        let opts = LogEventsOptions {
            log_stream_name: Some(String::new()),
            limit: Some(50),
            start_from_head: Some(false),
            ..Default::default()
        };
        let params = QueryParams::from_options(&opts).unwrap();
        assert_eq!(
            params.pairs(),
            &[
                ("limit".to_string(), "50".to_string()),
                ("startFromHead".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn test_error_prefers_body_message() {
        let err = error_from_response(404, r#"{"error":"X not found"}"#, "Failed to fetch X");
        assert_eq!(err, ClientError::api(404, "X not found"));
    }

    #[test]
    fn test_error_falls_back_on_non_json_or_missing_field() {
        let err = error_from_response(500, "<html>oops</html>", "Failed to fetch REST API");
        assert_eq!(err.message(), "Failed to fetch REST API");

        let err = error_from_response(400, r#"{"message":"nope"}"#, "Failed to create queue");
        assert_eq!(err.message(), "Failed to create queue");
    }

    #[test]
    fn test_unwrap_list_named_field_and_bare() {
        let groups: Vec<LogGroup> = unwrap_list(
            json!({"logGroups": [{"logGroupName": "a"}]}),
            Envelope::Field("logGroups"),
            "f",
        )
        .unwrap();
        assert_eq!(groups.len(), 1);

        let names: Vec<String> = unwrap_list(json!(["a", "b"]), Envelope::Bare, "f").unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_unwrap_list_missing_field_is_empty() {
        let groups: Vec<LogGroup> =
            unwrap_list(json!({"nextToken": null}), Envelope::Field("logGroups"), "f").unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_unwrap_list_rejects_wrong_shape() {
        let result: ClientResult<Vec<LogGroup>> =
            unwrap_list(json!([1, 2]), Envelope::Field("logGroups"), "Failed to fetch log groups");
        assert_eq!(result.unwrap_err().message(), "Failed to fetch log groups");
    }
}

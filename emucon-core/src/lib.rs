//! EMUCON Core - Resource Shapes
//!
//! Serde shapes of everything the backend proxy returns or accepts, the
//! `Service` catalogue and the error types shared by every other crate.
//! No I/O lives here.
//!
//! Response types follow the casing the proxy passes through from the AWS
//! SDK (camelCase for CloudWatch Logs and API Gateway, PascalCase for the
//! rest). Request inputs always use the proxy's own camelCase.

pub mod apigateway;
pub mod cloudformation;
pub mod cloudwatch;
pub mod dynamodb;
pub mod error;
pub mod eventbridge;
pub mod iam;
pub mod lambda;
pub mod s3;
pub mod scheduler;
pub mod secrets;
pub mod service;
pub mod sqs;

pub use error::{ClientError, ClientResult, ValidationError};
pub use service::Service;

use serde::{Deserialize, Serialize};

/// A list result that carries a continuation token next to its items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self { items, next_token }
    }

    pub fn has_more(&self) -> bool {
        self.next_token.as_deref().is_some_and(|t| !t.is_empty())
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudwatch::LogGroup;

    #[test]
    fn test_page_has_more_ignores_empty_token() {
        let page: Page<LogGroup> = Page::new(Vec::new(), Some(String::new()));
        assert!(!page.has_more());
        let page: Page<LogGroup> = Page::new(Vec::new(), Some("abc".to_string()));
        assert!(page.has_more());
    }

    #[test]
    fn test_log_group_deserializes_camel_case() {
        let group: LogGroup = serde_json::from_str(
            r#"{"logGroupName":"/aws/lambda/f","retentionInDays":7,"unknownField":1}"#,
        )
        .unwrap();
        assert_eq!(group.log_group_name, "/aws/lambda/f");
        assert_eq!(group.retention_in_days, Some(7));
    }

    #[test]
    fn test_secret_entry_reads_upper_case_arn() {
        let entry: secrets::SecretListEntry =
            serde_json::from_str(r#"{"Name":"db","ARN":"arn:aws:secretsmanager:us-east-1:0:secret:db"}"#)
                .unwrap();
        assert_eq!(entry.name, "db");
        assert!(entry.arn.unwrap().ends_with(":db"));
    }

    #[test]
    fn test_options_skip_unset_fields() {
        let opts = cloudwatch::AlarmsOptions {
            state_value: Some("ALARM".to_string()),
            alarm_name_prefix: None,
        };
        let json = serde_json::to_value(&opts).unwrap();
        assert_eq!(json, serde_json::json!({"stateValue": "ALARM"}));
    }
}

//! Table and detail rendering of the resource shapes.
//!
//! [`Resource`] turns one item into table cells and detail fields;
//! [`Collection`] extracts the items out of whatever a query returns (a
//! bare list, a page, a scan result or a single object).

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use emucon_core::apigateway::{ApiResource, RestApi};
use emucon_core::cloudformation::{Stack, StackEvent};
use emucon_core::cloudwatch::{LogEvent, LogEventsPage, LogGroup};
use emucon_core::dynamodb::{Item, ScanPage};
use emucon_core::eventbridge::{EventBus, Rule};
use emucon_core::iam::{AccessKeyMetadata, User};
use emucon_core::lambda::FunctionConfiguration;
use emucon_core::s3::{Bucket, ObjectListing, S3Object};
use emucon_core::scheduler::ScheduleSummary;
use emucon_core::secrets::{SecretListEntry, SecretValue};
use emucon_core::sqs::{queue_name_from_url, QueueAttributes};
use emucon_core::Page;

pub trait Resource: Clone + Send + Sync + 'static {
    const HEADERS: &'static [&'static str];

    /// One cell per entry of [`Resource::HEADERS`].
    fn cells(&self) -> Vec<String>;

    /// Identifier used by delete and drill-down actions.
    fn id(&self) -> String;

    fn detail(&self) -> Vec<(&'static str, String)>;

    /// Lifecycle state reported by AWS, used to colour the row.
    fn status(&self) -> Option<&str> {
        None
    }
}

pub trait Collection: Send + Sync + 'static {
    type Item: Resource;

    fn items(&self) -> Cow<'_, [Self::Item]>;
}

impl<T: Resource> Collection for Vec<T> {
    type Item = T;

    fn items(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl<T: Resource> Collection for Page<T> {
    type Item = T;

    fn items(&self) -> Cow<'_, [T]> {
        Cow::Borrowed(self.items.as_slice())
    }
}

impl Collection for LogEventsPage {
    type Item = LogEvent;

    fn items(&self) -> Cow<'_, [LogEvent]> {
        Cow::Borrowed(self.events.as_slice())
    }
}

impl Collection for ScanPage {
    type Item = Item;

    fn items(&self) -> Cow<'_, [Item]> {
        Cow::Borrowed(self.items.as_slice())
    }
}

impl Collection for ObjectListing {
    type Item = S3Object;

    fn items(&self) -> Cow<'_, [S3Object]> {
        Cow::Borrowed(self.contents.as_slice())
    }
}

impl Collection for QueueAttributes {
    type Item = (String, String);

    fn items(&self) -> Cow<'_, [(String, String)]> {
        Cow::Owned(
            self.iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        )
    }
}

impl Collection for SecretValue {
    type Item = SecretValue;

    fn items(&self) -> Cow<'_, [SecretValue]> {
        Cow::Borrowed(std::slice::from_ref(self))
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "-".to_string())
}

fn number<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Epoch milliseconds as RFC 3339.
pub fn format_millis(value: Option<i64>) -> String {
    value
        .and_then(DateTime::<Utc>::from_timestamp_millis)
        .map(|t| t.to_rfc3339())
        .unwrap_or_else(|| "-".to_string())
}

// ============================================================================
// API GATEWAY
// ============================================================================

impl Resource for RestApi {
    const HEADERS: &'static [&'static str] = &["ID", "Name", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), text(&self.created_date)]
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let endpoint = self
            .endpoint_configuration
            .as_ref()
            .map(|e| e.types.join(", "))
            .unwrap_or_else(|| "-".to_string());
        vec![
            ("ID", self.id.clone()),
            ("Name", self.name.clone()),
            ("Description", text(&self.description)),
            ("Created", text(&self.created_date)),
            ("Endpoint", endpoint),
        ]
    }
}

impl Resource for ApiResource {
    const HEADERS: &'static [&'static str] = &["Path", "ID", "Methods"];

    fn cells(&self) -> Vec<String> {
        let methods = self
            .resource_methods
            .as_ref()
            .map(|m| m.keys().cloned().collect::<Vec<_>>().join(","))
            .unwrap_or_default();
        vec![self.path.clone(), self.id.clone(), methods]
    }

    fn id(&self) -> String {
        self.id.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Path", self.path.clone()),
            ("ID", self.id.clone()),
            ("Parent", text(&self.parent_id)),
            ("Path part", text(&self.path_part)),
        ]
    }
}

// ============================================================================
// CLOUDFORMATION
// ============================================================================

impl Resource for Stack {
    const HEADERS: &'static [&'static str] = &["Name", "Status", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.stack_name.clone(),
            self.stack_status.clone(),
            text(&self.creation_time),
        ]
    }

    fn id(&self) -> String {
        self.stack_name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let outputs = self
            .outputs
            .iter()
            .map(|o| format!("{}={}", o.output_key, o.output_value))
            .collect::<Vec<_>>()
            .join(", ");
        vec![
            ("Name", self.stack_name.clone()),
            ("Stack ID", text(&self.stack_id)),
            ("Status", self.stack_status.clone()),
            ("Reason", text(&self.stack_status_reason)),
            ("Description", text(&self.description)),
            ("Created", text(&self.creation_time)),
            ("Updated", text(&self.last_updated_time)),
            ("Parameters", self.parameters.len().to_string()),
            ("Outputs", outputs),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(&self.stack_status)
    }
}

impl Resource for StackEvent {
    const HEADERS: &'static [&'static str] = &["Time", "Resource", "Status"];

    fn cells(&self) -> Vec<String> {
        vec![
            text(&self.timestamp),
            self.logical_resource_id.clone(),
            self.resource_status.clone(),
        ]
    }

    fn id(&self) -> String {
        self.event_id.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Resource", self.logical_resource_id.clone()),
            ("Type", self.resource_type.clone()),
            ("Status", self.resource_status.clone()),
            ("Reason", text(&self.resource_status_reason)),
        ]
    }

    fn status(&self) -> Option<&str> {
        Some(&self.resource_status)
    }
}

// ============================================================================
// CLOUDWATCH
// ============================================================================

impl Resource for LogGroup {
    const HEADERS: &'static [&'static str] = &["Name", "Retention", "Created"];

    fn cells(&self) -> Vec<String> {
        let retention = self
            .retention_in_days
            .map(|d| format!("{d} days"))
            .unwrap_or_else(|| "Never expire".to_string());
        vec![
            self.log_group_name.clone(),
            retention,
            format_millis(self.creation_time),
        ]
    }

    fn id(&self) -> String {
        self.log_group_name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.log_group_name.clone()),
            ("ARN", text(&self.arn)),
            ("Retention (days)", number(self.retention_in_days)),
            ("Stored bytes", number(self.stored_bytes)),
            ("Created", format_millis(self.creation_time)),
        ]
    }
}

impl Resource for LogEvent {
    const HEADERS: &'static [&'static str] = &["Time", "Stream", "Message"];

    fn cells(&self) -> Vec<String> {
        vec![
            format_millis(self.timestamp),
            text(&self.log_stream_name),
            self.message.trim_end().to_string(),
        ]
    }

    fn id(&self) -> String {
        self.event_id.clone().unwrap_or_default()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Time", format_millis(self.timestamp)),
            ("Ingested", format_millis(self.ingestion_time)),
            ("Stream", text(&self.log_stream_name)),
            ("Message", self.message.clone()),
        ]
    }
}

// ============================================================================
// DYNAMODB
// ============================================================================

/// Table names and queue URLs are listed as bare strings.
impl Resource for String {
    const HEADERS: &'static [&'static str] = &["Name"];

    fn cells(&self) -> Vec<String> {
        vec![self.clone()]
    }

    fn id(&self) -> String {
        self.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![("Name", queue_name_from_url(self).to_string()), ("Value", self.clone())]
    }
}

impl Resource for Item {
    const HEADERS: &'static [&'static str] = &["Item"];

    fn cells(&self) -> Vec<String> {
        vec![serde_json::Value::Object(self.clone()).to_string()]
    }

    /// The whole item as compact JSON; its key attributes are picked out
    /// once the table's key schema is known.
    fn id(&self) -> String {
        serde_json::Value::Object(self.clone()).to_string()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let pretty = serde_json::to_string_pretty(self).unwrap_or_default();
        vec![("Attributes", self.len().to_string()), ("JSON", pretty)]
    }
}

// ============================================================================
// EVENTBRIDGE
// ============================================================================

impl Resource for EventBus {
    const HEADERS: &'static [&'static str] = &["Name", "ARN"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), text(&self.arn)]
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("ARN", text(&self.arn)),
            ("Policy", text(&self.policy)),
        ]
    }
}

impl Resource for Rule {
    const HEADERS: &'static [&'static str] = &["Name", "State", "Schedule"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            text(&self.state),
            text(&self.schedule_expression),
        ]
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Bus", text(&self.event_bus_name)),
            ("State", text(&self.state)),
            ("Pattern", text(&self.event_pattern)),
            ("Description", text(&self.description)),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

// ============================================================================
// IAM
// ============================================================================

impl Resource for User {
    const HEADERS: &'static [&'static str] = &["Name", "Path", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.user_name.clone(),
            text(&self.path),
            text(&self.create_date),
        ]
    }

    fn id(&self) -> String {
        self.user_name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.user_name.clone()),
            ("User ID", text(&self.user_id)),
            ("ARN", text(&self.arn)),
            ("Path", text(&self.path)),
            ("Created", text(&self.create_date)),
        ]
    }
}

impl Resource for AccessKeyMetadata {
    const HEADERS: &'static [&'static str] = &["Access key", "Status", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.access_key_id.clone(),
            text(&self.status),
            text(&self.create_date),
        ]
    }

    fn id(&self) -> String {
        self.access_key_id.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Access key", self.access_key_id.clone()),
            ("User", text(&self.user_name)),
            ("Status", text(&self.status)),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }
}

// ============================================================================
// LAMBDA
// ============================================================================

impl Resource for FunctionConfiguration {
    const HEADERS: &'static [&'static str] = &["Name", "Runtime", "Memory"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.function_name.clone(),
            text(&self.runtime),
            number(self.memory_size),
        ]
    }

    fn id(&self) -> String {
        self.function_name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let env = self
            .environment
            .as_ref()
            .map(|e| e.variables.keys().cloned().collect::<Vec<_>>().join(", "))
            .unwrap_or_else(|| "-".to_string());
        vec![
            ("Name", self.function_name.clone()),
            ("ARN", text(&self.function_arn)),
            ("Runtime", text(&self.runtime)),
            ("Handler", text(&self.handler)),
            ("Role", text(&self.role)),
            ("Timeout (s)", number(self.timeout)),
            ("Memory (MB)", number(self.memory_size)),
            ("Code size", number(self.code_size)),
            ("State", text(&self.state)),
            ("Modified", text(&self.last_modified)),
            ("Environment", env),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

// ============================================================================
// S3
// ============================================================================

impl Resource for Bucket {
    const HEADERS: &'static [&'static str] = &["Name", "Created"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), text(&self.creation_date)]
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Created", text(&self.creation_date)),
        ]
    }
}

impl Resource for S3Object {
    const HEADERS: &'static [&'static str] = &["Key", "Size", "Modified"];

    fn cells(&self) -> Vec<String> {
        vec![
            self.key.clone(),
            number(self.size),
            text(&self.last_modified),
        ]
    }

    fn id(&self) -> String {
        self.key.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Key", self.key.clone()),
            ("Size", number(self.size)),
            ("ETag", text(&self.e_tag)),
            ("Storage class", text(&self.storage_class)),
            ("Modified", text(&self.last_modified)),
        ]
    }
}

// ============================================================================
// SCHEDULER
// ============================================================================

impl Resource for ScheduleSummary {
    const HEADERS: &'static [&'static str] = &["Name", "Group", "State"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), text(&self.group_name), text(&self.state)]
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        let target = self
            .target
            .as_ref()
            .map(|t| t.arn.clone())
            .unwrap_or_else(|| "-".to_string());
        vec![
            ("Name", self.name.clone()),
            ("Group", text(&self.group_name)),
            ("ARN", text(&self.arn)),
            ("State", text(&self.state)),
            ("Target", target),
            ("Created", text(&self.creation_date)),
            ("Modified", text(&self.last_modification_date)),
        ]
    }

    fn status(&self) -> Option<&str> {
        self.state.as_deref()
    }
}

// ============================================================================
// SQS
// ============================================================================

impl Resource for (String, String) {
    const HEADERS: &'static [&'static str] = &["Attribute", "Value"];

    fn cells(&self) -> Vec<String> {
        vec![self.0.clone(), self.1.clone()]
    }

    fn id(&self) -> String {
        self.0.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![("Attribute", self.0.clone()), ("Value", self.1.clone())]
    }
}

// ============================================================================
// SECRETS MANAGER
// ============================================================================

impl Resource for SecretListEntry {
    const HEADERS: &'static [&'static str] = &["Name", "Last changed", "Status"];

    fn cells(&self) -> Vec<String> {
        let status = if self.is_scheduled_for_deletion() {
            "Pending deletion"
        } else {
            "Active"
        };
        vec![
            self.name.clone(),
            text(&self.last_changed_date),
            status.to_string(),
        ]
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("ARN", text(&self.arn)),
            ("Description", text(&self.description)),
            ("Created", text(&self.created_date)),
            ("Last accessed", text(&self.last_accessed_date)),
            ("Deleted", text(&self.deleted_date)),
        ]
    }
}

impl Resource for SecretValue {
    const HEADERS: &'static [&'static str] = &["Name", "Version"];

    fn cells(&self) -> Vec<String> {
        vec![self.name.clone(), text(&self.version_id)]
    }

    fn id(&self) -> String {
        self.name.clone()
    }

    fn detail(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Version", text(&self.version_id)),
            ("Created", text(&self.created_date)),
            ("Value", text(&self.secret_string)),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_match<T: Resource>(item: &T) {
        assert_eq!(item.cells().len(), T::HEADERS.len());
    }

    #[test]
    fn test_cells_line_up_with_headers() {
        headers_match(&RestApi {
            id: "a1".to_string(),
            name: "orders".to_string(),
            description: None,
            created_date: None,
            endpoint_configuration: None,
        });
        headers_match(&LogGroup {
            log_group_name: "/aws/lambda/f".to_string(),
            arn: None,
            creation_time: Some(0),
            retention_in_days: None,
            stored_bytes: None,
        });
        headers_match(&"https://sqs/000000000000/jobs".to_string());
        headers_match(&("VisibilityTimeout".to_string(), "30".to_string()));
    }

    #[test]
    fn test_log_group_without_retention_never_expires() {
        let group = LogGroup {
            log_group_name: "app".to_string(),
            arn: None,
            creation_time: None,
            retention_in_days: None,
            stored_bytes: None,
        };
        assert_eq!(group.cells()[1], "Never expire");
        assert_eq!(group.cells()[2], "-");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(Some(0)), "1970-01-01T00:00:00+00:00");
        assert_eq!(format_millis(None), "-");
    }

    #[test]
    fn test_queue_attributes_are_listed_sorted() {
        let mut attributes = QueueAttributes::new();
        attributes.insert("VisibilityTimeout".to_string(), "30".to_string());
        attributes.insert("DelaySeconds".to_string(), "0".to_string());
        let items = attributes.items();
        assert_eq!(items[0].0, "DelaySeconds");
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_secret_value_is_a_single_row() {
        let value = SecretValue {
            name: "db".to_string(),
            arn: None,
            secret_string: Some("hunter2".to_string()),
            version_id: Some("v1".to_string()),
            created_date: None,
        };
        assert_eq!(value.items().len(), 1);
    }
}

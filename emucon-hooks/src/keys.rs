//! Query key families, one constructor per read endpoint.
//!
//! Each function with only identifier arguments returns a *family*: the
//! prefix every key of that read shares, so it doubles as an invalidation
//! target. The `*_key` variants append the options segment.

use emucon_core::cloudwatch::{
    AlarmsOptions, LogEventsOptions, LogGroupsOptions, LogStreamsOptions, MetricsOptions,
};
use emucon_core::dynamodb::ScanOptions;
use emucon_core::eventbridge::RulesOptions;
use emucon_core::iam::PoliciesOptions;
use emucon_core::s3::ObjectsOptions;
use emucon_core::scheduler::{ScheduleGroupQuery, SchedulesOptions};
use emucon_core::sqs::QueuesOptions;
use emucon_query::QueryKey;

// ============================================================================
// API GATEWAY
// ============================================================================

pub fn rest_apis() -> QueryKey {
    QueryKey::new("rest-apis")
}

pub fn rest_api(api_id: &str) -> QueryKey {
    QueryKey::new("rest-api").segment(api_id)
}

pub fn api_resources(api_id: &str) -> QueryKey {
    QueryKey::new("api-resources").segment(api_id)
}

pub fn api_stages(api_id: &str) -> QueryKey {
    QueryKey::new("api-stages").segment(api_id)
}

// ============================================================================
// CLOUDFORMATION
// ============================================================================

pub fn stacks() -> QueryKey {
    QueryKey::new("stacks")
}

pub fn stack(stack_name: &str) -> QueryKey {
    QueryKey::new("stack").segment(stack_name)
}

pub fn stack_events(stack_name: &str) -> QueryKey {
    QueryKey::new("stack-events").segment(stack_name)
}

pub fn stack_resources(stack_name: &str) -> QueryKey {
    QueryKey::new("stack-resources").segment(stack_name)
}

pub fn stack_template(stack_name: &str) -> QueryKey {
    QueryKey::new("stack-template").segment(stack_name)
}

// ============================================================================
// CLOUDWATCH
// ============================================================================

pub fn log_groups() -> QueryKey {
    QueryKey::new("log-groups")
}

pub fn log_groups_key(options: &LogGroupsOptions) -> QueryKey {
    log_groups().options(options)
}

pub fn log_streams(log_group_name: &str) -> QueryKey {
    QueryKey::new("log-streams").segment(log_group_name)
}

pub fn log_streams_key(log_group_name: &str, options: &LogStreamsOptions) -> QueryKey {
    log_streams(log_group_name).options(options)
}

pub fn log_events(log_group_name: &str) -> QueryKey {
    QueryKey::new("log-events").segment(log_group_name)
}

pub fn log_events_key(log_group_name: &str, options: &LogEventsOptions) -> QueryKey {
    log_events(log_group_name).options(options)
}

pub fn alarms() -> QueryKey {
    QueryKey::new("alarms")
}

pub fn alarms_key(options: &AlarmsOptions) -> QueryKey {
    alarms().options(options)
}

pub fn metrics() -> QueryKey {
    QueryKey::new("metrics")
}

pub fn metrics_key(options: &MetricsOptions) -> QueryKey {
    metrics().options(options)
}

// ============================================================================
// DYNAMODB
// ============================================================================

pub fn tables() -> QueryKey {
    QueryKey::new("tables")
}

pub fn table(table_name: &str) -> QueryKey {
    QueryKey::new("table").segment(table_name)
}

pub fn table_items(table_name: &str) -> QueryKey {
    QueryKey::new("table-items").segment(table_name)
}

pub fn table_items_key(table_name: &str, options: &ScanOptions) -> QueryKey {
    table_items(table_name).options(options)
}

// ============================================================================
// EVENTBRIDGE
// ============================================================================

pub fn event_buses() -> QueryKey {
    QueryKey::new("event-buses")
}

pub fn rules() -> QueryKey {
    QueryKey::new("rules")
}

pub fn rules_key(options: &RulesOptions) -> QueryKey {
    rules().options(options)
}

/// Targets of every rule. The bus name sits in the options, after the
/// rule segment, so a bus delete cannot narrow this further.
pub fn all_targets() -> QueryKey {
    QueryKey::new("targets")
}

pub fn targets(rule_name: &str) -> QueryKey {
    all_targets().segment(rule_name)
}

pub fn targets_key(rule_name: &str, options: &RulesOptions) -> QueryKey {
    targets(rule_name).options(options)
}

// ============================================================================
// IAM
// ============================================================================

pub fn users() -> QueryKey {
    QueryKey::new("users")
}

pub fn access_keys(user_name: &str) -> QueryKey {
    QueryKey::new("access-keys").segment(user_name)
}

pub fn roles() -> QueryKey {
    QueryKey::new("roles")
}

pub fn role_policies(role_name: &str) -> QueryKey {
    QueryKey::new("role-policies").segment(role_name)
}

pub fn policies() -> QueryKey {
    QueryKey::new("policies")
}

pub fn policies_key(options: &PoliciesOptions) -> QueryKey {
    policies().options(options)
}

pub fn policy(policy_arn: &str) -> QueryKey {
    QueryKey::new("policy").segment(policy_arn)
}

// ============================================================================
// LAMBDA
// ============================================================================

pub fn functions() -> QueryKey {
    QueryKey::new("functions")
}

pub fn function(function_name: &str) -> QueryKey {
    QueryKey::new("function").segment(function_name)
}

// ============================================================================
// S3
// ============================================================================

pub fn buckets() -> QueryKey {
    QueryKey::new("buckets")
}

pub fn objects(bucket_name: &str) -> QueryKey {
    QueryKey::new("objects").segment(bucket_name)
}

pub fn objects_key(bucket_name: &str, options: &ObjectsOptions) -> QueryKey {
    objects(bucket_name).options(options)
}

// ============================================================================
// SCHEDULER
// ============================================================================

pub fn schedules() -> QueryKey {
    QueryKey::new("schedules")
}

pub fn schedules_key(options: &SchedulesOptions) -> QueryKey {
    schedules().options(options)
}

pub fn schedule(name: &str) -> QueryKey {
    QueryKey::new("schedule").segment(name)
}

pub fn schedule_key(name: &str, group: &ScheduleGroupQuery) -> QueryKey {
    schedule(name).options(group)
}

pub fn schedule_groups() -> QueryKey {
    QueryKey::new("schedule-groups")
}

// ============================================================================
// SQS
// ============================================================================

pub fn queues() -> QueryKey {
    QueryKey::new("queues")
}

pub fn queues_key(options: &QueuesOptions) -> QueryKey {
    queues().options(options)
}

pub fn queue_attributes(queue_name: &str) -> QueryKey {
    QueryKey::new("queue-attributes").segment(queue_name)
}

// ============================================================================
// SECRETS MANAGER
// ============================================================================

pub fn secrets() -> QueryKey {
    QueryKey::new("secrets")
}

pub fn secret(secret_id: &str) -> QueryKey {
    QueryKey::new("secret").segment(secret_id)
}

pub fn secret_value(secret_id: &str) -> QueryKey {
    QueryKey::new("secret-value").segment(secret_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_keys_extend_their_family() {
        let options = LogEventsOptions {
            start_from_head: Some(false),
            ..Default::default()
        };
        let key = log_events_key("/aws/lambda/f", &options);
        assert!(key.starts_with(&log_events("/aws/lambda/f")));
        assert!(!key.starts_with(&log_events("/aws/lambda/g")));
        assert_eq!(key.segments().len(), 3);
    }

    #[test]
    fn test_detail_and_list_kinds_are_distinct() {
        assert!(!rest_api("abc").starts_with(&rest_apis()));
        assert!(!secret_value("s").starts_with(&secret("s")));
        assert_eq!(log_groups_key(&LogGroupsOptions::default()), log_groups());
    }
}

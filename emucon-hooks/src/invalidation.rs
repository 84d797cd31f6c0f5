//! Write → invalidation table.
//!
//! Every mutation hook names its [`Write`] variant; [`Write::invalidation`]
//! is the single place that decides which key families a successful write
//! makes stale.

use emucon_query::InvalidationSet;

use crate::keys;

/// One variant per mutation endpoint, carrying the identifiers its
/// invalidation depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Write {
    // API Gateway
    CreateRestApi,
    DeleteRestApi { api_id: String },
    CreateDeployment { api_id: String },

    // CloudFormation
    CreateStack,
    UpdateStack { stack_name: String },
    DeleteStack { stack_name: String },

    // CloudWatch
    CreateLogGroup,
    DeleteLogGroup { log_group_name: String },
    PutRetentionPolicy,
    PutMetricAlarm,
    DeleteAlarm,
    SetAlarmState,

    // DynamoDB
    CreateTable,
    DeleteTable { table_name: String },
    PutItem { table_name: String },
    DeleteItem { table_name: String },

    // EventBridge
    CreateEventBus,
    DeleteEventBus,
    PutRule,
    DeleteRule { rule_name: String },
    PutTargets { rule_name: String },
    PutEvents,

    // IAM
    CreateUser,
    DeleteUser { user_name: String },
    CreateAccessKey { user_name: String },
    DeleteAccessKey { user_name: String },
    CreateRole,
    DeleteRole { role_name: String },
    AttachRolePolicy { role_name: String },
    DetachRolePolicy { role_name: String },
    CreatePolicy,
    DeletePolicy { policy_arn: String },

    // Lambda
    CreateFunction,
    UpdateFunctionConfiguration { function_name: String },
    DeleteFunction { function_name: String },
    InvokeFunction,

    // S3
    CreateBucket,
    DeleteBucket { bucket_name: String },
    PutObject { bucket_name: String },
    DeleteObject { bucket_name: String },

    // Scheduler
    CreateSchedule,
    UpdateSchedule { name: String },
    DeleteSchedule { name: String },

    // SQS
    CreateQueue,
    DeleteQueue { queue_name: String },
    PurgeQueue { queue_name: String },
    SendMessage { queue_name: String },
    ReceiveMessages { queue_name: String },
    DeleteMessage { queue_name: String },

    // Secrets Manager
    CreateSecret,
    PutSecretValue { secret_id: String },
    DeleteSecret { secret_id: String },
}

impl Write {
    /// Key families a successful write makes stale.
    pub fn invalidation(&self) -> InvalidationSet {
        let set = InvalidationSet::new();
        match self {
            Write::CreateRestApi => set.with(keys::rest_apis()),
            Write::DeleteRestApi { api_id } => set
                .with(keys::rest_apis())
                .with(keys::rest_api(api_id))
                .with(keys::api_resources(api_id))
                .with(keys::api_stages(api_id)),
            Write::CreateDeployment { api_id } => set.with(keys::api_stages(api_id)),

            Write::CreateStack => set.with(keys::stacks()),
            Write::UpdateStack { stack_name } => set
                .with(keys::stacks())
                .with(keys::stack(stack_name))
                .with(keys::stack_events(stack_name))
                .with(keys::stack_resources(stack_name))
                .with(keys::stack_template(stack_name)),
            Write::DeleteStack { stack_name } => set
                .with(keys::stacks())
                .with(keys::stack(stack_name))
                .with(keys::stack_events(stack_name))
                .with(keys::stack_resources(stack_name))
                .with(keys::stack_template(stack_name)),

            Write::CreateLogGroup | Write::PutRetentionPolicy => set.with(keys::log_groups()),
            Write::DeleteLogGroup { log_group_name } => set
                .with(keys::log_groups())
                .with(keys::log_streams(log_group_name))
                .with(keys::log_events(log_group_name)),
            Write::PutMetricAlarm | Write::DeleteAlarm | Write::SetAlarmState => {
                set.with(keys::alarms())
            }

            Write::CreateTable => set.with(keys::tables()),
            Write::DeleteTable { table_name } => set
                .with(keys::tables())
                .with(keys::table(table_name))
                .with(keys::table_items(table_name)),
            Write::PutItem { table_name } | Write::DeleteItem { table_name } => set
                .with(keys::table_items(table_name))
                .with(keys::table(table_name)),

            Write::CreateEventBus => set.with(keys::event_buses()),
            Write::DeleteEventBus => set
                .with(keys::event_buses())
                .with(keys::rules())
                .with(keys::all_targets()),
            Write::PutRule => set.with(keys::rules()),
            Write::DeleteRule { rule_name } => {
                set.with(keys::rules()).with(keys::targets(rule_name))
            }
            Write::PutTargets { rule_name } => set.with(keys::targets(rule_name)),
            Write::PutEvents => set,

            Write::CreateUser => set.with(keys::users()),
            Write::DeleteUser { user_name } => {
                set.with(keys::users()).with(keys::access_keys(user_name))
            }
            Write::CreateAccessKey { user_name } | Write::DeleteAccessKey { user_name } => {
                set.with(keys::access_keys(user_name))
            }
            Write::CreateRole => set.with(keys::roles()),
            Write::DeleteRole { role_name } => {
                set.with(keys::roles()).with(keys::role_policies(role_name))
            }
            Write::AttachRolePolicy { role_name } | Write::DetachRolePolicy { role_name } => set
                .with(keys::role_policies(role_name))
                .with(keys::policies()),
            Write::CreatePolicy => set.with(keys::policies()),
            Write::DeletePolicy { policy_arn } => {
                set.with(keys::policies()).with(keys::policy(policy_arn))
            }

            Write::CreateFunction => set.with(keys::functions()),
            Write::UpdateFunctionConfiguration { function_name }
            | Write::DeleteFunction { function_name } => set
                .with(keys::functions())
                .with(keys::function(function_name)),
            Write::InvokeFunction => set,

            Write::CreateBucket => set.with(keys::buckets()),
            Write::DeleteBucket { bucket_name } => {
                set.with(keys::buckets()).with(keys::objects(bucket_name))
            }
            Write::PutObject { bucket_name } | Write::DeleteObject { bucket_name } => {
                set.with(keys::objects(bucket_name))
            }

            Write::CreateSchedule => set.with(keys::schedules()),
            Write::UpdateSchedule { name } | Write::DeleteSchedule { name } => {
                set.with(keys::schedules()).with(keys::schedule(name))
            }

            Write::CreateQueue => set.with(keys::queues()),
            Write::DeleteQueue { queue_name } => set
                .with(keys::queues())
                .with(keys::queue_attributes(queue_name)),
            Write::PurgeQueue { queue_name }
            | Write::SendMessage { queue_name }
            | Write::ReceiveMessages { queue_name }
            | Write::DeleteMessage { queue_name } => set.with(keys::queue_attributes(queue_name)),

            Write::CreateSecret => set.with(keys::secrets()),
            Write::PutSecretValue { secret_id } | Write::DeleteSecret { secret_id } => set
                .with(keys::secrets())
                .with(keys::secret(secret_id))
                .with(keys::secret_value(secret_id)),
        }
    }
}

//! The mounted body of a service view.
//!
//! A [`Screen`] is built when its view becomes active and dropped when the
//! user leaves, taking its query subscriptions with it. Enter drills into
//! the selected row where the service has something to show.

use emucon_core::cloudwatch::{LogEventsOptions, LogGroupsOptions};
use emucon_core::dynamodb::{ScanOptions, TableDescription};
use emucon_core::eventbridge::RulesOptions;
use emucon_core::s3::ObjectsOptions;
use emucon_core::scheduler::SchedulesOptions;
use emucon_core::sqs::{queue_name_from_url, QueuesOptions};
use emucon_core::Service;
use emucon_hooks::Hooks;
use emucon_query::QueryHandle;

use crate::dialog::DeleteTarget;
use crate::nav::View;
use crate::pane::{Pane, ResourcePane};

/// Drill-down lists reachable from a service's main table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubKind {
    ApiResources,
    StackEvents,
    LogTail,
    BusRules,
    AccessKeys,
    TableItems,
    Objects,
    QueueAttributes,
    SecretValue,
}

impl SubKind {
    pub fn for_service(service: Service) -> Option<Self> {
        match service {
            Service::ApiGateway => Some(SubKind::ApiResources),
            Service::CloudFormation => Some(SubKind::StackEvents),
            Service::CloudWatch => Some(SubKind::LogTail),
            Service::DynamoDb => Some(SubKind::TableItems),
            Service::EventBridge => Some(SubKind::BusRules),
            Service::Iam => Some(SubKind::AccessKeys),
            Service::S3 => Some(SubKind::Objects),
            Service::Sqs => Some(SubKind::QueueAttributes),
            Service::SecretsManager => Some(SubKind::SecretValue),
            Service::Lambda | Service::Scheduler => None,
        }
    }

    /// Access keys open as a modal over the user list; the rest replace it.
    pub fn is_modal(&self) -> bool {
        matches!(self, SubKind::AccessKeys)
    }

    fn mount(&self, hooks: &Hooks, parent: &str) -> Box<dyn Pane> {
        match self {
            SubKind::ApiResources => ResourcePane::boxed(
                format!("Resources of {parent}"),
                hooks.use_api_resources(parent, true),
            ),
            SubKind::StackEvents => ResourcePane::boxed(
                format!("Events of {parent}"),
                hooks.use_stack_events(parent, true),
            ),
            SubKind::LogTail => {
                let options = LogEventsOptions {
                    start_from_head: Some(false),
                    ..Default::default()
                };
                ResourcePane::boxed(
                    format!("Tail of {parent}"),
                    hooks.use_log_events(parent, options, true),
                )
            }
            SubKind::BusRules => {
                let options = RulesOptions {
                    event_bus_name: Some(parent.to_string()),
                };
                ResourcePane::boxed(format!("Rules on {parent}"), hooks.use_rules(options, true))
            }
            SubKind::AccessKeys => ResourcePane::boxed(
                format!("Access keys of {parent}"),
                hooks.use_access_keys(parent, true),
            ),
            SubKind::TableItems => ResourcePane::boxed(
                format!("Items in {parent}"),
                hooks.use_table_items(parent, ScanOptions::default(), true),
            ),
            SubKind::Objects => ResourcePane::boxed(
                format!("Objects in {parent}"),
                hooks.use_objects(parent, ObjectsOptions::default(), true),
            ),
            SubKind::QueueAttributes => ResourcePane::boxed(
                format!("Attributes of {parent}"),
                hooks.use_queue_attributes(parent, true),
            ),
            SubKind::SecretValue => ResourcePane::boxed(
                format!("Value of {parent}"),
                hooks.use_secret_value(parent, true),
            ),
        }
    }
}

pub struct SubView {
    pub kind: SubKind,
    pub parent: String,
    pub pane: Box<dyn Pane>,
    /// Key schema of the scanned table, needed to delete single items.
    pub schema: Option<QueryHandle<TableDescription>>,
}

pub struct Screen {
    pub view: View,
    pub list: Box<dyn Pane>,
    pub sub: Option<SubView>,
}

impl Screen {
    pub fn mount(hooks: &Hooks, view: View) -> Self {
        tracing::debug!(view = view.title(), "mounting view");
        Self {
            view,
            list: mount_list(hooks, view.service()),
            sub: None,
        }
    }

    pub fn focused(&self) -> &dyn Pane {
        match &self.sub {
            Some(sub) => sub.pane.as_ref(),
            None => self.list.as_ref(),
        }
    }

    pub fn focused_mut(&mut self) -> &mut dyn Pane {
        match &mut self.sub {
            Some(sub) => sub.pane.as_mut(),
            None => self.list.as_mut(),
        }
    }

    /// Drill into the selected row. Returns false when there is nothing to
    /// open.
    pub fn open(&mut self, hooks: &Hooks) -> bool {
        if self.sub.is_some() {
            return false;
        }
        let Some(kind) = SubKind::for_service(self.view.service()) else {
            return false;
        };
        let Some(id) = self.list.selected_id() else {
            return false;
        };
        let parent = match kind {
            SubKind::QueueAttributes => queue_name_from_url(&id).to_string(),
            _ => id,
        };
        let schema = match kind {
            SubKind::TableItems => Some(hooks.use_table(&parent, true)),
            _ => None,
        };
        self.sub = Some(SubView {
            kind,
            pane: kind.mount(hooks, &parent),
            parent,
            schema,
        });
        true
    }

    /// Close the drill-down, dropping its subscription.
    pub fn close(&mut self) -> bool {
        self.sub.take().is_some()
    }

    pub fn refetch(&self) {
        self.list.refetch();
        if let Some(sub) = &self.sub {
            sub.pane.refetch();
            if let Some(schema) = &sub.schema {
                schema.refetch();
            }
        }
    }

    /// What `d` would delete right now, if anything.
    pub fn delete_target(&self) -> Option<DeleteTarget> {
        match &self.sub {
            Some(sub) => {
                let id = sub.pane.selected_id()?;
                match sub.kind {
                    SubKind::AccessKeys => Some(DeleteTarget::AccessKey {
                        user_name: sub.parent.clone(),
                        access_key_id: id,
                    }),
                    SubKind::Objects => Some(DeleteTarget::Object {
                        bucket_name: sub.parent.clone(),
                        key: id,
                    }),
                    SubKind::BusRules => Some(DeleteTarget::Rule {
                        event_bus_name: sub.parent.clone(),
                        rule_name: id,
                    }),
                    SubKind::TableItems => {
                        let schema = sub.schema.as_ref()?.data()?;
                        DeleteTarget::item(&sub.parent, &id, &schema)
                    }
                    _ => None,
                }
            }
            None => DeleteTarget::for_service(self.view.service(), self.list.selected_id()?),
        }
    }
}

fn mount_list(hooks: &Hooks, service: Service) -> Box<dyn Pane> {
    match service {
        Service::ApiGateway => ResourcePane::boxed("REST APIs", hooks.use_rest_apis(true)),
        Service::CloudFormation => ResourcePane::boxed("Stacks", hooks.use_stacks(true)),
        Service::CloudWatch => ResourcePane::boxed(
            "Log groups",
            hooks.use_log_groups(LogGroupsOptions::default(), true),
        ),
        Service::DynamoDb => ResourcePane::boxed("Tables", hooks.use_tables(true)),
        Service::EventBridge => ResourcePane::boxed("Event buses", hooks.use_event_buses(true)),
        Service::Iam => ResourcePane::boxed("Users", hooks.use_users(true)),
        Service::Lambda => ResourcePane::boxed("Functions", hooks.use_functions(true)),
        Service::S3 => ResourcePane::boxed("Buckets", hooks.use_buckets(true)),
        Service::Scheduler => ResourcePane::boxed(
            "Schedules",
            hooks.use_schedules(SchedulesOptions::default(), true),
        ),
        Service::Sqs => {
            ResourcePane::boxed("Queues", hooks.use_queues(QueuesOptions::default(), true))
        }
        Service::SecretsManager => ResourcePane::boxed("Secrets", hooks.use_secrets(true)),
    }
}

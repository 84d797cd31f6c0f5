//! Modal dialogs layered over the active view.

use emucon_core::dynamodb::{DeleteItemInput, Item, TableDescription};
use emucon_core::eventbridge::RulesOptions;
use emucon_core::scheduler::ScheduleGroupQuery;
use emucon_core::secrets::DeleteSecretOptions;
use emucon_core::Service;
use emucon_hooks::Hooks;

use crate::forms::{Form, FormKind};

pub enum Dialog {
    Help,
    ConfirmDelete(DeleteTarget),
    /// Pick which create form to open when a view offers more than one.
    ChooseForm { kinds: &'static [FormKind], selected: usize },
    Create(Form),
}

/// A resource the user asked to delete, waiting for confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    RestApi(String),
    Stack(String),
    LogGroup(String),
    Table(String),
    /// `key` holds only the key attributes; `label` is its JSON for prompts.
    Item { table_name: String, key: Item, label: String },
    EventBus(String),
    Rule { event_bus_name: String, rule_name: String },
    User(String),
    AccessKey { user_name: String, access_key_id: String },
    Function(String),
    Bucket(String),
    Object { bucket_name: String, key: String },
    Schedule(String),
    Queue(String),
    Secret(String),
}

impl DeleteTarget {
    /// Target for a row of a service's main list.
    pub fn for_service(service: Service, id: String) -> Option<Self> {
        let target = match service {
            Service::ApiGateway => DeleteTarget::RestApi(id),
            Service::CloudFormation => DeleteTarget::Stack(id),
            Service::CloudWatch => DeleteTarget::LogGroup(id),
            Service::DynamoDb => DeleteTarget::Table(id),
            Service::EventBridge => DeleteTarget::EventBus(id),
            Service::Iam => DeleteTarget::User(id),
            Service::Lambda => DeleteTarget::Function(id),
            Service::S3 => DeleteTarget::Bucket(id),
            Service::Scheduler => DeleteTarget::Schedule(id),
            Service::Sqs => {
                DeleteTarget::Queue(emucon_core::sqs::queue_name_from_url(&id).to_string())
            }
            Service::SecretsManager => DeleteTarget::Secret(id),
        };
        Some(target).filter(|t| !t.name().trim().is_empty())
    }

    pub fn name(&self) -> &str {
        match self {
            DeleteTarget::RestApi(name)
            | DeleteTarget::Stack(name)
            | DeleteTarget::LogGroup(name)
            | DeleteTarget::Table(name)
            | DeleteTarget::EventBus(name)
            | DeleteTarget::User(name)
            | DeleteTarget::Function(name)
            | DeleteTarget::Bucket(name)
            | DeleteTarget::Schedule(name)
            | DeleteTarget::Queue(name)
            | DeleteTarget::Secret(name) => name,
            DeleteTarget::AccessKey { access_key_id, .. } => access_key_id,
            DeleteTarget::Rule { rule_name, .. } => rule_name,
            DeleteTarget::Item { label, .. } => label,
            DeleteTarget::Object { key, .. } => key,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DeleteTarget::RestApi(_) => "REST API",
            DeleteTarget::Stack(_) => "stack",
            DeleteTarget::LogGroup(_) => "log group",
            DeleteTarget::Table(_) => "table",
            DeleteTarget::Item { .. } => "item",
            DeleteTarget::EventBus(_) => "event bus",
            DeleteTarget::Rule { .. } => "rule",
            DeleteTarget::User(_) => "user",
            DeleteTarget::AccessKey { .. } => "access key",
            DeleteTarget::Function(_) => "function",
            DeleteTarget::Bucket(_) => "bucket",
            DeleteTarget::Object { .. } => "object",
            DeleteTarget::Schedule(_) => "schedule",
            DeleteTarget::Queue(_) => "queue",
            DeleteTarget::Secret(_) => "secret",
        }
    }

    /// Target for a scanned row, given as the item's JSON. `None` until the
    /// key schema is known or when the row lacks a key attribute.
    pub fn item(table_name: &str, item_json: &str, schema: &TableDescription) -> Option<Self> {
        let item: Item = serde_json::from_str(item_json).ok()?;
        let key = item_key(&item, schema)?;
        let label = serde_json::Value::Object(key.clone()).to_string();
        Some(DeleteTarget::Item {
            table_name: table_name.to_string(),
            key,
            label,
        })
    }

    pub fn prompt(&self) -> String {
        format!("Delete {} \"{}\"? (y / Esc)", self.kind(), self.name())
    }

    /// Fire the delete mutation; the outcome arrives as a toast.
    pub fn run(self, hooks: &Hooks) {
        tracing::debug!(kind = self.kind(), name = self.name(), "delete confirmed");
        match self {
            DeleteTarget::RestApi(id) => hooks.use_delete_rest_api().mutate(id),
            DeleteTarget::Stack(name) => hooks.use_delete_stack().mutate(name),
            DeleteTarget::LogGroup(name) => hooks.use_delete_log_group().mutate(name),
            DeleteTarget::Table(name) => hooks.use_delete_table().mutate(name),
            DeleteTarget::Item { table_name, key, .. } => hooks
                .use_delete_item()
                .mutate((table_name, DeleteItemInput { key })),
            DeleteTarget::EventBus(name) => hooks.use_delete_event_bus().mutate(name),
            DeleteTarget::Rule {
                event_bus_name,
                rule_name,
            } => hooks.use_delete_rule().mutate((
                rule_name,
                RulesOptions {
                    event_bus_name: Some(event_bus_name),
                },
            )),
            DeleteTarget::User(name) => hooks.use_delete_user().mutate(name),
            DeleteTarget::AccessKey {
                user_name,
                access_key_id,
            } => hooks
                .use_delete_access_key()
                .mutate((user_name, access_key_id)),
            DeleteTarget::Function(name) => hooks.use_delete_function().mutate(name),
            DeleteTarget::Bucket(name) => hooks.use_delete_bucket().mutate(name),
            DeleteTarget::Object { bucket_name, key } => {
                hooks.use_delete_object().mutate((bucket_name, key))
            }
            DeleteTarget::Schedule(name) => hooks
                .use_delete_schedule()
                .mutate((name, ScheduleGroupQuery::default())),
            DeleteTarget::Queue(name) => hooks.use_delete_queue().mutate(name),
            DeleteTarget::Secret(id) => hooks
                .use_delete_secret()
                .mutate((id, DeleteSecretOptions::default())),
        }
    }
}

/// The key attributes of `item` under `schema`.
pub fn item_key(item: &Item, schema: &TableDescription) -> Option<Item> {
    if schema.key_schema.is_empty() {
        return None;
    }
    schema
        .key_schema
        .iter()
        .map(|k| {
            item.get(&k.attribute_name)
                .map(|value| (k.attribute_name.clone(), value.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_delete_uses_name_from_url() {
        let target = DeleteTarget::for_service(
            Service::Sqs,
            "http://localhost:4566/000000000000/jobs".to_string(),
        )
        .unwrap();
        assert_eq!(target, DeleteTarget::Queue("jobs".to_string()));
        assert_eq!(target.prompt(), "Delete queue \"jobs\"? (y / Esc)");
    }

    fn orders_schema() -> TableDescription {
        serde_json::from_value(serde_json::json!({
            "TableName": "orders",
            "KeySchema": [
                {"AttributeName": "pk", "KeyType": "HASH"},
                {"AttributeName": "sk", "KeyType": "RANGE"}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_item_target_keeps_only_key_attributes() {
        let target = DeleteTarget::item(
            "orders",
            r#"{"pk":"o-1","sk":"2024","total":12}"#,
            &orders_schema(),
        )
        .unwrap();
        let DeleteTarget::Item { table_name, key, .. } = &target else {
            panic!("expected an item target");
        };
        assert_eq!(table_name, "orders");
        assert_eq!(key.len(), 2);
        assert!(!key.contains_key("total"));
        assert_eq!(target.kind(), "item");
    }

    #[test]
    fn test_item_without_sort_key_has_no_target() {
        assert!(DeleteTarget::item("orders", r#"{"pk":"o-1"}"#, &orders_schema()).is_none());
        assert!(DeleteTarget::item("orders", r#"{"pk":"o-1"}"#, &TableDescription::default()).is_none());
    }

    #[test]
    fn test_rule_prompt_names_the_rule() {
        let target = DeleteTarget::Rule {
            event_bus_name: "orders".to_string(),
            rule_name: "on-order".to_string(),
        };
        assert_eq!(target.prompt(), "Delete rule \"on-order\"? (y / Esc)");
    }

    #[test]
    fn test_blank_identifier_has_no_target() {
        assert!(DeleteTarget::for_service(Service::S3, " ".to_string()).is_none());
    }
}

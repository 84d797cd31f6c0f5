use emucon_core::eventbridge::{
    CreateEventBusInput, CreateEventBusOutput, EventBus, FailedEntryCount, PutEventsInput,
    PutRuleInput, PutRuleOutput, PutTargetsInput, Rule, RulesOptions, Target,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_event_buses(&self, enabled: bool) -> QueryHandle<Vec<EventBus>> {
        self.query(keys::event_buses(), QueryOptions::enabled(enabled), |client| async move {
            client.list_event_buses().await
        })
    }

    pub fn use_rules(&self, options: RulesOptions, enabled: bool) -> QueryHandle<Vec<Rule>> {
        let key = keys::rules_key(&options);
        self.query(key, QueryOptions::enabled(enabled), move |client| {
            let options = options.clone();
            async move { client.list_rules(&options).await }
        })
    }

    pub fn use_targets(
        &self,
        rule_name: &str,
        options: RulesOptions,
        enabled: bool,
    ) -> QueryHandle<Vec<Target>> {
        let key = keys::targets_key(rule_name, &options);
        let name = rule_name.to_string();
        self.query(key, gate(enabled, &[rule_name]), move |client| {
            let (name, options) = (name.clone(), options.clone());
            async move { client.list_targets(&name, &options).await }
        })
    }

    pub fn use_create_event_bus(&self) -> Mutation<CreateEventBusInput, CreateEventBusOutput> {
        self.mutation(
            Messages::new("Event bus created", "Failed to create event bus"),
            |_: &CreateEventBusInput| Write::CreateEventBus,
            |client, input: CreateEventBusInput| async move { client.create_event_bus(&input).await },
        )
    }

    pub fn use_delete_event_bus(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Event bus deleted", "Failed to delete event bus"),
            |_: &String| Write::DeleteEventBus,
            |client, name: String| async move { client.delete_event_bus(&name).await },
        )
    }

    pub fn use_put_rule(&self) -> Mutation<PutRuleInput, PutRuleOutput> {
        self.mutation(
            Messages::new("Rule saved", "Failed to save rule"),
            |_: &PutRuleInput| Write::PutRule,
            |client, input: PutRuleInput| async move { client.put_rule(&input).await },
        )
    }

    /// Input is `(rule_name, bus)`.
    pub fn use_delete_rule(&self) -> Mutation<(String, RulesOptions), ()> {
        self.mutation(
            Messages::new("Rule deleted", "Failed to delete rule"),
            |(name, _): &(String, RulesOptions)| Write::DeleteRule {
                rule_name: name.clone(),
            },
            |client, (name, bus): (String, RulesOptions)| async move {
                client.delete_rule(&name, &bus).await
            },
        )
    }

    /// Input is `(rule_name, targets)`.
    pub fn use_put_targets(&self) -> Mutation<(String, PutTargetsInput), FailedEntryCount> {
        self.mutation(
            Messages::new("Targets saved", "Failed to save targets"),
            |(name, _): &(String, PutTargetsInput)| Write::PutTargets {
                rule_name: name.clone(),
            },
            |client, (name, input): (String, PutTargetsInput)| async move {
                client.put_targets(&name, &input).await
            },
        )
    }

    pub fn use_put_events(&self) -> Mutation<PutEventsInput, FailedEntryCount> {
        self.mutation(
            Messages::new("Events sent", "Failed to send events"),
            |_: &PutEventsInput| Write::PutEvents,
            |client, input: PutEventsInput| async move { client.put_events(&input).await },
        )
    }
}

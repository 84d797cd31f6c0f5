use emucon_core::cloudformation::{
    CreateStackInput, Stack, StackEvent, StackIdOutput, StackResource, StackTemplate,
    UpdateStackInput,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_stacks(&self, enabled: bool) -> QueryHandle<Vec<Stack>> {
        self.query(keys::stacks(), QueryOptions::enabled(enabled), |client| async move {
            client.list_stacks().await
        })
    }

    pub fn use_stack(&self, stack_name: &str, enabled: bool) -> QueryHandle<Stack> {
        let name = stack_name.to_string();
        self.query(keys::stack(stack_name), gate(enabled, &[stack_name]), move |client| {
            let name = name.clone();
            async move { client.describe_stack(&name).await }
        })
    }

    pub fn use_stack_events(&self, stack_name: &str, enabled: bool) -> QueryHandle<Vec<StackEvent>> {
        let name = stack_name.to_string();
        self.query(keys::stack_events(stack_name), gate(enabled, &[stack_name]), move |client| {
            let name = name.clone();
            async move { client.list_stack_events(&name).await }
        })
    }

    pub fn use_stack_resources(
        &self,
        stack_name: &str,
        enabled: bool,
    ) -> QueryHandle<Vec<StackResource>> {
        let name = stack_name.to_string();
        let options = gate(enabled, &[stack_name]);
        self.query(keys::stack_resources(stack_name), options, move |client| {
            let name = name.clone();
            async move { client.list_stack_resources(&name).await }
        })
    }

    pub fn use_stack_template(&self, stack_name: &str, enabled: bool) -> QueryHandle<StackTemplate> {
        let name = stack_name.to_string();
        let options = gate(enabled, &[stack_name]);
        self.query(keys::stack_template(stack_name), options, move |client| {
            let name = name.clone();
            async move { client.get_stack_template(&name).await }
        })
    }

    pub fn use_create_stack(&self) -> Mutation<CreateStackInput, StackIdOutput> {
        self.mutation(
            Messages::new("Stack creation started", "Failed to create stack"),
            |_: &CreateStackInput| Write::CreateStack,
            |client, input: CreateStackInput| async move { client.create_stack(&input).await },
        )
    }

    /// Input is `(stack_name, update)`.
    pub fn use_update_stack(&self) -> Mutation<(String, UpdateStackInput), StackIdOutput> {
        self.mutation(
            Messages::new("Stack update started", "Failed to update stack"),
            |(stack_name, _): &(String, UpdateStackInput)| Write::UpdateStack {
                stack_name: stack_name.clone(),
            },
            |client, (stack_name, input): (String, UpdateStackInput)| async move {
                client.update_stack(&stack_name, &input).await
            },
        )
    }

    pub fn use_delete_stack(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Stack deletion started", "Failed to delete stack"),
            |stack_name: &String| Write::DeleteStack {
                stack_name: stack_name.clone(),
            },
            |client, stack_name: String| async move { client.delete_stack(&stack_name).await },
        )
    }
}

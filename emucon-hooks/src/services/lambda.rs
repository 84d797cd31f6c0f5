use emucon_core::lambda::{
    CreateFunctionInput, FunctionConfiguration, FunctionDetail, InvokeInput, InvokeOutput,
    UpdateFunctionConfigurationInput,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_functions(&self, enabled: bool) -> QueryHandle<Vec<FunctionConfiguration>> {
        self.query(keys::functions(), QueryOptions::enabled(enabled), |client| async move {
            client.list_functions().await
        })
    }

    pub fn use_function(&self, function_name: &str, enabled: bool) -> QueryHandle<FunctionDetail> {
        let name = function_name.to_string();
        self.query(keys::function(function_name), gate(enabled, &[function_name]), move |client| {
            let name = name.clone();
            async move { client.get_function(&name).await }
        })
    }

    pub fn use_create_function(&self) -> Mutation<CreateFunctionInput, FunctionConfiguration> {
        self.mutation(
            Messages::new("Function created", "Failed to create function"),
            |_: &CreateFunctionInput| Write::CreateFunction,
            |client, input: CreateFunctionInput| async move { client.create_function(&input).await },
        )
    }

    /// Input is `(function_name, changes)`.
    pub fn use_update_function_configuration(
        &self,
    ) -> Mutation<(String, UpdateFunctionConfigurationInput), FunctionConfiguration> {
        self.mutation(
            Messages::new("Function updated", "Failed to update function"),
            |(name, _): &(String, UpdateFunctionConfigurationInput)| {
                Write::UpdateFunctionConfiguration {
                    function_name: name.clone(),
                }
            },
            |client, (name, input): (String, UpdateFunctionConfigurationInput)| async move {
                client.update_function_configuration(&name, &input).await
            },
        )
    }

    pub fn use_delete_function(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Function deleted", "Failed to delete function"),
            |name: &String| Write::DeleteFunction {
                function_name: name.clone(),
            },
            |client, name: String| async move { client.delete_function(&name).await },
        )
    }

    /// Input is `(function_name, invocation)`.
    pub fn use_invoke_function(&self) -> Mutation<(String, InvokeInput), InvokeOutput> {
        self.mutation(
            Messages::new("Function invoked", "Failed to invoke function"),
            |_: &(String, InvokeInput)| Write::InvokeFunction,
            |client, (name, input): (String, InvokeInput)| async move {
                client.invoke_function(&name, &input).await
            },
        )
    }
}

use emucon_core::apigateway::{
    ApiResource, CreateDeploymentInput, CreateRestApiInput, Deployment, RestApi, Stage,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_rest_apis(&self, enabled: bool) -> QueryHandle<Vec<RestApi>> {
        self.query(keys::rest_apis(), QueryOptions::enabled(enabled), |client| async move {
            client.list_rest_apis().await
        })
    }

    pub fn use_rest_api(&self, api_id: &str, enabled: bool) -> QueryHandle<RestApi> {
        let id = api_id.to_string();
        self.query(keys::rest_api(api_id), gate(enabled, &[api_id]), move |client| {
            let id = id.clone();
            async move { client.get_rest_api(&id).await }
        })
    }

    pub fn use_api_resources(&self, api_id: &str, enabled: bool) -> QueryHandle<Vec<ApiResource>> {
        let id = api_id.to_string();
        self.query(keys::api_resources(api_id), gate(enabled, &[api_id]), move |client| {
            let id = id.clone();
            async move { client.list_api_resources(&id).await }
        })
    }

    pub fn use_api_stages(&self, api_id: &str, enabled: bool) -> QueryHandle<Vec<Stage>> {
        let id = api_id.to_string();
        self.query(keys::api_stages(api_id), gate(enabled, &[api_id]), move |client| {
            let id = id.clone();
            async move { client.list_stages(&id).await }
        })
    }

    pub fn use_create_rest_api(&self) -> Mutation<CreateRestApiInput, RestApi> {
        self.mutation(
            Messages::new("REST API created", "Failed to create REST API"),
            |_: &CreateRestApiInput| Write::CreateRestApi,
            |client, input: CreateRestApiInput| async move { client.create_rest_api(&input).await },
        )
    }

    pub fn use_delete_rest_api(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("REST API deleted", "Failed to delete REST API"),
            |api_id: &String| Write::DeleteRestApi {
                api_id: api_id.clone(),
            },
            |client, api_id: String| async move { client.delete_rest_api(&api_id).await },
        )
    }

    /// Input is `(api_id, deployment)`.
    pub fn use_create_deployment(&self) -> Mutation<(String, CreateDeploymentInput), Deployment> {
        self.mutation(
            Messages::new("Deployment created", "Failed to create deployment"),
            |(api_id, _): &(String, CreateDeploymentInput)| Write::CreateDeployment {
                api_id: api_id.clone(),
            },
            |client, (api_id, input): (String, CreateDeploymentInput)| async move {
                client.create_deployment(&api_id, &input).await
            },
        )
    }
}

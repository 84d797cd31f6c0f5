use emucon_core::apigateway::{
    ApiResource, CreateDeploymentInput, CreateRestApiInput, Deployment, RestApi, Stage,
};
use emucon_core::{ClientResult, Service};

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn apis() -> ApiPath {
    ApiPath::new(Service::ApiGateway).lit("apis")
}

impl RestClient {
    pub async fn list_rest_apis(&self) -> ClientResult<Vec<RestApi>> {
        let call = Call::get(apis(), "Failed to fetch REST APIs");
        self.fetch_list(call, Envelope::Field("items")).await
    }

    pub async fn get_rest_api(&self, api_id: &str) -> ClientResult<RestApi> {
        let call = Call::get(apis().id("apiId", api_id)?, "Failed to fetch REST API");
        self.fetch(call).await
    }

    pub async fn create_rest_api(&self, input: &CreateRestApiInput) -> ClientResult<RestApi> {
        let call = Call::post(apis(), "Failed to create REST API").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_rest_api(&self, api_id: &str) -> ClientResult<()> {
        let call = Call::delete(apis().id("apiId", api_id)?, "Failed to delete REST API");
        self.execute(call).await
    }

    pub async fn list_api_resources(&self, api_id: &str) -> ClientResult<Vec<ApiResource>> {
        let path = apis().id("apiId", api_id)?.lit("resources");
        let call = Call::get(path, "Failed to fetch resources");
        self.fetch_list(call, Envelope::Field("items")).await
    }

    /// Stages come back under `item`, not `items`.
    pub async fn list_stages(&self, api_id: &str) -> ClientResult<Vec<Stage>> {
        let path = apis().id("apiId", api_id)?.lit("stages");
        let call = Call::get(path, "Failed to fetch stages");
        self.fetch_list(call, Envelope::Field("item")).await
    }

    pub async fn create_deployment(
        &self,
        api_id: &str,
        input: &CreateDeploymentInput,
    ) -> ClientResult<Deployment> {
        let path = apis().id("apiId", api_id)?.lit("deployments");
        let call = Call::post(path, "Failed to create deployment").json(input)?;
        self.fetch(call).await
    }
}

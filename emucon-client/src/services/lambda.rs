use emucon_core::lambda::{
    CreateFunctionInput, FunctionConfiguration, FunctionDetail, InvokeInput, InvokeOutput,
    UpdateFunctionConfigurationInput,
};
use emucon_core::{ClientResult, Service};

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn functions() -> ApiPath {
    ApiPath::new(Service::Lambda).lit("functions")
}

fn function(name: &str) -> ClientResult<ApiPath> {
    functions().id("functionName", name)
}

impl RestClient {
    pub async fn list_functions(&self) -> ClientResult<Vec<FunctionConfiguration>> {
        let call = Call::get(functions(), "Failed to fetch functions");
        self.fetch_list(call, Envelope::Field("functions")).await
    }

    pub async fn get_function(&self, function_name: &str) -> ClientResult<FunctionDetail> {
        let call = Call::get(function(function_name)?, "Failed to fetch function");
        self.fetch(call).await
    }

    pub async fn create_function(
        &self,
        input: &CreateFunctionInput,
    ) -> ClientResult<FunctionConfiguration> {
        let call = Call::post(functions(), "Failed to create function").json(input)?;
        self.fetch(call).await
    }

    pub async fn update_function_configuration(
        &self,
        function_name: &str,
        input: &UpdateFunctionConfigurationInput,
    ) -> ClientResult<FunctionConfiguration> {
        let path = function(function_name)?.lit("configuration");
        let call = Call::put(path, "Failed to update function").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_function(&self, function_name: &str) -> ClientResult<()> {
        let call = Call::delete(function(function_name)?, "Failed to delete function");
        self.execute(call).await
    }

    pub async fn invoke_function(
        &self,
        function_name: &str,
        input: &InvokeInput,
    ) -> ClientResult<InvokeOutput> {
        let path = function(function_name)?.lit("invoke");
        let call = Call::post(path, "Failed to invoke function").json(input)?;
        self.fetch(call).await
    }
}

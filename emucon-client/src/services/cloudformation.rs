use emucon_core::cloudformation::{
    CreateStackInput, Stack, StackEvent, StackIdOutput, StackResource, StackTemplate,
    UpdateStackInput,
};
use emucon_core::{ClientResult, Service};

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn stacks() -> ApiPath {
    ApiPath::new(Service::CloudFormation).lit("stacks")
}

fn stack(name: &str) -> ClientResult<ApiPath> {
    stacks().id("stackName", name)
}

impl RestClient {
    pub async fn list_stacks(&self) -> ClientResult<Vec<Stack>> {
        let call = Call::get(stacks(), "Failed to fetch stacks");
        self.fetch_list(call, Envelope::Field("stacks")).await
    }

    pub async fn describe_stack(&self, stack_name: &str) -> ClientResult<Stack> {
        let call = Call::get(stack(stack_name)?, "Failed to fetch stack");
        self.fetch(call).await
    }

    pub async fn create_stack(&self, input: &CreateStackInput) -> ClientResult<StackIdOutput> {
        let call = Call::post(stacks(), "Failed to create stack").json(input)?;
        self.fetch(call).await
    }

    pub async fn update_stack(
        &self,
        stack_name: &str,
        input: &UpdateStackInput,
    ) -> ClientResult<StackIdOutput> {
        let call = Call::put(stack(stack_name)?, "Failed to update stack").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_stack(&self, stack_name: &str) -> ClientResult<()> {
        let call = Call::delete(stack(stack_name)?, "Failed to delete stack");
        self.execute(call).await
    }

    pub async fn list_stack_events(&self, stack_name: &str) -> ClientResult<Vec<StackEvent>> {
        let call = Call::get(stack(stack_name)?.lit("events"), "Failed to fetch stack events");
        self.fetch_list(call, Envelope::Bare).await
    }

    pub async fn list_stack_resources(&self, stack_name: &str) -> ClientResult<Vec<StackResource>> {
        let call = Call::get(
            stack(stack_name)?.lit("resources"),
            "Failed to fetch stack resources",
        );
        self.fetch_list(call, Envelope::Bare).await
    }

    pub async fn get_stack_template(&self, stack_name: &str) -> ClientResult<StackTemplate> {
        let call = Call::get(stack(stack_name)?.lit("template"), "Failed to fetch template");
        self.fetch(call).await
    }
}

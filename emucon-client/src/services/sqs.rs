use emucon_core::sqs::{
    CreateQueueInput, CreateQueueOutput, DeleteMessageInput, Message, QueueAttributes,
    QueuesOptions, ReceiveMessagesInput, SendMessageInput, SendMessageOutput,
};
use emucon_core::{ClientResult, Service};
use serde::Deserialize;

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn queues() -> ApiPath {
    ApiPath::new(Service::Sqs).lit("queues")
}

fn queue(name: &str) -> ClientResult<ApiPath> {
    queues().id("queueName", name)
}

#[derive(Deserialize, Default)]
struct AttributesEnvelope {
    #[serde(default)]
    attributes: Option<QueueAttributes>,
}

impl RestClient {
    /// Queue URLs; see [`emucon_core::sqs::queue_name_from_url`].
    pub async fn list_queues(&self, options: &QueuesOptions) -> ClientResult<Vec<String>> {
        let call = Call::get(queues(), "Failed to fetch queues").query(options)?;
        self.fetch_list(call, Envelope::Field("queueUrls")).await
    }

    pub async fn get_queue_attributes(&self, queue_name: &str) -> ClientResult<QueueAttributes> {
        let path = queue(queue_name)?.lit("attributes");
        let call = Call::get(path, "Failed to fetch queue attributes");
        let envelope: Option<AttributesEnvelope> = self.fetch(call).await?;
        Ok(envelope.unwrap_or_default().attributes.unwrap_or_default())
    }

    pub async fn create_queue(&self, input: &CreateQueueInput) -> ClientResult<CreateQueueOutput> {
        let call = Call::post(queues(), "Failed to create queue").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_queue(&self, queue_name: &str) -> ClientResult<()> {
        let call = Call::delete(queue(queue_name)?, "Failed to delete queue");
        self.execute(call).await
    }

    pub async fn purge_queue(&self, queue_name: &str) -> ClientResult<()> {
        let call = Call::post(queue(queue_name)?.lit("purge"), "Failed to purge queue");
        self.execute(call).await
    }

    pub async fn send_message(
        &self,
        queue_name: &str,
        input: &SendMessageInput,
    ) -> ClientResult<SendMessageOutput> {
        let path = queue(queue_name)?.lit("messages");
        let call = Call::post(path, "Failed to send message").json(input)?;
        self.fetch(call).await
    }

    pub async fn receive_messages(
        &self,
        queue_name: &str,
        input: &ReceiveMessagesInput,
    ) -> ClientResult<Vec<Message>> {
        let path = queue(queue_name)?.lit("messages").lit("receive");
        let call = Call::post(path, "Failed to receive messages").json(input)?;
        self.fetch_list(call, Envelope::Field("messages")).await
    }

    /// The receipt handle travels in the request body.
    pub async fn delete_message(
        &self,
        queue_name: &str,
        input: &DeleteMessageInput,
    ) -> ClientResult<()> {
        let path = queue(queue_name)?.lit("messages");
        let call = Call::delete(path, "Failed to delete message").json(input)?;
        self.execute(call).await
    }
}

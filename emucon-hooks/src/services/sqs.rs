use emucon_core::sqs::{
    CreateQueueInput, CreateQueueOutput, DeleteMessageInput, Message, QueueAttributes,
    QueuesOptions, ReceiveMessagesInput, SendMessageInput, SendMessageOutput,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_queues(&self, options: QueuesOptions, enabled: bool) -> QueryHandle<Vec<String>> {
        let key = keys::queues_key(&options);
        self.query(key, QueryOptions::enabled(enabled), move |client| {
            let options = options.clone();
            async move { client.list_queues(&options).await }
        })
    }

    pub fn use_queue_attributes(&self, queue_name: &str, enabled: bool) -> QueryHandle<QueueAttributes> {
        let name = queue_name.to_string();
        self.query(keys::queue_attributes(queue_name), gate(enabled, &[queue_name]), move |client| {
            let name = name.clone();
            async move { client.get_queue_attributes(&name).await }
        })
    }

    pub fn use_create_queue(&self) -> Mutation<CreateQueueInput, CreateQueueOutput> {
        self.mutation(
            Messages::new("Queue created", "Failed to create queue"),
            |_: &CreateQueueInput| Write::CreateQueue,
            |client, input: CreateQueueInput| async move { client.create_queue(&input).await },
        )
    }

    pub fn use_delete_queue(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Queue deleted", "Failed to delete queue"),
            |name: &String| Write::DeleteQueue {
                queue_name: name.clone(),
            },
            |client, name: String| async move { client.delete_queue(&name).await },
        )
    }

    pub fn use_purge_queue(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Queue purged", "Failed to purge queue"),
            |name: &String| Write::PurgeQueue {
                queue_name: name.clone(),
            },
            |client, name: String| async move { client.purge_queue(&name).await },
        )
    }

    /// Input is `(queue_name, message)`.
    pub fn use_send_message(&self) -> Mutation<(String, SendMessageInput), SendMessageOutput> {
        self.mutation(
            Messages::new("Message sent", "Failed to send message"),
            |(name, _): &(String, SendMessageInput)| Write::SendMessage {
                queue_name: name.clone(),
            },
            |client, (name, input): (String, SendMessageInput)| async move {
                client.send_message(&name, &input).await
            },
        )
    }

    /// Receiving hides the messages for their visibility timeout, so it is a
    /// write. Input is `(queue_name, request)`.
    pub fn use_receive_messages(&self) -> Mutation<(String, ReceiveMessagesInput), Vec<Message>> {
        self.mutation(
            Messages::new("Messages received", "Failed to receive messages"),
            |(name, _): &(String, ReceiveMessagesInput)| Write::ReceiveMessages {
                queue_name: name.clone(),
            },
            |client, (name, input): (String, ReceiveMessagesInput)| async move {
                client.receive_messages(&name, &input).await
            },
        )
    }

    /// Input is `(queue_name, receipt)`.
    pub fn use_delete_message(&self) -> Mutation<(String, DeleteMessageInput), ()> {
        self.mutation(
            Messages::new("Message deleted", "Failed to delete message"),
            |(name, _): &(String, DeleteMessageInput)| Write::DeleteMessage {
                queue_name: name.clone(),
            },
            |client, (name, input): (String, DeleteMessageInput)| async move {
                client.delete_message(&name, &input).await
            },
        )
    }
}

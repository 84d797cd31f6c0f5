use emucon_core::secrets::{
    CreateSecretInput, DeleteSecretOptions, PutSecretValueInput, SecretListEntry, SecretValue,
    SecretVersionOutput,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_secrets(&self, enabled: bool) -> QueryHandle<Vec<SecretListEntry>> {
        self.query(keys::secrets(), QueryOptions::enabled(enabled), |client| async move {
            client.list_secrets().await
        })
    }

    pub fn use_secret(&self, secret_id: &str, enabled: bool) -> QueryHandle<SecretListEntry> {
        let id = secret_id.to_string();
        self.query(keys::secret(secret_id), gate(enabled, &[secret_id]), move |client| {
            let id = id.clone();
            async move { client.describe_secret(&id).await }
        })
    }

    /// Views enable this only while the value is revealed.
    pub fn use_secret_value(&self, secret_id: &str, enabled: bool) -> QueryHandle<SecretValue> {
        let id = secret_id.to_string();
        self.query(keys::secret_value(secret_id), gate(enabled, &[secret_id]), move |client| {
            let id = id.clone();
            async move { client.get_secret_value(&id).await }
        })
    }

    pub fn use_create_secret(&self) -> Mutation<CreateSecretInput, SecretVersionOutput> {
        self.mutation(
            Messages::new("Secret created", "Failed to create secret"),
            |_: &CreateSecretInput| Write::CreateSecret,
            |client, input: CreateSecretInput| async move { client.create_secret(&input).await },
        )
    }

    /// Input is `(secret_id, value)`.
    pub fn use_put_secret_value(&self) -> Mutation<(String, PutSecretValueInput), SecretVersionOutput> {
        self.mutation(
            Messages::new("Secret value updated", "Failed to update secret value"),
            |(id, _): &(String, PutSecretValueInput)| Write::PutSecretValue {
                secret_id: id.clone(),
            },
            |client, (id, input): (String, PutSecretValueInput)| async move {
                client.put_secret_value(&id, &input).await
            },
        )
    }

    /// Input is `(secret_id, options)`.
    pub fn use_delete_secret(&self) -> Mutation<(String, DeleteSecretOptions), ()> {
        self.mutation(
            Messages::new("Secret deleted", "Failed to delete secret"),
            |(id, _): &(String, DeleteSecretOptions)| Write::DeleteSecret {
                secret_id: id.clone(),
            },
            |client, (id, options): (String, DeleteSecretOptions)| async move {
                client.delete_secret(&id, &options).await
            },
        )
    }
}

use emucon_core::secrets::{
    CreateSecretInput, DeleteSecretOptions, PutSecretValueInput, SecretListEntry, SecretValue,
    SecretVersionOutput,
};
use emucon_core::{ClientResult, Service};

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn secrets() -> ApiPath {
    ApiPath::new(Service::SecretsManager).lit("secrets")
}

fn secret(id: &str) -> ClientResult<ApiPath> {
    secrets().id("secretId", id)
}

impl RestClient {
    pub async fn list_secrets(&self) -> ClientResult<Vec<SecretListEntry>> {
        let call = Call::get(secrets(), "Failed to fetch secrets");
        self.fetch_list(call, Envelope::Field("secretList")).await
    }

    pub async fn describe_secret(&self, secret_id: &str) -> ClientResult<SecretListEntry> {
        let call = Call::get(secret(secret_id)?, "Failed to fetch secret");
        self.fetch(call).await
    }

    pub async fn get_secret_value(&self, secret_id: &str) -> ClientResult<SecretValue> {
        let call = Call::get(secret(secret_id)?.lit("value"), "Failed to fetch secret value");
        self.fetch(call).await
    }

    pub async fn create_secret(&self, input: &CreateSecretInput) -> ClientResult<SecretVersionOutput> {
        let call = Call::post(secrets(), "Failed to create secret").json(input)?;
        self.fetch(call).await
    }

    pub async fn put_secret_value(
        &self,
        secret_id: &str,
        input: &PutSecretValueInput,
    ) -> ClientResult<SecretVersionOutput> {
        let path = secret(secret_id)?.lit("value");
        let call = Call::put(path, "Failed to update secret value").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_secret(
        &self,
        secret_id: &str,
        options: &DeleteSecretOptions,
    ) -> ClientResult<()> {
        let call = Call::delete(secret(secret_id)?, "Failed to delete secret").query(options)?;
        self.execute(call).await
    }
}

use emucon_core::dynamodb::{
    CreateTableInput, DeleteItemInput, PutItemInput, ScanOptions, ScanPage, TableDescription,
};
use emucon_core::{ClientResult, Service};
use serde::Deserialize;

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn tables() -> ApiPath {
    ApiPath::new(Service::DynamoDb).lit("tables")
}

fn table(name: &str) -> ClientResult<ApiPath> {
    tables().id("tableName", name)
}

/// `GET /tables/{name}` wraps the description in `table`.
#[derive(Deserialize)]
struct DescribeTableEnvelope {
    #[serde(default)]
    table: Option<TableDescription>,
}

impl RestClient {
    pub async fn list_tables(&self) -> ClientResult<Vec<String>> {
        let call = Call::get(tables(), "Failed to fetch tables");
        self.fetch_list(call, Envelope::Field("tableNames")).await
    }

    pub async fn describe_table(&self, table_name: &str) -> ClientResult<TableDescription> {
        let call = Call::get(table(table_name)?, "Failed to fetch table");
        let envelope: DescribeTableEnvelope = self.fetch(call).await?;
        Ok(envelope.table.unwrap_or_default())
    }

    pub async fn create_table(&self, input: &CreateTableInput) -> ClientResult<()> {
        let call = Call::post(tables(), "Failed to create table").json(input)?;
        self.execute(call).await
    }

    pub async fn delete_table(&self, table_name: &str) -> ClientResult<()> {
        let call = Call::delete(table(table_name)?, "Failed to delete table");
        self.execute(call).await
    }

    pub async fn scan_items(&self, table_name: &str, options: &ScanOptions) -> ClientResult<ScanPage> {
        let path = table(table_name)?.lit("items");
        let call = Call::get(path, "Failed to fetch items").query(options)?;
        let page: Option<ScanPage> = self.fetch(call).await?;
        Ok(page.unwrap_or_default())
    }

    pub async fn put_item(&self, table_name: &str, input: &PutItemInput) -> ClientResult<()> {
        let path = table(table_name)?.lit("items");
        let call = Call::post(path, "Failed to save item").json(input)?;
        self.execute(call).await
    }

    /// The item key travels in the request body.
    pub async fn delete_item(&self, table_name: &str, input: &DeleteItemInput) -> ClientResult<()> {
        let path = table(table_name)?.lit("items");
        let call = Call::delete(path, "Failed to delete item").json(input)?;
        self.execute(call).await
    }
}

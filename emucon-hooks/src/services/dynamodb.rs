use emucon_core::dynamodb::{
    CreateTableInput, DeleteItemInput, PutItemInput, ScanOptions, ScanPage, TableDescription,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_tables(&self, enabled: bool) -> QueryHandle<Vec<String>> {
        self.query(keys::tables(), QueryOptions::enabled(enabled), |client| async move {
            client.list_tables().await
        })
    }

    pub fn use_table(&self, table_name: &str, enabled: bool) -> QueryHandle<TableDescription> {
        let name = table_name.to_string();
        self.query(keys::table(table_name), gate(enabled, &[table_name]), move |client| {
            let name = name.clone();
            async move { client.describe_table(&name).await }
        })
    }

    pub fn use_table_items(
        &self,
        table_name: &str,
        options: ScanOptions,
        enabled: bool,
    ) -> QueryHandle<ScanPage> {
        let key = keys::table_items_key(table_name, &options);
        let name = table_name.to_string();
        self.query(key, gate(enabled, &[table_name]), move |client| {
            let (name, options) = (name.clone(), options.clone());
            async move { client.scan_items(&name, &options).await }
        })
    }

    pub fn use_create_table(&self) -> Mutation<CreateTableInput, ()> {
        self.mutation(
            Messages::new("Table created", "Failed to create table"),
            |_: &CreateTableInput| Write::CreateTable,
            |client, input: CreateTableInput| async move { client.create_table(&input).await },
        )
    }

    pub fn use_delete_table(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Table deleted", "Failed to delete table"),
            |name: &String| Write::DeleteTable {
                table_name: name.clone(),
            },
            |client, name: String| async move { client.delete_table(&name).await },
        )
    }

    /// Input is `(table_name, item)`.
    pub fn use_put_item(&self) -> Mutation<(String, PutItemInput), ()> {
        self.mutation(
            Messages::new("Item saved", "Failed to save item"),
            |(name, _): &(String, PutItemInput)| Write::PutItem {
                table_name: name.clone(),
            },
            |client, (name, input): (String, PutItemInput)| async move {
                client.put_item(&name, &input).await
            },
        )
    }

    /// Input is `(table_name, key)`.
    pub fn use_delete_item(&self) -> Mutation<(String, DeleteItemInput), ()> {
        self.mutation(
            Messages::new("Item deleted", "Failed to delete item"),
            |(name, _): &(String, DeleteItemInput)| Write::DeleteItem {
                table_name: name.clone(),
            },
            |client, (name, input): (String, DeleteItemInput)| async move {
                client.delete_item(&name, &input).await
            },
        )
    }
}

use emucon_core::s3::{Bucket, CreateBucketInput, ObjectListing, ObjectsOptions, PutObjectInput};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_buckets(&self, enabled: bool) -> QueryHandle<Vec<Bucket>> {
        self.query(keys::buckets(), QueryOptions::enabled(enabled), |client| async move {
            client.list_buckets().await
        })
    }

    pub fn use_objects(
        &self,
        bucket_name: &str,
        options: ObjectsOptions,
        enabled: bool,
    ) -> QueryHandle<ObjectListing> {
        let key = keys::objects_key(bucket_name, &options);
        let name = bucket_name.to_string();
        self.query(key, gate(enabled, &[bucket_name]), move |client| {
            let (name, options) = (name.clone(), options.clone());
            async move { client.list_objects(&name, &options).await }
        })
    }

    pub fn use_create_bucket(&self) -> Mutation<CreateBucketInput, ()> {
        self.mutation(
            Messages::new("Bucket created", "Failed to create bucket"),
            |_: &CreateBucketInput| Write::CreateBucket,
            |client, input: CreateBucketInput| async move { client.create_bucket(&input).await },
        )
    }

    pub fn use_delete_bucket(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Bucket deleted", "Failed to delete bucket"),
            |name: &String| Write::DeleteBucket {
                bucket_name: name.clone(),
            },
            |client, name: String| async move { client.delete_bucket(&name).await },
        )
    }

    /// Input is `(bucket_name, object)`.
    pub fn use_put_object(&self) -> Mutation<(String, PutObjectInput), ()> {
        self.mutation(
            Messages::new("Object uploaded", "Failed to upload object"),
            |(name, _): &(String, PutObjectInput)| Write::PutObject {
                bucket_name: name.clone(),
            },
            |client, (name, input): (String, PutObjectInput)| async move {
                client.put_object(&name, &input).await
            },
        )
    }

    /// Input is `(bucket_name, key)`.
    pub fn use_delete_object(&self) -> Mutation<(String, String), ()> {
        self.mutation(
            Messages::new("Object deleted", "Failed to delete object"),
            |(name, _): &(String, String)| Write::DeleteObject {
                bucket_name: name.clone(),
            },
            |client, (name, key): (String, String)| async move {
                client.delete_object(&name, &key).await
            },
        )
    }
}

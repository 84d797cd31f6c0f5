use emucon_core::s3::{Bucket, CreateBucketInput, ObjectListing, ObjectsOptions, PutObjectInput};
use emucon_core::{ClientResult, Service};

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn buckets() -> ApiPath {
    ApiPath::new(Service::S3).lit("buckets")
}

fn bucket(name: &str) -> ClientResult<ApiPath> {
    buckets().id("bucketName", name)
}

impl RestClient {
    pub async fn list_buckets(&self) -> ClientResult<Vec<Bucket>> {
        let call = Call::get(buckets(), "Failed to fetch buckets");
        self.fetch_list(call, Envelope::Field("buckets")).await
    }

    pub async fn create_bucket(&self, input: &CreateBucketInput) -> ClientResult<()> {
        let call = Call::post(buckets(), "Failed to create bucket").json(input)?;
        self.execute(call).await
    }

    pub async fn delete_bucket(&self, bucket_name: &str) -> ClientResult<()> {
        let call = Call::delete(bucket(bucket_name)?, "Failed to delete bucket");
        self.execute(call).await
    }

    /// Objects and common prefixes of one listing page.
    pub async fn list_objects(
        &self,
        bucket_name: &str,
        options: &ObjectsOptions,
    ) -> ClientResult<ObjectListing> {
        let path = bucket(bucket_name)?.lit("objects");
        let call = Call::get(path, "Failed to fetch objects").query(options)?;
        let listing: Option<ObjectListing> = self.fetch(call).await?;
        Ok(listing.unwrap_or_default())
    }

    pub async fn put_object(&self, bucket_name: &str, input: &PutObjectInput) -> ClientResult<()> {
        let path = bucket(bucket_name)?.lit("objects");
        let call = Call::post(path, "Failed to upload object").json(input)?;
        self.execute(call).await
    }

    /// Keys are one encoded segment, so `a/b.txt` becomes `a%2Fb.txt`.
    pub async fn delete_object(&self, bucket_name: &str, key: &str) -> ClientResult<()> {
        let path = bucket(bucket_name)?.lit("objects").id("key", key)?;
        let call = Call::delete(path, "Failed to delete object");
        self.execute(call).await
    }
}

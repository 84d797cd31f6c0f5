//! Endpoint methods on [`crate::RestClient`], one module per service.

mod apigateway;
mod cloudformation;
mod cloudwatch;
mod dynamodb;
mod eventbridge;
mod iam;
mod lambda;
mod s3;
mod scheduler;
mod secrets;
mod sqs;

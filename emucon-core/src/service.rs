//! The emulated AWS services the console manages.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Service {
    ApiGateway,
    CloudFormation,
    CloudWatch,
    DynamoDb,
    EventBridge,
    Iam,
    Lambda,
    S3,
    Scheduler,
    Sqs,
    SecretsManager,
}

impl Service {
    pub fn all() -> &'static [Service] {
        &[
            Service::ApiGateway,
            Service::CloudFormation,
            Service::CloudWatch,
            Service::DynamoDb,
            Service::EventBridge,
            Service::Iam,
            Service::Lambda,
            Service::S3,
            Service::Scheduler,
            Service::Sqs,
            Service::SecretsManager,
        ]
    }

    /// Route group of the backend proxy, i.e. `/api/{route}/...`.
    pub fn route(&self) -> &'static str {
        match self {
            Service::ApiGateway => "apigateway",
            Service::CloudFormation => "cloudformation",
            Service::CloudWatch => "cloudwatch",
            Service::DynamoDb => "dynamodb",
            Service::EventBridge => "eventbridge",
            Service::Iam => "iam",
            Service::Lambda => "lambda",
            Service::S3 => "s3",
            Service::Scheduler => "scheduler",
            Service::Sqs => "sqs",
            Service::SecretsManager => "secretsmanager",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Service::ApiGateway => "API Gateway",
            Service::CloudFormation => "CloudFormation",
            Service::CloudWatch => "CloudWatch",
            Service::DynamoDb => "DynamoDB",
            Service::EventBridge => "EventBridge",
            Service::Iam => "IAM",
            Service::Lambda => "Lambda",
            Service::S3 => "S3",
            Service::Scheduler => "Scheduler",
            Service::Sqs => "SQS",
            Service::SecretsManager => "Secrets Manager",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_routes_are_unique() {
        let routes: HashSet<_> = Service::all().iter().map(|s| s.route()).collect();
        assert_eq!(routes.len(), Service::all().len());
    }
}

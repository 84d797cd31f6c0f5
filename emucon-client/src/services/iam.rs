use emucon_core::iam::{
    AccessKey, AccessKeyMetadata, AttachRolePolicyInput, AttachedPolicy, CreatePolicyInput,
    CreateRoleInput, CreateUserInput, PoliciesOptions, Policy, PolicyDetail, Role, User,
};
use emucon_core::{ClientResult, Service};
use serde::Deserialize;

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn users() -> ApiPath {
    ApiPath::new(Service::Iam).lit("users")
}

fn roles() -> ApiPath {
    ApiPath::new(Service::Iam).lit("roles")
}

fn policies() -> ApiPath {
    ApiPath::new(Service::Iam).lit("policies")
}

// Create calls answer with the SDK output, which nests the new resource.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct UserOutput {
    user: User,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AccessKeyOutput {
    access_key: AccessKey,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RoleOutput {
    role: Role,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PolicyOutput {
    policy: Policy,
}

impl RestClient {
    pub async fn list_users(&self) -> ClientResult<Vec<User>> {
        let call = Call::get(users(), "Failed to fetch users");
        self.fetch_list(call, Envelope::Field("users")).await
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> ClientResult<User> {
        let call = Call::post(users(), "Failed to create user").json(input)?;
        let output: UserOutput = self.fetch(call).await?;
        Ok(output.user)
    }

    pub async fn delete_user(&self, user_name: &str) -> ClientResult<()> {
        let call = Call::delete(users().id("userName", user_name)?, "Failed to delete user");
        self.execute(call).await
    }

    pub async fn list_access_keys(&self, user_name: &str) -> ClientResult<Vec<AccessKeyMetadata>> {
        let path = users().id("userName", user_name)?.lit("access-keys");
        let call = Call::get(path, "Failed to fetch access keys");
        self.fetch_list(call, Envelope::Field("accessKeyMetadata")).await
    }

    pub async fn create_access_key(&self, user_name: &str) -> ClientResult<AccessKey> {
        let path = users().id("userName", user_name)?.lit("access-keys");
        let call = Call::post(path, "Failed to create access key");
        let output: AccessKeyOutput = self.fetch(call).await?;
        Ok(output.access_key)
    }

    pub async fn delete_access_key(&self, user_name: &str, access_key_id: &str) -> ClientResult<()> {
        let path = users()
            .id("userName", user_name)?
            .lit("access-keys")
            .id("accessKeyId", access_key_id)?;
        let call = Call::delete(path, "Failed to delete access key");
        self.execute(call).await
    }

    pub async fn list_roles(&self) -> ClientResult<Vec<Role>> {
        let call = Call::get(roles(), "Failed to fetch roles");
        self.fetch_list(call, Envelope::Field("roles")).await
    }

    pub async fn create_role(&self, input: &CreateRoleInput) -> ClientResult<Role> {
        let call = Call::post(roles(), "Failed to create role").json(input)?;
        let output: RoleOutput = self.fetch(call).await?;
        Ok(output.role)
    }

    pub async fn delete_role(&self, role_name: &str) -> ClientResult<()> {
        let call = Call::delete(roles().id("roleName", role_name)?, "Failed to delete role");
        self.execute(call).await
    }

    pub async fn list_attached_role_policies(
        &self,
        role_name: &str,
    ) -> ClientResult<Vec<AttachedPolicy>> {
        let path = roles().id("roleName", role_name)?.lit("policies");
        let call = Call::get(path, "Failed to fetch attached policies");
        self.fetch_list(call, Envelope::Field("attachedPolicies")).await
    }

    pub async fn attach_role_policy(
        &self,
        role_name: &str,
        input: &AttachRolePolicyInput,
    ) -> ClientResult<()> {
        let path = roles().id("roleName", role_name)?.lit("policies");
        let call = Call::post(path, "Failed to attach policy").json(input)?;
        self.execute(call).await
    }

    pub async fn detach_role_policy(&self, role_name: &str, policy_arn: &str) -> ClientResult<()> {
        let path = roles()
            .id("roleName", role_name)?
            .lit("policies")
            .id("policyArn", policy_arn)?;
        let call = Call::delete(path, "Failed to detach policy");
        self.execute(call).await
    }

    pub async fn list_policies(&self, options: &PoliciesOptions) -> ClientResult<Vec<Policy>> {
        let call = Call::get(policies(), "Failed to fetch policies").query(options)?;
        self.fetch_list(call, Envelope::Field("policies")).await
    }

    /// Policy metadata plus its default version document.
    pub async fn get_policy(&self, policy_arn: &str) -> ClientResult<PolicyDetail> {
        let call = Call::get(policies().id("policyArn", policy_arn)?, "Failed to fetch policy");
        self.fetch(call).await
    }

    pub async fn create_policy(&self, input: &CreatePolicyInput) -> ClientResult<Policy> {
        let call = Call::post(policies(), "Failed to create policy").json(input)?;
        let output: PolicyOutput = self.fetch(call).await?;
        Ok(output.policy)
    }

    pub async fn delete_policy(&self, policy_arn: &str) -> ClientResult<()> {
        let call = Call::delete(policies().id("policyArn", policy_arn)?, "Failed to delete policy");
        self.execute(call).await
    }
}

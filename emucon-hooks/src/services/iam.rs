use emucon_core::iam::{
    AccessKey, AccessKeyMetadata, AttachRolePolicyInput, AttachedPolicy, CreatePolicyInput,
    CreateRoleInput, CreateUserInput, PoliciesOptions, Policy, PolicyDetail, Role, User,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_users(&self, enabled: bool) -> QueryHandle<Vec<User>> {
        self.query(keys::users(), QueryOptions::enabled(enabled), |client| async move {
            client.list_users().await
        })
    }

    /// Views keep this disabled until the access-key dialog opens.
    pub fn use_access_keys(&self, user_name: &str, enabled: bool) -> QueryHandle<Vec<AccessKeyMetadata>> {
        let name = user_name.to_string();
        self.query(keys::access_keys(user_name), gate(enabled, &[user_name]), move |client| {
            let name = name.clone();
            async move { client.list_access_keys(&name).await }
        })
    }

    pub fn use_roles(&self, enabled: bool) -> QueryHandle<Vec<Role>> {
        self.query(keys::roles(), QueryOptions::enabled(enabled), |client| async move {
            client.list_roles().await
        })
    }

    pub fn use_role_policies(&self, role_name: &str, enabled: bool) -> QueryHandle<Vec<AttachedPolicy>> {
        let name = role_name.to_string();
        self.query(keys::role_policies(role_name), gate(enabled, &[role_name]), move |client| {
            let name = name.clone();
            async move { client.list_attached_role_policies(&name).await }
        })
    }

    pub fn use_policies(&self, options: PoliciesOptions, enabled: bool) -> QueryHandle<Vec<Policy>> {
        let key = keys::policies_key(&options);
        self.query(key, QueryOptions::enabled(enabled), move |client| {
            let options = options.clone();
            async move { client.list_policies(&options).await }
        })
    }

    pub fn use_policy(&self, policy_arn: &str, enabled: bool) -> QueryHandle<PolicyDetail> {
        let arn = policy_arn.to_string();
        self.query(keys::policy(policy_arn), gate(enabled, &[policy_arn]), move |client| {
            let arn = arn.clone();
            async move { client.get_policy(&arn).await }
        })
    }

    pub fn use_create_user(&self) -> Mutation<CreateUserInput, User> {
        self.mutation(
            Messages::new("User created", "Failed to create user"),
            |_: &CreateUserInput| Write::CreateUser,
            |client, input: CreateUserInput| async move { client.create_user(&input).await },
        )
    }

    pub fn use_delete_user(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("User deleted", "Failed to delete user"),
            |name: &String| Write::DeleteUser {
                user_name: name.clone(),
            },
            |client, name: String| async move { client.delete_user(&name).await },
        )
    }

    /// The returned key carries the secret; it is shown once and not cached.
    pub fn use_create_access_key(&self) -> Mutation<String, AccessKey> {
        self.mutation(
            Messages::new("Access key created", "Failed to create access key"),
            |name: &String| Write::CreateAccessKey {
                user_name: name.clone(),
            },
            |client, name: String| async move { client.create_access_key(&name).await },
        )
    }

    /// Input is `(user_name, access_key_id)`.
    pub fn use_delete_access_key(&self) -> Mutation<(String, String), ()> {
        self.mutation(
            Messages::new("Access key deleted", "Failed to delete access key"),
            |(name, _): &(String, String)| Write::DeleteAccessKey {
                user_name: name.clone(),
            },
            |client, (name, key_id): (String, String)| async move {
                client.delete_access_key(&name, &key_id).await
            },
        )
    }

    pub fn use_create_role(&self) -> Mutation<CreateRoleInput, Role> {
        self.mutation(
            Messages::new("Role created", "Failed to create role"),
            |_: &CreateRoleInput| Write::CreateRole,
            |client, input: CreateRoleInput| async move { client.create_role(&input).await },
        )
    }

    pub fn use_delete_role(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Role deleted", "Failed to delete role"),
            |name: &String| Write::DeleteRole {
                role_name: name.clone(),
            },
            |client, name: String| async move { client.delete_role(&name).await },
        )
    }

    /// Input is `(role_name, policy)`.
    pub fn use_attach_role_policy(&self) -> Mutation<(String, AttachRolePolicyInput), ()> {
        self.mutation(
            Messages::new("Policy attached", "Failed to attach policy"),
            |(name, _): &(String, AttachRolePolicyInput)| Write::AttachRolePolicy {
                role_name: name.clone(),
            },
            |client, (name, input): (String, AttachRolePolicyInput)| async move {
                client.attach_role_policy(&name, &input).await
            },
        )
    }

    /// Input is `(role_name, policy_arn)`.
    pub fn use_detach_role_policy(&self) -> Mutation<(String, String), ()> {
        self.mutation(
            Messages::new("Policy detached", "Failed to detach policy"),
            |(name, _): &(String, String)| Write::DetachRolePolicy {
                role_name: name.clone(),
            },
            |client, (name, arn): (String, String)| async move {
                client.detach_role_policy(&name, &arn).await
            },
        )
    }

    pub fn use_create_policy(&self) -> Mutation<CreatePolicyInput, Policy> {
        self.mutation(
            Messages::new("Policy created", "Failed to create policy"),
            |_: &CreatePolicyInput| Write::CreatePolicy,
            |client, input: CreatePolicyInput| async move { client.create_policy(&input).await },
        )
    }

    pub fn use_delete_policy(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Policy deleted", "Failed to delete policy"),
            |arn: &String| Write::DeletePolicy {
                policy_arn: arn.clone(),
            },
            |client, arn: String| async move { client.delete_policy(&arn).await },
        )
    }
}

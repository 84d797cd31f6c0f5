//! Create forms.
//!
//! Each form collects text fields, validates them synchronously into a
//! typed create input and only then hands the input to the matching
//! mutation. Validation failures stay inside the form.

use std::collections::BTreeMap;

use crossterm::event::KeyEvent;
use emucon_core::apigateway::{CreateRestApiInput, EndpointConfiguration};
use emucon_core::cloudwatch::CreateLogGroupInput;
use emucon_core::dynamodb::CreateTableInput;
use emucon_core::eventbridge::CreateEventBusInput;
use emucon_core::iam::{CreatePolicyInput, CreateUserInput};
use emucon_core::s3::CreateBucketInput;
use emucon_core::secrets::CreateSecretInput;
use emucon_core::sqs::CreateQueueInput;
use emucon_core::{ClientResult, Service, ValidationError};
use emucon_hooks::Hooks;
use ratatui::style::{Modifier, Style};
use tui_textarea::TextArea;

/// Retention periods CloudWatch Logs accepts.
pub const RETENTION_DAYS: &[i32] = &[
    1, 3, 5, 7, 14, 30, 60, 90, 120, 150, 180, 365, 400, 545, 731, 1096, 1827, 2192, 2557, 2922,
    3288, 3653,
];

/// Longest SQS visibility timeout, twelve hours.
pub const MAX_VISIBILITY_TIMEOUT: i32 = 43_200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Required,
    Optional,
    /// Optional whole number.
    Number,
    /// Required JSON document.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub label: &'static str,
    pub kind: FieldKind,
}

const fn field(label: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { label, kind }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    LogGroup,
    Bucket,
    Queue,
    Table,
    RestApi,
    User,
    Policy,
    EventBus,
    Secret,
}

impl FormKind {
    /// Create forms offered by a service view, in menu order.
    pub fn for_service(service: Service) -> &'static [FormKind] {
        match service {
            Service::ApiGateway => &[FormKind::RestApi],
            Service::CloudWatch => &[FormKind::LogGroup],
            Service::DynamoDb => &[FormKind::Table],
            Service::EventBridge => &[FormKind::EventBus],
            Service::Iam => &[FormKind::User, FormKind::Policy],
            Service::S3 => &[FormKind::Bucket],
            Service::Sqs => &[FormKind::Queue],
            Service::SecretsManager => &[FormKind::Secret],
            Service::CloudFormation | Service::Lambda | Service::Scheduler => &[],
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            FormKind::LogGroup => "Create log group",
            FormKind::Bucket => "Create bucket",
            FormKind::Queue => "Create queue",
            FormKind::Table => "Create table",
            FormKind::RestApi => "Create REST API",
            FormKind::User => "Create user",
            FormKind::Policy => "Create policy",
            FormKind::EventBus => "Create event bus",
            FormKind::Secret => "Create secret",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        use FieldKind::*;
        match self {
            FormKind::LogGroup => const { &[
                field("Log group name", Required),
                field("Retention (days)", Number),
            ] },
            FormKind::Bucket => const { &[field("Bucket name", Required)] },
            FormKind::Queue => const { &[
                field("Queue name", Required),
                field("Visibility timeout (s)", Number),
            ] },
            FormKind::Table => const { &[
                field("Table name", Required),
                field("Partition key", Required),
            ] },
            FormKind::RestApi => const { &[
                field("API name", Required),
                field("Description", Optional),
            ] },
            FormKind::User => const { &[field("User name", Required), field("Path", Optional)] },
            FormKind::Policy => const { &[
                field("Policy name", Required),
                field("Policy document", Json),
                field("Description", Optional),
            ] },
            FormKind::EventBus => const { &[field("Event bus name", Required)] },
            FormKind::Secret => const { &[
                field("Secret name", Required),
                field("Secret value", Required),
                field("Description", Optional),
            ] },
        }
    }

    /// Check `values` (one per field, in order) and build the create input.
    pub fn validate(&self, values: &[String]) -> Result<FormInput, ValidationError> {
        let specs = self.fields();
        let mut checked = Vec::with_capacity(specs.len());
        for (index, spec) in specs.iter().enumerate() {
            let raw = values.get(index).map(|v| v.trim()).unwrap_or("");
            checked.push(check_field(spec, raw)?);
        }
        let text = |i: usize| checked[i].clone().unwrap_or_default();
        let optional = |i: usize| checked[i].clone();

        let input = match self {
            FormKind::LogGroup => {
                let name = text(0);
                validate_log_group_name(&name)?;
                let retention = parse_number(specs[1].label, optional(1))?;
                if let Some(days) = retention {
                    if !RETENTION_DAYS.contains(&days) {
                        return Err(ValidationError::invalid(
                            specs[1].label,
                            "not a supported retention period",
                        ));
                    }
                }
                FormInput::LogGroup(CreateLogGroupInput {
                    log_group_name: name,
                    retention_in_days: retention,
                })
            }
            FormKind::Bucket => {
                let name = text(0);
                validate_bucket_name(&name)?;
                FormInput::Bucket(CreateBucketInput { bucket_name: name })
            }
            FormKind::Queue => {
                let name = text(0);
                validate_queue_name(&name)?;
                let mut attributes = BTreeMap::new();
                if let Some(timeout) = parse_number(specs[1].label, optional(1))? {
                    if !(0..=MAX_VISIBILITY_TIMEOUT).contains(&timeout) {
                        return Err(ValidationError::invalid(
                            specs[1].label,
                            format!("must be between 0 and {MAX_VISIBILITY_TIMEOUT}"),
                        ));
                    }
                    attributes.insert("VisibilityTimeout".to_string(), timeout.to_string());
                }
                let mut input = CreateQueueInput {
                    queue_name: name,
                    attributes,
                };
                if input.is_fifo() {
                    input
                        .attributes
                        .insert("FifoQueue".to_string(), "true".to_string());
                }
                FormInput::Queue(input)
            }
            FormKind::Table => {
                let name = text(0);
                validate_table_name(&name)?;
                FormInput::Table(CreateTableInput::with_string_key(name, text(1)))
            }
            FormKind::RestApi => FormInput::RestApi(CreateRestApiInput {
                name: text(0),
                description: optional(1),
                endpoint_configuration: Some(EndpointConfiguration::regional()),
            }),
            FormKind::User => {
                let name = text(0);
                validate_iam_name(specs[0].label, &name, 64)?;
                let path = optional(1);
                if let Some(path) = &path {
                    if !(path.starts_with('/') && path.ends_with('/')) {
                        return Err(ValidationError::invalid(
                            specs[1].label,
                            "must begin and end with /",
                        ));
                    }
                }
                FormInput::User(CreateUserInput {
                    user_name: name,
                    path,
                })
            }
            FormKind::Policy => {
                let name = text(0);
                validate_iam_name(specs[0].label, &name, 128)?;
                FormInput::Policy(CreatePolicyInput {
                    policy_name: name,
                    policy_document: text(1),
                    description: optional(2),
                })
            }
            FormKind::EventBus => {
                let name = text(0);
                if name == "default" {
                    return Err(ValidationError::invalid(
                        specs[0].label,
                        "the default bus already exists",
                    ));
                }
                FormInput::EventBus(CreateEventBusInput { name })
            }
            FormKind::Secret => FormInput::Secret(CreateSecretInput {
                name: text(0),
                secret_string: text(1),
                description: optional(2),
            }),
        };
        Ok(input)
    }
}

/// Presence and JSON checks shared by every form. Returns the trimmed value,
/// or `None` for an empty optional field.
fn check_field(spec: &FieldSpec, raw: &str) -> Result<Option<String>, ValidationError> {
    if raw.is_empty() {
        return match spec.kind {
            FieldKind::Required | FieldKind::Json => Err(ValidationError::required(spec.label)),
            FieldKind::Optional | FieldKind::Number => Ok(None),
        };
    }
    if spec.kind == FieldKind::Json {
        if let Err(err) = serde_json::from_str::<serde_json::Value>(raw) {
            return Err(ValidationError::InvalidJson {
                field: spec.label.to_string(),
                reason: err.to_string(),
            });
        }
    }
    Ok(Some(raw.to_string()))
}

fn parse_number(label: &str, value: Option<String>) -> Result<Option<i32>, ValidationError> {
    value
        .map(|v| {
            v.parse::<i32>()
                .map_err(|_| ValidationError::invalid(label, "must be a whole number"))
        })
        .transpose()
}

fn validate_log_group_name(name: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "_-/.#".contains(c);
    if name.len() > 512 || !name.chars().all(allowed) {
        return Err(ValidationError::invalid(
            "Log group name",
            "use up to 512 letters, digits and _ - / . #",
        ));
    }
    Ok(())
}

fn validate_bucket_name(name: &str) -> Result<(), ValidationError> {
    let label = "Bucket name";
    if !(3..=63).contains(&name.len()) {
        return Err(ValidationError::invalid(label, "must be 3 to 63 characters"));
    }
    let allowed = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.' || c == '-';
    if !name.chars().all(allowed) {
        return Err(ValidationError::invalid(
            label,
            "use lowercase letters, digits, dots and hyphens",
        ));
    }
    let edge = |c: Option<char>| c.is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
    if !edge(name.chars().next()) || !edge(name.chars().last()) {
        return Err(ValidationError::invalid(
            label,
            "must begin and end with a letter or digit",
        ));
    }
    Ok(())
}

fn validate_queue_name(name: &str) -> Result<(), ValidationError> {
    let base = name.strip_suffix(".fifo").unwrap_or(name);
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_';
    if base.is_empty() || name.len() > 80 || !base.chars().all(allowed) {
        return Err(ValidationError::invalid(
            "Queue name",
            "use up to 80 letters, digits, - and _ (optionally ending in .fifo)",
        ));
    }
    Ok(())
}

fn validate_table_name(name: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "_-.".contains(c);
    if !(3..=255).contains(&name.len()) || !name.chars().all(allowed) {
        return Err(ValidationError::invalid(
            "Table name",
            "use 3 to 255 letters, digits and _ - .",
        ));
    }
    Ok(())
}

fn validate_iam_name(label: &str, name: &str, max: usize) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || "+=,.@_-".contains(c);
    if name.len() > max || !name.chars().all(allowed) {
        return Err(ValidationError::invalid(
            label,
            format!("use up to {max} letters, digits and + = , . @ _ -"),
        ));
    }
    Ok(())
}

/// A validated create request.
#[derive(Debug, Clone, PartialEq)]
pub enum FormInput {
    LogGroup(CreateLogGroupInput),
    Bucket(CreateBucketInput),
    Queue(CreateQueueInput),
    Table(CreateTableInput),
    RestApi(CreateRestApiInput),
    User(CreateUserInput),
    Policy(CreatePolicyInput),
    EventBus(CreateEventBusInput),
    Secret(CreateSecretInput),
}

impl FormInput {
    /// Run the matching create mutation. Toasts and invalidation happen in
    /// the mutation itself.
    pub async fn submit(self, hooks: &Hooks) -> ClientResult<()> {
        match self {
            FormInput::LogGroup(input) => hooks.use_create_log_group().mutate_async(input).await,
            FormInput::Bucket(input) => hooks.use_create_bucket().mutate_async(input).await,
            FormInput::Queue(input) => hooks
                .use_create_queue()
                .mutate_async(input)
                .await
                .map(|_| ()),
            FormInput::Table(input) => hooks.use_create_table().mutate_async(input).await,
            FormInput::RestApi(input) => hooks
                .use_create_rest_api()
                .mutate_async(input)
                .await
                .map(|_| ()),
            FormInput::User(input) => hooks
                .use_create_user()
                .mutate_async(input)
                .await
                .map(|_| ()),
            FormInput::Policy(input) => hooks
                .use_create_policy()
                .mutate_async(input)
                .await
                .map(|_| ()),
            FormInput::EventBus(input) => hooks
                .use_create_event_bus()
                .mutate_async(input)
                .await
                .map(|_| ()),
            FormInput::Secret(input) => hooks
                .use_create_secret()
                .mutate_async(input)
                .await
                .map(|_| ()),
        }
    }
}

pub struct FormField {
    pub spec: FieldSpec,
    pub input: TextArea<'static>,
}

impl FormField {
    fn new(spec: FieldSpec) -> Self {
        Self {
            spec,
            input: TextArea::default(),
        }
    }

    /// Field content with lines joined, so pasted JSON keeps its layout.
    pub fn value(&self) -> String {
        self.input.lines().join("\n")
    }
}

/// An open create dialog.
pub struct Form {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<ValidationError>,
    /// Set while the mutation runs; cleared when it fails.
    pub pending: bool,
}

impl Form {
    pub fn new(kind: FormKind) -> Self {
        let mut form = Self {
            kind,
            fields: kind.fields().iter().copied().map(FormField::new).collect(),
            focus: 0,
            error: None,
            pending: false,
        };
        form.set_focus(0);
        form
    }

    pub fn values(&self) -> Vec<String> {
        self.fields.iter().map(FormField::value).collect()
    }

    pub fn set_value(&mut self, index: usize, value: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.input = TextArea::new(value.lines().map(str::to_string).collect());
        }
        self.set_focus(self.focus);
    }

    pub fn focus_next(&mut self) {
        self.set_focus((self.focus + 1) % self.fields.len().max(1));
    }

    pub fn focus_previous(&mut self) {
        let len = self.fields.len().max(1);
        self.set_focus((self.focus + len - 1) % len);
    }

    fn set_focus(&mut self, index: usize) {
        self.focus = index;
        for (i, field) in self.fields.iter_mut().enumerate() {
            let cursor = if i == index {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            field.input.set_cursor_style(cursor);
            field.input.set_cursor_line_style(Style::default());
        }
    }

    /// Forward a key to the focused field.
    pub fn input(&mut self, key: KeyEvent) {
        if self.pending {
            return;
        }
        if let Some(field) = self.fields.get_mut(self.focus) {
            field.input.input(key);
        }
    }

    pub fn validate(&self) -> Result<FormInput, ValidationError> {
        self.kind.validate(&self.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_required_field_is_reported_by_label() {
        let err = FormKind::Bucket.validate(&values(&["  "])).unwrap_err();
        assert_eq!(err, ValidationError::required("Bucket name"));
    }

    #[test]
    fn test_log_group_retention_must_be_supported() {
        let err = FormKind::LogGroup
            .validate(&values(&["/aws/lambda/f", "10"]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidValue { .. }));

        let input = FormKind::LogGroup
            .validate(&values(&["/aws/lambda/f", "14"]))
            .unwrap();
        assert_eq!(
            input,
            FormInput::LogGroup(CreateLogGroupInput {
                log_group_name: "/aws/lambda/f".to_string(),
                retention_in_days: Some(14),
            })
        );
    }

    #[test]
    fn test_policy_document_must_be_json() {
        let err = FormKind::Policy
            .validate(&values(&["ReadOnly", "{not json", ""]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidJson { ref field, .. } if field == "Policy document"));
    }

    #[test]
    fn test_fifo_queue_gets_fifo_attribute() {
        let input = FormKind::Queue.validate(&values(&["jobs.fifo", "30"])).unwrap();
        let FormInput::Queue(queue) = input else {
            panic!("expected queue input");
        };
        assert_eq!(queue.attributes.get("FifoQueue").map(String::as_str), Some("true"));
        assert_eq!(
            queue.attributes.get("VisibilityTimeout").map(String::as_str),
            Some("30")
        );
    }

    #[test]
    fn test_non_numeric_timeout_is_rejected() {
        let err = FormKind::Queue.validate(&values(&["jobs", "soon"])).unwrap_err();
        assert_eq!(
            err,
            ValidationError::invalid("Visibility timeout (s)", "must be a whole number")
        );
    }

    #[test]
    fn test_form_collects_textarea_values() {
        let mut form = Form::new(FormKind::RestApi);
        form.set_value(0, "orders");
        form.focus_next();
        assert_eq!(form.focus, 1);
        let input = form.validate().unwrap();
        let FormInput::RestApi(api) = input else {
            panic!("expected REST API input");
        };
        assert_eq!(api.name, "orders");
        assert_eq!(api.description, None);
    }
}

use emucon_core::eventbridge::{
    CreateEventBusInput, CreateEventBusOutput, EventBus, FailedEntryCount, PutEventsInput,
    PutRuleInput, PutRuleOutput, PutTargetsInput, Rule, RulesOptions, Target,
};
use emucon_core::{ClientResult, Service};

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn buses() -> ApiPath {
    ApiPath::new(Service::EventBridge).lit("buses")
}

fn rules() -> ApiPath {
    ApiPath::new(Service::EventBridge).lit("rules")
}

impl RestClient {
    pub async fn list_event_buses(&self) -> ClientResult<Vec<EventBus>> {
        let call = Call::get(buses(), "Failed to fetch event buses");
        self.fetch_list(call, Envelope::Bare).await
    }

    pub async fn create_event_bus(
        &self,
        input: &CreateEventBusInput,
    ) -> ClientResult<CreateEventBusOutput> {
        let call = Call::post(buses(), "Failed to create event bus").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_event_bus(&self, name: &str) -> ClientResult<()> {
        let call = Call::delete(buses().id("busName", name)?, "Failed to delete event bus");
        self.execute(call).await
    }

    pub async fn list_rules(&self, options: &RulesOptions) -> ClientResult<Vec<Rule>> {
        let call = Call::get(rules(), "Failed to fetch rules").query(options)?;
        self.fetch_list(call, Envelope::Field("rules")).await
    }

    pub async fn put_rule(&self, input: &PutRuleInput) -> ClientResult<PutRuleOutput> {
        let call = Call::post(rules(), "Failed to save rule").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_rule(&self, rule_name: &str, bus: &RulesOptions) -> ClientResult<()> {
        let call = Call::delete(rules().id("ruleName", rule_name)?, "Failed to delete rule")
            .query(bus)?;
        self.execute(call).await
    }

    pub async fn list_targets(&self, rule_name: &str, bus: &RulesOptions) -> ClientResult<Vec<Target>> {
        let path = rules().id("ruleName", rule_name)?.lit("targets");
        let call = Call::get(path, "Failed to fetch targets").query(bus)?;
        self.fetch_list(call, Envelope::Bare).await
    }

    pub async fn put_targets(
        &self,
        rule_name: &str,
        input: &PutTargetsInput,
    ) -> ClientResult<FailedEntryCount> {
        let path = rules().id("ruleName", rule_name)?.lit("targets");
        let call = Call::put(path, "Failed to save targets").json(input)?;
        self.fetch(call).await
    }

    pub async fn put_events(&self, input: &PutEventsInput) -> ClientResult<FailedEntryCount> {
        let path = ApiPath::new(Service::EventBridge).lit("events");
        let call = Call::post(path, "Failed to send events").json(input)?;
        self.fetch(call).await
    }
}

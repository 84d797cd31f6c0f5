use emucon_core::cloudwatch::{
    AlarmsOptions, CreateLogGroupInput, LogEventsOptions, LogEventsPage, LogGroup, LogGroupPage,
    LogGroupsOptions, LogStream, LogStreamsOptions, Metric, MetricAlarm, MetricsOptions,
    PutMetricAlarmInput, PutRetentionInput, SetAlarmStateInput,
};
use emucon_core::{ClientResult, Page, Service};

use crate::request::{self, ApiPath, Call, Envelope};
use crate::RestClient;

fn log_groups() -> ApiPath {
    ApiPath::new(Service::CloudWatch).lit("log-groups")
}

fn log_group(name: &str) -> ClientResult<ApiPath> {
    log_groups().id("logGroupName", name)
}

fn alarms() -> ApiPath {
    ApiPath::new(Service::CloudWatch).lit("alarms")
}

impl RestClient {
    /// Log groups with the continuation token for the next page.
    pub async fn list_log_groups(&self, options: &LogGroupsOptions) -> ClientResult<LogGroupPage> {
        let fallback = "Failed to fetch log groups";
        let call = Call::get(log_groups(), fallback).query(options)?;
        let body = self.send(call).await?;
        let next_token = request::string_field(&body, "nextToken");
        let items: Vec<LogGroup> =
            request::unwrap_list(body, Envelope::Field("logGroups"), fallback)?;
        Ok(Page::new(items, next_token))
    }

    pub async fn create_log_group(&self, input: &CreateLogGroupInput) -> ClientResult<()> {
        let call = Call::post(log_groups(), "Failed to create log group").json(input)?;
        self.execute(call).await
    }

    pub async fn delete_log_group(&self, log_group_name: &str) -> ClientResult<()> {
        let call = Call::delete(log_group(log_group_name)?, "Failed to delete log group");
        self.execute(call).await
    }

    pub async fn put_retention_policy(
        &self,
        log_group_name: &str,
        input: &PutRetentionInput,
    ) -> ClientResult<()> {
        let path = log_group(log_group_name)?.lit("retention");
        let call = Call::put(path, "Failed to update retention").json(input)?;
        self.execute(call).await
    }

    pub async fn list_log_streams(
        &self,
        log_group_name: &str,
        options: &LogStreamsOptions,
    ) -> ClientResult<Vec<LogStream>> {
        let path = log_group(log_group_name)?.lit("streams");
        let call = Call::get(path, "Failed to fetch log streams").query(options)?;
        self.fetch_list(call, Envelope::Field("logStreams")).await
    }

    pub async fn get_log_events(
        &self,
        log_group_name: &str,
        options: &LogEventsOptions,
    ) -> ClientResult<LogEventsPage> {
        let path = log_group(log_group_name)?.lit("events");
        let call = Call::get(path, "Failed to fetch log events").query(options)?;
        let page: Option<LogEventsPage> = self.fetch(call).await?;
        Ok(page.unwrap_or_default())
    }

    pub async fn list_alarms(&self, options: &AlarmsOptions) -> ClientResult<Vec<MetricAlarm>> {
        let call = Call::get(alarms(), "Failed to fetch alarms").query(options)?;
        self.fetch_list(call, Envelope::Field("metricAlarms")).await
    }

    pub async fn put_metric_alarm(&self, input: &PutMetricAlarmInput) -> ClientResult<()> {
        let call = Call::post(alarms(), "Failed to create alarm").json(input)?;
        self.execute(call).await
    }

    pub async fn delete_alarm(&self, alarm_name: &str) -> ClientResult<()> {
        let call = Call::delete(alarms().id("alarmName", alarm_name)?, "Failed to delete alarm");
        self.execute(call).await
    }

    pub async fn set_alarm_state(
        &self,
        alarm_name: &str,
        input: &SetAlarmStateInput,
    ) -> ClientResult<()> {
        let path = alarms().id("alarmName", alarm_name)?.lit("state");
        let call = Call::put(path, "Failed to set alarm state").json(input)?;
        self.execute(call).await
    }

    pub async fn list_metrics(&self, options: &MetricsOptions) -> ClientResult<Vec<Metric>> {
        let path = ApiPath::new(Service::CloudWatch).lit("metrics");
        let call = Call::get(path, "Failed to fetch metrics").query(options)?;
        self.fetch_list(call, Envelope::Field("metrics")).await
    }
}

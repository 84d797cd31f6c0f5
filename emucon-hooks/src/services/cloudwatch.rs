use emucon_core::cloudwatch::{
    AlarmsOptions, CreateLogGroupInput, LogEventsOptions, LogEventsPage, LogGroupPage,
    LogGroupsOptions, LogStream, LogStreamsOptions, Metric, MetricAlarm, MetricsOptions,
    PutMetricAlarmInput, PutRetentionInput, SetAlarmStateInput,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_log_groups(&self, options: LogGroupsOptions, enabled: bool) -> QueryHandle<LogGroupPage> {
        let key = keys::log_groups_key(&options);
        self.query(key, QueryOptions::enabled(enabled), move |client| {
            let options = options.clone();
            async move { client.list_log_groups(&options).await }
        })
    }

    pub fn use_log_streams(
        &self,
        log_group_name: &str,
        options: LogStreamsOptions,
        enabled: bool,
    ) -> QueryHandle<Vec<LogStream>> {
        let key = keys::log_streams_key(log_group_name, &options);
        let name = log_group_name.to_string();
        self.query(key, gate(enabled, &[log_group_name]), move |client| {
            let (name, options) = (name.clone(), options.clone());
            async move { client.list_log_streams(&name, &options).await }
        })
    }

    /// With `start_from_head: Some(false)` the query is in tail mode and
    /// polls every [`crate::HooksConfig::log_tail_interval`] while enabled.
    pub fn use_log_events(
        &self,
        log_group_name: &str,
        options: LogEventsOptions,
        enabled: bool,
    ) -> QueryHandle<LogEventsPage> {
        let key = keys::log_events_key(log_group_name, &options);
        let mut query_options = gate(enabled, &[log_group_name]);
        if options.start_from_head == Some(false) {
            query_options = query_options.with_refetch_interval(self.config().log_tail_interval);
        }
        let name = log_group_name.to_string();
        self.query(key, query_options, move |client| {
            let (name, options) = (name.clone(), options.clone());
            async move { client.get_log_events(&name, &options).await }
        })
    }

    pub fn use_alarms(&self, options: AlarmsOptions, enabled: bool) -> QueryHandle<Vec<MetricAlarm>> {
        let key = keys::alarms_key(&options);
        self.query(key, QueryOptions::enabled(enabled), move |client| {
            let options = options.clone();
            async move { client.list_alarms(&options).await }
        })
    }

    pub fn use_metrics(&self, options: MetricsOptions, enabled: bool) -> QueryHandle<Vec<Metric>> {
        let key = keys::metrics_key(&options);
        self.query(key, QueryOptions::enabled(enabled), move |client| {
            let options = options.clone();
            async move { client.list_metrics(&options).await }
        })
    }

    pub fn use_create_log_group(&self) -> Mutation<CreateLogGroupInput, ()> {
        self.mutation(
            Messages::new("Log group created", "Failed to create log group"),
            |_: &CreateLogGroupInput| Write::CreateLogGroup,
            |client, input: CreateLogGroupInput| async move { client.create_log_group(&input).await },
        )
    }

    pub fn use_delete_log_group(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Log group deleted", "Failed to delete log group"),
            |name: &String| Write::DeleteLogGroup {
                log_group_name: name.clone(),
            },
            |client, name: String| async move { client.delete_log_group(&name).await },
        )
    }

    /// Input is `(log_group_name, retention)`.
    pub fn use_put_retention_policy(&self) -> Mutation<(String, PutRetentionInput), ()> {
        self.mutation(
            Messages::new("Retention policy updated", "Failed to update retention policy"),
            |_: &(String, PutRetentionInput)| Write::PutRetentionPolicy,
            |client, (name, input): (String, PutRetentionInput)| async move {
                client.put_retention_policy(&name, &input).await
            },
        )
    }

    pub fn use_put_metric_alarm(&self) -> Mutation<PutMetricAlarmInput, ()> {
        self.mutation(
            Messages::new("Alarm saved", "Failed to save alarm"),
            |_: &PutMetricAlarmInput| Write::PutMetricAlarm,
            |client, input: PutMetricAlarmInput| async move { client.put_metric_alarm(&input).await },
        )
    }

    pub fn use_delete_alarm(&self) -> Mutation<String, ()> {
        self.mutation(
            Messages::new("Alarm deleted", "Failed to delete alarm"),
            |_: &String| Write::DeleteAlarm,
            |client, name: String| async move { client.delete_alarm(&name).await },
        )
    }

    /// Input is `(alarm_name, state)`.
    pub fn use_set_alarm_state(&self) -> Mutation<(String, SetAlarmStateInput), ()> {
        self.mutation(
            Messages::new("Alarm state updated", "Failed to set alarm state"),
            |_: &(String, SetAlarmStateInput)| Write::SetAlarmState,
            |client, (name, input): (String, SetAlarmStateInput)| async move {
                client.set_alarm_state(&name, &input).await
            },
        )
    }
}

use emucon_core::scheduler::{
    CreateScheduleInput, Schedule, ScheduleArnOutput, ScheduleGroup, ScheduleGroupQuery,
    ScheduleSummary, SchedulesOptions, UpdateScheduleInput,
};
use emucon_query::{Mutation, QueryHandle, QueryOptions};

use crate::{gate, keys, Hooks, Messages, Write};

impl Hooks {
    pub fn use_schedules(
        &self,
        options: SchedulesOptions,
        enabled: bool,
    ) -> QueryHandle<Vec<ScheduleSummary>> {
        let key = keys::schedules_key(&options);
        self.query(key, QueryOptions::enabled(enabled), move |client| {
            let options = options.clone();
            async move { client.list_schedules(&options).await }
        })
    }

    pub fn use_schedule(
        &self,
        name: &str,
        group: ScheduleGroupQuery,
        enabled: bool,
    ) -> QueryHandle<Schedule> {
        let key = keys::schedule_key(name, &group);
        let name_owned = name.to_string();
        self.query(key, gate(enabled, &[name]), move |client| {
            let (name, group) = (name_owned.clone(), group.clone());
            async move { client.get_schedule(&name, &group).await }
        })
    }

    pub fn use_schedule_groups(&self, enabled: bool) -> QueryHandle<Vec<ScheduleGroup>> {
        self.query(keys::schedule_groups(), QueryOptions::enabled(enabled), |client| async move {
            client.list_schedule_groups().await
        })
    }

    pub fn use_create_schedule(&self) -> Mutation<CreateScheduleInput, ScheduleArnOutput> {
        self.mutation(
            Messages::new("Schedule created", "Failed to create schedule"),
            |_: &CreateScheduleInput| Write::CreateSchedule,
            |client, input: CreateScheduleInput| async move { client.create_schedule(&input).await },
        )
    }

    /// Input is `(name, changes)`.
    pub fn use_update_schedule(&self) -> Mutation<(String, UpdateScheduleInput), ScheduleArnOutput> {
        self.mutation(
            Messages::new("Schedule updated", "Failed to update schedule"),
            |(name, _): &(String, UpdateScheduleInput)| Write::UpdateSchedule { name: name.clone() },
            |client, (name, input): (String, UpdateScheduleInput)| async move {
                client.update_schedule(&name, &input).await
            },
        )
    }

    /// Input is `(name, group)`.
    pub fn use_delete_schedule(&self) -> Mutation<(String, ScheduleGroupQuery), ()> {
        self.mutation(
            Messages::new("Schedule deleted", "Failed to delete schedule"),
            |(name, _): &(String, ScheduleGroupQuery)| Write::DeleteSchedule { name: name.clone() },
            |client, (name, group): (String, ScheduleGroupQuery)| async move {
                client.delete_schedule(&name, &group).await
            },
        )
    }
}

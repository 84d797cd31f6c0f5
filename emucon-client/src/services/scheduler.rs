use emucon_core::scheduler::{
    CreateScheduleInput, Schedule, ScheduleArnOutput, ScheduleGroup, ScheduleGroupQuery,
    ScheduleSummary, SchedulesOptions, UpdateScheduleInput,
};
use emucon_core::{ClientResult, Service};

use crate::request::{ApiPath, Call, Envelope};
use crate::RestClient;

fn schedules() -> ApiPath {
    ApiPath::new(Service::Scheduler).lit("schedules")
}

fn schedule(name: &str) -> ClientResult<ApiPath> {
    schedules().id("scheduleName", name)
}

impl RestClient {
    pub async fn list_schedules(
        &self,
        options: &SchedulesOptions,
    ) -> ClientResult<Vec<ScheduleSummary>> {
        let call = Call::get(schedules(), "Failed to fetch schedules").query(options)?;
        self.fetch_list(call, Envelope::Bare).await
    }

    pub async fn get_schedule(&self, name: &str, group: &ScheduleGroupQuery) -> ClientResult<Schedule> {
        let call = Call::get(schedule(name)?, "Failed to fetch schedule").query(group)?;
        self.fetch(call).await
    }

    pub async fn create_schedule(
        &self,
        input: &CreateScheduleInput,
    ) -> ClientResult<ScheduleArnOutput> {
        let call = Call::post(schedules(), "Failed to create schedule").json(input)?;
        self.fetch(call).await
    }

    pub async fn update_schedule(
        &self,
        name: &str,
        input: &UpdateScheduleInput,
    ) -> ClientResult<ScheduleArnOutput> {
        let call = Call::put(schedule(name)?, "Failed to update schedule").json(input)?;
        self.fetch(call).await
    }

    pub async fn delete_schedule(&self, name: &str, group: &ScheduleGroupQuery) -> ClientResult<()> {
        let call = Call::delete(schedule(name)?, "Failed to delete schedule").query(group)?;
        self.execute(call).await
    }

    pub async fn list_schedule_groups(&self) -> ClientResult<Vec<ScheduleGroup>> {
        let path = ApiPath::new(Service::Scheduler).lit("groups");
        let call = Call::get(path, "Failed to fetch schedule groups");
        self.fetch_list(call, Envelope::Bare).await
    }
}

use log::debug;
use serde_json::{json, Value};

use crate::error::Error;
use crate::models::trigger::{Trigger, TriggerStatus};
use crate::session::ZabbixApi;

impl ZabbixApi {
    /// Returns whether a trigger with this id exists.
    pub async fn trigger_exists(&mut self, triggerid: &str) -> Result<bool, Error> {
        let found: Vec<Trigger> = self
            .call(
                "trigger.get",
                json!({
                    "filter": {"triggerid": triggerid},
                    "output": "triggerid",
                }),
            )
            .await?;

        debug!("trigger.get matched {} trigger(s) for id {}", found.len(), triggerid);
        Ok(!found.is_empty())
    }

    /// Sets the trigger status. The update result is returned untouched.
    pub async fn set_trigger_status(
        &mut self,
        triggerid: &str,
        status: TriggerStatus,
    ) -> Result<Value, Error> {
        self.call(
            "trigger.update",
            json!({
                "triggerid": triggerid,
                "status": status.code(),
            }),
        )
        .await
    }

    /// Reads description (with macros expanded) and status of one trigger.
    pub async fn get_trigger(&mut self, triggerid: &str) -> Result<Option<Trigger>, Error> {
        let found: Vec<Trigger> = self
            .call(
                "trigger.get",
                json!({
                    "filter": {"triggerid": triggerid},
                    "output": ["description", "status"],
                    "expandDescription": 1,
                }),
            )
            .await?;

        Ok(found.into_iter().next())
    }
}

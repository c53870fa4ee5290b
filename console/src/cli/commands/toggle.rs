// commands
// <triggerid> (-E | -D)

// Render
// <Enabled/Disabled> : <trigger description>

use anyhow::{anyhow, bail, Result};
use clap::builder::NonEmptyStringValueParser;
use clap::Args;
use log::{debug, info};
use zabbix::{TriggerStatus, ZabbixApi};

#[derive(Debug, Args)]
pub struct Toggle {
    /// Numeric trigger ID to change status on
    #[clap(value_parser = NonEmptyStringValueParser::new())]
    triggerid: String,

    #[clap(flatten)]
    target: Target,
}

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct Target {
    /// Set trigger to enabled
    #[clap(short = 'E', long)]
    enable: bool,

    /// Set trigger to disabled
    #[clap(short = 'D', long)]
    disable: bool,
}

impl Target {
    fn status(&self) -> Option<TriggerStatus> {
        match (self.enable, self.disable) {
            (true, false) => Some(TriggerStatus::Enabled),
            (false, true) => Some(TriggerStatus::Disabled),
            _ => None,
        }
    }
}

impl Toggle {
    #[cfg(test)]
    fn new(triggerid: impl Into<String>, status: TriggerStatus) -> Self {
        Toggle {
            triggerid: triggerid.into(),
            target: Target {
                enable: status == TriggerStatus::Enabled,
                disable: status == TriggerStatus::Disabled,
            },
        }
    }

    pub async fn run(self, api: &mut ZabbixApi) -> Result<()> {
        let line = self.apply(api).await?;
        println!("{}", line);
        Ok(())
    }

    /// Switches the trigger and returns the `<Mode> : <Description>` line
    /// read back from the server after the update.
    pub async fn apply(&self, api: &mut ZabbixApi) -> Result<String> {
        if self.triggerid.trim().is_empty() {
            bail!("Triggerid not found");
        }
        let status = self
            .target
            .status()
            .ok_or_else(|| anyhow!("Trigger status not provided"))?;

        if !api.trigger_exists(&self.triggerid).await? {
            bail!("Trigger not found");
        }

        info!("Setting trigger {} to {}", self.triggerid, status);
        api.set_trigger_status(&self.triggerid, status).await?;

        let trigger = api.get_trigger(&self.triggerid).await?;
        let Some(trigger) = trigger else {
            debug!("Trigger {} vanished after update", self.triggerid);
            bail!("Something went wrong!");
        };
        let Some(mode) = trigger.status() else {
            debug!("Trigger {} reports status {:?}", self.triggerid, trigger.status);
            bail!("Something went wrong!");
        };

        Ok(format!("{} : {}", mode, trigger.description))
    }
}

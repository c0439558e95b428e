//! Enable command - run the module's enable precondition

use anyhow::Result;
use cartkit_twocheckout::Twocheckout;

use crate::gateway::DemoGateway;
use crate::ui;

pub async fn run(without_gateway: bool, without_completion: bool, _verbose: bool) -> Result<()> {
    let host = super::build_host(true).await?;

    if without_gateway {
        host.gateways.unregister(Twocheckout::GATEWAY_NAME);
        ui::info("Gateway registration dropped");
    } else if without_completion {
        host.gateways
            .register(Box::new(DemoGateway::without_completion()));
        ui::info("Gateway replaced with one that cannot confirm returns");
    }

    match host.modules.enable(Twocheckout::MODULE_NAME).await {
        Ok(()) => ui::success("Enable precondition passed; module enabled"),
        Err(error) => ui::error(&format!("Cannot enable: {}", error)),
    }

    Ok(())
}

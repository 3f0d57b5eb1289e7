use std::{io::Result, sync::Arc};

use ream_consensus_beacon::beacon_state::BeaconState;
use ream_duties::{resolver::AttesterDutiesResolver, traits::SlotClock};
use ream_rpc_common::{config::RpcServerConfig, server::RpcServerBuilder};

use crate::routes::register_routers;

/// Start the Beacon API server.
pub async fn start(
    server_config: RpcServerConfig,
    resolver: AttesterDutiesResolver<BeaconState>,
    slot_clock: Arc<dyn SlotClock>,
) -> Result<()> {
    RpcServerBuilder::new(server_config.http_socket_address)
        .with_data(resolver)
        .with_data(slot_clock)
        .configure(register_routers)
        .start()
        .await
}

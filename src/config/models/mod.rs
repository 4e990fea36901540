pub mod gateway;
pub mod monitoring;
pub mod provider;
pub mod router;
pub mod server;

pub use gateway::GatewayConfig;
pub use monitoring::MonitoringConfig;
pub use provider::ProviderConfig;
pub use router::RouterSettings;
pub use server::ServerConfig;

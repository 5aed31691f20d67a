pub mod gateway;
pub mod loader;

pub use gateway::{
    DatabaseConfig, GatewayConfig, ModelConfig, ModelProvider, PipelineConfig, ServerConfig,
};
pub use loader::{CONFIG_CANDIDATES, load_config};

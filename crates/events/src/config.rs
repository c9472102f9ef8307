/// Event subsystem configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Broadcast buffer capacity of the site message channel
    /// (default: `1024`).
    pub channel_capacity: usize,
}

impl EventsConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `COURIER_CHANNEL_CAPACITY`  | `1024`  |
    pub fn from_env() -> Self {
        let channel_capacity: usize = std::env::var("COURIER_CHANNEL_CAPACITY")
            .unwrap_or_else(|_| "1024".into())
            .parse()
            .expect("COURIER_CHANNEL_CAPACITY must be a valid usize");

        Self { channel_capacity }
    }
}

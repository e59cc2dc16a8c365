pub struct CoreConfig {
    pub store_config: StoreConfig,
    pub anchor_config: AnchorConfig,
}

pub struct StoreConfig {
    /// Root of the records platform API, the consent routes live under `{base_url}/consents`.
    pub base_url: String,
}

pub struct AnchorConfig {
    pub mode: AnchorMode,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnchorMode {
    /// Activations carry a locally generated hash marked as a placeholder.
    Placeholder,
    /// Activations carry no hash; the backend records the real one.
    Delegated,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            store_config: StoreConfig {
                base_url: "http://localhost:3001/api".to_string(),
            },
            anchor_config: AnchorConfig {
                mode: AnchorMode::Placeholder,
            },
        }
    }
}

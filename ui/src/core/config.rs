//! Viewer configuration.

pub const DEFAULT_USERNAME: &str = "ddoemonn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// User loaded when the app opens without a username in the route.
    pub initial_username: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            initial_username: DEFAULT_USERNAME.to_string(),
        }
    }
}

impl ViewerConfig {
    /// Native builds honour `COMMITSCAPE_USER`; the web build always uses defaults.
    pub fn load() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            let mut config = Self::default();
            if let Some(user) = std::env::var("COMMITSCAPE_USER")
                .ok()
                .map(|user| user.trim().to_string())
                .filter(|user| !user.is_empty())
            {
                config.initial_username = user;
            }
            config
        }

        #[cfg(target_arch = "wasm32")]
        {
            Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_is_set() {
        assert_eq!(ViewerConfig::default().initial_username, DEFAULT_USERNAME);
    }
}

/// GlDriver configuration

/// Configuration for GlDriver creation
#[derive(Debug, Clone)]
pub struct GlDriverConfig {
    /// Install a GL debug message callback (needs the `gl-debug-output`
    /// feature and a context exposing KHR_debug or GL 4.3)
    pub debug_output: bool,
    /// Name used in the driver's log messages
    pub label: String,
}

impl Default for GlDriverConfig {
    fn default() -> Self {
        Self {
            debug_output: cfg!(debug_assertions),
            label: "Prism GL".to_string(),
        }
    }
}

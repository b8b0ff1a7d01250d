//! Per-codec configuration.

/// Depth limit protobuf implementations commonly use for nested messages.
pub const DEFAULT_RECURSION_LIMIT: usize = 100;

/// Behaviour switches for one [`Codec`](crate::Codec).
///
/// ```
/// use wirecodec::CodecConfig;
///
/// let config = CodecConfig::default().emit_defaults(true);
/// assert!(config.emit_defaults);
/// assert_eq!(config.recursion_limit, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Write default-valued fields into the portable structure instead of
    /// omitting them. Absent nested messages are written as `null`.
    pub emit_defaults: bool,
    /// Maximum nesting depth accepted while decoding.
    pub recursion_limit: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            emit_defaults: false,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

impl CodecConfig {
    pub fn emit_defaults(mut self, emit: bool) -> Self {
        self.emit_defaults = emit;
        self
    }

    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }
}

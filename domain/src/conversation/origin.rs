//! Session identifier provenance

/// Where a backend's session identifiers come from (Value Object)
///
/// The Bedrock backend is stateless, so the relay mints identifiers
/// itself. The agent-driver backend reports a conversation identifier of
/// its own, and only the driver can later resume that exact context, so
/// that identifier must be the one persisted and returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionOrigin {
    /// Identifier is minted by the conversation store (UUID v4).
    #[default]
    Local,
    /// Identifier is issued by the external driver process.
    Provider,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_local() {
        assert_eq!(SessionOrigin::default(), SessionOrigin::Local);
    }
}

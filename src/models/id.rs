use uuid::Uuid;

/// Parse a client-supplied identifier.
///
/// Returns `None` for anything that is not a UUID. This is purely syntactic:
/// whether the entity exists is a question for the store.
pub fn parse_id(s: &str) -> Option<Uuid> {
    Uuid::parse_str(s).ok()
}

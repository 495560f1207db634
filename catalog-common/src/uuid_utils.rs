//! UUID utilities

use uuid::Uuid;

/// Generate a new UUIDv4
pub fn generate() -> Uuid {
    Uuid::new_v4()
}

/// Parse UUID from string
pub fn parse(s: &str) -> Result<Uuid, uuid::Error> {
    Uuid::parse_str(s.trim())
}

/// Parse a stored identity column, mapping failures into the common error type
pub fn from_column(s: &str) -> crate::Result<Uuid> {
    Ok(parse(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_surrounding_whitespace() {
        let id = generate();
        let parsed = parse(&format!("  {}\n", id)).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn from_column_rejects_garbage() {
        let err = from_column("not-a-uuid").unwrap_err();
        assert!(matches!(err, crate::Error::InvalidInput(_)));
    }
}

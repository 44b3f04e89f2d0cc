//! Client-generated ids for costing groups and line entries

use uuid::Uuid;

/// Length of generated ids
pub const CLIENT_ID_LEN: usize = 8;

/// Generate a short lowercase id, retrying while `is_taken` reports a collision.
pub fn generate_client_id(is_taken: impl Fn(&str) -> bool) -> String {
    loop {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(CLIENT_ID_LEN);
        if !is_taken(&id) {
            return id;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_generated_id_shape() {
        let id = generate_client_id(|_| false);
        assert_eq!(id.len(), CLIENT_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn test_retries_on_collision() {
        let attempts = Cell::new(0);
        let id = generate_client_id(|_| {
            attempts.set(attempts.get() + 1);
            attempts.get() < 3
        });
        assert_eq!(attempts.get(), 3);
        assert_eq!(id.len(), CLIENT_ID_LEN);
    }
}

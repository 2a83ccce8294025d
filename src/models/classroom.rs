//! Classroom models.

use serde::{Deserialize, Serialize};

/// A classroom owned by a professor. The roster is fetched separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classroom {
    pub id: i64,
    pub name: String,
    pub professor_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classroom() {
        let json = r#"{"id": 4, "name": "Terminale L", "professor_id": 3}"#;
        let classroom: Classroom = serde_json::from_str(json).unwrap();
        assert_eq!(classroom.name, "Terminale L");
        assert_eq!(classroom.professor_id, 3);
    }
}

use serde::{Deserialize, Serialize};

/// An uploaded CV as listed by `GET /api/cvs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cv {
    pub id: i64,
    pub filename: String,
    /// Role the CV targets, e.g. "Data Scientist"
    pub role_category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_listing() {
        let json = r#"[{"id": 3, "filename": "ada_ml.pdf", "role_category": "ML Engineer"}]"#;
        let cvs: Vec<Cv> = serde_json::from_str(json).unwrap();
        assert_eq!(cvs.len(), 1);
        assert_eq!(cvs[0].filename, "ada_ml.pdf");
        assert_eq!(cvs[0].role_category, "ML Engineer");
    }
}

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Judge {
    pub judge_id: Uuid,
    pub name: String,
    pub title: String,
    pub department: String,
    /// Sorted and deduplicated expertise tags.
    pub expertise: Vec<String>,
}

impl Judge {
    pub fn new(
        judge_id: Uuid,
        name: String,
        title: String,
        department: String,
        expertise: impl IntoIterator<Item = String>,
    ) -> Self {
        let mut expertise: Vec<String> = expertise
            .into_iter()
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .collect();
        expertise.sort();
        expertise.dedup();

        Self {
            judge_id,
            name,
            title,
            department,
            expertise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expertise_is_a_set() {
        let judge = Judge::new(
            Uuid::new_v4(),
            "Lin".to_string(),
            "Principal Engineer".to_string(),
            "Platform".to_string(),
            vec![
                "nlp".to_string(),
                " vision ".to_string(),
                "nlp".to_string(),
                String::new(),
            ],
        );

        assert_eq!(judge.expertise, vec!["nlp", "vision"]);
    }
}

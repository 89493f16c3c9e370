use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// A single facilitation offering from the catalog.
///
/// Records are defined once when the catalog loads and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Whole currency units.
    pub price: u32,
    /// Display label only, never parsed.
    pub estimated_time: String,
    #[serde(default)]
    pub is_popular: bool,
    pub required_documents: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub processing_steps: Vec<String>,
}

impl Service {
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.id.trim().is_empty() {
            return Err(ModelError::Validation("service id required".into()));
        }
        if self.title.trim().is_empty() {
            return Err(ModelError::Validation(format!("service {} has no title", self.id)));
        }
        if self.required_documents.is_empty() {
            return Err(ModelError::Validation(format!(
                "service {} must list at least one required document",
                self.id
            )));
        }
        Ok(())
    }
}

/// A list entry with its 1-based position, as rendered in the detail view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NumberedItem {
    pub position: usize,
    pub text: String,
}

pub fn numbered(items: &[String]) -> Vec<NumberedItem> {
    items
        .iter()
        .enumerate()
        .map(|(i, text)| NumberedItem { position: i + 1, text: text.clone() })
        .collect()
}

/// Parse a JSON array of services.
pub fn parse_services(json: &str) -> Result<Vec<Service>, ModelError> {
    serde_json::from_str(json).map_err(|e| ModelError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Service {
        Service {
            id: "pan-card".into(),
            title: "PAN Card".into(),
            description: "New PAN card".into(),
            category: "Identity".into(),
            price: 200,
            estimated_time: "7-10 days".into(),
            is_popular: false,
            required_documents: vec!["Photo".into()],
            instructions: vec![],
            processing_steps: vec![],
        }
    }

    #[test]
    fn optional_fields_default_when_absent() {
        let json = r#"[{"id":"x","title":"X","description":"d","category":"c","price":10,
            "estimatedTime":"1 day","requiredDocuments":["a"]}]"#;
        let parsed = parse_services(json).unwrap();
        assert!(!parsed[0].is_popular);
        assert!(parsed[0].instructions.is_empty());
        assert!(parsed[0].processing_steps.is_empty());
    }

    #[test]
    fn empty_required_documents_rejected() {
        let mut s = sample();
        s.required_documents.clear();
        assert!(matches!(s.validate(), Err(ModelError::Validation(_))));
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn numbering_is_one_based() {
        let items = numbered(&["first".to_string(), "second".to_string()]);
        assert_eq!(items[0].position, 1);
        assert_eq!(items[1].position, 2);
        assert_eq!(items[1].text, "second");
    }
}

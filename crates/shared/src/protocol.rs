use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, null_as_default};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightRequest {
    pub topic: String,
}

impl InsightRequest {
    /// Trims the topic and rejects blank input before anything hits the network.
    pub fn from_topic(topic: &str) -> Result<Self, ValidationError> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }
        Ok(Self {
            topic: topic.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedLink {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Canonical topic-analysis result.
///
/// Two response shapes exist in the wild: one lists links under `relatedResources`
/// (with descriptions), the other under `relatedLinks` and adds `facts` and
/// `applications`. Both decode into this type; it always encodes as `relatedLinks`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub key_concepts: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub facts: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applications: Option<String>,
    #[serde(
        default,
        alias = "relatedResources",
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub related_links: Vec<RelatedLink>,
}

impl InsightResult {
    pub fn is_empty(&self) -> bool {
        self.overview.as_deref().map_or(true, |text| text.trim().is_empty())
            && self.key_concepts.is_empty()
            && self.facts.is_empty()
            && self
                .applications
                .as_deref()
                .map_or(true, |text| text.trim().is_empty())
            && self.related_links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_is_trimmed_and_blank_rejected() {
        assert_eq!(
            InsightRequest::from_topic("  quantum computing ").expect("valid topic"),
            InsightRequest {
                topic: "quantum computing".to_string()
            }
        );
        assert_eq!(
            InsightRequest::from_topic(" \t\n"),
            Err(ValidationError::EmptyTopic)
        );
    }

    #[test]
    fn decodes_related_resources_shape() {
        let raw = r#"{
            "overview": "Qubits and gates",
            "keyConcepts": ["superposition", "entanglement"],
            "relatedResources": [
                {"title": "Intro", "url": "https://example.com/intro", "description": "Primer"}
            ]
        }"#;
        let result: InsightResult = serde_json::from_str(raw).expect("decode");
        assert_eq!(result.related_links.len(), 1);
        assert_eq!(
            result.related_links[0].description.as_deref(),
            Some("Primer")
        );
        assert!(result.facts.is_empty());
    }

    #[test]
    fn decodes_related_links_shape_with_facts() {
        let raw = r#"{
            "overview": "Qubits and gates",
            "keyConcepts": ["superposition"],
            "facts": ["Qubits decohere"],
            "applications": "Cryptography",
            "relatedLinks": [{"title": "Wiki", "url": "https://example.org/wiki"}]
        }"#;
        let result: InsightResult = serde_json::from_str(raw).expect("decode");
        assert_eq!(result.facts, vec!["Qubits decohere".to_string()]);
        assert_eq!(result.applications.as_deref(), Some("Cryptography"));
        assert_eq!(result.related_links[0].description, None);
    }

    #[test]
    fn empty_object_is_an_empty_result() {
        let result: InsightResult = serde_json::from_str("{}").expect("decode");
        assert!(result.is_empty());
        let with_nulls: InsightResult =
            serde_json::from_str(r#"{"keyConcepts": null, "overview": "  "}"#).expect("decode");
        assert!(with_nulls.is_empty());
    }
}

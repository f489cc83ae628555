use shared::protocol::{InsightRequest, InsightResult, RelatedLink};

use crate::{
    gateway::{Gateway, GatewayError},
    resource::{AsyncResource, DataPolicy, RequestToken},
};

/// One populated block of an insight result, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightSection<'a> {
    Overview(&'a str),
    KeyConcepts(&'a [String]),
    Facts(&'a [String]),
    Applications(&'a str),
    RelatedLinks(&'a [RelatedLink]),
}

#[derive(Debug, Default)]
pub struct InsightFormView {
    topic: String,
    insights: AsyncResource<InsightResult>,
}

impl InsightFormView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn set_topic(&mut self, topic: impl Into<String>) {
        self.topic = topic.into();
        self.topic_edited();
    }

    /// For widgets that edit the topic in place; call [`Self::topic_edited`] afterwards.
    pub fn topic_mut(&mut self) -> &mut String {
        &mut self.topic
    }

    /// Typing dismisses the previous error.
    pub fn topic_edited(&mut self) {
        self.insights.clear_error();
    }

    /// A blank topic fails locally without a request. Otherwise the previous results and
    /// error are cleared before the request starts.
    pub fn begin_submit(&mut self) -> Option<(RequestToken, InsightRequest)> {
        let request = match InsightRequest::from_topic(&self.topic) {
            Ok(request) => request,
            Err(err) => {
                self.insights.fail_local(err.to_string());
                return None;
            }
        };
        Some((self.insights.begin(DataPolicy::Clear), request))
    }

    pub fn finish_submit(
        &mut self,
        token: RequestToken,
        outcome: Result<InsightResult, GatewayError>,
    ) -> bool {
        self.insights.resolve(token, outcome)
    }

    pub async fn submit(&mut self, gateway: &dyn Gateway) -> bool {
        let Some((token, request)) = self.begin_submit() else {
            return false;
        };
        let outcome = gateway.generate_insights(&request).await;
        self.finish_submit(token, outcome)
    }

    pub fn is_loading(&self) -> bool {
        self.insights.is_loading()
    }

    /// Placeholder blocks stand in for the result while a request is running.
    pub fn show_skeleton(&self) -> bool {
        self.insights.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.insights.error()
    }

    pub fn result(&self) -> Option<&InsightResult> {
        self.insights.data()
    }

    /// Only the sections the result actually populated.
    pub fn sections(&self) -> Vec<InsightSection<'_>> {
        let Some(result) = self.insights.data() else {
            return Vec::new();
        };

        let mut sections = Vec::new();
        if let Some(overview) = non_blank(result.overview.as_deref()) {
            sections.push(InsightSection::Overview(overview));
        }
        if !result.key_concepts.is_empty() {
            sections.push(InsightSection::KeyConcepts(&result.key_concepts));
        }
        if !result.facts.is_empty() {
            sections.push(InsightSection::Facts(&result.facts));
        }
        if let Some(applications) = non_blank(result.applications.as_deref()) {
            sections.push(InsightSection::Applications(applications));
        }
        if !result.related_links.is_empty() {
            sections.push(InsightSection::RelatedLinks(&result.related_links));
        }
        sections
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.filter(|text| !text.trim().is_empty())
}

use crate::models::{CharityCause, Event, Group, Professional};

/// Text fields a record exposes to the search box.
pub trait Searchable {
    fn primary(&self) -> &str;
    fn category(&self) -> &str;
    fn tags(&self) -> Vec<&str>;
    fn description(&self) -> &str;

    /// `needle` must already be lowercase.
    fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }

        let hit = |text: &str| text.to_lowercase().contains(needle);
        hit(self.primary())
            || hit(self.category())
            || self.tags().into_iter().any(hit)
            || hit(self.description())
    }
}

/// Keeps the records matching `query`, in their original order.
///
/// The query is lowercased but not trimmed, so a whitespace-only query only
/// matches records that contain that exact whitespace run.
pub fn filter_records<'a, T: Searchable>(query: &str, records: &'a [T]) -> Vec<&'a T> {
    let needle = query.to_lowercase();
    let matched: Vec<&T> = records
        .iter()
        .filter(|record| record.matches(&needle))
        .collect();

    tracing::debug!(
        query,
        total = records.len(),
        matched = matched.len(),
        "filtered records"
    );
    matched
}

impl Searchable for Professional {
    fn primary(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.profession
    }

    fn tags(&self) -> Vec<&str> {
        self.specialties.iter().map(String::as_str).collect()
    }

    fn description(&self) -> &str {
        &self.recent_work
    }
}

impl Searchable for CharityCause {
    fn primary(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> Vec<&str> {
        vec![self.organization.as_str()]
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Searchable for Group {
    fn primary(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        self.kind.label()
    }

    fn tags(&self) -> Vec<&str> {
        self.specialty.as_deref().into_iter().collect()
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl Searchable for Event {
    fn primary(&self) -> &str {
        &self.title
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn tags(&self) -> Vec<&str> {
        vec![self.location.as_str()]
    }

    fn description(&self) -> &str {
        &self.description
    }
}

//! List views, search and dashboard counters.

use serde::{Deserialize, Serialize};

use crate::record::ClientRecord;

/// Which slice of the collection a list shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClientView {
    /// Records that are not archived.
    Clients,
    /// Archived records only.
    Archives,
    /// Everything.
    #[default]
    All,
}

/// Status filter applied inside a view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    /// Neither delivered nor archived.
    Active,
    Delivered,
    /// Not delivered yet, archived or not.
    Pending,
}

/// A list request: free-text search within a view and status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientQuery {
    /// Case-insensitive substring of name, phone or description.
    #[serde(rename = "q", skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub view: ClientView,
    pub filter: StatusFilter,
}

impl ClientQuery {
    /// Query matching everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the search text. Blank text matches everything.
    pub fn search(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.search = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Builder: set the view.
    pub fn view(mut self, view: ClientView) -> Self {
        self.view = view;
        self
    }

    /// Builder: set the status filter.
    pub fn filter(mut self, filter: StatusFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Check whether a record belongs in the result.
    pub fn matches(&self, record: &ClientRecord) -> bool {
        let in_view = match self.view {
            ClientView::Clients => !record.archived,
            ClientView::Archives => record.archived,
            ClientView::All => true,
        };
        let in_filter = match self.filter {
            StatusFilter::All => true,
            StatusFilter::Active => record.is_active(),
            StatusFilter::Delivered => record.delivered,
            StatusFilter::Pending => !record.delivered,
        };
        in_view && in_filter && self.matches_search(record)
    }

    fn matches_search(&self, record: &ClientRecord) -> bool {
        let Some(search) = self.search.as_deref().map(str::trim) else {
            return true;
        };
        if search.is_empty() {
            return true;
        }
        let needle = search.to_lowercase();
        [&record.name, &record.phone, &record.description]
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }

    /// Keep the matching records, preserving order.
    pub fn apply(&self, records: Vec<ClientRecord>) -> Vec<ClientRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    /// Neither delivered nor archived.
    pub active: usize,
    /// Delivered, archived or not.
    pub delivered: usize,
    pub archived: usize,
}

impl DashboardStats {
    /// Count a collection.
    pub fn from_records(records: &[ClientRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, r| {
            stats.total += 1;
            stats.active += usize::from(r.is_active());
            stats.delivered += usize::from(r.delivered);
            stats.archived += usize::from(r.archived);
            stats
        })
    }
}

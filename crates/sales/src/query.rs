//! Sales-note listing: text search plus fixed-size pages.

use serde::{Deserialize, Serialize};

use sexyboom_core::Entity;

use crate::note::SalesNote;

/// Notes per page.
pub const PAGE_SIZE: usize = 10;

/// Listing parameters. Pages are 1-based; anything below 1 is read as 1.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SalesNoteQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

impl Default for SalesNoteQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: first_page(),
        }
    }
}

impl SalesNoteQuery {
    /// A note matches when its client name contains the term (ignoring case)
    /// or its id contains the term as text.
    pub fn matches(&self, note: &SalesNote) -> bool {
        client_name_contains(note, &self.search) || id_contains(note, &self.search)
    }
}

/// Case-insensitive substring match on the client name.
pub(crate) fn client_name_contains(note: &SalesNote, term: &str) -> bool {
    note.client_name().to_lowercase().contains(&term.to_lowercase())
}

/// Substring match on the note id written out in decimal.
pub(crate) fn id_contains(note: &SalesNote, term: &str) -> bool {
    note.id().to_string().contains(term)
}

/// One page of matching notes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesNotePage<'a> {
    pub notes: Vec<&'a SalesNote>,
    pub page: u32,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// Filter `notes` by `query` and cut out the requested page.
///
/// Pages past the end are empty; `total_pages` is 0 when nothing matches.
pub fn paginate<'a>(notes: &'a [SalesNote], query: &SalesNoteQuery) -> SalesNotePage<'a> {
    let page = query.page.max(1);
    let matching: Vec<&SalesNote> = notes.iter().filter(|note| query.matches(note)).collect();
    let total_matches = matching.len();
    let total_pages = total_matches.div_ceil(PAGE_SIZE);

    let start = (page as usize - 1).saturating_mul(PAGE_SIZE);
    let notes = matching.into_iter().skip(start).take(PAGE_SIZE).collect();

    SalesNotePage {
        notes,
        page,
        total_pages,
        total_matches,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::note::fixtures::note;

    fn ids(page: &SalesNotePage<'_>) -> Vec<u64> {
        page.notes.iter().map(|n| n.id().get()).collect()
    }

    fn many(n: u64) -> Vec<SalesNote> {
        (1..=n).map(|i| note(i, if i % 2 == 0 { "Ana Torres" } else { "Luis Vega" }, 1, 10.0)).collect()
    }

    #[test]
    fn first_page_holds_ten_notes() {
        let notes = many(25);
        let page = paginate(&notes, &SalesNoteQuery::default());
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_matches, 25);
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_is_partial_and_past_the_end_is_empty() {
        let notes = many(25);
        let last = paginate(&notes, &SalesNoteQuery { search: String::new(), page: 3 });
        assert_eq!(ids(&last), (21..=25).collect::<Vec<_>>());

        let beyond = paginate(&notes, &SalesNoteQuery { search: String::new(), page: 9 });
        assert!(beyond.notes.is_empty());
        assert_eq!(beyond.total_pages, 3);
    }

    #[test]
    fn page_zero_is_read_as_first_page() {
        let notes = many(3);
        let page = paginate(&notes, &SalesNoteQuery { search: String::new(), page: 0 });
        assert_eq!(page.page, 1);
        assert_eq!(ids(&page), vec![1, 2, 3]);
    }

    #[test]
    fn search_matches_client_name_ignoring_case() {
        let notes = many(6);
        let page = paginate(&notes, &SalesNoteQuery { search: "ANA".to_string(), page: 1 });
        assert_eq!(ids(&page), vec![2, 4, 6]);
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn search_matches_note_id_text() {
        let notes = many(12);
        let page = paginate(&notes, &SalesNoteQuery { search: "1".to_string(), page: 1 });
        assert_eq!(ids(&page), vec![1, 10, 11, 12]);
    }

    #[test]
    fn no_matches_means_zero_pages() {
        let notes = many(4);
        let page = paginate(&notes, &SalesNoteQuery { search: "zzz".to_string(), page: 1 });
        assert!(page.notes.is_empty());
        assert_eq!(page.total_pages, 0);
    }

    #[test]
    fn query_deserializes_with_defaults() {
        let query: SalesNoteQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, SalesNoteQuery::default());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn pages_partition_the_matches(count in 0u64..60, search in "[a-z1-9]{0,2}") {
                let notes = many(count);
                let first = paginate(&notes, &SalesNoteQuery { search: search.clone(), page: 1 });
                prop_assert_eq!(first.total_pages, first.total_matches.div_ceil(PAGE_SIZE));

                let mut seen = Vec::new();
                for page in 1..=first.total_pages as u32 + 1 {
                    let current = paginate(&notes, &SalesNoteQuery { search: search.clone(), page });
                    prop_assert_eq!(current.total_matches, first.total_matches);
                    prop_assert!(current.notes.len() <= PAGE_SIZE);
                    seen.extend(ids(&current));
                }

                let query = SalesNoteQuery { search, page: 1 };
                let expected: Vec<u64> = notes.iter().filter(|n| query.matches(n)).map(|n| n.id().get()).collect();
                prop_assert_eq!(seen, expected);
            }
        }
    }
}

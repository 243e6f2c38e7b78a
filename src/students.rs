use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::error::{DashboardError, Result};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    M,
    F,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DisabilityStatus {
    Y,
    N,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCategory {
    Pass,
    Fail,
    Withdrawn,
    Distinction,
}

impl ResultCategory {
    pub const ALL: [ResultCategory; 4] = [
        ResultCategory::Distinction,
        ResultCategory::Pass,
        ResultCategory::Fail,
        ResultCategory::Withdrawn,
    ];

    pub fn from_score(score: u8) -> Self {
        match score {
            0..=39 => ResultCategory::Withdrawn,
            40..=59 => ResultCategory::Fail,
            60..=79 => ResultCategory::Pass,
            _ => ResultCategory::Distinction,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ResultCategory::Pass => "Pass",
            ResultCategory::Fail => "Fail",
            ResultCategory::Withdrawn => "Withdrawn",
            ResultCategory::Distinction => "Distinction",
        }
    }

    pub fn is_passing(&self) -> bool {
        matches!(self, ResultCategory::Pass | ResultCategory::Distinction)
    }
}

impl fmt::Display for ResultCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub id: String,
    pub name: String,
    pub gender: Gender,
    pub region: String,
    pub education: String,
    pub disability_status: DisabilityStatus,
    pub score: u8,
    pub result: ResultCategory,
}

impl StudentRecord {
    /// Builds a record whose result always agrees with its score.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        gender: Gender,
        region: impl Into<String>,
        education: impl Into<String>,
        disability_status: DisabilityStatus,
        score: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender,
            region: region.into(),
            education: education.into(),
            disability_status,
            score,
            result: ResultCategory::from_score(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultFilter {
    #[default]
    All,
    Only(ResultCategory),
}

impl ResultFilter {
    fn matches(&self, result: ResultCategory) -> bool {
        match self {
            ResultFilter::All => true,
            ResultFilter::Only(category) => *category == result,
        }
    }
}

impl FromStr for ResultFilter {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(ResultFilter::All);
        }
        ResultCategory::ALL
            .iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .map(|category| ResultFilter::Only(*category))
            .ok_or_else(|| DashboardError::InvalidFilter(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    pub search_term: String,
    pub result_filter: ResultFilter,
    pub page: usize,
    pub page_size: usize,
}

impl QueryState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_term: String::new(),
            result_filter: ResultFilter::All,
            page: 1,
            page_size,
        }
    }

    /// A new search starts back on the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.page = 1;
    }

    pub fn set_result_filter(&mut self, filter: ResultFilter) {
        self.result_filter = filter;
        self.page = 1;
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.page = self.page.saturating_add(1).min(total_pages.max(1));
    }

    pub fn previous_page(&mut self) {
        self.page = self.page.saturating_sub(1).max(1);
    }
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct QueryPage {
    pub items: Vec<StudentRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

fn matches_search(record: &StudentRecord, term: &str, lowered: &str) -> bool {
    record.id.contains(term) || record.name.to_lowercase().contains(lowered)
}

/// Filters `records` by search term and result, then cuts out the
/// requested page. Input order is preserved and `records` is untouched.
pub fn query(records: &[StudentRecord], state: &QueryState) -> QueryPage {
    let page_size = state.page_size.max(1);
    let page = state.page.max(1);
    let lowered = state.search_term.to_lowercase();

    let filtered: Vec<&StudentRecord> = records
        .iter()
        .filter(|r| matches_search(r, &state.search_term, &lowered))
        .filter(|r| state.result_filter.matches(r.result))
        .collect();

    let total_matches = filtered.len();
    let total_pages = total_matches.div_ceil(page_size).max(1);

    // Pages past the end are empty; this also bounds the offset.
    let items = if page > total_pages {
        Vec::new()
    } else {
        filtered
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .cloned()
            .collect()
    };

    QueryPage {
        items,
        page,
        total_pages,
        total_matches,
    }
}

#[derive(Debug, Deserialize)]
struct CsvStudent {
    id: String,
    name: String,
    gender: Gender,
    region: String,
    education: String,
    disability_status: DisabilityStatus,
    score: u8,
}

/// Reads a roster with columns `id,name,gender,region,education,disability_status,score`.
/// Results are derived from the score column.
pub fn load_students_csv(path: impl AsRef<Path>) -> Result<Vec<StudentRecord>> {
    let mut rdr = csv::Reader::from_path(path)?;
    let mut students = Vec::new();

    for row in rdr.deserialize() {
        let row: CsvStudent = row?;
        if row.score > 100 {
            return Err(DashboardError::validation(format!(
                "student {} has score {} outside 0-100",
                row.id, row.score
            )));
        }
        students.push(StudentRecord::new(
            row.id,
            row.name,
            row.gender,
            row.region,
            row.education,
            row.disability_status,
            row.score,
        ));
    }

    Ok(students)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(id: &str, name: &str, score: u8) -> StudentRecord {
        StudentRecord::new(
            id,
            name,
            Gender::F,
            "Scotland",
            "HE Qualification",
            DisabilityStatus::N,
            score,
        )
    }

    fn roster(n: usize) -> Vec<StudentRecord> {
        (0..n)
            .map(|i| {
                let id = format!("{}", 10000 + i);
                student(&id, &format!("Student {}", id), (i * 7 % 100) as u8)
            })
            .collect()
    }

    #[test]
    fn result_thresholds_hold_at_boundaries() {
        assert_eq!(ResultCategory::from_score(0), ResultCategory::Withdrawn);
        assert_eq!(ResultCategory::from_score(39), ResultCategory::Withdrawn);
        assert_eq!(ResultCategory::from_score(40), ResultCategory::Fail);
        assert_eq!(ResultCategory::from_score(59), ResultCategory::Fail);
        assert_eq!(ResultCategory::from_score(60), ResultCategory::Pass);
        assert_eq!(ResultCategory::from_score(79), ResultCategory::Pass);
        assert_eq!(ResultCategory::from_score(80), ResultCategory::Distinction);
        assert_eq!(ResultCategory::from_score(100), ResultCategory::Distinction);
    }

    #[test]
    fn filter_parses_case_insensitively() {
        assert_eq!("all".parse::<ResultFilter>().unwrap(), ResultFilter::All);
        assert_eq!(
            "distinction".parse::<ResultFilter>().unwrap(),
            ResultFilter::Only(ResultCategory::Distinction)
        );
        assert_eq!(
            "PASS".parse::<ResultFilter>().unwrap(),
            ResultFilter::Only(ResultCategory::Pass)
        );
        assert!("merit".parse::<ResultFilter>().is_err());
    }

    #[test]
    fn twenty_five_matches_make_three_pages() {
        let records = roster(25);
        let mut state = QueryState::new(10);
        let first = query(&records, &state);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_matches, 25);
        assert_eq!(first.items.len(), 10);

        state.page = 3;
        assert_eq!(query(&records, &state).items.len(), 5);

        state.page = 4;
        let beyond = query(&records, &state);
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_pages, 3);
    }

    #[test]
    fn huge_page_number_is_empty_not_wrapped() {
        let records = roster(25);
        let mut state = QueryState::new(10);
        state.page = usize::MAX;
        let page = query(&records, &state);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 3);

        let mut state = QueryState::new(16);
        state.page = (1 << 60) + 1;
        assert!(query(&records, &state).items.is_empty());
    }

    #[test]
    fn empty_roster_has_one_empty_page() {
        let page = query(&[], &QueryState::new(10));
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total_matches, 0);
    }

    #[test]
    fn blank_query_matches_everything() {
        let records = roster(17);
        let page = query(&records, &QueryState::new(10));
        assert_eq!(page.total_matches, records.len());
    }

    #[test]
    fn search_matches_id_exactly_and_name_loosely() {
        let records = vec![
            student("10001", "Amina Otieno", 70),
            student("20002", "Brian Kip", 55),
            student("A3003", "Chen Wu", 90),
        ];
        let mut state = QueryState::new(10);

        state.set_search_term("amina");
        assert_eq!(query(&records, &state).items[0].id, "10001");

        state.set_search_term("2000");
        assert_eq!(query(&records, &state).items[0].name, "Brian Kip");

        // ids are compared case-sensitively
        state.set_search_term("a3");
        assert_eq!(query(&records, &state).total_matches, 0);
        state.set_search_term("A3");
        assert_eq!(query(&records, &state).total_matches, 1);
    }

    #[test]
    fn result_filter_narrows_and_keeps_order() {
        let records = vec![
            student("1", "One", 85),
            student("2", "Two", 45),
            student("3", "Three", 95),
            student("4", "Four", 65),
        ];
        let mut state = QueryState::new(10);
        state.set_result_filter(ResultFilter::Only(ResultCategory::Distinction));
        let ids: Vec<_> = query(&records, &state)
            .items
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn query_is_repeatable() {
        let records = roster(30);
        let mut state = QueryState::new(10);
        state.set_search_term("1002");
        let before = records.clone();
        assert_eq!(query(&records, &state), query(&records, &state));
        assert_eq!(records, before);
    }

    #[test]
    fn changing_criteria_resets_page() {
        let mut state = QueryState::new(10);
        state.page = 3;
        state.set_search_term("x");
        assert_eq!(state.page, 1);
        state.page = 2;
        state.set_result_filter(ResultFilter::All);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn pager_stays_in_range() {
        let mut state = QueryState::new(10);
        state.previous_page();
        assert_eq!(state.page, 1);
        state.next_page(2);
        state.next_page(2);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn degenerate_page_and_size_are_tolerated() {
        let records = roster(3);
        let mut state = QueryState::new(0);
        state.page = 0;
        let page = query(&records, &state);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 1);
    }

    #[test]
    fn csv_roster_derives_results() {
        let path = std::env::temp_dir().join(format!("roster-{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "id,name,gender,region,education,disability_status,score\n\
             10001,Student 10001,M,Scotland,HE Qualification,N,80\n\
             10002,Student 10002,F,South East,Postgraduate,Y,39\n",
        )
        .unwrap();
        let students = load_students_csv(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(students.len(), 2);
        assert_eq!(students[0].result, ResultCategory::Distinction);
        assert_eq!(students[1].result, ResultCategory::Withdrawn);
        assert_eq!(students[1].disability_status, DisabilityStatus::Y);
    }
}

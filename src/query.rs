use crate::models::{Job, JobSource, JobStatus};

pub const PAGE_SIZE: usize = 15;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(JobStatus),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceFilter {
    #[default]
    All,
    Only(JobSource),
}

/// Filter predicates plus the page index. The setters own the
/// filter-reset policy: touching any predicate snaps back to page 1, so a
/// narrowed result set can never leave the view stranded on an empty page.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    search: String,
    status: StatusFilter,
    source: SourceFilter,
    page: usize, // 1-based; 0 means "never set", normalized on read
}

impl FilterState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn status(&self) -> &StatusFilter {
        &self.status
    }

    pub fn source(&self) -> &SourceFilter {
        &self.source
    }

    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status = status;
        self.page = 1;
    }

    pub fn set_source(&mut self, source: SourceFilter) {
        self.source = source;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn reset(&mut self) {
        *self = FilterState::default();
    }

    fn matches(&self, job: &Job) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !job.candidate_name.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let StatusFilter::Only(status) = &self.status {
            if job.status != *status {
                return false;
            }
        }
        if let SourceFilter::Only(source) = &self.source {
            if job.source != *source {
                return false;
            }
        }
        true
    }
}

/// One visible page of jobs plus the totals the pagination controls need.
#[derive(Debug, Clone)]
pub struct JobPage {
    pub items: Vec<Job>,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// The page actually shown, after clamping to `[1, max(total_pages, 1)]`.
    pub page: usize,
}

/// Filters with AND semantics across the active predicates, preserving
/// original order, then slices out the requested page.
pub fn job_page(jobs: &[Job], filter: &FilterState) -> JobPage {
    let filtered: Vec<&Job> = jobs.iter().filter(|job| filter.matches(job)).collect();
    let total_filtered = filtered.len();
    let total_pages = total_filtered.div_ceil(PAGE_SIZE);
    let page = filter.page().min(total_pages.max(1));
    let start = (page - 1) * PAGE_SIZE;
    let items = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();
    JobPage {
        items,
        total_filtered,
        total_pages,
        page,
    }
}

/// Page buttons to render, at most 7: everything when it fits, otherwise
/// a window anchored to the current page with first/last pages handled as
/// edge cases.
pub fn page_window(current: usize, total_pages: usize) -> Vec<usize> {
    if total_pages == 0 {
        return Vec::new();
    }
    if total_pages <= 7 {
        return (1..=total_pages).collect();
    }
    if current <= 4 {
        (1..=7).collect()
    } else if current >= total_pages - 3 {
        (total_pages - 6..=total_pages).collect()
    } else {
        (current - 3..=current + 3).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64, candidate: &str, status: JobStatus, source: JobSource) -> Job {
        Job {
            id,
            created_at: "2025-01-01 09:00:00".to_string(),
            candidate_id: id,
            candidate_name: candidate.to_string(),
            candidate_status: "Ready".to_string(),
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            source,
            status,
            comment: String::new(),
            link: String::new(),
            resume_available: false,
        }
    }

    fn fixture(count: usize) -> Vec<Job> {
        (0..count)
            .map(|i| {
                let status = JobStatus::ALL[i % JobStatus::ALL.len()];
                let source = if i % 2 == 0 {
                    JobSource::LinkedIn
                } else {
                    JobSource::Indeed
                };
                let name = if i % 3 == 0 { "Dana Whitfield" } else { "Priya Nair" };
                job((count - i) as i64, name, status, source)
            })
            .collect()
    }

    #[test]
    fn predicates_compose_with_and_semantics() {
        let jobs = fixture(42);
        let mut filter = FilterState::default();
        filter.set_search("dana");
        filter.set_status(StatusFilter::Only(JobStatus::Queued));
        filter.set_source(SourceFilter::Only(JobSource::LinkedIn));

        let page = job_page(&jobs, &filter);
        let expected: Vec<i64> = jobs
            .iter()
            .filter(|j| {
                j.candidate_name.to_lowercase().contains("dana")
                    && j.status == JobStatus::Queued
                    && j.source == JobSource::LinkedIn
            })
            .map(|j| j.id)
            .collect();
        assert_eq!(
            page.items.iter().map(|j| j.id).collect::<Vec<_>>(),
            expected
        );
        assert_eq!(page.total_filtered, expected.len());
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let jobs = fixture(6);
        let mut filter = FilterState::default();
        filter.set_search("WHITF");
        let page = job_page(&jobs, &filter);
        assert!(!page.items.is_empty());
        assert!(page
            .items
            .iter()
            .all(|j| j.candidate_name == "Dana Whitfield"));
    }

    #[test]
    fn filter_preserves_original_order() {
        let jobs = fixture(42);
        let mut filter = FilterState::default();
        filter.set_source(SourceFilter::Only(JobSource::Indeed));
        let page = job_page(&jobs, &filter);
        let ids: Vec<i64> = page.items.iter().map(|j| j.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(ids, sorted); // fixture ids descend, filtering must not reorder
    }

    #[test]
    fn any_filter_change_resets_page() {
        let mut filter = FilterState::default();
        filter.set_page(3);
        filter.set_search("dana");
        assert_eq!(filter.page(), 1);

        filter.set_page(3);
        filter.set_status(StatusFilter::Only(JobStatus::Applied));
        assert_eq!(filter.page(), 1);

        filter.set_page(3);
        filter.set_source(SourceFilter::All);
        assert_eq!(filter.page(), 1);
    }

    #[test]
    fn narrowing_while_deep_in_pagination_lands_on_page_one() {
        // 42 jobs, viewing page 3; a search narrows to 14 matches.
        let jobs = fixture(42);
        let mut filter = FilterState::default();
        filter.set_page(3);
        filter.set_search("dana");

        let page = job_page(&jobs, &filter);
        assert_eq!(filter.page(), 1);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_filtered, 14);
        assert_eq!(page.items.len(), 14);
    }

    #[test]
    fn out_of_range_page_is_clamped() {
        let jobs = fixture(20); // 2 pages
        let mut filter = FilterState::default();
        filter.set_page(9);
        let page = job_page(&jobs, &filter);
        assert_eq!(page.page, 2);
        assert_eq!(page.items.len(), 5);
    }

    #[test]
    fn empty_result_set_clamps_to_page_one() {
        let jobs = fixture(20);
        let mut filter = FilterState::default();
        filter.set_search("no such candidate");
        filter.set_page(4);
        let page = job_page(&jobs, &filter);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn page_slicing_uses_fixed_size() {
        let jobs = fixture(42);
        let mut filter = FilterState::default();
        let first = job_page(&jobs, &filter);
        assert_eq!(first.items.len(), PAGE_SIZE);
        assert_eq!(first.total_pages, 3);

        filter.set_page(3);
        let last = job_page(&jobs, &filter);
        assert_eq!(last.items.len(), 42 - 2 * PAGE_SIZE);
        assert_eq!(last.items[0].id, jobs[2 * PAGE_SIZE].id);
    }

    #[test]
    fn window_shows_all_pages_when_seven_or_fewer() {
        assert_eq!(page_window(1, 1), vec![1]);
        assert_eq!(page_window(4, 7), vec![1, 2, 3, 4, 5, 6, 7]);
        assert!(page_window(1, 0).is_empty());
    }

    #[test]
    fn window_handles_start_middle_and_end() {
        assert_eq!(page_window(2, 20), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(page_window(4, 20), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(page_window(10, 20), vec![7, 8, 9, 10, 11, 12, 13]);
        assert_eq!(page_window(17, 20), vec![14, 15, 16, 17, 18, 19, 20]);
        assert_eq!(page_window(20, 20), vec![14, 15, 16, 17, 18, 19, 20]);
    }
}

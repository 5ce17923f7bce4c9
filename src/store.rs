use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{Candidate, Enterprise, Job, JobDraft, JobSource, JobStatus};
use crate::query::{self, FilterState, JobPage};

/// Anything stored in one of the three collections. Transitions that work
/// by id (`replace_record`, `delete_by_id`) are generic over this.
pub trait Record: Clone {
    fn id(&self) -> i64;
}

impl Record for Job {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Candidate {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Record for Enterprise {
    fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    BlankTitle,
    BlankCompany,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BlankTitle => f.write_str("title must not be blank"),
            ValidationError::BlankCompany => f.write_str("company must not be blank"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A job draft must carry a non-blank title and company; everything else
/// is free-form. Trimmed so whitespace-only input does not sneak through.
pub fn validate_draft(draft: &JobDraft) -> Result<(), ValidationError> {
    if draft.title.trim().is_empty() {
        return Err(ValidationError::BlankTitle);
    }
    if draft.company.trim().is_empty() {
        return Err(ValidationError::BlankCompany);
    }
    Ok(())
}

// --- Pure transitions ---
//
// Each takes a snapshot and returns a new one; no transition mutates its
// input or panics on well-formed input. An id that matches nothing is a
// no-op, which keeps deletes and updates idempotent.

/// Assigns the next id (max + 1, 1 on an empty collection), stamps
/// `created_at`, and prepends so the newest job displays first.
pub fn create_job(jobs: &[Job], draft: &JobDraft, created_at: &str) -> (Vec<Job>, Job) {
    let id = jobs.iter().map(|j| j.id).max().unwrap_or(0) + 1;
    let job = Job {
        id,
        created_at: created_at.to_string(),
        candidate_id: draft.candidate_id,
        candidate_name: draft.candidate_name.clone(),
        candidate_status: "Ready".to_string(),
        title: draft.title.trim().to_string(),
        company: draft.company.trim().to_string(),
        source: JobSource::parse(&draft.source),
        status: JobStatus::Queued,
        comment: draft.comment.clone(),
        link: draft.link.clone(),
        resume_available: false,
    };
    let mut next = Vec::with_capacity(jobs.len() + 1);
    next.push(job.clone());
    next.extend_from_slice(jobs);
    (next, job)
}

/// Replaces only `status` on the matching job; every other field is
/// carried over untouched.
pub fn update_status(jobs: &[Job], id: i64, status: JobStatus) -> Vec<Job> {
    jobs.iter()
        .map(|job| {
            if job.id == id {
                let mut updated = job.clone();
                updated.status = status;
                updated
            } else {
                job.clone()
            }
        })
        .collect()
}

/// Replaces only `comment` on the matching job.
pub fn update_comment(jobs: &[Job], id: i64, text: &str) -> Vec<Job> {
    jobs.iter()
        .map(|job| {
            if job.id == id {
                let mut updated = job.clone();
                updated.comment = text.to_string();
                updated
            } else {
                job.clone()
            }
        })
        .collect()
}

/// Full-record overwrite keyed by id. An unmatched id leaves the
/// collection unchanged rather than inserting.
pub fn replace_record<T: Record>(records: &[T], record: &T) -> Vec<T> {
    records
        .iter()
        .map(|existing| {
            if existing.id() == record.id() {
                record.clone()
            } else {
                existing.clone()
            }
        })
        .collect()
}

/// Removes the matching record; deleting an absent id is a no-op.
pub fn delete_by_id<T: Record>(records: &[T], id: i64) -> Vec<T> {
    records
        .iter()
        .filter(|record| record.id() != id)
        .cloned()
        .collect()
}

/// Whether a background reload is in flight. Mutations keep applying
/// normally while `Refreshing`; only the busy indicator changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreStatus {
    Idle,
    Refreshing,
}

/// One session's worth of records plus everything the UI needs to know
/// about the store itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub jobs: Vec<Job>,
    pub candidates: Vec<Candidate>,
    pub enterprises: Vec<Enterprise>,
}

pub struct Store {
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
    enterprises: Vec<Enterprise>,
    status: StoreStatus,
}

impl Store {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            jobs: snapshot.jobs,
            candidates: snapshot.candidates,
            enterprises: snapshot.enterprises,
            status: StoreStatus::Idle,
        }
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn enterprises(&self) -> &[Enterprise] {
        &self.enterprises
    }

    pub fn status(&self) -> StoreStatus {
        self.status
    }

    pub fn set_status(&mut self, status: StoreStatus) {
        self.status = status;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            jobs: self.jobs.clone(),
            candidates: self.candidates.clone(),
            enterprises: self.enterprises.clone(),
        }
    }

    /// Lands a refresh: the job collection is replaced wholesale. The
    /// other collections are provisioned externally and stay put.
    pub fn replace_jobs(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
    }

    /// The visible page of jobs for the given filter state.
    pub fn list_jobs(&self, filter: &FilterState) -> JobPage {
        query::job_page(&self.jobs, filter)
    }

    pub fn create_job(&mut self, draft: &JobDraft) -> Result<Job, ValidationError> {
        validate_draft(draft)?;
        let now = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let (jobs, job) = create_job(&self.jobs, draft, &now);
        self.jobs = jobs;
        Ok(job)
    }

    pub fn update_job_status(&mut self, id: i64, status: JobStatus) {
        self.jobs = update_status(&self.jobs, id, status);
    }

    pub fn update_job_comment(&mut self, id: i64, text: &str) {
        self.jobs = update_comment(&self.jobs, id, text);
    }

    pub fn delete_job(&mut self, id: i64) {
        self.jobs = delete_by_id(&self.jobs, id);
    }

    pub fn update_candidate(&mut self, record: &Candidate) {
        self.candidates = replace_record(&self.candidates, record);
    }

    /// No cascade: jobs referencing the deleted candidate keep their
    /// `candidate_id` and render from their denormalized fields.
    pub fn delete_candidate(&mut self, id: i64) {
        self.candidates = delete_by_id(&self.candidates, id);
    }

    pub fn update_enterprise(&mut self, record: &Enterprise) {
        self.enterprises = replace_record(&self.enterprises, record);
    }

    pub fn delete_enterprise(&mut self, id: i64) {
        self.enterprises = delete_by_id(&self.enterprises, id);
    }

    pub fn find_job(&self, id: i64) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    /// Cross-reference resolve; a dangling `candidate_id` comes back
    /// `None` and the caller must not open the profile modal.
    pub fn find_candidate(&self, id: i64) -> Option<&Candidate> {
        self.candidates.iter().find(|candidate| candidate.id == id)
    }

    pub fn find_enterprise(&self, id: i64) -> Option<&Enterprise> {
        self.enterprises.iter().find(|enterprise| enterprise.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: i64) -> Job {
        Job {
            id,
            created_at: "2025-01-01 09:00:00".to_string(),
            candidate_id: 1,
            candidate_name: "Dana Whitfield".to_string(),
            candidate_status: "Ready".to_string(),
            title: format!("Engineer {}", id),
            company: "Acme".to_string(),
            source: JobSource::LinkedIn,
            status: JobStatus::Queued,
            comment: String::new(),
            link: "https://example.com/job".to_string(),
            resume_available: false,
        }
    }

    fn draft(title: &str, company: &str) -> JobDraft {
        JobDraft {
            candidate_id: 1,
            candidate_name: "Dana Whitfield".to_string(),
            title: title.to_string(),
            company: company.to_string(),
            source: "LinkedIn".to_string(),
            link: String::new(),
            comment: String::new(),
        }
    }

    #[test]
    fn create_assigns_max_plus_one_and_prepends() {
        let jobs = vec![job(103), job(101), job(102)];
        let (next, created) = create_job(&jobs, &draft("QA Engineer", "Acme"), "2025-02-01 10:00:00");
        assert_eq!(created.id, 104);
        assert_eq!(next[0].id, 104);
        assert_eq!(next.len(), 4);
        assert_eq!(created.candidate_status, "Ready");
        assert!(!created.resume_available);
        assert_eq!(created.status, JobStatus::Queued);
    }

    #[test]
    fn create_on_empty_collection_starts_at_one() {
        let (next, created) = create_job(&[], &draft("QA Engineer", "Acme"), "2025-02-01 10:00:00");
        assert_eq!(created.id, 1);
        assert_eq!(next.len(), 1);
    }

    #[test]
    fn create_is_never_idempotent() {
        let d = draft("QA Engineer", "Acme");
        let (jobs, first) = create_job(&[], &d, "2025-02-01 10:00:00");
        let (jobs, second) = create_job(&jobs, &d, "2025-02-01 10:00:01");
        assert_eq!(jobs.len(), 2);
        assert!(second.id > first.id);
    }

    #[test]
    fn update_status_touches_only_status() {
        let jobs = vec![job(101), job(102)];
        let next = update_status(&jobs, 101, JobStatus::Interview);
        let before = &jobs[0];
        let after = &next[0];
        assert_eq!(after.status, JobStatus::Interview);
        let mut stripped = after.clone();
        stripped.status = before.status;
        assert_eq!(&stripped, before);
        assert_eq!(next[1], jobs[1]);
    }

    #[test]
    fn update_comment_touches_only_comment() {
        let jobs = vec![job(101)];
        let next = update_comment(&jobs, 101, "phone screen Friday");
        assert_eq!(next[0].comment, "phone screen Friday");
        let mut stripped = next[0].clone();
        stripped.comment = jobs[0].comment.clone();
        assert_eq!(stripped, jobs[0]);
    }

    #[test]
    fn update_on_unknown_id_is_a_noop() {
        let jobs = vec![job(101)];
        assert_eq!(update_status(&jobs, 999, JobStatus::Rejected), jobs);
        assert_eq!(update_comment(&jobs, 999, "nope"), jobs);
    }

    #[test]
    fn delete_is_idempotent() {
        let jobs = vec![job(101), job(102), job(103)];
        let once = delete_by_id(&jobs, 102);
        assert_eq!(once.iter().map(|j| j.id).collect::<Vec<_>>(), vec![101, 103]);
        let twice = delete_by_id(&once, 102);
        assert_eq!(twice, once);
    }

    #[test]
    fn replace_record_misses_are_noops() {
        let jobs = vec![job(101)];
        let stranger = job(999);
        assert_eq!(replace_record(&jobs, &stranger), jobs);
    }

    #[test]
    fn blank_title_or_company_is_rejected() {
        let mut store = Store::new(Snapshot {
            jobs: vec![job(7)],
            ..Default::default()
        });
        assert_eq!(
            store.create_job(&draft("", "Acme")),
            Err(ValidationError::BlankTitle)
        );
        assert_eq!(
            store.create_job(&draft("   ", "Acme")),
            Err(ValidationError::BlankTitle)
        );
        assert_eq!(
            store.create_job(&draft("QA Engineer", " ")),
            Err(ValidationError::BlankCompany)
        );
        assert_eq!(store.jobs().len(), 1);

        let created = store.create_job(&draft("QA Engineer", "Acme")).unwrap();
        assert_eq!(created.id, 8);
        assert_eq!(store.jobs()[0].id, 8);
    }

    #[test]
    fn candidate_delete_does_not_cascade_to_jobs() {
        let mut store = Store::new(Snapshot {
            jobs: vec![job(101)],
            candidates: vec![Candidate {
                id: 1,
                name: "Dana Whitfield".to_string(),
                email: "dana@example.com".to_string(),
                phone: String::new(),
                title: String::new(),
                key_skills: String::new(),
                preferred_location: String::new(),
                work_authorization: String::new(),
                employment_type: String::new(),
                salary_expectations: String::new(),
                education: String::new(),
                experience_years: 4,
                search_status: "Actively looking".to_string(),
                dice_active: false,
                yc_active: false,
                job_jarvis_active: false,
            }],
            enterprises: Vec::new(),
        });
        store.delete_candidate(1);
        assert!(store.find_candidate(1).is_none());
        // The soft reference dangles; the job row still renders.
        assert_eq!(store.jobs()[0].candidate_id, 1);
        assert_eq!(store.jobs()[0].candidate_name, "Dana Whitfield");
    }
}

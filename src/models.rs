use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Pipeline status of a job application. The store only deals in this
/// closed set; free-text labels from the UI go through `FromStr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Applied,
    Interview,
    Rejected,
    Selected,
    OnHold,
}

impl JobStatus {
    pub const ALL: [JobStatus; 6] = [
        JobStatus::Queued,
        JobStatus::Applied,
        JobStatus::Interview,
        JobStatus::Rejected,
        JobStatus::Selected,
        JobStatus::OnHold,
    ];

    /// UI-level label. Casing is uneven ("queued" vs "Applied") because
    /// these are the exact strings the platform displays and filters on.
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Queued => "queued",
            JobStatus::Applied => "Applied",
            JobStatus::Interview => "interview",
            JobStatus::Rejected => "rejected",
            JobStatus::Selected => "selected",
            JobStatus::OnHold => "on_hold",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JobStatus::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown job status '{}'", s))
    }
}

/// Where a job posting came from. The UI offers the known boards; the
/// store stays total by carrying anything else verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobSource {
    LinkedIn,
    Indeed,
    Wellfound,
    Referral,
    Direct,
    Other(String),
}

impl JobSource {
    pub const KNOWN: [&'static str; 5] =
        ["LinkedIn", "Indeed", "Wellfound", "Referral", "Direct"];

    pub fn parse(s: &str) -> JobSource {
        match s {
            _ if s.eq_ignore_ascii_case("linkedin") => JobSource::LinkedIn,
            _ if s.eq_ignore_ascii_case("indeed") => JobSource::Indeed,
            _ if s.eq_ignore_ascii_case("wellfound") => JobSource::Wellfound,
            _ if s.eq_ignore_ascii_case("referral") => JobSource::Referral,
            _ if s.eq_ignore_ascii_case("direct") => JobSource::Direct,
            _ => JobSource::Other(s.to_string()),
        }
    }
}

impl fmt::Display for JobSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobSource::LinkedIn => f.write_str("LinkedIn"),
            JobSource::Indeed => f.write_str("Indeed"),
            JobSource::Wellfound => f.write_str("Wellfound"),
            JobSource::Referral => f.write_str("Referral"),
            JobSource::Direct => f.write_str("Direct"),
            JobSource::Other(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: i64,
    pub created_at: String, // stamped at creation, never touched after
    pub candidate_id: i64,  // soft reference; may dangle after a candidate delete
    pub candidate_name: String, // denormalized for list rendering
    pub candidate_status: String,
    pub title: String,
    pub company: String,
    pub source: JobSource,
    pub status: JobStatus,
    pub comment: String,
    pub link: String,
    pub resume_available: bool,
}

/// Fields an operator fills in when creating a job; everything else is
/// assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobDraft {
    pub candidate_id: i64,
    pub candidate_name: String,
    pub title: String,
    pub company: String,
    pub source: String,
    pub link: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub title: String,
    pub key_skills: String, // comma-delimited
    pub preferred_location: String,
    pub work_authorization: String,
    pub employment_type: String,
    pub salary_expectations: String,
    pub education: String,
    pub experience_years: u32,
    pub search_status: String,
    pub dice_active: bool,
    pub yc_active: bool,
    pub job_jarvis_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnterpriseStatus {
    Active,
    Inactive,
}

impl fmt::Display for EnterpriseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnterpriseStatus::Active => f.write_str("Active"),
            EnterpriseStatus::Inactive => f.write_str("Inactive"),
        }
    }
}

impl FromStr for EnterpriseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            _ if s.eq_ignore_ascii_case("active") => Ok(EnterpriseStatus::Active),
            _ if s.eq_ignore_ascii_case("inactive") => Ok(EnterpriseStatus::Inactive),
            _ => Err(format!("unknown enterprise status '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enterprise {
    pub id: i64,
    pub name: String, // contact person, not the company
    pub email: String,
    pub company: String,
    pub location: String,
    // Editable counters, not computed aggregates.
    pub recruiters: u32,
    pub candidates: u32,
    pub jobs_posted: u32,
    pub status: EnterpriseStatus,
    pub joined: String,
}

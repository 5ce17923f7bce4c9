use anyhow::{Context, Result};
use std::path::Path;

use crate::models::{
    Candidate, Enterprise, EnterpriseStatus, Job, JobSource, JobStatus,
};
use crate::store::Snapshot;

// 42 jobs fills two 15-row pages and change, so pagination is exercised
// straight from a fresh session.
const JOB_COUNT: i64 = 42;

const TITLES: [&str; 7] = [
    "Backend Engineer",
    "Frontend Engineer",
    "Data Engineer",
    "DevOps Engineer",
    "QA Engineer",
    "Product Manager",
    "Engineering Manager",
];

const COMPANIES: [&str; 6] = [
    "Acme Systems",
    "Northwind Labs",
    "Hooli",
    "Vandelay Industries",
    "Initech",
    "Globex",
];

pub fn candidates() -> Vec<Candidate> {
    let rows: [(&str, &str, &str, &str, u32, &str); 8] = [
        ("Dana Whitfield", "dana.whitfield@example.com", "Senior Backend Engineer", "Rust, Go, Postgres", 8, "Actively looking"),
        ("Priya Nair", "priya.nair@example.com", "Frontend Engineer", "TypeScript, React, CSS", 5, "Actively looking"),
        ("Marcus Cole", "marcus.cole@example.com", "Data Engineer", "Python, Spark, Airflow", 6, "Open to offers"),
        ("Elena Petrova", "elena.petrova@example.com", "DevOps Engineer", "Kubernetes, Terraform, AWS", 7, "Actively looking"),
        ("Tomás Rivera", "tomas.rivera@example.com", "QA Engineer", "Selenium, Playwright, Rust", 4, "Passively looking"),
        ("Aisha Bello", "aisha.bello@example.com", "Product Manager", "Roadmapping, SQL, Analytics", 9, "Not looking"),
        ("Jun Park", "jun.park@example.com", "Engineering Manager", "Leadership, Java, Systems", 12, "Open to offers"),
        ("Sofia Lindqvist", "sofia.lindqvist@example.com", "Backend Engineer", "Elixir, Rust, Kafka", 3, "Actively looking"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (name, email, title, skills, years, search_status))| Candidate {
            id: i as i64 + 1,
            name: name.to_string(),
            email: email.to_string(),
            phone: format!("+1-555-01{:02}", i + 1),
            title: title.to_string(),
            key_skills: skills.to_string(),
            preferred_location: if i % 2 == 0 { "Remote" } else { "New York, NY" }.to_string(),
            work_authorization: if i % 3 == 0 { "H1B" } else { "US Citizen" }.to_string(),
            employment_type: if i % 4 == 0 { "Contract" } else { "Full-time" }.to_string(),
            salary_expectations: format!("${}k - ${}k", 110 + 10 * i, 140 + 10 * i),
            education: "BS Computer Science".to_string(),
            experience_years: *years,
            search_status: search_status.to_string(),
            dice_active: i % 2 == 0,
            yc_active: i % 3 == 0,
            job_jarvis_active: i % 2 == 1,
        })
        .collect()
}

pub fn enterprises() -> Vec<Enterprise> {
    let rows: [(&str, &str, &str, &str, u32, u32, u32, EnterpriseStatus, &str); 5] = [
        ("Janet Okafor", "janet@acmesystems.com", "Acme Systems", "Austin, TX", 4, 120, 32, EnterpriseStatus::Active, "2024-03-11"),
        ("Paul Greer", "paul@northwindlabs.io", "Northwind Labs", "Seattle, WA", 2, 45, 11, EnterpriseStatus::Active, "2024-06-02"),
        ("Mei Chen", "mei@hooli.com", "Hooli", "Palo Alto, CA", 9, 310, 78, EnterpriseStatus::Inactive, "2023-11-20"),
        ("Omar Haddad", "omar@vandelay.com", "Vandelay Industries", "Chicago, IL", 3, 80, 19, EnterpriseStatus::Active, "2024-09-15"),
        ("Lucy Barnes", "lucy@initech.com", "Initech", "Denver, CO", 1, 22, 6, EnterpriseStatus::Inactive, "2025-01-08"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (name, email, company, location, recruiters, cands, jobs_posted, status, joined))| {
            Enterprise {
                id: i as i64 + 1,
                name: name.to_string(),
                email: email.to_string(),
                company: company.to_string(),
                location: location.to_string(),
                recruiters: *recruiters,
                candidates: *cands,
                jobs_posted: *jobs_posted,
                status: *status,
                joined: joined.to_string(),
            }
        })
        .collect()
}

/// Seed jobs, newest first with descending ids, spread across every
/// status and source so no filter combination comes up empty.
pub fn jobs() -> Vec<Job> {
    let candidates = candidates();
    let sources = [
        JobSource::LinkedIn,
        JobSource::Indeed,
        JobSource::Wellfound,
        JobSource::Referral,
        JobSource::Direct,
    ];

    (0..JOB_COUNT)
        .map(|i| {
            let id = JOB_COUNT - i;
            let candidate = &candidates[(id as usize) % candidates.len()];
            let status = JobStatus::ALL[(id as usize) % JobStatus::ALL.len()];
            let day = 1 + (id % 28);
            Job {
                id,
                created_at: format!("2025-07-{:02} 09:{:02}:00", day, id % 60),
                candidate_id: candidate.id,
                candidate_name: candidate.name.clone(),
                candidate_status: "Ready".to_string(),
                title: TITLES[(id as usize) % TITLES.len()].to_string(),
                company: COMPANIES[(id as usize) % COMPANIES.len()].to_string(),
                source: sources[(id as usize) % sources.len()].clone(),
                status,
                comment: if id % 5 == 0 {
                    "Follow up next week".to_string()
                } else {
                    String::new()
                },
                link: format!("https://jobs.example.com/{}", id),
                resume_available: id % 3 == 0,
            }
        })
        .collect()
}

pub fn snapshot() -> Snapshot {
    Snapshot {
        jobs: jobs(),
        candidates: candidates(),
        enterprises: enterprises(),
    }
}

pub fn load(path: &Path) -> Result<Snapshot> {
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
}

pub fn save(path: &Path, snapshot: &Snapshot) -> Result<()> {
    let data = serde_json::to_string_pretty(snapshot)?;
    std::fs::write(path, data)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PAGE_SIZE;

    #[test]
    fn seed_ids_are_unique_and_descending() {
        let jobs = jobs();
        assert_eq!(jobs.len(), JOB_COUNT as usize);
        for pair in jobs.windows(2) {
            assert!(pair[0].id > pair[1].id);
        }
    }

    #[test]
    fn seed_paginates_past_two_pages() {
        assert!(jobs().len() > 2 * PAGE_SIZE);
    }

    #[test]
    fn seed_references_resolve() {
        let snapshot = snapshot();
        for job in &snapshot.jobs {
            let candidate = snapshot
                .candidates
                .iter()
                .find(|c| c.id == job.candidate_id)
                .expect("seed job references a seeded candidate");
            assert_eq!(candidate.name, job.candidate_name);
        }
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = snapshot();
        let data = serde_json::to_string(&snapshot).unwrap();
        let back: Snapshot = serde_json::from_str(&data).unwrap();
        assert_eq!(back.jobs, snapshot.jobs);
        assert_eq!(back.candidates, snapshot.candidates);
        assert_eq!(back.enterprises, snapshot.enterprises);
    }
}

mod modal;
mod models;
mod query;
mod refresh;
mod seed;
mod store;
mod tui;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use models::JobStatus;
use query::{FilterState, SourceFilter, StatusFilter};
use store::Store;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Recruiting platform admin console - jobs, candidates, enterprises")]
struct Cli {
    /// Load the session from a snapshot file instead of the built-in seed
    #[arg(short, long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console
    Console,

    /// Job operations
    Jobs {
        #[command(subcommand)]
        command: JobCommands,
    },

    /// Candidate operations
    Candidates {
        #[command(subcommand)]
        command: CandidateCommands,
    },

    /// Enterprise operations
    Enterprises {
        #[command(subcommand)]
        command: EnterpriseCommands,
    },

    /// Write the session snapshot to a JSON file
    Export {
        /// Output file path
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum JobCommands {
    /// List jobs, one page at a time
    List {
        /// Candidate name substring, case-insensitive
        #[arg(long)]
        search: Option<String>,

        /// Filter by status (queued, Applied, interview, rejected, selected, on_hold)
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by source (LinkedIn, Indeed, Wellfound, Referral, Direct)
        #[arg(long)]
        source: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show job details
    Show {
        /// Job ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum CandidateCommands {
    /// List all candidates
    List,

    /// Show candidate details
    Show {
        /// Candidate ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum EnterpriseCommands {
    /// List all enterprise contacts
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let snapshot = match &cli.snapshot {
        Some(path) => seed::load(path)?,
        None => seed::snapshot(),
    };
    let store = Store::new(snapshot);

    match cli.command {
        Commands::Console => {
            tui::run_console(store)?;
        }

        Commands::Jobs { command } => match command {
            JobCommands::List {
                search,
                status,
                source,
                page,
            } => {
                let mut filter = FilterState::default();
                if let Some(search) = search {
                    filter.set_search(search);
                }
                if let Some(status) = status {
                    let status = status.parse::<JobStatus>().map_err(|e| anyhow!(e))?;
                    filter.set_status(StatusFilter::Only(status));
                }
                if let Some(source) = source {
                    filter.set_source(SourceFilter::Only(models::JobSource::parse(&source)));
                }
                // Applied after the filters so the requested page survives
                // the filter-reset policy; out-of-range input just clamps.
                filter.set_page(page);

                let view = store.list_jobs(&filter);
                if view.items.is_empty() {
                    println!("No jobs found.");
                } else {
                    println!(
                        "{:<6} {:<10} {:<26} {:<20} {:<10} {:<20}",
                        "ID", "STATUS", "TITLE", "COMPANY", "SOURCE", "CANDIDATE"
                    );
                    println!("{}", "-".repeat(96));
                    for job in &view.items {
                        println!(
                            "{:<6} {:<10} {:<26} {:<20} {:<10} {:<20}",
                            job.id,
                            job.status.to_string(),
                            truncate(&job.title, 24),
                            truncate(&job.company, 18),
                            truncate(&job.source.to_string(), 9),
                            truncate(&job.candidate_name, 18)
                        );
                    }
                    println!(
                        "\nPage {} of {} ({} total)",
                        view.page,
                        view.total_pages.max(1),
                        view.total_filtered
                    );
                }
            }

            JobCommands::Show { id } => match store.find_job(id) {
                Some(job) => {
                    println!("Job #{}", job.id);
                    println!("Title: {}", job.title);
                    println!("Company: {}", job.company);
                    println!("Status: {}", job.status);
                    println!("Source: {}", job.source);
                    if !job.link.is_empty() {
                        println!("Link: {}", job.link);
                    }
                    println!("Created: {}", job.created_at);
                    println!(
                        "Resume available: {}",
                        if job.resume_available { "yes" } else { "no" }
                    );
                    if !job.comment.is_empty() {
                        println!("Comment: {}", job.comment);
                    }
                    match store.find_candidate(job.candidate_id) {
                        Some(candidate) => {
                            println!("\nCandidate #{} - {}", candidate.id, candidate.name);
                            println!("  Email: {}", candidate.email);
                            println!("  Status: {}", candidate.search_status);
                        }
                        None => {
                            // Dangling reference; the denormalized fields
                            // are all we have.
                            println!(
                                "\nCandidate: {} ({}) - full profile unavailable",
                                job.candidate_name, job.candidate_status
                            );
                        }
                    }
                }
                None => {
                    println!("Job #{} not found.", id);
                }
            },
        },

        Commands::Candidates { command } => match command {
            CandidateCommands::List => {
                let candidates = store.candidates();
                if candidates.is_empty() {
                    println!("No candidates found.");
                } else {
                    println!(
                        "{:<6} {:<22} {:<26} {:<28} {:>5}  {:<18}",
                        "ID", "NAME", "TITLE", "EMAIL", "YRS", "SEARCH STATUS"
                    );
                    println!("{}", "-".repeat(110));
                    for candidate in candidates {
                        println!(
                            "{:<6} {:<22} {:<26} {:<28} {:>5}  {:<18}",
                            candidate.id,
                            truncate(&candidate.name, 20),
                            truncate(&candidate.title, 24),
                            truncate(&candidate.email, 26),
                            candidate.experience_years,
                            truncate(&candidate.search_status, 16)
                        );
                    }
                }
            }

            CandidateCommands::Show { id } => match store.find_candidate(id) {
                Some(candidate) => {
                    println!("Candidate #{} - {}", candidate.id, candidate.name);
                    println!("Title: {}", candidate.title);
                    println!("Email: {}", candidate.email);
                    println!("Phone: {}", candidate.phone);
                    println!("Skills: {}", candidate.key_skills);
                    println!("Location: {}", candidate.preferred_location);
                    println!("Work authorization: {}", candidate.work_authorization);
                    println!("Employment type: {}", candidate.employment_type);
                    println!("Salary: {}", candidate.salary_expectations);
                    println!("Education: {}", candidate.education);
                    println!("Experience: {} years", candidate.experience_years);
                    println!("Search status: {}", candidate.search_status);
                    println!(
                        "Platforms: dice={} yc={} job_jarvis={}",
                        candidate.dice_active, candidate.yc_active, candidate.job_jarvis_active
                    );
                }
                None => {
                    println!("Candidate #{} not found.", id);
                }
            },
        },

        Commands::Enterprises { command } => match command {
            EnterpriseCommands::List => {
                let enterprises = store.enterprises();
                if enterprises.is_empty() {
                    println!("No enterprises found.");
                } else {
                    println!(
                        "{:<6} {:<18} {:<22} {:<18} {:<10} {:>6} {:>6} {:>6}  {:<12}",
                        "ID", "CONTACT", "COMPANY", "LOCATION", "STATUS", "RECR", "CAND", "JOBS", "JOINED"
                    );
                    println!("{}", "-".repeat(112));
                    for enterprise in enterprises {
                        println!(
                            "{:<6} {:<18} {:<22} {:<18} {:<10} {:>6} {:>6} {:>6}  {:<12}",
                            enterprise.id,
                            truncate(&enterprise.name, 16),
                            truncate(&enterprise.company, 20),
                            truncate(&enterprise.location, 16),
                            enterprise.status.to_string(),
                            enterprise.recruiters,
                            enterprise.candidates,
                            enterprise.jobs_posted,
                            enterprise.joined
                        );
                    }
                }
            }
        },

        Commands::Export { file } => {
            seed::save(&file, &store.snapshot())?;
            println!("Snapshot written to {}", file.display());
        }
    }

    Ok(())
}

// Counts chars, not bytes, so names like "Tomás" never split mid-character.
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 20), "short");
        assert_eq!(
            truncate("aaaaaaaaaaaaaaaaé Rivera-Lopez", 20),
            "aaaaaaaaaaaaaaaaé..."
        );
    }
}

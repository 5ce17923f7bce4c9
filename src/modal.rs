use crate::models::{Candidate, Enterprise, Job, JobDraft};
use crate::store::{Store, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteKind {
    Candidate,
    Enterprise,
}

/// The single active editing/confirmation surface. At most one modal is
/// ever open: assigning a new state closes whatever was open.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalState {
    #[default]
    Idle,
    EditingComment { job_id: i64, draft: String },
    EditingCandidate { draft: Candidate },
    EditingEnterprise { draft: Enterprise },
    ConfirmingDelete { kind: DeleteKind, id: i64 },
    CreatingJob { draft: JobDraft },
}

impl ModalState {
    pub fn is_idle(&self) -> bool {
        matches!(self, ModalState::Idle)
    }
}

#[derive(Default)]
pub struct ModalController {
    state: ModalState,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    /// Opens the comment editor seeded with the job's current comment.
    /// An unknown job id opens nothing.
    pub fn open_comment(&mut self, store: &Store, job_id: i64) -> &ModalState {
        if let Some(job) = store.find_job(job_id) {
            self.state = ModalState::EditingComment {
                job_id,
                draft: job.comment.clone(),
            };
        }
        &self.state
    }

    /// Opens the candidate form with a full copy of the record. A
    /// dangling reference resolves to nothing and is silently ignored.
    pub fn open_candidate(&mut self, store: &Store, candidate_id: i64) -> &ModalState {
        if let Some(candidate) = store.find_candidate(candidate_id) {
            self.state = ModalState::EditingCandidate {
                draft: candidate.clone(),
            };
        }
        &self.state
    }

    pub fn open_enterprise(&mut self, store: &Store, enterprise_id: i64) -> &ModalState {
        if let Some(enterprise) = store.find_enterprise(enterprise_id) {
            self.state = ModalState::EditingEnterprise {
                draft: enterprise.clone(),
            };
        }
        &self.state
    }

    /// Delete straight from a list row, bypassing the edit form.
    pub fn open_delete(&mut self, kind: DeleteKind, id: i64) -> &ModalState {
        self.state = ModalState::ConfirmingDelete { kind, id };
        &self.state
    }

    pub fn open_create(&mut self) -> &ModalState {
        self.state = ModalState::CreatingJob {
            draft: JobDraft::default(),
        };
        &self.state
    }

    /// From an edit form, swap to the delete confirmation. The unsaved
    /// draft is discarded; only the confirmation survives.
    pub fn request_delete(&mut self) -> &ModalState {
        match &self.state {
            ModalState::EditingCandidate { draft } => {
                self.state = ModalState::ConfirmingDelete {
                    kind: DeleteKind::Candidate,
                    id: draft.id,
                };
            }
            ModalState::EditingEnterprise { draft } => {
                self.state = ModalState::ConfirmingDelete {
                    kind: DeleteKind::Enterprise,
                    id: draft.id,
                };
            }
            _ => {}
        }
        &self.state
    }

    /// Cancel/close: back to idle, nothing written.
    pub fn close(&mut self) -> &ModalState {
        self.state = ModalState::Idle;
        &self.state
    }

    /// Commits the open modal's draft to the store. Everything here is
    /// synchronous; the only way to stay open is a create-job draft that
    /// fails validation, which leaves the store untouched.
    pub fn save(&mut self, store: &mut Store) -> Result<Option<Job>, ValidationError> {
        match std::mem::take(&mut self.state) {
            ModalState::EditingComment { job_id, draft } => {
                store.update_job_comment(job_id, &draft);
                Ok(None)
            }
            ModalState::EditingCandidate { draft } => {
                store.update_candidate(&draft);
                Ok(None)
            }
            ModalState::EditingEnterprise { draft } => {
                store.update_enterprise(&draft);
                Ok(None)
            }
            ModalState::CreatingJob { draft } => match store.create_job(&draft) {
                Ok(job) => Ok(Some(job)),
                Err(err) => {
                    self.state = ModalState::CreatingJob { draft };
                    Err(err)
                }
            },
            state @ ModalState::ConfirmingDelete { .. } => {
                // Confirmation goes through confirm_delete, not save.
                self.state = state;
                Ok(None)
            }
            ModalState::Idle => Ok(None),
        }
    }

    pub fn confirm_delete(&mut self, store: &mut Store) -> &ModalState {
        if let ModalState::ConfirmingDelete { kind, id } = self.state {
            match kind {
                DeleteKind::Candidate => store.delete_candidate(id),
                DeleteKind::Enterprise => store.delete_enterprise(id),
            }
            self.state = ModalState::Idle;
        }
        &self.state
    }

    pub fn comment_draft_mut(&mut self) -> Option<&mut String> {
        match &mut self.state {
            ModalState::EditingComment { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn candidate_draft_mut(&mut self) -> Option<&mut Candidate> {
        match &mut self.state {
            ModalState::EditingCandidate { draft } => Some(draft),
            _ => None,
        }
    }

    pub fn enterprise_draft_mut(&mut self) -> Option<&mut Enterprise> {
        match &mut self.state {
            ModalState::EditingEnterprise { draft } => Some(draft),
            _ => None,
        }
    }

    pub fn job_draft_mut(&mut self) -> Option<&mut JobDraft> {
        match &mut self.state {
            ModalState::CreatingJob { draft } => Some(draft),
            _ => None,
        }
    }
}

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;
use std::str::FromStr;
use std::time::Duration;

use crate::modal::{DeleteKind, ModalController, ModalState};
use crate::models::{Candidate, Enterprise, EnterpriseStatus, JobDraft, JobSource, JobStatus};
use crate::query::{self, FilterState, JobPage, SourceFilter, StatusFilter};
use crate::refresh::Refresher;
use crate::seed;
use crate::store::{Store, StoreStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Jobs,
    Candidates,
    Enterprises,
}

impl Tab {
    fn title(&self) -> &'static str {
        match self {
            Tab::Jobs => "Jobs",
            Tab::Candidates => "Candidates",
            Tab::Enterprises => "Enterprises",
        }
    }
}

/// Scratch buffer for the field-by-field modal forms. The modal
/// controller owns the typed draft; this is just the text being typed,
/// written back into the draft on save.
struct Form {
    fields: Vec<FormField>,
    cursor: usize,
}

struct FormField {
    label: &'static str,
    value: String,
}

impl Form {
    fn new(fields: Vec<(&'static str, String)>) -> Self {
        Self {
            fields: fields
                .into_iter()
                .map(|(label, value)| FormField { label, value })
                .collect(),
            cursor: 0,
        }
    }

    fn next_field(&mut self) {
        self.cursor = (self.cursor + 1) % self.fields.len();
    }

    fn prev_field(&mut self) {
        self.cursor = (self.cursor + self.fields.len() - 1) % self.fields.len();
    }

    fn push(&mut self, c: char) {
        self.fields[self.cursor].value.push(c);
    }

    fn pop(&mut self) {
        self.fields[self.cursor].value.pop();
    }

    fn value(&self, label: &str) -> &str {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
            .unwrap_or("")
    }
}

fn candidate_form(candidate: &Candidate) -> Form {
    Form::new(vec![
        ("Name", candidate.name.clone()),
        ("Email", candidate.email.clone()),
        ("Phone", candidate.phone.clone()),
        ("Title", candidate.title.clone()),
        ("Key skills", candidate.key_skills.clone()),
        ("Location", candidate.preferred_location.clone()),
        ("Work auth", candidate.work_authorization.clone()),
        ("Employment", candidate.employment_type.clone()),
        ("Salary", candidate.salary_expectations.clone()),
        ("Education", candidate.education.clone()),
        ("Experience (yrs)", candidate.experience_years.to_string()),
        ("Search status", candidate.search_status.clone()),
        ("Dice (yes/no)", yes_no(candidate.dice_active)),
        ("YC (yes/no)", yes_no(candidate.yc_active)),
        ("Jarvis (yes/no)", yes_no(candidate.job_jarvis_active)),
    ])
}

fn apply_candidate_form(form: &Form, draft: &mut Candidate) {
    draft.name = form.value("Name").to_string();
    draft.email = form.value("Email").to_string();
    draft.phone = form.value("Phone").to_string();
    draft.title = form.value("Title").to_string();
    draft.key_skills = form.value("Key skills").to_string();
    draft.preferred_location = form.value("Location").to_string();
    draft.work_authorization = form.value("Work auth").to_string();
    draft.employment_type = form.value("Employment").to_string();
    draft.salary_expectations = form.value("Salary").to_string();
    draft.education = form.value("Education").to_string();
    draft.experience_years = form
        .value("Experience (yrs)")
        .trim()
        .parse()
        .unwrap_or(draft.experience_years);
    draft.search_status = form.value("Search status").to_string();
    draft.dice_active = parse_yes_no(form.value("Dice (yes/no)"), draft.dice_active);
    draft.yc_active = parse_yes_no(form.value("YC (yes/no)"), draft.yc_active);
    draft.job_jarvis_active = parse_yes_no(form.value("Jarvis (yes/no)"), draft.job_jarvis_active);
}

fn enterprise_form(enterprise: &Enterprise) -> Form {
    Form::new(vec![
        ("Contact", enterprise.name.clone()),
        ("Email", enterprise.email.clone()),
        ("Company", enterprise.company.clone()),
        ("Location", enterprise.location.clone()),
        ("Recruiters", enterprise.recruiters.to_string()),
        ("Candidates", enterprise.candidates.to_string()),
        ("Jobs posted", enterprise.jobs_posted.to_string()),
        ("Status", enterprise.status.to_string()),
        ("Joined", enterprise.joined.clone()),
    ])
}

fn apply_enterprise_form(form: &Form, draft: &mut Enterprise) {
    draft.name = form.value("Contact").to_string();
    draft.email = form.value("Email").to_string();
    draft.company = form.value("Company").to_string();
    draft.location = form.value("Location").to_string();
    draft.recruiters = form.value("Recruiters").trim().parse().unwrap_or(draft.recruiters);
    draft.candidates = form.value("Candidates").trim().parse().unwrap_or(draft.candidates);
    draft.jobs_posted = form
        .value("Jobs posted")
        .trim()
        .parse()
        .unwrap_or(draft.jobs_posted);
    draft.status = EnterpriseStatus::from_str(form.value("Status").trim()).unwrap_or(draft.status);
    draft.joined = form.value("Joined").to_string();
}

fn job_form(draft: &JobDraft) -> Form {
    Form::new(vec![
        ("Title", draft.title.clone()),
        ("Company", draft.company.clone()),
        ("Candidate id", draft.candidate_id.to_string()),
        ("Candidate name", draft.candidate_name.clone()),
        ("Source", draft.source.clone()),
        ("Link", draft.link.clone()),
        ("Comment", draft.comment.clone()),
    ])
}

fn apply_job_form(form: &Form, draft: &mut JobDraft) {
    draft.title = form.value("Title").to_string();
    draft.company = form.value("Company").to_string();
    draft.candidate_id = form
        .value("Candidate id")
        .trim()
        .parse()
        .unwrap_or(draft.candidate_id);
    draft.candidate_name = form.value("Candidate name").to_string();
    draft.source = form.value("Source").to_string();
    draft.link = form.value("Link").to_string();
    draft.comment = form.value("Comment").to_string();
}

fn yes_no(flag: bool) -> String {
    if flag { "yes" } else { "no" }.to_string()
}

fn parse_yes_no(s: &str, fallback: bool) -> bool {
    match s.trim().to_lowercase().as_str() {
        "yes" | "y" | "true" => true,
        "no" | "n" | "false" => false,
        _ => fallback,
    }
}

struct AppState {
    store: Store,
    filter: FilterState,
    modal: ModalController,
    refresher: Refresher,
    tab: Tab,
    selected: usize,
    searching: bool,
    form: Option<Form>,
    notice: Option<String>,
}

impl AppState {
    fn new(store: Store) -> Self {
        Self {
            store,
            filter: FilterState::default(),
            modal: ModalController::new(),
            refresher: Refresher::new(),
            tab: Tab::Jobs,
            selected: 0,
            searching: false,
            form: None,
            notice: None,
        }
    }

    fn job_page(&self) -> JobPage {
        self.store.list_jobs(&self.filter)
    }

    fn visible_len(&self) -> usize {
        match self.tab {
            Tab::Jobs => self.job_page().items.len(),
            Tab::Candidates => self.store.candidates().len(),
            Tab::Enterprises => self.store.enterprises().len(),
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }

    fn next_row(&mut self) {
        let len = self.visible_len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
    }

    fn prev_row(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    fn selected_job_id(&self) -> Option<i64> {
        self.job_page().items.get(self.selected).map(|j| j.id)
    }

    fn switch_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.selected = 0;
        }
    }

    fn next_page(&mut self) {
        let view = self.job_page();
        if view.page < view.total_pages {
            self.filter.set_page(view.page + 1);
            self.selected = 0;
        }
    }

    fn prev_page(&mut self) {
        let view = self.job_page();
        if view.page > 1 {
            self.filter.set_page(view.page - 1);
            self.selected = 0;
        }
    }

    fn cycle_status_filter(&mut self) {
        let next = match self.filter.status() {
            StatusFilter::All => StatusFilter::Only(JobStatus::ALL[0]),
            StatusFilter::Only(status) => {
                let idx = JobStatus::ALL.iter().position(|s| s == status).unwrap_or(0);
                match JobStatus::ALL.get(idx + 1) {
                    Some(status) => StatusFilter::Only(*status),
                    None => StatusFilter::All,
                }
            }
        };
        self.filter.set_status(next);
        self.selected = 0;
    }

    fn cycle_source_filter(&mut self) {
        let known = JobSource::KNOWN;
        let next = match self.filter.source() {
            SourceFilter::All => SourceFilter::Only(JobSource::parse(known[0])),
            SourceFilter::Only(source) => {
                let label = source.to_string();
                let idx = known.iter().position(|s| *s == label);
                match idx.and_then(|i| known.get(i + 1)) {
                    Some(s) => SourceFilter::Only(JobSource::parse(s)),
                    None => SourceFilter::All,
                }
            }
        };
        self.filter.set_source(next);
        self.selected = 0;
    }

    fn cycle_selected_status(&mut self, forward: bool) {
        let Some(id) = self.selected_job_id() else { return };
        let Some(job) = self.store.find_job(id) else { return };
        let idx = JobStatus::ALL.iter().position(|s| *s == job.status).unwrap_or(0);
        let len = JobStatus::ALL.len();
        let next = if forward {
            JobStatus::ALL[(idx + 1) % len]
        } else {
            JobStatus::ALL[(idx + len - 1) % len]
        };
        self.store.update_job_status(id, next);
    }

    fn request_refresh(&mut self) {
        self.refresher.request(seed::jobs);
        self.store.set_status(StoreStatus::Refreshing);
    }

    /// Lands a finished refresh, if any: fresh jobs in, filters and page
    /// back to defaults.
    fn poll_refresh(&mut self) {
        if let Some(jobs) = self.refresher.poll() {
            self.store.replace_jobs(jobs);
            self.filter.reset();
            self.selected = 0;
        }
        if !self.refresher.in_flight() {
            self.store.set_status(StoreStatus::Idle);
        }
    }
}

pub fn run_console(store: Store) -> Result<()> {
    let mut state = AppState::new(store);

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let mut list_state = ListState::default();
    list_state.select(Some(0));

    loop {
        state.poll_refresh();
        state.clamp_selection();
        list_state.select(Some(state.selected));

        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        // Short poll so pending refreshes land without a keypress.
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        if !state.modal.state().is_idle() {
            handle_modal_key(state, key.code, key.modifiers);
            continue;
        }

        if state.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => state.searching = false,
                KeyCode::Backspace => {
                    let mut search = state.filter.search().to_string();
                    search.pop();
                    state.filter.set_search(search);
                    state.selected = 0;
                }
                KeyCode::Char(c) => {
                    let mut search = state.filter.search().to_string();
                    search.push(c);
                    state.filter.set_search(search);
                    state.selected = 0;
                }
                _ => {}
            }
            continue;
        }

        state.notice = None;
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Char('1') => state.switch_tab(Tab::Jobs),
            KeyCode::Char('2') => state.switch_tab(Tab::Candidates),
            KeyCode::Char('3') => state.switch_tab(Tab::Enterprises),
            KeyCode::Tab => {
                let next = match state.tab {
                    Tab::Jobs => Tab::Candidates,
                    Tab::Candidates => Tab::Enterprises,
                    Tab::Enterprises => Tab::Jobs,
                };
                state.switch_tab(next);
            }
            KeyCode::Down | KeyCode::Char('j') => state.next_row(),
            KeyCode::Up | KeyCode::Char('k') => state.prev_row(),
            KeyCode::Left | KeyCode::Char('h') => state.prev_page(),
            KeyCode::Right | KeyCode::Char('l') => state.next_page(),
            KeyCode::Char('/') if state.tab == Tab::Jobs => state.searching = true,
            KeyCode::Char('s') if state.tab == Tab::Jobs => state.cycle_status_filter(),
            KeyCode::Char('o') if state.tab == Tab::Jobs => state.cycle_source_filter(),
            KeyCode::Char(']') if state.tab == Tab::Jobs => state.cycle_selected_status(true),
            KeyCode::Char('[') if state.tab == Tab::Jobs => state.cycle_selected_status(false),
            KeyCode::Char('r') => state.request_refresh(),
            KeyCode::Char('n') if state.tab == Tab::Jobs => {
                state.modal.open_create();
                if let Some(draft) = state.modal.job_draft_mut() {
                    state.form = Some(job_form(draft));
                }
            }
            KeyCode::Char('c') if state.tab == Tab::Jobs => {
                if let Some(id) = state.selected_job_id() {
                    state.modal.open_comment(&state.store, id);
                }
            }
            KeyCode::Char('e') => match state.tab {
                Tab::Jobs => {
                    // Resolve the soft reference; a dangling id opens
                    // nothing.
                    if let Some(id) = state.selected_job_id() {
                        if let Some(candidate_id) =
                            state.store.find_job(id).map(|j| j.candidate_id)
                        {
                            state.modal.open_candidate(&state.store, candidate_id);
                            if let Some(draft) = state.modal.candidate_draft_mut() {
                                state.form = Some(candidate_form(draft));
                            }
                        }
                    }
                }
                Tab::Candidates => {
                    if let Some(candidate) = state.store.candidates().get(state.selected) {
                        let id = candidate.id;
                        state.modal.open_candidate(&state.store, id);
                        if let Some(draft) = state.modal.candidate_draft_mut() {
                            state.form = Some(candidate_form(draft));
                        }
                    }
                }
                Tab::Enterprises => {
                    if let Some(enterprise) = state.store.enterprises().get(state.selected) {
                        let id = enterprise.id;
                        state.modal.open_enterprise(&state.store, id);
                        if let Some(draft) = state.modal.enterprise_draft_mut() {
                            state.form = Some(enterprise_form(draft));
                        }
                    }
                }
            },
            KeyCode::Char('d') => match state.tab {
                Tab::Jobs => {
                    if let Some(id) = state.selected_job_id() {
                        state.store.delete_job(id);
                    }
                }
                Tab::Candidates => {
                    if let Some(candidate) = state.store.candidates().get(state.selected) {
                        state.modal.open_delete(DeleteKind::Candidate, candidate.id);
                    }
                }
                Tab::Enterprises => {
                    if let Some(enterprise) = state.store.enterprises().get(state.selected) {
                        state
                            .modal
                            .open_delete(DeleteKind::Enterprise, enterprise.id);
                    }
                }
            },
            _ => {}
        }
    }
    Ok(())
}

fn handle_modal_key(state: &mut AppState, code: KeyCode, modifiers: KeyModifiers) {
    match state.modal.state() {
        ModalState::EditingComment { .. } => match code {
            KeyCode::Esc => {
                state.modal.close();
            }
            KeyCode::Enter => {
                if let Err(err) = state.modal.save(&mut state.store) {
                    state.notice = Some(err.to_string());
                }
            }
            KeyCode::Backspace => {
                if let Some(draft) = state.modal.comment_draft_mut() {
                    draft.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(draft) = state.modal.comment_draft_mut() {
                    draft.push(c);
                }
            }
            _ => {}
        },

        ModalState::ConfirmingDelete { .. } => match code {
            KeyCode::Char('y') | KeyCode::Enter => {
                state.modal.confirm_delete(&mut state.store);
                state.clamp_selection();
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                state.modal.close();
            }
            _ => {}
        },

        ModalState::EditingCandidate { .. }
        | ModalState::EditingEnterprise { .. }
        | ModalState::CreatingJob { .. } => {
            // Ctrl+D from an edit form swaps to the delete confirmation,
            // abandoning the draft.
            if code == KeyCode::Char('d') && modifiers.contains(KeyModifiers::CONTROL) {
                if !matches!(state.modal.state(), ModalState::CreatingJob { .. }) {
                    state.modal.request_delete();
                    state.form = None;
                }
                return;
            }
            match code {
                KeyCode::Esc => {
                    state.modal.close();
                    state.form = None;
                }
                KeyCode::Enter => save_form(state),
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(form) = &mut state.form {
                        form.next_field();
                    }
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(form) = &mut state.form {
                        form.prev_field();
                    }
                }
                KeyCode::Backspace => {
                    if let Some(form) = &mut state.form {
                        form.pop();
                    }
                }
                KeyCode::Char(c) => {
                    if let Some(form) = &mut state.form {
                        form.push(c);
                    }
                }
                _ => {}
            }
        }

        ModalState::Idle => {}
    }
}

fn save_form(state: &mut AppState) {
    let Some(form) = &state.form else {
        if let Err(err) = state.modal.save(&mut state.store) {
            state.notice = Some(err.to_string());
        }
        return;
    };

    if let Some(draft) = state.modal.candidate_draft_mut() {
        apply_candidate_form(form, draft);
    } else if let Some(draft) = state.modal.enterprise_draft_mut() {
        apply_enterprise_form(form, draft);
    } else if let Some(draft) = state.modal.job_draft_mut() {
        apply_job_form(form, draft);
    }

    match state.modal.save(&mut state.store) {
        Ok(_) => {
            state.form = None;
            state.notice = None;
        }
        Err(err) => {
            // Modal stays open with the draft intact; surface the reason.
            state.notice = Some(err.to_string());
        }
    }
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.area());

    draw_tabs(frame, state, chunks[0]);

    match state.tab {
        Tab::Jobs => draw_jobs(frame, state, chunks[1], list_state),
        Tab::Candidates => draw_candidates(frame, state, chunks[1], list_state),
        Tab::Enterprises => draw_enterprises(frame, state, chunks[1], list_state),
    }

    draw_footer(frame, state, chunks[2]);

    if !state.modal.state().is_idle() {
        draw_modal(frame, state);
    }
}

fn draw_tabs(frame: &mut Frame, state: &AppState, area: Rect) {
    let mut spans = Vec::new();
    for (i, tab) in [Tab::Jobs, Tab::Candidates, Tab::Enterprises].iter().enumerate() {
        let style = if *tab == state.tab {
            Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!(" [{}] {} ", i + 1, tab.title()), style));
    }
    if state.store.status() == StoreStatus::Refreshing {
        spans.push(Span::styled(
            "  refreshing...",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn status_style(status: JobStatus) -> Style {
    match status {
        JobStatus::Queued => Style::default().fg(Color::Gray),
        JobStatus::Applied => Style::default().fg(Color::Cyan),
        JobStatus::Interview => Style::default().fg(Color::Yellow),
        JobStatus::Rejected => Style::default().fg(Color::Red),
        JobStatus::Selected => Style::default().fg(Color::Green),
        JobStatus::OnHold => Style::default().fg(Color::DarkGray),
    }
}

fn draw_jobs(frame: &mut Frame, state: &AppState, area: Rect, list_state: &mut ListState) {
    let view = state.job_page();
    let items: Vec<ListItem> = view
        .items
        .iter()
        .map(|job| {
            let resume = if job.resume_available { "R" } else { " " };
            ListItem::new(Line::from(vec![
                Span::raw(format!("#{:<5}", job.id)),
                Span::styled(format!("{:<10}", job.status.to_string()), status_style(job.status)),
                Span::raw(format!(
                    " {:<26} {:<20} {:<10} {:<20} {}",
                    truncate(&job.title, 24),
                    truncate(&job.company, 18),
                    truncate(&job.source.to_string(), 9),
                    truncate(&job.candidate_name, 18),
                    resume
                )),
            ]))
        })
        .collect();

    let status_label = match state.filter.status() {
        StatusFilter::All => "all".to_string(),
        StatusFilter::Only(status) => status.to_string(),
    };
    let source_label = match state.filter.source() {
        SourceFilter::All => "all".to_string(),
        SourceFilter::Only(source) => source.to_string(),
    };
    let search = if state.filter.search().is_empty() && !state.searching {
        String::new()
    } else {
        let cursor = if state.searching { "_" } else { "" };
        format!("  search: {}{}", state.filter.search(), cursor)
    };
    let title = format!(
        " Jobs ({} total)  status: {}  source: {}{} ",
        view.total_filtered, status_label, source_label, search
    );

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, list_state);
}

fn draw_candidates(frame: &mut Frame, state: &AppState, area: Rect, list_state: &mut ListState) {
    let items: Vec<ListItem> = state
        .store
        .candidates()
        .iter()
        .map(|c| {
            let flags = format!(
                "{}{}{}",
                if c.dice_active { "D" } else { "-" },
                if c.yc_active { "Y" } else { "-" },
                if c.job_jarvis_active { "J" } else { "-" }
            );
            ListItem::new(format!(
                "#{:<4} {:<22} {:<26} {:>3}y  {:<18} {}",
                c.id,
                truncate(&c.name, 20),
                truncate(&c.title, 24),
                c.experience_years,
                truncate(&c.search_status, 16),
                flags
            ))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Candidates ({}) ",
            state.store.candidates().len()
        )))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, list_state);
}

fn draw_enterprises(frame: &mut Frame, state: &AppState, area: Rect, list_state: &mut ListState) {
    let items: Vec<ListItem> = state
        .store
        .enterprises()
        .iter()
        .map(|e| {
            let status = match e.status {
                EnterpriseStatus::Active => Span::styled("Active  ", Style::default().fg(Color::Green)),
                EnterpriseStatus::Inactive => {
                    Span::styled("Inactive", Style::default().fg(Color::DarkGray))
                }
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "#{:<4} {:<18} {:<22} {:<18} ",
                    e.id,
                    truncate(&e.name, 16),
                    truncate(&e.company, 20),
                    truncate(&e.location, 16)
                )),
                status,
                Span::raw(format!(
                    "  r:{:<4} c:{:<4} j:{:<4} joined {}",
                    e.recruiters, e.candidates, e.jobs_posted, e.joined
                )),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " Enterprises ({}) ",
            state.store.enterprises().len()
        )))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, list_state);
}

fn draw_footer(frame: &mut Frame, state: &AppState, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);

    if state.tab == Tab::Jobs {
        let view = state.job_page();
        let mut spans = vec![Span::raw(" page ")];
        for page in query::page_window(view.page, view.total_pages) {
            if page == view.page {
                spans.push(Span::styled(
                    format!("[{}] ", page),
                    Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan),
                ));
            } else {
                spans.push(Span::raw(format!("{} ", page)));
            }
        }
        if view.total_pages > 0 {
            spans.push(Span::styled(
                format!("of {} ", view.total_pages),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if let Some(notice) = &state.notice {
            spans.push(Span::styled(
                format!("  {}", notice),
                Style::default().fg(Color::Red),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), rows[0]);
    } else if let Some(notice) = &state.notice {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!(" {}", notice),
                Style::default().fg(Color::Red),
            )),
            rows[0],
        );
    }

    let help = match state.tab {
        Tab::Jobs => {
            " j/k:rows  h/l:page  /:search  s:status  o:source  [/]:set status  c:comment  e:candidate  n:new  d:delete  r:refresh  q:quit"
        }
        Tab::Candidates => " j/k:rows  e:edit  d:delete  r:refresh  1/2/3:tabs  q:quit",
        Tab::Enterprises => " j/k:rows  e:edit  d:delete  r:refresh  1/2/3:tabs  q:quit",
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        rows[1],
    );
}

fn draw_modal(frame: &mut Frame, state: &AppState) {
    match state.modal.state() {
        ModalState::EditingComment { job_id, draft } => {
            let area = centered_rect(50, 30, frame.area());
            frame.render_widget(Clear, area);
            let text = format!("{}_", draft);
            let body = textwrap::fill(&text, area.width.saturating_sub(4) as usize);
            let widget = Paragraph::new(body)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title(format!(" Comment - job #{} (Enter:save Esc:cancel) ", job_id)),
                )
                .wrap(Wrap { trim: false });
            frame.render_widget(widget, area);
        }

        ModalState::ConfirmingDelete { kind, id } => {
            let area = centered_rect(40, 20, frame.area());
            frame.render_widget(Clear, area);
            let noun = match kind {
                DeleteKind::Candidate => "candidate",
                DeleteKind::Enterprise => "enterprise",
            };
            let widget = Paragraph::new(format!(
                "\nDelete {} #{}?\n\nThis cannot be undone.\n\n   y/Enter: delete    n/Esc: keep",
                noun, id
            ))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(" Confirm delete "));
            frame.render_widget(widget, area);
        }

        ModalState::EditingCandidate { .. }
        | ModalState::EditingEnterprise { .. }
        | ModalState::CreatingJob { .. } => {
            let title = match state.modal.state() {
                ModalState::EditingCandidate { draft } => {
                    format!(" Edit candidate #{} (Enter:save Esc:cancel Ctrl+D:delete) ", draft.id)
                }
                ModalState::EditingEnterprise { draft } => {
                    format!(" Edit enterprise #{} (Enter:save Esc:cancel Ctrl+D:delete) ", draft.id)
                }
                _ => " New job (Enter:create Esc:cancel) ".to_string(),
            };
            let area = centered_rect(60, 70, frame.area());
            frame.render_widget(Clear, area);

            let mut lines = Vec::new();
            if let Some(form) = &state.form {
                for (i, field) in form.fields.iter().enumerate() {
                    let marker = if i == form.cursor { "> " } else { "  " };
                    let style = if i == form.cursor {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let cursor = if i == form.cursor { "_" } else { "" };
                    lines.push(Line::from(Span::styled(
                        format!("{}{:<18} {}{}", marker, field.label, field.value, cursor),
                        style,
                    )));
                }
            }
            if let Some(notice) = &state.notice {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("  {}", notice),
                    Style::default().fg(Color::Red),
                )));
            }

            let widget =
                Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL).title(title));
            frame.render_widget(widget, area);
        }

        ModalState::Idle => {}
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
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
    fn candidate_form_round_trips_and_parses_leniently() {
        let mut candidate = seed::candidates().remove(0);
        let mut form = candidate_form(&candidate);

        // Garbage in a numeric field keeps the previous value.
        form.fields
            .iter_mut()
            .find(|f| f.label == "Experience (yrs)")
            .unwrap()
            .value = "lots".to_string();
        form.fields
            .iter_mut()
            .find(|f| f.label == "Dice (yes/no)")
            .unwrap()
            .value = "YES".to_string();

        let years = candidate.experience_years;
        apply_candidate_form(&form, &mut candidate);
        assert_eq!(candidate.experience_years, years);
        assert!(candidate.dice_active);
    }

    #[test]
    fn enterprise_form_parses_status_and_counters() {
        let mut enterprise = seed::enterprises().remove(0);
        let mut form = enterprise_form(&enterprise);
        form.fields
            .iter_mut()
            .find(|f| f.label == "Status")
            .unwrap()
            .value = "inactive".to_string();
        form.fields
            .iter_mut()
            .find(|f| f.label == "Recruiters")
            .unwrap()
            .value = "12".to_string();

        apply_enterprise_form(&form, &mut enterprise);
        assert_eq!(enterprise.status, EnterpriseStatus::Inactive);
        assert_eq!(enterprise.recruiters, 12);
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("Tomás Rivera", 20), "Tomás Rivera");
        assert_eq!(
            truncate("aaaaaaaaaaaaaaaaé Rivera-Lopez", 20),
            "aaaaaaaaaaaaaaaaé..."
        );
    }

    #[test]
    fn failed_save_surfaces_a_notice() {
        use crate::store::Store;

        let mut state = AppState::new(Store::new(seed::snapshot()));
        state.modal.open_create();
        // No form in play; the blank draft must fail and be reported.
        handle_modal_key(&mut state, KeyCode::Enter, KeyModifiers::NONE);
        assert!(matches!(state.modal.state(), ModalState::CreatingJob { .. }));
        assert_eq!(state.notice.as_deref(), Some("title must not be blank"));
    }

    #[test]
    fn form_cursor_wraps_both_ways() {
        let mut form = job_form(&JobDraft::default());
        let len = form.fields.len();
        form.prev_field();
        assert_eq!(form.cursor, len - 1);
        form.next_field();
        assert_eq!(form.cursor, 0);
    }
}

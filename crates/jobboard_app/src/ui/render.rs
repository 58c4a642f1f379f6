use std::fmt::Write;

use jobboard_core::{
    AppViewModel, DescriptionBlock, DetailView, FeaturedView, JobCardView, JobDetailView,
    ListStatus, ListView, EMPTY_DESCRIPTION,
};

/// Renders the whole view as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    if view.auth_required {
        out.push_str("! Session expired. Sign in at /login (use `login <token>`).\n");
    }
    match &view.detail {
        DetailView::Closed => {
            render_header(&mut out, view);
            render_featured(&mut out, &view.featured);
            render_list(&mut out, &view.list);
        }
        detail => render_detail(&mut out, detail),
    }
    out
}

fn render_header(out: &mut String, view: &AppViewModel) {
    let location = if view.location_query.is_empty() {
        "/jobs".to_string()
    } else {
        format!("/jobs?{}", view.location_query)
    };
    let _ = writeln!(out, "== {location}");
    let pending = if view.debouncing { " …" } else { "" };
    let _ = writeln!(out, "search: [{}]{pending}", view.search_input);
    if !view.query.filters.is_empty() {
        let tags: Vec<&str> = view.query.filters.iter().map(String::as_str).collect();
        let _ = writeln!(out, "filters: {}", tags.join(", "));
    }
}

fn render_featured(out: &mut String, featured: &FeaturedView) {
    if featured.loading {
        out.push_str("featured: loading…\n");
        return;
    }
    if let Some(job) = featured.jobs.get(featured.index) {
        let _ = writeln!(
            out,
            "featured {}/{}: {} at {} ({})",
            featured.index + 1,
            featured.jobs.len(),
            job.title,
            job.company,
            job.region
        );
    }
}

fn render_list(out: &mut String, list: &ListView) {
    match list.status {
        ListStatus::Loading => out.push_str("Loading jobs…\n"),
        ListStatus::Failed => {
            if let Some(error) = &list.error {
                let _ = writeln!(out, "Error loading jobs: {}", error.message);
                if error.retryable {
                    out.push_str("(type `retry` to try again)\n");
                }
            }
        }
        ListStatus::Empty => out.push_str("No jobs found matching your search.\n"),
        ListStatus::Ready => {
            for job in &list.jobs {
                render_card(out, job);
            }
            match list.total_count {
                Some(total) => {
                    let _ = writeln!(out, "{} of {} jobs shown", list.shown, total);
                }
                None => {
                    let _ = writeln!(out, "{} jobs shown", list.shown);
                }
            }
            if let Some(error) = &list.error {
                let _ = writeln!(out, "Could not load more: {} (type `retry`)", error.message);
            } else if list.loading_more {
                out.push_str("Loading more…\n");
            } else if list.can_load_more {
                out.push_str("(type `more` to load more jobs)\n");
            }
        }
    }
}

fn render_card(out: &mut String, job: &JobCardView) {
    let urgent = if job.is_urgent { " [urgent]" } else { "" };
    let _ = write!(
        out,
        "- [{}] {}{} | {} | {}",
        job.id, job.title, urgent, job.company, job.region
    );
    if let Some(posted) = &job.posted {
        let _ = write!(out, " | {posted}");
    }
    if !job.tags.is_empty() {
        let _ = write!(out, " | #{}", job.tags.join(" #"));
    }
    out.push('\n');
}

fn render_detail(out: &mut String, detail: &DetailView) {
    match detail {
        DetailView::Closed => {}
        DetailView::Loading { id } => {
            let _ = writeln!(out, "Loading job {id}…");
        }
        DetailView::NotFound { id } => {
            let _ = writeln!(
                out,
                "Job Not Found\nThe job with ID {id} does not exist or has been removed.\n(type `back` to browse all jobs)"
            );
        }
        DetailView::Failed { error, .. } => {
            let _ = writeln!(out, "We encountered an error: {}", error.message);
            out.push_str("(type `back` to browse all jobs)\n");
        }
        DetailView::Loaded(job) => render_job_detail(out, job),
    }
}

fn render_job_detail(out: &mut String, job: &JobDetailView) {
    let _ = writeln!(out, "== {}", job.title);
    let _ = writeln!(out, "{}", job.company);
    let facts = [
        ("Location", job.region.as_deref()),
        ("Type", job.job_type.as_deref()),
        ("Salary", job.salary.as_deref()),
        ("Experience", job.experience.as_deref()),
    ];
    for (label, value) in facts {
        if let Some(value) = value {
            let _ = writeln!(out, "{label}: {value}");
        }
    }
    if job.is_urgent {
        out.push_str("Urgent hiring\n");
    }
    if job.is_responsive {
        out.push_str("Responsive employer\n");
    }
    if !job.skills.is_empty() {
        let _ = writeln!(out, "Skills: {}", job.skills.join(", "));
    }
    if !job.tags.is_empty() {
        let _ = writeln!(out, "Tags: {}", job.tags.join(", "));
    }
    out.push('\n');
    if job.description.is_empty() {
        let _ = writeln!(out, "{EMPTY_DESCRIPTION}");
    }
    for block in &job.description {
        match block {
            DescriptionBlock::Heading(text) => {
                let _ = writeln!(out, "## {text}");
            }
            DescriptionBlock::Paragraph(lines) => {
                for line in lines {
                    let _ = writeln!(out, "{line}");
                }
                out.push('\n');
            }
        }
    }
    match &job.apply_link {
        Some(link) => {
            let _ = writeln!(out, "Apply: {link}");
        }
        None => out.push_str("Apply: no application link was provided for this job.\n"),
    }
}

#[cfg(test)]
mod tests {
    use jobboard_core::{update, AppState, JobSummary, Msg, ResultPage};

    use super::*;

    fn state_with_jobs() -> AppState {
        let (state, effects) = update(
            AppState::new(),
            Msg::Mounted {
                location_query: "search=rust".to_string(),
            },
        );
        let ticket = match &effects[0] {
            jobboard_core::Effect::FetchPage(ticket) => ticket.clone(),
            other => panic!("unexpected effect {other:?}"),
        };
        let job = JobSummary {
            company_name: Some("Ferris Ltd".to_string()),
            tags: vec!["remote".to_string()],
            ..JobSummary::new("1", "Rust Engineer")
        };
        let (state, _) = update(
            state,
            Msg::PageLoaded {
                ticket,
                result: Ok(ResultPage {
                    items: vec![job],
                    total_count: Some(9),
                    total_pages: Some(3),
                    page: 1,
                }),
            },
        );
        state
    }

    #[test]
    fn list_shows_cards_counts_and_load_more_hint() {
        let text = render(&state_with_jobs().view());
        assert!(text.contains("== /jobs?search=rust"));
        assert!(text.contains("- [1] Rust Engineer | Ferris Ltd | Location Not Specified | #remote"));
        assert!(text.contains("1 of 9 jobs shown"));
        assert!(text.contains("type `more`"));
    }

    #[test]
    fn not_found_detail_points_back_to_list() {
        let (state, _) = update(
            AppState::new(),
            Msg::JobSelected {
                id: " ".to_string(),
            },
        );
        let text = render(&state.view());
        assert!(text.contains("Job Not Found"));
        assert!(text.contains("`back`"));
        assert!(!text.contains("retry"));
    }
}

use chrono::{DateTime, Utc};

/// Placeholder company name on job cards.
pub const CARD_COMPANY_PLACEHOLDER: &str = "Remote Company";
/// Placeholder company name on the detail view.
pub const DETAIL_COMPANY_PLACEHOLDER: &str = "Company Name Not Available";
/// Placeholder shown when a job has no region.
pub const REGION_PLACEHOLDER: &str = "Location Not Specified";

const COMPANY_LINE_MAX_CHARS: usize = 100;
const NON_COMPANY_PREFIXES: [&str; 4] = [
    "we are looking",
    "job description",
    "about the role",
    "who we are",
];

/// A validated job record. Only records with both an identifier and a title
/// are ever turned into a `JobSummary`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct JobSummary {
    pub id: String,
    pub title: String,
    pub company_name: Option<String>,
    pub company: Option<String>,
    pub company_image: Option<String>,
    pub region: Option<String>,
    pub tags: Vec<String>,
    pub skills: Vec<String>,
    pub posted_at: Option<DateTime<Utc>>,
    pub job_type: Option<String>,
    pub is_urgent: Option<bool>,
    pub is_responsive: Option<bool>,
    pub salary: Option<String>,
    pub needed_experience: Option<String>,
    pub description: Option<String>,
    pub apply_link: Option<String>,
}

impl JobSummary {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Company shown for this job, falling back to the first line of the
    /// description when it looks like a company name, then to `placeholder`.
    pub fn display_company(&self, placeholder: &str) -> String {
        non_blank(self.company_name.as_deref())
            .or_else(|| non_blank(self.company.as_deref()))
            .map(ToOwned::to_owned)
            .or_else(|| self.description.as_deref().and_then(company_from_description))
            .unwrap_or_else(|| placeholder.to_string())
    }

    /// Region for display, or the placeholder when missing.
    pub fn display_region(&self) -> &str {
        non_blank(self.region.as_deref()).unwrap_or(REGION_PLACEHOLDER)
    }

    /// Region only when it carries information; upstream uses `"N/A"` for none.
    pub fn known_region(&self) -> Option<&str> {
        non_blank(self.region.as_deref()).filter(|region| *region != "N/A")
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn company_from_description(description: &str) -> Option<String> {
    let first_line = description
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())?;
    if first_line.chars().count() >= COMPANY_LINE_MAX_CHARS {
        return None;
    }
    let lowered = first_line.to_lowercase();
    if NON_COMPANY_PREFIXES
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return None;
    }
    Some(first_line.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn company_name_wins_over_company() {
        let job = JobSummary {
            company_name: Some("Acme".into()),
            company: Some("Other".into()),
            ..JobSummary::new("1", "Engineer")
        };
        assert_eq!(job.display_company(CARD_COMPANY_PLACEHOLDER), "Acme");
    }

    #[test]
    fn company_falls_back_to_first_description_line() {
        let job = JobSummary {
            description: Some("\n  Globex Corp \nWe build things.".into()),
            ..JobSummary::new("1", "Engineer")
        };
        assert_eq!(job.display_company(CARD_COMPANY_PLACEHOLDER), "Globex Corp");
    }

    #[test]
    fn boilerplate_first_line_is_not_a_company() {
        let job = JobSummary {
            description: Some("About the role\nYou will ship code.".into()),
            ..JobSummary::new("1", "Engineer")
        };
        assert_eq!(
            job.display_company(DETAIL_COMPANY_PLACEHOLDER),
            DETAIL_COMPANY_PLACEHOLDER
        );

        let long_line = "x".repeat(120);
        let job = JobSummary {
            description: Some(long_line),
            ..JobSummary::new("1", "Engineer")
        };
        assert_eq!(
            job.display_company(CARD_COMPANY_PLACEHOLDER),
            CARD_COMPANY_PLACEHOLDER
        );
    }

    #[test]
    fn region_placeholders() {
        let mut job = JobSummary::new("1", "Engineer");
        assert_eq!(job.display_region(), REGION_PLACEHOLDER);
        assert_eq!(job.known_region(), None);

        job.region = Some("N/A".into());
        assert_eq!(job.display_region(), "N/A");
        assert_eq!(job.known_region(), None);

        job.region = Some("Europe".into());
        assert_eq!(job.known_region(), Some("Europe"));
    }
}

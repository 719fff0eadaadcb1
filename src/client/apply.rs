use url::form_urlencoded;

use crate::api::jobs::Job;

const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";
const JOB_DETAIL_URL: &str = "https://www.arbeitsagentur.de/jobsuche/jobdetail";

/// Outbound link offered on a job card
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyAction {
    /// The listing's own application link
    Direct(String),
    /// Web search for the listing itself
    SearchListing(String),
    /// Web search for the employer's careers page
    CompanyCareers(String),
    /// Listing detail page on arbeitsagentur.de
    JobDetail(String),
}

impl ApplyAction {
    pub fn label(&self) -> &'static str {
        match self {
            ApplyAction::Direct(_) => "Apply now",
            ApplyAction::SearchListing(_) => "Search on Google",
            ApplyAction::CompanyCareers(_) => "Company careers",
            ApplyAction::JobDetail(_) => "Arbeitsagentur",
        }
    }

    pub fn url(&self) -> &str {
        match self {
            ApplyAction::Direct(url)
            | ApplyAction::SearchListing(url)
            | ApplyAction::CompanyCareers(url)
            | ApplyAction::JobDetail(url) => url,
        }
    }
}

/// Links for a job card: the direct link when the listing has one, otherwise
/// the three fallbacks.
pub fn apply_actions(job: &Job) -> Vec<ApplyAction> {
    if let Some(url) = &job.external_url {
        return vec![ApplyAction::Direct(url.clone())];
    }

    let employer = job.employer.as_deref().unwrap_or_default();
    let listing = join_words(&[job.title.as_str(), employer, job.city().unwrap_or_default()]);

    vec![
        ApplyAction::SearchListing(google_search(&format!("{listing} jobs application"))),
        ApplyAction::CompanyCareers(google_search(&join_words(&[employer, "careers jobs"]))),
        ApplyAction::JobDetail(format!("{JOB_DETAIL_URL}/{}", job.refnr)),
    ]
}

fn join_words(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn google_search(query: &str) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("q", query)
        .finish();
    format!("{GOOGLE_SEARCH_URL}?{query}")
}

//! Maps the raw page state onto the output `Company` graph.
//!
//! A required field that is null or absent fails the whole snapshot with
//! `MissingField`; an empty string is copied through. Optional fields and
//! groups are included only when the source has a non-empty value, so the
//! serialized output never carries empty placeholders.

use crate::common::error::{Result, ScraperError};
use crate::domain::{Company, Founders, Jobs, LaunchPost, SocialMedia};
use crate::pipeline::processing::raw_state::{
    RawCompany, RawFounder, RawJobPosting, RawLaunch, RawPageState,
};

/// Build one `Company` from a parsed page state. `source_url` becomes the
/// record's `yCombinatorURL`.
pub fn extract_company(state: &RawPageState, source_url: &str) -> Result<Company> {
    let props = state
        .props
        .as_ref()
        .ok_or_else(|| ScraperError::MissingField("props".into()))?;
    let company = props
        .company
        .as_ref()
        .ok_or_else(|| ScraperError::MissingField("props.company".into()))?;

    let name = required(&company.name, "props.company.name")?;
    let founded = extract_founded(company)?;
    let team_size = match &company.team_size {
        Some(size) if size.is_truthy() => size.to_integer("props.company.team_size")?,
        _ => 0,
    };
    let founders = extract_founders(company)?;

    let jobs = props
        .job_postings
        .as_deref()
        .filter(|postings| !postings.is_empty())
        .map(|postings| {
            postings
                .iter()
                .enumerate()
                .map(|(i, posting)| extract_job(posting, i))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    let social_media = SocialMedia::from_links(
        present(&company.linkedin_url),
        present(&company.twitter_url),
        present(&company.fb_url),
    );

    let launch_post = props
        .launches
        .as_deref()
        .filter(|launches| !launches.is_empty())
        .map(|launches| {
            launches
                .iter()
                .enumerate()
                .map(|(i, launch)| extract_launch(launch, i))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?;

    Ok(Company {
        name,
        founded,
        team_size,
        location: present(&company.location).unwrap_or_default(),
        official_website: present(&company.website).unwrap_or_default(),
        y_combinator_url: source_url.to_string(),
        founders,
        jobs,
        social_media,
        launch_post,
    })
}

fn extract_founded(company: &RawCompany) -> Result<i32> {
    const FIELD: &str = "props.company.year_founded";
    let raw = company
        .year_founded
        .as_ref()
        .ok_or_else(|| ScraperError::MissingField(FIELD.into()))?;
    let year = raw.to_integer(FIELD)?;
    i32::try_from(year).map_err(|_| ScraperError::InvalidNumber {
        field: FIELD.to_string(),
        value: raw.to_string(),
    })
}

fn extract_founders(company: &RawCompany) -> Result<Vec<Founders>> {
    let founders = company
        .founders
        .as_deref()
        .filter(|founders| !founders.is_empty())
        .ok_or_else(|| ScraperError::MissingField("props.company.founders".into()))?;

    founders
        .iter()
        .enumerate()
        .map(|(i, founder)| extract_founder(founder, i))
        .collect()
}

fn extract_founder(founder: &RawFounder, index: usize) -> Result<Founders> {
    Ok(Founders {
        founder_name: required(
            &founder.full_name,
            &format!("props.company.founders[{index}].full_name"),
        )?,
        founder_linkedin_url: required(
            &founder.linkedin_url,
            &format!("props.company.founders[{index}].linkedin_url"),
        )?,
        founder_title: present(&founder.title),
        founder_twitter_url: present(&founder.twitter_url),
    })
}

fn extract_job(posting: &RawJobPosting, index: usize) -> Result<Jobs> {
    Ok(Jobs {
        role: required(&posting.title, &format!("props.jobPostings[{index}].title"))?,
        location: required(&posting.location, &format!("props.jobPostings[{index}].location"))?,
        apply_url: present(&posting.apply_url),
        job_type: present(&posting.job_type),
        salary_range: present(&posting.salary_range),
        min_experience: present(&posting.min_experience),
    })
}

fn extract_launch(launch: &RawLaunch, index: usize) -> Result<LaunchPost> {
    Ok(LaunchPost {
        launch_post_url: required(&launch.url, &format!("props.launches[{index}].url"))?,
        launch_post_title: required(&launch.title, &format!("props.launches[{index}].title"))?,
    })
}

/// Non-empty string value, if any
fn present(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|s| !s.is_empty()).cloned()
}

fn required(value: &Option<String>, path: &str) -> Result<String> {
    value
        .clone()
        .ok_or_else(|| ScraperError::MissingField(path.to_string()))
}

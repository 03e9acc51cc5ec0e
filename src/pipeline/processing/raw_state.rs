//! Typed view of the application state embedded in a company page.
//!
//! Every field is optional at this layer; the extractor decides which ones are
//! required. Unknown fields are ignored.

use crate::common::error::{Result, ScraperError};
use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPageState {
    pub props: Option<RawProps>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProps {
    pub company: Option<RawCompany>,
    #[serde(rename = "jobPostings")]
    pub job_postings: Option<Vec<RawJobPosting>>,
    pub launches: Option<Vec<RawLaunch>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCompany {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    pub year_founded: Option<RawNumber>,
    pub team_size: Option<RawNumber>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub website: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub twitter_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub fb_url: Option<String>,
    pub founders: Option<Vec<RawFounder>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFounder {
    #[serde(default, deserialize_with = "lenient_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub twitter_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawJobPosting {
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub apply_url: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub job_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub salary_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub min_experience: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLaunch {
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub title: Option<String>,
}

/// A text field as pages actually emit it. Numbers keep their decimal text;
/// booleans, arrays and objects carry no usable text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    Int(i64),
    Float(f64),
    Other(serde_json::Value),
}

impl RawText {
    pub fn into_text(self) -> Option<String> {
        match self {
            RawText::Text(s) => Some(s),
            RawText::Int(n) => Some(n.to_string()),
            RawText::Float(f) => Some(f.to_string()),
            RawText::Other(_) => None,
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawText>::deserialize(deserializer)?.and_then(RawText::into_text))
}

/// A numeric field that pages emit either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl RawNumber {
    /// False for zero, NaN, the empty string and `false`.
    pub fn is_truthy(&self) -> bool {
        match self {
            RawNumber::Int(n) => *n != 0,
            RawNumber::Float(f) => *f != 0.0 && !f.is_nan(),
            RawNumber::Text(s) => !s.is_empty(),
            RawNumber::Bool(b) => *b,
        }
    }

    /// Integer value with leading-integer semantics for strings
    /// (`" 12 people"` is 12, `"abc"` is an error).
    pub fn to_integer(&self, field: &str) -> Result<i64> {
        let invalid = || ScraperError::InvalidNumber {
            field: field.to_string(),
            value: self.to_string(),
        };
        match self {
            RawNumber::Int(n) => Ok(*n),
            RawNumber::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            RawNumber::Float(_) | RawNumber::Bool(_) => Err(invalid()),
            RawNumber::Text(s) => leading_integer(s).ok_or_else(invalid),
        }
    }
}

impl std::fmt::Display for RawNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawNumber::Int(n) => write!(f, "{n}"),
            RawNumber::Float(v) => write!(f, "{v}"),
            RawNumber::Text(s) => f.write_str(s),
            RawNumber::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    rest[..digits_end].parse::<i64>().ok().map(|n| sign * n)
}

impl RawPageState {
    /// Parse the raw attribute text of the state marker.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_page_state_and_ignores_unknown_fields() {
        let state = RawPageState::from_json(
            r#"{
                "component": "CompanyShowPage",
                "props": {
                    "company": {
                        "name": "Acme",
                        "year_founded": 2019,
                        "team_size": "12",
                        "batch_name": "W20",
                        "founders": [{"full_name": "Ada", "linkedin_url": "li", "user_id": 7}]
                    },
                    "jobPostings": [{"title": "Eng", "location": "NY", "type": "fulltime"}],
                    "launches": null
                }
            }"#,
        )
        .unwrap();
        let props = state.props.unwrap();
        let company = props.company.unwrap();
        assert_eq!(company.name.as_deref(), Some("Acme"));
        assert_eq!(company.year_founded, Some(RawNumber::Int(2019)));
        assert_eq!(company.team_size, Some(RawNumber::Text("12".into())));
        assert_eq!(company.founders.unwrap()[0].full_name.as_deref(), Some("Ada"));
        let jobs = props.job_postings.unwrap();
        assert_eq!(jobs[0].job_type.as_deref(), Some("fulltime"));
        assert!(props.launches.is_none());
    }

    #[test]
    fn test_non_string_text_fields_are_lenient() {
        let state = RawPageState::from_json(
            r#"{
                "props": {
                    "company": {"name": 42, "twitter_url": false, "fb_url": ["x"], "website": null},
                    "jobPostings": [{"title": "Eng", "location": "NY", "min_experience": 3,
                                     "salary_range": 120000.5, "type": {"k": 1}}]
                }
            }"#,
        )
        .unwrap();
        let props = state.props.unwrap();
        let company = props.company.unwrap();
        assert_eq!(company.name.as_deref(), Some("42"));
        assert!(company.twitter_url.is_none());
        assert!(company.fb_url.is_none());
        assert!(company.website.is_none());
        let job = &props.job_postings.unwrap()[0];
        assert_eq!(job.min_experience.as_deref(), Some("3"));
        assert_eq!(job.salary_range.as_deref(), Some("120000.5"));
        assert!(job.job_type.is_none());
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            RawPageState::from_json("{props:"),
            Err(ScraperError::Json(_))
        ));
    }

    #[test]
    fn test_leading_integer_semantics() {
        assert_eq!(RawNumber::Text("2020".into()).to_integer("f").unwrap(), 2020);
        assert_eq!(RawNumber::Text("  15 people".into()).to_integer("f").unwrap(), 15);
        assert_eq!(RawNumber::Text("-3".into()).to_integer("f").unwrap(), -3);
        assert_eq!(RawNumber::Float(12.9).to_integer("f").unwrap(), 12);
        assert!(RawNumber::Text("abc".into()).to_integer("f").is_err());
        assert!(RawNumber::Text("".into()).to_integer("f").is_err());
        assert!(RawNumber::Bool(true).to_integer("f").is_err());
    }

    #[test]
    fn test_truthiness() {
        assert!(!RawNumber::Int(0).is_truthy());
        assert!(!RawNumber::Text(String::new()).is_truthy());
        assert!(!RawNumber::Float(f64::NAN).is_truthy());
        assert!(RawNumber::Text("0".into()).is_truthy());
        assert!(RawNumber::Int(25).is_truthy());
    }
}

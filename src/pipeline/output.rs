use crate::common::error::Result;
use crate::domain::Company;
use std::fs;
use std::path::Path;
use tracing::info;

/// Delete `dir` if it exists, then recreate it empty.
pub fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)?;
    Ok(())
}

/// Write companies as a pretty-printed JSON array.
pub fn write_companies(path: &Path, companies: &[Company]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json_content = serde_json::to_string_pretty(companies)?;
    fs::write(path, json_content)?;
    info!("Wrote {} companies to {}", companies.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Founders;
    use tempfile::tempdir;

    #[test]
    fn test_prepare_output_dir_clears_previous_run() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        fs::write(out.join("stale.json"), "[]").unwrap();

        prepare_output_dir(&out).unwrap();
        assert!(out.is_dir());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_write_companies_round_trips_as_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("scraped.json");
        let company = Company {
            name: "Acme".into(),
            founded: 2020,
            team_size: 3,
            location: "NY".into(),
            official_website: String::new(),
            y_combinator_url: "https://yc/acme".into(),
            founders: vec![Founders {
                founder_name: "A".into(),
                founder_linkedin_url: "l".into(),
                founder_title: None,
                founder_twitter_url: None,
            }],
            jobs: None,
            social_media: None,
            launch_post: None,
        };

        write_companies(&path, std::slice::from_ref(&company)).unwrap();
        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written.as_array().unwrap().len(), 1);
        assert_eq!(written[0]["teamSize"], 3);
        assert!(written[0].get("jobs").is_none());
    }

    #[test]
    fn test_write_empty_collection() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scraped.json");
        write_companies(&path, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }
}

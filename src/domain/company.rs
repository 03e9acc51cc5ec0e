use serde::{Deserialize, Serialize};

/// One company record, built from a single page snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub founded: i32,
    pub team_size: i64,
    pub location: String,
    pub official_website: String,
    /// Source page URL; identifies the record
    #[serde(rename = "yCombinatorURL")]
    pub y_combinator_url: String,
    pub founders: Vec<Founders>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<Jobs>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_media: Option<SocialMedia>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_post: Option<Vec<LaunchPost>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Founders {
    pub founder_name: String,
    pub founder_linkedin_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founder_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub founder_twitter_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jobs {
    pub role: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apply_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_experience: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialMedia {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_linkedin_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_twitter_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_facebook_url: Option<String>,
}

impl SocialMedia {
    /// Builds the group only when at least one link is present.
    pub fn from_links(
        linkedin: Option<String>,
        twitter: Option<String>,
        facebook: Option<String>,
    ) -> Option<Self> {
        let social = Self {
            company_linkedin_url: linkedin,
            company_twitter_url: twitter,
            company_facebook_url: facebook,
        };
        (!social.is_empty()).then_some(social)
    }

    pub fn is_empty(&self) -> bool {
        self.company_linkedin_url.is_none()
            && self.company_twitter_url.is_none()
            && self.company_facebook_url.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchPost {
    pub launch_post_url: String,
    pub launch_post_title: String,
}

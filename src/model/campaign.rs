//! Campaign draft derived from the last submitted product form

use super::form::FormRecord;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

pub const HEADLINE_TEMPLATES: [&str; 6] = [
    "Transform Your Life with Our Amazing Product",
    "Don't Miss Out - Limited Time Offer Inside",
    "Discover the Secret to Better Living Today",
    "Join Thousands of Happy Customers Worldwide",
    "Experience Innovation Like Never Before",
    "Your Journey to Excellence Starts Here",
];

pub const DESCRIPTION_TEMPLATES: [&str; 4] = [
    "Experience unparalleled quality and innovation with our cutting-edge product. Designed with your needs in mind, we bring you the perfect solution that combines functionality, style, and reliability. Join thousands of satisfied customers who have already made the switch.",
    "Elevate your lifestyle with our premium offering that delivers exceptional results every single time. Our commitment to excellence ensures you get the best value, outstanding performance, and unmatched customer satisfaction. Transform the way you live, work, and play.",
    "Discover the difference that true quality makes in your daily routine. Our expertly crafted solution provides seamless integration, superior durability, and remarkable efficiency. Whether you're a beginner or an expert, you'll love the results you achieve.",
    "Step into a world of possibilities with our revolutionary product that's changing the game. Backed by years of research and development, we deliver innovation that matters. Experience the perfect blend of technology, design, and user-friendly features.",
];

/// Call-to-action choices offered on the review screen
pub const CTA_OPTIONS: [&str; 6] = [
    "Shop Now",
    "Learn More",
    "Sign Up",
    "Get Offer",
    "Contact Us",
    "Book Now",
];

pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/600x314.png?text=AI+Generated+Image";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdSet {
    pub age_min: u32,
    pub age_max: u32,
    pub gender: String,
    pub location: String,
    pub interests: Vec<String>,
    pub keywords: Vec<String>,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creative {
    pub headline: String,
    pub description: String,
    pub cta: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A generated campaign, edited independently of the form it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignDraft {
    pub campaign_name: String,
    pub objective: String,
    pub budget_daily: String,
    pub adset: AdSet,
    pub creative: Creative,
}

impl CampaignDraft {
    /// Build a draft from the last submitted form plus fixed defaults
    pub fn from_payload(base: &FormRecord) -> Self {
        let name = base.non_empty("name");

        let campaign_name = match name {
            Some(n) => format!("{} — Campaign", n),
            None => "New Campaign".to_string(),
        };
        let headline = match name {
            Some(n) => format!("{}: Special Offer", n),
            None => "Great product — Try now".to_string(),
        };
        let description = base
            .non_empty("description")
            .unwrap_or("High quality, reliable and designed for you.")
            .to_string();

        Self {
            campaign_name,
            objective: "Sales".to_string(),
            budget_daily: "₹500".to_string(),
            adset: AdSet {
                age_min: 18,
                age_max: 45,
                gender: "All".to_string(),
                location: base
                    .non_empty("location")
                    .unwrap_or("All locations")
                    .to_string(),
                interests: match base.non_empty("target") {
                    Some(t) => vec![t.to_string()],
                    None => vec!["General".to_string()],
                },
                keywords: base
                    .non_empty("category")
                    .map(|c| vec![c.to_string()])
                    .unwrap_or_default(),
                url: "https://example.com".to_string(),
            },
            creative: Creative {
                headline,
                description,
                cta: "Shop Now".to_string(),
                image: None,
            },
        }
    }

    pub fn regenerate_headline(&mut self) {
        if let Some(h) = HEADLINE_TEMPLATES.choose(&mut rand::rng()) {
            self.creative.headline = h.to_string();
        }
    }

    pub fn regenerate_description(&mut self) {
        if let Some(d) = DESCRIPTION_TEMPLATES.choose(&mut rand::rng()) {
            self.creative.description = d.to_string();
        }
    }

    pub fn simulate_image(&mut self) {
        self.creative.image = Some(PLACEHOLDER_IMAGE_URL.to_string());
    }
}

/// Every editable field on the review screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    CampaignName,
    Objective,
    BudgetDaily,
    AgeMin,
    AgeMax,
    Gender,
    Location,
    Interests,
    Keywords,
    Url,
    Headline,
    Description,
}

impl DraftField {
    pub fn all() -> &'static [DraftField] {
        &[
            DraftField::CampaignName,
            DraftField::Objective,
            DraftField::BudgetDaily,
            DraftField::AgeMin,
            DraftField::AgeMax,
            DraftField::Gender,
            DraftField::Location,
            DraftField::Interests,
            DraftField::Keywords,
            DraftField::Url,
            DraftField::Headline,
            DraftField::Description,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            DraftField::CampaignName => "Campaign Name",
            DraftField::Objective => "Objective",
            DraftField::BudgetDaily => "Daily Budget",
            DraftField::AgeMin => "Min Age",
            DraftField::AgeMax => "Max Age",
            DraftField::Gender => "Gender",
            DraftField::Location => "Location",
            DraftField::Interests => "Interests",
            DraftField::Keywords => "Keywords",
            DraftField::Url => "Destination URL",
            DraftField::Headline => "Headline",
            DraftField::Description => "Description",
        }
    }

    /// Creative text fields need their edit toggle switched on first
    pub fn is_creative_text(&self) -> bool {
        matches!(self, DraftField::Headline | DraftField::Description)
    }

    /// Current value rendered as editable text
    pub fn read(&self, draft: &CampaignDraft) -> String {
        match self {
            DraftField::CampaignName => draft.campaign_name.clone(),
            DraftField::Objective => draft.objective.clone(),
            DraftField::BudgetDaily => draft.budget_daily.clone(),
            DraftField::AgeMin => draft.adset.age_min.to_string(),
            DraftField::AgeMax => draft.adset.age_max.to_string(),
            DraftField::Gender => draft.adset.gender.clone(),
            DraftField::Location => draft.adset.location.clone(),
            DraftField::Interests => draft.adset.interests.join(", "),
            DraftField::Keywords => draft.adset.keywords.join(", "),
            DraftField::Url => draft.adset.url.clone(),
            DraftField::Headline => draft.creative.headline.clone(),
            DraftField::Description => draft.creative.description.clone(),
        }
    }

    /// Write text back into the draft. Returns false when the text does not
    /// fit the field (non-numeric age).
    pub fn write(&self, draft: &mut CampaignDraft, text: &str) -> bool {
        match self {
            DraftField::CampaignName => draft.campaign_name = text.to_string(),
            DraftField::Objective => draft.objective = text.to_string(),
            DraftField::BudgetDaily => draft.budget_daily = text.to_string(),
            DraftField::AgeMin | DraftField::AgeMax => {
                let Ok(age) = text.trim().parse::<u32>() else {
                    return false;
                };
                if *self == DraftField::AgeMin {
                    draft.adset.age_min = age;
                } else {
                    draft.adset.age_max = age;
                }
            }
            DraftField::Gender => draft.adset.gender = text.to_string(),
            DraftField::Location => draft.adset.location = text.to_string(),
            DraftField::Interests => draft.adset.interests = split_list(text),
            DraftField::Keywords => draft.adset.keywords = split_list(text),
            DraftField::Url => draft.adset.url = text.to_string(),
            DraftField::Headline => draft.creative.headline = text.to_string(),
            DraftField::Description => draft.creative.description = text.to_string(),
        }
        true
    }
}

/// Comma-separated text to a trimmed list without empty entries
fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

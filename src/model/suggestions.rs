//! Rule-based ad suggestions derived from the submitted product form
//!
//! Every function here is pure and total. Keyword tables are matched in
//! order and the first hit wins, so the order of the arms matters.

use super::form::FormRecord;
use regex::Regex;
use std::sync::LazyLock;

/// "NN-NN" or "NN–NN" (en dash) anywhere in the target text
static AGE_RANGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)[-–]([0-9]+)").expect("age range regex is valid"));

pub const DEFAULT_AGE_RANGE: &str = "25-45";

/// Treat empty strings like absent values
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Describe the likely audience for an offering
pub fn infer_audience(category: Option<&str>, product_type: Option<&str>, target: Option<&str>) -> String {
    if let Some(target) = present(target) {
        return target.to_string();
    }
    let Some(category) = present(category) else {
        return "General audience".to_string();
    };

    let cat = category.to_lowercase();
    let audience = if cat.contains("clothing") {
        "Fashion shoppers, 18-45"
    } else if cat.contains("education") {
        "Students & lifelong learners, 16-35"
    } else if cat.contains("restaurant") {
        "Local diners, food lovers, 18-50"
    } else if cat.contains("software") || cat.contains("technology") {
        "Tech-savvy professionals aged 25-45"
    } else if cat.contains("health") {
        "Health-conscious adults, 25-60"
    } else if product_type == Some("Service") {
        "Local customers looking for services"
    } else {
        "Online shoppers, interested in related categories"
    };
    audience.to_string()
}

/// Pick a call-to-action label
pub fn pick_cta(price: Option<&str>, product_type: Option<&str>) -> &'static str {
    match present(price) {
        None if product_type == Some("Service") => "Book Now",
        None => "Learn More",
        Some(p) if p.chars().any(|c| c.is_ascii_digit()) => "Shop Now",
        Some(_) => "Get Started",
    }
}

/// Pull an age range out of free text, verbatim
pub fn infer_age_range(target: Option<&str>) -> String {
    present(target)
        .and_then(|t| AGE_RANGE_REGEX.captures(t))
        .map(|caps| format!("{}-{}", &caps[1], &caps[2]))
        .unwrap_or_else(|| DEFAULT_AGE_RANGE.to_string())
}

/// Push each tag unless it is already present
fn push_unique(tags: &mut Vec<&'static str>, new: &[&'static str]) {
    for tag in new {
        if !tags.contains(tag) {
            tags.push(tag);
        }
    }
}

const FITNESS_TAGS: [&str; 2] = ["Fitness Enthusiasts", "Health-Conscious Individuals"];
const TECH_TAGS: [&str; 2] = ["Tech Early Adopters", "Busy Professionals"];

/// Audience tags from target and category keywords
pub fn infer_audience_tags(category: Option<&str>, target: Option<&str>) -> Vec<String> {
    let mut tags = Vec::new();

    if let Some(target) = present(target) {
        let lower = target.to_lowercase();
        if lower.contains("fitness") || lower.contains("health") {
            push_unique(&mut tags, &FITNESS_TAGS);
        }
        if lower.contains("tech") || lower.contains("professional") {
            push_unique(&mut tags, &TECH_TAGS);
        }
        if lower.contains("student") {
            push_unique(&mut tags, &["Students"]);
        }
    }

    if let Some(category) = present(category) {
        let cat = category.to_lowercase();
        if cat.contains("technology") || cat.contains("software") {
            push_unique(&mut tags, &TECH_TAGS);
        }
        if cat.contains("fitness") || cat.contains("health") {
            push_unique(&mut tags, &FITNESS_TAGS);
        }
    }

    if tags.is_empty() {
        tags.push("General Audience");
    }

    tags.into_iter().map(String::from).collect()
}

/// Interest list for the campaign summary panel
pub fn infer_interests(category: Option<&str>, target: Option<&str>) -> Vec<String> {
    let mut interests = Vec::new();

    if let Some(target) = present(target) {
        let lower = target.to_lowercase();
        if lower.contains("tech") {
            push_unique(&mut interests, &["Technology"]);
        }
        if lower.contains("fitness") || lower.contains("health") {
            push_unique(&mut interests, &["Fitness"]);
        }
        if lower.contains("professional") || lower.contains("business") {
            push_unique(&mut interests, &["Productivity"]);
        }
    }

    if let Some(category) = present(category) {
        let cat = category.to_lowercase();
        if cat.contains("technology") || cat.contains("software") {
            push_unique(&mut interests, &["Technology"]);
        }
        if cat.contains("fitness") || cat.contains("health") {
            push_unique(&mut interests, &["Fitness"]);
        }
    }

    if interests.is_empty() {
        interests.push("General");
    }

    interests.into_iter().map(String::from).collect()
}

pub fn make_headlines(form: &FormRecord) -> Vec<String> {
    let base = form
        .non_empty("name")
        .or_else(|| form.non_empty("category"))
        .unwrap_or("This offering");
    vec![
        format!("Transform Your Daily Routine with {}", base),
        "The Smart Device That Actually Gets Things Done".to_string(),
        "Track. Monitor. Achieve. All in One Device.".to_string(),
    ]
}

pub fn make_descriptions(form: &FormRecord) -> Vec<String> {
    if let Some(description) = form.non_empty("description") {
        return vec![description.to_string()];
    }
    vec![format!(
        "Experience the future of personal technology. {} seamlessly integrates into your lifestyle, helping you stay healthy, productive, and connected.",
        form.non_empty("name").unwrap_or("This product")
    )]
}

/// Single headline shown on the campaign summary panel
pub fn summary_headline(name: Option<&str>) -> String {
    match present(name) {
        Some(name) => format!("Transform Your Daily Routine with {}", name),
        None => "Transform Your Daily Routine with This Product".to_string(),
    }
}

pub fn summary_description(description: Option<&str>) -> String {
    present(description)
        .map(str::to_string)
        .unwrap_or_else(|| {
            "Experience the future of personal technology. Track. Monitor. Achieve.".to_string()
        })
}

/// Everything the suggestion panels display for one payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestions {
    pub headlines: Vec<String>,
    pub descriptions: Vec<String>,
    pub audience: String,
    pub cta: &'static str,
    pub age_range: String,
    pub audience_tags: Vec<String>,
    pub interests: Vec<String>,
    pub summary_headline: String,
    pub summary_description: String,
}

impl Suggestions {
    pub fn from_payload(form: &FormRecord) -> Self {
        let category = form.get("category");
        let product_type = form.get("productType");
        let target = form.get("target");
        Self {
            headlines: make_headlines(form),
            descriptions: make_descriptions(form),
            audience: infer_audience(category, product_type, target),
            cta: pick_cta(form.get("price"), product_type),
            age_range: infer_age_range(target),
            audience_tags: infer_audience_tags(category, target),
            interests: infer_interests(category, target),
            summary_headline: summary_headline(form.get("name")),
            summary_description: summary_description(form.get("description")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_audience_prefers_explicit_target() {
        assert_eq!(
            infer_audience(Some("Clothing"), None, Some("Busy parents")),
            "Busy parents"
        );
    }

    #[test]
    fn test_audience_category_match_beats_service_special_case() {
        assert_eq!(
            infer_audience(Some("Health"), Some("Service"), None),
            "Health-conscious adults, 25-60"
        );
    }

    #[test]
    fn test_audience_fallbacks() {
        assert_eq!(infer_audience(None, Some("Service"), None), "General audience");
        assert_eq!(infer_audience(Some(""), None, Some("")), "General audience");
        assert_eq!(
            infer_audience(Some("Home"), Some("Service"), None),
            "Local customers looking for services"
        );
        assert_eq!(
            infer_audience(Some("Electronics"), Some("Product"), None),
            "Online shoppers, interested in related categories"
        );
        assert_eq!(
            infer_audience(Some("Information Technology"), None, None),
            "Tech-savvy professionals aged 25-45"
        );
    }

    #[test]
    fn test_cta() {
        assert_eq!(pick_cta(Some("₹999-₹4999"), None), "Shop Now");
        assert_eq!(pick_cta(Some("Free"), None), "Get Started");
        assert_eq!(pick_cta(None, Some("Service")), "Book Now");
        assert_eq!(pick_cta(Some(""), Some("Product")), "Learn More");
    }

    #[test]
    fn test_age_range() {
        assert_eq!(infer_age_range(Some("Tech professionals 30-50")), "30-50");
        assert_eq!(infer_age_range(Some("Parents 28–40 years")), "28-40");
        assert_eq!(infer_age_range(Some("Students")), "25-45");
        assert_eq!(infer_age_range(None), "25-45");
        // Captured verbatim, no bounds check
        assert_eq!(infer_age_range(Some("ages 5-999")), "5-999");
    }

    #[test]
    fn test_tags_default_when_empty() {
        assert_eq!(infer_audience_tags(Some(""), Some("")), vec!["General Audience"]);
    }

    #[test]
    fn test_tags_dedup_keeps_first_seen_order() {
        let tags = infer_audience_tags(Some("Software"), Some("Health-focused tech students"));
        assert_eq!(
            tags,
            vec![
                "Fitness Enthusiasts",
                "Health-Conscious Individuals",
                "Tech Early Adopters",
                "Busy Professionals",
                "Students",
            ]
        );
    }

    #[test]
    fn test_interests() {
        assert_eq!(
            infer_interests(Some("Software"), Some("Tech business owners")),
            vec!["Technology", "Productivity"]
        );
        assert_eq!(infer_interests(None, None), vec!["General"]);
    }

    #[test]
    fn test_headlines_fall_back_to_category() {
        let form: FormRecord = [("category", "Beauty")].into_iter().collect();
        assert_eq!(
            make_headlines(&form)[0],
            "Transform Your Daily Routine with Beauty"
        );
        assert!(make_descriptions(&form)[0].contains("This product seamlessly"));
    }

    #[test]
    fn test_from_payload_health_service() {
        let form: FormRecord = [("productType", "Service"), ("category", "Health")]
            .into_iter()
            .collect();
        let s = Suggestions::from_payload(&form);
        assert_eq!(s.audience, "Health-conscious adults, 25-60");
        assert_eq!(s.cta, "Book Now");
        assert_eq!(s.age_range, "25-45");
        assert_eq!(
            s.summary_headline,
            "Transform Your Daily Routine with This Product"
        );
    }
}

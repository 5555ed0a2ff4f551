use lazy_static::lazy_static;
use regex::Regex;

use vn_core::Industry;

/// Category returned when no keyword matches at all.
pub const GENERAL_CATEGORY: &str = "General";

// Enumeration order is significant: ties resolve to the earlier category.
const DENTAL_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "technology",
            "digital",
            "software",
            "ai",
            "artificial intelligence",
            "machine learning",
            "innovation",
            "tech",
        ],
    ),
    (
        "Business",
        &[
            "business",
            "market",
            "industry",
            "revenue",
            "growth",
            "acquisition",
            "merger",
            "investment",
        ],
    ),
    (
        "Clinical",
        &[
            "clinical",
            "treatment",
            "procedure",
            "patient",
            "care",
            "therapy",
            "diagnosis",
            "health",
        ],
    ),
    (
        "Education",
        &[
            "education",
            "training",
            "course",
            "certification",
            "degree",
            "student",
            "learning",
            "school",
        ],
    ),
    (
        "Research",
        &[
            "research",
            "study",
            "trial",
            "investigation",
            "discovery",
            "science",
            "scientific",
            "development",
        ],
    ),
    (
        "Regulation",
        &[
            "regulation",
            "compliance",
            "law",
            "legal",
            "fda",
            "approval",
            "guideline",
            "standard",
        ],
    ),
];

const AESTHETIC_TAXONOMY: &[(&str, &[&str])] = &[
    (
        "Technology",
        &[
            "technology",
            "digital",
            "software",
            "ai",
            "artificial intelligence",
            "machine learning",
            "innovation",
            "tech",
        ],
    ),
    (
        "Business",
        &[
            "business",
            "market",
            "industry",
            "revenue",
            "growth",
            "acquisition",
            "merger",
            "investment",
        ],
    ),
    (
        "Treatments",
        &[
            "treatment",
            "procedure",
            "injection",
            "filler",
            "botox",
            "laser",
            "surgery",
            "therapy",
        ],
    ),
    (
        "Skincare",
        &[
            "skin",
            "skincare",
            "cream",
            "serum",
            "moisturizer",
            "cleanser",
            "anti-aging",
            "wrinkle",
        ],
    ),
    (
        "Wellness",
        &[
            "wellness",
            "health",
            "lifestyle",
            "nutrition",
            "diet",
            "exercise",
            "holistic",
            "natural",
        ],
    ),
    (
        "Trends",
        &[
            "trend",
            "popular",
            "celebrity",
            "influencer",
            "social media",
            "instagram",
            "tiktok",
            "viral",
        ],
    ),
];

lazy_static! {
    static ref DENTAL_MATCHERS: Vec<(&'static str, Vec<Regex>)> = compile(DENTAL_TAXONOMY);
    static ref AESTHETIC_MATCHERS: Vec<(&'static str, Vec<Regex>)> = compile(AESTHETIC_TAXONOMY);
}

fn compile(taxonomy: &[(&'static str, &[&str])]) -> Vec<(&'static str, Vec<Regex>)> {
    taxonomy
        .iter()
        .map(|(name, keywords)| {
            let matchers = keywords
                .iter()
                .map(|kw| {
                    Regex::new(&format!(r"(?i)\b{}\b", regex::escape(kw)))
                        .expect("keyword regex is valid")
                })
                .collect();
            (*name, matchers)
        })
        .collect()
}

fn taxonomy_matchers(industry: Industry) -> &'static [(&'static str, Vec<Regex>)] {
    match industry {
        Industry::Dental => &DENTAL_MATCHERS,
        Industry::Aesthetic => &AESTHETIC_MATCHERS,
    }
}

/// The fixed category names for an industry, in enumeration order.
pub fn category_names(industry: Industry) -> Vec<&'static str> {
    let taxonomy = match industry {
        Industry::Dental => DENTAL_TAXONOMY,
        Industry::Aesthetic => AESTHETIC_TAXONOMY,
    };
    taxonomy.iter().map(|(name, _)| *name).collect()
}

/// Map free text onto the industry's category taxonomy by whole-word keyword
/// counting. The highest total wins; ties go to the earlier category; zero
/// matches everywhere yields [`GENERAL_CATEGORY`].
pub fn classify(text: &str, industry: Industry) -> String {
    let mut best = GENERAL_CATEGORY;
    let mut best_count = 0usize;

    for (name, matchers) in taxonomy_matchers(industry) {
        let count: usize = matchers.iter().map(|re| re.find_iter(text).count()).sum();
        if count > best_count {
            best_count = count;
            best = *name;
        }
    }

    best.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_counts_pick_a_category() {
        assert_eq!(
            classify("Our new AI software platform", Industry::Dental),
            "Technology"
        );
        assert_eq!(
            classify(
                "FDA approval granted after compliance review of the legal guideline",
                Industry::Dental
            ),
            "Regulation"
        );
        assert_eq!(
            classify("Botox and filler injection techniques", Industry::Aesthetic),
            "Treatments"
        );
    }

    #[test]
    fn empty_or_unmatched_text_is_general() {
        assert_eq!(classify("", Industry::Dental), "General");
        assert_eq!(classify("lorem ipsum dolor", Industry::Aesthetic), "General");
    }

    #[test]
    fn ties_resolve_to_enumeration_order() {
        // One Technology keyword and one Clinical keyword: Technology is
        // enumerated first.
        assert_eq!(
            classify("digital patient records", Industry::Dental),
            "Technology"
        );
    }

    #[test]
    fn matching_is_whole_word() {
        // "technological" must not count for "tech" or "technology".
        assert_eq!(classify("technological", Industry::Dental), "General");
    }

    #[test]
    fn taxonomies_have_six_categories() {
        assert_eq!(category_names(Industry::Dental).len(), 6);
        assert_eq!(category_names(Industry::Aesthetic).len(), 6);
    }
}

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

use crate::classify::category_names;
use vn_core::types::{Industry, NewsArticle};

const MOCK_SOURCES: &[&str] = &[
    "DentistryToday",
    "MedicalNews",
    "HealthInsider",
    "IndustryWeekly",
    "TechMedica",
    "ClinicalJournal",
];

const TITLE_TEMPLATES: &[&str] = &[
    "New [TECH] Revolutionizes [INDUSTRY] Industry",
    "Study Shows [PERCENTAGE]% Increase in [TREATMENT] Effectiveness",
    "Leading [INDUSTRY] Companies Announce Partnership",
    "[COMPANY] Launches Innovative [PRODUCT] for [INDUSTRY] Professionals",
    "Experts Predict [INDUSTRY] Market Growth of [PERCENTAGE]% by 2026",
    "Breakthrough in [TREATMENT] Technology Promises Better Patient Outcomes",
    "Regulatory Changes Impact [INDUSTRY] Practices Nationwide",
    "Survey Reveals Top [INDUSTRY] Trends for 2025",
    "[COMPANY] Acquires [COMPANY] in $[AMOUNT]M Deal",
    "New Research Highlights Benefits of [TREATMENT] Approach",
];

const CONTENT_TEMPLATES: &[&str] = &[
    "A recent development in [INDUSTRY] technology has shown promising results in clinical trials. Experts believe this could lead to significant improvements in patient care and treatment outcomes. Industry leaders are already investing in this technology, with market analysts predicting widespread adoption within the next two years.",
    "Market research indicates a growing trend in [INDUSTRY] practices, with more professionals adopting new techniques and technologies. Patient satisfaction rates have increased by [PERCENTAGE]%, and treatment times have decreased by [PERCENTAGE]%. This shift represents a significant evolution in how [INDUSTRY] care is delivered.",
    "Regulatory bodies have announced new guidelines for [INDUSTRY] practices, focusing on patient safety and treatment efficacy. These changes will require practitioners to update their protocols and potentially invest in new equipment. Industry associations are providing resources to help professionals adapt to these new requirements.",
    "A landmark study published in the Journal of [INDUSTRY] Medicine has revealed new insights into treatment methodologies. The research, conducted over a three-year period with [NUMBER] participants, demonstrates that innovative approaches can yield better long-term results for patients while reducing recovery time and complications.",
    "Industry leaders gathered at the annual [INDUSTRY] Conference to discuss emerging trends and challenges. Key topics included technological innovation, patient experience enhancement, and sustainable practice management. Attendees were particularly interested in new digital solutions that streamline administrative processes while improving clinical outcomes.",
];

const TECH_NAMES: &[&str] = &[
    "AI",
    "Machine Learning",
    "Digital Scanning",
    "Robotics",
    "Cloud Computing",
];

const DENTAL_TREATMENTS: &[&str] = &["Implant", "Orthodontic", "Periodontal", "Endodontic", "Cosmetic"];
const AESTHETIC_TREATMENTS: &[&str] = &["Laser", "Injectable", "Surgical", "Non-invasive", "Dermal"];

const COMPANIES: &[&str] = &["MediTech", "HealthPlus", "InnovaCare", "NextGen", "PrimeSolutions"];
const PRODUCTS: &[&str] = &["System", "Solution", "Platform", "Device", "Software"];
const AUTHORS: &[&str] = &[
    "Dr. John Smith",
    "Sarah Johnson",
    "Michael Chen",
    "Emily Rodriguez",
    "David Wilson",
];

/// Synthetic-article generator, the unconditional last resort of the
/// acquisition chain. Randomness comes from an injected seedable source so
/// tests can pin the output.
pub struct MockGenerator {
    rng: Mutex<StdRng>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

fn fill_placeholder(text: &mut String, placeholder: &str, mut value: impl FnMut() -> String) {
    while text.contains(placeholder) {
        *text = text.replacen(placeholder, &value(), 1);
    }
}

impl MockGenerator {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn fill_title(&self, rng: &mut StdRng, template: &str, industry: Industry) -> String {
        let treatments = match industry {
            Industry::Dental => DENTAL_TREATMENTS,
            Industry::Aesthetic => AESTHETIC_TREATMENTS,
        };
        let mut title = template.to_string();
        fill_placeholder(&mut title, "[TECH]", || pick(rng, TECH_NAMES).to_string());
        fill_placeholder(&mut title, "[INDUSTRY]", || industry.as_str().to_string());
        fill_placeholder(&mut title, "[PERCENTAGE]", || {
            rng.gen_range(20..50).to_string()
        });
        fill_placeholder(&mut title, "[TREATMENT]", || pick(rng, treatments).to_string());
        fill_placeholder(&mut title, "[COMPANY]", || pick(rng, COMPANIES).to_string());
        fill_placeholder(&mut title, "[PRODUCT]", || pick(rng, PRODUCTS).to_string());
        fill_placeholder(&mut title, "[AMOUNT]", || rng.gen_range(100..1000).to_string());
        title
    }

    fn fill_content(&self, rng: &mut StdRng, template: &str, industry: Industry) -> String {
        let percentage = rng.gen_range(20..50).to_string();
        let number = rng.gen_range(100..1000).to_string();
        template
            .replace("[INDUSTRY]", industry.as_str())
            .replace("[PERCENTAGE]", &percentage)
            .replace("[NUMBER]", &number)
    }

    /// Produce `limit` synthetic articles. Never fails; the first two are
    /// flagged as featured.
    pub fn generate(
        &self,
        industry: Industry,
        limit: usize,
        category: Option<&str>,
        source: Option<&str>,
    ) -> Vec<NewsArticle> {
        let mut rng = self.rng.lock().expect("mock rng lock poisoned");
        let categories = category_names(industry);
        let mut articles = Vec::with_capacity(limit);

        for i in 0..limit {
            let article_category = category
                .map(str::to_string)
                .unwrap_or_else(|| pick(&mut rng, &categories).to_string());
            let article_source = source
                .map(str::to_string)
                .unwrap_or_else(|| pick(&mut rng, MOCK_SOURCES).to_string());
            let published_date = Utc::now() - Duration::days(rng.gen_range(0..30));

            let title_template = pick(&mut rng, TITLE_TEMPLATES);
            let title = self.fill_title(&mut rng, title_template, industry);
            let content_template = pick(&mut rng, CONTENT_TEMPLATES);
            let content = self.fill_content(&mut rng, content_template, industry);
            let summary: String = content.chars().take(150).collect::<String>() + "...";

            articles.push(NewsArticle {
                id: (i + 1) as i64,
                title,
                summary,
                content,
                image_url: String::new(),
                url: format!(
                    "https://www.{}.com/news/{}",
                    article_source.to_lowercase(),
                    i + 1
                ),
                published_date,
                author: pick(&mut rng, AUTHORS).to_string(),
                source: article_source,
                category: article_category,
                industry,
                featured: i < 2,
            });
        }

        articles
    }
}

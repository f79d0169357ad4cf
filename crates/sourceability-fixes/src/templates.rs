//! Scaffold templates for each reason code. Grounded on
//! `original_source/worker/fixes/templates.py`; scaffold bodies are
//! condensed paraphrases of the reference templates, not verbatim copies.

use crate::reason_codes::ReasonCode;
use sourceability_types::model::Category;

#[derive(Debug, Clone)]
pub struct FixTemplate {
    pub reason_code: ReasonCode,
    pub title: &'static str,
    pub description: &'static str,
    pub action_verb: &'static str,
    pub target_location: &'static str,
    pub scaffold_template: &'static str,
    pub examples: &'static [&'static str],
    pub related_categories: &'static [Category],
    pub priority: u8,
}

pub fn template_for(code: ReasonCode) -> FixTemplate {
    match code {
        ReasonCode::MissingDefinition => FixTemplate {
            reason_code: code,
            title: "Add Clear Business Definition",
            description: "Add a clear, concise definition of what your business does",
            action_verb: "Add",
            target_location: "About page or homepage hero section",
            scaffold_template: "[COMPANY_NAME] is a [BUSINESS_TYPE] that [CORE_VALUE_PROPOSITION].\n\nWe help [TARGET_AUDIENCE] to [PRIMARY_BENEFIT] by [HOW_YOU_DO_IT].\n\nFounded in [YEAR], we [BRIEF_HISTORY_OR_MISSION].",
            examples: &[
                "Acme Corp is a B2B SaaS company that streamlines inventory management.",
                "We help retail businesses reduce stockouts by 40% through AI-powered forecasting.",
            ],
            related_categories: &[Category::Identity],
            priority: 1,
        },
        ReasonCode::MissingPricing => FixTemplate {
            reason_code: code,
            title: "Add Pricing Information",
            description: "Create a dedicated pricing page or section with clear pricing tiers",
            action_verb: "Create",
            target_location: "Dedicated /pricing page",
            scaffold_template: "## Pricing Plans\n\n### [PLAN_NAME_1] - $[PRICE_1]/[PERIOD]\n[PLAN_DESCRIPTION_1]\n- [FEATURE_1]\n- [FEATURE_2]\n\n### [PLAN_NAME_2] - $[PRICE_2]/[PERIOD]\n[PLAN_DESCRIPTION_2]\n- [FEATURE_1]\n- [FEATURE_2]\n\n[CALL_TO_ACTION] or [CONTACT_FOR_CUSTOM_PRICING]",
            examples: &[
                "Starter - $29/month: Perfect for small teams",
                "Professional - $99/month: For growing businesses",
                "Enterprise - Contact us for custom pricing",
            ],
            related_categories: &[Category::Offerings],
            priority: 1,
        },
        ReasonCode::MissingContact => FixTemplate {
            reason_code: code,
            title: "Add Contact Information",
            description: "Make contact information prominent and accessible",
            action_verb: "Add",
            target_location: "Footer, header, and dedicated /contact page",
            scaffold_template: "## Contact Us\n\n**Email:** [EMAIL_ADDRESS]\n**Phone:** [PHONE_NUMBER]\n**Address:** [PHYSICAL_ADDRESS]\n\n### Business Hours\n[BUSINESS_HOURS]\n\n### Get in Touch\n[CONTACT_FORM_OR_BOOKING_LINK]",
            examples: &[
                "Email: hello@company.com",
                "Phone: (555) 123-4567",
                "Hours: Monday-Friday, 9am-5pm EST",
            ],
            related_categories: &[Category::Contact],
            priority: 1,
        },
        ReasonCode::MissingLocation => FixTemplate {
            reason_code: code,
            title: "Add Location/Service Area",
            description: "Clearly state where your business operates or serves customers",
            action_verb: "Add",
            target_location: "About page, footer, or dedicated locations page",
            scaffold_template: "## Where We Operate\n\nHeadquartered in [HQ_LOCATION], we serve [SERVICE_AREA].\n\n### Office Locations\n- [LOCATION_1]\n- [LOCATION_2]",
            examples: &["Headquartered in Austin, TX, serving customers across North America."],
            related_categories: &[Category::Identity],
            priority: 2,
        },
        ReasonCode::MissingFeatures => FixTemplate {
            reason_code: code,
            title: "Add Product/Service Features",
            description: "Create a clear, scannable list of product or service features",
            action_verb: "Create",
            target_location: "Product page or dedicated /features page",
            scaffold_template: "## Key Features\n\n### [FEATURE_NAME_1]\n[FEATURE_DESCRIPTION_1]\n\n### [FEATURE_NAME_2]\n[FEATURE_DESCRIPTION_2]\n\n### [FEATURE_NAME_3]\n[FEATURE_DESCRIPTION_3]",
            examples: &["Real-time inventory sync across all sales channels."],
            related_categories: &[Category::Offerings],
            priority: 1,
        },
        ReasonCode::MissingSocialProof => FixTemplate {
            reason_code: code,
            title: "Add Social Proof",
            description: "Add testimonials, case studies, or customer logos",
            action_verb: "Add",
            target_location: "Homepage, dedicated /testimonials or /case-studies page",
            scaffold_template: "## What Our Customers Say\n\n> \"[TESTIMONIAL_QUOTE]\"\n— [CUSTOMER_NAME], [CUSTOMER_TITLE_OR_COMPANY]\n\n### Case Study: [CASE_STUDY_TITLE]\n[CASE_STUDY_SUMMARY]",
            examples: &["\"We cut onboarding time in half.\" — Jane Doe, Ops Lead at Acme"],
            related_categories: &[Category::Trust],
            priority: 2,
        },
        ReasonCode::BuriedAnswer => FixTemplate {
            reason_code: code,
            title: "Surface Key Information",
            description: "Move important information higher on the page or into navigation",
            action_verb: "Move",
            target_location: "Above the fold, in page headers, or navigation",
            scaffold_template: "Move [INFORMATION] from [CURRENT_LOCATION] to [TARGET_LOCATION] so it appears within the first screen of content.",
            examples: &["Move pricing summary from footer to the hero section."],
            related_categories: &[],
            priority: 2,
        },
        ReasonCode::FragmentedInfo => FixTemplate {
            reason_code: code,
            title: "Consolidate Information",
            description: "Bring scattered information together into one comprehensive section",
            action_verb: "Create",
            target_location: "New dedicated page or comprehensive section",
            scaffold_template: "## [TOPIC] Overview\n\nConsolidate the following into a single section:\n- [INFO_FRAGMENT_1] (currently on [PAGE_1])\n- [INFO_FRAGMENT_2] (currently on [PAGE_2])",
            examples: &[],
            related_categories: &[],
            priority: 3,
        },
        ReasonCode::NoDedicatedPage => FixTemplate {
            reason_code: code,
            title: "Create Dedicated Page",
            description: "Give an important topic its own dedicated page",
            action_verb: "Create",
            target_location: "New page at /[topic-slug]",
            scaffold_template: "## [TOPIC]\n\n[TOPIC_OVERVIEW]\n\n### Key Points\n- [POINT_1]\n- [POINT_2]\n- [POINT_3]",
            examples: &[],
            related_categories: &[],
            priority: 2,
        },
        ReasonCode::PoorHeadings => FixTemplate {
            reason_code: code,
            title: "Improve Page Headings",
            description: "Rewrite headings to match how people actually ask about this topic",
            action_verb: "Update",
            target_location: "Page H1, H2, and H3 tags",
            scaffold_template: "Replace heading \"[CURRENT_HEADING]\" with \"[QUESTION_MATCHING_HEADING]\".",
            examples: &["Replace \"Solutions\" with \"What Problems Do We Solve?\""],
            related_categories: &[],
            priority: 3,
        },
        ReasonCode::NotCitable => FixTemplate {
            reason_code: code,
            title: "Make Content Citable",
            description: "Attribute claims and data clearly to your company or named sources",
            action_verb: "Add",
            target_location: "Key content sections",
            scaffold_template: "According to [COMPANY_NAME]'s [DATA_SOURCE], [SPECIFIC_CLAIM_WITH_NUMBERS].",
            examples: &["According to our 2025 customer survey, 92% reported faster onboarding."],
            related_categories: &[],
            priority: 3,
        },
        ReasonCode::VagueLanguage => FixTemplate {
            reason_code: code,
            title: "Use Specific Language",
            description: "Replace generic marketing language with specific, concrete claims",
            action_verb: "Replace",
            target_location: "Throughout site copy",
            scaffold_template: "Replace \"[VAGUE_PHRASE]\" with \"[SPECIFIC_CLAIM_WITH_NUMBERS_OR_NAMES]\".",
            examples: &["Replace \"industry-leading\" with \"used by 500+ companies in 12 countries\"."],
            related_categories: &[],
            priority: 3,
        },
        ReasonCode::OutdatedInfo => FixTemplate {
            reason_code: code,
            title: "Update Outdated Information",
            description: "Refresh stale content with current facts and figures",
            action_verb: "Update",
            target_location: "Identified outdated pages/sections",
            scaffold_template: "Update [OUTDATED_FACT] (last verified [OLD_DATE]) to [CURRENT_FACT] as of [CURRENT_DATE].",
            examples: &[],
            related_categories: &[],
            priority: 2,
        },
        ReasonCode::Inconsistent => FixTemplate {
            reason_code: code,
            title: "Resolve Inconsistencies",
            description: "Reconcile conflicting information found across pages",
            action_verb: "Fix",
            target_location: "Multiple pages with conflicting info",
            scaffold_template: "[PAGE_1] states \"[CLAIM_A]\" while [PAGE_2] states \"[CLAIM_B]\". Standardize on: [CORRECT_CLAIM].",
            examples: &[],
            related_categories: &[],
            priority: 1,
        },
        ReasonCode::TrustGap => FixTemplate {
            reason_code: code,
            title: "Add Trust Signals",
            description: "Add certifications, awards, or recognitions that build credibility",
            action_verb: "Add",
            target_location: "Homepage, about page, and footer",
            scaffold_template: "## Recognition\n\n- [CERTIFICATION_OR_AWARD_1]\n- [CERTIFICATION_OR_AWARD_2]\n- As featured in [PUBLICATION]",
            examples: &["SOC 2 Type II certified", "Featured in TechCrunch, 2025"],
            related_categories: &[Category::Trust],
            priority: 2,
        },
        ReasonCode::NoAuthority => FixTemplate {
            reason_code: code,
            title: "Establish Authority",
            description: "Highlight team expertise, credentials, or published thought leadership",
            action_verb: "Add",
            target_location: "About page, team page, or blog",
            scaffold_template: "## Our Team\n\n[FOUNDER_NAME], [CREDENTIALS_OR_BACKGROUND].\n\n### Published Work\n- [ARTICLE_OR_TALK_1]",
            examples: &[],
            related_categories: &[],
            priority: 3,
        },
        ReasonCode::UnverifiedClaims => FixTemplate {
            reason_code: code,
            title: "Add Evidence for Claims",
            description: "Back bold marketing claims with data, sources, or case studies",
            action_verb: "Add",
            target_location: "Marketing pages with bold claims",
            scaffold_template: "\"[CLAIM]\" — supported by [EVIDENCE_SOURCE_OR_DATA].",
            examples: &[],
            related_categories: &[],
            priority: 2,
        },
        ReasonCode::RenderRequired => FixTemplate {
            reason_code: code,
            title: "Enable Static Content",
            description: "Ensure key content is present in server-rendered HTML, not only client-side JS",
            action_verb: "Implement",
            target_location: "Server-side rendering or static HTML",
            scaffold_template: "Render [CONTENT_SECTION] server-side or pre-render it as static HTML so it is present without executing JavaScript.",
            examples: &[],
            related_categories: &[],
            priority: 1,
        },
        ReasonCode::BlockedByRobots => FixTemplate {
            reason_code: code,
            title: "Update Robots.txt",
            description: "Remove disallow rules blocking important content from being crawled",
            action_verb: "Update",
            target_location: "/robots.txt file",
            scaffold_template: "Remove or narrow the rule blocking [PATH] in robots.txt so the page can be crawled.",
            examples: &[],
            related_categories: &[],
            priority: 1,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_reason_code_has_a_template() {
        for code in ReasonCode::ALL {
            let t = template_for(code);
            assert_eq!(t.reason_code, code);
            assert!(!t.scaffold_template.is_empty());
        }
    }
}

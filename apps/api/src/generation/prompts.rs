//! Prompt construction for bio generation.
//!
//! Two templates exist: the detailed five-section bio and the short 1-2
//! paragraph description. Which one is used defaults to config
//! (`BIO_PROMPT_MODE`) and may be overridden per request.

use serde::Deserialize;

use crate::models::bio::BioFormData;

/// Verbosity of the generated bio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptMode {
    Detailed,
    Short,
}

impl std::str::FromStr for PromptMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "detailed" => Ok(PromptMode::Detailed),
            "short" => Ok(PromptMode::Short),
            other => anyhow::bail!("unknown prompt mode '{other}'"),
        }
    }
}

/// Detailed bio template. Replace: {fullname}, {title}, {company}, {tags},
/// {tone}, {goal}. Field values are interpolated verbatim.
const DETAILED_BIO_TEMPLATE: &str = r#"
You are a professional AI writing assistant.
Generate a detailed, human-like professional bio using the following user info.

Full Name: {fullname}
Title: {title}
Company: {company}
Tags: {tags}
Tone: {tone}
Goal: {goal}

Format:
- A clear and professional Title/Heading with the full name and role.
- Background & Expertise: A detailed overview of the person's technical/professional skills, domain expertise, and areas of focus.
- Approach & Philosophy: Describe how they approach work, design, problem-solving, or teamwork.
- Collaboration & Values: Highlight soft skills, teamwork, and personality traits.
- Goals & Vision: Describe their aspirations, future focus, or professional mission.

Make it natural, inspiring, and easy to read. Avoid generic filler—write with clarity and personality.
"#;

/// Short bio template. Same placeholders as the detailed one.
const SHORT_BIO_TEMPLATE: &str = r#"
You are an AI assistant writing a short personalized bio.
Full Name: {fullname}
Title/Role: {title}
Company/Organization: {company}
Expertise/Tags: {tags}
Tone/Style: {tone}
Goal: {goal}

Generate 1-2 paragraphs in a human-like style.
"#;

/// Builds the generation prompt from form data. Pure and total — every
/// field lands in the output verbatim, no escaping.
pub fn build_prompt(form: &BioFormData, mode: PromptMode) -> String {
    let template = match mode {
        PromptMode::Detailed => DETAILED_BIO_TEMPLATE,
        PromptMode::Short => SHORT_BIO_TEMPLATE,
    };

    template
        .replace("{fullname}", &form.fullname)
        .replace("{title}", &form.title)
        .replace("{company}", &form.company)
        .replace("{tags}", &form.tags)
        .replace("{tone}", &form.tone)
        .replace("{goal}", &form.goal)
}

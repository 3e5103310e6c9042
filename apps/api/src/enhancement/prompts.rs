// Prompt templates for resume enhancement.
// Placeholders: `{resume}` and `{job_description}`.

pub const RESUME_ENHANCEMENT_TEMPLATE: &str = "Enhance this resume to match the job description:\n\nResume:\n{resume}\n\nJob Description:\n{job_description}";

pub const ATS_OPTIMIZATION_TEMPLATE: &str = "Optimize this resume for better ATS compatibility:\n\nResume:\n{resume}\n\nJob Description:\n{job_description}";

/// The known template keys. Unknown keys resolve to `ResumeEnhancement`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PromptKey {
    #[default]
    ResumeEnhancement,
    AtsOptimization,
}

impl PromptKey {
    pub fn parse(key: &str) -> Self {
        match key {
            "ats_optimization" => PromptKey::AtsOptimization,
            _ => PromptKey::ResumeEnhancement,
        }
    }

    pub fn template(self) -> &'static str {
        match self {
            PromptKey::ResumeEnhancement => RESUME_ENHANCEMENT_TEMPLATE,
            PromptKey::AtsOptimization => ATS_OPTIMIZATION_TEMPLATE,
        }
    }
}

/// Template for `key`, or the resume enhancement template if it is unknown.
pub fn get_prompt(key: &str) -> &'static str {
    PromptKey::parse(key).template()
}

/// Substitutes both placeholders in a single pass, so text inside the resume
/// that happens to look like a placeholder is left alone.
pub fn render_prompt(template: &str, resume: &str, job_description: &str) -> String {
    let mut out = String::with_capacity(template.len() + resume.len() + job_description.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{resume}") {
            out.push_str(resume);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{job_description}") {
            out.push_str(job_description);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

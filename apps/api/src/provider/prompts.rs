// Prompt builders for the instruction-tuned text-generation models.
// Inputs are wrapped in the `[INST]` chat template the default model expects.

/// Characters of resume text sent to the model. Keeps the prompt inside the
/// context window of small instruct models.
pub const RESUME_TEXT_LIMIT: usize = 6000;

const JSON_ONLY: &str = "Respond with a single JSON object only. \
    Do not use markdown code fences. Do not add explanations.";

pub fn resume_extraction_prompt(resume_text: &str) -> String {
    let excerpt: String = resume_text.chars().take(RESUME_TEXT_LIMIT).collect();
    format!(
        "<s>[INST] Extract the candidate's details from the resume below. {JSON_ONLY} \
         Use exactly these keys: \"name\" (string), \"email\" (string), \"phone\" (string), \
         \"skills\" (array of strings), \"experience\" (array of strings, one per role, \
         formatted as \"Title at Company (years)\"), \"education\" (array of strings). \
         Use an empty string or empty array when a value is not present.\n\n\
         Resume:\n{excerpt} [/INST]"
    )
}

pub fn interview_tips_prompt(company: &str, job_title: &str) -> String {
    format!(
        "<s>[INST] A candidate is preparing for an interview for the role of {job_title} \
         at {company}. Give three short, specific preparation tips for this role. {JSON_ONLY} \
         Use exactly one key: \"tips\" (array of strings). [/INST]"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_prompt_truncates_long_text() {
        let text = "x".repeat(RESUME_TEXT_LIMIT + 500);
        let prompt = resume_extraction_prompt(&text);
        assert!(prompt.contains(&"x".repeat(RESUME_TEXT_LIMIT)));
        assert!(!prompt.contains(&"x".repeat(RESUME_TEXT_LIMIT + 1)));
    }

    #[test]
    fn test_interview_prompt_names_role_and_company() {
        let prompt = interview_tips_prompt("DesignWave", "UX/UI Designer");
        assert!(prompt.contains("UX/UI Designer at DesignWave"));
        assert!(prompt.ends_with("[/INST]"));
    }
}

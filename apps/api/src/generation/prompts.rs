// Prompt text for resume generation.

use std::fmt::Write as _;

use crate::generation::form::ResumeFormData;

/// System prompt for the resume writer. The render pipeline relies on the
/// header and bullet conventions it asks for.
pub const RESUME_WRITER_SYSTEM: &str = "You are an expert resume writer. \
    Respond with the resume text only: no preamble, no closing remarks, no markdown. \
    Write section headers in ALL CAPS on their own line and start bullet points with '- '.";

const FORMAT_INSTRUCTIONS: &str = "Please format the resume in a professional way with clear sections and bullet points. 
Make sure to highlight key achievements and skills relevant to the job title.
Use appropriate headings and organize the content in a logical structure.
The resume should be concise, impactful, and ready for professional use.";

/// Builds the user prompt from the form. Empty fields are left out.
pub fn construct_prompt(form: &ResumeFormData) -> String {
    let language = display_language(&form.language);
    let mut prompt = format!(
        "Generate a professional resume for the following details. The resume should be in {language}:\n\n"
    );

    prompt.push_str("PERSONAL INFORMATION:\n");
    for (label, value) in [
        ("Name", &form.name),
        ("Job Title", &form.job_title),
        ("Email", &form.email),
        ("Phone", &form.phone),
        ("Location", &form.location),
        ("Website/LinkedIn", &form.website),
    ] {
        if !value.trim().is_empty() {
            let _ = writeln!(prompt, "{label}: {}", value.trim());
        }
    }

    for (heading, value) in [
        ("PROFESSIONAL SUMMARY", &form.summary),
        ("WORK EXPERIENCE", &form.experience),
        ("EDUCATION", &form.education),
        ("SKILLS", &form.skills),
        ("PROJECTS", &form.projects),
        ("CERTIFICATIONS", &form.certifications),
    ] {
        if !value.trim().is_empty() {
            let _ = write!(prompt, "\n{heading}:\n{}\n", value.trim_end());
        }
    }

    prompt.push_str("\nRESUME PREFERENCES:\n");
    if !form.resume_style.trim().is_empty() {
        let _ = writeln!(prompt, "Style: {}", form.resume_style.trim());
    }
    if !form.tone_style.trim().is_empty() {
        let _ = writeln!(prompt, "Tone: {}", form.tone_style.trim());
    }

    if !form.additional_instructions.trim().is_empty() {
        let _ = write!(
            prompt,
            "\nADDITIONAL INSTRUCTIONS:\n{}\n",
            form.additional_instructions.trim_end()
        );
    }

    let _ = write!(
        prompt,
        "\n{FORMAT_INSTRUCTIONS}\nEnsure all text is in {language}.\n\
         Format the resume with clear section headers in ALL CAPS followed by relevant content \
         with bullet points for achievements and responsibilities."
    );
    prompt
}

/// `english` → `English`; empty → `English`.
fn display_language(language: &str) -> String {
    let language = language.trim();
    let language = if language.is_empty() { "english" } else { language };
    let mut chars = language.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

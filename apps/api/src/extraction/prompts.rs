// Prompt constants for the extraction collaborators.

/// Instruction sent with a job-poster image to the vision model.
pub const IMAGE_EXTRACTION_PROMPT: &str = "Please extract all text from this job posting image. \
    Include company name, job title, requirements, and any other relevant details. \
    Format the text in a clear, structured way.";

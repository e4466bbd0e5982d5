use crate::models::domain::FormatVariant;
use crate::services::model_service::GenerationRequest;

const PLAIN_FORMAT_RULES: &str = "Q1. [Conceptual question text]
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Correct: [Correct option letter]
Explanation: [Detailed explanation]";

const CODE_FORMAT_RULES: &str = "Q1. [Question text]
```
[Code snippet]
```
A) [Option A]
B) [Option B]
C) [Option C]
D) [Option D]
Correct: [Correct option letter]
Explanation: [Detailed explanation]";

/// Render the full prompt for one generation request. The format rules and
/// closing instruction depend on the request's format variant.
pub fn build_quiz_prompt(request: &GenerationRequest) -> String {
    let (rules, closing) = match request.variant {
        FormatVariant::Plain => (
            PLAIN_FORMAT_RULES,
            "Ensure exactly the requested number of conceptual questions are generated with correct formatting. Do not include code snippets.",
        ),
        FormatVariant::CodeOptional => (
            CODE_FORMAT_RULES,
            "Ensure exactly the requested number of questions are generated with correct formatting.",
        ),
        FormatVariant::CodeRequired => (
            CODE_FORMAT_RULES,
            "Ensure exactly the requested number of questions are generated with correct formatting. Every question must include a code snippet.",
        ),
    };

    format!(
        "Generate {count} multiple-choice questions about {topic} at {level} level.\n\
         Each question must strictly follow this format:\n\n\
         {rules}\n\n\
         Do not include any extra text. {closing}",
        count = request.count,
        topic = request.topic,
        level = request.level,
        rules = rules,
        closing = closing,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::Difficulty;

    fn request_for(level: Difficulty) -> GenerationRequest {
        GenerationRequest {
            topic: "lifetimes".to_string(),
            level,
            count: 4,
            variant: level.format_variant(),
        }
    }

    #[test]
    fn plain_prompt_forbids_code() {
        let prompt = build_quiz_prompt(&request_for(Difficulty::Beginner));
        assert!(prompt.contains("Generate 4 multiple-choice questions about lifetimes"));
        assert!(prompt.contains("Do not include code snippets."));
        assert!(!prompt.contains("```"));
    }

    #[test]
    fn code_prompts_show_the_fence() {
        let optional = build_quiz_prompt(&request_for(Difficulty::Intermediate));
        assert!(optional.contains("```"));

        let required = build_quiz_prompt(&request_for(Difficulty::Advanced));
        assert!(required.contains("Every question must include a code snippet."));
    }

    #[test]
    fn prompt_names_the_level() {
        let prompt = build_quiz_prompt(&request_for(Difficulty::Advanced));
        assert!(prompt.contains("at advanced level"));
    }
}

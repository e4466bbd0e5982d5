#[cfg(test)]
pub mod fixtures {
    use std::collections::BTreeMap;

    use crate::models::domain::QuizItem;

    /// One well-formed item whose correct answer is `correct`.
    pub fn quiz_item(correct: char) -> QuizItem {
        let options: BTreeMap<char, String> = ['A', 'B', 'C', 'D']
            .into_iter()
            .map(|letter| (letter, format!("option {}", letter)))
            .collect();

        QuizItem {
            question: "What does this question ask?".to_string(),
            code: None,
            options,
            correct,
            explanation: "Because the fixture says so.".to_string(),
        }
    }

    /// Raw generated text with `count` well-formed plain questions. The
    /// correct answer is always A.
    pub fn raw_quiz_text(count: usize) -> String {
        let mut raw = String::new();
        for number in 1..=count {
            raw.push_str(&format!(
                "Q{n}. What does question {n} ask?\n\
                 A) the right answer\n\
                 B) a wrong answer\n\
                 C) another wrong answer\n\
                 D) a distractor\n\
                 Correct: A\n\
                 Explanation: question {n} is answered by A.\n\n",
                n = number
            ));
        }
        raw
    }

    /// One well-formed question carrying a fenced code block.
    pub fn raw_code_quiz_text() -> String {
        "Q1. What does this snippet do?\n\
         ```\n\
         let x = 1;\n\
         ```\n\
         A) it compiles\n\
         B) it fails\n\
         C) it loops\n\
         D) it panics\n\
         Correct: A\n\
         Explanation: a literal binding always compiles.\n"
            .to_string()
    }
}

//! Prompt templates for the three pipeline stages.
//!
//! Each prompt sends only the fields its stage needs, never the whole
//! accumulated history, which keeps every completion call bounded.

use crate::domain::models::Rating;

/// Persona shared by the evaluation and reassessment prompts.
pub const EVALUATOR_SYSTEM: &str =
    "You are a control effectiveness evaluation agent. You analyze risk control \
     descriptions and rate their effectiveness on a 1-5 scale, always answering \
     with a single fenced JSON block in the requested format.";

/// Persona for the reflection prompt.
pub const CRITIC_SYSTEM: &str =
    "You are a critical thinking agent that evaluates and provides feedback on \
     control effectiveness assessments, always answering with a single fenced \
     JSON block in the requested format.";

/// Initial evaluation: five criteria, an overall score, and a narrative.
pub fn evaluation_prompt(input_text: &str) -> String {
    format!(
        r#"Evaluate the following control description based on these metrics:
1. Clarity (1-5): How clearly the control is defined and communicated
2. Appropriateness (1-5): How well the control addresses the identified risk
3. Efficiency (1-5): How efficiently the control can be implemented
4. Measurability (1-5): How easily the control's effectiveness can be measured
5. Sustainability (1-5): How sustainable the control is over time

Control:
{input_text}

Provide a JSON format response with:
1. A score for each metric (1-5)
2. A brief rationale for each score
3. An overall score (1-5)
4. An overall assessment

Format:
```json
{{
    "metrics": {{
        "clarity": {{"score": <1-5>, "rationale": "<brief explanation>"}},
        "appropriateness": {{"score": <1-5>, "rationale": "<brief explanation>"}},
        "efficiency": {{"score": <1-5>, "rationale": "<brief explanation>"}},
        "measurability": {{"score": <1-5>, "rationale": "<brief explanation>"}},
        "sustainability": {{"score": <1-5>, "rationale": "<brief explanation>"}}
    }},
    "overall_score": <1-5>,
    "overall_assessment": "<detailed assessment>"
}}
```"#
    )
}

/// Self-reflection: critique the evaluation without changing the rating.
pub fn reflection_prompt(
    input_text: &str,
    assessment: &str,
    rating: Rating,
    rationale: &str,
) -> String {
    format!(
        r#"Original Control:
{input_text}

Initial Assessment: {assessment}
Initial Rating: {rating}

Detailed Rationale:
{rationale}

Your task:
1. Critically evaluate the assessment for potential blind spots, biases, or areas that may have been overlooked
2. Consider alternative perspectives that might change the evaluation
3. Identify any potential inconsistencies between the rationale and the overall rating
4. Suggest improvements to the assessment

Provide a JSON format response with:
1. Feedback points (3-5 critical reflections)
2. Suggested perspective changes (if any)
3. Overall reflection summary

Format:
```json
{{
    "feedback_points": ["<feedback point 1>", "<feedback point 2>", "<feedback point 3>"],
    "perspective_changes": "<suggestions for alternative ways to look at the control>",
    "reflection_summary": "<overall summary of reflection>"
}}
```"#
    )
}

/// Reassessment: fold the critique into one revised rating and narrative.
pub fn reassessment_prompt(
    input_text: &str,
    assessment: &str,
    rating: Rating,
    reflection: &str,
) -> String {
    format!(
        r#"You previously evaluated a control, and now you've received feedback from a self-reflection agent.

Original Control:
{input_text}

Your Initial Assessment: {assessment}
Your Initial Rating: {rating}

Self-Reflection Feedback:
{reflection}

Now, reassess the control taking into account the feedback you've received. Focus on providing only a single overall rating and assessment, not individual metric ratings.

Provide a JSON format response with:
1. A final overall score (1-5)
2. A comprehensive final assessment that incorporates the reflection feedback

Format:
```json
{{
    "final_score": <1-5>,
    "final_assessment": "<comprehensive assessment>"
}}
```"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluation_prompt_embeds_the_control() {
        let prompt = evaluation_prompt("Quarterly access reviews");
        assert!(prompt.contains("Quarterly access reviews"));
        assert!(prompt.contains("\"overall_score\""));
    }

    #[test]
    fn reflection_prompt_sends_only_needed_fields() {
        let rating = Rating::try_from(4).unwrap();
        let prompt = reflection_prompt("ctl", "decent", rating, "clarity: fine");
        assert!(prompt.contains("Initial Rating: 4/5"));
        assert!(prompt.contains("feedback_points"));
    }

    #[test]
    fn reassessment_prompt_requests_final_score() {
        let rating = Rating::try_from(2).unwrap();
        let prompt = reassessment_prompt("ctl", "weak", rating, "missed evidence");
        assert!(prompt.contains("\"final_score\""));
        assert!(prompt.contains("missed evidence"));
    }
}

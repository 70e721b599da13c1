// ABOUTME: Prompt templates for the content and assessment agents.
// ABOUTME: Renders deterministic instruction strings from the learner context.

use equiedu_core::Context;

/// Instruction for a personalised explanation of the topic.
pub fn content_prompt(context: &Context) -> String {
    let topic = context.topic.trim();
    let learner = context.display_learner();
    let style = &context.style;
    let accessibility = &context.accessibility;

    format!(
        "You are an expert educational tutor. Create a {style} explanation of {topic} for a student named {learner}.

Learning Style: {style}
- If 'simple': Use clear, easy language suitable for beginners
- If 'visual': Include visual analogies, metaphors, and imagine-able descriptions
- If 'detailed': Provide comprehensive explanation with examples and real-world applications

Accessibility Need: {accessibility}
- If 'dyslexia': Use short sentences (max 15 words), simple vocabulary, clear structure
- If 'audio': Write in conversational, listening-friendly style
- If 'none': Standard educational writing

Create an engaging, accurate explanation now (200-300 words):"
    )
}

/// Instruction for a three-question quiz on the topic.
pub fn assessment_prompt(context: &Context) -> String {
    let topic = context.topic.trim();
    let learner = context.display_learner();
    let accessibility = &context.accessibility;

    format!(
        "Create a 3-question quiz about {topic} for a high school student named {learner}.

Requirements:
- Mix question types: multiple choice, short answer, application
- Make questions fair and unbiased
- Difficulty: moderate (high school level)
- Include correct answers at the end

Accessibility Need: {accessibility}
- If 'dyslexia': use simple, clear language in questions

Format each question clearly with numbers."
    )
}

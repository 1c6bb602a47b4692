//! Prompt templates for the tutoring tasks

use super::contract::DifficultyDistribution;

/// Prompt builder for notes, quizzes, and explanations
pub struct PromptBuilder;

impl PromptBuilder {
    /// Truncate text to a character budget so long materials stay inside
    /// the model's context window
    fn clip(text: &str, max_chars: usize) -> &str {
        match text.char_indices().nth(max_chars) {
            Some((idx, _)) => &text[..idx],
            None => text,
        }
    }

    /// Prompt for comprehensive study notes over the full material
    pub fn notes_prompt(content: &str, subject: Option<&str>, level: &str, focus: &str) -> String {
        format!(
            r#"You are an expert Study Buddy and Personal Tutor. Your job is to transform the following study material into clear, comprehensive study notes.

**Study Material:**
{content}

**Student Level:** {level}
**Subject:** {subject}
**Focus:** {focus}

**Generate study notes following this structure:**

1. **Main Topic/Chapter Title**

2. **Key Concepts Overview** (Brief introduction)

3. **Detailed Sections** (For each major concept):
   ### Concept Name

   **Simple Definition:**
   [Easy-to-understand definition in plain language]

   **Detailed Explanation:**
   [Step-by-step breakdown, assuming beginner knowledge]
   [Use simple language first, then introduce technical terms]

   **Example:**
   [Concrete example with real numbers/scenarios]

   **Real-Life Analogy:**
   [Relatable comparison to everyday experience]

   ⭐ **Important Points:**
   - Key point 1
   - Key point 2

   🧠 **Formula/Keywords:**
   [Any formulas, definitions, or key terms to memorize]

   ⚠️ **Common Mistakes:**
   - Mistake 1 and why it's wrong
   - Mistake 2 and how to avoid it

4. **Summary (TL;DR)**
   [2-3 sentence recap of main ideas]

5. **Memory Trick**
   [Mnemonic device, analogy, or mental model to remember this]

6. **Exam Tips** (if exam-oriented focus)
   - Question types to expect
   - What examiners look for

**Guidelines:**
- Use clear headings and subheadings
- Use bullet points for lists
- Keep paragraphs short (2-4 sentences)
- Define every technical term when first used
- Include step-by-step reasoning
- Use the specified emojis (⭐⚠️🧠) for highlights
- Be friendly and encouraging
- Assume student may be learning this for the first time
"#,
            content = content,
            level = level,
            subject = subject.unwrap_or("General"),
            focus = focus,
        )
    }

    /// Prompt for practice questions in the strict JSON contract
    pub fn quiz_prompt(
        content: &str,
        subject: Option<&str>,
        distribution: &DifficultyDistribution,
    ) -> String {
        format!(
            r#"You are an expert tutor creating practice questions for students.

**Study Material:**
{content}

**Subject:** {subject}
**Difficulty Distribution:**
- Easy Questions: {easy}
- Medium Questions: {medium}
- Hard Questions: {hard}

**Generate practice questions following this EXACT JSON format:**

{{
  "questions": [
    {{
      "id": 1,
      "difficulty": "easy",
      "question": "Question text here?",
      "type": "multiple_choice",
      "options": ["A) Option 1", "B) Option 2", "C) Option 3", "D) Option 4"],
      "correct_answer": "B) Option 2",
      "explanation": "Step 1: [First step of solution]\nStep 2: [Second step]\nStep 3: [Final answer with reasoning]",
      "key_concept": "Main concept being tested",
      "hints": ["Hint 1 if student is stuck", "Hint 2 for additional help"]
    }}
  ]
}}

**Question Types to Use:**
- multiple_choice (most common)
- true_false
- short_answer
- calculation
- explanation

**Requirements:**
1. **Easy questions:** Test basic definitions and simple concepts
2. **Medium questions:** Test understanding and application
3. **Hard questions:** Test synthesis, analysis, and complex problem-solving

4. For EVERY question, provide:
   - Clear, unambiguous question text
   - For multiple choice: 4 options with one clearly correct answer
   - Detailed step-by-step explanation of the solution
   - Why other options are wrong (for multiple choice)
   - 2-3 helpful hints

5. Make questions exam-relevant and practical
6. Cover different aspects of the material
7. Include worked examples in explanations

**Return ONLY valid JSON, no additional text.**
"#,
            content = Self::clip(content, 3000),
            subject = subject.unwrap_or("General"),
            easy = distribution.easy,
            medium = distribution.medium,
            hard = distribution.hard,
        )
    }

    /// Prompt for answering a student question, optionally grounded in
    /// material context
    pub fn ask_prompt(question: &str, context: Option<&str>, level: &str) -> String {
        let context_section = match context {
            Some(context) => format!(
                "\n**Relevant Study Material:**\n{}\n",
                Self::clip(context, 2000)
            ),
            None => String::new(),
        };

        format!(
            r#"You are a patient, friendly Study Buddy helping a student understand a concept.

**Student's Question:**
{question}

**Student Level:** {level}

{context_section}

**Provide a comprehensive explanation following this structure:**

## 🎯 Quick Answer
[1-2 sentence direct answer to their question]

## 📚 Simple Explanation
[Explain using everyday language, as if talking to someone new to this topic]
[Use short sentences and familiar words]

## 🔍 Detailed Explanation
[Now go deeper, step-by-step]
[Introduce technical terms gradually, always defining them]

**Step 1:** [First concept/step]
**Step 2:** [Second concept/step]
**Step 3:** [Continue as needed]

## 💡 Example
[Provide a concrete, worked example with real numbers or scenarios]
[Show all the steps]

## 🌍 Real-Life Analogy
[Compare to something from everyday experience]
[Make it relatable and memorable]

## ⭐ Key Points to Remember
- Most important point 1
- Most important point 2
- Most important point 3

## 🧠 Memory Trick
[Provide a mnemonic, rhyme, or mental model to remember this]

## ⚠️ Common Confusions
**Mistake:** [Common misunderstanding]
**Why it's wrong:** [Explanation]
**Correct way:** [Right approach]

## 🎓 Want to Go Deeper?
[Optional: Mention advanced connections or "what's next" for curious students]

---

**Guidelines:**
- Be warm and encouraging
- Never skip logical steps
- Define all technical terms when first used
- Use multiple examples if helpful
- Check understanding with mini-checkpoints
- If explaining math/formulas, show every step
- Use the specified emojis for sections
- Keep each paragraph short (2-4 sentences)

If the student asks for a simpler explanation, focus MORE on:
- Shorter sentences
- More familiar words
- More concrete examples
- More analogies
"#,
            question = question,
            level = level,
            context_section = context_section,
        )
    }

    /// Prompt for re-explaining in much simpler terms
    pub fn simpler_prompt(original_explanation: &str, question: &str) -> String {
        format!(
            r#"A student asked: "{question}"

You provided this explanation:
{original}

But the student is STILL confused and needs it explained MUCH simpler.

**Provide an extremely simple explanation:**

1. **Use the ELI5 (Explain Like I'm 5) approach**
   - Pretend you're explaining to a young child
   - Use only simple, everyday words
   - Very short sentences

2. **Use a concrete story or scenario**
   - Make it visual and tangible
   - Use familiar objects or situations

3. **Break it into tiny steps**
   - One small idea at a time
   - Check understanding after each step

4. **More analogies**
   - Compare to things everyone knows
   - Make it fun and memorable

**Remember:** This student is struggling, so be extra patient, extra clear, and extra encouraging!
"#,
            question = question,
            original = Self::clip(original_explanation, 1500),
        )
    }

    /// Prompt for explaining one concept three different ways
    pub fn approaches_prompt(concept: &str) -> String {
        format!(
            r#"Explain this concept in 3 DIFFERENT ways:

**Concept:** {concept}

**Approach 1: Visual/Spatial**
[Explain using visual descriptions, diagrams in words, spatial relationships]

**Approach 2: Logical/Step-by-Step**
[Explain using logical reasoning, cause-and-effect, step-by-step breakdown]

**Approach 3: Analogy/Story**
[Explain using a relatable story or extended analogy]

Make each approach complete and self-contained. Students learn differently, so these different perspectives should help!
"#,
            concept = concept,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_counts_characters() {
        let text = "è".repeat(10);
        assert_eq!(PromptBuilder::clip(&text, 4).chars().count(), 4);
        assert_eq!(PromptBuilder::clip("short", 100), "short");
    }

    #[test]
    fn test_quiz_prompt_includes_distribution() {
        let dist = DifficultyDistribution {
            easy: 3,
            medium: 2,
            hard: 2,
        };
        let prompt = PromptBuilder::quiz_prompt("Newton's laws", Some("Physics"), &dist);
        assert!(prompt.contains("Easy Questions: 3"));
        assert!(prompt.contains("Medium Questions: 2"));
        assert!(prompt.contains("Hard Questions: 2"));
        assert!(prompt.contains("**Subject:** Physics"));
        // The JSON example survives brace escaping
        assert!(prompt.contains("\"questions\": ["));
    }

    #[test]
    fn test_quiz_prompt_clips_long_content() {
        let long = "x".repeat(5000);
        let dist = DifficultyDistribution::for_count(5);
        let prompt = PromptBuilder::quiz_prompt(&long, None, &dist);
        assert!(!prompt.contains(&"x".repeat(3001)));
        assert!(prompt.contains("**Subject:** General"));
    }

    #[test]
    fn test_ask_prompt_context_is_optional() {
        let with = PromptBuilder::ask_prompt("What is torque?", Some("Torque is..."), "beginner");
        assert!(with.contains("**Relevant Study Material:**"));

        let without = PromptBuilder::ask_prompt("What is torque?", None, "beginner");
        assert!(!without.contains("**Relevant Study Material:**"));
        assert!(without.contains("**Student Level:** beginner"));
    }
}

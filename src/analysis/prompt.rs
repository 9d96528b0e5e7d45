use indoc::formatdoc;

/// Builds the detector prompt around `text`. The model is asked to count eight cues, map the
/// count to a score bracket and answer with a bare integer.
pub fn build_prompt(text: &str) -> String {
    let prompt = formatdoc! {r#"
        You are an expert AI-text detector. Check the text for these cues:
        1. Low lexical diversity (few unique words)
        2. Low burstiness (sentences are very similar in length)
        3. Overuse of common words (high Zipf frequency)
        4. Excess transition words ("however," "moreover," "thus")
        5. Perfect grammar (no typos, slang, or contractions)
        6. Lack of personal detail (no anecdotes or specifics)
        7. Unnatural phrasing or flow
        8. Generic or vague examples

        Count how many of these cues you see:
        - 0–1 cues → score in 0–20
        - 2 cues   → score in 21–40
        - 3 cues   → score in 41–60
        - 4–5 cues → score in 61–80
        - 6+ cues  → score in 81–100

        Choose a number within the range that best matches how strongly you see those cues.
        Analyze *only* the text below.
        Respond with a single integer (0–100), no extra text.

        Text:
        "{text}"
    "#, text = text};
    prompt.trim_end().to_string()
}

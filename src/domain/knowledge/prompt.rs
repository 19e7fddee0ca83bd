//! Grounded generation prompt and the hallucination guard.
//!
//! The template carries two `%s` placeholders, context first and question
//! second. Any literal `%` in either argument is doubled before
//! formatting, and the formatter turns `%%` back into a single `%`.

/// The fixed sentence returned when the documents do not answer the question.
pub const NO_ANSWER: &str = "Based on the available documents, I cannot answer this question.";

/// Lowercase phrases that mark a generated answer as hedged.
pub const HEDGING_PHRASES: &[&str] = &[
    "cannot answer",
    "can't answer",
    "i don't know",
    "i do not know",
    "not mentioned",
];

const GROUNDED_TEMPLATE: &str = "You are an enterprise knowledge assistant. Answer the question strictly from the CONTEXT below.

Rules:
1. If the context contains the answer, answer directly and mark each factual claim with the bracketed number of the supporting passage, such as [1] or [2].
2. If the context does not contain the answer, reply exactly: \"Based on the available documents, I cannot answer this question.\"
3. Do not invent, speculate, or add anything that is not in the context.
4. Keep the answer concise and do not repeat the context.

CONTEXT:
%s

QUESTION:
%s
";

/// Doubles every `%` so the text can be substituted into a `%`-style template.
pub fn escape_percent(text: &str) -> String {
    text.replace('%', "%%")
}

/// Renders the grounded prompt for a numbered context block and question.
pub fn build_grounded_prompt(context_block: &str, question: &str) -> String {
    let args = [
        escape_percent(context_block.trim()),
        escape_percent(question.trim()),
    ];
    substitute(GROUNDED_TEMPLATE, &args)
}

/// Minimal `%`-style formatter: `%s` takes the next argument, `%%` emits `%`.
///
/// Any other `%` is copied through. Arguments are inserted verbatim and
/// never rescanned, so escaped text must already have its `%` doubled.
fn substitute(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(String::len).sum::<usize>());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(&unescape_percent(arg)),
                    None => out.push_str("%s"),
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}

/// Collapses the `%%` pairs produced by [`escape_percent`].
fn unescape_percent(text: &str) -> String {
    text.replace("%%", "%")
}

/// True when an answer is empty or hedges instead of answering.
pub fn is_hedged(answer: &str) -> bool {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        return true;
    }
    let lowered = trimmed.to_lowercase().replace('\u{2019}', "'");
    HEDGING_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}

//! CSV analysis prompt.
//!
//! The word-count band is an instruction to the model only; nothing checks
//! the length of the answer.

use super::prompts::truncate_chars;

pub const CSV_MAX_TOKENS: u32 = 4096;

/// Characters of CSV text embedded in the prompt. The rest is dropped.
pub const CSV_MAX_CHARS: usize = 8000;

/// The CSV sample as it will be embedded: at most `CSV_MAX_CHARS` characters.
pub fn csv_sample(csv_text: &str) -> &str {
    truncate_chars(csv_text, CSV_MAX_CHARS)
}

pub fn build_csv_prompt(sample: &str) -> String {
    format!(
        r#"You are a senior data analyst inside a desktop tool called "StratifyAI".
The user has uploaded a SMALL CSV file. Here is the raw text sample (first lines):

---CSV START---
{sample}
---CSV END---

1) Quickly sanity-check the data (columns, types, missing values, obvious issues).
2) Give a HIGH-LEVEL SUMMARY of what this dataset seems to represent.
3) Provide 6-10 specific, insight-style bullet points (trends, segments, anomalies, comparisons).
4) Then generate 5-10 SMART follow-up questions the user could ask StratifyAI about this dataset later.

Format everything in clean Markdown with headings, bullet points and short subheadings. Be detailed and helpful but stay within 800-1000 words."#
    )
}

//! EXECUTE prompts — run a path's steps instead of proposing new paths.
//!
//! Two flavours:
//! - sequential: steps 1..=N of a path, with a fixed response template
//! - selected: any subset of steps, one instruction block per step
//!
//! Responses to these prompts are shown verbatim; nothing is parsed back.

pub const EXECUTE_MAX_TOKENS: u32 = 4096;

/// Prompt for executing the first `up_to` steps of a path.
///
/// `up_to` is expected to already be clamped to `1..=steps.len()`.
/// Sections for steps 2 and 3 in the response template collapse to empty
/// lines when `up_to` is below them.
pub fn build_execute_path_prompt(
    query: &str,
    path_name: &str,
    steps: &[String],
    up_to: usize,
) -> String {
    let plural = if up_to > 1 { "s" } else { "" };

    let mut prompt = format!(
        "Original question: \"{query}\"\n\nI'm following the \"{path_name}\" approach. \
         I will execute these steps and structure my response to show my thinking process:\n\n"
    );
    for i in 0..up_to {
        let step = steps.get(i).map(String::as_str).unwrap_or("");
        prompt.push_str(&format!("Step {}: {}\n", i + 1, step));
    }

    let step_two = if up_to > 1 {
        format!(
            "**Step 2: {}**\n[Now execute step 2, building on step 1. Show your thinking process for this specific step. \
             What new insights emerge? How does this advance from step 1?]",
            label_or(steps, 1, "Second Step")
        )
    } else {
        String::new()
    };
    let step_three = if up_to > 2 {
        format!(
            "**Step 3: {}**\n[Execute the final step. Complete your analysis up to this point. \
             What conclusions can you draw from steps 1-3?]",
            label_or(steps, 2, "Third Step")
        )
    } else {
        String::new()
    };

    prompt.push_str(&format!(
        r#"
IMPORTANT: You must think through and execute ONLY the {up_to} step{plural} listed above. Do NOT go beyond these steps or provide a complete solution.

Structure your response exactly like this format:

**Following "{path_name}" Approach:**

**Step 1: {step_one_label}**
[Think through and execute this specific step. Provide your actual reasoning, analysis, and findings for JUST this step. Be detailed but focused only on this step's scope.]

{step_two}

{step_three}

**Current Progress:**
[Summarize what you've accomplished in these {up_to} step{plural}. Note what still needs to be explored in future steps.]

REMEMBER: Only execute the steps you're asked to. Don't provide a complete answer - just show your thinking for the specified steps. Use **bold text** for important terms and bullet points for clarity."#,
        step_one_label = label_or(steps, 0, "First Step"),
    ));
    prompt
}

/// Prompt for executing an arbitrary set of steps.
///
/// `ordered` must already be deduplicated and sorted ascending. A step
/// number with no matching entry in `steps` is labelled `Step N`.
pub fn build_execute_steps_prompt(
    query: &str,
    path_name: &str,
    steps: &[String],
    ordered: &[u32],
) -> String {
    let blocks = ordered
        .iter()
        .map(|&n| {
            let title = (n as usize)
                .checked_sub(1)
                .and_then(|i| steps.get(i))
                .filter(|s| !s.is_empty())
                .cloned()
                .unwrap_or_else(|| format!("Step {}", n));
            format!(
                "**Step {n}: {title}**\n[Execute this step. Show your thinking process specifically for this step. \
                 Reference earlier context if needed, but DO NOT execute unselected steps.]"
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        r#"You are a strategic thinking assistant.

User Question: "{query}"
Approach Selected: "{path_name}"

Execute ONLY the following selected steps. Do not discuss or propose any unselected steps:

{blocks}

Provide only the results and reasoning for the selected steps. Do not add a "Next Potential Steps" section or mention future steps."#
    )
}

/// `steps[idx]`, or `default` when missing or empty.
fn label_or<'a>(steps: &'a [String], idx: usize, default: &'a str) -> &'a str {
    steps
        .get(idx)
        .map(String::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

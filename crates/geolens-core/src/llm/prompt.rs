//! Prompt templates for geolocation.

use crate::types::LensResult;

/// Number of contextual text entries folded into the prompt.
pub const MAX_CONTEXT_ENTRIES: usize = 3;

/// Fallback when no contextual text was supplied.
const NO_CONTEXT: &str = "No text found.";

pub const GEOLOCATE_SYSTEM_PROMPT: &str = r#"You are an AI trained to geolocate images accurately.
**Your Task:** Determine the most likely location of the image **only using real evidence**.
**Rules to Follow:**
1. **Scene Analysis**: Identify visual clues (landmarks, language, architecture, climate).
2. **Google Lens Data (VERY IMPORTANT)**: If Google Lens already suggests a location, **you MUST check if it is correct**.
3. **Text Extraction**: If there is text in the image, use it to confirm a location.
4. **No Assumptions**: If there is no clear match, say so. Do NOT randomly pick a famous city.

**Final Output Format:**
{
  "top_location_guesses": ["Most Likely Location", "Alternative Guess 1", "Alternative Guess 2"],
  "confidence_score": "Final confidence score (0-100%)",
  "reasoning": "Why this location was chosen, based on visual + Google Lens data"
}
Do NOT output extra text or explanations."#;

/// Build the user prompt from Lens hits and contextual text.
pub fn geolocate_prompt(context: &[String], lens_results: &[LensResult]) -> String {
    let combined_text = if context.is_empty() {
        NO_CONTEXT.to_string()
    } else {
        let entries: Vec<&str> = context
            .iter()
            .take(MAX_CONTEXT_ENTRIES)
            .map(String::as_str)
            .collect();
        entries.join(" ")
    };

    let lens_summary = lens_results
        .iter()
        .map(|r| format!("- {} (Link: {})", r.title, r.link))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze this image and determine its most likely location.\n\
         **Google Lens Suggestions** (MUST BE CHECKED):\n{lens_summary}\n\n\
         **Additional Context (if any)**: {combined_text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(title: &str, link: &str) -> LensResult {
        LensResult {
            title: title.to_string(),
            link: link.to_string(),
        }
    }

    #[test]
    fn test_prompt_lists_lens_hits_in_order() {
        let hits = vec![
            hit("Eiffel Tower", "https://a.example"),
            hit("Champ de Mars", "https://b.example"),
        ];
        let prompt = geolocate_prompt(&[], &hits);
        assert!(prompt.contains(
            "- Eiffel Tower (Link: https://a.example)\n- Champ de Mars (Link: https://b.example)"
        ));
        assert!(prompt.starts_with("Analyze this image"));
    }

    #[test]
    fn test_prompt_without_context() {
        let prompt = geolocate_prompt(&[], &[]);
        assert!(prompt.ends_with("**Additional Context (if any)**: No text found."));
    }

    #[test]
    fn test_prompt_joins_first_three_context_entries() {
        let context: Vec<String> = ["one", "two", "three", "four"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let prompt = geolocate_prompt(&context, &[]);
        assert!(prompt.ends_with(": one two three"));
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let hits = vec![hit("Louvre", "https://l.example")];
        let context = vec!["museum".to_string()];
        assert_eq!(
            geolocate_prompt(&context, &hits),
            geolocate_prompt(&context, &hits)
        );
    }
}

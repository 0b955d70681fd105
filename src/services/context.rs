use crate::profile::Profile;

/// Builds the per-turn context note from the stored profile. The note is
/// injected as a system message on every request and never written to
/// the conversation itself. Parts for missing data are simply omitted;
/// with an empty profile the note degrades to its bare prefix.
pub fn build_context_note(profile: &Profile) -> String {
    let name_part = profile
        .name
        .as_ref()
        .map(|name| format!("User name: {name}."))
        .unwrap_or_default();
    let questions_part = if profile.recent_questions.is_empty() {
        String::new()
    } else {
        let quoted: Vec<String> = profile
            .recent_questions
            .iter()
            .map(|question| format!("\"{question}\""))
            .collect();
        format!("Recent questions: {}.", quoted.join(", "))
    };
    format!("Context note for assistant: {name_part} {questions_part}")
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_profile_degrades_to_prefix() {
        let profile = Profile::default();
        assert_eq!(build_context_note(&profile), "Context note for assistant:");
    }

    #[test]
    fn test_name_only() {
        let profile = Profile {
            name: Some("Ana".to_string()),
            recent_questions: Vec::new(),
        };
        assert_eq!(
            build_context_note(&profile),
            "Context note for assistant: User name: Ana."
        );
    }

    #[test]
    fn test_questions_only() {
        let mut profile = Profile::default();
        profile.remember_question("first");
        profile.remember_question("second");
        assert_eq!(
            build_context_note(&profile),
            "Context note for assistant:  Recent questions: \"second\", \"first\"."
        );
    }

    #[test]
    fn test_name_and_questions_newest_first() {
        let mut profile = Profile {
            name: Some("Ana".to_string()),
            recent_questions: Vec::new(),
        };
        profile.remember_question("best retinol strength?");
        profile.remember_question("is niacinamide ok with it?");
        assert_eq!(
            build_context_note(&profile),
            "Context note for assistant: User name: Ana. \
             Recent questions: \"is niacinamide ok with it?\", \"best retinol strength?\"."
        );
    }
}

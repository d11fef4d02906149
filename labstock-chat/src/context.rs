//! Personalization context built from the intake assessment.
//!
//! Assessment answers arrive as opaque `q1`..`q5` values; known values map
//! to readable descriptions, unknown values pass through as-is.

use serde::Deserialize;

/// Raw assessment answers from the intake form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssessmentData {
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub q5: Option<String>,
}

fn describe_goal(value: &str) -> &str {
    match value {
        "muscle" => "build muscle and strength",
        "fat-loss" => "lose fat and get lean",
        "performance" => "improve athletic performance",
        "recomp" => "body recomposition (build muscle while losing fat)",
        other => other,
    }
}

fn describe_experience(value: &str) -> &str {
    match value {
        "beginner" => "beginner (0-1 years training)",
        "intermediate" => "intermediate (1-3 years training)",
        "advanced" => "advanced (3+ years training)",
        other => other,
    }
}

fn describe_equipment(value: &str) -> &str {
    match value {
        "full-gym" => "full commercial gym access",
        "home-gym" => "home gym setup",
        "minimal" => "minimal equipment (dumbbells, bands)",
        "bodyweight" => "bodyweight training only",
        other => other,
    }
}

/// Render the personalization block appended to the system prompt. Returns
/// an empty string when no assessment data is present.
pub fn build_assessment_context(assessment: Option<&AssessmentData>) -> String {
    let Some(data) = assessment else {
        return String::new();
    };

    let mut parts: Vec<String> = Vec::new();

    if let Some(goal) = data.q1.as_deref().filter(|v| !v.is_empty()) {
        parts.push(format!("Primary goal: {}", describe_goal(goal)));
    }
    if let Some(exp) = data.q2.as_deref().filter(|v| !v.is_empty()) {
        parts.push(format!("Experience level: {}", describe_experience(exp)));
    }
    if let Some(freq) = data.q3.as_deref().filter(|v| !v.is_empty()) {
        parts.push(format!("Training frequency: {} days per week", freq));
    }
    if let Some(equip) = data.q4.as_deref().filter(|v| !v.is_empty()) {
        parts.push(format!("Equipment access: {}", describe_equipment(equip)));
    }
    if let Some(details) = data.q5.as_deref().filter(|v| !v.trim().is_empty()) {
        parts.push(format!("Additional details: {}", details));
    }

    if parts.is_empty() {
        return String::new();
    }

    let bullets: Vec<String> = parts.iter().map(|p| format!("- {}", p)).collect();
    format!(
        "\n\nPERSONALIZED CONTEXT FOR THIS USER:\n{}\n\n\
         Tailor your responses to their specific situation, goals, and experience level.\n",
        bullets.join("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_assessment_yields_empty_context() {
        assert_eq!(build_assessment_context(None), "");
        assert_eq!(
            build_assessment_context(Some(&AssessmentData::default())),
            ""
        );
    }

    #[test]
    fn known_values_map_to_descriptions() {
        let data = AssessmentData {
            q1: Some("muscle".into()),
            q2: Some("beginner".into()),
            q3: Some("4".into()),
            q4: Some("home-gym".into()),
            q5: Some("recovering from a shoulder injury".into()),
        };
        let context = build_assessment_context(Some(&data));
        assert!(context.contains("Primary goal: build muscle and strength"));
        assert!(context.contains("Experience level: beginner (0-1 years training)"));
        assert!(context.contains("Training frequency: 4 days per week"));
        assert!(context.contains("Equipment access: home gym setup"));
        assert!(context.contains("Additional details: recovering from a shoulder injury"));
        assert!(context.contains("PERSONALIZED CONTEXT FOR THIS USER:"));
    }

    #[test]
    fn unknown_values_pass_through() {
        let data = AssessmentData {
            q1: Some("powerlifting meet prep".into()),
            ..Default::default()
        };
        let context = build_assessment_context(Some(&data));
        assert!(context.contains("Primary goal: powerlifting meet prep"));
    }

    #[test]
    fn blank_free_text_is_dropped() {
        let data = AssessmentData {
            q5: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(build_assessment_context(Some(&data)), "");
    }
}

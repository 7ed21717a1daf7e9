//! Plain-text rendering for the terminal

use std::fmt::Write;

use crate::dispatch::RenderPlan;

/// Render a plan as indented text
pub fn render_text(plan: &RenderPlan) -> String {
    let mut out = String::new();

    if plan.sections.is_empty() {
        let _ = writeln!(out, "No analytics returned for {}", plan.selection);
        return out;
    }

    for block in &plan.sections {
        let _ = writeln!(out, "{} {}", block.icon, block.heading);
        for group in &block.groups {
            let _ = writeln!(out, "  {}", group.title);
            for item in &group.items {
                match &item.label {
                    Some(label) => {
                        let _ = writeln!(out, "    {}: {}", label, item.value);
                    }
                    None => {
                        let _ = writeln!(out, "    - {}", item.value);
                    }
                }
            }
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Selection;
    use crate::dispatch::{dispatch, DispatchOptions};
    use crate::response::AnalyticsResponse;
    use serde_json::json;

    #[test]
    fn test_render_text() {
        let selection = Selection::from_labels(["Image"]).unwrap();
        let response = AnalyticsResponse::from_value(json!({
            "metrics": {"image": {"engagement_rate": 12.345}},
            "insights": {"image": ["Faces help", "Warm colors win"]}
        }))
        .unwrap();
        let plan = dispatch(&selection, &response, &DispatchOptions::default());

        assert_eq!(
            render_text(&plan),
            "📈 Performance Metrics\n  Image\n    Engagement Rate: 12.35\n\n\
             💡 Key Insights\n  Image Insights\n    - Faces help\n    - Warm colors win\n\n"
        );
    }

    #[test]
    fn test_render_text_empty() {
        let selection = Selection::from_labels(["Text", "Reels"]).unwrap();
        let plan = dispatch(&selection, &AnalyticsResponse::default(), &DispatchOptions::default());
        assert_eq!(render_text(&plan), "No analytics returned for Text, Reels\n");
    }
}

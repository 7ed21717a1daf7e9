//! HTML page generation
//!
//! Renders the whole dashboard as one self-contained document with `maud`.
//! Text spliced into the markup is escaped by `maud`; only the inline CSS and
//! script go in as `PreEscaped`.

use maud::{html, Markup, PreEscaped, DOCTYPE};

use crate::catalog::{Category, Selector};
use crate::dispatch::{DisplayItem, EntryGroup, RenderPlan, SectionBlock, Tone};
use crate::response::SectionKind;

/// A message shown above the results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    /// Blocks the cycle (validation or fetch failure)
    Error(String),
}

/// Everything the page needs for one render
pub struct PageView<'a> {
    pub title: &'a str,
    pub footer: &'a str,
    pub selector: &'a Selector,
    pub banner: Option<Banner>,
    pub plan: Option<&'a RenderPlan>,
}

/// Render the full page
pub fn render_page(view: &PageView<'_>) -> String {
    page_markup(view).into_string()
}

fn page_markup(view: &PageView<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (view.title) }
                style { (PreEscaped(inline_css())) }
            }
            body {
                main.main {
                    h1 { "📊 " (view.title) }
                    (render_selector(view.selector))
                    @if let Some(banner) = &view.banner {
                        (render_banner(banner))
                    }
                    @if let Some(plan) = view.plan {
                        @for block in &plan.sections {
                            (render_section(block))
                        }
                    }
                }
                footer.footer { (view.footer) }
                script { (PreEscaped(inline_javascript())) }
            }
        }
    }
}

fn render_selector(selector: &Selector) -> Markup {
    html! {
        form.selector method="post" action="/" {
            h3 { "🎯 Select Content Types" }
            div.options {
                @for category in Category::all() {
                    label.option {
                        input type="checkbox" name=(category.key()) value="on" checked[selector.is_checked(*category)];
                        " " (category.icon()) " " (category.label())
                    }
                }
            }
            button.action type="submit" { "Generate Insights 🚀" }
            p.busy hidden { "Generating insights…" }
        }
    }
}

fn render_banner(banner: &Banner) -> Markup {
    match banner {
        Banner::Error(message) => html! {
            div.alert.alert-error role="alert" { (message) }
        },
    }
}

fn render_section(block: &SectionBlock) -> Markup {
    html! {
        section class={ "section section-" (block.kind.key()) } {
            h2 { (block.icon) " " (block.heading) }
            @match block.kind {
                SectionKind::Metrics => {
                    @for row in block.rows() {
                        div.metric-row {
                            @for group in row {
                                (render_metric_card(group))
                            }
                        }
                    }
                }
                kind => {
                    @for group in &block.groups {
                        (render_expander(kind, group))
                    }
                }
            }
        }
    }
}

fn render_metric_card(group: &EntryGroup) -> Markup {
    html! {
        div.metric-card {
            div.metric-container { h3 { (group.title) } }
            @for item in &group.items {
                div.metric {
                    div.metric-label { (item.label.as_deref().unwrap_or_default()) }
                    div.metric-value { (item.value) }
                }
            }
        }
    }
}

fn render_expander(kind: SectionKind, group: &EntryGroup) -> Markup {
    let icon = match kind {
        SectionKind::Insights => "📊 ",
        SectionKind::Recommendations => "💡 ",
        _ => "",
    };

    html! {
        details.expander open {
            summary { (icon) (group.title) }
            @for item in &group.items {
                (render_callout(item))
            }
        }
    }
}

fn render_callout(item: &DisplayItem) -> Markup {
    let tone = match item.tone {
        Tone::Metric => "metric",
        Tone::Info => "info",
        Tone::Warning => "warning",
        Tone::Success => "success",
    };

    html! {
        div class={ "callout callout-" (tone) } {
            @if let Some(label) = &item.label {
                strong { (label) } ": "
            }
            (item.value)
        }
    }
}

fn inline_css() -> &'static str {
    r#"
body { font-family: -apple-system, "Segoe UI", Roboto, sans-serif; margin: 0; background: #fdfdfd; color: #1f2937; }
.main { max-width: 960px; margin: 0 auto; padding: 2rem; }
h1 { color: #1e3d59; font-size: 2.5rem; font-weight: 700; margin-bottom: 2rem; text-align: center; }
h2 { color: #2d4059; font-size: 1.8rem; font-weight: 600; margin-top: 2rem; }
h3 { color: #2d4059; font-size: 1.4rem; font-weight: 500; }
.options { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; margin: 1rem 0; }
.option { font-size: 1.1rem; padding: 0.5rem; border-radius: 8px; cursor: pointer; }
.option:hover { background: #f8f9fa; }
.action { width: 100%; background: #1e3d59; color: #fff; border: none; border-radius: 8px; padding: 0.5rem 1rem; font-size: 1rem; cursor: pointer; }
.action:hover { background: #2d4059; }
.action:disabled { opacity: 0.6; cursor: wait; }
.alert { margin: 1rem 0; padding: 1rem; border-radius: 8px; }
.alert-error { background: #fdecea; color: #8a1c1c; }
.metric-row { display: grid; grid-template-columns: repeat(3, 1fr); gap: 1rem; }
.metric-container { background: #f8f9fa; border-radius: 8px; padding: 1rem; margin: 0.5rem 0; }
.metric { margin: 0.5rem 0; }
.metric-label { color: #6b7280; font-size: 0.9rem; }
.metric-value { font-size: 1.8rem; font-weight: 600; }
.expander { background: #fff; border: 1px solid #e5e7eb; border-radius: 8px; padding: 0.5rem 1rem; margin: 0.75rem 0; }
.expander summary { cursor: pointer; font-weight: 600; padding: 0.5rem 0; }
.callout { border-radius: 6px; padding: 0.75rem 1rem; margin: 0.5rem 0; }
.callout-info { background: #e8f1fb; }
.callout-warning { background: #fff6e0; }
.callout-success { background: #e7f6ec; }
.footer { text-align: center; color: #666; padding: 20px; }
"#
}

fn inline_javascript() -> &'static str {
    r#"
document.querySelector('form.selector').addEventListener('submit', function () {
    this.querySelector('button.action').disabled = true;
    this.querySelector('.busy').hidden = false;
});
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Selection;
    use crate::dispatch::{dispatch, DispatchOptions};
    use crate::page::EMPTY_SELECTION_MESSAGE;
    use crate::response::AnalyticsResponse;
    use serde_json::json;

    fn plan_for(labels: &[&str], value: serde_json::Value) -> RenderPlan {
        let selection = Selection::from_labels(labels).unwrap();
        let response = AnalyticsResponse::from_value(value).unwrap();
        dispatch(&selection, &response, &DispatchOptions::default())
    }

    fn page(selector: &Selector, banner: Option<Banner>, plan: Option<&RenderPlan>) -> String {
        render_page(&PageView {
            title: "Social Media Performance Dashboard",
            footer: "footer text",
            selector,
            banner,
            plan,
        })
    }

    #[test]
    fn test_blank_page_has_all_options() {
        let html = page(&Selector::new(), None, None);

        for category in Category::all() {
            assert!(html.contains(&format!(r#"name="{}""#, category.key())));
        }
        assert!(html.contains("Generate Insights 🚀"));
        assert!(!html.contains(" checked"));
        assert!(!html.contains("<section"));
    }

    #[test]
    fn test_checked_state_is_kept() {
        let mut selector = Selector::new();
        selector.set(Category::Reels, true);
        let html = page(&selector, None, None);

        assert!(html.contains(r#"name="reels" value="on" checked"#));
        assert!(html.contains(r#"name="text" value="on">"#));
    }

    #[test]
    fn test_error_banner() {
        let html = page(
            &Selector::new(),
            Some(Banner::Error(EMPTY_SELECTION_MESSAGE.to_string())),
            None,
        );
        assert!(html.contains("alert-error"));
        assert!(html.contains("Please select at least one content type to analyze!"));
    }

    #[test]
    fn test_metrics_and_callouts() {
        let plan = plan_for(
            &["Image", "Video"],
            json!({
                "metrics": {"image": {"engagement_rate": 12.345}},
                "recommendations": {"video": ["Post more reels", "Use trending audio"]}
            }),
        );
        let selector = Selector::from_selection(&plan.selection);
        let html = page(&selector, None, Some(&plan));

        assert!(html.contains("📈 Performance Metrics"));
        assert!(html.contains(r#"<div class="metric-label">Engagement Rate</div><div class="metric-value">12.35</div>"#));
        assert!(html.contains("💡 Video Recommendations"));
        assert!(html.contains(r#"<div class="callout callout-success">Post more reels</div>"#));
        assert!(html.contains(r#"<div class="callout callout-success">Use trending audio</div>"#));
        assert!(!html.contains("Comparative Analysis"));
    }

    #[test]
    fn test_service_text_is_escaped() {
        let plan = plan_for(
            &["Text"],
            json!({"insights": {"text": {"hook": "<script>alert('x')</script> & more"}}}),
        );
        let html = page(&Selector::new(), None, Some(&plan));

        assert!(html.contains("&lt;script&gt;alert('x')&lt;/script&gt; &amp; more"));
        assert!(!html.contains("<script>alert"));
    }

    #[test]
    fn test_page_chrome_is_escaped() {
        let html = render_page(&PageView {
            title: "Ads & <Organic>",
            footer: "<b>team</b>",
            selector: &Selector::new(),
            banner: Some(Banner::Error("<img src=x>".to_string())),
            plan: None,
        });

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ads &amp; &lt;Organic&gt;</title>"));
        assert!(html.contains("&lt;b&gt;team&lt;/b&gt;"));
        assert!(html.contains(r#"role="alert">&lt;img src=x&gt;</div>"#));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_metric_rows() {
        let plan = plan_for(
            &["Text", "Image", "Video", "Reels"],
            json!({"metrics": {
                "text": {"a": 1}, "image": {"a": 1}, "video": {"a": 1}, "reels": {"a": 1}
            }}),
        );
        let html = page(&Selector::new(), None, Some(&plan));
        assert_eq!(html.matches(r#"<div class="metric-row">"#).count(), 2);
        assert_eq!(html.matches(r#"<div class="metric-card">"#).count(), 4);
    }
}

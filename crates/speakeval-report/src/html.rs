//! HTML report generator.
//!
//! Produces self-contained HTML with all CSS/JS inlined. Annotations use
//! inline styles so the fragment from [`annotation_html`] can be dropped
//! into any page.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::Path;

use speakeval_core::annotate::{Annotation, SegmentKind};
use speakeval_core::report::EvaluationReport;
use speakeval_core::statistics::LevelStats;

const WRONG_STYLE: &str =
    "text-decoration: underline; text-decoration-color: red; font-weight: bold;";
const MISSING_STYLE: &str =
    "text-decoration: underline; text-decoration-color: gray; color: gray; font-weight: bold;";

/// Escape a string for safe HTML insertion.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render an annotation as an inline HTML fragment.
///
/// Substituted and extraneous words are underlined red, omitted words are a
/// gray bracketed placeholder, segments are joined by single spaces.
pub fn annotation_html(annotation: &Annotation) -> String {
    annotation
        .segments
        .iter()
        .map(|s| {
            let text = html_escape(&s.text);
            match s.kind {
                SegmentKind::Unchanged => text,
                SegmentKind::Substituted | SegmentKind::Extraneous => format!(
                    "<span class=\"{}\" style=\"{WRONG_STYLE}\">{text}</span>",
                    s.kind
                ),
                SegmentKind::Omitted => format!(
                    "<span class=\"omitted\" style=\"{MISSING_STYLE}\">[{text}]</span>"
                ),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate an HTML page from a batch evaluation report.
pub fn generate_html(report: &EvaluationReport) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>speakeval report — {}</title>\n",
        html_escape(&report.source)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");

    // Header
    html.push_str("<header>\n");
    html.push_str("<h1>speakeval report</h1>\n");
    html.push_str(&format!(
        "<p class=\"meta\">Exercises: <strong>{}</strong> | {} attempts | {} failed | {}</p>\n",
        html_escape(&report.source),
        report.summary.attempts,
        report.failures.len(),
        report.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</header>\n");

    // Summary dashboard
    html.push_str("<section class=\"dashboard\">\n");
    html.push_str("<h2>Summary</h2>\n");
    html.push_str(&format!(
        "<p>Mean score: <strong>{:.1}%</strong></p>\n",
        report.summary.mean_score * 100.0
    ));

    html.push_str("<table class=\"summary\">\n");
    html.push_str("<thead><tr><th>Level</th><th>Attempts</th><th>Mean</th><th>Best</th></tr></thead>\n");
    html.push_str("<tbody>\n");
    for (level, stats) in &report.summary.per_level {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.1}%</td><td>{:.1}%</td></tr>\n",
            level,
            stats.attempts,
            stats.mean_score * 100.0,
            stats.best_score * 100.0,
        ));
    }
    html.push_str("</tbody></table>\n");

    if !report.summary.per_level.is_empty() {
        html.push_str(&generate_bar_chart(&report.summary.per_level));
    }

    html.push_str("</section>\n");

    // Per-attempt results
    html.push_str("<section class=\"results\">\n");
    html.push_str("<h2>Attempts</h2>\n");
    html.push_str("<table class=\"results-table\" id=\"results\">\n");
    html.push_str("<thead><tr><th onclick=\"sortTable(0)\">#</th><th onclick=\"sortTable(1)\">Exercise</th><th onclick=\"sortTable(2)\">Score</th><th>Answer</th><th>Best match</th></tr></thead>\n");
    html.push_str("<tbody>\n");

    for r in &report.results {
        let eval = &r.evaluation;
        let row_class = if eval.show_correction { "pass" } else { "fail" };

        let answer = match &eval.annotation {
            Some(a) if eval.show_correction => annotation_html(a),
            _ => html_escape(&eval.candidate),
        };
        let best = eval
            .comparison
            .best_match
            .as_deref()
            .map(html_escape)
            .unwrap_or_else(|| "<em>no reference available</em>".to_string());

        html.push_str(&format!(
            "<tr class=\"{}\"><td>{}</td><td title=\"{}\">{}</td><td>{:.1}%</td><td>{}</td><td>{}</td></tr>\n",
            row_class,
            r.index,
            html_escape(&r.prompt),
            html_escape(&r.exercise_id),
            eval.comparison.score * 100.0,
            answer,
            best
        ));
    }

    html.push_str("</tbody></table>\n");

    if !report.failures.is_empty() {
        html.push_str("<h2>Failures</h2>\n<ul>\n");
        for f in &report.failures {
            html.push_str(&format!(
                "<li>#{} <code>{}</code>: {}</li>\n",
                f.index,
                html_escape(&f.exercise_id),
                html_escape(&f.error)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</section>\n");

    // Raw JSON
    html.push_str("<section class=\"raw-data\">\n");
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n");
    html.push_str("<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(report)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n");
    html.push_str("</details>\n</section>\n");

    // JavaScript for sorting
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");

    html.push_str("</body>\n</html>");
    html
}

/// Write an HTML report to a file.
pub fn write_html_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let html = generate_html(report);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

fn generate_bar_chart(per_level: &BTreeMap<u32, LevelStats>) -> String {
    let bar_height = 30;
    let max_width = 400;
    let padding = 10;
    let label_width = 100;

    let total_height = per_level.len() * (bar_height + padding) + padding;

    let mut svg = format!(
        "<svg width=\"{}\" height=\"{}\" xmlns=\"http://www.w3.org/2000/svg\">\n",
        label_width + max_width + 60,
        total_height
    );

    for (i, (level, stats)) in per_level.iter().enumerate() {
        let y = i * (bar_height + padding) + padding;
        let score = stats.mean_score;
        let width = (score * max_width as f64) as usize;

        let color = if score >= 0.9 {
            "#22c55e"
        } else if score >= 0.8 {
            "#eab308"
        } else {
            "#ef4444"
        };

        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"currentColor\" text-anchor=\"end\" dominant-baseline=\"middle\">Level {}</text>\n",
            label_width - 10,
            y + bar_height / 2,
            level
        ));
        svg.push_str(&format!(
            "  <rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\" rx=\"4\"/>\n",
            label_width, y, width, bar_height, color
        ));
        svg.push_str(&format!(
            "  <text x=\"{}\" y=\"{}\" font-size=\"12\" fill=\"currentColor\" dominant-baseline=\"middle\">{:.1}%</text>\n",
            label_width + width + 8,
            y + bar_height / 2,
            score * 100.0
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --pass: #dcfce7; --fail: #fde2e2; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --pass: #064e3b; --fail: #7f1d1d; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.pass { background: var(--pass); }
.fail { background: var(--fail); }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; }
code { font-family: 'JetBrains Mono', 'Fira Code', monospace; font-size: 0.85rem; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
svg { margin: 1rem 0; }
"#;

const JS: &str = r#"
function sortTable(col) {
  const table = document.getElementById('results');
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    return asc ? va.localeCompare(vb, undefined, {numeric: true}) : vb.localeCompare(va, undefined, {numeric: true});
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use speakeval_core::engine::{evaluate, AttemptResult};
    use speakeval_core::feedback::FeedbackPolicy;
    use speakeval_core::highlight_differences;
    use speakeval_core::report::FailedAttempt;
    use speakeval_core::statistics::compute_summary;

    fn make_test_report() -> EvaluationReport {
        let policy = FeedbackPolicy::default();
        let results = vec![
            AttemptResult {
                index: 0,
                exercise_id: "ex-1".into(),
                level: 1,
                prompt: "나는 학교에 가요".into(),
                evaluation: evaluate("I goes to school", &["I go to school."], &policy),
            },
            AttemptResult {
                index: 1,
                exercise_id: "ex-2".into(),
                level: 2,
                prompt: "없음".into(),
                evaluation: evaluate::<&str>("<b>hi</b>", &[], &policy),
            },
        ];
        EvaluationReport {
            id: uuid::Uuid::nil(),
            created_at: chrono::Utc::now(),
            source: "sentences.json".into(),
            summary: compute_summary(&results),
            results,
            failures: vec![FailedAttempt {
                index: 2,
                exercise_id: "ghost".into(),
                error: "unknown exercise: ghost".into(),
            }],
            duration_ms: 12,
        }
    }

    #[test]
    fn annotation_fragment_styles_each_kind() {
        let a = highlight_differences("I goes the", "I go to.");
        let html = annotation_html(&a);
        assert!(html.starts_with("I "));
        assert!(html.contains("class=\"substituted\""));
        assert!(html.contains(">goes</span>"));

        let a = highlight_differences("I go", "I go home!");
        let html = annotation_html(&a);
        assert_eq!(
            html,
            format!("I go <span class=\"omitted\" style=\"{MISSING_STYLE}\">[❌❌❌❌]</span>")
        );
    }

    #[test]
    fn annotation_fragment_escapes_text() {
        let a = highlight_differences("<script> go", "go");
        let html = annotation_html(&a);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn html_report_contains_required_elements() {
        let report = make_test_report();
        let html = generate_html(&report);

        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("sentences.json"));
        assert!(html.contains("ex-1"));
        assert!(html.contains(">goes</span>"));
        assert!(html.contains("no reference available"));
        assert!(html.contains("Level 1"));
        assert!(html.contains("ghost"));
        assert!(!html.contains("<b>hi</b>"));
    }

    #[test]
    fn html_report_write_to_file() {
        let report = make_test_report();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/report.html");

        write_html_report(&report, &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }
}

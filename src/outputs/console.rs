//! Plain-text report for the terminal.

use super::{BUZZ_WORDS, RenderContext, TAGS_PER_ARTICLE, period, relevance_percent};
use crate::models::TrendReport;
use crate::translate::SUMMARY_EXCERPT_CHARS;
use crate::utils::{truncate_chars, wrap_text};

const WRAP_WIDTH: usize = 70;

fn rule(c: char, n: usize) -> String {
    std::iter::repeat_n(c, n).collect()
}

/// One bar block per five mentions, at least one.
pub fn buzz_bar(count: u32) -> String {
    rule('█', count.div_ceil(5).max(1) as usize)
}

pub fn render(report: &TrendReport, ctx: &RenderContext<'_>) -> String {
    let banner = rule('=', 60);
    let section = rule('-', 40);
    let mut out = String::new();

    out.push_str(&format!("{banner}\n"));
    out.push_str(&format!(
        " Weekly Tech Trend Report ({})\n",
        period(report.week_start, report.week_end)
    ));
    out.push_str(&format!("{banner}\n\n"));

    if !report.weekly_summary.is_empty() {
        out.push_str("📋 WEEKLY SUMMARY\n");
        out.push_str(&format!("{section}\n"));
        out.push_str(&format!("{}\n\n", wrap_text(&report.weekly_summary, WRAP_WIDTH)));
    }

    if !report.top_trends.is_empty() {
        out.push_str("🔥 TOP TRENDING TECHNOLOGIES\n");
        out.push_str(&format!("{section}\n"));
        for (i, trend) in report.top_trends.iter().enumerate() {
            out.push_str(&format!(
                "{}. **{}** ({} mentions)\n",
                i + 1,
                trend.name,
                trend.mention_count
            ));
            if !trend.key_insight.is_empty() {
                out.push_str(&format!("   💡 Key insight: {}\n", trend.key_insight));
            }
            if !trend.learning_recommendation.is_empty() {
                out.push_str(&format!(
                    "   📚 Learning recommendation: {}\n",
                    trend.learning_recommendation
                ));
            }
            out.push('\n');
        }
    }

    if !report.must_read_articles.is_empty() {
        out.push_str("📚 MUST-READ ARTICLES\n");
        out.push_str(&format!("{section}\n"));
        for (i, article) in report.must_read_articles.iter().enumerate() {
            out.push_str(&format!(
                "{}. \"{}\" - {}% relevance\n",
                i + 1,
                article.title,
                relevance_percent(article)
            ));
            out.push_str(&format!("   📰 Source: {}\n", article.source));
            out.push_str(&format!("   🔗 URL: {}\n", article.url));
            if !article.summary.is_empty() {
                out.push_str(&format!(
                    "   📝 Summary: {}\n",
                    truncate_chars(&article.summary, SUMMARY_EXCERPT_CHARS)
                ));
            }
            if !article.tech_tags.is_empty() {
                let tags: Vec<&str> = article
                    .tech_tags
                    .iter()
                    .take(TAGS_PER_ARTICLE)
                    .map(String::as_str)
                    .collect();
                out.push_str(&format!("   🏷️  Tags: {}\n", tags.join(", ")));
            }
            out.push('\n');
        }
    }

    if !report.learning_recommendations.is_empty() {
        out.push_str("🎯 THIS WEEK'S LEARNING FOCUS\n");
        out.push_str(&format!("{section}\n"));
        for rec in &report.learning_recommendations {
            out.push_str(&format!("• {rec}\n"));
        }
        out.push('\n');
    }

    if !report.tech_keyword_frequency.is_empty() {
        out.push_str("📊 TECHNOLOGY BUZZ WORDS\n");
        out.push_str(&format!("{section}\n"));
        for (keyword, count) in report.top_keywords(BUZZ_WORDS) {
            out.push_str(&format!("{keyword:<20} {} ({count})\n", buzz_bar(count)));
        }
        out.push('\n');
    }

    out.push_str(&format!("{banner}\n"));
    out.push_str(&format!("Generated on {} by SkillRadar\n", ctx.generated_on()));
    out.push_str(&format!("{banner}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outputs::sample::{generated_at, report};

    #[test]
    fn test_buzz_bar() {
        assert_eq!(buzz_bar(1), "█");
        assert_eq!(buzz_bar(5), "█");
        assert_eq!(buzz_bar(6), "██");
        assert_eq!(buzz_bar(12), "███");
    }

    #[test]
    fn test_console_sections() {
        let out = render(&report(), &RenderContext::new(generated_at()));

        assert!(out.contains(" Weekly Tech Trend Report (Jun 8 - Jun 14, 2025)\n"));
        assert!(out.contains("1. **Kubernetes** (12 mentions)\n"));
        assert!(out.contains("   💡 Key insight: Kubernetes is everywhere.\n"));
        assert!(out.contains("1. \"Kubernetes <operators> & you\" - 85% relevance\n"));
        assert!(out.contains("   🏷️  Tags: Kubernetes, Go, DevOps, Docker, Helm\n"));
        assert!(out.contains("• Learn Kubernetes\n"));
        assert!(out.contains(&format!("{:<20} ███ (12)\n", "kubernetes")));
        assert!(out.contains("Generated on 2025-06-14 08:30 by SkillRadar\n"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let mut r = report();
        r.top_trends.clear();
        r.must_read_articles.clear();
        r.tech_keyword_frequency.clear();

        let out = render(&r, &RenderContext::new(generated_at()));
        assert!(!out.contains("TOP TRENDING"));
        assert!(!out.contains("MUST-READ"));
        assert!(!out.contains("BUZZ WORDS"));
        assert!(out.contains("WEEKLY SUMMARY"));
    }

    #[test]
    fn test_long_summary_is_wrapped() {
        let mut r = report();
        r.weekly_summary = "word ".repeat(40).trim_end().to_string();
        let out = render(&r, &RenderContext::new(generated_at()));
        let summary_lines: Vec<&str> = out.lines().filter(|l| l.starts_with("word")).collect();
        assert!(summary_lines.len() > 1);
        assert!(summary_lines.iter().all(|l| l.chars().count() <= 70));
    }
}

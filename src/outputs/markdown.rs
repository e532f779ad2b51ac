//! Markdown report.

use super::{BUZZ_WORDS, RenderContext, TAGS_PER_ARTICLE, period, relevance_percent};
use crate::models::TrendReport;

pub fn render(report: &TrendReport, ctx: &RenderContext<'_>) -> String {
    let mut md = String::new();
    md.push_str("# Weekly Tech Trend Report\n");
    md.push_str(&format!(
        "**Period:** {}\n\n",
        period(report.week_start, report.week_end)
    ));

    if !report.weekly_summary.is_empty() {
        md.push_str("## 📋 Weekly Summary\n\n");
        md.push_str(&format!("{}\n\n", report.weekly_summary));
    }

    if !report.top_trends.is_empty() {
        md.push_str("## 🔥 Top Trending Technologies\n\n");
        for (i, trend) in report.top_trends.iter().enumerate() {
            md.push_str(&format!(
                "### {}. {} ({} mentions)\n",
                i + 1,
                trend.name,
                trend.mention_count
            ));
            if !trend.key_insight.is_empty() {
                md.push_str(&format!("**Key insight:** {}\n\n", trend.key_insight));
            }
            if !trend.learning_recommendation.is_empty() {
                md.push_str(&format!(
                    "**Learning recommendation:** {}\n\n",
                    trend.learning_recommendation
                ));
            }
        }
    }

    if !report.must_read_articles.is_empty() {
        md.push_str("## 📚 Must-Read Articles\n\n");
        for (i, article) in report.must_read_articles.iter().enumerate() {
            let translation = ctx.translations.and_then(|t| t.get(&article.id));

            md.push_str(&format!("### {}. [{}]({})\n", i + 1, article.title, article.url));
            if let Some(title) = translation.and_then(|t| t.title.as_deref()) {
                md.push_str(&format!("🌐 *{title}*\n\n"));
            }
            md.push_str(&format!(
                "**Source:** {} | **Relevance:** {}%\n",
                article.source,
                relevance_percent(article)
            ));
            if !article.summary.is_empty() {
                md.push_str(&format!("\n{}\n", article.summary));
            }
            if let Some(summary) = translation.and_then(|t| t.summary.as_deref()) {
                md.push_str(&format!("\n🌐 *{summary}*\n"));
            }
            if !article.tech_tags.is_empty() {
                let tags: Vec<&str> = article
                    .tech_tags
                    .iter()
                    .take(TAGS_PER_ARTICLE)
                    .map(String::as_str)
                    .collect();
                md.push_str(&format!("\n**Tags:** {}\n", tags.join(", ")));
            }
            md.push('\n');
        }
    }

    if !report.learning_recommendations.is_empty() {
        md.push_str("## 🎯 This Week's Learning Focus\n\n");
        for rec in &report.learning_recommendations {
            md.push_str(&format!("- {rec}\n"));
        }
        md.push('\n');
    }

    if !report.tech_keyword_frequency.is_empty() {
        md.push_str("## 📊 Technology Buzz Words\n\n");
        md.push_str("| Technology | Mentions |\n");
        md.push_str("|------------|----------|\n");
        for (keyword, count) in report.top_keywords(BUZZ_WORDS) {
            md.push_str(&format!("| {keyword} | {count} |\n"));
        }
        md.push('\n');
    }

    md.push_str("---\n");
    md.push_str(&format!("*Generated on {} by SkillRadar*\n", ctx.generated_on()));
    md
}

//! Standalone HTML report rendered with `maud`.

use super::{RenderContext, TAGS_PER_ARTICLE, period, relevance_percent};
use crate::models::TrendReport;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = r#"
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; margin: 40px; line-height: 1.6; color: #333; }
        .header { border-bottom: 3px solid #007acc; padding-bottom: 20px; margin-bottom: 30px; }
        h1 { color: #007acc; margin: 0; }
        .period { color: #666; font-size: 1.1em; margin-top: 10px; }
        .section { margin-bottom: 40px; }
        h2 { color: #333; border-left: 4px solid #007acc; padding-left: 15px; }
        .trend { background: #f8f9fa; padding: 20px; margin-bottom: 20px; border-radius: 8px; border-left: 4px solid #28a745; }
        .article { background: #f8f9fa; padding: 20px; margin-bottom: 20px; border-radius: 8px; border-left: 4px solid #17a2b8; }
        .article-title { color: #007acc; text-decoration: none; font-weight: bold; }
        .article-title:hover { text-decoration: underline; }
        .meta { color: #666; font-size: 0.9em; margin-top: 10px; }
        .translation { color: #718096; font-style: italic; margin: 4px 0; }
        .tags { margin-top: 10px; }
        .tag { background: #e9ecef; padding: 3px 8px; border-radius: 3px; font-size: 0.8em; margin-right: 5px; }
        .recommendation { background: #fff3cd; padding: 15px; margin-bottom: 10px; border-radius: 5px; border-left: 4px solid #ffc107; }
        .footer { margin-top: 50px; padding-top: 20px; border-top: 1px solid #dee2e6; color: #666; text-align: center; }
"#;

pub fn render(report: &TrendReport, ctx: &RenderContext<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Weekly Tech Trend Report" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                div.header {
                    h1 { "📊 Weekly Tech Trend Report" }
                    div.period { (period(report.week_start, report.week_end)) }
                }

                @if !report.weekly_summary.is_empty() {
                    div.section {
                        h2 { "📋 Weekly Summary" }
                        p { (report.weekly_summary) }
                    }
                }

                @if !report.top_trends.is_empty() {
                    div.section {
                        h2 { "🔥 Top Trending Technologies" }
                        @for (i, trend) in report.top_trends.iter().enumerate() {
                            div.trend {
                                h3 {
                                    (i + 1) ". " (trend.name) " "
                                    span.meta { "(" (trend.mention_count) " mentions)" }
                                }
                                @if !trend.key_insight.is_empty() {
                                    p { strong { "💡 Key insight:" } " " (trend.key_insight) }
                                }
                                @if !trend.learning_recommendation.is_empty() {
                                    p {
                                        strong { "📚 Learning recommendation:" }
                                        " " (trend.learning_recommendation)
                                    }
                                }
                            }
                        }
                    }
                }

                @if !report.must_read_articles.is_empty() {
                    div.section {
                        h2 { "📚 Must-Read Articles" }
                        @for (i, article) in report.must_read_articles.iter().enumerate() {
                            @let translation = ctx.translations.and_then(|t| t.get(&article.id));
                            div.article {
                                h3 {
                                    a class="article-title" href=(article.url) target="_blank" {
                                        (i + 1) ". " (article.title)
                                    }
                                }
                                @if let Some(title) = translation.and_then(|t| t.title.as_deref()) {
                                    div.translation { "🌐 " (title) }
                                }
                                div.meta {
                                    "Source: " (article.source)
                                    " | Relevance: " (relevance_percent(article)) "%"
                                }
                                @if !article.summary.is_empty() {
                                    p { (article.summary) }
                                }
                                @if let Some(summary) = translation.and_then(|t| t.summary.as_deref()) {
                                    div.translation { "🌐 " (summary) }
                                }
                                @if !article.tech_tags.is_empty() {
                                    div.tags {
                                        @for tag in article.tech_tags.iter().take(TAGS_PER_ARTICLE) {
                                            span.tag { (tag) }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                @if !report.learning_recommendations.is_empty() {
                    div.section {
                        h2 { "🎯 This Week's Learning Focus" }
                        @for rec in &report.learning_recommendations {
                            div.recommendation { (rec) }
                        }
                    }
                }

                div.footer { "Generated on " (ctx.generated_on()) " by SkillRadar" }
            }
        }
    }
}

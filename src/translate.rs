//! Translation of must-read titles and summaries.
//!
//! Translations are produced by the same text generator as the rest of the
//! report. A missing translation is simply left out of the rendered report.

use crate::api::AskAsync;
use crate::generate::TextGenerator;
use crate::models::Article;
use crate::utils::truncate_chars;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

/// Summary excerpt length sent for translation.
pub const SUMMARY_EXCERPT_CHARS: usize = 150;

/// Translated title and summary of one article.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleTranslation {
    pub title: Option<String>,
    pub summary: Option<String>,
}

/// Translations keyed by article id.
pub type Translations = HashMap<String, ArticleTranslation>;

/// Language name for a two-letter code, case-insensitive.
pub fn language_name(code: &str) -> Option<&'static str> {
    let name = match code.to_ascii_uppercase().as_str() {
        "JA" => "Japanese",
        "ES" => "Spanish",
        "FR" => "French",
        "DE" => "German",
        "IT" => "Italian",
        "PT" => "Portuguese",
        "RU" => "Russian",
        "KO" => "Korean",
        "ZH" => "Chinese",
        "AR" => "Arabic",
        _ => return None,
    };
    Some(name)
}

pub fn translation_prompt(text: &str, language: &str) -> String {
    format!(
        "Translate the following English text to {language}. Keep technical terms and proper \
         nouns in their original form when appropriate. Provide only the translation without \
         any additional text:\n\n{text}"
    )
}

pub struct Translator<'a, T> {
    generator: &'a TextGenerator<T>,
    language: &'static str,
    concurrency: usize,
}

impl<'a, T> Translator<'a, T>
where
    T: AskAsync<Response = String>,
{
    /// `None` for `"None"` or an unknown language code.
    pub fn new(generator: &'a TextGenerator<T>, code: &str, concurrency: usize) -> Option<Self> {
        if code.eq_ignore_ascii_case("none") {
            return None;
        }
        let Some(language) = language_name(code) else {
            warn!(code, "Unsupported translation language; skipping translation");
            return None;
        };
        Some(Self {
            generator,
            language,
            concurrency: concurrency.max(1),
        })
    }

    pub fn language(&self) -> &'static str {
        self.language
    }

    pub async fn translate(&self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }
        self.generator
            .generate(&translation_prompt(text, self.language))
            .await
    }

    /// Translate title and summary excerpt of every article, with at most
    /// `concurrency` prompts in flight.
    #[instrument(level = "info", skip_all, fields(language = self.language, articles = articles.len()))]
    pub async fn translate_articles(&self, articles: &[Article]) -> Translations {
        let translations: Translations = stream::iter(articles)
            .map(|article| async move {
                let excerpt = truncate_chars(&article.summary, SUMMARY_EXCERPT_CHARS);
                let title = self.translate(&article.title).await;
                let summary = self.translate(&excerpt).await;
                (article.id.clone(), ArticleTranslation { title, summary })
            })
            .buffered(self.concurrency)
            .filter(|(_, t)| std::future::ready(t.title.is_some() || t.summary.is_some()))
            .collect()
            .await;

        info!(translated = translations.len(), "Translated must-read articles");
        translations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::stubs::{Canned, Failing, InFlight};
    use crate::models::fixtures::article;

    #[test]
    fn test_language_codes() {
        assert_eq!(language_name("ja"), Some("Japanese"));
        assert_eq!(language_name("ZH"), Some("Chinese"));
        assert_eq!(language_name("xx"), None);
    }

    #[test]
    fn test_none_and_unknown_disable_translation() {
        let generator = TextGenerator::new(Canned("x"));
        assert!(Translator::new(&generator, "None", 2).is_none());
        assert!(Translator::new(&generator, "klingon", 2).is_none());
        assert_eq!(
            Translator::new(&generator, "de", 2).map(|t| t.language()),
            Some("German")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_translation_prompts_respect_concurrency() {
        let (backend, peak) = InFlight::new();
        let generator = TextGenerator::new(backend);
        let translator = Translator::new(&generator, "fr", 3).unwrap();
        let articles: Vec<_> = (0..6)
            .map(|i| article(&format!("a{i}"), "Title", "Summary", 1))
            .collect();

        let translations = translator.translate_articles(&articles).await;

        assert_eq!(translations.len(), 6);
        assert_eq!(peak.get(), 3);
    }

    #[test]
    fn test_prompt_mentions_language_and_text() {
        let prompt = translation_prompt("Hello", "French");
        assert!(prompt.contains("to French."));
        assert!(prompt.ends_with("\n\nHello"));
    }

    #[tokio::test]
    async fn test_translations_keyed_by_id() {
        let generator = TextGenerator::new(Canned("traduit"));
        let translator = Translator::new(&generator, "FR", 2).unwrap();
        let articles = vec![
            article("a", "Title A", "Summary A", 1),
            article("b", "Title B", "", 1),
        ];

        let out = translator.translate_articles(&articles).await;
        assert_eq!(out["a"].title.as_deref(), Some("traduit"));
        assert_eq!(out["a"].summary.as_deref(), Some("traduit"));
        assert_eq!(out["b"].summary, None);
    }

    #[tokio::test]
    async fn test_failed_translations_are_omitted() {
        let generator = TextGenerator::new(Failing);
        let translator = Translator::new(&generator, "ES", 2).unwrap();
        let out = translator
            .translate_articles(&[article("a", "Title", "Summary", 1)])
            .await;
        assert!(out.is_empty());
    }
}

//! HTML document shell.
//!
//! Receives a resolved `LocaleContext` and produces the page wrapper:
//! document language and direction, the script font class, title, navigation
//! labels, the language switch link and the bundle itself for client-side
//! content consumers. Section markup is not rendered here.

use crate::i18n::{I18nError, LocaleContext, LocaleRegistry, LocaleStrings};
use crate::routing::{switch_to, RouteError};
use minijinja::{context, Environment};
use serde::Serialize;
use thiserror::Error;

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="{{ lang }}" dir="{{ dir }}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ title }}</title>
<meta name="description" content="{{ description }}">
{% for alt in alternates %}<link rel="alternate" hreflang="{{ alt.lang }}" href="{{ alt.href }}">
{% endfor %}</head>
<body class="bg-industrial-black text-industrial-gray-100{% if font %} {{ font }}{% endif %}">
<nav>
{% for link in nav %}<a href="{{ link.href }}">{{ link.label }}</a>
{% endfor %}<a href="{{ switch.href }}" hreflang="{{ switch.lang }}" aria-label="{{ switch.aria }}"><span class="hidden md:inline">{{ switch.label }}</span><span class="md:hidden">{{ switch.short }}</span></a>
<a href="#contact">{{ quote }}</a>
</nav>
<main id="content" data-route="{{ route }}"></main>
<script id="messages" type="application/json">{{ messages|safe }}</script>
</body>
</html>
"##;

const NOT_FOUND_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="{{ lang }}" dir="{{ dir }}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{{ site_title }}</title>
</head>
<body class="bg-industrial-black text-industrial-gray-100">
{% for section in sections %}<section lang="{{ section.lang }}" dir="{{ section.dir }}"{% if section.font %} class="{{ section.font }}"{% endif %}>
<h1>{{ section.title }}</h1>
<p>{{ section.message }}</p>
<a href="{{ section.home }}">{{ section.home_label }}</a>
</section>
{% endfor %}</body>
</html>
"#;

/// Section anchors of the single-page site, with their nav label keys.
const NAV_SECTIONS: [(&str, &str); 5] = [
    ("#home", "nav.home"),
    ("#services", "nav.services"),
    ("#about", "nav.about"),
    ("#projects", "nav.projects"),
    ("#contact", "nav.contact"),
];

#[derive(Debug, Error)]
pub enum ShellError {
    #[error(transparent)]
    Content(#[from] I18nError),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to serialize messages: {0}")]
    Messages(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct NavLink<'a> {
    href: &'static str,
    label: &'a str,
}

#[derive(Serialize)]
struct Alternate {
    lang: &'static str,
    href: String,
}

#[derive(Serialize)]
struct SwitchLink {
    href: String,
    lang: &'static str,
    label: &'static str,
    short: &'static str,
    aria: &'static str,
}

#[derive(Serialize)]
struct NotFoundSection {
    lang: &'static str,
    dir: &'static str,
    font: Option<&'static str>,
    title: &'static str,
    message: &'static str,
    home: String,
    home_label: &'static str,
}

pub struct Shell {
    env: Environment<'static>,
    site_title: String,
}

impl Shell {
    pub fn new(site_title: impl Into<String>) -> Result<Self, ShellError> {
        let mut env = Environment::new();
        // `.html` names turn on HTML auto-escaping
        env.add_template("page.html", PAGE_TEMPLATE)?;
        env.add_template("not_found.html", NOT_FOUND_TEMPLATE)?;
        Ok(Self {
            env,
            site_title: site_title.into(),
        })
    }

    /// Render the document for a resolved navigation.
    pub fn render_page(&self, ctx: &LocaleContext) -> Result<String, ShellError> {
        let locale = ctx.locale();
        let target = locale.toggle();

        let nav = NAV_SECTIONS
            .iter()
            .map(|&(href, key)| ctx.t(key).map(|label| NavLink { href, label }))
            .collect::<Result<Vec<_>, I18nError>>()?;

        let alternates: Vec<Alternate> = LocaleRegistry::get()
            .list_all()
            .into_iter()
            .map(|alt| Alternate {
                lang: alt.code,
                href: ctx.route_path().with_locale(alt.locale),
            })
            .collect();

        let target_config = target.config();
        let switch = SwitchLink {
            href: switch_to(&ctx.path(), target)?,
            lang: target_config.code,
            label: target_config.native_name,
            short: target_config.short_label,
            aria: LocaleStrings::for_locale(locale).switch_language,
        };

        let template = self.env.get_template("page.html")?;
        let html = template.render(context! {
            lang => locale.code(),
            dir => ctx.direction().as_str(),
            font => ctx.font_class(),
            title => ctx.t("metadata.title")?,
            description => ctx.t("metadata.description")?,
            alternates => alternates,
            nav => nav,
            switch => switch,
            quote => ctx.t("nav.getQuote")?,
            route => ctx.route_path().sub_path(),
            messages => embed_json(ctx.bundle().as_value())?,
        })?;
        Ok(html)
    }

    /// Render the not-found document, in every locale.
    pub fn render_not_found(&self) -> Result<String, ShellError> {
        let registry = LocaleRegistry::get();
        let sections: Vec<NotFoundSection> = registry
            .list_all()
            .into_iter()
            .map(|config| {
                let strings = LocaleStrings::for_locale(config.locale);
                NotFoundSection {
                    lang: config.code,
                    dir: config.locale.direction().as_str(),
                    font: config.font_class,
                    title: strings.not_found_title,
                    message: strings.not_found_message,
                    home: format!("/{}", config.code),
                    home_label: strings.home_link,
                }
            })
            .collect();

        let canonical = registry.canonical();
        let template = self.env.get_template("not_found.html")?;
        let html = template.render(context! {
            lang => canonical.code,
            dir => canonical.locale.direction().as_str(),
            site_title => &self.site_title,
            sections => sections,
        })?;
        Ok(html)
    }
}

/// Serialize JSON for a `<script>` element; `<` is escaped so content can
/// never close the element.
fn embed_json(value: &serde_json::Value) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{BundleStore, EmbeddedSource, Locale, MemorySource};
    use crate::routing::Resolver;
    use std::sync::Arc;

    async fn resolve(path: &str) -> LocaleContext {
        Resolver::new(Arc::new(BundleStore::new(Arc::new(EmbeddedSource))))
            .resolve(path)
            .await
            .expect("path should resolve")
    }

    fn shell() -> Shell {
        Shell::new("Egyptian Metal Works").expect("templates should compile")
    }

    /// Auto-escaping may encode `/` inside values.
    fn page(ctx: &LocaleContext) -> String {
        shell().render_page(ctx).unwrap().replace("&#x2f;", "/")
    }

    // ==================== Page Tests ====================

    #[tokio::test]
    async fn test_render_english_page() {
        let html = page(&resolve("/en/services").await);

        assert!(html.contains(r#"<html lang="en" dir="ltr">"#));
        assert!(html.contains("<title>Egyptian Metal Works</title>"));
        assert!(html.contains(r#"<a href="/ar/services" hreflang="ar""#));
        assert!(html.contains(">العربية</span>"));
        assert!(!html.contains("font-arabic"));
    }

    #[tokio::test]
    async fn test_render_arabic_page_is_rtl_with_script_font() {
        let html = page(&resolve("/ar").await);

        assert!(html.contains(r#"<html lang="ar" dir="rtl">"#));
        assert!(html.contains("text-industrial-gray-100 font-arabic"));
        assert!(html.contains(r#"<a href="/en" hreflang="en""#));
        assert!(html.contains("الرئيسية"));
    }

    #[tokio::test]
    async fn test_render_page_includes_quote_link() {
        let html = page(&resolve("/en/services").await);
        assert!(html.contains(r##"<a href="#contact">Get a Quote</a>"##));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[tokio::test]
    async fn test_render_page_compact_switch_label() {
        let english = page(&resolve("/en/services").await);
        assert!(english.contains(r#"<span class="md:hidden">ع</span>"#));

        let arabic = page(&resolve("/ar").await);
        assert!(arabic.contains(r#"<span class="md:hidden">EN</span>"#));
        assert!(arabic.contains(r#"<span class="hidden md:inline">English</span>"#));
    }

    #[tokio::test]
    async fn test_render_page_lists_alternates() {
        let html = page(&resolve("/en/about").await);
        assert!(html.contains(r#"hreflang="en" href="/en/about""#));
        assert!(html.contains(r#"hreflang="ar" href="/ar/about""#));
    }

    #[tokio::test]
    async fn test_render_page_embeds_parseable_messages() {
        let html = shell().render_page(&resolve("/ar").await).unwrap();
        let marker = r#"type="application/json">"#;
        let start = html.find(marker).unwrap() + marker.len();
        let end = html[start..].find("</script>").unwrap() + start;

        let messages: serde_json::Value = serde_json::from_str(&html[start..end]).unwrap();
        assert_eq!(messages["nav"]["home"], "الرئيسية");
    }

    #[tokio::test]
    async fn test_render_page_missing_key_is_error() {
        let store = BundleStore::new(Arc::new(MemorySource::new().with(Locale::English, "{}")));
        let ctx = Resolver::new(Arc::new(store)).resolve("/en").await.unwrap();

        let err = shell().render_page(&ctx).unwrap_err();
        assert!(matches!(err, ShellError::Content(I18nError::MissingKey { .. })));
    }

    #[test]
    fn test_embed_json_escapes_script_close() {
        let value = serde_json::json!({ "x": "</script><b>" });
        let embedded = embed_json(&value).unwrap();

        assert!(!embedded.contains("</script>"));
        let parsed: serde_json::Value = serde_json::from_str(&embedded).unwrap();
        assert_eq!(parsed, value);
    }

    // ==================== Not Found Tests ====================

    #[test]
    fn test_render_not_found_is_bilingual() {
        let html = shell().render_not_found().unwrap().replace("&#x2f;", "/");

        assert!(html.contains("Page not found"));
        assert!(html.contains("الصفحة غير موجودة"));
        assert!(html.contains(r#"<section lang="ar" dir="rtl" class="font-arabic">"#));
        assert!(html.contains(r#"<a href="/en">"#));
        assert!(html.contains(r#"<a href="/ar">"#));
    }
}

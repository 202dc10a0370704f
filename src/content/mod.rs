//! Literal site content shared by the feed and the sitemap.
//!
//! The site is a single landing page, so its syndication entries and page
//! list are fixed at compile time. Only the origin comes from the config.

use std::fmt;

/// Target of a feed item link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Path on the configured site, `""` for the landing page.
    Site(&'static str),
    /// Absolute URL on another host.
    External(&'static str),
}

impl Link {
    /// Resolve against the site origin.
    pub fn resolve(&self, origin: &str) -> String {
        match self {
            Self::Site(path) => {
                let origin = origin.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                if path.is_empty() {
                    origin.to_string()
                } else {
                    format!("{origin}/{path}")
                }
            }
            Self::External(url) => (*url).to_string(),
        }
    }
}

/// One entry of the syndication feed. The publish date is the render time.
#[derive(Debug)]
pub struct FeedItem {
    pub title: &'static str,
    pub link: Link,
    pub description: &'static str,
    pub categories: &'static [&'static str],
}

pub const CHANNEL_CATEGORIES: &[&str] = &[
    "Музыкальные мероприятия",
    "Караоке",
    "Развлечения Москва",
    "Свадебные услуги",
    "Корпоративные мероприятия",
];

pub const FEED_ITEMS: &[FeedItem] = &[
    FeedItem {
        title: "Живое караоке — музыкальное шоу с живым ансамблем в Москве",
        link: Link::Site(""),
        description: "Живое караоке — интерактивный музыкальный формат в Москве, где участники \
поют под аккомпанемент живого ансамбля (бас, фортепиано, ударные).

Услуги:
• Караоке с живой музыкой для свадеб
• Корпоративные мероприятия с живым караоке
• Дни рождения и юбилеи
• Регулярные вечера в московских барах

Репертуар: около 400 песен
Продолжительность: 2 часа
Состав: басист, пианист, барабанщик, ведущий

Контакты: +7 (916) 499-25-33, Telegram @povsemmestam",
        categories: &["Караоке", "Москва", "Музыкальные мероприятия"],
    },
    FeedItem {
        title: "Каталог песен Живого караоке",
        link: Link::External("https://songbook.gastroli.moscow"),
        description: "Полный каталог песен для живого караоке. Около 400 композиций разных \
жанров и эпох, доступных для исполнения с живым ансамблем в Москве.",
        categories: &["Репертуар", "Каталог"],
    },
];

/// Sitemap `<changefreq>` values.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page listed in the sitemap. `lastmod` is the render time.
#[derive(Debug)]
pub struct PageEntry {
    /// Path relative to the origin.
    pub path: &'static str,
    pub changefreq: ChangeFrequency,
    /// Between 0.0 and 1.0.
    pub priority: f32,
}

pub const SITEMAP_PAGES: &[PageEntry] = &[PageEntry {
    path: "",
    changefreq: ChangeFrequency::Weekly,
    priority: 1.0,
}];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_resolve() {
        let origin = "https://karaoke.gastroli.moscow/";
        assert_eq!(Link::Site("").resolve(origin), "https://karaoke.gastroli.moscow");
        assert_eq!(
            Link::Site("/rss.xml").resolve(origin),
            "https://karaoke.gastroli.moscow/rss.xml"
        );
        assert_eq!(
            Link::External("https://songbook.gastroli.moscow").resolve(origin),
            "https://songbook.gastroli.moscow"
        );
    }

    #[test]
    fn test_feed_items_are_literal() {
        assert_eq!(FEED_ITEMS.len(), 2);
        assert_eq!(FEED_ITEMS[0].link, Link::Site(""));
        assert!(FEED_ITEMS[0].description.contains("+7 (916) 499-25-33"));
        assert!(FEED_ITEMS[0].description.contains("\n• Дни рождения и юбилеи\n"));
        assert_eq!(FEED_ITEMS[1].categories, ["Репертуар", "Каталог"]);
    }

    #[test]
    fn test_sitemap_priorities_in_range() {
        assert!(SITEMAP_PAGES.iter().all(|p| (0.0..=1.0).contains(&p.priority)));
    }

    #[test]
    fn test_change_frequency_display() {
        assert_eq!(ChangeFrequency::Weekly.to_string(), "weekly");
        assert_eq!(ChangeFrequency::Never.as_str(), "never");
    }
}

//! RSS 2.0 feed generation.
//!
//! One channel describing the site, with the literal items from
//! [`crate::content::FEED_ITEMS`]. `lastBuildDate` and every `pubDate` carry
//! the render time.

use crate::{
    config::SiteConfig,
    content::{CHANNEL_CATEGORIES, FEED_ITEMS, FeedItem},
    generator::write_document,
    utils::date::DateTimeUtc,
};
use anyhow::{Result, anyhow};
use rss::{
    CategoryBuilder, ChannelBuilder, GuidBuilder, ImageBuilder, ItemBuilder,
    extension::{ExtensionBuilder, ExtensionMap},
    validation::Validate,
};
use std::collections::BTreeMap;

const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
const CONTENT_NS: &str = "http://purl.org/rss/1.0/modules/content/";

/// Write the feed into the output directory if enabled.
///
/// The rss writer emits the channel without indentation, so `build.minify`
/// does not apply.
pub fn build_feed(config: &SiteConfig) -> Result<()> {
    if config.site.feed.enable {
        let xml = render_feed(config)?;
        write_document(&config.build.output, &config.site.feed.path, xml.as_bytes(), "rss")?;
    }
    Ok(())
}

/// Render the feed stamped with the current time, or the pinned
/// `build.date` when set.
pub fn render_feed(config: &SiteConfig) -> Result<String> {
    render_feed_at(config, config.build.render_time())
}

/// Render the feed stamped with `now`.
pub fn render_feed_at(config: &SiteConfig, now: DateTimeUtc) -> Result<String> {
    let info = &config.site.info;
    let origin = info.origin();
    let build_date = now.to_rfc2822();

    let items: Vec<_> = FEED_ITEMS
        .iter()
        .map(|item| feed_item(item, origin, &build_date))
        .collect();

    let categories: Vec<_> = CHANNEL_CATEGORIES
        .iter()
        .map(|name| CategoryBuilder::default().name(*name).build())
        .collect();

    let image = ImageBuilder::default()
        .url(info.absolute(&info.icon))
        .title(info.short_title.clone())
        .link(origin.to_string())
        .build();

    let channel = ChannelBuilder::default()
        .namespaces(namespaces())
        .title(info.title.clone())
        .link(origin.to_string())
        .description(info.description.clone())
        .language(info.language.clone())
        .last_build_date(build_date)
        .managing_editor(info.editor.clone())
        .webmaster(info.webmaster().to_string())
        .categories(categories)
        .image(image)
        .generator("gastroli".to_string())
        .extensions(self_link(&info.absolute(&config.site.feed.path.to_string_lossy())))
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn feed_item(item: &FeedItem, origin: &str, pub_date: &str) -> rss::Item {
    let link = item.link.resolve(origin);
    let categories: Vec<_> = item
        .categories
        .iter()
        .map(|name| CategoryBuilder::default().name(*name).build())
        .collect();

    ItemBuilder::default()
        .title(item.title.to_string())
        .link(link.clone())
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .pub_date(pub_date.to_string())
        .description(item.description.to_string())
        .categories(categories)
        .build()
}

fn namespaces() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("atom".to_string(), ATOM_NS.to_string()),
        ("content".to_string(), CONTENT_NS.to_string()),
    ])
}

/// `<atom:link rel="self">` pointing at the feed itself.
fn self_link(href: &str) -> ExtensionMap {
    let attrs = BTreeMap::from([
        ("href".to_string(), href.to_string()),
        ("rel".to_string(), "self".to_string()),
        ("type".to_string(), "application/rss+xml".to_string()),
    ]);
    let link = ExtensionBuilder::default()
        .name("atom:link".to_string())
        .attrs(attrs)
        .build();

    BTreeMap::from([(
        "atom".to_string(),
        BTreeMap::from([("link".to_string(), vec![link])]),
    )])
}

//! RSS 2.0 serialization.
//!
//! Writes a [`Feed`] as a pretty-printed XML document with 2-space
//! indentation. Element order inside `<item>` is fixed: `guid` (when
//! present), `id`, `title`, `pubDate`, `description`, `content:encoded`,
//! then one `enclosure` per media file.

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Channel, Enclosure, Episode, Feed};
use crate::{CastfeedError, Result};

/// Content type of the serialized document.
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

type XmlWriter = Writer<Vec<u8>>;

/// Whether `c` may appear in an XML 1.0 document.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replace characters XML 1.0 forbids with U+FFFD.
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(
            text.chars()
                .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

fn write_event(writer: &mut XmlWriter, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| CastfeedError::Xml(e.to_string()))
}

fn write_text_element(writer: &mut XmlWriter, name: &str, text: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(&xml_safe(text))))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_enclosure(writer: &mut XmlWriter, enclosure: &Enclosure) -> Result<()> {
    let mut start = BytesStart::new("enclosure");
    start.push_attribute(("url", &*xml_safe(&enclosure.url)));
    start.push_attribute(("type", &*xml_safe(&enclosure.media_type)));
    write_event(writer, Event::Empty(start))
}

fn write_item(writer: &mut XmlWriter, item: &Episode) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new("item")))?;

    if let Some(guid) = &item.guid {
        write_text_element(writer, "guid", guid)?;
    }
    write_text_element(writer, "id", &item.id.to_string())?;
    write_text_element(writer, "title", &item.title)?;
    write_text_element(writer, "pubDate", &item.pub_date)?;
    write_text_element(writer, "description", &item.description)?;
    write_text_element(writer, "content:encoded", &item.content)?;
    for enclosure in &item.enclosures {
        write_enclosure(writer, enclosure)?;
    }

    write_event(writer, Event::End(BytesEnd::new("item")))
}

fn write_channel(writer: &mut XmlWriter, channel: &Channel) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new("channel")))?;

    write_text_element(writer, "title", &channel.title)?;
    write_text_element(writer, "link", &channel.link)?;
    for item in &channel.items {
        write_item(writer, item)?;
    }

    write_event(writer, Event::End(BytesEnd::new("channel")))
}

/// Serialize a feed to an RSS 2.0 document.
pub fn to_xml(feed: &Feed) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", feed.version));
    rss.push_attribute(("xmlns:content", feed.content_namespace));
    write_event(&mut writer, Event::Start(rss))?;
    write_channel(&mut writer, &feed.channel)?;
    write_event(&mut writer, Event::End(BytesEnd::new("rss")))?;

    String::from_utf8(writer.into_inner()).map_err(|e| CastfeedError::Xml(e.to_string()))
}

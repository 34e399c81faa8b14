use std::io::Cursor;

use chrono::{TimeZone, Utc};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::content::Post;
use crate::series::SeriesGroup;
use crate::view::SeriesLinks;

/* Example
<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
<channel>
  <title>Widgets - Thiago Cafe</title>
  <link>https://thiagocafe.com/series/widgets/</link>
  <description>Posts of the series Widgets</description>
  <item>
    <title>Widgets, part 2</title>
    <link>https://thiagocafe.com/posts/widgets-2/</link>
    <guid isPermaLink="true">https://thiagocafe.com/posts/widgets-2/</guid>
    <description><![CDATA[Second widget.]]></description>
    <pubDate>Thu, 1 Feb 2024 00:00:00 +0000</pubDate>
  </item>
</channel>
</rss>
*/

pub struct SeriesFeed<'a> {
    pub site_title: &'a str,
    pub base_url: &'a str,
    pub links: &'a SeriesLinks,
}

impl<'a> SeriesFeed<'a> {
    /// Items are written newest first
    pub fn render(&self, group: &SeriesGroup) -> quick_xml::Result<Vec<u8>> {
        let mut writer = Writer::new(Cursor::new(Vec::new()));

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let mut rss = BytesStart::new("rss");
        rss.push_attribute(("version", "2.0"));
        writer.write_event(Event::Start(rss))?;
        writer.write_event(Event::Start(BytesStart::new("channel")))?;

        let ch_title = format!("{} - {}", group.name, self.site_title);
        push_text(&mut writer, "title", &ch_title)?;
        push_text(&mut writer, "link", &full_link(self.base_url, &self.links.link(group.name)))?;
        push_text(&mut writer, "description", &format!("Posts of the series {}", group.name))?;

        let mut posts: Vec<&Post> = group.posts.clone();
        posts.sort_by(|a, b| b.date.cmp(&a.date));

        for post in posts {
            writer.write_event(Event::Start(BytesStart::new("item")))?;

            push_text(&mut writer, "title", &post.title)?;

            let link = full_link(self.base_url, &post.permalink);
            push_text(&mut writer, "link", &link)?;

            let mut guid_elem = BytesStart::new("guid");
            guid_elem.push_attribute(("isPermaLink", "true"));
            writer.write_event(Event::Start(guid_elem))?;
            writer.write_event(Event::Text(BytesText::new(&link)))?;
            writer.write_event(Event::End(BytesEnd::new("guid")))?;

            if let Some(ref description) = post.description {
                push_cdata(&mut writer, "description", description)?;
            }

            let dt = Utc.from_utc_datetime(&post.date);
            push_text(&mut writer, "pubDate", &dt.to_rfc2822())?;

            writer.write_event(Event::End(BytesEnd::new("item")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("channel")))?;
        writer.write_event(Event::End(BytesEnd::new("rss")))?;

        Ok(writer.into_inner().into_inner())
    }
}

fn full_link(base_url: &str, link: &str) -> String {
    if link.contains("://") {
        return link.to_string();
    }

    let base_url = base_url.trim_end_matches('/');
    if link.starts_with('/') {
        format!("{}{}", base_url, link)
    } else {
        format!("{}/{}", base_url, link)
    }
}

fn push_text(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

fn push_cdata(writer: &mut Writer<Cursor<Vec<u8>>>, tag: &str, text: &str) -> quick_xml::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    let text = text.replace("]]>", "]] >");
    writer.write_event(Event::CData(BytesCData::new(text.as_str())))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str;

    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

    use crate::content::SeriesRef;
    use crate::series::list_series;

    use super::*;

    fn post(index: u32, day: u32, description: Option<&str>) -> Post {
        Post {
            title: format!("Widgets & co, part {}", index),
            date: NaiveDateTime::new(
                NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
                NaiveTime::from_hms_opt(5, 6, 7).unwrap(),
            ),
            permalink: format!("/posts/widgets-{}/", index),
            series: Some(SeriesRef { name: "Widgets".to_string(), index }),
            tags: vec![],
            description: description.map(|d| d.to_string()),
        }
    }

    #[test]
    fn test_full_link() {
        assert_eq!(full_link("https://thiagocafe.com/", "/posts/a/"), "https://thiagocafe.com/posts/a/");
        assert_eq!(full_link("https://thiagocafe.com", "posts/a/"), "https://thiagocafe.com/posts/a/");
        assert_eq!(full_link("https://thiagocafe.com", "https://other.com/a/"), "https://other.com/a/");
    }

    #[test]
    fn render_xml() {
        let posts = vec![
            post(1, 11, Some("first <b>one</b>")),
            post(2, 12, None),
        ];
        let groups = list_series(&posts);
        let links = SeriesLinks::new(&groups);
        let feed = SeriesFeed {
            site_title: "my blog",
            base_url: "https://thiagocafe.com/",
            links: &links,
        };
        let xml = feed.render(&groups[0]).unwrap();
        assert_eq!(str::from_utf8(&xml).unwrap(), EXPECTED);
    }

    const EXPECTED: &str = r##"<?xml version="1.0" encoding="UTF-8"?><rss version="2.0"><channel><title>Widgets - my blog</title><link>https://thiagocafe.com/series/widgets/</link><description>Posts of the series Widgets</description><item><title>Widgets &amp; co, part 2</title><link>https://thiagocafe.com/posts/widgets-2/</link><guid isPermaLink="true">https://thiagocafe.com/posts/widgets-2/</guid><pubDate>Fri, 12 Jan 2024 05:06:07 +0000</pubDate></item><item><title>Widgets &amp; co, part 1</title><link>https://thiagocafe.com/posts/widgets-1/</link><guid isPermaLink="true">https://thiagocafe.com/posts/widgets-1/</guid><description><![CDATA[first <b>one</b>]]></description><pubDate>Thu, 11 Jan 2024 05:06:07 +0000</pubDate></item></channel></rss>"##;
}

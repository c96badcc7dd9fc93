//! Small helpers shared by the streaming XML readers and the slide writer.

use quick_xml::escape::{escape, unescape};
use quick_xml::events::BytesStart;
use std::borrow::Cow;

/// Escape text for use inside an attribute value or element body.
///
/// # Examples
///
/// ```
/// use pptx_probe::common::xml::escape_xml;
/// assert_eq!(escape_xml("Title & Content"), "Title &amp; Content");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    escape(s)
}

/// Decode raw attribute bytes, resolving the predefined entities.
///
/// Unknown entities are kept verbatim rather than failing the whole part.
fn decode_value(raw: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(raw).ok()?;
    match unescape(text) {
        Ok(value) => Some(value.into_owned()),
        Err(_) => Some(text.to_string()),
    }
}

/// Value of the attribute whose qualified name is exactly `qname`.
pub fn attr_value(e: &BytesStart<'_>, qname: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == qname)
        .and_then(|attr| decode_value(&attr.value))
}

/// Value of the first prefixed attribute with local name `id` (`r:id` and friends).
///
/// Element ids such as `<p:sldId id="256" r:id="rId2"/>` carry both an unprefixed
/// `id` and a relationship id; only the prefixed one is returned.
pub fn rel_id_attr(e: &BytesStart<'_>) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.prefix().is_some() && attr.key.local_name().as_ref() == b"id")
        .and_then(|attr| decode_value(&attr.value))
}

/// Integer attribute, `None` when absent or not a valid integer.
pub fn attr_i64(e: &BytesStart<'_>, qname: &[u8]) -> Option<i64> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == qname)
        .and_then(|attr| atoi_simd::parse::<i64, false, false>(attr.value.trim_ascii()).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    fn first_element(xml: &str) -> BytesStart<'static> {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => return e.into_owned(),
                Ok(Event::Eof) => panic!("no element in {xml}"),
                Err(e) => panic!("{e}"),
                _ => {},
            }
        }
    }

    #[test]
    fn test_attr_value_unescapes() {
        let e = first_element(r#"<p:cSld name="Title &amp; Content"/>"#);
        assert_eq!(attr_value(&e, b"name").as_deref(), Some("Title & Content"));
        assert_eq!(attr_value(&e, b"missing"), None);
    }

    #[test]
    fn test_rel_id_ignores_plain_id() {
        let e = first_element(r#"<p:sldId id="256" r:id="rId7"/>"#);
        assert_eq!(rel_id_attr(&e).as_deref(), Some("rId7"));
        assert_eq!(attr_i64(&e, b"id"), Some(256));
    }

    #[test]
    fn test_attr_i64_signed_and_invalid() {
        let e = first_element(r#"<a:off x="-12700" y="abc"/>"#);
        assert_eq!(attr_i64(&e, b"x"), Some(-12_700));
        assert_eq!(attr_i64(&e, b"y"), None);
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a>"), "&lt;a&gt;");
        assert_eq!(escape_xml("plain"), "plain");
    }
}

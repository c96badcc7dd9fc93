//! Theme parts (`/ppt/theme/themeN.xml`).
//!
//! Reads the colour scheme and font scheme of a theme. Colours are kept in the
//! form they were written; deciding what is concrete and what must be looked up
//! later is the caller's business.
use crate::common::xml::attr_value;
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::part::Part;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// The twelve colour-scheme slots in schema order.
pub const COLOR_SLOTS: [&str; 12] = [
    "dk1", "lt1", "dk2", "lt2", "accent1", "accent2", "accent3", "accent4", "accent5",
    "accent6", "hlink", "folHlink",
];

/// A colour as written in a scheme slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeColor {
    /// `<a:srgbClr val="RRGGBB">`, or `<a:scrgbClr>` converted to 8-bit RGB
    Rgb(String),
    /// `<a:sysClr val lastClr>`
    System {
        val: String,
        last_color: Option<String>,
    },
    /// `<a:schemeClr val>`
    SchemeRef(String),
    /// `<a:prstClr val>`
    Preset(String),
    /// Any other colour model (`hslClr`), identified by element name
    Other(String),
}

/// Latin, East Asian and complex-script faces of a major or minor font.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontFaces {
    pub latin: Option<String>,
    pub east_asian: Option<String>,
    pub complex_script: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontScheme {
    pub name: String,
    /// Heading font
    pub major: FontFaces,
    /// Body font
    pub minor: FontFaces,
}

/// Theme information extracted from a theme part.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    pub name: String,
    /// `None` when the theme has no `<a:clrScheme>`; otherwise slot name and
    /// colour for each slot that holds a colour element.
    pub colors: Option<Vec<(String, SchemeColor)>>,
    pub font_scheme: Option<FontScheme>,
}

/// Theme part - defines the colours and fonts of a master.
pub struct ThemePart<'a> {
    part: &'a dyn Part,
}

impl<'a> ThemePart<'a> {
    pub fn from_part(part: &'a dyn Part) -> Result<Self> {
        Ok(Self { part })
    }

    /// Parse and return the theme information.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let theme = ThemePart::from_part(part)?.theme()?;
    /// if let Some(colors) = &theme.colors {
    ///     println!("{} colour slots", colors.len());
    /// }
    /// ```
    pub fn theme(&self) -> Result<Theme> {
        parse_theme(self.part.blob())
    }

    #[inline]
    pub fn part(&self) -> &'a dyn Part {
        self.part
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum FontRole {
    Major,
    Minor,
}

fn scheme_color(e: &BytesStart<'_>) -> Option<SchemeColor> {
    let val = || attr_value(e, b"val").unwrap_or_default();
    match e.local_name().as_ref() {
        b"srgbClr" => Some(SchemeColor::Rgb(val().to_ascii_uppercase())),
        b"sysClr" => Some(SchemeColor::System {
            val: val(),
            last_color: attr_value(e, b"lastClr").map(|c| c.to_ascii_uppercase()),
        }),
        b"schemeClr" => Some(SchemeColor::SchemeRef(val())),
        b"prstClr" => Some(SchemeColor::Preset(val())),
        b"scrgbClr" => {
            let channel = |key: &[u8]| {
                let pct = crate::common::xml::attr_i64(e, key).unwrap_or(0).clamp(0, 100_000);
                (pct * 255 + 50_000) / 100_000
            };
            Some(SchemeColor::Rgb(format!(
                "{:02X}{:02X}{:02X}",
                channel(b"r"),
                channel(b"g"),
                channel(b"b")
            )))
        },
        b"hslClr" => Some(SchemeColor::Other("hslClr".to_string())),
        _ => None,
    }
}

fn typeface(e: &BytesStart<'_>) -> Option<String> {
    attr_value(e, b"typeface").filter(|face| !face.trim().is_empty())
}

/// Parse theme XML.
pub fn parse_theme(xml: &[u8]) -> Result<Theme> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);

    let mut theme = Theme::default();
    let mut in_color_scheme = false;
    let mut current_slot: Option<String> = None;
    let mut font_role: Option<FontRole> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Empty(ref e)) if e.local_name().as_ref() == b"clrScheme" => {
                theme.colors.get_or_insert_with(Vec::new);
            },
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                let local_name = e.local_name();
                match local_name.as_ref() {
                    b"theme" => theme.name = attr_value(e, b"name").unwrap_or_default(),
                    b"clrScheme" => {
                        in_color_scheme = true;
                        theme.colors.get_or_insert_with(Vec::new);
                    },
                    b"fontScheme" => {
                        theme.font_scheme = Some(FontScheme {
                            name: attr_value(e, b"name").unwrap_or_default(),
                            ..FontScheme::default()
                        });
                    },
                    b"majorFont" => font_role = Some(FontRole::Major),
                    b"minorFont" => font_role = Some(FontRole::Minor),
                    name @ (b"latin" | b"ea" | b"cs") => {
                        if let (Some(role), Some(scheme)) = (font_role, theme.font_scheme.as_mut()) {
                            let faces = match role {
                                FontRole::Major => &mut scheme.major,
                                FontRole::Minor => &mut scheme.minor,
                            };
                            let slot = match name {
                                b"latin" => &mut faces.latin,
                                b"ea" => &mut faces.east_asian,
                                _ => &mut faces.complex_script,
                            };
                            *slot = typeface(e);
                        }
                    },
                    name if in_color_scheme => {
                        if let Some(slot) = COLOR_SLOTS.iter().find(|s| s.as_bytes() == name) {
                            current_slot = Some(slot.to_string());
                        } else if let Some(slot) = current_slot.take() {
                            match scheme_color(e) {
                                Some(color) => {
                                    if let Some(colors) = theme.colors.as_mut() {
                                        colors.push((slot, color));
                                    }
                                },
                                None => current_slot = Some(slot),
                            }
                        }
                    },
                    _ => {},
                }
            },
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"clrScheme" => {
                    in_color_scheme = false;
                    current_slot = None;
                },
                b"majorFont" | b"minorFont" => font_role = None,
                _ => {},
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(OoxmlError::Xml(e.to_string())),
            _ => {},
        }
        buf.clear();
    }

    Ok(theme)
}

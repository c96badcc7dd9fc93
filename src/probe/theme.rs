//! Theme colour and font extraction with graceful degradation.
//!
//! Colours that are only references (`schemeClr`, `prstClr`, a `sysClr` without
//! a cached value) cannot be resolved without a renderer. They are reported as
//! [`ThemeColorValue::Symbolic`] and summarized in a single warning.
//!
//! Fonts come from the theme's font scheme. Without one, the master's own text
//! is searched for an explicit typeface, and failing that both faces fall back to
//! [`FALLBACK_FONT`].
use crate::ooxml::pptx::parts::{SchemeColor, Theme};
use crate::ooxml::pptx::slide::SlideMaster;
use memchr::memmem;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Face used when no font information can be found.
pub const FALLBACK_FONT: &str = "Calibri";

/// A theme colour, either known or deferred to render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeColorValue {
    /// `#RRGGBB`
    Concrete(String),
    /// Name of the scheme, system or preset colour it refers to
    Symbolic(String),
}

impl ThemeColorValue {
    #[inline]
    pub fn is_symbolic(&self) -> bool {
        matches!(self, ThemeColorValue::Symbolic(_))
    }
}

impl From<&SchemeColor> for ThemeColorValue {
    fn from(color: &SchemeColor) -> Self {
        match color {
            SchemeColor::Rgb(hex) => ThemeColorValue::Concrete(format!("#{}", hex)),
            SchemeColor::System {
                last_color: Some(hex),
                ..
            } => ThemeColorValue::Concrete(format!("#{}", hex)),
            SchemeColor::System {
                val,
                last_color: None,
            } => ThemeColorValue::Symbolic(val.clone()),
            SchemeColor::SchemeRef(name) | SchemeColor::Preset(name) | SchemeColor::Other(name) => {
                ThemeColorValue::Symbolic(name.clone())
            },
        }
    }
}

impl fmt::Display for ThemeColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeColorValue::Concrete(hex) => f.write_str(hex),
            ThemeColorValue::Symbolic(name) => write!(f, "scheme:{}", name),
        }
    }
}

impl Serialize for ThemeColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Where the reported fonts came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FontSource {
    Scheme,
    MasterText,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeFonts {
    pub heading: String,
    pub body: String,
    pub heading_east_asian: Option<String>,
    pub heading_complex_script: Option<String>,
    pub body_east_asian: Option<String>,
    pub body_complex_script: Option<String>,
    pub source: FontSource,
}

impl ThemeFonts {
    fn single_face(face: &str, source: FontSource) -> Self {
        Self {
            heading: face.to_string(),
            body: face.to_string(),
            heading_east_asian: None,
            heading_complex_script: None,
            body_east_asian: None,
            body_complex_script: None,
            source,
        }
    }
}

impl Default for ThemeFonts {
    fn default() -> Self {
        Self::single_face(FALLBACK_FONT, FontSource::Fallback)
    }
}

/// Colours and fonts of one master's theme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    pub name: Option<String>,
    /// Slot name to colour, alphabetical
    pub colors: BTreeMap<String, ThemeColorValue>,
    pub fonts: ThemeFonts,
}

/// Extract the theme of `master`.
///
/// Never fails: problems degrade the result and are described in the returned
/// warnings, which the caller may keep or drop.
pub fn extract_theme(master: &SlideMaster<'_>) -> (ThemeDescriptor, Vec<String>) {
    let mut warnings = Vec::new();
    let master_name = master.name().unwrap_or_default();

    let theme = match master.theme() {
        Ok(Some(part)) => match part.theme() {
            Ok(theme) => Some(theme),
            Err(e) => {
                warnings.push(format!(
                    "theme of master '{}' could not be parsed: {}",
                    master_name, e
                ));
                None
            },
        },
        Ok(None) => {
            warnings.push(format!("master '{}' has no theme", master_name));
            None
        },
        Err(e) => {
            warnings.push(format!(
                "theme of master '{}' could not be read: {}",
                master_name, e
            ));
            None
        },
    };

    let (descriptor, mut theme_warnings) = describe_theme(theme.as_ref(), master.xml());
    warnings.append(&mut theme_warnings);

    if !warnings.is_empty() {
        tracing::debug!(master = %master_name, count = warnings.len(), "theme degraded");
    }
    (descriptor, warnings)
}

/// Build a descriptor from a parsed theme (if any) and the master XML used for
/// the font heuristic.
pub fn describe_theme(theme: Option<&Theme>, master_xml: &[u8]) -> (ThemeDescriptor, Vec<String>) {
    let mut warnings = Vec::new();

    let colors: BTreeMap<String, ThemeColorValue> = match theme.and_then(|t| t.colors.as_ref()) {
        Some(colors) => colors
            .iter()
            .map(|(slot, color)| (slot.clone(), ThemeColorValue::from(color)))
            .collect(),
        None => {
            warnings.push("no theme colour scheme found; colours unavailable".to_string());
            BTreeMap::new()
        },
    };

    let symbolic: Vec<&str> = colors
        .iter()
        .filter(|(_, value)| value.is_symbolic())
        .map(|(slot, _)| slot.as_str())
        .collect();
    if !symbolic.is_empty() {
        warnings.push(format!(
            "{} theme colour(s) are symbolic references resolved only at render time: {}",
            symbolic.len(),
            symbolic.join(", ")
        ));
    }

    let fonts = match scheme_fonts(theme) {
        Some(fonts) => fonts,
        None => match first_explicit_typeface(master_xml) {
            Some(face) => ThemeFonts::single_face(&face, FontSource::MasterText),
            None => {
                warnings.push(format!(
                    "no font information found; heading and body fonts default to {}",
                    FALLBACK_FONT
                ));
                ThemeFonts::default()
            },
        },
    };

    let descriptor = ThemeDescriptor {
        name: theme.map(|t| t.name.clone()).filter(|name| !name.is_empty()),
        colors,
        fonts,
    };
    (descriptor, warnings)
}

/// Fonts from the font scheme, `None` when there is no usable latin face.
fn scheme_fonts(theme: Option<&Theme>) -> Option<ThemeFonts> {
    let scheme = theme?.font_scheme.as_ref()?;
    let heading = scheme.major.latin.clone().or_else(|| scheme.minor.latin.clone())?;
    let body = scheme.minor.latin.clone().unwrap_or_else(|| heading.clone());

    Some(ThemeFonts {
        heading,
        body,
        heading_east_asian: scheme.major.east_asian.clone(),
        heading_complex_script: scheme.major.complex_script.clone(),
        body_east_asian: scheme.minor.east_asian.clone(),
        body_complex_script: scheme.minor.complex_script.clone(),
        source: FontSource::Scheme,
    })
}

/// First `typeface` attribute in `xml` that names a face rather than a theme
/// font reference (`+mj-lt`, `+mn-ea`, ...).
pub fn first_explicit_typeface(xml: &[u8]) -> Option<String> {
    const NEEDLE: &[u8] = b"typeface=\"";

    memmem::find_iter(xml, NEEDLE).find_map(|pos| {
        let start = pos + NEEDLE.len();
        let len = memchr::memchr(b'"', &xml[start..])?;
        let raw = std::str::from_utf8(&xml[start..start + len]).ok()?;
        let face = quick_xml::escape::unescape(raw)
            .map(|c| c.into_owned())
            .unwrap_or_else(|_| raw.to_string());
        let face = face.trim();
        (!face.is_empty() && !face.starts_with('+')).then(|| face.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::parts::theme::parse_theme;

    fn theme(colors: &str, fonts: &str) -> Theme {
        let xml = format!(
            r#"<a:theme xmlns:a="a" name="Brand"><a:themeElements>{}{}</a:themeElements></a:theme>"#,
            colors, fonts
        );
        parse_theme(xml.as_bytes()).unwrap()
    }

    const FONTS: &str = r#"<a:fontScheme name="Brand"><a:majorFont><a:latin typeface="Georgia"/><a:ea typeface="SimSun"/></a:majorFont><a:minorFont><a:latin typeface="Verdana"/><a:cs typeface="Arial"/></a:minorFont></a:fontScheme>"#;

    #[test]
    fn test_color_mapping() {
        let t = theme(
            r#"<a:clrScheme name="c">
                <a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1>
                <a:lt1><a:sysClr val="window"/></a:lt1>
                <a:accent1><a:srgbClr val="4472c4"/></a:accent1>
                <a:accent2><a:schemeClr val="accent1"/></a:accent2>
                <a:accent3><a:prstClr val="red"/></a:accent3>
            </a:clrScheme>"#,
            FONTS,
        );
        let (descriptor, warnings) = describe_theme(Some(&t), b"");

        assert_eq!(descriptor.name.as_deref(), Some("Brand"));
        assert_eq!(descriptor.colors["dk1"], ThemeColorValue::Concrete("#000000".to_string()));
        assert_eq!(descriptor.colors["accent1"].to_string(), "#4472C4");
        assert_eq!(descriptor.colors["lt1"].to_string(), "scheme:window");
        assert_eq!(descriptor.colors["accent2"].to_string(), "scheme:accent1");
        assert_eq!(descriptor.colors["accent3"].to_string(), "scheme:red");

        // One warning for three symbolic slots
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("3 theme colour(s)"));
    }

    #[test]
    fn test_fonts_from_scheme() {
        let t = theme(r#"<a:clrScheme name="c"/>"#, FONTS);
        let (descriptor, warnings) = describe_theme(Some(&t), b"");
        let fonts = descriptor.fonts;

        assert!(warnings.is_empty());
        assert_eq!(fonts.source, FontSource::Scheme);
        assert_eq!(fonts.heading, "Georgia");
        assert_eq!(fonts.body, "Verdana");
        assert_eq!(fonts.heading_east_asian.as_deref(), Some("SimSun"));
        assert_eq!(fonts.body_complex_script.as_deref(), Some("Arial"));
        assert_eq!(fonts.heading_complex_script, None);
    }

    #[test]
    fn test_fonts_from_master_text() {
        let t = theme(r#"<a:clrScheme name="c"/>"#, "");
        let master = br#"<a:rPr><a:latin typeface="+mj-lt"/><a:latin typeface="Brand &amp; Sans"/></a:rPr>"#;
        let (descriptor, warnings) = describe_theme(Some(&t), master);

        assert!(warnings.is_empty());
        assert_eq!(descriptor.fonts.source, FontSource::MasterText);
        assert_eq!(descriptor.fonts.heading, "Brand & Sans");
        assert_eq!(descriptor.fonts.body, "Brand & Sans");
    }

    #[test]
    fn test_missing_theme_falls_back() {
        let (descriptor, warnings) = describe_theme(None, b"<p:sldMaster/>");
        assert!(descriptor.colors.is_empty());
        assert_eq!(descriptor.name, None);
        assert_eq!(descriptor.fonts, ThemeFonts::default());
        assert_eq!(descriptor.fonts.heading, FALLBACK_FONT);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn test_color_value_serializes_as_string() {
        let json = serde_json::to_string(&ThemeColorValue::Symbolic("tx1".to_string())).unwrap();
        assert_eq!(json, r#""scheme:tx1""#);
    }

    #[test]
    fn test_first_explicit_typeface() {
        assert_eq!(first_explicit_typeface(br#"typeface="+mn-lt" typeface="""#), None);
        assert_eq!(
            first_explicit_typeface(br#"<a:ea typeface=""/><a:latin typeface="Segoe UI"/>"#).as_deref(),
            Some("Segoe UI")
        );
    }
}

//! Interpolation templates.
//!
//! A template is text with embedded markers, `Hello {{ name }}!`. Parsing
//! splits it into literal and marker segments once; rendering resolves every
//! marker against a data object and stitches the pieces back together.
//!
//! Markers are matched lazily: `{{ a }} and {{ b }}` holds two markers.
//! A marker must contain at least one character (`{{}}` is literal text)
//! and an opening delimiter without a closing one is literal text as well.

use smallvec::SmallVec;

use crate::config::Syntax;
use crate::reactive::Object;

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    /// A marker's expression, trimmed.
    Marker(String),
}

/// Parsed interpolation template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: SmallVec<[Segment; 4]>,
}

impl Template {
    pub fn parse(source: &str, syntax: &Syntax) -> Self {
        let (open, close) = (syntax.open.as_str(), syntax.close.as_str());
        let mut segments: SmallVec<[Segment; 4]> = SmallVec::new();
        let mut literal = String::new();
        let mut rest = source;

        // Empty delimiters would match everywhere.
        let delimited = !open.is_empty() && !close.is_empty();

        while let Some(start) = rest.find(open).filter(|_| delimited) {
            let after_open = &rest[start + open.len()..];
            let Some(end) = after_open.find(close) else {
                break;
            };

            if end == 0 {
                // Empty marker: keep it as text and move past it.
                let consumed = start + open.len() + close.len();
                literal.push_str(&rest[..consumed]);
                rest = &rest[consumed..];
                continue;
            }

            literal.push_str(&rest[..start]);
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Marker(after_open[..end].trim().to_string()));
            rest = &after_open[end + close.len()..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Whether `source` contains at least one marker.
    pub fn detect(source: &str, syntax: &Syntax) -> bool {
        Self::parse(source, syntax).has_markers()
    }

    pub fn has_markers(&self) -> bool {
        self.markers().next().is_some()
    }

    /// Marker expressions in order of appearance.
    pub fn markers(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Marker(expr) => Some(expr.as_str()),
            Segment::Literal(_) => None,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolve every marker against `data`.
    pub fn render(&self, data: &Object) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.clone(),
                Segment::Marker(expr) => data.get(expr).to_text(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Template {
        Template::parse(source, &Syntax::default())
    }

    #[test]
    fn splits_literals_and_markers() {
        let template = parse("Hello {{ name }}!");
        assert_eq!(
            template.segments(),
            &[
                Segment::Literal("Hello ".into()),
                Segment::Marker("name".into()),
                Segment::Literal("!".into()),
            ]
        );
    }

    #[test]
    fn markers_are_matched_lazily() {
        let template = parse("{{a}} and {{ b }}");
        assert_eq!(template.markers().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn incomplete_or_empty_markers_are_text() {
        assert!(!parse("plain").has_markers());
        assert!(!parse("{{ open").has_markers());
        assert!(!parse("{{}}").has_markers());
        assert_eq!(parse("{{}} {{x}}").markers().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn render_resolves_every_marker() {
        let data: Object = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(parse("{{a}}+{{b}}={{ c }}").render(&data), "1+2=");
    }

    #[test]
    fn custom_delimiters() {
        let syntax = Syntax {
            open: "[[".into(),
            close: "]]".into(),
            ..Syntax::default()
        };
        let template = Template::parse("{{x}} [[ y ]]", &syntax);
        assert_eq!(template.markers().collect::<Vec<_>>(), vec!["y"]);
        assert!(Template::detect("[[y]]", &syntax));
    }
}

//! Path templates for the rename workflow.
//!
//! A template is a `/`-separated list of segments; every segment but the last names a
//! directory, the last one the file. Placeholders:
//!
//! | placeholder | value                                   |
//! |-------------|-----------------------------------------|
//! | `%a`        | artist                                  |
//! | `%z`        | album artist                            |
//! | `%b`        | album                                   |
//! | `%p`        | composer                                |
//! | `%d`        | disc number                             |
//! | `%g`        | genre                                   |
//! | `%n`        | track number, zero padded to two digits |
//! | `%t`        | title                                   |
//! | `%y`        | year                                    |
//!
//! A placeholder whose tag is missing or renders blank is dropped together with the literal text that
//! follows it, so `%d-%n %t` becomes `02 Title` on single-disc releases.
use crate::error::{Error, Result};
use crate::reader::parse_number;
use crate::tags::{Field, TagStore};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

static ILLEGAL_FS_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[:\?<>\\\*\|"/\x00]"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    Artist,
    AlbumArtist,
    Album,
    Composer,
    Disc,
    Genre,
    Number,
    Title,
    Year,
}

impl Placeholder {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'a' => Placeholder::Artist,
            'z' => Placeholder::AlbumArtist,
            'b' => Placeholder::Album,
            'p' => Placeholder::Composer,
            'd' => Placeholder::Disc,
            'g' => Placeholder::Genre,
            'n' => Placeholder::Number,
            't' => Placeholder::Title,
            'y' => Placeholder::Year,
            _ => return None,
        })
    }

    fn field(&self) -> Field {
        match self {
            Placeholder::Artist => Field::Artist,
            Placeholder::AlbumArtist => Field::AlbumArtist,
            Placeholder::Album => Field::Album,
            Placeholder::Composer => Field::Composer,
            Placeholder::Disc => Field::DiscNumber,
            Placeholder::Genre => Field::Genre,
            Placeholder::Number => Field::TrackNumber,
            Placeholder::Title => Field::Title,
            Placeholder::Year => Field::Date,
        }
    }

    fn token(&self) -> String {
        let c = match self {
            Placeholder::Artist => 'a',
            Placeholder::AlbumArtist => 'z',
            Placeholder::Album => 'b',
            Placeholder::Composer => 'p',
            Placeholder::Disc => 'd',
            Placeholder::Genre => 'g',
            Placeholder::Number => 'n',
            Placeholder::Title => 't',
            Placeholder::Year => 'y',
        };
        format!("%{c}")
    }
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Literal(String),
    Placeholder(Placeholder),
}

fn tokenize(segment: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        let placeholder = if c == '%' { chars.peek().copied().and_then(Placeholder::from_char) } else { None };
        match placeholder {
            Some(p) => {
                chars.next();
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder(p));
            }
            None => literal.push(c),
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    tokens
}

/// Rendered replacement for `placeholder`, or `None` when it is omitted: the tag is
/// missing or the replacement is blank. A present but empty list is not missing;
/// asking it for a value is an error.
fn value<S: TagStore + ?Sized>(source: &S, placeholder: Placeholder) -> Result<Option<String>> {
    let field = placeholder.field();
    let Some(values) = source.values(field) else {
        return Ok(None);
    };
    let first = values
        .into_iter()
        .next()
        .ok_or_else(|| Error::RenderIndex { placeholder: placeholder.token(), field: field.as_str() })?;
    if first.trim().is_empty() {
        return Ok(None);
    }
    let rendered = match placeholder {
        Placeholder::Number => parse_number(&first).map(|n| format!("{n:02}")).ok_or_else(|| Error::TemplateValue {
            placeholder: placeholder.token(),
            field: field.as_str(),
            value: first.clone(),
        })?,
        Placeholder::Year => first.split('-').next().unwrap_or_default().trim().to_string(),
        _ => first,
    };
    Ok(Some(rendered).filter(|v| !v.trim().is_empty()))
}

/// Substitute the placeholders of one template segment.
pub fn render_component<S: TagStore + ?Sized>(source: &S, segment: &str) -> Result<String> {
    let mut out = String::new();
    let mut drop_literal = false;
    for token in tokenize(segment) {
        match token {
            Token::Literal(text) => {
                if drop_literal {
                    // "(%y) " loses its opening bracket along with the rest.
                    if text.starts_with([')', ']', '}']) {
                        while out.ends_with(['(', '[', '{']) {
                            out.pop();
                        }
                    }
                } else {
                    out.push_str(&text);
                }
                drop_literal = false;
            }
            Token::Placeholder(p) => match value(source, p)? {
                Some(v) => {
                    out.push_str(&v);
                    drop_literal = false;
                }
                None => drop_literal = true,
            },
        }
    }
    Ok(out)
}

/// Make a rendered segment safe to use as a single path component.
pub fn sanitize(name: &str) -> String {
    ILLEGAL_FS_CHARS.replace_all(name, "-").trim().to_string()
}

/// Directory part of `template` for the files of `root`.
///
/// Returns `(destination_directory, destination_root)`. Destinations are siblings of
/// `root`; `destination_root` is the first rendered directory. A template without
/// directory segments keeps files in `root`.
pub fn render_path<S: TagStore + ?Sized>(root: &Path, source: &S, template: &str) -> Result<(PathBuf, PathBuf)> {
    let segments: Vec<&str> = template.split('/').collect();
    let mut components = Vec::new();
    for segment in &segments[..segments.len() - 1] {
        let rendered = sanitize(&render_component(source, segment)?);
        if !rendered.is_empty() {
            components.push(rendered);
        }
    }

    let Some(first) = components.first() else {
        return Ok((root.to_path_buf(), root.to_path_buf()));
    };
    let base = root.parent().unwrap_or(root);
    let destination_root = base.join(first);
    let destination = components.iter().fold(base.to_path_buf(), |p, c| p.join(c));
    Ok((destination, destination_root))
}

/// Full destination of `source_path` under `destination`. An empty filename segment
/// keeps the original file name; otherwise the original extension is kept.
pub fn render_filename<S: TagStore + ?Sized>(source_path: &Path, destination: &Path, source: &S, template: &str) -> Result<PathBuf> {
    let segment = template.rsplit('/').next().unwrap_or_default();
    let original = source_path.file_name().map(PathBuf::from).unwrap_or_default();
    if segment.trim().is_empty() {
        return Ok(destination.join(original));
    }

    let stem = render_component(source, segment)?;
    if stem.trim().is_empty() {
        return Ok(destination.join(original));
    }
    let name = match source_path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    };
    Ok(destination.join(sanitize(&name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags::TagSet;

    #[test]
    fn tokenize_keeps_unknown_percent_sequences_literal() {
        assert_eq!(
            tokenize("%n 100%x%t"),
            vec![
                Token::Placeholder(Placeholder::Number),
                Token::Literal(" 100%x".into()),
                Token::Placeholder(Placeholder::Title),
            ]
        );
    }

    #[test]
    fn values_are_not_rescanned() {
        let tags = TagSet::new().with(Field::Title, ["100%t"]).with(Field::TrackNumber, ["3"]);
        assert_eq!(render_component(&tags, "%n %t").unwrap(), "03 100%t");
    }

    #[test]
    fn sanitize_replaces_illegal_characters() {
        assert_eq!(sanitize("Album1 / Album2"), "Album1 - Album2");
        assert_eq!(sanitize("What? <Live>"), "What- -Live-");
    }
}

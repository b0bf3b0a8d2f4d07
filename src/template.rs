//! Path templates with `{name}` placeholders.
//!
//! Templates follow format-string rules: `{name}` is a placeholder, `{{` and
//! `}}` are literal braces. Resolving a template consumes the matching
//! parameters and hands the rest back to be sent as the query string.

use crate::{Params, Result, SoundCloudError};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in a substituted path value.
///
/// Everything RFC 3986 allows in a path segment (including `:` and `@`)
/// stays literal; separators, spaces and `%` are escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Literal(String),
    Placeholder(&'a str),
}

fn parse(template: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = template.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                literal.push('{');
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                literal.push('}');
            }
            '{' => {
                let start = index + 1;
                let end = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some((_, '{')) | None => {
                            return Err(SoundCloudError::Template(format!(
                                "unclosed placeholder in `{template}`"
                            )))
                        }
                        Some(_) => {}
                    }
                };
                let name = &template[start..end];
                if name.is_empty() {
                    return Err(SoundCloudError::Template(format!(
                        "empty placeholder in `{template}`"
                    )));
                }
                if let Some(marker) = name.chars().find(|c| matches!(c, ':' | '!')) {
                    return Err(SoundCloudError::Template(format!(
                        "placeholder `{{{name}}}` in `{template}` uses '{marker}'; \
                         conversions and format specs are not supported"
                    )));
                }
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Placeholder(name));
            }
            '}' => {
                return Err(SoundCloudError::Template(format!(
                    "single '}}' encountered in `{template}`"
                )))
            }
            _ => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

/// Names of the placeholders in `template`, in order of appearance.
pub fn placeholders(template: &str) -> Result<Vec<&str>> {
    Ok(parse(template)?
        .into_iter()
        .filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name),
            Segment::Literal(_) => None,
        })
        .collect())
}

/// Resolve `template` against `params` and prefix it with `base`.
///
/// Returns the absolute URL and the parameters that were not consumed by a
/// placeholder. Substituted values are percent-encoded.
///
/// # Examples
///
/// ```rust
/// use asynccloud::{template, Params};
///
/// let params = Params::new().with("a", 1).with("b", 2).with("c", 3);
/// let (url, rest) = template::resolve("https://host", "/x/{a}/y/{b}", params)?;
///
/// assert_eq!(url, "https://host/x/1/y/2");
/// assert_eq!(rest, Params::new().with("c", 3));
/// # Ok::<(), asynccloud::SoundCloudError>(())
/// ```
pub fn resolve(base: &str, template: &str, mut params: Params) -> Result<(String, Params)> {
    let mut url = String::from(base);
    let mut consumed: Vec<(&str, String)> = Vec::new();
    for segment in parse(template)? {
        match segment {
            Segment::Literal(text) => url.push_str(&text),
            Segment::Placeholder(name) => {
                // The same placeholder may appear more than once.
                let value = match consumed.iter().find(|(seen, _)| *seen == name) {
                    Some((_, value)) => value.clone(),
                    None => {
                        let value = params.remove(name).ok_or_else(|| {
                            SoundCloudError::Template(format!(
                                "missing path parameter `{name}` for `{template}`"
                            ))
                        })?;
                        consumed.push((name, value.clone()));
                        value
                    }
                };
                url.extend(utf8_percent_encode(&value, PATH_SEGMENT));
            }
        }
    }
    Ok((url, params))
}

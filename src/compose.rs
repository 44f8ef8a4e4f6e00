use crate::{ Result, Tag, parse_tag };

/// Renders tags back into annotation text.
///
/// Function names are always written with the explicit `func:` key. The
/// result parses back to the same tags.
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ compose_tag, parse_tag };
/// let tags = parse_tag("len:Count, Decode, [len:2]").unwrap();
/// assert_eq!(compose_tag(&tags), "len:Count,func:Decode,[len:2]");
/// ```
pub fn compose_tag(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| tag.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Composes a tag list from separately written directive strings.
///
/// Each string is parsed as a tag list and the results are concatenated in
/// order.
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ compose_tag_list, Tag };
/// let tags = compose_tag_list(&["len:4", "offset:2,Decode"]).unwrap();
/// assert_eq!(tags, vec![
///     Tag::Length("4".into()),
///     Tag::OffsetCurrent("2".into()),
///     Tag::Func("Decode".into()),
/// ]);
/// ```
pub fn compose_tag_list(directives: &[&str]) -> Result<Vec<Tag>> {
    let mut result = Vec::new();
    for directive in directives {
        result.extend(parse_tag(directive)?);
    }
    Ok(result)
}

/// Composes an element descriptor from separately written directive strings.
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ compose_element_tag, compose_tag };
/// let element = compose_element_tag(&["len:2", "func:Decode"]).unwrap();
/// assert_eq!(compose_tag(&[element]), "[len:2,func:Decode]");
/// ```
pub fn compose_element_tag(directives: &[&str]) -> Result<Tag> {
    compose_tag_list(directives).map(Tag::Element)
}

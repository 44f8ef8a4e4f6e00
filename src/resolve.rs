use crate::{
    Anchor,
    Error,
    FieldAccessor,
    FieldOffset,
    FieldValue,
    IgnorePolicy,
    ReadPlan,
    ResolveOptions,
    Result,
    Tag,
    parse_tag,
};

/// Resolves a tag list into a read plan for one field of `instance`.
///
/// Tags are applied in order: `len` sets the length (a later one wins),
/// offsets accumulate, `func` sets the routine name (a later one wins), and
/// an element descriptor is resolved recursively against the same instance.
/// The ignore marker discards everything and yields [`ReadPlan::ignored`].
///
/// Lengths and offsets are base-10 integer literals or names of integer
/// fields on `instance`.
///
/// # Errors
///
/// Fails with an error of kind [`ErrorKind::UnresolvableReference`] naming
/// the field when a value is neither a literal nor an integer field that
/// fits in an `i64`. No partial plan is returned.
///
/// [`ErrorKind::UnresolvableReference`]: crate::ErrorKind::UnresolvableReference
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ parse_tag, resolve_read_plan, Fields };
/// let header = Fields::new().with("Count", 42u32);
/// let tags = parse_tag("len:Count,offsetStart:4").unwrap();
/// let plan = resolve_read_plan(&header, &tags).unwrap();
/// assert_eq!(plan.length, Some(42));
/// ```
pub fn resolve_read_plan<A>(instance: &A, tags: &[Tag]) -> Result<ReadPlan>
where
    A: FieldAccessor + ?Sized,
{
    resolve_read_plan_with(instance, tags, &ResolveOptions::default())
}

/// Like [`resolve_read_plan`], with explicit resolver options.
pub fn resolve_read_plan_with<A>(
    instance: &A,
    tags: &[Tag],
    options: &ResolveOptions,
) -> Result<ReadPlan>
where
    A: FieldAccessor + ?Sized,
{
    let mut plan = ReadPlan::default();

    for (position, tag) in tags.iter().enumerate() {
        match tag {
            Tag::Ignore => {
                if options.ignore_policy == IgnorePolicy::Leading && position != 0 {
                    return Err(Error::MisplacedIgnore(position));
                }
                log::debug!("ignore marker at position {position}, skipping field");
                return Ok(ReadPlan::ignored());
            }
            Tag::Length(value) => {
                plan.length = Some(resolve_value(instance, value)?);
            }
            Tag::OffsetCurrent(value) => {
                push_offset(&mut plan, instance, value, Anchor::Current)?;
            }
            Tag::OffsetStart(value) => {
                push_offset(&mut plan, instance, value, Anchor::Start)?;
            }
            Tag::OffsetEnd(value) => {
                push_offset(&mut plan, instance, value, Anchor::End)?;
            }
            Tag::Func(name) => {
                plan.func_name = Some(name.clone());
            }
            Tag::Element(element_tags) => {
                let element = resolve_read_plan_with(instance, element_tags, options)?;
                plan.element = Some(Box::new(element));
            }
        }
    }

    Ok(plan)
}

/// Parses `src` and resolves the resulting tags against `instance`.
///
/// # Example
///
/// ```rust
/// # use bintag_parse::{ parse_read_plan, Anchor, FieldOffset, Fields };
/// let plan = parse_read_plan(&Fields::new(), "offset:5,offset:3").unwrap();
/// assert_eq!(plan.offsets, vec![
///     FieldOffset::new(5, Anchor::Current),
///     FieldOffset::new(3, Anchor::Current),
/// ]);
/// ```
pub fn parse_read_plan<A>(instance: &A, src: &str) -> Result<ReadPlan>
where
    A: FieldAccessor + ?Sized,
{
    let tags = parse_tag(src)?;
    resolve_read_plan(instance, &tags)
}

//
// === Private Functions ===
//

fn push_offset<A>(
    plan: &mut ReadPlan,
    instance: &A,
    value: &str,
    anchor: Anchor,
) -> Result<()>
where
    A: FieldAccessor + ?Sized,
{
    let amount = resolve_value(instance, value)?;
    plan.offsets.push(FieldOffset::new(amount, anchor));
    Ok(())
}

/// A literal integer, or else the current value of the named field.
fn resolve_value<A>(instance: &A, value: &str) -> Result<i64>
where
    A: FieldAccessor + ?Sized,
{
    if let Ok(literal) = value.parse::<i64>() {
        return Ok(literal);
    }

    let resolved = match instance.field_value(value) {
        Some(FieldValue::Signed(v)) => v,
        Some(FieldValue::Unsigned(v)) => i64::try_from(v)
            .map_err(|_| Error::ReferenceOutOfRange(value.to_string(), v))?,
        Some(FieldValue::Other) => {
            return Err(Error::NonIntegerField(value.to_string()));
        }
        None => return Err(Error::UnresolvableReference(value.to_string())),
    };
    log::debug!("resolved field reference {value} = {resolved}");
    Ok(resolved)
}

//! # Binary Field Tag Parser and Read-Plan Resolver
//!
//! This crate is the tag-language front end of a declarative binary structure
//! decoder. Each field of a structure carries a short annotation string, such
//! as `len:Count,offsetStart:4,func:Decode`, describing how its bytes are laid
//! out. The crate turns that string into a [`ReadPlan`]: how many bytes to
//! read, where to seek first, which custom routine to call, and how to read
//! each element of a container field.
//!
//! The primary functions provided are:
//!
//! - `parse_tag`: Parses an annotation string into an ordered list of
//!   [`Tag`]s.
//! - `resolve_read_plan`: Resolves a tag list into a [`ReadPlan`], reading
//!   sibling fields of the structure instance through a [`FieldAccessor`].
//! - `parse_read_plan`: Both steps in one call.
//! - `compose_tag`: Renders tags back into annotation text.
//!
//! | Directive      | Example(s)                          | Meaning                                   |
//! | -------------- | ----------------------------------- | ----------------------------------------- |
//! | Ignore         | `-`                                 | Skip the field                            |
//! | Length         | `len:10`<br>`len:Count`             | Number of bytes or items to read          |
//! | Offset         | `offset:4`<br>`offset:Skip`         | Seek relative to the current position     |
//! | Offset (start) | `offsetStart:16`                    | Seek relative to the start of the stream  |
//! | Offset (end)   | `offsetEnd:-8`                      | Seek relative to the end of the stream    |
//! | Function       | `func:Decode`<br>`Decode`           | Decode with the named routine             |
//! | Element        | `[len:2,func:Decode]`               | Tags applied to each element of the field |
//!
//! ## Field References
//!
//! The value of a length or offset directive is either a base-10 integer
//! literal or the name of another field of the same structure. A name is
//! resolved to the integer that field currently holds, so a length-prefixed
//! array can be described as `len:Count` once `Count` has been decoded.
//! Element descriptors resolve their references against the containing
//! structure, not against the element.
//!
//! ```rust
//! use bintag_parse::{ impl_field_accessor, parse_read_plan, Anchor, FieldOffset };
//!
//! struct Record {
//!     count: u16,
//!     skip: i32,
//!     items: Vec<u32>,
//! }
//!
//! impl_field_accessor!(Record { count, skip, items });
//!
//! let record = Record { count: 3, skip: 2, items: Vec::new() };
//! let plan = parse_read_plan(&record, "len:count,offset:skip,[len:4]").unwrap();
//! assert_eq!(plan.length, Some(3));
//! assert_eq!(plan.offsets, vec![FieldOffset::new(2, Anchor::Current)]);
//! assert_eq!(plan.element().and_then(|e| e.length), Some(4));
//! ```

mod error;
pub use error::{ Error, ErrorKind, Result };

mod token;
pub use token::Token;

mod tag;
pub use tag::{ Tag, TagKind };

mod options;
pub use options::{ IgnorePolicy, ParseOptions, ResolveOptions };

mod parse;
pub use parse::{ parse_tag, parse_tag_with };

mod field;
pub use field::{ AsFieldValue, FieldAccessor, FieldValue, Fields };

mod plan;
pub use plan::{ Anchor, FieldOffset, ReadPlan };

mod resolve;
pub use resolve::{ parse_read_plan, resolve_read_plan, resolve_read_plan_with };

mod compose;
pub use compose::{ compose_element_tag, compose_tag, compose_tag_list };
